pub mod refine_estimate;
pub mod scan_food;
