pub mod clear_meals;
pub mod get_meals;
pub mod log_meal;
