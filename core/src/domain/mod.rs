pub mod common;
pub mod health;
pub mod meal_log;
pub mod nutrition;
