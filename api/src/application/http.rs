pub mod health;
pub mod meal_log;
pub mod nutrition;
pub mod server;
