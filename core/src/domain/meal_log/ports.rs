use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    meal_log::entities::LoggedMeal,
    nutrition::entities::ScanResult,
};

/// Persistence medium for the meal log. The store owns it exclusively.
#[cfg_attr(test, mockall::automock)]
pub trait MealLogRepository: Send + Sync {
    /// Reads the whole collection, most recent first.
    fn load(&self) -> impl Future<Output = Result<Vec<LoggedMeal>, CoreError>> + Send;

    /// Replaces the whole collection.
    fn save(&self, meals: Vec<LoggedMeal>) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Service trait for the local meal log
#[cfg_attr(test, mockall::automock)]
pub trait MealLogService: Send + Sync {
    /// Loads the persisted collection once. Later calls are no-ops.
    fn load_meal_log(&self) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn append_meal(
        &self,
        scan: ScanResult,
    ) -> impl Future<Output = Result<LoggedMeal, CoreError>> + Send;

    fn list_meals(&self) -> impl Future<Output = Result<Vec<LoggedMeal>, CoreError>> + Send;

    fn clear_meals(&self) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn is_meal_log_ready(&self) -> impl Future<Output = bool> + Send;
}
