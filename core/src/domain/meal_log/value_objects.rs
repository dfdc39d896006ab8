use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::meal_log::entities::LoggedMeal;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealLogSnapshot {
    pub ready: bool,
    /// Most recent first.
    pub meals: Vec<LoggedMeal>,
}
