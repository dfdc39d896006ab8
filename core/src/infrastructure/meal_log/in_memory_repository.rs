use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{
    common::entities::app_errors::CoreError, meal_log::entities::LoggedMeal,
    meal_log::ports::MealLogRepository,
};

/// Process-local medium. Clones share the same collection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMealLogRepository {
    meals: Arc<RwLock<Vec<LoggedMeal>>>,
}

impl InMemoryMealLogRepository {
    pub fn with_meals(meals: Vec<LoggedMeal>) -> Self {
        Self {
            meals: Arc::new(RwLock::new(meals)),
        }
    }

    pub async fn snapshot(&self) -> Vec<LoggedMeal> {
        self.meals.read().await.clone()
    }
}

impl MealLogRepository for InMemoryMealLogRepository {
    async fn load(&self) -> Result<Vec<LoggedMeal>, CoreError> {
        Ok(self.snapshot().await)
    }

    async fn save(&self, meals: Vec<LoggedMeal>) -> Result<(), CoreError> {
        *self.meals.write().await = meals;
        Ok(())
    }
}
