pub mod in_memory_repository;
pub mod json_file_repository;

pub use in_memory_repository::InMemoryMealLogRepository;
pub use json_file_repository::JsonFileMealLogRepository;

use crate::domain::{
    common::{MealLogBackend, MealLogConfig, entities::app_errors::CoreError},
    meal_log::{entities::LoggedMeal, ports::MealLogRepository},
};

/// Meal log medium chosen at startup from configuration.
#[derive(Debug, Clone)]
pub enum MealLogStore {
    File(JsonFileMealLogRepository),
    Memory(InMemoryMealLogRepository),
}

impl From<&MealLogConfig> for MealLogStore {
    fn from(config: &MealLogConfig) -> Self {
        match config.backend {
            MealLogBackend::File => Self::File(JsonFileMealLogRepository::new(config.path.clone())),
            MealLogBackend::Memory => Self::Memory(InMemoryMealLogRepository::default()),
        }
    }
}

impl MealLogRepository for MealLogStore {
    async fn load(&self) -> Result<Vec<LoggedMeal>, CoreError> {
        match self {
            Self::File(repository) => repository.load().await,
            Self::Memory(repository) => repository.load().await,
        }
    }

    async fn save(&self, meals: Vec<LoggedMeal>) -> Result<(), CoreError> {
        match self {
            Self::File(repository) => repository.save(meals).await,
            Self::Memory(repository) => repository.save(meals).await,
        }
    }
}
