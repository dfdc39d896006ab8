use chrono::TimeDelta;
use tracing::instrument;

use crate::domain::{
    common::{
        entities::app_errors::CoreError, generate_timestamp, generate_uuid_v7, services::Service,
    },
    meal_log::{
        entities::LoggedMeal,
        ports::{MealLogRepository, MealLogService},
    },
    nutrition::{entities::ScanResult, ports::LLMClient},
};

impl<LLM, ML> MealLogService for Service<LLM, ML>
where
    LLM: LLMClient,
    ML: MealLogRepository,
{
    #[instrument(skip(self))]
    async fn load_meal_log(&self) -> Result<(), CoreError> {
        let mut state = self.meal_log.write().await;
        if state.is_some() {
            return Ok(());
        }

        // The store stays not ready while the medium cannot be read.
        let meals = self.meal_log_repository.load().await.map_err(|e| {
            tracing::error!("Failed to load meal log: {}", e);
            e
        })?;

        tracing::info!(count = meals.len(), "Meal log loaded");
        *state = Some(meals);

        Ok(())
    }

    #[instrument(skip(self, scan), fields(identification = %scan.identification))]
    async fn append_meal(&self, scan: ScanResult) -> Result<LoggedMeal, CoreError> {
        let mut state = self.meal_log.write().await;
        let meals = state.as_ref().ok_or(CoreError::MealLogNotReady)?;

        let (mut logged_at, _) = generate_timestamp();
        if let Some(latest) = meals.first()
            && logged_at <= latest.logged_at
        {
            logged_at = latest.logged_at + TimeDelta::microseconds(1);
        }

        let meal = LoggedMeal::new(generate_uuid_v7(), logged_at, scan);

        let mut updated = Vec::with_capacity(meals.len() + 1);
        updated.push(meal.clone());
        updated.extend(meals.iter().cloned());

        // Memory only changes once the medium has accepted the write.
        self.meal_log_repository.save(updated.clone()).await?;
        *state = Some(updated);

        tracing::info!(meal_id = %meal.id, "Meal logged");

        Ok(meal)
    }

    async fn list_meals(&self) -> Result<Vec<LoggedMeal>, CoreError> {
        let state = self.meal_log.read().await;
        state.as_ref().cloned().ok_or(CoreError::MealLogNotReady)
    }

    #[instrument(skip(self))]
    async fn clear_meals(&self) -> Result<(), CoreError> {
        let mut state = self.meal_log.write().await;
        if state.is_none() {
            return Err(CoreError::MealLogNotReady);
        }

        self.meal_log_repository.save(Vec::new()).await?;
        *state = Some(Vec::new());

        tracing::info!("Meal log cleared");

        Ok(())
    }

    async fn is_meal_log_ready(&self) -> bool {
        self.meal_log.read().await.is_some()
    }
}
