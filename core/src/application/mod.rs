use crate::{
    domain::{
        common::{NutrisnapConfig, entities::app_errors::CoreError, services::Service},
        meal_log::ports::MealLogService,
    },
    infrastructure::{llm::GeminiLLMClient, meal_log::MealLogStore},
};

pub type NutrisnapService = Service<GeminiLLMClient, MealLogStore>;

/// Builds the service from configuration and loads the meal log so the
/// store is ready before the first request.
pub async fn create_service(config: NutrisnapConfig) -> Result<NutrisnapService, CoreError> {
    let llm_client = GeminiLLMClient::from(&config.llm);
    let meal_log_store = MealLogStore::from(&config.meal_log);

    tracing::info!(
        model = %config.llm.gemini_model,
        backend = ?config.meal_log.backend,
        "Creating NutriSnap service"
    );

    let service = Service::new(llm_client, meal_log_store, config.llm.scan_temperature);
    service.load_meal_log().await?;

    Ok(service)
}
