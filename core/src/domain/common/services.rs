use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{
    meal_log::{entities::LoggedMeal, ports::MealLogRepository},
    nutrition::ports::LLMClient,
};

/// In-memory view of the persisted meal log. `None` until the first load.
pub type MealLogState = Arc<RwLock<Option<Vec<LoggedMeal>>>>;

pub struct Service<LLM, ML>
where
    LLM: LLMClient,
    ML: MealLogRepository,
{
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) meal_log_repository: Arc<ML>,
    pub(crate) meal_log: MealLogState,
    pub(crate) scan_temperature: f32,
}

impl<LLM, ML> Service<LLM, ML>
where
    LLM: LLMClient,
    ML: MealLogRepository,
{
    pub fn new(llm_client: LLM, meal_log_repository: ML, scan_temperature: f32) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
            meal_log_repository: Arc::new(meal_log_repository),
            meal_log: Arc::new(RwLock::new(None)),
            scan_temperature,
        }
    }
}

impl<LLM, ML> Clone for Service<LLM, ML>
where
    LLM: LLMClient,
    ML: MealLogRepository,
{
    fn clone(&self) -> Self {
        Self {
            llm_client: Arc::clone(&self.llm_client),
            meal_log_repository: Arc::clone(&self.meal_log_repository),
            meal_log: Arc::clone(&self.meal_log),
            scan_temperature: self.scan_temperature,
        }
    }
}
