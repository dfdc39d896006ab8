use crate::domain::{
    common::services::Service,
    health::{entities::HealthStatus, ports::HealthCheckService},
    meal_log::ports::{MealLogRepository, MealLogService},
    nutrition::ports::LLMClient,
};

impl<LLM, ML> HealthCheckService for Service<LLM, ML>
where
    LLM: LLMClient,
    ML: MealLogRepository,
{
    async fn health(&self) -> HealthStatus {
        let meal_log_ready = self.is_meal_log_ready().await;

        HealthStatus {
            status: if meal_log_ready { "ok" } else { "starting" }.to_string(),
            meal_log_ready,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::nutrition::ports::MockLLMClient,
        infrastructure::meal_log::InMemoryMealLogRepository,
    };

    #[tokio::test]
    async fn test_health_reports_meal_log_readiness() {
        let service = Service::new(
            MockLLMClient::new(),
            InMemoryMealLogRepository::default(),
            0.1,
        );
        assert_eq!(service.health().await.status, "starting");

        service.load_meal_log().await.unwrap();

        let health = service.health().await;
        assert_eq!(health.status, "ok");
        assert!(health.meal_log_ready);
    }
}
