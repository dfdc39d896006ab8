use axum::{Router, extract::State, routing::get};
use nutrisnap_core::domain::health::{entities::HealthStatus, ports::HealthCheckService};

use crate::application::http::server::{api_entities::response::Response, app_state::AppState};

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Liveness and meal log readiness",
    responses(
        (status = 200, body = HealthStatus)
    ),
)]
pub async fn health(State(state): State<AppState>) -> Response<HealthStatus> {
    Response::OK(state.service.health().await)
}

pub fn health_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/health", state.args.server.root_path),
        get(health),
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::application::http::test::test_server;

    #[tokio::test]
    async fn test_health_reports_ready_meal_log() {
        let server = test_server().await;

        let response = server.get("/health").await;

        response.assert_status_ok();
        response.assert_json(&json!({ "status": "ok", "mealLogReady": true }));
    }

    #[tokio::test]
    async fn test_config_exposes_model_without_secrets() {
        let server = test_server().await;

        let response = server.get("/config").await;

        response.assert_status_ok();
        let body = response.json::<serde_json::Value>();
        assert_eq!(body["geminiModel"], "gemini-2.0-flash");
        assert_eq!(body["mealLogBackend"], "memory");
        assert!(!response.text().contains("test-key"));
    }
}
