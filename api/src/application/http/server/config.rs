use axum::extract::State;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{api_entities::response::Response, app_state::AppState};

/// Non-secret runtime settings.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub app_version: String,
    pub gemini_model: String,
    pub root_path: String,
    pub meal_log_backend: String,
}

#[utoipa::path(
    get,
    path = "/config",
    tag = "config",
    summary = "Runtime configuration",
    responses(
        (status = 200, body = ConfigResponse)
    ),
)]
pub async fn get_config(State(state): State<AppState>) -> Response<ConfigResponse> {
    Response::OK(ConfigResponse {
        app_version: env!("CARGO_PKG_VERSION").to_string(),
        gemini_model: state.args.llm.gemini_model.clone(),
        root_path: state.args.server.root_path.clone(),
        meal_log_backend: format!("{:?}", state.args.meal_log.backend).to_lowercase(),
    })
}
