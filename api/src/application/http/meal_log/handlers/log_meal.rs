use axum::extract::State;
use nutrisnap_core::domain::{
    meal_log::{entities::LoggedMeal, ports::MealLogService},
    nutrition::entities::ScanResult,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    meal_log::validators::LogMealValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LogMealResponse {
    pub data: LoggedMeal,
}

#[utoipa::path(
    post,
    path = "",
    tag = "meal-log",
    summary = "Log a meal",
    description = "Adds an accepted scan result to the meal log with a fresh id and timestamp.",
    responses(
        (status = 201, body = LogMealResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 503, body = ApiErrorResponse)
    ),
    request_body = LogMealValidator
)]
pub async fn log_meal(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<LogMealValidator>,
) -> Result<Response<LogMealResponse>, ApiError> {
    let meal = state
        .service
        .append_meal(ScanResult::from(payload))
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(LogMealResponse { data: meal }))
}
