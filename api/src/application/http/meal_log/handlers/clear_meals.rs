use axum::extract::State;
use nutrisnap_core::domain::meal_log::ports::MealLogService;

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ApiErrorResponse},
        response::Response,
    },
    app_state::AppState,
};

#[utoipa::path(
    delete,
    path = "",
    tag = "meal-log",
    summary = "Clear the meal log",
    description = "Removes every logged meal. This cannot be undone.",
    responses(
        (status = 204, description = "Meal log cleared"),
        (status = 503, body = ApiErrorResponse)
    ),
)]
pub async fn clear_meals(State(state): State<AppState>) -> Result<Response<()>, ApiError> {
    state.service.clear_meals().await.map_err(ApiError::from)?;

    Ok(Response::NoContent)
}
