use axum::extract::State;
use nutrisnap_core::domain::meal_log::{ports::MealLogService, value_objects::MealLogSnapshot};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GetMealsResponse {
    pub data: MealLogSnapshot,
}

#[utoipa::path(
    get,
    path = "",
    tag = "meal-log",
    summary = "List logged meals",
    description = "Returns every logged meal, most recent first. `ready` is false while the log is still loading.",
    responses(
        (status = 200, body = GetMealsResponse)
    ),
)]
pub async fn get_meals(
    State(state): State<AppState>,
) -> Result<Response<GetMealsResponse>, ApiError> {
    if !state.service.is_meal_log_ready().await {
        return Ok(Response::OK(GetMealsResponse {
            data: MealLogSnapshot {
                ready: false,
                meals: Vec::new(),
            },
        }));
    }

    let meals = state.service.list_meals().await.map_err(ApiError::from)?;

    Ok(Response::OK(GetMealsResponse {
        data: MealLogSnapshot { ready: true, meals },
    }))
}
