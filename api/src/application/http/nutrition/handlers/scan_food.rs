use axum::extract::State;
use nutrisnap_core::domain::nutrition::{entities::ScanResult, ports::NutritionService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    nutrition::validators::ScanFoodValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScanFoodResponse {
    pub data: ScanResult,
}

#[utoipa::path(
    post,
    path = "/scan",
    tag = "nutrition",
    summary = "Estimate nutrition from a food photo",
    description = "Identifies the food in the photo and estimates its nutrients with the vision model. Every nutrient is present in the result; values the model omitted are 0.",
    responses(
        (status = 200, body = ScanFoodResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 502, body = ApiErrorResponse)
    ),
    request_body = ScanFoodValidator
)]
pub async fn scan_food(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<ScanFoodValidator>,
) -> Result<Response<ScanFoodResponse>, ApiError> {
    let image = payload.into_image()?;

    let result = state
        .service
        .estimate_nutrition(image)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(ScanFoodResponse { data: result }))
}
