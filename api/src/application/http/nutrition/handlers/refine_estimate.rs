use axum::extract::State;
use nutrisnap_core::domain::nutrition::{
    entities::RefinedEstimate, ports::NutritionService, value_objects::RefineEstimateInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    nutrition::validators::RefineEstimateValidator,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RefineEstimateResponse {
    pub data: RefinedEstimate,
}

#[utoipa::path(
    post,
    path = "/refine",
    tag = "nutrition",
    summary = "Refine an estimate with user feedback",
    description = "Sends the original estimate and the user's corrections to the model and returns a complete revised estimate with the model's reasoning. Nothing is logged.",
    responses(
        (status = 200, body = RefineEstimateResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 502, body = ApiErrorResponse)
    ),
    request_body = RefineEstimateValidator
)]
pub async fn refine_estimate(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<RefineEstimateValidator>,
) -> Result<Response<RefineEstimateResponse>, ApiError> {
    let refined = state
        .service
        .refine_estimate(RefineEstimateInput::from(payload))
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(RefineEstimateResponse { data: refined }))
}
