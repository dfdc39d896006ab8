use axum::{Router, routing::post};
use utoipa::OpenApi;

use super::handlers::{
    refine_estimate::{__path_refine_estimate, refine_estimate},
    scan_food::{__path_scan_food, scan_food},
};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(scan_food, refine_estimate))]
pub struct NutritionApiDoc;

pub fn nutrition_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/nutrition/scan", state.args.server.root_path),
            post(scan_food),
        )
        .route(
            &format!("{}/nutrition/refine", state.args.server.root_path),
            post(refine_estimate),
        )
}
