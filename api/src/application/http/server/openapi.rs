use utoipa::OpenApi;

use crate::application::http::{
    health::{__path_health, health},
    meal_log::router::MealLogApiDoc,
    nutrition::router::NutritionApiDoc,
    server::config::{__path_get_config, get_config},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "NutriSnap API",
        description = "Estimates nutrition from food photos and keeps a local meal log"
    ),
    paths(get_config, health),
    nest(
        (path = "/nutrition", api = NutritionApiDoc),
        (path = "/meals", api = MealLogApiDoc),
    )
)]
pub struct ApiDoc;
