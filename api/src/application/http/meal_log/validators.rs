use nutrisnap_core::domain::nutrition::entities::{NutrientRecord, ScanResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::http::nutrition::validators::{validate_not_blank, validate_record};

/// A scan result the user has accepted, possibly with refined nutrients.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LogMealValidator {
    #[validate(
        length(min = 1, max = 200, message = "identification must be between 1 and 200 characters"),
        custom(function = "validate_not_blank")
    )]
    pub identification: String,

    #[validate(custom(function = "validate_record"))]
    pub nutrients: NutrientRecord,

    #[validate(length(min = 1, message = "sourceImage is required"))]
    pub source_image: String,
}

impl From<LogMealValidator> for ScanResult {
    fn from(payload: LogMealValidator) -> Self {
        ScanResult::new(
            payload.identification.trim().to_string(),
            payload.nutrients,
            payload.source_image,
        )
    }
}
