use nutrisnap_core::domain::nutrition::{
    entities::NutrientRecord,
    value_objects::{ImageDataUri, NutrientCorrections, RefineEstimateInput},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::application::http::server::api_entities::api_error::ApiError;

pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024; // 5MB
pub const MAX_COMMENT_LENGTH: usize = 2000;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScanFoodValidator {
    /// `data:image/<type>;base64,<payload>`
    #[validate(length(min = 1, message = "photoDataUri is required"))]
    pub photo_data_uri: String,
}

impl ScanFoodValidator {
    /// Parses the photo and enforces the image type and size limit.
    pub fn into_image(self) -> Result<ImageDataUri, ApiError> {
        let image = ImageDataUri::parse(&self.photo_data_uri).map_err(ApiError::from)?;

        if !image.is_image() {
            return Err(ApiError::ValidationError(format!(
                "Unsupported file type {}. Please upload an image",
                image.mime_type()
            )));
        }

        if image.size_bytes() > MAX_IMAGE_SIZE {
            return Err(ApiError::ValidationError(format!(
                "Image too large. Max size is {} bytes",
                MAX_IMAGE_SIZE
            )));
        }

        Ok(image)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefineEstimateValidator {
    #[validate(
        length(min = 1, max = 200, message = "foodName must be between 1 and 200 characters"),
        custom(function = "validate_not_blank")
    )]
    pub food_name: String,

    #[validate(custom(function = "validate_record"))]
    pub original_estimation: NutrientRecord,

    #[serde(default)]
    #[validate(custom(function = "validate_corrections"))]
    pub user_corrections: NutrientCorrections,
}

impl From<RefineEstimateValidator> for RefineEstimateInput {
    fn from(payload: RefineEstimateValidator) -> Self {
        RefineEstimateInput {
            food_name: payload.food_name,
            original_estimation: payload.original_estimation,
            user_corrections: payload.user_corrections,
        }
    }
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// Every nutrient must be finite and non-negative.
pub fn validate_record(record: &NutrientRecord) -> Result<(), ValidationError> {
    let invalid = record.invalid_fields();
    if invalid.is_empty() {
        return Ok(());
    }

    let fields: Vec<&str> = invalid.iter().map(|f| f.key()).collect();
    Err(ValidationError::new("invalid_nutrients").with_message(
        format!("nutrients must be non-negative numbers: {}", fields.join(", ")).into(),
    ))
}

pub fn validate_corrections(corrections: &NutrientCorrections) -> Result<(), ValidationError> {
    let invalid = corrections.invalid_fields();
    if !invalid.is_empty() {
        let fields: Vec<&str> = invalid.iter().map(|f| f.key()).collect();
        return Err(ValidationError::new("invalid_corrections").with_message(
            format!("corrections must be non-negative numbers: {}", fields.join(", ")).into(),
        ));
    }

    if corrections
        .comments
        .as_ref()
        .is_some_and(|c| c.chars().count() > MAX_COMMENT_LENGTH)
    {
        return Err(ValidationError::new("comment_too_long").with_message(
            format!("comments must be at most {} characters", MAX_COMMENT_LENGTH).into(),
        ));
    }

    Ok(())
}
