use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    nutrition::{
        entities::{RefinedEstimate, ScanResult},
        value_objects::{ImageDataUri, RefineEstimateInput},
    },
};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationOptions {
    pub temperature: Option<f32>,
}

/// LLM Client trait for calling AI models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Returns the model's raw text reply.
    fn generate_with_image(
        &self,
        prompt: String,
        image_data: Vec<u8>,
        mime_type: String,
        response_schema: serde_json::Value,
        options: GenerationOptions,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn generate_with_text(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
        options: GenerationOptions,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for nutrition estimation
#[cfg_attr(test, mockall::automock)]
pub trait NutritionService: Send + Sync {
    /// Identifies the food in the photo and estimates its nutrients.
    fn estimate_nutrition(
        &self,
        image: ImageDataUri,
    ) -> impl Future<Output = Result<ScanResult, CoreError>> + Send;

    /// Asks the model to revise an estimate in light of user corrections.
    fn refine_estimate(
        &self,
        input: RefineEstimateInput,
    ) -> impl Future<Output = Result<RefinedEstimate, CoreError>> + Send;
}
