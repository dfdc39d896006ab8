use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    meal_log::ports::MealLogRepository,
    nutrition::{
        entities::{RefinedEstimate, ScanResult},
        normalizer::{decode_model_reply, normalize_refinement_output, normalize_scan_output},
        ports::{GenerationOptions, LLMClient, NutritionService},
        prompts::{SCAN_PROMPT, render_refinement_prompt},
        schema::{get_refinement_schema, get_scan_schema},
        value_objects::{ImageDataUri, RefineEstimateInput},
    },
};

impl<LLM, ML> NutritionService for Service<LLM, ML>
where
    LLM: LLMClient,
    ML: MealLogRepository,
{
    #[instrument(skip(self, image), fields(mime_type = %image.mime_type(), size_bytes = image.size_bytes()))]
    async fn estimate_nutrition(&self, image: ImageDataUri) -> Result<ScanResult, CoreError> {
        let (source_image, mime_type, image_data) = image.into_parts();

        let raw_response = self
            .llm_client
            .generate_with_image(
                SCAN_PROMPT.to_string(),
                image_data,
                mime_type,
                get_scan_schema(),
                GenerationOptions {
                    temperature: Some(self.scan_temperature),
                },
            )
            .await?;

        let parsed = decode_model_reply(&raw_response)?;
        let result = normalize_scan_output(&parsed, source_image);

        tracing::info!(
            identification = %result.identification,
            calories = result.nutrients.calories,
            "Food scan completed"
        );

        Ok(result)
    }

    #[instrument(skip(self, input), fields(food_name = %input.food_name))]
    async fn refine_estimate(
        &self,
        input: RefineEstimateInput,
    ) -> Result<RefinedEstimate, CoreError> {
        let prompt = render_refinement_prompt(
            &input.food_name,
            &input.original_estimation,
            &input.user_corrections,
        );

        let raw_response = self
            .llm_client
            .generate_with_text(
                prompt,
                get_refinement_schema(),
                GenerationOptions::default(),
            )
            .await?;

        let parsed = decode_model_reply(&raw_response)?;
        let refined = normalize_refinement_output(&parsed);

        tracing::info!(
            calories = refined.updated.calories,
            "Nutrition estimate refined"
        );

        Ok(refined)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        domain::nutrition::{
            entities::{NutrientField, NutrientRecord},
            ports::MockLLMClient,
            value_objects::NutrientCorrections,
        },
        infrastructure::meal_log::InMemoryMealLogRepository,
    };

    const IMAGE: &str = "data:image/jpeg;base64,/9j/4A==";

    fn service(llm: MockLLMClient) -> Service<MockLLMClient, InMemoryMealLogRepository> {
        Service::new(llm, InMemoryMealLogRepository::default(), 0.1)
    }

    fn original() -> NutrientRecord {
        NutrientRecord {
            calories: 500.0,
            protein: 20.0,
            carbohydrates: 60.0,
            fat: 18.0,
            ..NutrientRecord::zeroed()
        }
    }

    #[tokio::test]
    async fn test_estimate_nutrition_normalizes_partial_reply() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_image()
            .withf(|prompt, data, mime, schema, options| {
                prompt.contains("nutritional expert")
                    && *data == vec![0xffu8, 0xd8, 0xff, 0xe0]
                    && mime == "image/jpeg"
                    && schema["properties"]["nutritionAnalysis"]["required"]
                        .as_array()
                        .is_some_and(|r| r.len() == 13)
                    && options.temperature == Some(0.1)
            })
            .times(1)
            .returning(|_, _, _, _, _| {
                Box::pin(async {
                    Ok(json!({
                        "foodIdentification": "Apple",
                        "nutritionAnalysis": {
                            "calories": 95,
                            "protein": 0.5,
                            "carbohydrates": 25,
                            "fat": 0.3,
                            "sugars": 19
                        }
                    })
                    .to_string())
                })
            });

        let image = ImageDataUri::parse(IMAGE).unwrap();
        let result = service(llm).estimate_nutrition(image).await.unwrap();

        assert_eq!(result.identification, "Apple");
        assert_eq!(result.source_image, IMAGE);
        assert_eq!(result.nutrients.calories, 95.0);
        assert_eq!(result.nutrients.sugars, 19.0);
        assert_eq!(result.nutrients.calcium, 0.0);
        assert_eq!(result.nutrients.sodium, 0.0);
    }

    #[tokio::test]
    async fn test_estimate_nutrition_propagates_model_failure() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_image()
            .returning(|_, _, _, _, _| {
                Box::pin(async {
                    Err(CoreError::ModelInvocation("quota exceeded".to_string()))
                })
            });

        let image = ImageDataUri::parse(IMAGE).unwrap();
        let err = service(llm).estimate_nutrition(image).await.unwrap_err();

        assert_eq!(err, CoreError::ModelInvocation("quota exceeded".to_string()));
    }

    #[tokio::test]
    async fn test_estimate_nutrition_rejects_empty_reply() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_image()
            .returning(|_, _, _, _, _| Box::pin(async { Ok(String::new()) }));

        let image = ImageDataUri::parse(IMAGE).unwrap();
        let err = service(llm).estimate_nutrition(image).await.unwrap_err();

        assert!(matches!(err, CoreError::ModelInvocation(_)));
    }

    #[tokio::test]
    async fn test_estimate_nutrition_absorbs_schema_violations() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_image()
            .returning(|_, _, _, _, _| Box::pin(async { Ok("[\"not\", \"an\", \"object\"]".to_string()) }));

        let image = ImageDataUri::parse(IMAGE).unwrap();
        let result = service(llm).estimate_nutrition(image).await.unwrap();

        assert_eq!(result.identification, "Unknown Food");
        assert_eq!(result.nutrients, NutrientRecord::zeroed());
    }

    #[tokio::test]
    async fn test_refine_estimate_sends_feedback_and_normalizes() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_text()
            .withf(|prompt, schema, _| {
                prompt.contains("Food Item: Pizza")
                    && prompt.contains("User Feedback: Calories: 600 kcal")
                    && prompt.contains("Comments: Large slice")
                    && schema["required"] == json!(["updatedEstimation", "reasoning"])
            })
            .times(1)
            .returning(|_, _, _| {
                Box::pin(async {
                    Ok(json!({
                        "updatedEstimation": { "calories": 600, "protein": "22", "fat": null },
                        "reasoning": "Calories raised to match the larger slice."
                    })
                    .to_string())
                })
            });

        let refined = service(llm)
            .refine_estimate(RefineEstimateInput {
                food_name: "Pizza".to_string(),
                original_estimation: original(),
                user_corrections: NutrientCorrections {
                    calories: Some(600.0),
                    comments: Some("Large slice".to_string()),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(refined.updated.calories, 600.0);
        assert_eq!(refined.updated.protein, 22.0);
        assert_eq!(refined.updated.fat, 0.0);
        assert_eq!(refined.reasoning, "Calories raised to match the larger slice.");
        for field in NutrientField::ALL {
            assert!(refined.updated.get(field).is_finite());
        }
    }

    #[tokio::test]
    async fn test_refine_estimate_guarantees_complete_record_when_fields_omitted() {
        let mut llm = MockLLMClient::new();
        llm.expect_generate_with_text()
            .returning(|_, _, _| Box::pin(async { Ok("{}".to_string()) }));

        let refined = service(llm)
            .refine_estimate(RefineEstimateInput {
                food_name: "Pizza".to_string(),
                original_estimation: original(),
                user_corrections: NutrientCorrections {
                    calories: Some(600.0),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(refined.updated, NutrientRecord::zeroed());
        assert!(refined.updated.is_valid());
        assert_eq!(refined.reasoning, "No reasoning provided.");
    }
}
