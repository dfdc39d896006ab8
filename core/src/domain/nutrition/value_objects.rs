use std::sync::LazyLock;

use base64::{Engine as _, engine::general_purpose};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    common::entities::app_errors::CoreError,
    nutrition::entities::{NutrientField, NutrientRecord},
};

static DATA_URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^data:(?P<mime>[\w.+-]+/[\w.+-]+)(?:;[^;,]*)*;base64,(?P<payload>.*)$")
        .expect("data uri pattern is valid")
});

/// A photo in `data:<mime>;base64,<payload>` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDataUri {
    uri: String,
    mime_type: String,
    data: Vec<u8>,
}

impl ImageDataUri {
    pub fn parse(uri: &str) -> Result<Self, CoreError> {
        let uri = uri.trim();
        let captures = DATA_URI.captures(uri).ok_or_else(|| {
            CoreError::Validation(
                "image must be a data URI of the form data:<mimetype>;base64,<data>".to_string(),
            )
        })?;

        let mime_type = captures["mime"].to_ascii_lowercase();
        let payload: String = captures["payload"]
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        if payload.is_empty() {
            return Err(CoreError::Validation("image payload is empty".to_string()));
        }

        let data = general_purpose::STANDARD
            .decode(payload.as_bytes())
            .map_err(|e| CoreError::Validation(format!("image payload is not valid base64: {}", e)))?;

        Ok(Self {
            uri: uri.to_string(),
            mime_type,
            data,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.uri
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    pub fn into_parts(self) -> (String, String, Vec<u8>) {
        (self.uri, self.mime_type, self.data)
    }
}

/// User edits to an estimate. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NutrientCorrections {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbohydrates: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturated_fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugars: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calcium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_d: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_b12: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potassium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phosphorus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub riboflavin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl NutrientCorrections {
    pub fn get(&self, field: NutrientField) -> Option<f64> {
        match field {
            NutrientField::Calories => self.calories,
            NutrientField::Protein => self.protein,
            NutrientField::Carbohydrates => self.carbohydrates,
            NutrientField::Fat => self.fat,
            NutrientField::SaturatedFat => self.saturated_fat,
            NutrientField::Sugars => self.sugars,
            NutrientField::Calcium => self.calcium,
            NutrientField::VitaminD => self.vitamin_d,
            NutrientField::VitaminB12 => self.vitamin_b12,
            NutrientField::Potassium => self.potassium,
            NutrientField::Phosphorus => self.phosphorus,
            NutrientField::Riboflavin => self.riboflavin,
            NutrientField::Sodium => self.sodium,
        }
    }

    /// Trimmed comment, `None` when blank.
    pub fn comment(&self) -> Option<&str> {
        self.comments
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// Supplied values that are negative or not finite.
    pub fn invalid_fields(&self) -> Vec<NutrientField> {
        NutrientField::ALL
            .into_iter()
            .filter(|field| {
                self.get(*field)
                    .is_some_and(|value| !(value.is_finite() && value >= 0.0))
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefineEstimateInput {
    pub food_name: String,
    pub original_estimation: NutrientRecord,
    #[serde(default)]
    pub user_corrections: NutrientCorrections,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_URI: &str = "data:image/png;base64,iVBORw0KGgo=";

    #[test]
    fn test_parse_data_uri() {
        let image = ImageDataUri::parse(PNG_URI).unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.data(), &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
        assert_eq!(image.as_str(), PNG_URI);
        assert!(image.is_image());
        assert_eq!(image.size_bytes(), 8);
    }

    #[test]
    fn test_parse_data_uri_with_parameters() {
        let image = ImageDataUri::parse("data:IMAGE/JPEG;name=lunch.jpg;base64,/9j/4A==").unwrap();
        assert_eq!(image.mime_type(), "image/jpeg");
        assert_eq!(image.data(), &[0xff, 0xd8, 0xff, 0xe0]);
    }

    #[test]
    fn test_parse_data_uri_with_wrapped_payload() {
        let image = ImageDataUri::parse("data:image/png;base64,iVBO\nRw0K\r\nGgo=").unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.data(), &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }

    #[test]
    fn test_non_image_mime_still_parses() {
        let uri = ImageDataUri::parse("data:text/plain;base64,aGVsbG8=").unwrap();
        assert!(!uri.is_image());
    }

    #[test]
    fn test_rejects_malformed_uris() {
        for bad in [
            "",
            "hello",
            "data:image/png,iVBORw0KGgo=",
            "data:;base64,iVBORw0KGgo=",
            "data:image/png;base64,",
            "data:image/png;base64,@@@@",
            "https://example.com/apple.png",
        ] {
            let err = ImageDataUri::parse(bad).unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_corrections_report_supplied_fields() {
        let corrections = NutrientCorrections {
            calories: Some(600.0),
            sodium: Some(-3.0),
            comments: Some("  ".to_string()),
            ..Default::default()
        };

        assert_eq!(corrections.get(NutrientField::Calories), Some(600.0));
        assert_eq!(corrections.get(NutrientField::Protein), None);
        assert_eq!(corrections.comment(), None);
        assert_eq!(corrections.invalid_fields(), vec![NutrientField::Sodium]);
    }

    #[test]
    fn test_refine_input_accepts_missing_corrections() {
        let input: RefineEstimateInput = serde_json::from_value(serde_json::json!({
            "foodName": "Pizza",
            "originalEstimation": NutrientRecord::zeroed(),
        }))
        .unwrap();
        assert_eq!(input.user_corrections, NutrientCorrections::default());
    }
}
