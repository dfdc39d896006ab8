//! Turns whatever the model sent back into complete, numeric records.
//!
//! The response schema handed to the model is advisory only, so nothing in
//! here trusts it: every function is total over arbitrary JSON.

use serde_json::Value;

use crate::domain::{
    common::entities::app_errors::CoreError,
    nutrition::entities::{
        NutrientField, NutrientRecord, RefinedEstimate, ScanResult, UNKNOWN_FOOD, VitaminDUnit,
    },
};

pub const FOOD_IDENTIFICATION_KEY: &str = "foodIdentification";
pub const NUTRITION_ANALYSIS_KEY: &str = "nutritionAnalysis";
pub const VITAMIN_D_UNIT_KEY: &str = "vitaminDUnit";
pub const UPDATED_ESTIMATION_KEY: &str = "updatedEstimation";
pub const REASONING_KEY: &str = "reasoning";

pub const MISSING_REASONING: &str = "No reasoning provided.";

/// Coerces one merged value to a finite, non-negative number, or 0.
pub fn coerce_nutrient_value(value: &Value) -> f64 {
    let number = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(0.0)
            }
        }
        Value::Bool(true) => 1.0,
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    };

    if number.is_finite() && number > 0.0 {
        number
    } else {
        0.0
    }
}

/// Merges the model's nutrient object over the all-zero template and
/// coerces every field.
pub fn normalize_nutrients(raw: Option<&Value>) -> NutrientRecord {
    let mut record = NutrientRecord::zeroed();

    let Some(object) = raw.and_then(Value::as_object) else {
        tracing::debug!("model returned no nutrient object, using zeroed record");
        return record;
    };

    let mut defaulted = Vec::new();
    for field in NutrientField::ALL {
        match object.get(field.key()) {
            Some(value) => {
                let coerced = coerce_nutrient_value(value);
                if coerced == 0.0 && !is_literal_zero(value) {
                    defaulted.push(field.key());
                }
                record.set(field, coerced);
            }
            None => defaulted.push(field.key()),
        }
    }

    if let Some(unit) = object.get(VITAMIN_D_UNIT_KEY).and_then(Value::as_str) {
        let unit = VitaminDUnit::parse(unit);
        record.vitamin_d = unit.to_micrograms(record.vitamin_d);
    }

    if !defaulted.is_empty() {
        tracing::debug!(fields = ?defaulted, "nutrient fields defaulted to zero");
    }

    record
}

fn is_literal_zero(value: &Value) -> bool {
    value.as_f64() == Some(0.0)
}

/// Non-blank identification, or the unknown-food fallback.
pub fn normalize_identification(raw: Option<&Value>) -> String {
    raw.and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_FOOD.to_string())
}

/// Normalizes a scan reply of the shape
/// `{ foodIdentification, nutritionAnalysis }`. Never fails.
pub fn normalize_scan_output(raw: &Value, source_image: String) -> ScanResult {
    let identification = normalize_identification(raw.get(FOOD_IDENTIFICATION_KEY));
    let mut nutrients = normalize_nutrients(raw.get(NUTRITION_ANALYSIS_KEY));

    // The unit tag may sit beside the nutrient object instead of inside it.
    if raw
        .get(NUTRITION_ANALYSIS_KEY)
        .and_then(|analysis| analysis.get(VITAMIN_D_UNIT_KEY))
        .is_none()
        && let Some(unit) = raw.get(VITAMIN_D_UNIT_KEY).and_then(Value::as_str)
    {
        nutrients.vitamin_d = VitaminDUnit::parse(unit).to_micrograms(nutrients.vitamin_d);
    }

    ScanResult::new(identification, nutrients, source_image)
}

/// Normalizes a refinement reply of the shape
/// `{ updatedEstimation, reasoning }`. Never fails.
pub fn normalize_refinement_output(raw: &Value) -> RefinedEstimate {
    let updated = normalize_nutrients(raw.get(UPDATED_ESTIMATION_KEY));
    let reasoning = raw
        .get(REASONING_KEY)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|reasoning| !reasoning.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| MISSING_REASONING.to_string());

    RefinedEstimate { updated, reasoning }
}

/// Decodes the raw model text into JSON.
///
/// Empty replies and text that is not JSON at all are invocation failures;
/// any JSON value, however wrong its shape, is left to the normalizer.
pub fn decode_model_reply(text: &str) -> Result<Value, CoreError> {
    let body = strip_code_fence(text.trim());
    if body.is_empty() {
        return Err(CoreError::ModelInvocation(
            "model returned no output".to_string(),
        ));
    }

    serde_json::from_str(body).map_err(|e| {
        tracing::error!("Failed to parse model reply as JSON: {}", e);
        CoreError::ModelInvocation(format!("model returned malformed JSON: {}", e))
    })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening fence line.
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
