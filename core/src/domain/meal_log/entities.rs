use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::nutrition::{
    entities::{NutrientField, NutrientRecord, ScanResult},
    normalizer::{coerce_nutrient_value, normalize_identification},
};

/// Nutrients as persisted and displayed.
///
/// Extended fields stay `None` for entries written before they existed, so
/// "never estimated" remains distinguishable from an explicit zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredNutrients {
    pub calories: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fat: f64,
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
}

impl From<NutrientRecord> for StoredNutrients {
    fn from(record: NutrientRecord) -> Self {
        Self {
            calories: record.calories,
            protein: record.protein,
            carbohydrates: record.carbohydrates,
            fat: record.fat,
            saturated_fat: Some(record.saturated_fat),
            sugars: Some(record.sugars),
            calcium: Some(record.calcium),
            vitamin_d: Some(record.vitamin_d),
            vitamin_b12: Some(record.vitamin_b12),
            potassium: Some(record.potassium),
            phosphorus: Some(record.phosphorus),
            riboflavin: Some(record.riboflavin),
            sodium: Some(record.sodium),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoggedMeal {
    pub id: Uuid,
    pub logged_at: DateTime<Utc>,
    pub identification: String,
    pub nutrients: StoredNutrients,
    pub source_image: String,
}

impl LoggedMeal {
    pub fn new(id: Uuid, logged_at: DateTime<Utc>, scan: ScanResult) -> Self {
        Self {
            id,
            logged_at,
            identification: scan.identification,
            nutrients: StoredNutrients::from(scan.nutrients),
            source_image: scan.source_image,
        }
    }

    /// Reads one persisted entry, repairing loosely typed nutrients and
    /// identification. Fails only when the entry has no usable id,
    /// timestamp or image.
    pub fn from_stored(mut raw: Value) -> Result<Self, serde_json::Error> {
        if let Ok(meal) = Self::deserialize(&raw) {
            return Ok(meal);
        }

        if let Some(entry) = raw.as_object_mut() {
            let identification = normalize_identification(entry.get("identification"));
            entry.insert("identification".to_string(), Value::String(identification));

            let nutrients = entry
                .entry("nutrients")
                .or_insert_with(|| Value::Object(Default::default()));
            if !nutrients.is_object() {
                *nutrients = Value::Object(Default::default());
            }
            if let Some(nutrients) = nutrients.as_object_mut() {
                for field in NutrientField::ALL {
                    let key = field.key();
                    let absent = nutrients.get(key).is_none_or(Value::is_null);
                    if absent && !field.is_required() {
                        nutrients.remove(key);
                        continue;
                    }
                    let value = coerce_nutrient_value(nutrients.get(key).unwrap_or(&Value::Null));
                    nutrients.insert(key.to_string(), Value::from(value));
                }
            }
        }

        Self::deserialize(&raw)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_legacy_entry_keeps_extended_fields_absent() {
        let meal: LoggedMeal = serde_json::from_value(json!({
            "id": "01890a5d-ac96-774b-bcce-b302099a8057",
            "loggedAt": "2024-05-01T12:00:00Z",
            "identification": "Banana",
            "nutrients": { "calories": 105, "protein": 1.3, "carbohydrates": 27, "fat": 0.4 },
            "sourceImage": "data:image/png;base64,iVBORw0KGgo="
        }))
        .unwrap();

        assert_eq!(meal.nutrients.calcium, None);
        assert_eq!(meal.nutrients.sugars, None);

        assert_eq!(meal.nutrients.calories, 105.0);

        let round_tripped = serde_json::to_value(&meal).unwrap();
        assert!(round_tripped["nutrients"].get("calcium").is_none());
    }

    #[test]
    fn test_new_entries_store_explicit_zeros() {
        let scan = ScanResult::new(
            "Apple".to_string(),
            NutrientRecord {
                calories: 95.0,
                ..NutrientRecord::zeroed()
            },
            "data:image/png;base64,iVBORw0KGgo=".to_string(),
        );

        let meal = LoggedMeal::new(Uuid::new_v4(), Utc::now(), scan);
        assert_eq!(meal.nutrients.calcium, Some(0.0));
        assert_eq!(meal.nutrients.calories, 95.0);

        let value = serde_json::to_value(&meal).unwrap();
        assert_eq!(value["nutrients"]["calcium"], json!(0.0));
    }

    #[test]
    fn test_from_stored_repairs_loose_nutrients() {
        let meal = LoggedMeal::from_stored(json!({
            "id": "01890a5d-ac96-774b-bcce-b302099a8057",
            "loggedAt": "2024-05-01T12:00:00Z",
            "identification": "  ",
            "nutrients": { "calories": null, "protein": "3.5", "fat": -1, "sodium": null, "sugars": "2" },
            "sourceImage": "data:image/png;base64,iVBORw0KGgo="
        }))
        .unwrap();

        assert_eq!(meal.identification, "Unknown Food");
        assert_eq!(meal.nutrients.calories, 0.0);
        assert_eq!(meal.nutrients.protein, 3.5);
        assert_eq!(meal.nutrients.carbohydrates, 0.0);
        assert_eq!(meal.nutrients.fat, 0.0);
        assert_eq!(meal.nutrients.sugars, Some(2.0));
        assert_eq!(meal.nutrients.sodium, None);
    }

    #[test]
    fn test_from_stored_rejects_entry_without_identity() {
        for raw in [
            json!({ "identification": "Toast", "nutrients": {} }),
            json!("Toast"),
            json!({ "id": "not-a-uuid", "loggedAt": "2024-05-01T12:00:00Z", "sourceImage": "x" }),
        ] {
            assert!(LoggedMeal::from_stored(raw).is_err());
        }
    }
}
