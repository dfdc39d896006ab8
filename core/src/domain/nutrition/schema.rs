use serde_json::{Map, Value, json};

use crate::domain::nutrition::{
    entities::NutrientField,
    normalizer::{
        FOOD_IDENTIFICATION_KEY, NUTRITION_ANALYSIS_KEY, REASONING_KEY, UPDATED_ESTIMATION_KEY,
        VITAMIN_D_UNIT_KEY,
    },
};

fn nutrient_description(field: NutrientField) -> String {
    match field {
        NutrientField::VitaminD => {
            "Estimated Vitamin D content in micrograms (mcg), or in IU when vitaminDUnit is IU."
                .to_string()
        }
        _ => format!(
            "Estimated {} content in {}.",
            field.label().to_lowercase(),
            field.unit().as_str()
        ),
    }
}

/// Object schema listing every nutrient field, all required.
pub fn nutrient_record_schema() -> Value {
    let mut properties = Map::new();
    for field in NutrientField::ALL {
        properties.insert(
            field.key().to_string(),
            json!({
                "type": "number",
                "description": nutrient_description(field),
            }),
        );
    }

    let required: Vec<&str> = NutrientField::ALL.iter().map(|f| f.key()).collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// Returns the JSON schema for food scan LLM responses
pub fn get_scan_schema() -> Value {
    let mut analysis = nutrient_record_schema();
    if let Some(properties) = analysis
        .get_mut("properties")
        .and_then(Value::as_object_mut)
    {
        properties.insert(
            VITAMIN_D_UNIT_KEY.to_string(),
            json!({
                "type": "string",
                "enum": ["mcg", "IU"],
                "description": "Unit of the vitaminD value.",
            }),
        );
    }

    json!({
        "type": "object",
        "properties": {
            FOOD_IDENTIFICATION_KEY: {
                "type": "string",
                "description": "The identified food item from the image.",
            },
            NUTRITION_ANALYSIS_KEY: analysis,
        },
        "required": [FOOD_IDENTIFICATION_KEY, NUTRITION_ANALYSIS_KEY],
    })
}

/// Returns the JSON schema for estimate refinement LLM responses
pub fn get_refinement_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            UPDATED_ESTIMATION_KEY: nutrient_record_schema(),
            REASONING_KEY: {
                "type": "string",
                "description": "Explanation of which values changed and why.",
            },
        },
        "required": [UPDATED_ESTIMATION_KEY, REASONING_KEY],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_schema_requires_every_nutrient() {
        let schema = get_scan_schema();
        let analysis = &schema["properties"]["nutritionAnalysis"];

        let required = analysis["required"].as_array().unwrap();
        assert_eq!(required.len(), 13);
        for field in NutrientField::ALL {
            assert!(required.contains(&json!(field.key())));
            assert_eq!(analysis["properties"][field.key()]["type"], "number");
        }
        assert_eq!(analysis["properties"]["vitaminDUnit"]["type"], "string");
        assert_eq!(
            schema["required"],
            json!(["foodIdentification", "nutritionAnalysis"])
        );
    }

    #[test]
    fn test_refinement_schema_shape() {
        let schema = get_refinement_schema();
        assert_eq!(
            schema["properties"]["updatedEstimation"]["required"]
                .as_array()
                .unwrap()
                .len(),
            13
        );
        assert_eq!(schema["properties"]["reasoning"]["type"], "string");
        assert!(
            schema["properties"]["updatedEstimation"]["properties"]
                .get("vitaminDUnit")
                .is_none()
        );
    }
}
