use std::fmt::Write as _;

use crate::domain::nutrition::{
    entities::{NutrientField, NutrientRecord},
    value_objects::NutrientCorrections,
};

pub const SCAN_PROMPT: &str = r#"You are a nutritional expert. You will identify the food item in the image and provide an estimate of its nutritional content.
Focus on providing calories, protein, carbohydrates, and total fat.
Additionally, provide estimates for: saturated fat (g), sugars (g), calcium (mg), Vitamin D (mcg), Vitamin B12 (mcg), potassium (mg), phosphorus (mg), riboflavin (mg), and sodium (mg). These matter most for milk and dairy products; for other food items, include them when they are commonly tracked for that item.
Report Vitamin D in micrograms and set vitaminDUnit to "mcg". If you can only estimate it in International Units, report the IU value and set vitaminDUnit to "IU".

Use the attached image to identify the food item and estimate its nutritional content.

Provide the food identification and nutritional analysis in the specified JSON output format. Ensure all numerical values are numbers, not strings.
You MUST provide a value for EVERY field of nutritionAnalysis (calories, protein, carbohydrates, fat, saturatedFat, sugars, calcium, vitaminD, vitaminB12, potassium, phosphorus, riboflavin, sodium).
If a specific nutrient is not applicable for the identified food item, or if the data is genuinely unavailable, use the value 0 for that nutrient. Do not omit fields.

Example for milk:
{
  "foodIdentification": "Whole Milk",
  "nutritionAnalysis": {
    "calories": 150,
    "protein": 8,
    "carbohydrates": 12,
    "fat": 8,
    "saturatedFat": 5,
    "sugars": 12,
    "calcium": 300,
    "vitaminD": 2.5,
    "vitaminDUnit": "mcg",
    "vitaminB12": 1.2,
    "potassium": 380,
    "phosphorus": 250,
    "riboflavin": 0.4,
    "sodium": 120
  }
}
Example for a non-dairy item where extended nutrients might not be primary:
{
  "foodIdentification": "Apple",
  "nutritionAnalysis": {
    "calories": 95,
    "protein": 0.5,
    "carbohydrates": 25,
    "fat": 0.3,
    "saturatedFat": 0,
    "sugars": 19,
    "calcium": 6,
    "vitaminD": 0,
    "vitaminDUnit": "mcg",
    "vitaminB12": 0,
    "potassium": 107,
    "phosphorus": 11,
    "riboflavin": 0.03,
    "sodium": 1
  }
}
"#;

const REFINEMENT_PREAMBLE: &str = "You are an AI assistant specializing in refining nutrition estimations for food items based on user feedback.

You will receive the original nutrition estimation for a food item, along with feedback from a user who has consumed the item.
Your goal is to provide an improved nutrition estimation, explaining your reasoning for the changes.
";

const REFINEMENT_INSTRUCTIONS: &str = "Provide an updated nutrition estimation with a value for EVERY field (calories, protein, carbohydrates, fat, saturatedFat, sugars, calcium, vitaminD, vitaminB12, potassium, phosphorus, riboflavin, sodium), using the units shown above. Use 0 for any nutrient that is not applicable or genuinely unknown. Do not omit fields.
Base the updated estimation on your knowledge of similar food items, nutritional databases, and the user's feedback. Values the user supplied are corrections; values marked \"not provided\" are yours to keep or adjust.
If the user provides new information or context in the comments, consider it when adjusting the estimations.
In the reasoning, state which fields changed and why.
";

fn format_value(field: NutrientField, value: f64) -> String {
    match field {
        NutrientField::Calories => format!("{} {}", value, field.unit().as_str()),
        _ => format!("{}{}", value, field.unit().as_str()),
    }
}

/// One line per field: `Label: value`.
pub fn render_estimation(record: &NutrientRecord) -> String {
    NutrientField::ALL
        .iter()
        .map(|field| format!("{}: {}", field.label(), format_value(*field, record.get(*field))))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render_corrections(corrections: &NutrientCorrections) -> String {
    let mut rendered = NutrientField::ALL
        .iter()
        .map(|field| match corrections.get(*field) {
            Some(value) => format!("{}: {}", field.label(), format_value(*field, value)),
            None => format!("{}: not provided", field.label()),
        })
        .collect::<Vec<_>>()
        .join(", ");

    let _ = write!(
        rendered,
        ", Comments: {}",
        corrections.comment().unwrap_or("none")
    );
    rendered
}

pub fn render_refinement_prompt(
    food_name: &str,
    original: &NutrientRecord,
    corrections: &NutrientCorrections,
) -> String {
    format!(
        "{preamble}\nFood Item: {food}\nOriginal Estimation: {original}\nUser Feedback: {feedback}\n\n{instructions}",
        preamble = REFINEMENT_PREAMBLE,
        food = food_name.trim(),
        original = render_estimation(original),
        feedback = render_corrections(corrections),
        instructions = REFINEMENT_INSTRUCTIONS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> NutrientRecord {
        NutrientRecord {
            calories: 500.0,
            protein: 20.0,
            carbohydrates: 60.0,
            fat: 18.5,
            ..NutrientRecord::zeroed()
        }
    }

    #[test]
    fn test_scan_prompt_lists_every_field() {
        for field in NutrientField::ALL {
            assert!(SCAN_PROMPT.contains(field.key()), "missing {}", field.key());
        }
    }

    #[test]
    fn test_render_estimation_includes_units() {
        let rendered = render_estimation(&sample_record());
        assert!(rendered.starts_with("Calories: 500 kcal, Protein: 20g"));
        assert!(rendered.contains("Fat: 18.5g"));
        assert!(rendered.contains("Vitamin D: 0mcg"));
        assert!(rendered.ends_with("Sodium: 0mg"));
    }

    #[test]
    fn test_refinement_prompt_contains_every_supplied_field() {
        let corrections = NutrientCorrections {
            calories: Some(600.0),
            sodium: Some(900.0),
            comments: Some("  It had extra cheese. ".to_string()),
            ..Default::default()
        };

        let prompt = render_refinement_prompt(" Pizza ", &sample_record(), &corrections);

        assert!(prompt.contains("Food Item: Pizza\n"));
        assert!(prompt.contains("Original Estimation: Calories: 500 kcal"));
        assert!(prompt.contains("User Feedback: Calories: 600 kcal, Protein: not provided"));
        assert!(prompt.contains("Sodium: 900mg, Comments: It had extra cheese."));
    }

    #[test]
    fn test_refinement_prompt_without_comment() {
        let prompt = render_refinement_prompt(
            "Toast",
            &sample_record(),
            &NutrientCorrections::default(),
        );
        assert!(prompt.contains("Comments: none"));
    }
}
