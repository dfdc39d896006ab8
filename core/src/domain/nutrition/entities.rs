use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identification used when the model names nothing.
pub const UNKNOWN_FOOD: &str = "Unknown Food";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NutrientUnit {
    Kilocalorie,
    Gram,
    Milligram,
    Microgram,
}

impl NutrientUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            NutrientUnit::Kilocalorie => "kcal",
            NutrientUnit::Gram => "g",
            NutrientUnit::Milligram => "mg",
            NutrientUnit::Microgram => "mcg",
        }
    }
}

/// Unit the model reports vitamin D in. Records always hold micrograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum VitaminDUnit {
    #[serde(rename = "IU")]
    InternationalUnit,
    #[serde(rename = "mcg")]
    Microgram,
}

impl VitaminDUnit {
    pub const IU_PER_MICROGRAM: f64 = 40.0;

    /// Unrecognized tags fall back to micrograms.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "iu" | "ui" | "international units" => VitaminDUnit::InternationalUnit,
            _ => VitaminDUnit::Microgram,
        }
    }

    pub fn to_micrograms(&self, value: f64) -> f64 {
        match self {
            VitaminDUnit::InternationalUnit => value / Self::IU_PER_MICROGRAM,
            VitaminDUnit::Microgram => value,
        }
    }
}

/// The known nutrient field set, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NutrientField {
    Calories,
    Protein,
    Carbohydrates,
    Fat,
    SaturatedFat,
    Sugars,
    Calcium,
    VitaminD,
    VitaminB12,
    Potassium,
    Phosphorus,
    Riboflavin,
    Sodium,
}

impl NutrientField {
    pub const ALL: [NutrientField; 13] = [
        NutrientField::Calories,
        NutrientField::Protein,
        NutrientField::Carbohydrates,
        NutrientField::Fat,
        NutrientField::SaturatedFat,
        NutrientField::Sugars,
        NutrientField::Calcium,
        NutrientField::VitaminD,
        NutrientField::VitaminB12,
        NutrientField::Potassium,
        NutrientField::Phosphorus,
        NutrientField::Riboflavin,
        NutrientField::Sodium,
    ];

    /// JSON key used on the wire, in prompts and in persisted meals.
    pub fn key(&self) -> &'static str {
        match self {
            NutrientField::Calories => "calories",
            NutrientField::Protein => "protein",
            NutrientField::Carbohydrates => "carbohydrates",
            NutrientField::Fat => "fat",
            NutrientField::SaturatedFat => "saturatedFat",
            NutrientField::Sugars => "sugars",
            NutrientField::Calcium => "calcium",
            NutrientField::VitaminD => "vitaminD",
            NutrientField::VitaminB12 => "vitaminB12",
            NutrientField::Potassium => "potassium",
            NutrientField::Phosphorus => "phosphorus",
            NutrientField::Riboflavin => "riboflavin",
            NutrientField::Sodium => "sodium",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NutrientField::Calories => "Calories",
            NutrientField::Protein => "Protein",
            NutrientField::Carbohydrates => "Carbohydrates",
            NutrientField::Fat => "Fat",
            NutrientField::SaturatedFat => "Saturated Fat",
            NutrientField::Sugars => "Sugars",
            NutrientField::Calcium => "Calcium",
            NutrientField::VitaminD => "Vitamin D",
            NutrientField::VitaminB12 => "Vitamin B12",
            NutrientField::Potassium => "Potassium",
            NutrientField::Phosphorus => "Phosphorus",
            NutrientField::Riboflavin => "Riboflavin (B2)",
            NutrientField::Sodium => "Sodium",
        }
    }

    pub fn unit(&self) -> NutrientUnit {
        match self {
            NutrientField::Calories => NutrientUnit::Kilocalorie,
            NutrientField::Protein
            | NutrientField::Carbohydrates
            | NutrientField::Fat
            | NutrientField::SaturatedFat
            | NutrientField::Sugars => NutrientUnit::Gram,
            NutrientField::Calcium
            | NutrientField::Potassium
            | NutrientField::Phosphorus
            | NutrientField::Riboflavin
            | NutrientField::Sodium => NutrientUnit::Milligram,
            NutrientField::VitaminD | NutrientField::VitaminB12 => NutrientUnit::Microgram,
        }
    }

    /// Calories and the three macronutrients. Everything else is extended.
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            NutrientField::Calories
                | NutrientField::Protein
                | NutrientField::Carbohydrates
                | NutrientField::Fat
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NutrientRecord {
    /// kcal
    pub calories: f64,
    /// g
    pub protein: f64,
    /// g
    pub carbohydrates: f64,
    /// g
    pub fat: f64,
    /// g
    pub saturated_fat: f64,
    /// g
    pub sugars: f64,
    /// mg
    pub calcium: f64,
    /// mcg
    pub vitamin_d: f64,
    /// mcg
    pub vitamin_b12: f64,
    /// mg
    pub potassium: f64,
    /// mg
    pub phosphorus: f64,
    /// mg
    pub riboflavin: f64,
    /// mg
    pub sodium: f64,
}

impl NutrientRecord {
    /// Template every normalization starts from.
    pub fn zeroed() -> Self {
        Self::default()
    }

    pub fn get(&self, field: NutrientField) -> f64 {
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

    pub fn set(&mut self, field: NutrientField, value: f64) {
        let slot = match field {
            NutrientField::Calories => &mut self.calories,
            NutrientField::Protein => &mut self.protein,
            NutrientField::Carbohydrates => &mut self.carbohydrates,
            NutrientField::Fat => &mut self.fat,
            NutrientField::SaturatedFat => &mut self.saturated_fat,
            NutrientField::Sugars => &mut self.sugars,
            NutrientField::Calcium => &mut self.calcium,
            NutrientField::VitaminD => &mut self.vitamin_d,
            NutrientField::VitaminB12 => &mut self.vitamin_b12,
            NutrientField::Potassium => &mut self.potassium,
            NutrientField::Phosphorus => &mut self.phosphorus,
            NutrientField::Riboflavin => &mut self.riboflavin,
            NutrientField::Sodium => &mut self.sodium,
        };
        *slot = value;
    }

    /// Every field finite and non-negative.
    pub fn is_valid(&self) -> bool {
        NutrientField::ALL
            .iter()
            .map(|field| self.get(*field))
            .all(|value| value.is_finite() && value >= 0.0)
    }

    /// Fields that fail [`NutrientRecord::is_valid`].
    pub fn invalid_fields(&self) -> Vec<NutrientField> {
        NutrientField::ALL
            .into_iter()
            .filter(|field| {
                let value = self.get(*field);
                !(value.is_finite() && value >= 0.0)
            })
            .collect()
    }
}

/// One completed identification plus estimate, before it is logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub identification: String,
    pub nutrients: NutrientRecord,
    /// The photo as the data URI it was submitted with.
    pub source_image: String,
}

impl ScanResult {
    pub fn new(identification: String, nutrients: NutrientRecord, source_image: String) -> Self {
        Self {
            identification,
            nutrients,
            source_image,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefinedEstimate {
    pub updated: NutrientRecord,
    pub reasoning: String,
}
