use serde::{Deserialize, Serialize};

/// One row of the nutrition reference table. Macro values are per serving
/// unit and are always present; anything missing in the source is zero.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct FoodRecord {
    pub name: String,
    pub calories: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
}

impl FoodRecord {
    pub fn new(name: impl Into<String>, calories: f64, protein_g: f64, fat_g: f64, carbs_g: f64) -> Self {
        Self {
            name: name.into(),
            calories,
            protein_g,
            fat_g,
            carbs_g,
        }
    }
}

/// Macro quantities already multiplied by the number of servings.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct ScaledNutrition {
    pub calories: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
}

/// An accepted match: the line item that ends up in a [`crate::intake_aggregator::FoodLog`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResolutionResult {
    pub food: String,
    pub query: String,
    pub score: f64,
    pub quantity: i64,
    pub nutrition: ScaledNutrition,
}
