use crate::error::{TrackerError, TrackerResult};
use crate::food_types::{FoodRecord, ScaledNutrition};

/// Multiplies a record's per-unit macros by `quantity`.
///
/// Non-positive quantities are rejected instead of being clamped, so a
/// parsing bug upstream can never turn into zero or negative nutrition.
pub fn scale_nutrition(record: &FoodRecord, quantity: i64) -> TrackerResult<ScaledNutrition> {
    if quantity <= 0 {
        return Err(TrackerError::InvalidQuantity(quantity));
    }
    let scale = quantity as f64;
    Ok(ScaledNutrition {
        calories: record.calories * scale,
        protein_g: record.protein_g * scale,
        fat_g: record.fat_g * scale,
        carbs_g: record.carbs_g * scale,
    })
}
