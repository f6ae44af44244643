use super::{ActivityLevel, Gender};

/// Body-mass index, `weight / height_m²`. `None` when the height is not positive.
pub fn bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if !(height_cm > 0.0) {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(weight_kg / height_m.powi(2))
}

/// Basal metabolic rate (revised Harris-Benedict coefficients).
///
/// # Arguments
/// * `weight_kg`: body weight in kilograms.
/// * `height_cm`: height in centimetres.
/// * `age_years`: age in years.
/// * `gender`: selects the coefficient set.
///
/// # Returns
/// Kilocalories per day at rest.
pub fn bmr(weight_kg: f64, height_cm: f64, age_years: f64, gender: Gender) -> f64 {
    match gender {
        Gender::Male => 88.36 + (13.4 * weight_kg) + (4.8 * height_cm) - (5.7 * age_years),
        Gender::Female => 447.6 + (9.2 * weight_kg) + (3.1 * height_cm) - (4.3 * age_years),
    }
}

pub fn daily_target(bmr: f64, activity: ActivityLevel) -> f64 {
    bmr * activity.multiplier()
}
