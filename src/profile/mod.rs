pub mod targets;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use targets::{bmi, bmr, daily_target};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: f64,
    pub gender: Gender,
    pub activity: ActivityLevel,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            weight_kg: 70.0,
            height_cm: 170.0,
            age_years: 25.0,
            gender: Gender::Male,
            activity: ActivityLevel::Sedentary,
        }
    }
}

impl Profile {
    pub fn bmi(&self) -> Option<f64> {
        bmi(self.weight_kg, self.height_cm)
    }

    pub fn bmr(&self) -> f64 {
        bmr(self.weight_kg, self.height_cm, self.age_years, self.gender)
    }

    /// Calories per day for this profile. May be zero or negative for
    /// degenerate inputs; [`crate::intake_aggregator::progress`] rejects those.
    pub fn daily_target(&self) -> f64 {
        daily_target(self.bmr(), self.activity)
    }
}
