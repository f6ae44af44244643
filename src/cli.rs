use clap::Parser;
use std::path::PathBuf;

use crate::config::TrackerConfig;
use crate::profile::{ActivityLevel, Gender, Profile};

#[derive(Parser, Debug)]
#[command(author, version, about = "Estimate calories for Indian meals from text or photos", long_about = None)]
pub struct Cli {
    /// Path to the nutrition reference table (CSV)
    #[arg(long)]
    pub table: Option<PathBuf>,

    /// Minimum match score (exclusive, 0-100) for a food to be accepted
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Food description, e.g. "2 Chapati and Dal" (repeatable)
    #[arg(short, long = "text")]
    pub texts: Vec<String>,

    /// Food photo to classify (repeatable)
    #[arg(short, long = "image")]
    pub images: Vec<PathBuf>,

    /// Use predictions saved in this JSON file instead of calling the classifier
    #[arg(long)]
    pub predictions: Option<PathBuf>,

    /// Number of classifier predictions to look up per photo
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Body weight in kg
    #[arg(long, default_value_t = 70.0)]
    pub weight: f64,

    /// Height in cm
    #[arg(long, default_value_t = 170.0)]
    pub height: f64,

    /// Age in years
    #[arg(long, default_value_t = 25.0)]
    pub age: f64,

    #[arg(long, value_enum, default_value_t = Gender::Male)]
    pub gender: Gender,

    #[arg(long, value_enum, default_value_t = ActivityLevel::Sedentary)]
    pub activity: ActivityLevel,

    /// Print the session report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn profile(&self) -> Profile {
        Profile {
            weight_kg: self.weight,
            height_cm: self.height,
            age_years: self.age,
            gender: self.gender,
            activity: self.activity,
        }
    }

    /// Flags take precedence over environment configuration.
    pub fn apply_to(&self, config: &mut TrackerConfig) {
        if let Some(table) = &self.table {
            config.table_path = table.clone();
        }
        if let Some(threshold) = self.threshold {
            config.resolver.threshold = threshold;
        }
        if let Some(top_n) = self.top_n {
            config.classifier.policy.top_n = top_n;
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
