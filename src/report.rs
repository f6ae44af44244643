use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::classifier::PredictionOutcome;
use crate::food_matcher::ItemOutcome;
use crate::intake_aggregator::IntakeSummary;
use crate::profile::Profile;

#[derive(Debug, Serialize)]
pub struct PhraseReport {
    pub text: String,
    pub items: Vec<ItemOutcome>,
}

#[derive(Debug, Serialize)]
pub struct ImageReport {
    pub image: PathBuf,
    pub predictions: Vec<PredictionOutcome>,
    /// Set when the photo could not be read or classified; it contributes nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub profile: Profile,
    pub bmi: Option<f64>,
    pub phrases: Vec<PhraseReport>,
    pub images: Vec<ImageReport>,
    pub summary: IntakeSummary,
}

impl fmt::Display for ItemOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemOutcome::Accepted(result) => write!(
                f,
                "{} x {} ({:.0}%) - {:.1} kcal",
                result.quantity, result.food, result.score, result.nutrition.calories
            ),
            ItemOutcome::NoMatch {
                query,
                best_candidate: Some(candidate),
                score,
                ..
            } => write!(f, "no match for '{}' (closest: {}, {:.0}%)", query, candidate, score),
            ItemOutcome::NoMatch { query, .. } => write!(f, "no match for '{}'", query),
            ItemOutcome::Rejected { query, error, .. } => write!(f, "skipped '{}': {}", query, error),
        }
    }
}

impl SessionReport {
    fn write_phrases(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for phrase in &self.phrases {
            writeln!(f, "Input: {}", phrase.text)?;
            if phrase.items.iter().all(|item| !matches!(item, ItemOutcome::Accepted(_))) {
                writeln!(f, "  No foods matched. Try again.")?;
            }
            for item in &phrase.items {
                writeln!(f, "  {}", item)?;
            }
        }
        Ok(())
    }

    fn write_images(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for image in &self.images {
            writeln!(f, "Photo: {}", image.image.display())?;
            if let Some(error) = &image.error {
                writeln!(f, "  classification failed: {}", error)?;
            }
            for prediction in &image.predictions {
                match prediction {
                    PredictionOutcome::Resolved { prediction, outcome } => {
                        writeln!(f, "  predicted {} ({:.1}%)", prediction.label, prediction.percent())?;
                        writeln!(f, "  {}", outcome)?;
                    }
                    PredictionOutcome::LowConfidence { prediction } => writeln!(
                        f,
                        "  predicted {} ({:.1}%) - confidence too low, not logged",
                        prediction.label,
                        prediction.percent()
                    )?,
                }
            }
        }
        Ok(())
    }
}

/// Plain-text rendering of a session for the terminal.
impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_phrases(f)?;
        self.write_images(f)?;

        let summary = &self.summary;
        writeln!(f, "\nToday's food summary ({} items)", summary.items_logged)?;
        writeln!(f, "  Calories: {:.1} kcal", summary.totals.calories)?;
        writeln!(f, "  Protein: {:.1} g", summary.totals.protein_g)?;
        writeln!(f, "  Fat: {:.1} g", summary.totals.fat_g)?;
        writeln!(f, "  Carbs: {:.1} g", summary.totals.carbs_g)?;

        match self.bmi {
            Some(bmi) => writeln!(f, "BMI: {:.2}", bmi)?,
            None => writeln!(f, "BMI: n/a")?,
        }
        writeln!(f, "Daily calorie needs: {:.2} kcal", summary.daily_target)?;
        match summary.progress {
            Some(ratio) => writeln!(f, "Progress: {:.1}% of daily needs", ratio * 100.0),
            None => writeln!(f, "Please enter valid profile details to track progress."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Prediction;
    use crate::error::TrackerError;
    use crate::food_types::{ResolutionResult, ScaledNutrition};
    use crate::intake_aggregator::NutritionTotals;

    fn report(progress: Option<f64>) -> SessionReport {
        SessionReport {
            profile: Profile::default(),
            bmi: Some(24.221),
            phrases: vec![PhraseReport {
                text: "2 Chapati and xyz and Dal".to_string(),
                items: vec![
                    ItemOutcome::Accepted(ResolutionResult {
                        food: "Chapati".to_string(),
                        query: "Chapati".to_string(),
                        score: 100.0,
                        quantity: 2,
                        nutrition: ScaledNutrition {
                            calories: 208.0,
                            protein_g: 6.0,
                            fat_g: 4.0,
                            carbs_g: 38.0,
                        },
                    }),
                    ItemOutcome::NoMatch {
                        query: "xyz".to_string(),
                        quantity: 1,
                        best_candidate: Some("Dal".to_string()),
                        score: 12.0,
                    },
                    ItemOutcome::Rejected {
                        query: "Dal".to_string(),
                        quantity: 0,
                        error: TrackerError::InvalidQuantity(0),
                    },
                ],
            }],
            images: vec![ImageReport {
                image: PathBuf::from("thali.jpg"),
                predictions: vec![PredictionOutcome::LowConfidence {
                    prediction: Prediction::new("naan", 0.42),
                }],
                error: None,
            }],
            summary: IntakeSummary {
                items_logged: 1,
                totals: NutritionTotals {
                    calories: 208.0,
                    protein_g: 6.0,
                    fat_g: 4.0,
                    carbs_g: 38.0,
                },
                daily_target: 2041.032,
                progress,
            },
        }
    }

    #[test]
    fn test_display_lists_items_and_summary() {
        let text = report(Some(0.1019)).to_string();
        assert!(text.contains("  2 x Chapati (100%) - 208.0 kcal"));
        assert!(text.contains("no match for 'xyz' (closest: Dal, 12%)"));
        assert!(text.contains("skipped 'Dal': invalid quantity 0"));
        assert!(text.contains("predicted naan (42.0%) - confidence too low"));
        assert!(text.contains("Calories: 208.0 kcal"));
        assert!(text.contains("BMI: 24.22"));
        assert!(text.contains("Daily calorie needs: 2041.03 kcal"));
        assert!(text.contains("Progress: 10.2% of daily needs"));
    }

    #[test]
    fn test_display_warns_on_undefined_target() {
        let text = report(None).to_string();
        assert!(text.contains("Please enter valid profile details"));
        assert!(text.ends_with("to track progress.\n"));
    }

    #[test]
    fn test_display_item_outcomes() {
        let miss = ItemOutcome::NoMatch {
            query: "zzzz".to_string(),
            quantity: 1,
            best_candidate: None,
            score: 0.0,
        };
        assert_eq!(miss.to_string(), "no match for 'zzzz'");
    }

    #[test]
    fn test_report_serializes_outcome_tags() {
        let json = serde_json::to_value(report(Some(0.1))).unwrap();
        let items = &json["phrases"][0]["items"];
        assert_eq!(items[0]["status"], "accepted");
        assert_eq!(items[1]["status"], "no_match");
        assert_eq!(items[2]["status"], "rejected");
        assert_eq!(items[2]["error"], "invalid quantity 0: quantities must be positive");
        assert_eq!(json["images"][0]["predictions"][0]["kind"], "low_confidence");
    }
}
