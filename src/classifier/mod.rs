pub mod connection;
pub mod endpoints;

use serde::{Deserialize, Serialize};

use crate::food_matcher::{FoodIndex, ItemOutcome};
use crate::phrase_segmenter::ParsedItem;

pub use connection::ClassifierError;
pub use endpoints::{ClassifierProvider, Prediction, DEFAULT_CLASSIFIER_MODEL};

pub const DEFAULT_TOP_N: usize = 3;
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.6;

/// How classifier output is turned into food lookups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionPolicy {
    /// Only the first `top_n` predictions are considered.
    pub top_n: usize,
    /// Predictions at or below this confidence are reported but not looked up.
    pub min_confidence: f64,
}

impl Default for PredictionPolicy {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PredictionOutcome {
    Resolved { prediction: Prediction, outcome: ItemOutcome },
    LowConfidence { prediction: Prediction },
}

/// Looks up the top predicted labels, one serving each.
pub fn resolve_predictions(
    index: &FoodIndex,
    predictions: &[Prediction],
    policy: &PredictionPolicy,
) -> Vec<PredictionOutcome> {
    predictions
        .iter()
        .take(policy.top_n)
        .map(|prediction| {
            if prediction.score > policy.min_confidence {
                let outcome = index.resolve_item(&ParsedItem::new(1, prediction.label.clone()));
                PredictionOutcome::Resolved {
                    prediction: prediction.clone(),
                    outcome,
                }
            } else {
                tracing::debug!(label = %prediction.label, confidence = prediction.score, "prediction below confidence floor");
                PredictionOutcome::LowConfidence {
                    prediction: prediction.clone(),
                }
            }
        })
        .collect()
}
