use std::path::Path;

use crate::classifier::{resolve_predictions, ClassifierProvider, Prediction, PredictionOutcome, PredictionPolicy};
use crate::food_matcher::{FoodIndex, ItemOutcome};
use crate::food_types::ResolutionResult;
use crate::intake_aggregator::FoodLog;
use crate::phrase_segmenter::segment;
use crate::report::ImageReport;

/// Segments `text`, resolves every item and appends the accepted ones to `log`.
pub fn log_phrase(index: &FoodIndex, text: &str, log: &mut FoodLog) -> Vec<ItemOutcome> {
    let items = segment(text);
    tracing::debug!(text, items = items.len(), "phrase segmented");
    let outcomes = index.resolve_items(&items);
    log.extend(accepted(&outcomes));
    outcomes
}

/// Resolves classifier output and appends the accepted foods to `log`.
pub fn log_predictions(
    index: &FoodIndex,
    predictions: &[Prediction],
    policy: &PredictionPolicy,
    log: &mut FoodLog,
) -> Vec<PredictionOutcome> {
    let outcomes = resolve_predictions(index, predictions, policy);
    for outcome in &outcomes {
        if let PredictionOutcome::Resolved {
            outcome: ItemOutcome::Accepted(result),
            ..
        } = outcome
        {
            log.append(result.clone());
        }
    }
    outcomes
}

/// Classifies one photo and logs what it recognised. Read and classifier
/// failures are kept in the report; they never abort the session.
pub async fn log_image(
    index: &FoodIndex,
    provider: &ClassifierProvider,
    image: &Path,
    policy: &PredictionPolicy,
    log: &mut FoodLog,
) -> ImageReport {
    match provider.classify_file(image).await {
        Ok(predictions) => ImageReport {
            image: image.to_path_buf(),
            predictions: log_predictions(index, &predictions, policy, log),
            error: None,
        },
        Err(e) => {
            tracing::error!(image = %image.display(), error = %e, "image skipped");
            ImageReport {
                image: image.to_path_buf(),
                predictions: Vec::new(),
                error: Some(e.to_string()),
            }
        }
    }
}

fn accepted(outcomes: &[ItemOutcome]) -> impl Iterator<Item = ResolutionResult> + '_ {
    outcomes.iter().filter_map(|outcome| match outcome {
        ItemOutcome::Accepted(result) => Some(result.clone()),
        _ => None,
    })
}
