use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};
use crate::food_types::ResolutionResult;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
}

/// Accepted line items for the current session, in the order they were
/// logged. The caller owns it and hands it to [`aggregate`] by reference.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct FoodLog {
    entries: Vec<ResolutionResult>,
}

impl FoodLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, result: ResolutionResult) {
        self.entries.push(result);
    }

    pub fn entries(&self) -> &[ResolutionResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Extend<ResolutionResult> for FoodLog {
    fn extend<I: IntoIterator<Item = ResolutionResult>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

pub fn aggregate(log: &[ResolutionResult]) -> NutritionTotals {
    let mut totals = NutritionTotals::default();
    for entry in log {
        macro_rules! add_macro {
            ($field:ident) => {
                totals.$field += entry.nutrition.$field;
            };
        }
        add_macro!(calories);
        add_macro!(protein_g);
        add_macro!(fat_g);
        add_macro!(carbs_g);
    }
    totals
}

/// Share of the daily target already eaten, clamped to `[0, 1]`.
///
/// A target that is zero, negative or not a number has no meaningful ratio
/// and is reported as [`TrackerError::UndefinedTarget`].
pub fn progress(totals: &NutritionTotals, daily_target: f64) -> TrackerResult<f64> {
    if !(daily_target.is_finite() && daily_target > 0.0) {
        return Err(TrackerError::UndefinedTarget(daily_target));
    }
    Ok((totals.calories / daily_target).clamp(0.0, 1.0))
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IntakeSummary {
    pub items_logged: usize,
    pub totals: NutritionTotals,
    pub daily_target: f64,
    /// `None` when the target is undefined.
    pub progress: Option<f64>,
}

pub fn summarize(log: &FoodLog, daily_target: f64) -> IntakeSummary {
    let totals = aggregate(log.entries());
    let progress = match progress(&totals, daily_target) {
        Ok(ratio) => Some(ratio),
        Err(e) => {
            tracing::warn!(error = %e, "progress not computed");
            None
        }
    };
    IntakeSummary {
        items_logged: log.len(),
        totals,
        daily_target,
        progress,
    }
}
