use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{TrackerError, TrackerResult};
use crate::food_types::{FoodRecord, ResolutionResult};
use crate::nutrition_scaler::scale_nutrition;
use crate::phrase_segmenter::ParsedItem;
use crate::search::data_loader::load_food_table;
use crate::search::fuzzy_engine::FuzzyEngine;

pub const DEFAULT_MATCH_THRESHOLD: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// A match is accepted only when its score is strictly above this value.
    pub threshold: f64,
    /// Case-fold and strip punctuation before scoring.
    pub preprocess: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_MATCH_THRESHOLD,
            preprocess: true,
        }
    }
}

/// Outcome of one lookup. `result` is `None` when the best score did not
/// clear the threshold; `score` and `best_candidate` are still reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub query: String,
    pub best_candidate: Option<String>,
    pub score: f64,
    pub result: Option<ResolutionResult>,
}

impl Resolution {
    fn no_match(query: &str, best_candidate: Option<String>, score: f64) -> Self {
        Self {
            query: query.to_string(),
            best_candidate,
            score,
            result: None,
        }
    }

    pub fn is_match(&self) -> bool {
        self.result.is_some()
    }
}

/// Per-item outcome when resolving a whole phrase. Failures stay local to
/// their item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemOutcome {
    Accepted(ResolutionResult),
    NoMatch {
        query: String,
        quantity: i64,
        best_candidate: Option<String>,
        score: f64,
    },
    Rejected {
        query: String,
        quantity: i64,
        #[serde(serialize_with = "serialize_error")]
        error: TrackerError,
    },
}

fn serialize_error<S: serde::Serializer>(error: &TrackerError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

pub struct FoodIndex {
    engine: FuzzyEngine,
    config: ResolverConfig,
    records: Vec<FoodRecord>,
    prepared_names: Vec<String>,
}

impl FoodIndex {
    pub fn new(records: Vec<FoodRecord>, config: ResolverConfig) -> Self {
        let engine = FuzzyEngine::new(config.preprocess);
        let prepared_names = records.iter().map(|record| engine.prepare(&record.name)).collect();
        Self {
            engine,
            config,
            records,
            prepared_names,
        }
    }

    pub fn from_csv(csv_path: &Path, config: ResolverConfig) -> Result<Self> {
        let records = load_food_table(csv_path)
            .with_context(|| format!("Failed to load nutrition table from {:?}", csv_path))?;
        tracing::info!(foods = records.len(), path = ?csv_path, "nutrition table loaded");
        Ok(Self::new(records, config))
    }

    pub fn records(&self) -> &[FoodRecord] {
        &self.records
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Highest-scoring row and its score. Ties keep the earliest row.
    pub fn best_match(&self, query: &str) -> Option<(&FoodRecord, f64)> {
        let prepared_query = self.engine.prepare(query);
        if prepared_query.is_empty() {
            return None;
        }

        let mut best: Option<(usize, f64)> = None;
        for (idx, name) in self.prepared_names.iter().enumerate() {
            let score = self.engine.score_prepared(&prepared_query, name);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((idx, score)),
            }
        }
        best.map(|(idx, score)| (&self.records[idx], score))
    }

    /// Looks `query` up and scales the accepted row by `quantity`.
    ///
    /// A miss is `Ok` with no result. The quantity is only validated once a
    /// row is accepted, through [`scale_nutrition`].
    pub fn resolve(&self, query: &str, quantity: i64) -> TrackerResult<Resolution> {
        let Some((record, score)) = self.best_match(query) else {
            tracing::debug!(query, "no candidate to score");
            return Ok(Resolution::no_match(query, None, 0.0));
        };

        if score <= self.config.threshold {
            tracing::debug!(query, candidate = %record.name, score, "below match threshold");
            return Ok(Resolution::no_match(query, Some(record.name.clone()), score));
        }

        let nutrition = scale_nutrition(record, quantity)?;
        tracing::debug!(query, food = %record.name, score, quantity, "matched");
        Ok(Resolution {
            query: query.to_string(),
            best_candidate: Some(record.name.clone()),
            score,
            result: Some(ResolutionResult {
                food: record.name.clone(),
                query: query.to_string(),
                score,
                quantity,
                nutrition,
            }),
        })
    }

    pub fn resolve_item(&self, item: &ParsedItem) -> ItemOutcome {
        match self.resolve(&item.raw_token, item.quantity) {
            Ok(Resolution {
                result: Some(result), ..
            }) => ItemOutcome::Accepted(result),
            Ok(resolution) => ItemOutcome::NoMatch {
                query: resolution.query,
                quantity: item.quantity,
                best_candidate: resolution.best_candidate,
                score: resolution.score,
            },
            Err(error) => {
                tracing::warn!(query = %item.raw_token, quantity = item.quantity, %error, "item rejected");
                ItemOutcome::Rejected {
                    query: item.raw_token.clone(),
                    quantity: item.quantity,
                    error,
                }
            }
        }
    }

    /// Resolves every item independently, in parallel, keeping input order.
    pub fn resolve_items(&self, items: &[ParsedItem]) -> Vec<ItemOutcome> {
        items.par_iter().map(|item| self.resolve_item(item)).collect()
    }
}
