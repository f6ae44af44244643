use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::classifier::{PredictionPolicy, DEFAULT_CLASSIFIER_MODEL, DEFAULT_MIN_CONFIDENCE, DEFAULT_TOP_N};
use crate::food_matcher::{ResolverConfig, DEFAULT_MATCH_THRESHOLD};

pub const DEFAULT_TABLE_PATH: &str = "indian_food_with_nutrition_v3.csv";
pub const DEFAULT_API_KEY_ENV_VAR: &str = "HF_API_TOKEN";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub model: String,
    /// Name of the environment variable holding the inference token.
    pub api_key_env_var: String,
    pub policy: PredictionPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub table_path: PathBuf,
    pub resolver: ResolverConfig,
    pub classifier: ClassifierConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            table_path: PathBuf::from(DEFAULT_TABLE_PATH),
            resolver: ResolverConfig::default(),
            classifier: ClassifierConfig {
                model: DEFAULT_CLASSIFIER_MODEL.to_string(),
                api_key_env_var: DEFAULT_API_KEY_ENV_VAR.to_string(),
                policy: PredictionPolicy::default(),
            },
        }
    }
}

impl TrackerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source; unset keys keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = Self {
            table_path: lookup("NUTRITION_TABLE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TABLE_PATH)),
            resolver: ResolverConfig {
                threshold: parsed(&lookup, "MATCH_THRESHOLD", DEFAULT_MATCH_THRESHOLD)?,
                preprocess: parsed(&lookup, "MATCH_PREPROCESS", true)?,
            },
            classifier: ClassifierConfig {
                model: lookup("CLASSIFIER_MODEL").unwrap_or_else(|| DEFAULT_CLASSIFIER_MODEL.to_string()),
                api_key_env_var: lookup("CLASSIFIER_API_KEY_ENV")
                    .unwrap_or_else(|| DEFAULT_API_KEY_ENV_VAR.to_string()),
                policy: PredictionPolicy {
                    top_n: parsed(&lookup, "CLASSIFIER_TOP_N", DEFAULT_TOP_N)?,
                    min_confidence: parsed(&lookup, "CLASSIFIER_MIN_CONFIDENCE", DEFAULT_MIN_CONFIDENCE)?,
                },
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let threshold = self.resolver.threshold;
        if !(0.0..=100.0).contains(&threshold) {
            return Err(anyhow!("match threshold must be within 0..=100, got {}", threshold));
        }
        let confidence = self.classifier.policy.min_confidence;
        if !(0.0..=1.0).contains(&confidence) {
            return Err(anyhow!("classifier confidence must be within 0..=1, got {}", confidence));
        }
        if self.classifier.policy.top_n == 0 {
            return Err(anyhow!("classifier top_n must be at least 1"));
        }
        Ok(())
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value for {}: {:?}", key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = TrackerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.resolver.threshold, 60.0);
        assert_eq!(config.classifier.policy.top_n, 3);
    }

    #[test]
    fn test_values_are_read_from_lookup() {
        let config = TrackerConfig::from_lookup(lookup_from(&[
            ("NUTRITION_TABLE_PATH", "/data/foods.csv"),
            ("MATCH_THRESHOLD", " 75 "),
            ("MATCH_PREPROCESS", "false"),
            ("CLASSIFIER_TOP_N", "5"),
            ("CLASSIFIER_MIN_CONFIDENCE", "0.4"),
            ("CLASSIFIER_MODEL", "someone/food-model"),
        ]))
        .unwrap();
        assert_eq!(config.table_path, PathBuf::from("/data/foods.csv"));
        assert_eq!(config.resolver.threshold, 75.0);
        assert!(!config.resolver.preprocess);
        assert_eq!(config.classifier.policy.top_n, 5);
        assert_eq!(config.classifier.policy.min_confidence, 0.4);
        assert_eq!(config.classifier.model, "someone/food-model");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = TrackerConfig::from_lookup(lookup_from(&[("MATCH_THRESHOLD", "sixty")])).unwrap_err();
        assert!(err.to_string().contains("MATCH_THRESHOLD"));

        assert!(TrackerConfig::from_lookup(lookup_from(&[("MATCH_THRESHOLD", "150")])).is_err());
        assert!(TrackerConfig::from_lookup(lookup_from(&[("CLASSIFIER_TOP_N", "0")])).is_err());
        assert!(TrackerConfig::from_lookup(lookup_from(&[("CLASSIFIER_MIN_CONFIDENCE", "1.5")])).is_err());
    }
}
