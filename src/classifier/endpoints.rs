use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const HUGGING_FACE_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_CLASSIFIER_MODEL: &str = "NOTGOD6000/finetuned-indian-food";

/// One `(label, confidence)` pair from an image classifier. `score` is in `[0, 1]`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub score: f64,
}

impl Prediction {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }

    pub fn percent(&self) -> f64 {
        self.score * 100.0
    }
}

/// Where predictions come from.
#[derive(Clone, Debug, Serialize)]
pub enum ClassifierProvider {
    /// Hosted inference for an image-classification model. `api_key` names
    /// the environment variable holding the access token.
    HuggingFace { model: String, api_key: String },
    /// Predictions computed elsewhere and saved as a JSON array of
    /// `{"label", "score"}` objects. The image itself is not read.
    Precomputed { path: PathBuf },
}

impl ClassifierProvider {
    pub fn model_url(model: &str) -> String {
        format!("{}/{}", HUGGING_FACE_INFERENCE_URL, model)
    }
}

/// Error payload returned by the inference endpoint, e.g. while a model is loading.
#[derive(Debug, Deserialize)]
pub(crate) struct InferenceErrorBody {
    pub error: String,
    #[serde(default)]
    pub estimated_time: Option<f64>,
}
