use dotenv::dotenv;
use reqwest::Client;
use std::env;
use std::path::Path;
use thiserror::Error;

use super::endpoints::{ClassifierProvider, InferenceErrorBody, Prediction};

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("API key not found in environment: {0}")]
    MissingApiKey(String),
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("API error {status}: {error_body}")]
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ClassifierProvider {
    pub fn hugging_face(model: &str, api_key_env_var_name: &str) -> Self {
        dotenv().ok();
        Self::HuggingFace {
            model: model.to_string(),
            api_key: api_key_env_var_name.to_string(),
        }
    }

    pub fn precomputed(path: impl AsRef<Path>) -> Self {
        Self::Precomputed {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Reads the photo at `image` and classifies it. A missing or unreadable
    /// file is reported as [`ClassifierError::Io`].
    pub async fn classify_file(&self, image: &Path) -> Result<Vec<Prediction>, ClassifierError> {
        let bytes = tokio::fs::read(image).await.map_err(|source| ClassifierError::Io {
            path: image.display().to_string(),
            source,
        })?;
        self.classify(&bytes).await
    }

    /// Classifies an encoded image (JPEG/PNG bytes). Predictions come back
    /// most confident first; equal scores keep the provider's order.
    pub async fn classify(&self, image: &[u8]) -> Result<Vec<Prediction>, ClassifierError> {
        let mut predictions = match self {
            ClassifierProvider::HuggingFace {
                model,
                api_key: api_key_env_var_name,
            } => {
                dotenv().ok();
                let actual_api_key = env::var(api_key_env_var_name)
                    .map_err(|_| ClassifierError::MissingApiKey(api_key_env_var_name.clone()))?;

                let url = Self::model_url(model);
                tracing::info!(%model, bytes = image.len(), "requesting image classification");

                let response = Client::new()
                    .post(&url)
                    .bearer_auth(actual_api_key)
                    .header("Content-Type", "application/octet-stream")
                    .body(image.to_vec())
                    .send()
                    .await?;

                if response.status().is_success() {
                    response.json::<Vec<Prediction>>().await?
                } else {
                    let status = response.status();
                    let raw_body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Failed to read error body".to_string());
                    let error_body = match serde_json::from_str::<InferenceErrorBody>(&raw_body) {
                        Ok(InferenceErrorBody {
                            error,
                            estimated_time: Some(secs),
                        }) => format!("{} (retry in ~{:.0}s)", error, secs),
                        Ok(body) => body.error,
                        Err(_) => raw_body,
                    };
                    return Err(ClassifierError::ApiError { status, error_body });
                }
            }
            ClassifierProvider::Precomputed { path } => {
                let contents = tokio::fs::read_to_string(path).await.map_err(|source| ClassifierError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                serde_json::from_str::<Vec<Prediction>>(&contents)?
            }
        };

        predictions.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(predictions)
    }
}
