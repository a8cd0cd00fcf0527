use crate::config::ClientConfig;
use crate::dataset::FeatureRecord;
use reqwest::Client as HttpClient;
use reqwest::StatusCode;
use shared::{ModelArchitecture, PredictionRequest};
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP error! Status: {status}, body: {body}")]
    Status { status: StatusCode, body: String },
}

/// Talks to the model server's `/predict` endpoint, one record per call.
#[derive(Clone)]
pub struct PredictionClient {
    http_client: HttpClient,
    endpoint: Url,
    architecture: ModelArchitecture,
}

impl PredictionClient {
    pub fn new(endpoint: Url, architecture: ModelArchitecture) -> Self {
        Self {
            http_client: HttpClient::new(),
            endpoint,
            architecture,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.endpoint_url.clone(), config.model_architecture)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn architecture(&self) -> ModelArchitecture {
        self.architecture
    }

    pub fn request_for(&self, record: &FeatureRecord) -> PredictionRequest {
        PredictionRequest {
            features: record.values().cloned().collect(),
            model_architecture: self.architecture,
        }
    }

    /// Sends one request and returns the response body untouched.
    pub async fn try_predict(&self, record: &FeatureRecord) -> Result<String, PredictionError> {
        let payload = self.request_for(record);

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = describe_body(response.text().await);
            return Err(PredictionError::Status { status, body });
        }

        Ok(response.text().await?)
    }

    /// Like [`try_predict`](Self::try_predict), but failures are logged and
    /// turned into `None` so a batch never sees an error.
    pub async fn predict(&self, index: usize, record: &FeatureRecord) -> Option<String> {
        match self.try_predict(record).await {
            Ok(body) => {
                log::debug!("Prediction {} succeeded: {}", index, body);
                Some(body)
            }
            Err(e) => {
                log::error!("Prediction {} failed: {}", index, e);
                None
            }
        }
    }
}

/// Body text of an error response, or a marker saying why it is missing.
fn describe_body<E: std::fmt::Display>(body: Result<String, E>) -> String {
    body.unwrap_or_else(|e| format!("<unreadable body: {e}>"))
}
