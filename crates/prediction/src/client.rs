//! HTTP client for the failure-prediction service
//!
//! One attempt per call: no retries, no backoff. Failures come back to the
//! caller as [`PredictionError::Request`] with a readable message.

use pitwatch_core::error::validation;
use pitwatch_core::AppConfig;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::{PredictionError, Result};
use crate::types::{
    ApiErrorBody, PredictionRequest, PredictionResponse, SensorReading, MIN_SERIES_READINGS,
};

/// Health endpoint, relative to the base URL
pub const HEALTH_PATH: &str = "/";

/// Prediction endpoint, relative to the base URL
pub const PREDICT_PATH: &str = "/ml/predict";

#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: reqwest::Client,
    base_url: String,
}

impl PredictionClient {
    /// Create a client for an http(s) base URL such as `http://localhost:5000`
    pub fn new(base_url: &str) -> Result<Self> {
        validation::validate_http_url(base_url)
            .map_err(|e| PredictionError::validation("base_url", e))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(config.api_base())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Validate a single reading and ask the service for a verdict.
    ///
    /// Out-of-range readings are rejected before any network I/O.
    pub async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse> {
        request.validate()?;
        self.post_prediction(request).await
    }

    /// Batch path: timestamped readings, at least [`MIN_SERIES_READINGS`].
    pub async fn predict_series(&self, readings: &[SensorReading]) -> Result<PredictionResponse> {
        if readings.len() < MIN_SERIES_READINGS {
            return Err(PredictionError::InsufficientReadings {
                required: MIN_SERIES_READINGS,
                provided: readings.len(),
            });
        }
        self.post_prediction(readings).await
    }

    async fn post_prediction<B: Serialize + ?Sized>(&self, body: &B) -> Result<PredictionResponse> {
        let url = self.url(PREDICT_PATH);
        debug!(%url, "posting prediction request");

        let response = self.http.post(&url).json(body).send().await.map_err(|e| {
            error!(%url, error = %e, "prediction request failed");
            PredictionError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ApiErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => format!("HTTP error! status: {}", status.as_u16()),
            };
            error!(status = status.as_u16(), %message, "prediction service returned an error");
            return Err(PredictionError::Request(message));
        }

        response.json::<PredictionResponse>().await.map_err(|e| {
            error!(error = %e, "unreadable prediction response");
            PredictionError::from(e)
        })
    }

    /// Fetch the health payload. Any JSON document counts as healthy.
    pub async fn health(&self) -> Result<Value> {
        let response = self
            .http
            .get(self.url(HEALTH_PATH))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<Value>().await?)
    }

    /// Connectivity check for the status badge. Never fails.
    pub async fn test_connection(&self) -> bool {
        match self.health().await {
            Ok(_) => true,
            Err(e) => {
                warn!(endpoint = %self.base_url, error = %e, "health check failed");
                false
            }
        }
    }
}
