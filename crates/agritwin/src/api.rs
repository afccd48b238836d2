//! HTTP client for the projection service.
//!
//! Two endpoints are consumed: `GET /api/model-params` to refresh the growth
//! model coefficients, and `POST /api/projection` to run the authoritative
//! Monte Carlo projection. Both can signal failure through an `error` field
//! in an otherwise successful response, so bodies are decoded from text and
//! inspected before the payload is trusted.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use agritwin_core::model::{ModelParamsUpdate, ProjectionResults, RawSettings};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("server error: {0}")]
    Server(String),
}

/// Body of `POST /api/projection`.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionRequest {
    /// Raw intervention intensities, 0..=100, keyed by name.
    pub interventions: RawSettings,
    pub n_simulations: u32,
    pub year: i32,
}

#[derive(Debug, Deserialize)]
struct ProjectionEnvelope {
    #[serde(default)]
    success: bool,
    results: Option<ProjectionResults>,
    /// Base64 chart image rendered server-side; unused here but kept so the
    /// envelope round-trips.
    #[serde(default)]
    #[allow(dead_code)]
    visualization: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelParamsEnvelope {
    #[serde(default)]
    error: Option<String>,
    #[serde(flatten)]
    update: ModelParamsUpdate,
}

/// Blocking client for the projection service.
pub struct ApiClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the current growth-model parameters.
    pub fn fetch_model_params(&self) -> Result<ModelParamsUpdate, ApiError> {
        let resp = self
            .client
            .get(format!("{}/api/model-params", self.base_url))
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let body = resp.text()?;
        let envelope: ModelParamsEnvelope = serde_json::from_str(&body)?;
        if let Some(error) = envelope.error {
            return Err(ApiError::Server(error));
        }
        Ok(envelope.update)
    }

    /// Run the authoritative Monte Carlo projection.
    pub fn run_projection(
        &self,
        request: &ProjectionRequest,
    ) -> Result<ProjectionResults, ApiError> {
        let resp = self
            .client
            .post(format!("{}/api/projection", self.base_url))
            .json(request)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let body = resp.text()?;
        let envelope: ProjectionEnvelope = serde_json::from_str(&body)?;
        if let Some(error) = envelope.error {
            return Err(ApiError::Server(error));
        }
        if !envelope.success {
            return Err(ApiError::Server("projection reported failure".to_string()));
        }
        envelope
            .results
            .ok_or_else(|| ApiError::Server("projection response missing results".to_string()))
    }
}

/// Seam between the worker and the network, so tests can substitute a fake
/// service.
pub trait ProjectionBackend: Send + 'static {
    fn run_projection(&self, request: &ProjectionRequest) -> Result<ProjectionResults, ApiError>;
}

impl ProjectionBackend for ApiClient {
    fn run_projection(&self, request: &ProjectionRequest) -> Result<ProjectionResults, ApiError> {
        ApiClient::run_projection(self, request)
    }
}
