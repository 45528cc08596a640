//! Hosted inference endpoint client.

use std::time::Duration;

use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::PredictError;
use crate::metrics;
use crate::prediction::UpstreamPayload;

use super::InferenceClient;

/// Client for a hosted image-classification endpoint.
#[derive(Debug, Clone)]
pub struct HuggingFaceClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Full model URL.
    url: String,
    /// Bearer token.
    token: String,
}

impl HuggingFaceClient {
    /// Create a client for the given endpoint.
    pub fn new(
        url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .tcp_nodelay(true)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            http,
            url: url.into(),
            token: token.into(),
        })
    }

    /// Create a client from config.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(
            config.inference_url.clone(),
            config.hf_token.clone(),
            config.inference_timeout(),
        )
    }

    /// Target URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl InferenceClient for HuggingFaceClient {
    #[instrument(skip(self, image), fields(bytes = image.len()))]
    async fn classify(&self, image: Bytes) -> Result<UpstreamPayload, PredictError> {
        let _timer = metrics::timer_upstream();

        let response = self
            .http
            .post(&self.url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(image)
            .send()
            .await
            .map_err(|e| {
                warn!("Inference request failed: {}", e);
                PredictError::from(e)
            })?;

        let status = response.status();
        debug!(status = %status, "Inference API responded");

        if !status.is_success() {
            // The error body is informational only; an unreadable one is reported as empty.
            let text = response.text().await.unwrap_or_default().trim().to_string();
            warn!(status = %status, body = %text, "Inference API returned an error");
            return Err(PredictError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        let body = response.bytes().await.map_err(PredictError::from)?;

        UpstreamPayload::from_slice(&body).map_err(|e| {
            warn!("Inference API payload did not decode: {}", e);
            PredictError::UnexpectedResponse(e.to_string())
        })
    }
}
