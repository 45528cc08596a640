//! Mock inference client for unit testing.
//!
//! This module provides a mock client that can be used in tests
//! without making real network requests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Bytes;

use crate::error::PredictError;
use crate::prediction::{LabelScore, UpstreamPayload};

use super::InferenceClient;

/// Configuration for mock client behavior.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Error to return instead of a payload.
    pub fail_with: Option<PredictError>,
    /// Simulated latency in milliseconds.
    pub latency_ms: u64,
}

/// Mock inference client for testing.
#[derive(Debug, Clone)]
pub struct MockInferenceClient {
    /// Mock configuration.
    config: MockConfig,
    /// Payload returned on success.
    payload: Arc<Mutex<UpstreamPayload>>,
    /// Number of classify calls.
    calls: Arc<AtomicUsize>,
    /// Bytes seen by the last call.
    last_image: Arc<Mutex<Option<Bytes>>>,
}

impl MockInferenceClient {
    /// Create a mock that answers with the given pairs.
    pub fn new(pairs: Vec<LabelScore>) -> Self {
        Self::with_payload(UpstreamPayload::Flat(pairs))
    }

    /// Create a mock that answers with an arbitrary payload.
    pub fn with_payload(payload: UpstreamPayload) -> Self {
        Self {
            config: MockConfig::default(),
            payload: Arc::new(Mutex::new(payload)),
            calls: Arc::new(AtomicUsize::new(0)),
            last_image: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a mock that always fails with the given error.
    pub fn failing(error: PredictError) -> Self {
        Self::new(Vec::new()).with_config(MockConfig {
            fail_with: Some(error),
            latency_ms: 0,
        })
    }

    /// Replace the mock configuration.
    pub fn with_config(mut self, config: MockConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the payload returned on success.
    pub fn set_payload(&self, payload: UpstreamPayload) {
        *self.payload.lock().unwrap() = payload;
    }

    /// Number of classify calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Bytes received by the most recent call.
    pub fn last_image(&self) -> Option<Bytes> {
        self.last_image.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceClient for MockInferenceClient {
    async fn classify(&self, image: Bytes) -> Result<UpstreamPayload, PredictError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_image.lock().unwrap() = Some(image);

        if self.config.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.config.latency_ms)).await;
        }

        if let Some(err) = &self.config.fail_with {
            return Err(err.clone());
        }

        Ok(self.payload.lock().unwrap().clone())
    }
}
