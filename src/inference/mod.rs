//! Inference module for the hosted image classifier.
//!
//! This module handles:
//! - The client abstraction the relay calls
//! - The HTTPS client for the hosted endpoint
//! - Mock client for testing

pub mod client;
pub mod mock;

use async_trait::async_trait;
use axum::body::Bytes;

use crate::error::PredictError;
use crate::prediction::UpstreamPayload;

pub use client::HuggingFaceClient;
pub use mock::{MockConfig, MockInferenceClient};

/// Anything that can classify raw image bytes.
///
/// Implementations forward the bytes untouched and return the decoded
/// payload; normalization happens in the relay.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Classify one image.
    async fn classify(&self, image: Bytes) -> Result<UpstreamPayload, PredictError>;
}
