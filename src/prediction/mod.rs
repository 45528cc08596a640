//! Prediction module for reshaping classifier output.
//!
//! This module handles:
//! - Label/score types decoded from the inference service
//! - The normalized two-class prediction result
//! - Normalization of flat and single-nested payloads

pub mod normalize;
pub mod types;

pub use normalize::normalize;
pub use types::{Diagnosis, LabelScore, PredictionResult, UpstreamPayload};
