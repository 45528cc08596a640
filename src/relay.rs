//! The prediction relay: forward image bytes, normalize the answer.

use std::sync::Arc;

use axum::body::Bytes;
use tracing::{info, instrument, warn};

use crate::error::PredictError;
use crate::inference::InferenceClient;
use crate::metrics;
use crate::prediction::{normalize, PredictionResult};

/// Stateless relay around an [`InferenceClient`].
///
/// Makes exactly one upstream call per prediction; nothing is cached.
#[derive(Clone)]
pub struct Relay {
    client: Arc<dyn InferenceClient>,
}

impl Relay {
    /// Create a relay over the given client.
    pub fn new(client: Arc<dyn InferenceClient>) -> Self {
        Self { client }
    }

    /// Classify one image and reshape the result.
    #[instrument(skip(self, image), fields(bytes = image.len()))]
    pub async fn predict(&self, image: Bytes) -> Result<PredictionResult, PredictError> {
        metrics::record_upload_size(image.len());

        let outcome = match self.client.classify(image).await {
            Ok(payload) => normalize(payload),
            Err(e) => Err(e),
        };

        match &outcome {
            Ok(result) => {
                metrics::inc_predict_success();
                info!(
                    prediction = %result.label,
                    confidence = %result.confidence_percent(),
                    "Prediction complete"
                );
            }
            Err(e) => {
                metrics::inc_predict_failures(e.kind());
                warn!(kind = e.kind(), "Prediction failed: {}", e);
            }
        }

        outcome
    }
}

impl std::fmt::Debug for Relay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relay").finish_non_exhaustive()
    }
}
