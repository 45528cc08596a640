//! HTTP API handlers.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::PredictError;
use crate::metrics;
use crate::prediction::{Diagnosis, PredictionResult};
use crate::relay::Relay;

use super::upload::read_upload;

/// The single-page web front.
pub const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Prediction relay.
    pub relay: Relay,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state.
    pub fn new(relay: Relay) -> Self {
        Self {
            relay,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Per-class probabilities, keyed the way the web front reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Probabilities {
    /// Probability of benign tissue.
    #[serde(rename = "Benign")]
    pub benign: f64,
    /// Probability of malignant tissue.
    #[serde(rename = "Malignant")]
    pub malignant: f64,
}

/// Successful prediction response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Always `true`.
    pub success: bool,
    /// Top-ranked class.
    pub prediction: Diagnosis,
    /// Confidence as a percentage string.
    pub confidence: String,
    /// Per-class probabilities.
    pub probabilities: Probabilities,
}

impl From<PredictionResult> for PredictResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            success: true,
            prediction: result.label,
            confidence: result.confidence_percent(),
            probabilities: Probabilities {
                benign: result.probability(Diagnosis::Benign),
                malignant: result.probability(Diagnosis::Malignant),
            },
        }
    }
}

/// Error envelope returned for every failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Human-readable error message.
    pub error: String,
}

impl From<&PredictError> for ErrorResponse {
    fn from(err: &PredictError) -> Self {
        Self {
            success: false,
            error: err.to_string(),
        }
    }
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorResponse::from(&self))).into_response()
    }
}

/// Web front handler.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Metrics handler - Prometheus text format, 503 without a recorder.
pub async fn render_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "metrics recorder not installed").into_response(),
    }
}

/// Prediction handler - multipart upload in, normalized prediction out.
pub async fn predict(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PredictResponse>, PredictError> {
    metrics::inc_predict_requests();

    let upload = match multipart {
        Ok(multipart) => read_upload(multipart).await,
        Err(rejection) => Err(PredictError::ClientInput(format!(
            "Expected a multipart/form-data upload: {}",
            rejection.body_text()
        ))),
    }
    .map_err(|e| {
        metrics::inc_predict_failures(e.kind());
        warn!("Rejected upload: {}", e);
        e
    })?;

    debug!(
        file_name = %upload.file_name,
        content_type = ?upload.content_type,
        bytes = upload.bytes.len(),
        "Received upload"
    );

    let result = state.relay.predict(upload.bytes).await?;
    Ok(Json(result.into()))
}
