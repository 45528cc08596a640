//! Unified error types for the prediction relay.

use axum::http::StatusCode;
use thiserror::Error;

/// Process-level error type (startup, configuration, CLI commands).
#[derive(Error, Debug)]
pub enum RelayError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// HTTP client construction error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A prediction failed outside the HTTP surface (CLI one-shot).
    #[error("prediction failed: {0}")]
    Predict(#[from] PredictError),
}

/// Failure of a single prediction request.
///
/// Every variant is converted to the `{"success": false, "error": ...}`
/// envelope at the handler boundary; [`PredictError::status_code`] picks the
/// HTTP status.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    /// Missing or unreadable upload.
    #[error("{0}")]
    ClientInput(String),

    /// Upload exceeded the transport body limit.
    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    /// Inference service answered with a non-success status.
    #[error("Inference API error ({status}): {body}")]
    Upstream {
        /// Upstream HTTP status code.
        status: u16,
        /// Upstream response body text.
        body: String,
    },

    /// Inference service did not answer within the configured timeout.
    #[error("Inference API timeout")]
    UpstreamTimeout,

    /// Inference service answered with a payload of an unrecognized shape.
    #[error("Unexpected API response format: {0}")]
    UnexpectedResponse(String),

    /// Anything else that went wrong while handling the request.
    #[error("{0}")]
    Internal(String),
}

impl PredictError {
    /// HTTP status reported to the client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            PredictError::ClientInput(_) => StatusCode::BAD_REQUEST,
            PredictError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            PredictError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            PredictError::Upstream { .. }
            | PredictError::UnexpectedResponse(_)
            | PredictError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short stable name, used as a metrics label and log field.
    pub fn kind(&self) -> &'static str {
        match self {
            PredictError::ClientInput(_) => "client_input",
            PredictError::PayloadTooLarge(_) => "payload_too_large",
            PredictError::Upstream { .. } => "upstream",
            PredictError::UpstreamTimeout => "upstream_timeout",
            PredictError::UnexpectedResponse(_) => "unexpected_response",
            PredictError::Internal(_) => "internal",
        }
    }

    /// Whether the failure was caused by the caller rather than the relay.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PredictError::ClientInput(_) | PredictError::PayloadTooLarge(_)
        )
    }
}

impl From<reqwest::Error> for PredictError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PredictError::UpstreamTimeout
        } else if err.is_decode() {
            PredictError::UnexpectedResponse(err.to_string())
        } else {
            PredictError::Internal(err.to_string())
        }
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, RelayError>;
