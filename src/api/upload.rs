//! Multipart upload extraction.

use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;

use crate::error::PredictError;

/// Form field carrying the image.
pub const FILE_FIELD: &str = "file";

/// A single uploaded file, read fully into memory.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Client-supplied file name.
    pub file_name: String,
    /// Client-supplied content type, if any.
    pub content_type: Option<String>,
    /// Raw file bytes.
    pub bytes: Bytes,
}

/// Map a multipart read failure, keeping body-limit overruns distinct.
fn read_error(context: &str, err: MultipartError) -> PredictError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        PredictError::PayloadTooLarge(err.body_text())
    } else {
        PredictError::ClientInput(format!("{}: {}", context, err.body_text()))
    }
}

/// Read the `file` field from a multipart body.
///
/// Other fields are skipped. The bytes are returned as-is; format and content
/// type are not checked here. Size is bounded only by the router's body limit.
pub async fn read_upload(mut multipart: Multipart) -> Result<Upload, PredictError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| read_error("Failed to read multipart body", e))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        // A `file` part without a filename is a plain form value, not an upload.
        let Some(file_name) = field.file_name().map(|n| n.trim().to_string()) else {
            return Err(PredictError::ClientInput("No file uploaded".to_string()));
        };
        if file_name.is_empty() {
            return Err(PredictError::ClientInput("No file selected".to_string()));
        }
        let content_type = field.content_type().map(str::to_string);

        let bytes = field
            .bytes()
            .await
            .map_err(|e| read_error("Failed to read uploaded file", e))?;

        return Ok(Upload {
            file_name,
            content_type,
            bytes,
        });
    }

    Err(PredictError::ClientInput("No file uploaded".to_string()))
}
