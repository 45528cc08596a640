//! HTTP API module for the web front, prediction, health, and metrics endpoints.

pub mod handlers;
pub mod routes;
pub mod upload;

pub use handlers::{AppState, ErrorResponse, PredictResponse, Probabilities};
pub use routes::create_router;
pub use upload::{read_upload, Upload};
