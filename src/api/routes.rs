//! HTTP API route definitions.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{health, index, predict, render_metrics, AppState};

/// Create the API router.
pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        // Web front
        .route("/", get(index))
        // Prediction relay
        .route("/api/predict", post(predict))
        // Health and metrics endpoints
        .route("/health", get(health))
        .route("/metrics", get(render_metrics))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
