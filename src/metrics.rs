//! Prometheus metrics for the prediction relay.
//!
//! This module provides:
//! - Prediction request/success/failure counters
//! - Upstream inference latency
//! - Upload size distribution

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// Prediction requests counter metric name.
pub const METRIC_PREDICT_REQUESTS: &str = "predict_requests_total";
/// Successful predictions counter metric name.
pub const METRIC_PREDICT_SUCCESS: &str = "predict_success_total";
/// Failed predictions counter metric name, labelled by error kind.
pub const METRIC_PREDICT_FAILURES: &str = "predict_failures_total";
/// Upstream inference latency metric name.
pub const METRIC_UPSTREAM_LATENCY: &str = "upstream_latency_ms";
/// Upload size metric name.
pub const METRIC_UPLOAD_SIZE: &str = "upload_size_bytes";

/// Install the Prometheus recorder and return a handle for rendering.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Initialize all metric descriptions.
pub fn init_metrics() {
    describe_counter!(
        METRIC_PREDICT_REQUESTS,
        "Total number of prediction requests received"
    );
    describe_counter!(
        METRIC_PREDICT_SUCCESS,
        "Total number of predictions returned successfully"
    );
    describe_counter!(
        METRIC_PREDICT_FAILURES,
        "Total number of failed predictions by error kind"
    );
    describe_histogram!(
        METRIC_UPSTREAM_LATENCY,
        "Inference API round trip latency in milliseconds"
    );
    describe_histogram!(METRIC_UPLOAD_SIZE, "Uploaded image size in bytes");

    debug!("Metrics initialized");
}

/// Increment prediction requests counter.
pub fn inc_predict_requests() {
    counter!(METRIC_PREDICT_REQUESTS).increment(1);
}

/// Increment successful predictions counter.
pub fn inc_predict_success() {
    counter!(METRIC_PREDICT_SUCCESS).increment(1);
}

/// Increment failed predictions counter.
pub fn inc_predict_failures(kind: &'static str) {
    counter!(METRIC_PREDICT_FAILURES, "kind" => kind).increment(1);
}

/// Record the size of an uploaded image.
pub fn record_upload_size(bytes: usize) {
    histogram!(METRIC_UPLOAD_SIZE).record(bytes as f64);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        histogram!(self.metric_name).record(self.elapsed_ms());
    }
}

/// Create a latency timer for the upstream inference call.
pub fn timer_upstream() -> LatencyTimer {
    LatencyTimer::new(METRIC_UPSTREAM_LATENCY)
}
