//! Histopathology prediction relay.
//!
//! Accepts an uploaded tissue image over HTTP, forwards the raw bytes to a
//! hosted breast-cancer classifier, and reshapes its answer into a fixed
//! two-class payload:
//!
//! ```text
//! upstream: [{"label":"MALIGNANT","score":0.91},{"label":"BENIGN","score":0.09}]
//! relay:    {"success":true,"prediction":"MALIGNANT","confidence":"91.00%",
//!            "probabilities":{"Benign":0.09,"Malignant":0.91}}
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`prediction`]: Payload types and normalization
//! - [`inference`]: Hosted classifier client and mock
//! - [`relay`]: The predict operation
//! - [`api`]: HTTP API for the web front, prediction, health and metrics
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod inference;
pub mod metrics;
pub mod prediction;
pub mod relay;
pub mod utils;

pub use config::Config;
pub use error::{PredictError, RelayError, Result};
pub use relay::Relay;
