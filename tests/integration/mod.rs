//! Integration tests for the prediction relay.
//!
//! The hosted inference endpoint is replaced by a wiremock server, so these
//! tests run offline.

mod upstream;

use std::time::Duration;

use histo_relay::inference::HuggingFaceClient;
use wiremock::MockServer;

/// Model path served by the mock endpoint.
pub const MODEL_PATH: &str = "/models/test/breakhis-resnet50";

/// Token the mock endpoint expects.
pub const TOKEN: &str = "hf_test_token";

/// Build a client pointed at the mock server.
pub fn client_for(server: &MockServer, timeout: Duration) -> HuggingFaceClient {
    HuggingFaceClient::new(format!("{}{}", server.uri(), MODEL_PATH), TOKEN, timeout)
        .expect("client should build")
}
