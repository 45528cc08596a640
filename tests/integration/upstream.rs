//! HuggingFaceClient against a mocked inference endpoint.

use std::time::Duration;

use axum::body::Bytes;
use histo_relay::inference::InferenceClient;
use histo_relay::prediction::{normalize, Diagnosis, LabelScore, UpstreamPayload};
use histo_relay::PredictError;
use pretty_assertions::assert_eq;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_bytes, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{client_for, MODEL_PATH, TOKEN};

const IMAGE: &[u8] = b"\xff\xd8\xff\xe0\x00\x10JFIF fake image";

/// Test the request carries the bearer token and the raw image bytes.
#[tokio::test]
async fn test_forwards_raw_bytes_with_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header("Authorization", format!("Bearer {}", TOKEN).as_str()))
        .and(body_bytes(IMAGE))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"label": "MALIGNANT", "score": 0.91},
            {"label": "BENIGN", "score": 0.09}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let payload = assert_ok!(client.classify(Bytes::from_static(IMAGE)).await);

    assert_eq!(
        payload,
        UpstreamPayload::Flat(vec![
            LabelScore::new("MALIGNANT", 0.91),
            LabelScore::new("BENIGN", 0.09),
        ])
    );
}

/// Test that the double-nested shape decodes and normalizes like the flat one.
#[tokio::test]
async fn test_nested_response_is_transparent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([[
            {"label": "benign", "score": 0.8},
            {"label": "malignant", "score": 0.2}
        ]])))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let payload = assert_ok!(client.classify(Bytes::from_static(IMAGE)).await);
    let nested = normalize(payload).unwrap();

    let flat = normalize(UpstreamPayload::Flat(vec![
        LabelScore::new("BENIGN", 0.8),
        LabelScore::new("MALIGNANT", 0.2),
    ]))
    .unwrap();

    assert_eq!(nested, flat);
    assert_eq!(nested.label, Diagnosis::Benign);
}

/// Test that an upstream 500 surfaces the body text.
#[tokio::test]
async fn test_upstream_error_carries_body_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal model failure"))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let err = assert_err!(client.classify(Bytes::from_static(IMAGE)).await);

    assert_eq!(
        err,
        PredictError::Upstream {
            status: 500,
            body: "Internal model failure".to_string(),
        }
    );
    assert!(err.to_string().contains("Internal model failure"));
}

/// Test that a non-success status wins over an empty error body.
#[tokio::test]
async fn test_upstream_error_with_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let err = assert_err!(client.classify(Bytes::from_static(IMAGE)).await);

    assert_eq!(
        err,
        PredictError::Upstream {
            status: 503,
            body: String::new(),
        }
    );
}

/// Test that label/score pairs encoded as arrays are not accepted.
#[tokio::test]
async fn test_array_pairs_are_unexpected_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([["BENIGN", 0.9], ["MALIGNANT", 0.1]])),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let err = assert_err!(client.classify(Bytes::from_static(IMAGE)).await);

    assert!(matches!(err, PredictError::UnexpectedResponse(_)));
}

/// Test that a slow upstream yields the distinct timeout error.
#[tokio::test]
async fn test_slow_upstream_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"label": "BENIGN", "score": 0.9}]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_millis(200));
    let err = assert_err!(client.classify(Bytes::from_static(IMAGE)).await);

    assert_eq!(err, PredictError::UpstreamTimeout);
}

/// Test that a 200 with an unrecognized body fails closed.
#[tokio::test]
async fn test_unrecognized_shape_is_unexpected_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"error": "Model is loading"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let err = assert_err!(client.classify(Bytes::from_static(IMAGE)).await);

    assert!(matches!(err, PredictError::UnexpectedResponse(_)));
}

/// Test that a 200 with invalid JSON fails closed.
#[tokio::test]
async fn test_invalid_json_is_unexpected_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, Duration::from_secs(5));
    let err = assert_err!(client.classify(Bytes::from_static(IMAGE)).await);

    assert!(matches!(err, PredictError::UnexpectedResponse(_)));
}
