//! Integration tests for the Dapr client against a mock sidecar

use cns_core::{CnsError, DaprClient};
use reqwest::Method;
use serde_json::json;
use wiremock::matchers::{body_json, header_exists, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> DaprClient {
    DaprClient::with_base_url(&server.uri()).unwrap()
}

// ============================================================================
// Invoke
// ============================================================================

#[tokio::test]
async fn test_invoke_get_builds_sidecar_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/v1.0/invoke/cns-dapr/method/node/contexts/ctx-a/capabilities",
        ))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"cp:test.abc.v1": {"version": "1.0"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let data = client
        .invoke_data(
            "cns-dapr",
            "node/contexts/ctx-a/capabilities",
            Method::GET,
            None,
        )
        .await
        .unwrap();

    assert_eq!(data, json!({"cp:test.abc.v1": {"version": "1.0"}}));
}

#[tokio::test]
async fn test_invoke_post_sends_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1.0/invoke/cns-dapr/method/node/contexts/ctx-a"))
        .and(body_json(json!({"title": "Changed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let body = json!({"title": "Changed"});
    let response = client
        .invoke("cns-dapr", "/node/contexts/ctx-a", Method::POST, Some(&body))
        .await
        .unwrap();

    assert_eq!(response, json!({"data": "ok"}));
}

#[tokio::test]
async fn test_invoke_error_envelope_is_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1.0/invoke/cns-dapr/method/profiles/missing"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error": "profile not found"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result = client
        .invoke_data("cns-dapr", "profiles/missing", Method::GET, None)
        .await;

    assert_eq!(result, Err(CnsError::Service("profile not found".to_string())));
    assert!(result.unwrap_err().is_bad_request());
}

#[tokio::test]
async fn test_invoke_http_failure_is_bad_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result = client
        .invoke("cns-dapr", "node/contexts/ctx-a", Method::GET, None)
        .await;

    assert_eq!(result, Err(CnsError::BadRequest));
}

#[tokio::test]
async fn test_invoke_non_json_is_bad_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result = client
        .invoke("cns-dapr", "node/contexts/ctx-a", Method::GET, None)
        .await;

    assert_eq!(result, Err(CnsError::BadRequest));
}

#[tokio::test]
async fn test_invoke_empty_body_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let data = client
        .invoke_data("cns-dapr", "node/contexts/ctx-a", Method::GET, None)
        .await
        .unwrap();

    assert!(data.is_null());
}

#[tokio::test]
async fn test_unreachable_sidecar_is_bad_request() {
    // Nothing listens on the discard port
    let client = DaprClient::new("127.0.0.1", 9).unwrap();
    let result = client
        .invoke("cns-dapr", "node/contexts/ctx-a", Method::GET, None)
        .await;

    assert_eq!(result, Err(CnsError::BadRequest));
}

// ============================================================================
// Publish
// ============================================================================

#[tokio::test]
async fn test_publish_keeps_topic_slashes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1.0/publish/cns-pubsub/node/contexts/ctx-a"))
        .and(body_json(json!({"title": "Hello"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client
        .publish("cns-pubsub", "node/contexts/ctx-a", &json!({"title": "Hello"}))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_publish_encodes_each_topic_segment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/v1\.0/publish/cns-pubsub/node/contexts/ctx%20a%3Fb$"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client
        .publish("cns-pubsub", "node/contexts/ctx a?b", &json!({}))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_publish_failure_is_bad_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result = client
        .publish("missing-pubsub", "node/contexts/ctx-a", &json!({}))
        .await;

    assert_eq!(result, Err(CnsError::BadRequest));
}
