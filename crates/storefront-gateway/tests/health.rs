//! Health endpoint integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_health(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({"status": "ok"})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn healthy_when_both_backends_respond() {
    let harness = TestHarness::new().await;
    mount_health(&harness.auth_api, 200).await;
    mount_health(&harness.io_api, 200).await;

    let response = harness.server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["dependencies"]["auth_api"], "ok");
    assert_eq!(body["dependencies"]["io_api"], "ok");
}

#[tokio::test]
async fn unhealthy_when_catalog_is_down() {
    let harness = TestHarness::new().await;
    mount_health(&harness.auth_api, 200).await;
    mount_health(&harness.io_api, 500).await;

    let response = harness.server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["dependencies"]["auth_api"], "ok");
    assert_eq!(body["dependencies"]["io_api"], "error");
}

#[tokio::test]
async fn unhealthy_when_identity_is_unreachable() {
    let harness = TestHarness::new().await;
    // No mock mounted on auth_api: wiremock answers 404, which is not OK.
    mount_health(&harness.io_api, 200).await;

    let response = harness.server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = response.json();
    assert_eq!(body["dependencies"]["auth_api"], "error");
    assert_eq!(body["dependencies"]["io_api"], "ok");
}
