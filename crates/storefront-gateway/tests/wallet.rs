//! Wallet and deposit workflow integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn get_wallet_returns_balance() {
    let harness = TestHarness::new().await;
    harness.login(5, false, false).await;
    Mock::given(method("GET"))
        .and(path("/wallets/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uid": 5, "balance": 100})))
        .mount(&harness.io_api)
        .await;

    let response = harness
        .server
        .get("/wallet")
        .add_header("authorization", harness.auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance"], 100);
}

#[tokio::test]
async fn get_wallet_requires_auth() {
    let harness = TestHarness::new().await;

    let response = harness.server.get("/wallet").await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn invalid_token_is_unauthorized() {
    let harness = TestHarness::new().await;
    harness.reject_logins().await;

    let response = harness
        .server
        .get("/wallet")
        .add_header("authorization", harness.auth_header())
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn cookie_credential_is_accepted() {
    let harness = TestHarness::new().await;
    harness.login(5, false, false).await;
    Mock::given(method("GET"))
        .and(path("/wallets/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uid": 5, "balance": 0})))
        .mount(&harness.io_api)
        .await;

    let response = harness
        .server
        .get("/wallet")
        .add_header("cookie", "auth_token=test-token")
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn deposit_adds_amount_to_balance() {
    let harness = TestHarness::new().await;
    harness.login(5, false, false).await;
    Mock::given(method("GET"))
        .and(path("/wallets/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uid": 5, "balance": 100})))
        .mount(&harness.io_api)
        .await;
    // 100 + 500 = 600 must be what gets written back.
    Mock::given(method("PUT"))
        .and(path("/wallets/5"))
        .and(body_json(json!({"balance": 600})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uid": 5, "balance": 600})))
        .expect(1)
        .mount(&harness.io_api)
        .await;

    let response = harness
        .server
        .post("/wallet/deposit")
        .add_header("authorization", harness.auth_header())
        .json(&json!({"amount": 500}))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance"], 600);
}

#[tokio::test]
async fn deposit_rejects_missing_amount() {
    let harness = TestHarness::new().await;
    harness.login(5, false, false).await;

    let response = harness
        .server
        .post("/wallet/deposit")
        .add_header("authorization", harness.auth_header())
        .json(&json!({}))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn deposit_rejects_zero_and_negative_amounts() {
    let harness = TestHarness::new().await;
    harness.login(5, false, false).await;

    for amount in [0, -50] {
        let response = harness
            .server
            .post("/wallet/deposit")
            .add_header("authorization", harness.auth_header())
            .json(&json!({"amount": amount}))
            .await;
        response.assert_status_bad_request();
    }
}

#[tokio::test]
async fn deposit_rejects_non_integer_amount() {
    let harness = TestHarness::new().await;
    harness.login(5, false, false).await;

    let response = harness
        .server
        .post("/wallet/deposit")
        .add_header("authorization", harness.auth_header())
        .json(&json!({"amount": "lots"}))
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn deposit_accepts_numeric_string_amount() {
    let harness = TestHarness::new().await;
    harness.login(5, false, false).await;
    Mock::given(method("GET"))
        .and(path("/wallets/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uid": 5, "balance": 0})))
        .mount(&harness.io_api)
        .await;
    Mock::given(method("PUT"))
        .and(path("/wallets/5"))
        .and(body_json(json!({"balance": 42})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uid": 5, "balance": 42})))
        .expect(1)
        .mount(&harness.io_api)
        .await;

    let response = harness
        .server
        .post("/wallet/deposit")
        .add_header("authorization", harness.auth_header())
        .json(&json!({"amount": "42"}))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn deposit_into_missing_wallet_is_a_data_integrity_error() {
    let harness = TestHarness::new().await;
    harness.login(5, false, false).await;
    Mock::given(method("GET"))
        .and(path("/wallets/5"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "no wallet"})))
        .mount(&harness.io_api)
        .await;

    let response = harness
        .server
        .post("/wallet/deposit")
        .add_header("authorization", harness.auth_header())
        .json(&json!({"amount": 10}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "data_integrity");
}

#[tokio::test]
async fn deposit_overflowing_the_balance_is_rejected() {
    let harness = TestHarness::new().await;
    harness.login(5, false, false).await;
    Mock::given(method("GET"))
        .and(path("/wallets/5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"uid": 5, "balance": i64::MAX - 10})),
        )
        .mount(&harness.io_api)
        .await;
    Mock::given(method("PUT"))
        .and(path("/wallets/5"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&harness.io_api)
        .await;

    let response = harness
        .server
        .post("/wallet/deposit")
        .add_header("authorization", harness.auth_header())
        .json(&json!({"amount": 100}))
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "validation_error");
}
