//! Admin workflow integration tests: review transitions and unfiltered
//! catalog access. The admin is user 1.

mod common;

use common::{game_json, TestHarness};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn approve_sets_status_approved() {
    let harness = TestHarness::new().await;
    harness.login(1, true, false).await;
    Mock::given(method("GET"))
        .and(path("/games/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(game_json(1, 10, 300, "pending")))
        .mount(&harness.io_api)
        .await;
    Mock::given(method("PUT"))
        .and(path("/games/1"))
        .and(body_json(json!({"status": "approved"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(game_json(1, 10, 300, "approved")),
        )
        .expect(1)
        .mount(&harness.io_api)
        .await;

    let response = harness
        .server
        .post("/admin/games/1/approve")
        .add_header("Authorization", harness.auth_header())
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "approved");
}

#[tokio::test]
async fn reject_works_from_any_prior_status() {
    let harness = TestHarness::new().await;
    harness.login(1, true, false).await;
    // Already approved; rejection applies regardless.
    Mock::given(method("GET"))
        .and(path("/games/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(game_json(1, 10, 300, "approved")))
        .mount(&harness.io_api)
        .await;
    Mock::given(method("PUT"))
        .and(path("/games/1"))
        .and(body_json(json!({"status": "rejected"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(game_json(1, 10, 300, "rejected")),
        )
        .expect(1)
        .mount(&harness.io_api)
        .await;

    let response = harness
        .server
        .post("/admin/games/1/reject")
        .add_header("Authorization", harness.auth_header())
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn review_of_missing_game_is_not_found() {
    let harness = TestHarness::new().await;
    harness.login(1, true, false).await;
    Mock::given(method("GET"))
        .and(path("/games/1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "no such game"})))
        .mount(&harness.io_api)
        .await;
    Mock::given(method("PUT"))
        .and(path("/games/1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&harness.io_api)
        .await;

    let response = harness
        .server
        .post("/admin/games/1/approve")
        .add_header("Authorization", harness.auth_header())
        .await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(
        body["error"]["message"],
        "Game not found, cannot change status"
    );
}

#[tokio::test]
async fn admin_listing_includes_every_status() {
    let harness = TestHarness::new().await;
    harness.login(1, true, false).await;
    Mock::given(method("GET"))
        .and(path("/games"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            game_json(1, 10, 300, "pending"),
            game_json(2, 10, 100, "approved"),
            game_json(3, 99, 200, "rejected"),
        ])))
        .mount(&harness.io_api)
        .await;

    let response = harness
        .server
        .get("/admin/games")
        .add_header("Authorization", harness.auth_header())
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body.as_array().expect("array of games").len(), 3);
}

#[tokio::test]
async fn admin_detail_returns_unapproved_games() {
    let harness = TestHarness::new().await;
    harness.login(1, true, false).await;
    Mock::given(method("GET"))
        .and(path("/games/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(game_json(1, 10, 300, "pending")))
        .mount(&harness.io_api)
        .await;

    let response = harness
        .server
        .get("/admin/games/1")
        .add_header("Authorization", harness.auth_header())
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "pending");
}

#[tokio::test]
async fn admin_can_list_users() {
    let harness = TestHarness::new().await;
    harness.login(1, true, false).await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"uid": 5, "username": "buyer"},
            {"uid": 10, "username": "publisher"},
        ])))
        .mount(&harness.io_api)
        .await;

    let response = harness
        .server
        .get("/admin/users")
        .add_header("Authorization", harness.auth_header())
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body.as_array().expect("array of users").len(), 2);
}

#[tokio::test]
async fn admin_routes_reject_regular_users() {
    let harness = TestHarness::new().await;
    harness.login(5, false, false).await;

    let response = harness
        .server
        .post("/admin/games/1/approve")
        .add_header("Authorization", harness.auth_header())
        .await;

    response.assert_status_forbidden();
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Admin privileges required");
}

#[tokio::test]
async fn admin_routes_require_authentication() {
    let harness = TestHarness::new().await;
    harness.reject_logins().await;

    let response = harness
        .server
        .get("/admin/games")
        .add_header("Authorization", harness.auth_header())
        .await;

    response.assert_status_unauthorized();
}
