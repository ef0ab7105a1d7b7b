//! Common test utilities for gateway integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use axum_test::TestServer;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storefront_gateway::{create_router, AppState, GatewayConfig};

/// Test harness containing everything needed for integration tests.
///
/// Both remote backends are wiremock servers; each test mounts the
/// responses its scenario needs and, where it matters, `expect` counts to
/// verify which writes did or did not happen.
pub struct TestHarness {
    /// The test server for making HTTP requests against the gateway.
    pub server: TestServer,
    /// Mock identity service.
    pub auth_api: MockServer,
    /// Mock catalog/ledger service.
    pub io_api: MockServer,
}

impl TestHarness {
    /// Create a new test harness with fresh mock backends.
    pub async fn new() -> Self {
        let auth_api = MockServer::start().await;
        let io_api = MockServer::start().await;

        let config = GatewayConfig {
            listen_addr: "127.0.0.1:0".into(),
            auth_base_url: auth_api.uri(),
            io_base_url: io_api.uri(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        };

        let state = AppState::new(config);
        let server = TestServer::new(create_router(state)).expect("Failed to create test server");

        Self {
            server,
            auth_api,
            io_api,
        }
    }

    /// Mount an identity-service response validating every token as the
    /// given user.
    pub async fn login(&self, uid: i64, is_admin: bool, is_publisher: bool) {
        Mock::given(method("POST"))
            .and(path("/validate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "uid": uid,
                "is_admin": is_admin,
                "is_publisher": is_publisher,
            })))
            .mount(&self.auth_api)
            .await;
    }

    /// Mount an identity-service response rejecting every token.
    pub async fn reject_logins(&self) {
        Mock::given(method("POST"))
            .and(path("/validate"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": "invalid token"
            })))
            .mount(&self.auth_api)
            .await;
    }

    /// The authorization header value used by every test request.
    pub fn auth_header(&self) -> String {
        "Bearer test-token".to_string()
    }
}

/// A game record as the catalog service would return it.
pub fn game_json(gid: i64, publisher: i64, price: i64, status: &str) -> Value {
    json!({
        "gid": gid,
        "name": format!("Game {gid}"),
        "description": "",
        "price": price,
        "publisher": publisher,
        "status": status,
    })
}

/// A purchase record as the catalog service would return it.
pub fn purchase_json(pid: i64, user_id: i64, game_id: i64, date: &str, hours_played: i64) -> Value {
    json!({
        "pid": pid,
        "user_id": user_id,
        "game_id": game_id,
        "game_name": format!("Game {game_id}"),
        "date": date,
        "hours_played": hours_played,
    })
}

/// Format a timestamp the way the catalog service stores purchase dates.
pub fn catalog_date(when: chrono::DateTime<chrono::Utc>) -> String {
    when.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// A purchase date `hours_ago` hours before now, in catalog format.
pub fn purchase_date_hours_ago(hours_ago: i64) -> String {
    catalog_date(chrono::Utc::now() - chrono::TimeDelta::hours(hours_ago))
}
