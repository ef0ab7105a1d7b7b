//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{admin, games, health, library, publisher, purchase, returns, wallet};
use crate::state::AppState;

/// Create the gateway router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Aggregated liveness of both backends
/// - `GET /games` - List approved games
/// - `GET /games/{id}` - One approved game
///
/// ## User (opaque token)
/// - `GET /wallet`, `POST /wallet/deposit`
/// - `GET /users/me/library`
/// - `POST /games/{id}/purchase`, `POST /purchases/{id}/return`
/// - `POST /games/{id}/play`
/// - `POST|DELETE /games/{id}/wishlist` (fixed 501)
///
/// ## Publisher
/// - `POST /games`, `PUT|DELETE /games/{id}`
/// - `GET /users/me/games`, `GET /users/me/profits`
///
/// ## Admin
/// - `GET /admin/games`, `GET /admin/games/{id}`
/// - `POST /admin/games/{id}/approve`, `POST /admin/games/{id}/reject`
/// - `GET /admin/users`
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    // Build CORS layer
    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    Router::new()
        // Health (public)
        .route("/health", get(health::health))
        // Catalog (public reads, publisher writes)
        .route("/games", get(games::list_games).post(publisher::create_game))
        .route(
            "/games/:gid",
            get(games::game_detail)
                .put(publisher::update_game)
                .delete(publisher::delete_game),
        )
        // User workflows
        .route("/wallet", get(wallet::get_wallet))
        .route("/wallet/deposit", post(wallet::deposit))
        .route("/users/me/library", get(library::my_library))
        .route("/games/:gid/purchase", post(purchase::purchase_game))
        .route("/purchases/:pid/return", post(returns::return_purchase))
        .route("/games/:gid/play", post(library::play_game))
        .route(
            "/games/:gid/wishlist",
            post(library::wishlist_add).delete(library::wishlist_remove),
        )
        // Publisher
        .route("/users/me/games", get(publisher::my_games))
        .route("/users/me/profits", get(publisher::my_profits))
        // Admin
        .route("/admin/games", get(admin::list_all_games))
        .route("/admin/games/:gid", get(admin::game_detail))
        .route("/admin/games/:gid/approve", post(admin::approve_game))
        .route("/admin/games/:gid/reject", post(admin::reject_game))
        .route("/admin/users", get(admin::list_users))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
