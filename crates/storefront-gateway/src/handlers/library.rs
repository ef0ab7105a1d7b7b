//! Library handlers: purchase history, the play ownership check, and the
//! wishlist placeholders.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use storefront_core::{GameId, Purchase, PurchaseId};

use super::MessageResponse;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// One entry in the caller's library.
#[derive(Debug, Serialize)]
pub struct LibraryEntry {
    /// The purchase record id.
    pub purchase_id: PurchaseId,
    /// The purchased game.
    pub game_id: Option<GameId>,
    /// Denormalized game name; "N/A" when the catalog omits it.
    pub game_name: String,
    /// Purchase timestamp as stored by the catalog.
    pub purchase_date: Option<String>,
    /// Recorded playtime in hours.
    pub hours_played: i64,
}

impl From<Purchase> for LibraryEntry {
    fn from(p: Purchase) -> Self {
        let hours_played = p.hours_played_or_zero();
        Self {
            purchase_id: p.pid,
            game_id: p.game_id,
            game_name: p.game_name.unwrap_or_else(|| "N/A".to_string()),
            purchase_date: p.date,
            hours_played,
        }
    }
}

/// Get the caller's purchase history.
pub async fn my_library(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<Vec<LibraryEntry>>, ApiError> {
    let purchases = state
        .catalog
        .list_purchases(Some(auth.claims.uid), None)
        .await?;
    Ok(Json(purchases.into_iter().map(LibraryEntry::from).collect()))
}

/// Ownership check: confirm the caller has purchased the game.
pub async fn play_game(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(gid): Path<GameId>,
) -> Result<Json<MessageResponse>, ApiError> {
    let purchases = state
        .catalog
        .list_purchases(Some(auth.claims.uid), Some(gid))
        .await?;
    if purchases.is_empty() {
        return Err(ApiError::Forbidden(
            "You do not own this game or game ID is invalid".to_string(),
        ));
    }
    Ok(Json(MessageResponse::new(
        "Access to game confirmed. Happy gaming!",
    )))
}

/// Wishlist add: planned-but-absent functionality, answered with a fixed
/// 501 outcome rather than an error.
pub async fn wishlist_add(
    auth: AuthUser,
    Path(gid): Path<GameId>,
) -> (StatusCode, Json<MessageResponse>) {
    tracing::info!(game = %gid, user = %auth.claims.uid, "Wishlist POST - not implemented");
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(MessageResponse::new("Wishlist functionality not implemented")),
    )
}

/// Wishlist remove: same fixed 501 outcome as [`wishlist_add`].
pub async fn wishlist_remove(
    auth: AuthUser,
    Path(gid): Path<GameId>,
) -> (StatusCode, Json<MessageResponse>) {
    tracing::info!(game = %gid, user = %auth.claims.uid, "Wishlist DELETE - not implemented");
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(MessageResponse::new("Wishlist functionality not implemented")),
    )
}
