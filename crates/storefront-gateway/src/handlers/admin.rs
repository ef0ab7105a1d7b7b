//! Admin handlers: unfiltered catalog access and the review transitions.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;

use storefront_core::{Game, GameId, GameStatus};

use crate::auth::AdminUser;
use crate::error::ApiError;
use crate::state::AppState;

/// List every game, regardless of status.
pub async fn list_all_games(
    State(state): State<Arc<AppState>>,
    _auth: AdminUser,
) -> Result<Json<Vec<Game>>, ApiError> {
    let games = state.catalog.list_games().await?;
    Ok(Json(games))
}

/// Get one game, regardless of status.
pub async fn game_detail(
    State(state): State<Arc<AppState>>,
    _auth: AdminUser,
    Path(gid): Path<GameId>,
) -> Result<Json<Game>, ApiError> {
    let game = state.catalog.get_game(gid).await.map_err(|err| {
        if err.is_not_found() {
            ApiError::NotFound("Game not found".to_string())
        } else {
            err.into()
        }
    })?;
    Ok(Json(game))
}

/// Approve a game for sale.
pub async fn approve_game(
    State(state): State<Arc<AppState>>,
    auth: AdminUser,
    Path(gid): Path<GameId>,
) -> Result<Json<Value>, ApiError> {
    change_game_status(&state, &auth, gid, GameStatus::Approved).await
}

/// Reject a game.
pub async fn reject_game(
    State(state): State<Arc<AppState>>,
    auth: AdminUser,
    Path(gid): Path<GameId>,
) -> Result<Json<Value>, ApiError> {
    change_game_status(&state, &auth, gid, GameStatus::Rejected).await
}

/// Review transition: set the target status unconditionally. The prior
/// state is not checked, so approve/reject works from any current status.
async fn change_game_status(
    state: &AppState,
    auth: &AdminUser,
    gid: GameId,
    status: GameStatus,
) -> Result<Json<Value>, ApiError> {
    // Existence check first, so a missing game reports 404 rather than
    // whatever the write would return.
    state.catalog.get_game(gid).await.map_err(|err| {
        if err.is_not_found() {
            ApiError::NotFound("Game not found, cannot change status".to_string())
        } else {
            err.into()
        }
    })?;

    let updated = state.catalog.set_game_status(gid, status).await?;

    tracing::info!(
        game = %gid,
        admin = %auth.claims.uid,
        status = status.as_str(),
        "Game review status changed"
    );
    Ok(Json(updated))
}

/// List all users, delegated to the catalog/ledger service.
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _auth: AdminUser,
) -> Result<Json<Value>, ApiError> {
    let users = state.catalog.list_users().await?;
    Ok(Json(users))
}
