//! Public catalog handlers. No authentication required.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use storefront_core::{Game, GameId};

use crate::error::ApiError;
use crate::state::AppState;

/// List all games available for purchase. Filtering to approved status
/// happens here; the catalog returns everything.
pub async fn list_games(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Game>>, ApiError> {
    let games = state.catalog.list_games().await?;
    let approved: Vec<Game> = games.into_iter().filter(Game::is_purchasable).collect();
    Ok(Json(approved))
}

/// Get one approved game. 403 if the game exists but is not approved,
/// 404 if it does not exist.
pub async fn game_detail(
    State(state): State<Arc<AppState>>,
    Path(gid): Path<GameId>,
) -> Result<Json<Game>, ApiError> {
    let game = state.catalog.get_game(gid).await.map_err(|err| {
        if err.is_not_found() {
            ApiError::NotFound("Game not found".to_string())
        } else {
            err.into()
        }
    })?;

    if !game.is_purchasable() {
        return Err(ApiError::Forbidden("Game not accessible".to_string()));
    }

    Ok(Json(game))
}
