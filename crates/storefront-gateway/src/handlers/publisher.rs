//! Publisher handlers: game submission, edits, deletion, listings, and the
//! profit aggregator.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Map, Value};

use storefront_core::{Game, GameId, GameStatus, UserId};

use super::{int_field, MessageResponse};
use crate::auth::PublisherUser;
use crate::backend::BackendError;
use crate::error::ApiError;
use crate::state::AppState;

/// List the caller's own games, all statuses included.
pub async fn my_games(
    State(state): State<Arc<AppState>>,
    auth: PublisherUser,
) -> Result<Json<Vec<Game>>, ApiError> {
    let publisher = auth.claims.uid;
    let games = state.catalog.list_games().await?;
    let mine: Vec<Game> = games
        .into_iter()
        .filter(|g| g.publisher == Some(publisher))
        .collect();
    Ok(Json(mine))
}

/// Submit a new game. The status is forced to `pending` regardless of what
/// the client sent; only an admin review can move it from there.
pub async fn create_game(
    State(state): State<Arc<AppState>>,
    auth: PublisherUser,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let publisher = auth.claims.uid;

    let name = body.get("name").and_then(Value::as_str).unwrap_or_default();
    let Some(raw_price) = body.get("price") else {
        return Err(ApiError::Validation(
            "Name and price (integer) are required fields".to_string(),
        ));
    };
    if name.is_empty() {
        return Err(ApiError::Validation(
            "Name and price (integer) are required fields".to_string(),
        ));
    }
    let price = validate_price(raw_price)?;

    let payload = json!({
        "name": name,
        "description": body.get("description").and_then(Value::as_str).unwrap_or(""),
        "price": price,
        "publisher": publisher,
        "status": GameStatus::Pending,
    });

    let created = state
        .catalog
        .create_game(&payload)
        .await
        .map_err(|err| map_duplicate_name(&err).unwrap_or_else(|| err.into()))?;

    tracing::info!(publisher = %publisher, name, price, "Game submitted for review");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Edit one of the caller's games. Editing a reviewed game forces its
/// status back to `pending`.
pub async fn update_game(
    State(state): State<Arc<AppState>>,
    auth: PublisherUser,
    Path(gid): Path<GameId>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let publisher = auth.claims.uid;

    let Some(fields) = body.as_object().filter(|m| !m.is_empty()) else {
        return Err(ApiError::Validation(
            "Request body cannot be empty for update".to_string(),
        ));
    };

    let game = fetch_owned_game(&state, gid, publisher, "update").await?;

    let mut payload = Map::new();
    if let Some(name) = fields.get("name") {
        payload.insert("name".to_string(), name.clone());
    }
    if let Some(description) = fields.get("description") {
        payload.insert("description".to_string(), description.clone());
    }
    if let Some(raw_price) = fields.get("price") {
        let price = validate_price(raw_price)?;
        payload.insert("price".to_string(), json!(price));
    }
    if payload.is_empty() {
        return Err(ApiError::Validation(
            "No valid or updatable fields provided".to_string(),
        ));
    }

    // Any edit re-enters the review queue; a pending game stays pending.
    let next_status = game.status.after_publisher_edit();
    payload.insert("status".to_string(), json!(next_status));

    let updated = state
        .catalog
        .update_game(gid, &Value::Object(payload))
        .await?;

    if game.status != next_status {
        tracing::info!(
            game = %gid,
            publisher = %publisher,
            from = game.status.as_str(),
            "Edited game reset to pending review"
        );
    }
    Ok(Json(updated))
}

/// Delete one of the caller's games.
pub async fn delete_game(
    State(state): State<Arc<AppState>>,
    auth: PublisherUser,
    Path(gid): Path<GameId>,
) -> Result<Json<MessageResponse>, ApiError> {
    let publisher = auth.claims.uid;

    fetch_owned_game(&state, gid, publisher, "delete").await?;

    state.catalog.delete_game(gid).await.map_err(|err| {
        if err.is_not_found() {
            ApiError::NotFound("Game not found or already deleted".to_string())
        } else {
            err.into()
        }
    })?;

    tracing::info!(game = %gid, publisher = %publisher, "Game deleted");
    Ok(Json(MessageResponse::new(format!(
        "Game {gid} deleted successfully"
    ))))
}

/// Profit aggregator response.
#[derive(Debug, Serialize)]
pub struct ProfitsResponse {
    /// The publisher whose profits were aggregated.
    pub publisher_uid: UserId,
    /// Sum of `price × purchase count` over the publisher's currently
    /// approved games.
    pub total_estimated_profits: i64,
}

/// Sum completed purchases' prices across the caller's approved games.
/// One purchase-list call per approved game; linear, no batching.
pub async fn my_profits(
    State(state): State<Arc<AppState>>,
    auth: PublisherUser,
) -> Result<Json<ProfitsResponse>, ApiError> {
    let publisher = auth.claims.uid;

    let games = state.catalog.list_games().await?;
    let mut total: i64 = 0;
    for game in games
        .iter()
        .filter(|g| g.publisher == Some(publisher) && g.is_purchasable())
    {
        let purchases = state.catalog.list_purchases(None, Some(game.gid)).await?;
        total += game.price * purchases.len() as i64;
    }

    Ok(Json(ProfitsResponse {
        publisher_uid: publisher,
        total_estimated_profits: total,
    }))
}

/// Fetch a game and enforce that `publisher` owns it.
async fn fetch_owned_game(
    state: &AppState,
    gid: GameId,
    publisher: UserId,
    action: &str,
) -> Result<Game, ApiError> {
    let game = state.catalog.get_game(gid).await.map_err(|err| {
        if err.is_not_found() {
            ApiError::NotFound("Game not found".to_string())
        } else {
            err.into()
        }
    })?;

    if game.publisher != Some(publisher) {
        return Err(ApiError::Forbidden(format!(
            "You do not have permission to {action} this game"
        )));
    }
    Ok(game)
}

/// Validate a price field: integer, non-negative.
fn validate_price(raw: &Value) -> Result<i64, ApiError> {
    let price = int_field(raw).ok_or_else(|| {
        ApiError::Validation("Invalid price format, must be an integer".to_string())
    })?;
    if price < 0 {
        return Err(ApiError::Validation("Price cannot be negative".to_string()));
    }
    Ok(price)
}

/// The catalog reports name-uniqueness violations as a 500 whose detail
/// mentions the constraint; map that to a 409 for the client.
fn map_duplicate_name(err: &BackendError) -> Option<ApiError> {
    let BackendError::Status {
        status: 500, body, ..
    } = err
    else {
        return None;
    };
    let detail = serde_json::from_str::<Value>(body)
        .ok()?
        .get("detail")?
        .as_str()?
        .to_lowercase();
    if detail.contains("unique constraint") || detail.contains("duplicate key") {
        Some(ApiError::Conflict(
            "A game with this name may already exist".to_string(),
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    #[test]
    fn price_validation() {
        assert_eq!(validate_price(&json!(300)).unwrap(), 300);
        assert_eq!(validate_price(&json!("300")).unwrap(), 300);
        assert_eq!(validate_price(&json!(0)).unwrap(), 0);
        assert!(validate_price(&json!(-1)).is_err());
        assert!(validate_price(&json!("free")).is_err());
        assert!(validate_price(&json!(2.5)).is_err());
    }

    #[test]
    fn duplicate_name_detected_in_catalog_500() {
        let err = BackendError::Status {
            backend: "io_api",
            method: Method::POST,
            path: "/games".into(),
            status: 500,
            body: r#"{"detail": "UNIQUE constraint failed: games.name"}"#.into(),
        };
        assert!(matches!(
            map_duplicate_name(&err),
            Some(ApiError::Conflict(_))
        ));
    }

    #[test]
    fn other_catalog_500s_pass_through() {
        let err = BackendError::Status {
            backend: "io_api",
            method: Method::POST,
            path: "/games".into(),
            status: 500,
            body: r#"{"detail": "disk full"}"#.into(),
        };
        assert!(map_duplicate_name(&err).is_none());

        let err = BackendError::Status {
            backend: "io_api",
            method: Method::POST,
            path: "/games".into(),
            status: 500,
            body: "not json".into(),
        };
        assert!(map_duplicate_name(&err).is_none());
    }
}
