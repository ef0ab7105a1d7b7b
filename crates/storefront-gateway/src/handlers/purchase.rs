//! Purchase workflow.
//!
//! An ordered sequence of remote calls with no cross-step atomicity:
//! eligibility checks first (no side effects), then the purchase record,
//! then the buyer debit, then a best-effort publisher credit. The
//! uniqueness and funds checks are read-then-act without a lock; two
//! concurrent requests can both pass them. That race exists in the remote
//! service contract and is preserved, not fixed here.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use storefront_core::{GameId, UserId};

use crate::auth::AuthUser;
use crate::backend::BackendError;
use crate::error::ApiError;
use crate::state::AppState;

/// Successful purchase response.
#[derive(Debug, Serialize)]
pub struct PurchaseResponse {
    /// Human-readable outcome.
    pub message: String,
    /// The created purchase record, as returned by the catalog.
    pub purchase_details: Value,
}

/// Run the purchase workflow for the authenticated buyer.
pub async fn purchase_game(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(gid): Path<GameId>,
) -> Result<(StatusCode, Json<PurchaseResponse>), ApiError> {
    let buyer = auth.claims.uid;

    // Step 1: the game must exist and be approved.
    let game = state.catalog.get_game(gid).await.map_err(|err| {
        if err.is_not_found() {
            ApiError::NotFound("Game not found".to_string())
        } else {
            err.into()
        }
    })?;
    if !game.is_purchasable() {
        return Err(ApiError::NotPurchasable);
    }
    let price = game.price;

    // Step 2: at most one purchase per (buyer, game). Read-then-act; a
    // concurrent identical request can slip between this check and the
    // creation below.
    let existing = state.catalog.list_purchases(Some(buyer), Some(gid)).await?;
    if !existing.is_empty() {
        return Err(ApiError::AlreadyOwned);
    }

    // Step 3: sufficient funds.
    let wallet = state.catalog.get_wallet(buyer).await?;
    let balance = wallet.balance.ok_or_else(|| {
        ApiError::DataIntegrity(format!("Wallet record for user {buyer} has no balance"))
    })?;
    if balance < price {
        return Err(ApiError::InsufficientFunds);
    }

    // Step 4: create the purchase record. No wallet has been touched yet,
    // so a failure here aborts cleanly.
    let created = state.catalog.create_purchase(buyer, gid).await?;

    // Step 5: debit the buyer. A failure here leaves the purchase record
    // with no corresponding debit; surfaced to the caller, not corrected.
    state.catalog.put_wallet(buyer, balance - price).await?;

    // Step 6: credit the publisher. Best-effort: the purchase has already
    // succeeded from the buyer's perspective, so this result is logged and
    // never changes the response.
    match game.publisher {
        None => {
            tracing::error!(
                game = %gid,
                buyer = %buyer,
                "Game is missing publisher information; cannot credit publisher for purchase"
            );
        }
        Some(publisher) => match credit_publisher(&state, publisher, price).await {
            Ok(new_balance) => {
                tracing::info!(
                    publisher = %publisher,
                    amount = price,
                    new_balance,
                    game = %gid,
                    buyer = %buyer,
                    "Credited publisher for purchase"
                );
            }
            Err(error) => {
                tracing::error!(
                    publisher = %publisher,
                    amount = price,
                    game = %gid,
                    buyer = %buyer,
                    %error,
                    "Failed to credit publisher for purchase"
                );
            }
        },
    }

    Ok((
        StatusCode::CREATED,
        Json(PurchaseResponse {
            message: "Game purchased successfully".to_string(),
            purchase_details: created,
        }),
    ))
}

/// Publisher counter-entry for a purchase: read the publisher wallet
/// (missing balance counts as 0), write `balance + amount`.
///
/// Returns its own result so the caller can log it; it must never change
/// the buyer-facing outcome.
pub(crate) async fn credit_publisher(
    state: &AppState,
    publisher: UserId,
    amount: i64,
) -> Result<i64, BackendError> {
    let wallet = state.catalog.get_wallet(publisher).await?;
    let new_balance = wallet.balance_or_zero().saturating_add(amount);
    state.catalog.put_wallet(publisher, new_balance).await?;
    Ok(new_balance)
}
