//! Wallet handlers: balance lookup and the deposit workflow.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use storefront_core::Wallet;

use super::int_field;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Get the caller's wallet.
pub async fn get_wallet(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<Wallet>, ApiError> {
    let uid = auth.claims.uid;
    let wallet = state.catalog.get_wallet(uid).await.map_err(|err| {
        if err.is_not_found() {
            tracing::warn!(user = %uid, "Wallet not found when fetching balance");
            ApiError::NotFound("Wallet not found".to_string())
        } else {
            err.into()
        }
    })?;
    Ok(Json(wallet))
}

/// Deposit workflow: validate the amount, read the current balance, write
/// `current + amount` back. One read and one write, no locking — a
/// concurrent deposit or purchase against the same wallet can interleave.
pub async fn deposit(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<Value>,
) -> Result<Json<Wallet>, ApiError> {
    let Some(raw_amount) = body.get("amount") else {
        return Err(ApiError::Validation("Amount is required".to_string()));
    };
    let amount = int_field(raw_amount).ok_or_else(|| {
        ApiError::Validation("Invalid amount format, must be an integer".to_string())
    })?;
    if amount <= 0 {
        return Err(ApiError::Validation(
            "Deposit amount must be a positive integer".to_string(),
        ));
    }

    let uid = auth.claims.uid;
    let wallet = state.catalog.get_wallet(uid).await.map_err(|err| {
        if err.is_not_found() {
            tracing::error!(user = %uid, "Wallet not found during deposit");
            ApiError::DataIntegrity("User wallet not found. Please contact support.".to_string())
        } else {
            err.into()
        }
    })?;

    let new_balance = wallet
        .balance_or_zero()
        .checked_add(amount)
        .ok_or_else(|| ApiError::Validation("Deposit amount too large".to_string()))?;
    let updated = state.catalog.put_wallet(uid, new_balance).await?;

    tracing::info!(user = %uid, amount, new_balance, "Deposit applied");
    Ok(Json(updated))
}
