//! Return/refund workflow.
//!
//! Eligibility checks run first and have no side effects. The purchase
//! record is deleted *before* the refund is credited: once the deletion
//! succeeds the workflow is committed to refunding and does not re-create
//! the purchase if the credit fails. That ordering means a failed credit
//! loses money with no recorded purchase; it is specified behavior,
//! preserved rather than reordered.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;

use storefront_core::{
    check_return_eligibility, parse_purchase_date, PurchaseId, ReturnDenial, UserId,
};

use super::MessageResponse;
use crate::auth::AuthUser;
use crate::backend::BackendError;
use crate::error::ApiError;
use crate::state::AppState;

/// Run the return workflow for the authenticated requester.
pub async fn return_purchase(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(pid): Path<PurchaseId>,
) -> Result<Json<MessageResponse>, ApiError> {
    let requester = auth.claims.uid;

    // Step 1: the purchase must exist and belong to the requester.
    let purchase = state.catalog.get_purchase(pid).await.map_err(|err| {
        if err.is_not_found() {
            ApiError::NotFound(format!("Purchase record PID {pid} not found"))
        } else {
            err.into()
        }
    })?;
    if purchase.user_id != requester {
        return Err(ApiError::Forbidden(
            "This purchase does not belong to you".to_string(),
        ));
    }

    // Step 2: parse the stored timestamp. An unparsable date is a
    // data-integrity failure, not something to guess around.
    let purchased_at = purchase
        .date
        .as_deref()
        .and_then(|raw| {
            parse_purchase_date(raw)
                .map_err(|error| {
                    tracing::error!(
                        purchase = %pid,
                        date = raw,
                        %error,
                        "Could not parse purchase date; investigate IO API date format"
                    );
                })
                .ok()
        })
        .ok_or_else(|| {
            ApiError::DataIntegrity(
                "Invalid purchase date format in record, cannot process return".to_string(),
            )
        })?;

    // Step 3: eligibility window, then playtime.
    let hours_played = purchase.hours_played_or_zero();
    match check_return_eligibility(purchased_at, hours_played, Utc::now()) {
        Ok(()) => {}
        Err(ReturnDenial::WindowExpired) => {
            return Err(ApiError::ReturnWindowExpired { pid });
        }
        Err(ReturnDenial::PlaytimeExceeded(hours)) => {
            return Err(ApiError::PlaytimeExceeded { pid, hours });
        }
    }

    // Step 4: the associated game, for its price and publisher.
    let game_id = purchase.game_id.ok_or_else(|| {
        tracing::error!(purchase = %pid, "Purchase record is missing game_id; cannot process return");
        ApiError::DataIntegrity("Corrupted purchase record: missing game ID".to_string())
    })?;
    let game = state.catalog.get_game(game_id).await.map_err(|err| {
        if err.is_not_found() {
            tracing::error!(game = %game_id, purchase = %pid, "Game not found during return processing");
            ApiError::DataIntegrity(
                "Associated game data not found, cannot process refund".to_string(),
            )
        } else {
            err.into()
        }
    })?;
    let price = game.price;

    // Step 5: delete the purchase record. Point of no return.
    state.catalog.delete_purchase(pid).await?;

    // Step 6: credit the buyer. The purchase is already gone, so a failure
    // here is a genuine inconsistency; surfaced, not auto-corrected.
    let wallet = state.catalog.get_wallet(requester).await?;
    let balance = wallet.balance.ok_or_else(|| {
        ApiError::DataIntegrity(format!("Wallet record for user {requester} has no balance"))
    })?;
    let refunded = balance.checked_add(price).ok_or_else(|| {
        ApiError::DataIntegrity(format!(
            "Wallet balance for user {requester} would overflow on refund"
        ))
    })?;
    state.catalog.put_wallet(requester, refunded).await?;
    tracing::info!(
        user = %requester,
        amount = price,
        purchase = %pid,
        "Refund credited to user"
    );

    // Step 7: debit the publisher. Best-effort, no floor at zero.
    match game.publisher {
        None => {
            tracing::error!(
                game = %game_id,
                purchase = %pid,
                user = %requester,
                "Game is missing publisher information; cannot debit publisher for return"
            );
        }
        Some(publisher) => match debit_publisher(&state, publisher, price).await {
            Ok(new_balance) => {
                tracing::info!(
                    publisher = %publisher,
                    amount = price,
                    new_balance,
                    game = %game_id,
                    purchase = %pid,
                    user = %requester,
                    "Debited publisher for returned game"
                );
            }
            Err(error) => {
                tracing::error!(
                    publisher = %publisher,
                    amount = price,
                    game = %game_id,
                    purchase = %pid,
                    user = %requester,
                    %error,
                    "Failed to debit publisher for returned game"
                );
            }
        },
    }

    Ok(Json(MessageResponse::new(
        "Game returned successfully. Refund processed.",
    )))
}

/// Publisher counter-entry for a return: read the publisher wallet
/// (missing balance counts as 0), write `balance - amount`. May drive the
/// publisher balance negative; no floor is applied.
async fn debit_publisher(
    state: &AppState,
    publisher: UserId,
    amount: i64,
) -> Result<i64, BackendError> {
    let wallet = state.catalog.get_wallet(publisher).await?;
    let new_balance = wallet.balance_or_zero().saturating_sub(amount);
    state.catalog.put_wallet(publisher, new_balance).await?;
    Ok(new_balance)
}
