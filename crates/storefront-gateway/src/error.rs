//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use storefront_core::{PurchaseId, MAX_PLAYTIME_FOR_RETURN_HOURS, RETURN_WINDOW_HOURS};

use crate::backend::BackendError;

/// API error type.
///
/// Every workflow boundary converts remote-call failures and malformed-data
/// failures into one of these; a single request's failure never terminates
/// the process.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or invalid credential.
    #[error("{0}")]
    Unauthenticated(&'static str),

    /// Valid credential but insufficient permissions or ownership.
    #[error("{0}")]
    Forbidden(String),

    /// Malformed or missing input.
    #[error("{0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Duplicate purchase of the same game by the same user.
    #[error("Game already purchased")]
    AlreadyOwned,

    /// Conflicting resource state reported by the catalog.
    #[error("{0}")]
    Conflict(String),

    /// Buyer balance is below the game price.
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// The game is not in an approved state.
    #[error("Game is not available for purchase")]
    NotPurchasable,

    /// The 48-hour return window has passed.
    #[error("Return period of {RETURN_WINDOW_HOURS} hours has expired for purchase PID {pid}")]
    ReturnWindowExpired {
        /// The purchase being returned.
        pid: PurchaseId,
    },

    /// Recorded playtime exceeds the returnable maximum.
    #[error(
        "Game (PID: {pid}) played for {hours} hours, exceeding the allowed \
         {MAX_PLAYTIME_FOR_RETURN_HOURS} hours for return"
    )]
    PlaytimeExceeded {
        /// The purchase being returned.
        pid: PurchaseId,
        /// The recorded playtime in hours.
        hours: i64,
    },

    /// A stored record is malformed or a referenced record is missing.
    #[error("{0}")]
    DataIntegrity(String),

    /// The backend answered with a non-success status; propagated where
    /// meaningful.
    #[error("upstream request failed with HTTP {status}")]
    Upstream {
        /// The upstream status code.
        status: u16,
        /// Short description of the failed operation.
        message: String,
    },

    /// The backend timed out or could not be reached.
    #[error("{0}")]
    Unavailable(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, details) = match &self {
            Self::Unauthenticated(_) => (StatusCode::UNAUTHORIZED, "unauthenticated", None),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden", None),
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error", None),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", None),
            Self::AlreadyOwned => (StatusCode::CONFLICT, "already_owned", None),
            Self::Conflict(_) => (StatusCode::CONFLICT, "conflict", None),
            Self::InsufficientFunds => (StatusCode::PAYMENT_REQUIRED, "insufficient_funds", None),
            Self::NotPurchasable => (StatusCode::FORBIDDEN, "not_purchasable", None),
            Self::ReturnWindowExpired { .. } => {
                (StatusCode::FORBIDDEN, "return_window_expired", None)
            }
            Self::PlaytimeExceeded { .. } => (StatusCode::FORBIDDEN, "playtime_exceeded", None),
            Self::DataIntegrity(msg) => {
                tracing::error!(error = %msg, "Data integrity failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "data_integrity", None)
            }
            Self::Upstream { status, message } => {
                tracing::error!(status = *status, error = %message, "Upstream HTTP error");
                (
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                    "upstream_error",
                    Some(serde_json::json!({ "upstream_status": status })),
                )
            }
            Self::Unavailable(msg) => {
                tracing::error!(error = %msg, "Upstream unavailable");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "upstream_unavailable",
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        let message = err.to_string();
        match err {
            BackendError::Timeout { .. } => {
                Self::Unavailable("Upstream service timed out".to_string())
            }
            BackendError::Transport { .. } => {
                Self::Unavailable("Upstream service connection issue".to_string())
            }
            BackendError::Status { status, .. } => Self::Upstream { status, message },
            BackendError::Decode { detail, .. } => Self::DataIntegrity(detail),
        }
    }
}
