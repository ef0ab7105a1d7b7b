//! Identity claims as returned by the identity service.

use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// Claims attached to a validated credential.
///
/// Produced by the identity service's `/validate` endpoint and attached to
/// the request's processing context by the auth extractors. Never mutated
/// here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated user.
    pub uid: UserId,
    /// Whether the user holds the admin role.
    #[serde(default)]
    pub is_admin: bool,
    /// Whether the user holds the publisher role.
    #[serde(default)]
    pub is_publisher: bool,
}
