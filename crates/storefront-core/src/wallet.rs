//! Wallet records.

use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// A wallet record as stored by the catalog/ledger service.
///
/// One wallet exists per user; the gateway never creates or deletes one.
/// The `balance >= 0` invariant for buyers is enforced by the workflows in
/// this layer (read current balance, never write a negative result), not by
/// the catalog service itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    /// The owning user, when the catalog includes it in the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<UserId>,
    /// Balance in the smallest currency unit. Some catalog responses omit
    /// the field; callers decide whether that is an error or counts as 0.
    #[serde(default)]
    pub balance: Option<i64>,
}

impl Wallet {
    /// Balance, treating a missing field as zero.
    ///
    /// Used for deposits and publisher counter-entries, where the original
    /// system tolerated an absent balance.
    #[must_use]
    pub fn balance_or_zero(&self) -> i64 {
        self.balance.unwrap_or(0)
    }
}
