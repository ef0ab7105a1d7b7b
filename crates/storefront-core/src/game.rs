//! Game catalog records and the review state rules.

use serde::{Deserialize, Serialize};

use crate::ids::{GameId, UserId};

/// Review status of a game in the catalog.
///
/// A game is created `Pending` by a publisher submission, moved to
/// `Approved` or `Rejected` by an admin, and forced back to `Pending` by
/// any publisher edit to a reviewed game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Awaiting admin review. Not purchasable.
    #[default]
    Pending,
    /// Approved for sale.
    Approved,
    /// Rejected by an admin. Not purchasable.
    Rejected,
}

impl GameStatus {
    /// The status a game ends up in after a publisher edit.
    ///
    /// Editing a reviewed game (approved or rejected) forces it back into
    /// the review queue; editing a pending game leaves it pending. The
    /// result is always `Pending`, but keeping this as a method makes the
    /// reset rule explicit at the call site.
    #[must_use]
    pub fn after_publisher_edit(self) -> Self {
        match self {
            Self::Approved | Self::Rejected | Self::Pending => Self::Pending,
        }
    }

    /// String form as stored by the catalog service.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// A game record as stored by the catalog/ledger service.
///
/// The catalog owns this record; the gateway only reads it and writes the
/// fields its workflows are allowed to change. A record with no `status`
/// field deserializes as `Pending`, which keeps it unpurchasable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    /// The game identifier.
    pub gid: GameId,
    /// Display name.
    pub name: String,
    /// Description text.
    #[serde(default)]
    pub description: Option<String>,
    /// Price in the smallest currency unit. Never negative.
    pub price: i64,
    /// The publishing user. Absent on malformed records; workflows that
    /// move money to the publisher skip and log in that case.
    #[serde(default)]
    pub publisher: Option<UserId>,
    /// Review status.
    #[serde(default)]
    pub status: GameStatus,
}

impl Game {
    /// Whether the game can currently be purchased.
    #[must_use]
    pub fn is_purchasable(&self) -> bool {
        self.status == GameStatus::Approved
    }
}
