//! Purchase records and the return-eligibility policy.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{GameId, PurchaseId, UserId};

/// How long after purchase a return is still accepted.
pub const RETURN_WINDOW_HOURS: i64 = 48;

/// Maximum recorded playtime (hours) for a purchase to remain returnable.
pub const MAX_PLAYTIME_FOR_RETURN_HOURS: i64 = 2;

/// Calendar format of the timestamp the catalog service stores on purchase
/// records, e.g. `Tue, 01 Jul 2025 09:30:00 GMT`. Always UTC.
pub const PURCHASE_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// A purchase record as stored by the catalog/ledger service.
///
/// Created by a successful purchase workflow, destroyed by a successful
/// return. At most one exists per (user, game) under normal operation;
/// that uniqueness is enforced only by a read-then-act check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    /// The purchase identifier.
    pub pid: PurchaseId,
    /// The buying user.
    pub user_id: UserId,
    /// The purchased game. Absent on corrupted records.
    #[serde(default)]
    pub game_id: Option<GameId>,
    /// Display name of the game, when the catalog denormalizes it.
    #[serde(default)]
    pub game_name: Option<String>,
    /// Purchase timestamp in [`PURCHASE_DATE_FORMAT`].
    #[serde(default)]
    pub date: Option<String>,
    /// Recorded playtime in whole hours. Missing counts as 0.
    #[serde(default)]
    pub hours_played: Option<i64>,
}

impl Purchase {
    /// Recorded playtime, treating a missing field as zero.
    #[must_use]
    pub fn hours_played_or_zero(&self) -> i64 {
        self.hours_played.unwrap_or(0)
    }
}

/// Why a return request was denied by policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnDenial {
    /// More than [`RETURN_WINDOW_HOURS`] have passed since purchase.
    WindowExpired,
    /// Recorded playtime exceeds [`MAX_PLAYTIME_FOR_RETURN_HOURS`].
    PlaytimeExceeded(i64),
}

/// Parse a purchase timestamp as stored by the catalog service.
///
/// # Errors
///
/// Returns the chrono parse error when the string does not match
/// [`PURCHASE_DATE_FORMAT`]. Callers treat that as a data-integrity
/// failure rather than guessing at the format.
pub fn parse_purchase_date(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, PURCHASE_DATE_FORMAT).map(|naive| naive.and_utc())
}

/// Check whether a purchase is still returnable at `now`.
///
/// The window check runs before the playtime check, so a purchase that is
/// both stale and over-played reports `WindowExpired`.
///
/// # Errors
///
/// Returns the applicable [`ReturnDenial`] when the purchase is no longer
/// eligible.
pub fn check_return_eligibility(
    purchased_at: DateTime<Utc>,
    hours_played: i64,
    now: DateTime<Utc>,
) -> Result<(), ReturnDenial> {
    if now > purchased_at + TimeDelta::hours(RETURN_WINDOW_HOURS) {
        return Err(ReturnDenial::WindowExpired);
    }
    if hours_played > MAX_PLAYTIME_FOR_RETURN_HOURS {
        return Err(ReturnDenial::PlaytimeExceeded(hours_played));
    }
    Ok(())
}
