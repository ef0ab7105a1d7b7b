//! Core types and marketplace policy for the storefront gateway.
//!
//! This crate provides the foundational types shared by the gateway service:
//!
//! - **Identifiers**: `UserId`, `GameId`, `PurchaseId`
//! - **Catalog records**: `Game`, `GameStatus`, `Wallet`, `Purchase`
//! - **Identity**: `Claims` as returned by the identity service
//! - **Policy**: the return-eligibility window and the review state rules
//!
//! # Currency unit
//!
//! Prices and balances are integers in the smallest currency unit, stored as
//! `i64`. All arithmetic is integer arithmetic with no rounding.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod claims;
pub mod game;
pub mod ids;
pub mod purchase;
pub mod wallet;

pub use claims::Claims;
pub use game::{Game, GameStatus};
pub use ids::{GameId, IdError, PurchaseId, UserId};
pub use purchase::{
    check_return_eligibility, parse_purchase_date, Purchase, ReturnDenial,
    MAX_PLAYTIME_FOR_RETURN_HOURS, PURCHASE_DATE_FORMAT, RETURN_WINDOW_HOURS,
};
pub use wallet::Wallet;
