//! Storefront gateway HTTP service.
//!
//! A transaction-orchestration layer between client requests and two
//! independent backends: an identity service and a catalog/ledger service.
//! Neither backend offers cross-resource transactions, so this layer
//! enforces the marketplace invariants itself through small, ordered
//! sequences of remote calls:
//!
//! - a game must be approved to be purchasable
//! - a user holds at most one purchase per game
//! - a purchase is refundable only inside a 48-hour / 2-hour-playtime window
//! - a publisher's edit to a reviewed game forces it back to pending review
//! - buyer wallet balances never go negative through this layer's writes
//!
//! # Atomicity
//!
//! There is none beyond what sequential remote calls and logging provide.
//! Partial failures leave defined, documented intermediate states; the
//! workflow modules spell out where.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::cast_possible_wrap)] // purchase counts fit comfortably in i64

pub mod auth;
pub mod backend;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use backend::{Backend, BackendError, CatalogClient, IdentityClient};
pub use config::{ConfigError, GatewayConfig};
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
