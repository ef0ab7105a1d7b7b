//! Application state.

use crate::backend::{CatalogClient, IdentityClient};
use crate::config::GatewayConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration.
    pub config: GatewayConfig,

    /// Identity service client.
    pub identity: IdentityClient,

    /// Catalog/ledger service client.
    pub catalog: CatalogClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        let identity = IdentityClient::new(&config.auth_base_url);
        let catalog = CatalogClient::new(&config.io_base_url);

        Self {
            config,
            identity,
            catalog,
        }
    }
}
