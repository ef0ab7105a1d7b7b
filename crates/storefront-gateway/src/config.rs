//! Gateway configuration.

use std::time::Duration;

/// Timeout budget for identity-service validation calls.
pub const IDENTITY_CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout budget for catalog/ledger calls.
pub const CATALOG_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout budget for liveness probes against either backend.
pub const HEALTH_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Gateway configuration loaded from environment variables.
///
/// Constructed once at startup and passed into [`crate::AppState`]; nothing
/// reads the environment after that.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Base URL of the identity service, e.g. `http://auth:9000`.
    pub auth_base_url: String,

    /// Base URL of the catalog/ledger service, e.g. `http://io:9001`.
    pub io_base_url: String,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("{0} environment variable is not set")]
    MissingVar(&'static str),
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingVar` when any of `AUTH_API_HOST`,
    /// `AUTH_API_PORT`, `IO_API_HOST`, `IO_API_PORT` is absent. The caller
    /// treats that as startup-fatal.
    pub fn from_env() -> Result<Self, ConfigError> {
        let auth_host = require_var("AUTH_API_HOST")?;
        let auth_port = require_var("AUTH_API_PORT")?;
        let io_host = require_var("IO_API_HOST")?;
        let io_port = require_var("IO_API_PORT")?;

        Ok(Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            auth_base_url: format!("http://{auth_host}:{auth_port}"),
            io_base_url: format!("http://{io_host}:{io_port}"),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024), // 1MB
            request_timeout_seconds: std::env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingVar(name))
}
