//! Identity service client.

use reqwest::Method;
use serde_json::json;

use storefront_core::Claims;

use super::Backend;
use crate::config::IDENTITY_CALL_TIMEOUT;

/// Client for the identity service.
///
/// Token issuance and validation live entirely in that service; this client
/// only consumes the `/validate` endpoint.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    backend: Backend,
}

impl IdentityClient {
    /// Create a client for the identity service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            backend: Backend::new("auth_api", base_url, IDENTITY_CALL_TIMEOUT),
        }
    }

    /// Validate a credential token.
    ///
    /// Returns the claims on success, or `None` on any failure — invalid
    /// token, non-success status, timeout, transport error, malformed
    /// payload. The gate itself treats all failures identically; callers
    /// classify the outcome (missing credential vs failed validation).
    pub async fn validate(&self, token: &str) -> Option<Claims> {
        let body = json!({ "auth_token": token });
        match self
            .backend
            .call(Method::POST, "/validate", &[], Some(&body))
            .await
        {
            Ok(value) => match serde_json::from_value::<Claims>(value) {
                Ok(claims) => Some(claims),
                Err(error) => {
                    tracing::warn!(%error, "Auth API validation response was malformed");
                    None
                }
            },
            Err(error) => {
                tracing::warn!(%error, "Auth API validation failed for token");
                None
            }
        }
    }

    /// Liveness probe.
    pub async fn health(&self) -> bool {
        self.backend.probe_health().await
    }
}
