//! Clients for the two remote backends.
//!
//! [`Backend`] is the generic request/response wrapper; [`IdentityClient`]
//! and [`CatalogClient`] layer typed operations on top of it. Every call is
//! exactly one network round trip with a fixed timeout budget — no retries,
//! no caching.

mod catalog;
mod identity;

pub use catalog::CatalogClient;
pub use identity::IdentityClient;

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;

use crate::config::HEALTH_PROBE_TIMEOUT;

/// Error type for backend calls.
///
/// Non-success statuses keep the upstream status and body so callers can
/// branch on 404 versus other codes and surface the upstream status to
/// their own caller.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The call exceeded its timeout budget.
    #[error("timeout calling {backend}: {method} {path}")]
    Timeout {
        /// Backend name, for logging.
        backend: &'static str,
        /// HTTP method of the failed call.
        method: Method,
        /// Path of the failed call.
        path: String,
    },

    /// The backend answered with a non-success status.
    #[error("{backend} returned HTTP {status} for {method} {path}")]
    Status {
        /// Backend name, for logging.
        backend: &'static str,
        /// HTTP method of the failed call.
        method: Method,
        /// Path of the failed call.
        path: String,
        /// The upstream status code.
        status: u16,
        /// The upstream response body, as text.
        body: String,
    },

    /// Connection-level failure.
    #[error("transport error calling {backend}: {source}")]
    Transport {
        /// Backend name, for logging.
        backend: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered 2xx but the payload did not match the expected
    /// shape.
    #[error("{backend} returned a malformed payload for {method} {path}: {detail}")]
    Decode {
        /// Backend name, for logging.
        backend: &'static str,
        /// HTTP method of the call.
        method: Method,
        /// Path of the call.
        path: String,
        /// What failed to decode.
        detail: String,
    },
}

impl BackendError {
    /// Whether this is an upstream 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Status {
                status: 404,
                ..
            }
        )
    }
}

/// Generic synchronous request/response wrapper around one remote backend.
#[derive(Debug, Clone)]
pub struct Backend {
    name: &'static str,
    client: Client,
    base_url: String,
}

impl Backend {
    /// Create a backend client with a fixed per-call timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built (should not happen with
    /// default settings).
    pub fn new(name: &'static str, base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            name,
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Backend name, for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Perform one call against the backend.
    ///
    /// On success with a JSON body, returns the parsed value; a non-JSON
    /// body comes back as `Value::String` with a warning logged; an empty
    /// body comes back as `Value::Null`.
    ///
    /// # Errors
    ///
    /// See [`BackendError`]. Non-success statuses and timeouts are logged
    /// here with full call context before being returned.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value, BackendError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(
            backend = self.name,
            method = %method,
            %url,
            ?query,
            "Backend request"
        );

        let mut request = self.client.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(json) = body {
            request = request.json(json);
        }

        let response = request.send().await.map_err(|source| {
            if source.is_timeout() {
                tracing::error!(backend = self.name, %method, path, "Backend call timed out");
                BackendError::Timeout {
                    backend: self.name,
                    method: method.clone(),
                    path: path.to_string(),
                }
            } else {
                tracing::error!(backend = self.name, %method, path, error = %source, "Backend call failed");
                BackendError::Transport {
                    backend: self.name,
                    source,
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                backend = self.name,
                %method,
                path,
                status = status.as_u16(),
                body = %truncate(&body, 200),
                "Backend returned error status"
            );
            return Err(BackendError::Status {
                backend: self.name,
                method,
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        let text = response.text().await.map_err(|source| BackendError::Transport {
            backend: self.name,
            source,
        })?;

        if text.is_empty() {
            return Ok(Value::Null);
        }

        if is_json {
            serde_json::from_str(&text).map_err(|e| BackendError::Decode {
                backend: self.name,
                method,
                path: path.to_string(),
                detail: format!("invalid JSON: {e}"),
            })
        } else {
            tracing::warn!(
                backend = self.name,
                %method,
                path,
                body = %truncate(&text, 100),
                "Backend response is not JSON"
            );
            Ok(Value::String(text))
        }
    }

    /// Probe the backend's `/health` endpoint with the short liveness
    /// budget, regardless of this client's per-call timeout.
    pub async fn probe_health(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self
            .client
            .get(&url)
            .timeout(HEALTH_PROBE_TIMEOUT)
            .send()
            .await
        {
            Ok(response) if response.status() == StatusCode::OK => true,
            Ok(response) => {
                tracing::warn!(
                    backend = self.name,
                    status = response.status().as_u16(),
                    "Health probe returned non-OK status"
                );
                false
            }
            Err(error) => {
                tracing::warn!(backend = self.name, %error, "Health probe failed");
                false
            }
        }
    }
}

/// Decode a backend payload into a typed value.
pub(crate) fn decode<T: serde::de::DeserializeOwned>(
    backend: &Backend,
    method: Method,
    path: &str,
    value: Value,
) -> Result<T, BackendError> {
    serde_json::from_value(value).map_err(|e| BackendError::Decode {
        backend: backend.name(),
        method,
        path: path.to_string(),
        detail: format!("unexpected payload shape: {e}"),
    })
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_trims_trailing_slash() {
        let backend = Backend::new("io", "http://localhost:9001/", Duration::from_secs(10));
        assert_eq!(backend.base_url, "http://localhost:9001");
    }

    #[test]
    fn not_found_detection() {
        let err = BackendError::Status {
            backend: "io",
            method: Method::GET,
            path: "/games/7".into(),
            status: 404,
            body: String::new(),
        };
        assert!(err.is_not_found());

        let err = BackendError::Status {
            backend: "io",
            method: Method::GET,
            path: "/games/7".into(),
            status: 500,
            body: String::new(),
        };
        assert!(!err.is_not_found());
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("hi", 10), "hi");
    }
}
