//! Authentication extractors.
//!
//! This module provides extractors parameterized by role requirement:
//! - `AuthUser` - any authenticated user
//! - `PublisherUser` - authenticated user holding the publisher role
//! - `AdminUser` - authenticated user holding the admin role
//!
//! Each extractor calls the identity service's `/validate` endpoint once,
//! before the handler body runs, and carries the resulting claims into the
//! handler. Missing credential and failed validation both reject with 401;
//! a missing role rejects with 403.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use storefront_core::Claims;

use crate::error::ApiError;
use crate::state::AppState;

/// Cookie used by older clients to carry the credential.
const AUTH_COOKIE: &str = "auth_token";

/// An authenticated user.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Claims returned by the identity service.
    pub claims: Claims,
}

/// An authenticated user holding the publisher role.
#[derive(Debug, Clone)]
pub struct PublisherUser {
    /// Claims returned by the identity service.
    pub claims: Claims,
}

/// An authenticated user holding the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser {
    /// Claims returned by the identity service.
    pub claims: Claims,
}

/// Pull the opaque credential token out of the request.
///
/// `Authorization: Bearer <token>` wins; the `auth_token` cookie is kept as
/// a fallback for older clients.
fn extract_token(parts: &Parts) -> Option<String> {
    if let Some(token) = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        let token = token.trim();
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }

    parts
        .headers
        .get("cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|pair| {
                pair.trim()
                    .strip_prefix(AUTH_COOKIE)
                    .and_then(|rest| rest.strip_prefix('='))
                    .map(str::to_string)
            })
        })
        .filter(|t| !t.is_empty())
}

/// Validate the request's credential against the identity service.
async fn authenticate(parts: &Parts, state: &AppState) -> Result<Claims, ApiError> {
    let token =
        extract_token(parts).ok_or(ApiError::Unauthenticated("Authentication token required"))?;

    state
        .identity
        .validate(&token)
        .await
        .ok_or(ApiError::Unauthenticated("Invalid or expired token"))
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Self, Self::Rejection>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let claims = authenticate(parts, state).await?;
            Ok(AuthUser { claims })
        })
    }
}

impl FromRequestParts<Arc<AppState>> for PublisherUser {
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Self, Self::Rejection>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let claims = authenticate(parts, state).await?;
            if !claims.is_publisher {
                return Err(ApiError::Forbidden(
                    "Publisher privileges required".to_string(),
                ));
            }
            Ok(PublisherUser { claims })
        })
    }
}

impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Self, Self::Rejection>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let claims = authenticate(parts, state).await?;
            if !claims.is_admin {
                return Err(ApiError::Forbidden("Admin privileges required".to_string()));
            }
            Ok(AdminUser { claims })
        })
    }
}
