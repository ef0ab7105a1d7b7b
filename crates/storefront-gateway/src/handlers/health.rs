//! Health check handler.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Aggregated status: "healthy" or "unhealthy".
    pub status: &'static str,
    /// Per-dependency status.
    pub dependencies: Dependencies,
}

/// Status of each backend dependency.
#[derive(Debug, Serialize)]
pub struct Dependencies {
    /// Identity service status: "ok" or "error".
    pub auth_api: &'static str,
    /// Catalog/ledger service status: "ok" or "error".
    pub io_api: &'static str,
}

/// Aggregate liveness of both backends: 200 if both are healthy, 503
/// otherwise, reporting each dependency's status either way.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let (auth_ok, io_ok) = tokio::join!(state.identity.health(), state.catalog.health());

    let status = if auth_ok && io_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = HealthResponse {
        status: if auth_ok && io_ok {
            "healthy"
        } else {
            "unhealthy"
        },
        dependencies: Dependencies {
            auth_api: if auth_ok { "ok" } else { "error" },
            io_api: if io_ok { "ok" } else { "error" },
        },
    };

    (status, Json(body))
}
