//! Request handlers, one module per route group.

pub mod admin;
pub mod games;
pub mod health;
pub mod library;
pub mod publisher;
pub mod purchase;
pub mod returns;
pub mod wallet;

use serde::Serialize;

/// Plain confirmation message body, shared by several handlers.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Read an integer field that may arrive as a JSON number or a numeric
/// string (clients of the original API sent both).
pub(crate) fn int_field(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
