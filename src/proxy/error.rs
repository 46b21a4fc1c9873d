//! Gateway error taxonomy and response translation
//!
//! Every failure a handler can hit maps onto one of four variants, each with
//! a fixed client-facing body of the shape `{error, details?}`. Raw causes
//! are logged here at the translation point and never leak to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors surfaced to gateway clients
#[derive(Debug)]
pub(crate) enum ProxyError {
    /// A required provider credential is absent - named by its env var
    MissingKey(&'static str),
    /// The caller's request failed validation
    BadRequest(&'static str),
    /// The provider answered with a non-success status
    Provider {
        label: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },
    /// The provider could not be reached, or broke the wire contract
    Transport {
        label: &'static str,
        source: reqwest::Error,
    },
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ProxyError::MissingKey(name) => {
                tracing::error!("{} is not set, refusing to call upstream", name);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": format!("{} not configured", name) }),
                )
            }
            ProxyError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ProxyError::Provider {
                label,
                status,
                body,
            } => {
                tracing::error!("{} error: {} {}", label, status, body);
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "error": format!("{} error", label), "details": body }),
                )
            }
            ProxyError::Transport { label, source } => {
                tracing::error!("{} request failed: {}", label, source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
