//! Web API module for Metis
//!
//! Provides REST endpoints for:
//! - Agent management, dispatch, and upgrade requests (`/agents/...`)
//! - Chat stubs backed by the in-memory store (`/chat/...`)
//! - Console introspection (`/console/...`)
//! - Root/health/config aggregation (`/`, `/health`, `/config`)

pub mod agents;
pub mod chat;
pub mod console;
pub mod meta;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde::Serialize;

pub use agents::agents_routes;
pub use chat::chat_routes;
pub use console::console_routes;
pub use meta::meta_routes;

/// Create the API router with all endpoints
pub fn api_router() -> Router {
    Router::new()
        .merge(meta_routes())
        .merge(agents_routes())
        .merge(chat_routes())
        .merge(console_routes())
}

/// Structured error payload (`{"error": "..."}`)
#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

/// Map a core error value to its HTTP representation.
///
/// Not-found conditions become 404s; the registry capacity limit is a
/// conflict. This is the only place core errors turn into status codes.
pub(crate) fn core_error_response(err: metis_core::Error) -> Response {
    let status = match err {
        metis_core::Error::AgentNotFound { .. } | metis_core::Error::RequestNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        metis_core::Error::AgentLimitReached { .. } => StatusCode::CONFLICT,
    };
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
        .into_response()
}
