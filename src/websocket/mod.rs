//! WebSocket module for Metis
//!
//! Provides the real-time console endpoint:
//! - /console/ws - bidirectional text echo with keepalive pings

pub mod console;

pub use console::console_ws_handler;

use axum::{routing::get, Router};

/// Create the WebSocket router
pub fn websocket_router() -> Router {
    Router::new().route("/console/ws", get(console_ws_handler))
}
