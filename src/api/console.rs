//! Console introspection endpoints
//!
//! GET /console/status - console liveness + store statistics
//! GET /console/logs   - stub log lines

use axum::extract::Query;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use metis_store::{MemoryStore, StoreStats};

use crate::server::AppConfig;

/// Console liveness payload
#[derive(Debug, Serialize)]
pub struct ConsoleStatusResponse {
    pub status: &'static str,
    pub endpoint: &'static str,
    pub version: String,
    pub store: StoreStats,
}

/// Stub log listing
#[derive(Debug, Serialize)]
pub struct LogsResponse {
    pub logs: Vec<String>,
    pub total: usize,
    pub limit: usize,
}

#[derive(Debug, Deserialize)]
pub struct LogsParams {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

const MAX_LOG_LINES: usize = 50;

/// Get console status
async fn console_status(
    Extension(config): Extension<Arc<AppConfig>>,
    Extension(store): Extension<Arc<MemoryStore>>,
) -> Json<ConsoleStatusResponse> {
    Json(ConsoleStatusResponse {
        status: "operational",
        endpoint: "console",
        version: config.api.version.clone(),
        store: store.stats().await,
    })
}

/// Get system logs (placeholder lines)
async fn get_logs(Query(params): Query<LogsParams>) -> Json<LogsResponse> {
    let logs: Vec<String> = (0..params.limit.min(MAX_LOG_LINES))
        .map(|i| format!("[LOG {i}] System message"))
        .collect();
    Json(LogsResponse {
        logs,
        total: MAX_LOG_LINES,
        limit: params.limit,
    })
}

/// Create console routes
pub fn console_routes() -> Router {
    Router::new()
        .route("/console/status", get(console_status))
        .route("/console/logs", get(get_logs))
}
