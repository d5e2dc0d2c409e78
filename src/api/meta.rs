//! Root, health, and config endpoints
//!
//! GET /       - API info and endpoint map
//! GET /health - liveness for load balancers
//! GET /config - sanitized configuration view

use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use metis_core::Controller;

use crate::server::config::ConfigView;
use crate::server::AppConfig;

/// Root payload
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub app: String,
    pub version: String,
    pub status: &'static str,
    pub endpoints: EndpointMap,
}

/// Top-level endpoint prefixes
#[derive(Debug, Serialize)]
pub struct EndpointMap {
    pub console: &'static str,
    pub chat: &'static str,
    pub agents: &'static str,
}

/// Health payload
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub agents_available: usize,
    pub controller: &'static str,
}

/// Root endpoint - API info
async fn root(Extension(config): Extension<Arc<AppConfig>>) -> Json<RootResponse> {
    Json(RootResponse {
        app: config.api.title.clone(),
        version: config.api.version.clone(),
        status: "active",
        endpoints: EndpointMap {
            console: "/console",
            chat: "/chat",
            agents: "/agents",
        },
    })
}

/// Health check endpoint
async fn health(Extension(controller): Extension<Arc<Controller>>) -> Json<HealthResponse> {
    let status = controller.status().await;
    Json(HealthResponse {
        status: "healthy",
        agents_available: status.total_agents,
        controller: status.controller_status,
    })
}

/// Get API configuration
async fn get_config(Extension(config): Extension<Arc<AppConfig>>) -> Json<ConfigView> {
    Json(config.sanitized())
}

/// Create meta routes
pub fn meta_routes() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/config", get(get_config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_app() -> Router {
        Router::new()
            .merge(meta_routes())
            .layer(Extension(Arc::new(Controller::default())))
            .layer(Extension(Arc::new(AppConfig::default())))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root_lists_endpoints() {
        let response = test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["app"], "Metis API");
        assert_eq!(json["endpoints"]["agents"], "/agents");
    }

    #[tokio::test]
    async fn test_health_reports_agent_count() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["agents_available"], 0);
        assert_eq!(json["controller"], "active");
    }

    #[tokio::test]
    async fn test_config_is_sanitized() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/config")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["api_title"], "Metis API");
        assert_eq!(json["llm_providers"]["openai"], false);
        assert!(json.get("openai_api_key").is_none());
    }
}
