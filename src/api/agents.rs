//! Agent management and execution endpoints
//!
//! GET  /agents/list                          - registered names
//! GET  /agents/status                        - full controller status
//! GET  /agents/status/{name}                 - single agent status
//! POST /agents/register?name=...             - register an echo agent
//! POST /agents/unregister?name=...           - remove an agent
//! POST /agents/run                           - concurrent dispatch
//! POST /agents/upgrade-request               - submit a proposal
//! GET  /agents/upgrade-requests              - list proposals
//! POST /agents/upgrade-requests/{id}/approve - approve a proposal
//! POST /agents/upgrade-requests/{id}/reject  - reject a proposal

use axum::extract::{Path, Query};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use metis_core::{
    Context, Controller, ControllerStatus, DispatchResult, EchoAgent, UpgradeRequest,
};

use super::core_error_response;

/// Agent execution request
#[derive(Debug, Deserialize)]
pub struct RunAgentsRequest {
    pub prompt: String,
    #[serde(default)]
    pub context: Context,
    #[serde(default)]
    pub target_agents: Option<Vec<String>>,
}

/// Agent execution response
#[derive(Debug, Serialize)]
pub struct RunAgentsResponse {
    pub prompt: String,
    pub results: Vec<DispatchResult>,
    pub total_results: usize,
}

/// Registered-agents summary
#[derive(Debug, Serialize)]
pub struct ListAgentsResponse {
    pub agents: Vec<String>,
    pub total: usize,
    pub status: &'static str,
}

/// Registration / unregistration confirmation
#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub agent: String,
    pub status: &'static str,
    pub total_agents: usize,
}

/// Upgrade submission body
#[derive(Debug, Deserialize)]
pub struct UpgradeSubmission {
    pub user: String,
    pub proposal: String,
}

/// Upgrade-request listing
#[derive(Debug, Serialize)]
pub struct UpgradeListResponse {
    pub upgrade_requests: Vec<UpgradeRequest>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct AgentNameParams {
    pub name: String,
}

/// List all registered agents
async fn list_agents(Extension(controller): Extension<Arc<Controller>>) -> Json<ListAgentsResponse> {
    let agents = controller.agent_names().await;
    let total = agents.len();
    Json(ListAgentsResponse {
        agents,
        total,
        status: "active",
    })
}

/// Get all agents status
async fn agents_status(
    Extension(controller): Extension<Arc<Controller>>,
) -> Json<ControllerStatus> {
    Json(controller.status().await)
}

/// Get specific agent status
async fn agent_status(
    Extension(controller): Extension<Arc<Controller>>,
    Path(name): Path<String>,
) -> Response {
    match controller.agent_status(&name).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => core_error_response(e),
    }
}

/// Register a new default-behavior agent
async fn register_agent(
    Extension(controller): Extension<Arc<Controller>>,
    Query(params): Query<AgentNameParams>,
) -> Response {
    match controller
        .register(Arc::new(EchoAgent::new(params.name.clone())))
        .await
    {
        Ok(total_agents) => Json(RegistrationResponse {
            agent: params.name,
            status: "registered",
            total_agents,
        })
        .into_response(),
        Err(e) => core_error_response(e),
    }
}

/// Unregister an agent
async fn unregister_agent(
    Extension(controller): Extension<Arc<Controller>>,
    Query(params): Query<AgentNameParams>,
) -> Response {
    match controller.unregister(&params.name).await {
        Ok(total_agents) => Json(RegistrationResponse {
            agent: params.name,
            status: "unregistered",
            total_agents,
        })
        .into_response(),
        Err(e) => core_error_response(e),
    }
}

/// Execute agents with a prompt
async fn run_agents(
    Extension(controller): Extension<Arc<Controller>>,
    Json(request): Json<RunAgentsRequest>,
) -> Json<RunAgentsResponse> {
    let results = controller
        .run_agents(
            &request.prompt,
            &request.context,
            request.target_agents.as_deref(),
        )
        .await;
    Json(RunAgentsResponse {
        prompt: request.prompt,
        total_results: results.len(),
        results,
    })
}

/// Submit an upgrade request
async fn submit_upgrade(
    Extension(controller): Extension<Arc<Controller>>,
    Json(submission): Json<UpgradeSubmission>,
) -> Json<UpgradeRequest> {
    Json(
        controller
            .submit_upgrade(&submission.user, &submission.proposal)
            .await,
    )
}

/// List upgrade requests
async fn list_upgrades(
    Extension(controller): Extension<Arc<Controller>>,
) -> Json<UpgradeListResponse> {
    let upgrade_requests = controller.upgrade_requests().await;
    let total = upgrade_requests.len();
    Json(UpgradeListResponse {
        upgrade_requests,
        total,
    })
}

/// Approve an upgrade request
async fn approve_upgrade(
    Extension(controller): Extension<Arc<Controller>>,
    Path(id): Path<usize>,
) -> Response {
    match controller.approve_upgrade(id).await {
        Ok(request) => Json(request).into_response(),
        Err(e) => core_error_response(e),
    }
}

/// Reject an upgrade request
async fn reject_upgrade(
    Extension(controller): Extension<Arc<Controller>>,
    Path(id): Path<usize>,
) -> Response {
    match controller.reject_upgrade(id).await {
        Ok(request) => Json(request).into_response(),
        Err(e) => core_error_response(e),
    }
}

/// Create agent routes
pub fn agents_routes() -> Router {
    Router::new()
        .route("/agents/list", get(list_agents))
        .route("/agents/status", get(agents_status))
        .route("/agents/status/:name", get(agent_status))
        .route("/agents/register", post(register_agent))
        .route("/agents/unregister", post(unregister_agent))
        .route("/agents/run", post(run_agents))
        .route("/agents/upgrade-request", post(submit_upgrade))
        .route("/agents/upgrade-requests", get(list_upgrades))
        .route("/agents/upgrade-requests/:id/approve", post(approve_upgrade))
        .route("/agents/upgrade-requests/:id/reject", post(reject_upgrade))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_app() -> (Router, Arc<Controller>) {
        let controller = Arc::new(Controller::default());
        let app = Router::new()
            .merge(agents_routes())
            .layer(Extension(controller.clone()));
        (app, controller)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_register_then_list() {
        let (app, _) = test_app();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/agents/register?name=Aelira")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "registered");
        assert_eq!(json["total_agents"], 1);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/agents/list")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["agents"], serde_json::json!(["Aelira"]));
        assert_eq!(json["total"], 1);
    }

    #[tokio::test]
    async fn test_run_agents_round_trip() {
        let (app, controller) = test_app();
        controller
            .register(Arc::new(EchoAgent::new("Zyra")))
            .await
            .unwrap();

        let body = serde_json::json!({
            "prompt": "hello",
            "context": {"user": "alice"},
        });
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/agents/run")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["total_results"], 1);
        assert_eq!(json["results"][0]["status"], "success");
        assert_eq!(json["results"][0]["agent"], "Zyra");
    }

    #[tokio::test]
    async fn test_unknown_agent_status_is_404() {
        let (app, _) = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/agents/status/Ghost")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Agent Ghost not found");
    }

    #[tokio::test]
    async fn test_upgrade_request_flow() {
        let (app, _) = test_app();

        let body = serde_json::json!({"user": "alice", "proposal": "add memory"});
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/agents/upgrade-request")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["id"], 0);
        assert_eq!(json["status"], "pending");

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/agents/upgrade-requests/0/approve")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["status"], "approved");

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/agents/upgrade-requests/5/reject")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
