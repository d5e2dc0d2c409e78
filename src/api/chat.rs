//! Chat endpoints
//!
//! Stateless stubs over the store and the provider chain:
//! POST /chat/send    - store the message, answer with a generated echo
//! GET  /chat/history - stored messages (most recent `limit`)
//! POST /chat/clear   - drop the stored history

use axum::extract::Query;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use metis_llm::{GenerateOptions, ProviderRouter};
use metis_store::{ExecutionStatus, MemoryStore, MessageRecord};

/// All chat traffic shares one process-lifetime conversation.
const CHAT_CONVERSATION: &str = "main";

/// Chat message body
#[derive(Debug, Deserialize)]
pub struct ChatMessageRequest {
    pub text: String,
    #[serde(default = "default_sender")]
    pub sender: String,
    #[serde(default = "default_character")]
    pub character: String,
}

fn default_sender() -> String {
    "user".to_string()
}

fn default_character() -> String {
    "aelira".to_string()
}

/// Chat send receipt
#[derive(Debug, Serialize)]
pub struct ChatSendResponse {
    pub status: &'static str,
    pub message: String,
    pub sender: String,
    pub character: String,
    pub response: String,
    pub provider: Option<String>,
}

/// Chat history page
#[derive(Debug, Serialize)]
pub struct ChatHistoryResponse {
    pub messages: Vec<MessageRecord>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub status: &'static str,
}

/// Send a chat message
async fn send_message(
    Extension(store): Extension<Arc<MemoryStore>>,
    Extension(providers): Extension<Arc<ProviderRouter>>,
    Json(message): Json<ChatMessageRequest>,
) -> Json<ChatSendResponse> {
    store.ensure_user(&message.sender).await;
    store
        .add_message(
            CHAT_CONVERSATION,
            &message.text,
            &message.sender,
            Some(&message.character),
        )
        .await;

    let execution = store
        .record_execution(&message.character, &message.text)
        .await;
    let generation = providers
        .generate(&message.text, &GenerateOptions::default())
        .await;
    let status = if generation.provider.is_some() {
        ExecutionStatus::Completed
    } else {
        ExecutionStatus::Failed
    };
    store
        .update_execution(execution.id, status, Some(&generation.text))
        .await;

    store
        .add_message(
            CHAT_CONVERSATION,
            &generation.text,
            "agent",
            Some(&message.character),
        )
        .await;

    Json(ChatSendResponse {
        status: "received",
        message: message.text,
        sender: message.sender,
        character: message.character,
        response: generation.text,
        provider: generation.provider,
    })
}

/// Get chat history
async fn chat_history(
    Extension(store): Extension<Arc<MemoryStore>>,
    Query(params): Query<HistoryParams>,
) -> Json<ChatHistoryResponse> {
    let messages = store
        .messages(CHAT_CONVERSATION, Some(params.limit))
        .await;
    let total = messages.len();
    Json(ChatHistoryResponse { messages, total })
}

/// Clear chat history
async fn clear_history(Extension(store): Extension<Arc<MemoryStore>>) -> Json<ClearResponse> {
    store.clear_messages(CHAT_CONVERSATION).await;
    Json(ClearResponse { status: "cleared" })
}

/// Create chat routes
pub fn chat_routes() -> Router {
    Router::new()
        .route("/chat/send", post(send_message))
        .route("/chat/history", get(chat_history))
        .route("/chat/clear", post(clear_history))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use metis_llm::ProviderSettings;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let store = Arc::new(MemoryStore::new());
        let providers = Arc::new(ProviderRouter::from_settings(&ProviderSettings::default()));
        Router::new()
            .merge(chat_routes())
            .layer(Extension(store))
            .layer(Extension(providers))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_send_then_history_then_clear() {
        let app = test_app();

        let body = serde_json::json!({"text": "hello"});
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/chat/send")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "received");
        assert_eq!(json["response"], "[Demo echo]: hello");
        assert_eq!(json["provider"], "demo_mode");

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/chat/history?limit=10")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        // One user message plus the generated reply.
        assert_eq!(json["total"], 2);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/chat/clear")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["status"], "cleared");
    }
}
