//! Console WebSocket handler
//!
//! Echoes every text frame back as `Echo: {text}` and pings the client
//! on the configured heartbeat interval. No backpressure protocol;
//! this is the real-time counterpart of the console stub endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::Extension;
use futures_util::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use crate::server::AppConfig;

/// WebSocket upgrade handler
pub async fn console_ws_handler(
    ws: WebSocketUpgrade,
    Extension(config): Extension<Arc<AppConfig>>,
) -> impl IntoResponse {
    let heartbeat = Duration::from_secs(config.ws.heartbeat_secs.max(1));
    ws.on_upgrade(move |socket| handle_socket(socket, heartbeat))
}

/// Handle one console connection until it closes
async fn handle_socket(socket: WebSocket, heartbeat: Duration) {
    info!("Console WebSocket connected");

    let (mut sender, mut receiver) = socket.split();
    let mut ticker = tokio::time::interval(heartbeat);
    // The first tick completes immediately; consume it so pings start
    // one full interval after connect.
    ticker.tick().await;

    loop {
        tokio::select! {
            frame = receiver.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        debug!(len = text.len(), "Console frame received");
                        if sender
                            .send(Message::Text(format!("Echo: {text}")))
                            .await
                            .is_err()
                        {
                            break;
                        }
                    }
                    Some(Ok(Message::Ping(payload))) => {
                        let _ = sender.send(Message::Pong(payload)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!(error = %e, "Console WebSocket error");
                        break;
                    }
                }
            }
            _ = ticker.tick() => {
                if sender.send(Message::Ping(Vec::new())).await.is_err() {
                    break;
                }
            }
        }
    }

    info!("Console WebSocket disconnected");
}
