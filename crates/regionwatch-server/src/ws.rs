//! WebSocket handler for real-time event streaming.
//!
//! Clients connect to `GET /ws` and receive one JSON-encoded wire event
//! per text frame as events are published. The handler uses a
//! [`broadcast::Receiver`](tokio::sync::broadcast::Receiver) so all
//! connected clients see the same stream, and pings each client once a
//! second to detect dead connections.
//!
//! If a client falls behind, lagged messages are silently skipped and
//! the client resumes from the most recent event.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tracing::{debug, warn};

use crate::state::AppState;

/// How often the server pings each connected client.
const PING_INTERVAL: Duration = Duration::from_secs(1);

/// Upgrade an HTTP request to a WebSocket connection and begin
/// streaming events.
///
/// # Route
///
/// `GET /ws`
pub async fn ws_events(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Handle the WebSocket lifecycle: subscribe to the broadcast channel
/// and forward each event as a text frame, pinging for liveness.
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    debug!("WebSocket client connected");

    let mut rx = state.subscribe();
    let mut ping = tokio::time::interval(PING_INTERVAL);
    ping.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            // Liveness ping; a failed send means the client is gone.
            _ = ping.tick() => {
                if socket.send(Message::Ping(Bytes::new())).await.is_err() {
                    debug!("WebSocket client disconnected (ping failed)");
                    return;
                }
            }
            // Receive a published event and forward it.
            result = rx.recv() => {
                match result {
                    Ok(event) => {
                        let json = match serde_json::to_string(&event) {
                            Ok(j) => j,
                            Err(e) => {
                                warn!("Failed to serialize event: {e}");
                                continue;
                            }
                        };
                        let msg: Message = Message::Text(json.into());
                        if socket.send(msg).await.is_err() {
                            debug!("WebSocket client disconnected (send failed)");
                            return;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        debug!(skipped = n, "WebSocket client lagged, skipping ahead");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        debug!("Broadcast channel closed, shutting down WebSocket");
                        return;
                    }
                }
            }
            // Check if the client sent a close frame or disconnected.
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("WebSocket client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let pong = Message::Pong(data);
                        if socket.send(pong).await.is_err() {
                            debug!("WebSocket client disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("WebSocket error: {e}");
                        return;
                    }
                    _ => {
                        // No client-to-server data frames in this protocol.
                    }
                }
            }
        }
    }
}
