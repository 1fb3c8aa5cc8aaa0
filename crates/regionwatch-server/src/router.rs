//! Axum router construction for the dashboard server.
//!
//! Assembles all routes (HTML, REST, WebSocket) into a single [`Router`]
//! with CORS middleware enabled for cross-origin dashboard access.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the dashboard server.
///
/// The router includes:
/// - `GET /` -- HTML status page with the rendered event list
/// - `GET /ws` -- WebSocket event stream
/// - `POST /post` -- debug/test event injection
/// - `GET /api/v1/events` -- recent events, newest first
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws", get(ws::ws_events))
        // Event injection (debug/test)
        .route("/post", post(handlers::post_event))
        // REST API
        .route("/api/v1/events", get(handlers::list_events))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
