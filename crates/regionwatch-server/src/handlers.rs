//! HTTP endpoint handlers for the dashboard server.
//!
//! All handlers read from the in-memory recent-event log via the shared
//! [`AppState`]; nothing here touches the placement driver directly.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | HTML status page with the rendered event list |
//! | `GET` | `/api/v1/events` | Recent events, newest first |
//! | `POST` | `/post` | Debug/test event injection |

use std::fmt::Write as _;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use regionwatch_types::{LogEvent, LogRecord, headline, icon_class};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Default number of events returned by `GET /api/v1/events`.
const DEFAULT_EVENTS_LIMIT: usize = 100;

/// Query parameters for the `GET /api/v1/events` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct EventsQuery {
    /// Maximum number of events to return (default 100).
    pub limit: Option<usize>,
}

// ---------------------------------------------------------------------------
// GET /api/v1/events -- recent event history
// ---------------------------------------------------------------------------

/// Return the recent events, newest first.
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EventsQuery>,
) -> Json<Vec<LogRecord>> {
    let limit = query.limit.unwrap_or(DEFAULT_EVENTS_LIMIT);
    let recent = state.recent.read().await;
    Json(recent.iter().take(limit).cloned().collect())
}

// ---------------------------------------------------------------------------
// POST /post -- debug/test event injection
// ---------------------------------------------------------------------------

/// Accept one JSON wire event and publish it to all subscribers.
///
/// The decode is an explicit fallible parse: a malformed body gets a
/// 400 with a JSON error payload instead of an opaque failure.
pub async fn post_event(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    if body.trim().is_empty() {
        return Err(ApiError::EmptyBody);
    }
    let event: LogEvent = serde_json::from_str(&body)?;
    if let Err(error) = event.classify() {
        warn!(code = event.code, %error, "injected event will not render");
    }

    let record = state.publish(event).await;
    Ok((
        StatusCode::ACCEPTED,
        Json(serde_json::json!({
            "received_at": record.received_at,
            "subscribers": state.subscriber_count(),
        })),
    ))
}

// ---------------------------------------------------------------------------
// GET / -- HTML status page
// ---------------------------------------------------------------------------

/// Serve the dashboard status page: feed metrics plus the recent event
/// log rendered as a reverse-chronological list.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let recent = state.recent.read().await;
    let event_count = recent.len();
    let capacity = recent.capacity();
    let subscribers = state.subscriber_count();

    let mut items = String::new();
    for record in recent.iter() {
        // Unknown codes stay in the log but produce no fragment.
        let Ok(event) = record.event.classify() else {
            continue;
        };
        let _ = writeln!(
            items,
            r#"        <li><i class="fa {icon}"></i> <span class="when">{when}</span> {text}</li>"#,
            icon = icon_class(event),
            when = record.received_at.format("%H:%M:%S"),
            text = headline(event),
        );
    }
    if items.is_empty() {
        items = String::from("        <li class=\"empty\">no events yet</li>\n");
    }
    drop(recent);

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Regionwatch</title>
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/4.7.0/css/font-awesome.min.css">
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; border-bottom: 1px solid #161b22; }}
        li .fa {{ color: #7ee787; width: 1.5rem; text-align: center; }}
        li .when {{ color: #8b949e; margin-right: 0.5rem; }}
        li.empty {{ color: #8b949e; }}
        .endpoints li {{ border: none; }}
        .endpoints li::before {{ content: "GET "; color: #7ee787; font-weight: bold; }}
        .status {{ color: #3fb950; font-weight: bold; }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>Regionwatch</h1>
    <p class="subtitle">Cluster scheduling event dashboard</p>

    <p>Status: <span class="status">RUNNING</span></p>

    <div>
        <div class="metric">
            <div class="label">Events</div>
            <div class="value">{event_count}</div>
        </div>
        <div class="metric">
            <div class="label">Retention</div>
            <div class="value">{capacity}</div>
        </div>
        <div class="metric">
            <div class="label">Subscribers</div>
            <div class="value">{subscribers}</div>
        </div>
    </div>

    <hr>

    <h2>Event log</h2>
    <ul>
{items}    </ul>

    <hr>

    <h2>Endpoints</h2>
    <ul class="endpoints">
        <li><a href="/ws">/ws</a> (WebSocket)</li>
        <li><a href="/api/v1/events">/api/v1/events</a></li>
    </ul>
</body>
</html>"#
    ))
}
