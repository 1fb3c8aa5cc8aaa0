//! Feed poller tests against a scripted in-process placement driver.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use regionwatch_server::poller::{FeedPoller, PollerConfig};
use regionwatch_server::state::AppState;
use regionwatch_types::LogEvent;
use serde::Deserialize;
use tokio::sync::Mutex;

#[derive(Deserialize)]
struct FeedQuery {
    offset: u64,
}

/// Scripted placement driver: one canned response per poll, recording
/// the offset each poll asked for.
struct ScriptedFeed {
    offsets_seen: Mutex<Vec<u64>>,
    polls: AtomicUsize,
}

async fn feed_page(
    State(feed): State<Arc<ScriptedFeed>>,
    Query(query): Query<FeedQuery>,
) -> Response {
    feed.offsets_seen.lock().await.push(query.offset);
    match feed.polls.fetch_add(1, Ordering::SeqCst) {
        // First poll fails outright; the poller must retry.
        0 => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        // One page with mixed sequence numbers, including an event
        // without one.
        1 => axum::Json(vec![
            LogEvent::split(1, 2, 3).with_id(7),
            LogEvent::add_replica(4).with_id(3),
            LogEvent::remove_replica(5),
        ])
        .into_response(),
        _ => axum::Json(Vec::<LogEvent>::new()).into_response(),
    }
}

/// Serve the scripted feed on an ephemeral port.
async fn spawn_feed(feed: Arc<ScriptedFeed>) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = Router::new()
        .route("/api/v1/feed", get(feed_page))
        .with_state(feed);
    drop(tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    }));
    addr
}

#[tokio::test]
async fn poller_publishes_feed_events_and_advances_past_max_id() {
    let feed = Arc::new(ScriptedFeed {
        offsets_seen: Mutex::new(Vec::new()),
        polls: AtomicUsize::new(0),
    });
    let addr = spawn_feed(Arc::clone(&feed)).await;

    let state = Arc::new(AppState::new(16));
    let poller = FeedPoller::new(PollerConfig {
        pd_addr: addr.to_string(),
        poll_interval: Duration::from_millis(20),
    });
    let poller_task = tokio::spawn(poller.run(Arc::clone(&state)));

    // Wait until the page's events have been published and the poller
    // has asked for at least one page past them.
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if feed.polls.load(Ordering::SeqCst) >= 4 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();
    poller_task.abort();

    // All three events reached the shared log, sequence number or not.
    assert_eq!(state.recent.read().await.len(), 3);

    let offsets = feed.offsets_seen.lock().await;
    // The failed poll did not kill the loop or move the offset.
    assert_eq!(&offsets[..2], &[0, 0]);
    // After the page, the offset sits at the highest sequence number
    // seen (7), not the last one in the page (3), and the event without
    // a sequence number did not disturb it.
    assert!(offsets[2..].iter().all(|&offset| offset == 7));
    assert!(offsets.len() >= 3);
}
