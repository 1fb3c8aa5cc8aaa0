//! Terminal live-feed viewer for Regionwatch.
//!
//! Connects to a dashboard server's WebSocket feed and prints one line
//! per cluster event -- arrival time, an icon for the event kind, and
//! the formatted headline -- newest at the bottom of the terminal.
//! Connection-status transitions are reported through the log output so
//! a stalled feed is visible, not silent.

mod config;
mod error;

use regionwatch_client::{ConnectionStatus, EventFeed};
use regionwatch_types::{LogRecord, glyph, headline};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the feed gives up
/// reconnecting.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging (stderr, so the event stream on
    // stdout stays clean).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = config::from_env()?;
    info!(ws_host = config.ws_host, url = config.url(), "regionwatch-viewer starting");

    let feed = EventFeed::new(config);
    let mut records = feed.subscribe();
    let mut status = feed.status();
    let feed_task = tokio::spawn(feed.run());

    // Report status transitions so the operator sees feed health.
    drop(tokio::spawn(async move {
        while status.changed().await.is_ok() {
            let current = status.borrow_and_update().clone();
            match current {
                ConnectionStatus::Connected => info!(status = %current, "live feed"),
                ref other => warn!(status = %other, "live feed"),
            }
        }
    }));

    loop {
        match records.recv().await {
            Ok(record) => print_record(&record),
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "viewer lagged behind the feed, skipping ahead");
            }
            // The sender is gone once the feed loop returns.
            Err(RecvError::Closed) => break,
        }
    }

    feed_task.await??;
    Ok(())
}

/// Print one event line, or report an unrenderable event.
fn print_record(record: &LogRecord) {
    match record.event.classify() {
        Ok(event) => println!(
            "{} {} {}",
            record.received_at.format("%H:%M:%S"),
            glyph(event),
            headline(event)
        ),
        Err(error) => {
            warn!(code = record.event.code, %error, "event recorded but not rendered");
        }
    }
}
