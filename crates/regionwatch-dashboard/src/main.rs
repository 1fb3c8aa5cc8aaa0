//! Dashboard server entry point for Regionwatch.
//!
//! Wires the placement driver feed poller to the HTTP/WebSocket server:
//! events pulled from the feed are recorded in the recent log and fanned
//! out to every connected WebSocket client.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from environment variables
//! 3. Create the shared application state
//! 4. Spawn the feed poller
//! 5. Run the HTTP server until terminated

mod config;
mod error;

use std::sync::Arc;

use regionwatch_server::{AppState, FeedPoller, start_server};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::DashboardConfig;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the server fails to
/// bind or serve.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("regionwatch-dashboard starting");

    let config = DashboardConfig::from_env()?;
    info!(
        bind_host = config.server.host,
        bind_port = config.server.port,
        pd_addr = config.poller.pd_addr,
        poll_interval_ms = u64::try_from(config.poller.poll_interval.as_millis()).unwrap_or(u64::MAX),
        recent_capacity = config.recent_capacity,
        "configuration loaded"
    );

    let state = Arc::new(AppState::new(config.recent_capacity));

    // Tail the placement driver feed in the background.
    let poller = FeedPoller::new(config.poller);
    drop(tokio::spawn(poller.run(Arc::clone(&state))));

    start_server(&config.server, state).await?;

    Ok(())
}
