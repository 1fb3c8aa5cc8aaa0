//! Configuration for the viewer binary.
//!
//! All configuration is loaded from environment variables. The viewer
//! only needs to know which dashboard server to follow and how patient
//! to be about reconnecting.

use std::time::Duration;

use regionwatch_client::FeedConfig;

use crate::error::ViewerError;

/// Load the feed configuration from environment variables.
///
/// Required variables:
/// - `WS_HOST` -- dashboard server address as `host[:port]`
///
/// Optional variables:
/// - `LOG_CAPACITY` -- event log retention bound (default 1024)
/// - `AUTO_RECONNECT` -- reconnect after a drop (default `true`)
/// - `RECONNECT_BASE_MS` -- first reconnect delay (default 1000)
/// - `RECONNECT_MAX_MS` -- reconnect delay ceiling (default 30000)
/// - `MAX_RECONNECT_ATTEMPTS` -- give up after this many consecutive
///   failures; 0 retries forever (default 0)
pub fn from_env() -> Result<FeedConfig, ViewerError> {
    let ws_host = std::env::var("WS_HOST")
        .map_err(|e| ViewerError::Config(format!("missing required env var WS_HOST: {e}")))?;

    let log_capacity: usize = std::env::var("LOG_CAPACITY")
        .unwrap_or_else(|_| String::from("1024"))
        .parse()
        .map_err(|e| ViewerError::Config(format!("invalid LOG_CAPACITY: {e}")))?;

    let auto_reconnect: bool = std::env::var("AUTO_RECONNECT")
        .unwrap_or_else(|_| String::from("true"))
        .parse()
        .map_err(|e| ViewerError::Config(format!("invalid AUTO_RECONNECT: {e}")))?;

    let reconnect_base_ms: u64 = std::env::var("RECONNECT_BASE_MS")
        .unwrap_or_else(|_| String::from("1000"))
        .parse()
        .map_err(|e| ViewerError::Config(format!("invalid RECONNECT_BASE_MS: {e}")))?;

    let reconnect_max_ms: u64 = std::env::var("RECONNECT_MAX_MS")
        .unwrap_or_else(|_| String::from("30000"))
        .parse()
        .map_err(|e| ViewerError::Config(format!("invalid RECONNECT_MAX_MS: {e}")))?;

    let max_reconnect_attempts: u32 = std::env::var("MAX_RECONNECT_ATTEMPTS")
        .unwrap_or_else(|_| String::from("0"))
        .parse()
        .map_err(|e| ViewerError::Config(format!("invalid MAX_RECONNECT_ATTEMPTS: {e}")))?;

    Ok(FeedConfig {
        ws_host,
        log_capacity,
        auto_reconnect,
        reconnect_base: Duration::from_millis(reconnect_base_ms),
        reconnect_max: Duration::from_millis(reconnect_max_ms),
        max_reconnect_attempts,
    })
}
