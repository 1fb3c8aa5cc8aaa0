//! Configuration for the dashboard binary.
//!
//! All configuration is loaded from environment variables: where to
//! listen, which placement driver to tail, and how much history to keep.

use std::time::Duration;

use regionwatch_server::{PollerConfig, ServerConfig};

use crate::error::DashboardError;

/// Complete dashboard configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// HTTP server bind configuration.
    pub server: ServerConfig,
    /// Placement driver feed poller configuration.
    pub poller: PollerConfig,
    /// Retention bound of the recent-event log.
    pub recent_capacity: usize,
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `BIND_HOST` -- listen address (default `0.0.0.0`)
    /// - `BIND_PORT` -- listen port (default `2234`)
    /// - `PD_ADDR` -- placement driver REST address (default `127.0.0.1:9090`)
    /// - `POLL_INTERVAL_MS` -- feed poll delay in milliseconds (default 1000)
    /// - `RECENT_CAPACITY` -- recent-event retention bound (default 1024)
    pub fn from_env() -> Result<Self, DashboardError> {
        let host = std::env::var("BIND_HOST").unwrap_or_else(|_| String::from("0.0.0.0"));
        let port: u16 = std::env::var("BIND_PORT")
            .unwrap_or_else(|_| String::from("2234"))
            .parse()
            .map_err(|e| DashboardError::Config(format!("invalid BIND_PORT: {e}")))?;

        let pd_addr =
            std::env::var("PD_ADDR").unwrap_or_else(|_| String::from("127.0.0.1:9090"));
        let poll_interval_ms: u64 = std::env::var("POLL_INTERVAL_MS")
            .unwrap_or_else(|_| String::from("1000"))
            .parse()
            .map_err(|e| DashboardError::Config(format!("invalid POLL_INTERVAL_MS: {e}")))?;

        let recent_capacity: usize = std::env::var("RECENT_CAPACITY")
            .unwrap_or_else(|_| String::from("1024"))
            .parse()
            .map_err(|e| DashboardError::Config(format!("invalid RECENT_CAPACITY: {e}")))?;

        Ok(Self {
            server: ServerConfig { host, port },
            poller: PollerConfig {
                pd_addr,
                poll_interval: Duration::from_millis(poll_interval_ms),
            },
            recent_capacity,
        })
    }
}
