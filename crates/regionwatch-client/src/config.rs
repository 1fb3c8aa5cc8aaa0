//! Configuration for the feed client.

use std::time::Duration;

use regionwatch_types::DEFAULT_LOG_CAPACITY;

/// Complete feed client configuration.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Dashboard server host, as `host` or `host:port`, without a scheme.
    pub ws_host: String,
    /// Retention bound of the client-side event log.
    pub log_capacity: usize,
    /// Whether to reconnect after a dropped connection.
    pub auto_reconnect: bool,
    /// First reconnect delay; doubles on each consecutive failure.
    pub reconnect_base: Duration,
    /// Ceiling for the reconnect delay.
    pub reconnect_max: Duration,
    /// Give up after this many consecutive failed attempts (0 = never).
    pub max_reconnect_attempts: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            ws_host: String::from("127.0.0.1:2234"),
            log_capacity: DEFAULT_LOG_CAPACITY,
            auto_reconnect: true,
            reconnect_base: Duration::from_secs(1),
            reconnect_max: Duration::from_secs(30),
            max_reconnect_attempts: 0,
        }
    }
}

impl FeedConfig {
    /// Create a configuration for the given dashboard host with default
    /// reconnect behavior.
    #[must_use]
    pub fn new(ws_host: impl Into<String>) -> Self {
        Self {
            ws_host: ws_host.into(),
            ..Self::default()
        }
    }

    /// Set the event log retention bound.
    #[must_use]
    pub const fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity;
        self
    }

    /// Enable or disable reconnection after a dropped connection.
    #[must_use]
    pub const fn with_auto_reconnect(mut self, enabled: bool) -> Self {
        self.auto_reconnect = enabled;
        self
    }

    /// Set the maximum number of consecutive reconnect attempts
    /// (0 = retry forever).
    #[must_use]
    pub const fn with_max_reconnect_attempts(mut self, attempts: u32) -> Self {
        self.max_reconnect_attempts = attempts;
        self
    }

    /// The WebSocket URL this feed connects to.
    #[must_use]
    pub fn url(&self) -> String {
        format!("ws://{}/ws", self.ws_host.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_appends_the_ws_path() {
        let config = FeedConfig::new("localhost:2234");
        assert_eq!(config.url(), "ws://localhost:2234/ws");
    }

    #[test]
    fn url_tolerates_a_trailing_slash() {
        let config = FeedConfig::new("localhost:2234/");
        assert_eq!(config.url(), "ws://localhost:2234/ws");
    }
}
