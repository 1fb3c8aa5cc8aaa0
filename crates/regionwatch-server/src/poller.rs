//! Placement driver feed poller.
//!
//! The placement driver exposes its operator log as a pull feed:
//! `GET http://<pd_addr>/api/v1/feed?offset=<n>` returns the JSON array
//! of events with a sequence number greater than `n`. The poller tails
//! that feed on a fixed interval and publishes every event it finds,
//! advancing its offset to the highest sequence number seen.
//!
//! Polling never aborts the process: any HTTP or decode error is logged
//! and the next cycle retried.

use std::sync::Arc;
use std::time::Duration;

use regionwatch_types::LogEvent;
use tracing::{debug, warn};

use crate::state::AppState;

/// Configuration for the feed poller.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Placement driver REST address, as `host[:port]`, without a scheme.
    pub pd_addr: String,
    /// Delay between feed polls.
    pub poll_interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            pd_addr: String::from("127.0.0.1:9090"),
            poll_interval: Duration::from_secs(1),
        }
    }
}

/// Tails the placement driver feed and publishes into the [`AppState`].
pub struct FeedPoller {
    config: PollerConfig,
    http: reqwest::Client,
    offset: u64,
}

impl FeedPoller {
    /// Create a poller starting from offset zero.
    #[must_use]
    pub fn new(config: PollerConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            offset: 0,
        }
    }

    /// Poll the feed forever, publishing every event found.
    pub async fn run(mut self, state: Arc<AppState>) {
        loop {
            tokio::time::sleep(self.config.poll_interval).await;
            match self.poll_once(&state).await {
                Ok(0) => {}
                Ok(count) => debug!(count, offset = self.offset, "published feed events"),
                Err(e) => warn!(error = %e, pd_addr = %self.config.pd_addr, "feed poll failed"),
            }
        }
    }

    /// Fetch one feed page and publish its events.
    ///
    /// Advances the offset past every event that carries a sequence
    /// number, so the next poll only sees newer events.
    async fn poll_once(&mut self, state: &Arc<AppState>) -> Result<usize, PollError> {
        let url = format!(
            "http://{}/api/v1/feed?offset={}",
            self.config.pd_addr, self.offset
        );
        let events: Vec<LogEvent> = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let count = events.len();
        for event in events {
            if let Some(id) = event.id {
                self.offset = self.offset.max(id);
            }
            state.publish(event).await;
        }
        Ok(count)
    }
}

/// Errors from a single feed poll.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    /// The feed request or its JSON decode failed.
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),
}
