//! Shared application state for the dashboard server.
//!
//! [`AppState`] holds the broadcast channel that fans events out to
//! WebSocket clients and the bounded in-memory log of recent events the
//! REST endpoints and status page serve.

use std::sync::Arc;

use regionwatch_types::{DEFAULT_LOG_CAPACITY, EventLog, LogEvent, LogRecord};
use tokio::sync::{RwLock, broadcast};

/// Capacity of the broadcast channel for event fan-out.
///
/// If a subscriber falls behind by more than this many messages it will
/// receive a [`broadcast::error::RecvError::Lagged`] and skip to the
/// newest message.
const BROADCAST_CAPACITY: usize = 256;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor. The
/// broadcast sender pushes wire events to all connected WebSocket
/// clients; the recent log backs `GET /api/v1/events` and the status
/// page.
#[derive(Clone)]
pub struct AppState {
    /// Broadcast sender for event fan-out.
    tx: broadcast::Sender<LogEvent>,
    /// Bounded recent-event history, newest first.
    pub recent: Arc<RwLock<EventLog>>,
}

impl AppState {
    /// Create a new application state retaining at most
    /// `recent_capacity` events.
    #[must_use]
    pub fn new(recent_capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            tx,
            recent: Arc::new(RwLock::new(EventLog::new(recent_capacity))),
        }
    }

    /// Subscribe to the event fan-out channel.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<LogEvent> {
        self.tx.subscribe()
    }

    /// Number of currently connected WebSocket subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Record an event into the recent log and fan it out.
    ///
    /// Returns the stored record. Zero connected subscribers is normal,
    /// not an error.
    pub async fn publish(&self, event: LogEvent) -> LogRecord {
        let record = self.recent.write().await.record(event.clone());
        // send returns Err only when there are zero receivers, which is
        // normal when no WebSocket clients are connected.
        let _receivers = self.tx.send(event).unwrap_or(0);
        record
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use regionwatch_types::ClusterEvent;

    use super::*;

    #[tokio::test]
    async fn publish_records_and_broadcasts() {
        let state = AppState::new(16);
        let mut rx = state.subscribe();

        state.publish(LogEvent::split(5, 6, 7)).await;

        let event = rx.recv().await.unwrap();
        assert_eq!(
            event.classify().unwrap(),
            ClusterEvent::Split {
                region: 5,
                new_region_a: 6,
                new_region_b: 7
            }
        );
        assert_eq!(state.recent.read().await.len(), 1);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_fine() {
        let state = AppState::new(16);
        let record = state.publish(LogEvent::add_replica(3)).await;
        assert_eq!(record.event, LogEvent::add_replica(3));
    }
}
