//! The live-feed connection manager.
//!
//! [`EventFeed`] owns exactly one WebSocket connection to a dashboard
//! server. Each received text frame is decoded as a wire [`LogEvent`],
//! prepended to the shared [`EventLog`], and re-broadcast to in-process
//! subscribers. Connection health is published through a watch channel,
//! and dropped connections are retried with bounded exponential backoff
//! unless auto-reconnect is disabled.

use std::sync::Arc;

use futures::StreamExt;
use regionwatch_types::{EventLog, LogEvent, LogRecord};
use tokio::net::TcpStream;
use tokio::sync::{RwLock, broadcast, watch};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};

use crate::backoff;
use crate::config::FeedConfig;
use crate::error::ClientError;
use crate::status::ConnectionStatus;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Capacity of the record broadcast channel. A subscriber that falls
/// further behind than this skips ahead to the newest record.
const RECORD_BROADCAST_CAPACITY: usize = 256;

/// The feed client: one WebSocket connection, one event log.
///
/// Construct with [`EventFeed::new`], take handles to the log, status,
/// and record stream, then drive the connection with [`EventFeed::run`].
/// `run` consumes the feed, so a single feed can never hold two
/// connections at once.
pub struct EventFeed {
    config: FeedConfig,
    log: Arc<RwLock<EventLog>>,
    status_tx: watch::Sender<ConnectionStatus>,
    records_tx: broadcast::Sender<LogRecord>,
}

impl EventFeed {
    /// Create a feed for the configured dashboard host. No connection is
    /// opened until [`EventFeed::run`] is called.
    #[must_use]
    pub fn new(config: FeedConfig) -> Self {
        let (status_tx, _) = watch::channel(ConnectionStatus::Connecting);
        let (records_tx, _) = broadcast::channel(RECORD_BROADCAST_CAPACITY);
        let log = Arc::new(RwLock::new(EventLog::new(config.log_capacity)));
        Self {
            config,
            log,
            status_tx,
            records_tx,
        }
    }

    /// Handle to the shared event log (newest first).
    #[must_use]
    pub fn log(&self) -> Arc<RwLock<EventLog>> {
        Arc::clone(&self.log)
    }

    /// Watch the connection status.
    #[must_use]
    pub fn status(&self) -> watch::Receiver<ConnectionStatus> {
        self.status_tx.subscribe()
    }

    /// Subscribe to the live stream of recorded events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<LogRecord> {
        self.records_tx.subscribe()
    }

    /// Drive the connection until it ends.
    ///
    /// With auto-reconnect enabled this loops forever (or until the
    /// configured attempt budget is spent), reconnecting with jittered
    /// exponential backoff. With auto-reconnect disabled it returns
    /// `Ok(())` after the first disconnect and never re-opens.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AttemptsExhausted`] when every allowed
    /// connection attempt has failed.
    pub async fn run(self) -> Result<(), ClientError> {
        let url = self.config.url();
        let mut failures: u32 = 0;
        let mut last_error = String::new();

        loop {
            self.set_status(ConnectionStatus::Connecting);
            match connect_async(url.as_str()).await {
                Ok((stream, _response)) => {
                    info!(url = %url, "live feed connected");
                    failures = 0;
                    self.set_status(ConnectionStatus::Connected);

                    let reason = self.pump(stream).await;
                    info!(reason = %reason, "live feed disconnected");
                    last_error.clone_from(&reason);
                    self.set_status(ConnectionStatus::Disconnected { reason });

                    if !self.config.auto_reconnect {
                        return Ok(());
                    }
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "live feed connection failed");
                    last_error = e.to_string();
                    self.set_status(ConnectionStatus::Disconnected {
                        reason: last_error.clone(),
                    });

                    if !self.config.auto_reconnect {
                        return Err(ClientError::AttemptsExhausted {
                            attempts: 1,
                            last_error,
                        });
                    }
                }
            }

            failures = failures.saturating_add(1);
            let max = self.config.max_reconnect_attempts;
            if max > 0 && failures > max {
                return Err(ClientError::AttemptsExhausted {
                    attempts: max,
                    last_error,
                });
            }

            self.set_status(ConnectionStatus::Backoff { attempt: failures });
            let wait = backoff::delay(
                failures,
                self.config.reconnect_base,
                self.config.reconnect_max,
            );
            debug!(attempt = failures, delay = ?wait, "waiting before reconnect");
            tokio::time::sleep(wait).await;
        }
    }

    /// Read frames until the connection ends; returns the close reason.
    async fn pump(&self, mut stream: WsStream) -> String {
        while let Some(frame) = stream.next().await {
            match frame {
                Ok(Message::Text(text)) => self.ingest(text.as_str()).await,
                Ok(Message::Ping(_)) => {
                    // tungstenite queues the pong for us.
                    debug!("server ping");
                }
                Ok(Message::Close(close)) => {
                    return close.map_or_else(
                        || String::from("closed by server"),
                        |f| format!("closed by server: {}", f.reason),
                    );
                }
                Ok(_) => {
                    // Binary and pong frames are not part of the protocol.
                }
                Err(e) => return e.to_string(),
            }
        }
        String::from("stream ended")
    }

    /// Decode one text frame and record it.
    ///
    /// Malformed frames are logged and discarded; the connection stays
    /// open. Events with unknown codes are recorded (and surfaced in the
    /// log output) but will not render.
    pub(crate) async fn ingest(&self, text: &str) {
        match serde_json::from_str::<LogEvent>(text) {
            Ok(event) => {
                if let Err(error) = event.classify() {
                    warn!(code = event.code, %error, "recording unclassifiable event");
                }
                let record = self.log.write().await.record(event);
                // send fails only when nobody is subscribed, which is fine.
                let _subscribers = self.records_tx.send(record).unwrap_or(0);
            }
            Err(error) => {
                warn!(%error, frame = text, "discarding malformed event frame");
            }
        }
    }

    fn set_status(&self, status: ConnectionStatus) {
        let _previous = self.status_tx.send_replace(status);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use regionwatch_types::ClusterEvent;

    use super::*;

    fn test_feed() -> EventFeed {
        EventFeed::new(FeedConfig::new("127.0.0.1:0").with_log_capacity(8))
    }

    #[tokio::test]
    async fn valid_frame_is_recorded_and_broadcast() {
        let feed = test_feed();
        let mut rx = feed.subscribe();

        feed.ingest(r#"{"Code":1,"SplitEvent":{"Region":5,"NewRegionA":6,"NewRegionB":7}}"#)
            .await;

        let record = rx.recv().await.unwrap();
        assert_eq!(
            record.event.classify().unwrap(),
            ClusterEvent::Split {
                region: 5,
                new_region_a: 6,
                new_region_b: 7
            }
        );

        let log = feed.log();
        let log = log.read().await;
        assert_eq!(log.len(), 1);
        assert_eq!(log.latest().map(|r| &r.event), Some(&record.event));
    }

    #[tokio::test]
    async fn frames_are_prepended_in_arrival_order() {
        let feed = test_feed();
        feed.ingest(r#"{"Code":3,"AddReplicaEvent":{"Region":1}}"#).await;
        feed.ingest(r#"{"Code":3,"AddReplicaEvent":{"Region":2}}"#).await;

        let log = feed.log();
        let log = log.read().await;
        let regions: Vec<u64> = log
            .iter()
            .map(|r| r.event.add_replica_event.unwrap().region)
            .collect();
        assert_eq!(regions, vec![2, 1]);
    }

    #[tokio::test]
    async fn malformed_frame_is_discarded() {
        let feed = test_feed();
        feed.ingest("not json at all").await;
        feed.ingest(r#"{"Code":"one"}"#).await;

        let log = feed.log();
        assert!(log.read().await.is_empty());
    }

    #[tokio::test]
    async fn unknown_code_is_recorded_but_renders_nothing() {
        let feed = test_feed();
        feed.ingest(r#"{"Code":9}"#).await;

        let log = feed.log();
        let log = log.read().await;
        assert_eq!(log.len(), 1);
        let record = log.latest().unwrap();
        assert_eq!(regionwatch_types::render(&record.event), None);
    }

    #[tokio::test]
    async fn code_beyond_byte_range_is_recorded_not_discarded() {
        let feed = test_feed();
        feed.ingest(r#"{"Code":900}"#).await;

        let log = feed.log();
        let log = log.read().await;
        assert_eq!(log.len(), 1);
        assert_eq!(log.latest().map(|r| r.event.code), Some(900));
    }
}
