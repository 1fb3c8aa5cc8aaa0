//! WebSocket feed client for the Regionwatch dashboard.
//!
//! This crate owns the single live-feed connection: it opens one
//! WebSocket to a dashboard server at `ws://<host>/ws`, decodes each JSON
//! text frame as a wire event, and maintains a bounded newest-first
//! [`EventLog`](regionwatch_types::EventLog).
//!
//! # Architecture
//!
//! ```text
//! dashboard server --ws--> EventFeed --> EventLog (newest first)
//!                              |
//!                              +--> broadcast::Receiver<LogRecord> (live tail)
//!                              +--> watch::Receiver<ConnectionStatus>
//! ```
//!
//! The feed is an explicitly constructed value; there is no ambient
//! global state. [`EventFeed::run`] consumes the feed, so one feed can
//! never hold two connections. Connection health is observable through a
//! watch channel, and a dropped connection is retried with bounded
//! exponential backoff (or not at all, when auto-reconnect is disabled).
//!
//! Malformed frames are logged and discarded; they never tear down the
//! connection or the process.

mod backoff;
pub mod config;
pub mod error;
pub mod feed;
pub mod status;

// Re-export primary types for convenience.
pub use config::FeedConfig;
pub use error::ClientError;
pub use feed::EventFeed;
pub use status::ConnectionStatus;
