//! Shared type definitions for the Regionwatch dashboard.
//!
//! This crate is the single source of truth for the event model shared by
//! the dashboard server and the feed client:
//!
//! - [`event`] -- the JSON wire model ([`LogEvent`]) pushed over the
//!   WebSocket, and the exhaustive [`ClusterEvent`] union it classifies into
//! - [`log`] -- the bounded, newest-first [`EventLog`] store
//! - [`render`] -- pure dispatch from events to display fragments
//!   (headline text plus an icon per event kind)

pub mod event;
pub mod log;
pub mod render;

// Re-export primary types for convenience.
pub use event::{
    AddReplicaEvent, ClusterEvent, EventCode, EventError, LeaderTransferEvent, LogEvent,
    RemoveReplicaEvent, SplitEvent,
};
pub use log::{DEFAULT_LOG_CAPACITY, EventLog, LogRecord};
pub use render::{glyph, headline, icon_class, render};
