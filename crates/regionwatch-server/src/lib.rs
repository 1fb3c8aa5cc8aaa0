//! Dashboard server for Regionwatch.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **WebSocket endpoint** (`/ws`) fanning out cluster scheduling
//!   events to every connected client via [`tokio::sync::broadcast`]
//! - **Debug injection endpoint** (`POST /post`) accepting one JSON wire
//!   event per request
//! - **REST endpoint** (`GET /api/v1/events`) serving the recent event
//!   history, newest first
//! - **HTML status page** (`GET /`) rendering the recent log as a
//!   reverse-chronological list
//!
//! plus the [`poller`], which tails the placement driver's event feed
//! and publishes everything it finds.
//!
//! # Architecture
//!
//! Events enter through the poller or the injection endpoint and reach
//! [`AppState::publish`](state::AppState::publish), which records into a
//! bounded in-memory log and broadcasts to WebSocket subscribers. A
//! lagged subscriber skips ahead instead of stalling the fan-out.

pub mod error;
pub mod handlers;
pub mod poller;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use poller::{FeedPoller, PollerConfig};
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
