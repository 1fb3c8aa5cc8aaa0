//! Observable connection status for the live feed.

use std::fmt;

/// The current state of the feed connection.
///
/// Published through a [`tokio::sync::watch`] channel so the embedding
/// application can show live-feed health to the operator instead of
/// failing silently.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// A connection attempt is in flight.
    #[default]
    Connecting,
    /// The feed is connected and receiving frames.
    Connected,
    /// The connection dropped; no retry is pending.
    Disconnected {
        /// Close reason or transport error text.
        reason: String,
    },
    /// Waiting out the backoff delay before reconnect attempt `attempt`.
    Backoff {
        /// The upcoming attempt number, starting at 1.
        attempt: u32,
    },
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connecting => write!(f, "connecting"),
            Self::Connected => write!(f, "connected"),
            Self::Disconnected { reason } => write!(f, "disconnected ({reason})"),
            Self::Backoff { attempt } => write!(f, "reconnecting (attempt {attempt})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_operator_readable() {
        assert_eq!(ConnectionStatus::Connected.to_string(), "connected");
        assert_eq!(
            ConnectionStatus::Disconnected {
                reason: String::from("closed by server")
            }
            .to_string(),
            "disconnected (closed by server)"
        );
        assert_eq!(
            ConnectionStatus::Backoff { attempt: 3 }.to_string(),
            "reconnecting (attempt 3)"
        );
    }
}
