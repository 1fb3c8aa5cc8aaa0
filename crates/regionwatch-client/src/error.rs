//! Error types for the feed client.

/// Failures that end the feed loop.
///
/// Transient problems (a dropped connection, a malformed frame) are
/// handled inside the loop; only giving up is an error.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Every allowed reconnect attempt failed.
    #[error("gave up after {attempts} reconnect attempts: {last_error}")]
    AttemptsExhausted {
        /// How many consecutive attempts were made.
        attempts: u32,
        /// The error from the final attempt.
        last_error: String,
    },
}
