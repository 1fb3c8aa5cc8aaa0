//! Error types for the dashboard binary.

/// Failures during dashboard startup.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// A configuration value was missing or unparsable.
    #[error("configuration error: {0}")]
    Config(String),
}
