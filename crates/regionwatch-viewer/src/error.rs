//! Error types for the viewer binary.

/// Failures during viewer startup.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// A configuration value was missing or unparsable.
    #[error("configuration error: {0}")]
    Config(String),
}
