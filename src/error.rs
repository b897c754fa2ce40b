//! Structured error types for sheetwright.
//!
//! Layout itself is total: missing style attributes resolve to defaults and
//! unusable fonts fall back to the built-in metrics. The errors here are the
//! ones the engine cannot absorb — backend failures and I/O — which
//! propagate to the caller unchanged.

/// All errors that can surface from a layout pass.
#[derive(Debug, thiserror::Error)]
pub enum SheetwrightError {
    /// Writer-backend failure (bad path, disk full, rejected sheet name).
    /// The engine never retries or suppresses these.
    #[error("Backend: {0}")]
    Backend(String),

    /// Image reference the backend cannot use.
    #[error("Image: {0}")]
    Image(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for string errors from backend adapters.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SheetwrightError>;

impl From<String> for SheetwrightError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for SheetwrightError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}
