//! Domain error types for the import pipeline.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

/// Import pipeline errors.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// Persistence operation failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Report could not be parsed at the format boundary
    #[error("Invalid report: {0}")]
    InvalidReport(String),
}

/// Convenience type alias for Results with ImportError.
pub type ImportResult<T> = Result<T, ImportError>;

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::InvalidReport(format!("JSON parsing error: {}", err))
    }
}
