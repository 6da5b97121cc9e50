//! Error types for the duplicate detector.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the duplicate detector.
#[derive(Error, Debug)]
pub enum Error {
    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    // Scan lifecycle errors
    #[error("Scan cancelled before it started")]
    Cancelled,

    #[error("A scan is already in progress for this engine")]
    ScanInProgress,

    // Configuration errors
    #[error("Invalid video extension config: {0}")]
    InvalidExtensionConfig(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
