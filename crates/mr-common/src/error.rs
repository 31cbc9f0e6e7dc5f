//! Error types for modrules.

use thiserror::Error;

/// Result type alias for modrules operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for modrules.
///
/// Resolution itself never fails; these errors come from the edges
/// (parsing host-supplied versions, loading payload files).
#[derive(Error, Debug)]
pub enum Error {
    // Input errors (10-19)
    #[error("invalid version string: {0}")]
    InvalidVersion(String),

    // Configuration errors (20-29)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid static payload: {0}")]
    InvalidPayload(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output.
    pub fn code(&self) -> u32 {
        match self {
            Error::InvalidVersion(_) => 10,
            Error::Config(_) => 20,
            Error::InvalidPayload(_) => 21,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }
}
