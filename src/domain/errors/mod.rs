// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Domain-specific error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid directory, filename or numeric setting. Aborts before processing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Filename does not decode to a valid date/time
    #[error("Malformed timestamp in filename '{filename}': {reason}")]
    MalformedTimestamp { filename: String, reason: String },

    /// Probed clip carries no video stream
    #[error("No video stream found in {path}")]
    MissingVideoStream { path: String },

    /// Source file would be written over the combined output
    #[error("{path} has the same name as the combined output; rename it or choose another output video name")]
    OutputNameCollision { path: String },

    /// Probe capability failed or returned unreadable output
    #[error("Failed to probe {path}: {message}")]
    ProbeFailure { path: String, message: String },

    /// Encode capability reported an error
    #[error("Failed to encode {path}: {message}")]
    EncodeFailure { path: String, message: String },

    /// Concatenation capability reported an error
    #[error("Failed to combine videos into {path}: {message}")]
    ConcatenationFailure { path: String, message: String },

    /// A single deletion during cleanup failed
    #[error("Failed to delete {path}: {message}")]
    CleanupFailure { path: String, message: String },

    /// Filesystem operation failed
    #[error("Filesystem error: {0}")]
    FsFailure(String),
}

impl DomainError {
    pub(crate) fn malformed(filename: &str, reason: impl Into<String>) -> Self {
        DomainError::MalformedTimestamp {
            filename: filename.to_string(),
            reason: reason.into(),
        }
    }
}
