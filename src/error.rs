//! Error types and handling for odd-stream
//!
//! Every fallible operation in the crate returns [`StreamResult`].

/// Main error type for pipeline operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StreamError {
    /// I/O related errors, usually from a terminal writer
    #[error("IO error: {0}")]
    Io(String),
    /// The context deadline passed
    #[error("Operation timed out")]
    Timeout,
    /// The context was cancelled
    #[error("Operation cancelled")]
    Cancelled,
    /// A caller passed an argument the operation cannot work with
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Configuration could not be parsed or failed validation
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for StreamError {
    fn from(err: std::io::Error) -> Self {
        StreamError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StreamError {
    fn from(err: serde_json::Error) -> Self {
        StreamError::Config(err.to_string())
    }
}

/// Result type for odd-stream operations
pub type StreamResult<T> = Result<T, StreamError>;
