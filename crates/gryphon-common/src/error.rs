//! Error types for Gryphon.

use thiserror::Error;

/// Result type alias for Gryphon operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Gryphon.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Failures while running work on a session's execution context
    #[error("Session execution error: {0}")]
    SessionExecution(String),

    /// Protocol errors
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// Other errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl Error {
    /// Innermost human-readable description, without the variant prefix.
    ///
    /// The response frame encoder embeds this in the status message of the
    /// fallback response it substitutes for an unserializable message.
    pub fn root_cause(&self) -> String {
        match self {
            Error::Serialization(s)
            | Error::SessionExecution(s)
            | Error::Protocol(s)
            | Error::Internal(s) => s.clone(),
            Error::Io(e) => e.to_string(),
            Error::Other(e) => e.root_cause().to_string(),
        }
    }
}
