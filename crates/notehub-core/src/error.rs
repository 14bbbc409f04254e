//! Error types for the NoteHub client.
//!
//! A single error enum is shared across crates so callers can match on
//! failure classes without caring which layer produced them.

use thiserror::Error;

/// Unified error type for all NoteHub operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("Service error ({status}): {body}")]
    Service { status: u16, body: String },

    /// Client-side input validation failed; the request was never sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The referenced note does not exist on the service.
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    /// A response body could not be decoded into the expected shape.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Client configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Error::Serialization(e.to_string())
        } else if let Some(status) = e.status() {
            Error::Service {
                status: status.as_u16(),
                body: e.to_string(),
            }
        } else {
            Error::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl Error {
    /// True for the missing-note failure class, whichever layer raised it.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NoteNotFound(_))
            || matches!(self, Error::Service { status: 404, .. })
    }

    /// True when retrying the same request could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Network(_) => true,
            Error::Service { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;
