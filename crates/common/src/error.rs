//! Error types for the Tenable.io SDK
//!
//! One error enum shared by the client, the helpers and their callers.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TenableIoError {
    /// Domain failure with no more specific kind (e.g. template resolution).
    #[error("{0}")]
    Generic(String),

    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("Wait interrupted")]
    Interrupted,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl TenableIoError {
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, TenableIoError::NotFound(_))
    }

    #[inline]
    #[must_use]
    pub fn is_not_authorized(&self) -> bool {
        matches!(self, TenableIoError::NotAuthorized(_))
    }

    /// HTTP status carried by the error, when it came from a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            TenableIoError::Api { status, .. } => Some(*status),
            TenableIoError::NotFound(_) => Some(404),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TenableIoError {
    fn from(err: serde_json::Error) -> Self {
        TenableIoError::Parse(err.to_string())
    }
}

/// Result type alias for SDK operations
pub type TioResult<T> = Result<T, TenableIoError>;
