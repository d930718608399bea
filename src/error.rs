//! Typed errors for listing extraction.
//!
//! Only input validation and network-layer failures surface here. A malformed
//! structured-data block is recovered inside the cascade and never becomes an
//! `ExtractionError`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Missing or empty URL, rejected before any I/O
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The server answered with a non-success status
    #[error("HTTP error: {status}")]
    Http { status: u16 },

    /// DNS, TLS, connection, timeout or body read failure
    #[error("network error: {0}")]
    Network(String),

    /// The caller cancelled the extraction while the fetch was in flight
    #[error("extraction cancelled")]
    Cancelled,

    /// The HTTP client could not be built from the configuration
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl From<reqwest::Error> for ExtractionError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return ExtractionError::Http {
                status: status.as_u16(),
            };
        }
        ExtractionError::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExtractionError>;
