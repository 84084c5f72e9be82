//! Error types for quote sources.

use std::time::Duration;
use thiserror::Error;

/// Result type for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;

/// Errors raised by quote sources.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The configured address could not be understood.
    #[error("Invalid quote source address '{0}' (expected \"host:port\" or \"host port\")")]
    InvalidAddress(String),

    /// Connecting to the quote source failed.
    #[error("Failed to connect to quote source {address}: {source}")]
    Connect {
        /// The address that was dialed.
        address: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Connecting to the quote source took too long.
    #[error("Timed out after {timeout:?} connecting to quote source {address}")]
    ConnectTimeout {
        /// The address that was dialed.
        address: String,
        /// The configured timeout.
        timeout: Duration,
    },

    /// The subscription handshake could not be encoded.
    #[error("Failed to encode handshake: {0}")]
    Handshake(#[from] serde_json::Error),

    /// The quote source became unavailable mid-stream.
    #[error("Quote source I/O error: {0}")]
    Io(#[from] std::io::Error),
}
