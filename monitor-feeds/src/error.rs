//! Error types for feed ingestion

use thiserror::Error;

/// Errors that can occur while fetching a single feed
///
/// These never escape the relay client; they are absorbed into an empty
/// article list and a logged diagnostic.
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP request to the relay failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Relay returned a non-2xx response
    #[error("Relay error (status {status}): {message}")]
    RelayError {
        /// HTTP status code
        status: u16,
        /// Error message from the relay
        message: String,
    },

    /// Relay envelope did not contain the `contents` field
    #[error("Relay envelope missing `contents` field")]
    MissingContents,

    /// Feed document could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),
}
