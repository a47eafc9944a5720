//! Fetch error types.

use thiserror::Error;

/// Error type for usage fetches.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure: DNS, refused connection, timeout, TLS, or a
    /// URL that could not be turned into a request.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// A response arrived but its status was not 200.
    #[error("Unexpected status code: {code}")]
    UnexpectedStatus {
        /// HTTP status code of the response.
        code: u16,
    },

    /// Status was 200 but the body is not a usage envelope.
    #[error("Failed to decode usage response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The caller cancelled the fetch.
    #[error("Fetch cancelled")]
    Cancelled,

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Client configuration could not be loaded.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl FetchError {
    /// Returns the HTTP status code for [`FetchError::UnexpectedStatus`].
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { code } => Some(*code),
            _ => None,
        }
    }
}
