//! Error taxonomy for the tiles REST API.

use thiserror::Error;

/// Everything that can go wrong talking to the tiles backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received (connection refused, DNS, reset...).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("server error ({status}): {body}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Raw response body, possibly empty
        body: String,
    },

    /// The body was not valid JSON, or its tiles did not decode.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The body was JSON but held no recognizable tile list.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}
