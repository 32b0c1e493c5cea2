//! Error types for the datastore gateway.

use thiserror::Error;

/// Errors raised by the datastore gateway.
///
/// An unexpected HTTP status is not an error; the gateway reports it as an
/// unsuccessful call instead.
#[derive(Error, Debug)]
pub enum DatastoreError {
    /// A required environment variable is missing or empty.
    #[error("{0} must be set")]
    MissingEnv(&'static str),

    /// The service role key cannot be sent as a header value.
    #[error("invalid service role key: {0}")]
    InvalidKey(#[from] reqwest::header::InvalidHeaderValue),

    /// The HTTP client could not be created.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never got a response (connection, DNS, TLS).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A request body could not be encoded.
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, DatastoreError>;
