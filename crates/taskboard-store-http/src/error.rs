//! Error types for remote task service operations.

use thiserror::Error;

/// Errors that can occur during `HttpTaskStore` operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The configured base URL did not parse or uses an unsupported scheme.
    #[error("invalid base URL {0:?}")]
    InvalidBaseUrl(String),

    /// Transport-level failure (connect, timeout, request build).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service returned {status} for {operation}")]
    Status {
        /// Operation that was being performed.
        operation: &'static str,
        /// HTTP status code of the response.
        status: reqwest::StatusCode,
    },

    /// The response body did not decode as the expected shape.
    #[error("failed to decode {operation} response: {source}")]
    Decode {
        /// Operation that was being performed.
        operation: &'static str,
        /// Underlying decode error.
        #[source]
        source: reqwest::Error,
    },
}
