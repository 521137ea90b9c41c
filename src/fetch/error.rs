//! Error types for fetch operations.

use thiserror::Error;

/// Error type for HTTP transport operations.
///
/// Describes what went wrong without dictating recovery strategy.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error for a single failed fetch attempt.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The HTTP call itself failed.
    #[error("Request failed: {0}")]
    Http(#[from] HttpError),

    /// The response carried no `Content-Type` header.
    #[error("Response has no Content-Type header")]
    MissingContentType,

    /// The response format has no formatter.
    #[error("Unsupported response format {0}")]
    UnsupportedContentType(String),

    /// The service reported an error inside a successful response.
    ///
    /// Carries the raw response body.
    #[error("{0}")]
    ServiceError(String),

    /// The request could not be built from the parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Error returned by the retry loop.
#[derive(Debug, Error)]
pub enum FetchError {
    /// An attempt failed with an error that retrying cannot fix.
    #[error("{0}")]
    Rejected(#[source] RequestError),

    /// All attempts failed.
    #[error("Giving up after {attempts} attempt(s): {last_error}")]
    MaxRetriesExceeded {
        /// Number of attempts made
        attempts: u32,
        /// Error from the final attempt
        #[source]
        last_error: RequestError,
    },
}

impl FetchError {
    /// Returns the error from the final attempt.
    #[must_use]
    pub const fn last_error(&self) -> &RequestError {
        match self {
            Self::Rejected(e) | Self::MaxRetriesExceeded { last_error: e, .. } => e,
        }
    }
}
