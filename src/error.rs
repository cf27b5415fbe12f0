//! Standard errors used by all functions in the crate.

use std::fmt;

/// Error collecting all possible failures of the merchant client and the chat surface.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// No merchant configuration has been stored yet.
    #[error("merchant API is not configured, please contact the administrator")]
    NotConfigured,
    /// Reqwest error: the upstream could not be reached or answered with a
    /// non-success HTTP status and no readable envelope.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    /// Error code returned inside a merchant API envelope.
    #[error("{0}")]
    ApiError(#[from] ApiError),
    /// The upstream answered successfully but without the expected `data` payload.
    #[error("{0}")]
    NotFound(&'static str),
    /// Malformed command arguments. Never reaches the network.
    #[error("{0}")]
    Validation(String),
    /// The key-value storage backend failed.
    #[error("storage error: {0}")]
    Storage(anyhow::Error),
    /// A stored record or a response body could not be (de)serialized.
    #[error("malformed payload: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Catch-all variant for unexpected errors.
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<reqwest_middleware::Error> for Error {
    fn from(e: reqwest_middleware::Error) -> Self {
        match e {
            reqwest_middleware::Error::Reqwest(e) => Error::HttpError(e),
            reqwest_middleware::Error::Middleware(e) => {
                e.downcast::<Error>().unwrap_or_else(Error::Other)
            }
        }
    }
}

impl From<Error> for reqwest_middleware::Error {
    fn from(e: Error) -> Self {
        reqwest_middleware::Error::Middleware(e.into())
    }
}

/// Application-level failure reported by the merchant API.
///
/// The upstream wraps every response in `{code, message, data}`; any `code`
/// other than `200` becomes an `ApiError`.
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub struct ApiError {
    /// Code carried by the response envelope.
    pub code: i64,
    /// Human readable message, surfaced verbatim to the user.
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
