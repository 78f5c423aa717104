//! Outbound HTTP error types.

use ink_core::ContentError;
use thiserror::Error;

/// Errors raised before a response status is available.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Connection, TLS, timeout, or body-read failure.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The client could not be constructed.
    #[error("client build failed: {0}")]
    Build(String),
}

impl From<HttpError> for ContentError {
    fn from(err: HttpError) -> Self {
        Self::ExternalService(err.to_string())
    }
}
