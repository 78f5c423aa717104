//! Cross-cutting error type for Ink.
//!
//! Every capability trait and every `ContentDataService` operation returns
//! `ContentError`. Backend crates define their own error enums
//! (`DatabaseError`, `HttpError`) and convert into this one at the trait
//! boundary. Only `ink-server` translates it into HTTP responses.
//!
//! The `Display` text of each variant is the bare message, because it becomes
//! the `error` field of the JSON failure body.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    /// Bad, missing, or wrong-kind input.
    #[error("{0}")]
    Validation(String),

    /// Authorization failure raised by the store layer.
    #[error("{0}")]
    AccessDenied(String),

    /// Persistence failure.
    #[error("{0}")]
    Storage(String),

    /// The outbound call to the external API failed.
    #[error("{0}")]
    ExternalService(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ContentError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn external(message: impl Into<String>) -> Self {
        Self::ExternalService(message.into())
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
