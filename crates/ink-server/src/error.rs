//! Error-to-HTTP mapping.
//!
//! The same error kind maps to different statuses depending on the
//! operation: a validation failure on detail read is a 500, while on update
//! it is a 400. [`status_for`] holds the whole table.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use ink_core::ContentError;

/// The service operation a handler delegated to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Detail,
    Update,
    Delete,
    ExternalGet,
    ExternalPost,
    ListPublished,
    ListRecent,
}

impl Operation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Detail => "detail",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::ExternalGet => "external_get",
            Self::ExternalPost => "external_post",
            Self::ListPublished => "list_published",
            Self::ListRecent => "list_recent",
        }
    }
}

/// HTTP status for `error` raised by `op`.
#[must_use]
pub const fn status_for(op: Operation, error: &ContentError) -> StatusCode {
    match (op, error) {
        (Operation::Create | Operation::Update | Operation::Delete, ContentError::Validation(_)) => {
            StatusCode::BAD_REQUEST
        }
        (Operation::Create | Operation::Delete, _) => StatusCode::INTERNAL_SERVER_ERROR,
        (_, ContentError::AccessDenied(_)) => StatusCode::FORBIDDEN,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// A service error on its way out as `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError {
    op: Operation,
    error: ContentError,
}

impl ApiError {
    #[must_use]
    pub const fn new(op: Operation, error: ContentError) -> Self {
        Self { op, error }
    }

    /// Adapter for `map_err`.
    pub fn on(op: Operation) -> impl Fn(ContentError) -> Self {
        move |error| Self::new(op, error)
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        status_for(self.op, &self.error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.error.to_string();
        if status.is_server_error() {
            tracing::error!(op = self.op.as_str(), status = status.as_u16(), error = %message, "request failed");
        } else {
            tracing::debug!(op = self.op.as_str(), status = status.as_u16(), error = %message, "request rejected");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
