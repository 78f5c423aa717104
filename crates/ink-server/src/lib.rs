//! # ink-server
//!
//! HTTP surface for Ink content operations.
//!
//! Routes are a pure mapping layer over [`ink_service::ContentDataService`]:
//! each handler resolves its inputs, calls exactly one service operation, and
//! maps the result or the [`ink_core::ContentError`] to a response. The
//! status code for an error depends on both the error kind and the operation
//! (see [`error::status_for`]).

pub mod bootstrap;
pub mod cli;
pub mod error;
pub mod middleware;
pub mod response;
pub mod routes;

use std::sync::Arc;

use ink_service::ContentDataService;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ContentDataService>,
}

impl AppState {
    #[must_use]
    pub fn new(service: ContentDataService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub use routes::router;
