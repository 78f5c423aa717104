//! # ink-service
//!
//! Content operations for the Ink REST layer.
//!
//! [`ContentDataService`] is the only place with decision logic: the shared
//! read-through cache slots for detail and list reads, the article-only
//! checks, and the external API result rules. Every collaborator is an
//! injected `ink-core` capability trait.

pub mod cache;
pub mod events;
pub mod service;

#[cfg(test)]
mod test_support;

pub use cache::MemoryCache;
pub use events::{ContentEvent, ContentSubscriber, StatusLogSubscriber};
pub use service::ContentDataService;
