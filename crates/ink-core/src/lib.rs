//! # ink-core
//!
//! Core types, capability traits, and error types for Ink.
//!
//! This crate provides the foundational types shared across all Ink crates:
//! - Content entities (`ContentItem`) and their listing/detail projections
//! - The `ContentKind` enum carrying the single-writable-kind rule
//! - Create/update payload extraction
//! - Capability traits for storage, caching, and outbound HTTP
//! - The cross-cutting `ContentError` type
//! - JSON response shapes returned by the REST layer

pub mod entities;
pub mod enums;
pub mod errors;
pub mod payload;
pub mod ports;
pub mod responses;

pub use entities::{ContentId, ContentItem, ContentRecord, ContentSummary};
pub use enums::ContentKind;
pub use errors::ContentError;
