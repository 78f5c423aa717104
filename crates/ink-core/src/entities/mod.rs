//! Entity structs for Ink content.
//!
//! `ContentItem` is the handle every operation works on; `ContentRecord` is
//! its flat persistence shape; `ContentSummary` is the listing projection.

mod content;
mod summary;

pub use content::{ContentId, ContentItem, ContentRecord};
pub use summary::{ContentDetail, ContentSummary, RawContentRow};
