use serde::{Deserialize, Serialize};

use super::content::{ContentId, ContentItem};

/// Listing projection: identifier and title only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentSummary {
    pub id: ContentId,
    pub title: String,
}

/// Detail projection returned for a single article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentDetail {
    pub id: ContentId,
    pub title: String,
    pub body: String,
}

/// One row of the raw published-content listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawContentRow {
    pub id: ContentId,
    pub vid: u64,
    pub title: String,
}

impl ContentSummary {
    /// Project a saved item. Unsaved items have no identifier to list.
    #[must_use]
    pub fn from_item(item: &ContentItem) -> Option<Self> {
        Some(Self {
            id: item.id()?,
            title: item.title().to_string(),
        })
    }
}

impl ContentDetail {
    #[must_use]
    pub fn from_item(item: &ContentItem) -> Option<Self> {
        Some(Self {
            id: item.id()?,
            title: item.title().to_string(),
            body: item.body().to_string(),
        })
    }
}
