//! JSON response shapes returned by the REST layer.

use serde::{Deserialize, Serialize};

use crate::entities::{ContentId, RawContentRow};

/// Response from create, update, and delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OperationResponse {
    pub id: ContentId,
    pub message: String,
}

/// Response from the raw recent-content listing.
///
/// `count` is omitted entirely when nothing is published.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecentContent {
    pub data: Vec<RawContentRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl RecentContent {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            data: Vec::new(),
            count: None,
        }
    }
}

/// Response from the content-type lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentTypeMessage {
    pub message: String,
}

/// Response from the module's demo endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Greeting {
    pub markup: String,
}
