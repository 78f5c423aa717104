//! Capability traits the content service is built on.
//!
//! Each trait is object-safe (`async-trait`) so the service can hold
//! `Arc<dyn Trait>` and tests can substitute in-memory fakes.
//!
//! | Trait | Production backend |
//! |---|---|
//! | [`ContentStore`] | `ink_db::SqlContentStore` |
//! | [`RawContentQuery`] | `ink_db::SqlContentStore` |
//! | [`Cache`] | `ink_service::MemoryCache`, `ink_db::SqlCache` |
//! | [`HttpClient`] | `ink_http::ReqwestClient` |

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::{ContentId, ContentItem, RawContentRow};
use crate::enums::{CacheExpiry, ContentKind, SortDirection};
use crate::errors::ContentError;

// ---------------------------------------------------------------------------
// Content store
// ---------------------------------------------------------------------------

/// Filter and ordering for [`ContentStore::query`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentQuery {
    /// `Some(true)` for published items only, `Some(false)` for unpublished.
    pub published: Option<bool>,
    /// Sort by creation time; `None` leaves the order to the store.
    pub created: Option<SortDirection>,
}

impl ContentQuery {
    #[must_use]
    pub const fn published() -> Self {
        Self {
            published: Some(true),
            created: None,
        }
    }

    #[must_use]
    pub const fn sort_by_created(mut self, direction: SortDirection) -> Self {
        self.created = Some(direction);
        self
    }
}

/// Entity storage for content items.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Build a new, unsaved item. Nothing is persisted until [`save`].
    ///
    /// [`save`]: ContentStore::save
    fn create(&self, kind: ContentKind) -> ContentItem {
        ContentItem::new(kind)
    }

    async fn load(&self, id: ContentId) -> Result<Option<ContentItem>, ContentError>;

    async fn query(&self, query: ContentQuery) -> Result<Vec<ContentId>, ContentError>;

    /// Load several items, preserving the order of `ids`. Unknown ids are
    /// skipped.
    async fn load_many(&self, ids: &[ContentId]) -> Result<Vec<ContentItem>, ContentError>;

    /// Persist the item, assigning an identifier if it is new.
    async fn save(&self, item: &mut ContentItem) -> Result<(), ContentError>;

    async fn delete(&self, item: ContentItem) -> Result<(), ContentError>;
}

/// Direct relational listing that bypasses the entity abstraction.
#[async_trait]
pub trait RawContentQuery: Send + Sync {
    /// Up to `limit` published rows joined against their revision.
    async fn published_rows(&self, limit: u32) -> Result<Vec<RawContentRow>, ContentError>;

    /// Total number of published rows, ignoring any limit.
    async fn published_count(&self) -> Result<u64, ContentError>;
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// A stored cache value with its lifetime and informational tags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheEntry {
    pub key: String,
    pub data: Value,
    pub expiry: CacheExpiry,
    pub tags: Vec<String>,
}

/// Key/value cache. Every `set` overwrites the whole value.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>, ContentError>;

    async fn set(
        &self,
        key: &str,
        data: Value,
        expiry: CacheExpiry,
        tags: &[&str],
    ) -> Result<(), ContentError>;
}

// ---------------------------------------------------------------------------
// Outbound HTTP
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Per-request options for [`HttpClient::request`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub headers: BTreeMap<String, String>,
    /// JSON request body.
    pub json: Option<Value>,
    /// Overrides the client-wide timeout for this request.
    pub timeout: Option<Duration>,
}

/// Status code and raw body of an outbound response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Single-attempt outbound HTTP client.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Errors are transport failures only; any status code is a response.
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse, ContentError>;
}
