//! Content operations.
//!
//! Detail and list reads go through two shared cache slots, `content_detail`
//! and `content_list`. The slots are not keyed by item: once filled, every
//! detail read returns the first cached item and every list read returns the
//! first cached listing. Nothing invalidates them on update or delete. Cache
//! failures are logged and otherwise ignored.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use ink_config::ExternalApiConfig;
use ink_core::entities::ContentDetail;
use ink_core::enums::{CacheExpiry, SortDirection};
use ink_core::payload::FieldPayload;
use ink_core::ports::{
    Cache, ContentQuery, ContentStore, HttpClient, HttpMethod, HttpResponse, RawContentQuery,
    RequestOptions,
};
use ink_core::responses::{ContentTypeMessage, Greeting, OperationResponse, RecentContent};
use ink_core::{ContentError, ContentId, ContentItem, ContentKind, ContentSummary};

use crate::events::{self, ContentEvent, ContentSubscriber};

const DETAIL_CACHE_KEY: &str = "content_detail";
const DETAIL_CACHE_TAG: &str = "content_data";
const LIST_CACHE_KEY: &str = "content_list";
const LIST_CACHE_TAG: &str = "content_list";

/// Row cap for [`ContentDataService::list_recent_raw`].
pub const RECENT_LIMIT: u32 = 15;

const DETAIL_INVALID_ID: &str = "Article id is invalid.";
const DETAIL_NOT_ARTICLE: &str = "Please provide id of article only.";
const INVALID_ARGUMENT: &str = "Invalid node argument.";
const NOT_ARTICLE: &str = "Only article content type is supported.";
const GREETING: &str = "This is from custom service";

pub struct ContentDataService {
    store: Arc<dyn ContentStore>,
    raw: Arc<dyn RawContentQuery>,
    cache: Arc<dyn Cache>,
    http: Arc<dyn HttpClient>,
    external: ExternalApiConfig,
    subscribers: Vec<Arc<dyn ContentSubscriber>>,
}

impl ContentDataService {
    #[must_use]
    pub fn new(
        store: Arc<dyn ContentStore>,
        raw: Arc<dyn RawContentQuery>,
        cache: Arc<dyn Cache>,
        http: Arc<dyn HttpClient>,
        external: ExternalApiConfig,
    ) -> Self {
        Self {
            store,
            raw,
            cache,
            http,
            external,
            subscribers: Vec::new(),
        }
    }

    /// Register a subscriber for content events.
    #[must_use]
    pub fn with_subscriber(mut self, subscriber: Arc<dyn ContentSubscriber>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// The store this service writes to, for resolving path identifiers.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }

    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// Create an article from a `{"data": {...}}` payload.
    ///
    /// Returns `Ok(None)` without touching the store when the payload is
    /// empty, not an object, or has no `data` object.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn create(&self, payload: &Value) -> Result<Option<OperationResponse>, ContentError> {
        let Some(fields) = FieldPayload::from_value(payload) else {
            tracing::debug!("create: no data in payload");
            return Ok(None);
        };

        let mut item = self.store.create(ContentKind::Article);
        fields.apply_to(&mut item);
        self.store.save(&mut item).await?;
        let id = saved_id(&item)?;

        tracing::debug!(id, fields = fields.len(), "content created");
        Ok(Some(OperationResponse {
            id,
            message: format!("{} has been created.", item.title()),
        }))
    }

    /// Detail projection of an article, served from the shared detail slot
    /// when it is filled.
    ///
    /// # Errors
    ///
    /// `Validation` if the handle is absent or not an article.
    pub async fn get_detail(&self, item: Option<ContentItem>) -> Result<ContentDetail, ContentError> {
        let item = item.ok_or_else(|| ContentError::validation(DETAIL_INVALID_ID))?;
        if !item.kind().is_writable() {
            return Err(ContentError::validation(DETAIL_NOT_ARTICLE));
        }

        if let Some(detail) = self.cached::<ContentDetail>(DETAIL_CACHE_KEY).await {
            return Ok(detail);
        }

        let detail =
            ContentDetail::from_item(&item).ok_or_else(|| ContentError::validation(DETAIL_INVALID_ID))?;
        self.fill(DETAIL_CACHE_KEY, &detail, DETAIL_CACHE_TAG).await;
        Ok(detail)
    }

    /// Apply payload fields to an existing article and save it.
    ///
    /// A payload without a `data` object saves the item unchanged.
    ///
    /// # Errors
    ///
    /// `Validation` if the handle is absent or not an article; store
    /// failures otherwise.
    pub async fn update(
        &self,
        item: Option<ContentItem>,
        payload: &Value,
    ) -> Result<OperationResponse, ContentError> {
        let (mut item, id) = require_article(item)?;
        FieldPayload::from_value_lenient(payload).apply_to(&mut item);
        self.store.save(&mut item).await?;

        let title = item.title().to_string();
        events::publish(
            &self.subscribers,
            &ContentEvent::Updated {
                id,
                title: title.clone(),
            },
        );
        Ok(OperationResponse {
            id,
            message: format!("{title} has been updated."),
        })
    }

    /// # Errors
    ///
    /// `Validation` if the handle is absent or not an article; store
    /// failures otherwise.
    pub async fn delete(&self, item: Option<ContentItem>) -> Result<OperationResponse, ContentError> {
        let (item, id) = require_article(item)?;
        let title = item.title().to_string();
        self.store.delete(item).await?;

        tracing::debug!(id, "content deleted");
        Ok(OperationResponse {
            id,
            message: format!("{title} has been deleted."),
        })
    }

    // -----------------------------------------------------------------------
    // Listings
    // -----------------------------------------------------------------------

    /// Published items, newest first, served from the shared list slot when
    /// it is filled. An empty result is never cached.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn list_published(&self) -> Result<Vec<ContentSummary>, ContentError> {
        if let Some(list) = self.cached::<Vec<ContentSummary>>(LIST_CACHE_KEY).await {
            return Ok(list);
        }

        let ids = self
            .store
            .query(ContentQuery::published().sort_by_created(SortDirection::Desc))
            .await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let list: Vec<ContentSummary> = self
            .store
            .load_many(&ids)
            .await?
            .iter()
            .filter_map(ContentSummary::from_item)
            .collect();
        self.fill(LIST_CACHE_KEY, &list, LIST_CACHE_TAG).await;
        Ok(list)
    }

    /// Up to [`RECENT_LIMIT`] published rows straight from the database, plus
    /// the uncapped published count.
    ///
    /// # Errors
    ///
    /// Propagates query failures.
    pub async fn list_recent_raw(&self) -> Result<RecentContent, ContentError> {
        let data = self.raw.published_rows(RECENT_LIMIT).await?;
        let count = self.raw.published_count().await?;
        if count == 0 {
            return Ok(RecentContent::empty());
        }
        Ok(RecentContent {
            data,
            count: Some(count),
        })
    }

    // -----------------------------------------------------------------------
    // External API
    // -----------------------------------------------------------------------

    /// GET the configured endpoint and pass its JSON through.
    ///
    /// Returns `Ok(None)` for a non-200 status or an empty body.
    ///
    /// # Errors
    ///
    /// `ExternalService` on transport failure or a body that is not JSON.
    pub async fn get_external_data(&self) -> Result<Option<Value>, ContentError> {
        let resp = self
            .http
            .request(
                HttpMethod::Get,
                &self.external.endpoint,
                RequestOptions::default(),
            )
            .await?;
        if resp.status != 200 {
            tracing::warn!(status = resp.status, endpoint = %self.external.endpoint, "external API returned non-200");
            return Ok(None);
        }
        decode_body(&resp)
    }

    /// POST `payload` to the configured endpoint with the fixed POST timeout.
    ///
    /// Same result rules as [`get_external_data`], except any 2xx status is
    /// accepted.
    ///
    /// # Errors
    ///
    /// `ExternalService` on transport failure or a body that is not JSON.
    ///
    /// [`get_external_data`]: ContentDataService::get_external_data
    pub async fn post_external_data(&self, payload: Value) -> Result<Option<Value>, ContentError> {
        let options = RequestOptions {
            json: Some(payload),
            timeout: Some(self.external.post_timeout()),
            ..RequestOptions::default()
        };
        let resp = self
            .http
            .request(HttpMethod::Post, &self.external.endpoint, options)
            .await?;
        if !(200..300).contains(&resp.status) {
            tracing::warn!(status = resp.status, endpoint = %self.external.endpoint, "external API rejected POST");
            return Ok(None);
        }
        decode_body(&resp)
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn classify_content_type(&self, type_name: &str) -> ContentTypeMessage {
        ContentTypeMessage {
            message: ContentKind::parse(type_name).description().to_string(),
        }
    }

    #[must_use]
    pub fn greeting(&self) -> Greeting {
        Greeting {
            markup: GREETING.to_string(),
        }
    }

    // -----------------------------------------------------------------------
    // Cache slots
    // -----------------------------------------------------------------------

    async fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.cache.get(key).await {
            Ok(Some(entry)) => match serde_json::from_value(entry.data) {
                Ok(value) => {
                    tracing::debug!(key, "cache hit");
                    Some(value)
                }
                Err(e) => {
                    tracing::warn!(key, %e, "cached value has unexpected shape; treating as miss");
                    None
                }
            },
            Ok(None) => {
                tracing::debug!(key, "cache miss");
                None
            }
            Err(e) => {
                tracing::warn!(key, %e, "cache read failed; treating as miss");
                None
            }
        }
    }

    async fn fill<T: Serialize>(&self, key: &str, value: &T, tag: &str) {
        let data = match serde_json::to_value(value) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(key, %e, "cache value not serializable");
                return;
            }
        };
        if let Err(e) = self.cache.set(key, data, CacheExpiry::Permanent, &[tag]).await {
            tracing::warn!(key, %e, "cache write failed");
        }
    }
}

/// Unwrap a handle for update or delete: it must exist, be saved, and be an
/// article.
fn require_article(item: Option<ContentItem>) -> Result<(ContentItem, ContentId), ContentError> {
    let item = item.ok_or_else(|| ContentError::validation(INVALID_ARGUMENT))?;
    if !item.kind().is_writable() {
        return Err(ContentError::validation(NOT_ARTICLE));
    }
    let id = item
        .id()
        .ok_or_else(|| ContentError::validation(INVALID_ARGUMENT))?;
    Ok((item, id))
}

fn saved_id(item: &ContentItem) -> Result<ContentId, ContentError> {
    item.id()
        .ok_or_else(|| ContentError::storage("store did not assign an identifier"))
}

fn decode_body(resp: &HttpResponse) -> Result<Option<Value>, ContentError> {
    if resp.body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&resp.body)
        .map(Some)
        .map_err(|e| ContentError::external(format!("external API returned invalid JSON: {e}")))
}
