//! In-memory collaborators for service tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::Value;

use ink_config::ExternalApiConfig;
use ink_core::entities::RawContentRow;
use ink_core::enums::{CacheExpiry, SortDirection};
use ink_core::ports::{
    Cache, CacheEntry, ContentQuery, ContentStore, HttpClient, HttpMethod, HttpResponse,
    RawContentQuery, RequestOptions,
};
use ink_core::{ContentError, ContentId, ContentItem, ContentKind, ContentRecord};

use crate::cache::MemoryCache;
use crate::events::{ContentEvent, ContentSubscriber};
use crate::service::ContentDataService;

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Map-backed store that counts every call.
#[derive(Default)]
pub struct FakeStore {
    items: Mutex<BTreeMap<ContentId, ContentItem>>,
    next_id: AtomicUsize,
    pub saves: AtomicUsize,
    pub deletes: AtomicUsize,
    pub queries: AtomicUsize,
}

impl FakeStore {
    /// Insert a stored item directly; later inserts get later creation times.
    pub fn insert(&self, kind: ContentKind, title: &str, published: bool) -> ContentItem {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as u64 + 1;
        let created_at = Utc::now() + Duration::seconds(i64::try_from(id).unwrap());
        let item = ContentItem::from(ContentRecord {
            id: Some(id),
            kind,
            title: title.into(),
            body: format!("{title} body"),
            published,
            revision_id: Some(1),
            created_at,
            changed_at: created_at,
            fields: BTreeMap::new(),
        });
        self.items.lock().unwrap().insert(id, item.clone());
        item
    }

    pub fn stored(&self, id: ContentId) -> Option<ContentItem> {
        self.items.lock().unwrap().get(&id).cloned()
    }

    pub fn mutations(&self) -> usize {
        self.saves.load(Ordering::SeqCst) + self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentStore for FakeStore {
    async fn load(&self, id: ContentId) -> Result<Option<ContentItem>, ContentError> {
        Ok(self.stored(id))
    }

    async fn query(&self, query: ContentQuery) -> Result<Vec<ContentId>, ContentError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let items = self.items.lock().unwrap();
        let mut matching: Vec<&ContentItem> = items
            .values()
            .filter(|item| query.published.is_none_or(|p| item.is_published() == p))
            .collect();
        match query.created {
            Some(SortDirection::Desc) => matching.sort_by_key(|item| std::cmp::Reverse(item.created_at())),
            Some(SortDirection::Asc) => matching.sort_by_key(|item| item.created_at()),
            None => {}
        }
        Ok(matching.iter().filter_map(|item| item.id()).collect())
    }

    async fn load_many(&self, ids: &[ContentId]) -> Result<Vec<ContentItem>, ContentError> {
        Ok(ids.iter().filter_map(|id| self.stored(*id)).collect())
    }

    async fn save(&self, item: &mut ContentItem) -> Result<(), ContentError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        let id = item
            .id()
            .unwrap_or_else(|| self.next_id.fetch_add(1, Ordering::SeqCst) as u64 + 1);
        item.mark_saved(id, item.revision_id().unwrap_or(0) + 1, Utc::now());
        self.items.lock().unwrap().insert(id, item.clone());
        Ok(())
    }

    async fn delete(&self, item: ContentItem) -> Result<(), ContentError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if let Some(id) = item.id() {
            self.items.lock().unwrap().remove(&id);
        }
        Ok(())
    }
}

/// Store whose writes always fail.
pub struct BrokenStore;

#[async_trait]
impl ContentStore for BrokenStore {
    async fn load(&self, _id: ContentId) -> Result<Option<ContentItem>, ContentError> {
        Err(ContentError::storage("database is locked"))
    }

    async fn query(&self, _query: ContentQuery) -> Result<Vec<ContentId>, ContentError> {
        Err(ContentError::storage("database is locked"))
    }

    async fn load_many(&self, _ids: &[ContentId]) -> Result<Vec<ContentItem>, ContentError> {
        Err(ContentError::storage("database is locked"))
    }

    async fn save(&self, _item: &mut ContentItem) -> Result<(), ContentError> {
        Err(ContentError::storage("database is locked"))
    }

    async fn delete(&self, _item: ContentItem) -> Result<(), ContentError> {
        Err(ContentError::storage("database is locked"))
    }
}

// ---------------------------------------------------------------------------
// Raw listing
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeRaw {
    pub rows: Vec<RawContentRow>,
    pub count: u64,
    pub limits: Mutex<Vec<u32>>,
}

impl FakeRaw {
    pub fn with_published(count: u64) -> Self {
        Self {
            rows: (1..=count)
                .map(|id| RawContentRow {
                    id,
                    vid: id * 10,
                    title: format!("Item {id}"),
                })
                .collect(),
            count,
            limits: Mutex::default(),
        }
    }
}

#[async_trait]
impl RawContentQuery for FakeRaw {
    async fn published_rows(&self, limit: u32) -> Result<Vec<RawContentRow>, ContentError> {
        self.limits.lock().unwrap().push(limit);
        Ok(self.rows.iter().take(limit as usize).cloned().collect())
    }

    async fn published_count(&self) -> Result<u64, ContentError> {
        Ok(self.count)
    }
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// Cache whose reads and writes always fail.
pub struct BrokenCache;

#[async_trait]
impl Cache for BrokenCache {
    async fn get(&self, _key: &str) -> Result<Option<CacheEntry>, ContentError> {
        Err(ContentError::storage("cache backend unavailable"))
    }

    async fn set(
        &self,
        _key: &str,
        _data: Value,
        _expiry: CacheExpiry,
        _tags: &[&str],
    ) -> Result<(), ContentError> {
        Err(ContentError::storage("cache backend unavailable"))
    }
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

pub type RecordedRequest = (HttpMethod, String, RequestOptions);

/// Returns a canned response and records every request.
pub struct StubHttp {
    response: Result<HttpResponse, String>,
    pub requests: Mutex<Vec<RecordedRequest>>,
}

impl StubHttp {
    pub fn responding(status: u16, body: &str) -> Self {
        Self {
            response: Ok(HttpResponse {
                status,
                body: body.into(),
            }),
            requests: Mutex::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.into()),
            requests: Mutex::default(),
        }
    }
}

#[async_trait]
impl HttpClient for StubHttp {
    async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse, ContentError> {
        self.requests
            .lock()
            .unwrap()
            .push((method, url.to_string(), options));
        self.response.clone().map_err(ContentError::ExternalService)
    }
}

// ---------------------------------------------------------------------------
// Subscribers
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingSubscriber {
    pub events: Mutex<Vec<ContentEvent>>,
}

impl ContentSubscriber for RecordingSubscriber {
    fn on_event(&self, event: &ContentEvent) -> Result<(), ContentError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// A service wired to fakes, with handles kept for assertions.
pub struct Harness {
    pub service: ContentDataService,
    pub store: Arc<FakeStore>,
    pub raw: Arc<FakeRaw>,
    pub cache: Arc<MemoryCache>,
    pub http: Arc<StubHttp>,
}

pub fn external_config() -> ExternalApiConfig {
    ExternalApiConfig {
        endpoint: "https://api.example.com/posts".into(),
        timeout_secs: 30,
        post_timeout_secs: 5,
    }
}

impl Harness {
    pub fn new() -> Self {
        Self::with(FakeRaw::default(), StubHttp::responding(200, r#"["My data"]"#))
    }

    pub fn with(raw: FakeRaw, http: StubHttp) -> Self {
        let store = Arc::new(FakeStore::default());
        let raw = Arc::new(raw);
        let cache = Arc::new(MemoryCache::new());
        let http = Arc::new(http);
        let service = ContentDataService::new(
            store.clone(),
            raw.clone(),
            cache.clone(),
            http.clone(),
            external_config(),
        );
        Self {
            service,
            store,
            raw,
            cache,
            http,
        }
    }
}
