//! In-process cache backend.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use ink_core::ContentError;
use ink_core::enums::CacheExpiry;
use ink_core::ports::{Cache, CacheEntry};

/// `Cache` over a `RwLock<HashMap>`. Every `set` replaces the whole entry.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |entries| entries.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>, ContentError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| ContentError::storage("memory cache lock poisoned"))?;
        Ok(entries
            .get(key)
            .filter(|entry| !entry.expiry.is_expired(Utc::now().timestamp()))
            .cloned())
    }

    async fn set(
        &self,
        key: &str,
        data: Value,
        expiry: CacheExpiry,
        tags: &[&str],
    ) -> Result<(), ContentError> {
        let entry = CacheEntry {
            key: key.to_string(),
            data,
            expiry,
            tags: tags.iter().map(ToString::to_string).collect(),
        };
        self.entries
            .write()
            .map_err(|_| ContentError::storage("memory cache lock poisoned"))?
            .insert(key.to_string(), entry);
        Ok(())
    }
}
