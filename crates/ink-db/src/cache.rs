//! Database-backed cache over the `cache_entries` table.
//!
//! Values and tags are stored as JSON text. `expire = -1` marks a permanent
//! entry; any other value is a unix timestamp after which reads miss.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use ink_core::ContentError;
use ink_core::enums::CacheExpiry;
use ink_core::ports::{Cache, CacheEntry};

use crate::InkDb;
use crate::error::DatabaseError;

const PERMANENT: i64 = -1;

const fn expiry_to_sql(expiry: CacheExpiry) -> i64 {
    match expiry {
        CacheExpiry::Permanent => PERMANENT,
        CacheExpiry::At(ts) => ts,
    }
}

const fn expiry_from_sql(expire: i64) -> CacheExpiry {
    if expire == PERMANENT {
        CacheExpiry::Permanent
    } else {
        CacheExpiry::At(expire)
    }
}

pub struct SqlCache {
    db: Arc<InkDb>,
}

impl SqlCache {
    #[must_use]
    pub const fn new(db: Arc<InkDb>) -> Self {
        Self { db }
    }

    pub async fn get_entry(&self, key: &str) -> Result<Option<CacheEntry>, DatabaseError> {
        let mut rows = self
            .db
            .conn()
            .query(
                "SELECT data, expire, tags FROM cache_entries WHERE cid = ?1",
                [key],
            )
            .await?;
        let Some(row) = rows.next().await? else {
            return Ok(None);
        };

        let expiry = expiry_from_sql(row.get::<i64>(1)?);
        if expiry.is_expired(Utc::now().timestamp()) {
            tracing::debug!(key, "cache entry expired");
            return Ok(None);
        }

        Ok(Some(CacheEntry {
            key: key.to_string(),
            data: serde_json::from_str(&row.get::<String>(0)?)?,
            expiry,
            tags: serde_json::from_str(&row.get::<String>(2)?)?,
        }))
    }

    pub async fn set_entry(
        &self,
        key: &str,
        data: &Value,
        expiry: CacheExpiry,
        tags: &[&str],
    ) -> Result<(), DatabaseError> {
        self.db
            .conn()
            .execute(
                "INSERT INTO cache_entries (cid, data, expire, tags, created)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(cid) DO UPDATE SET
                    data = excluded.data,
                    expire = excluded.expire,
                    tags = excluded.tags,
                    created = excluded.created",
                libsql::params![
                    key,
                    serde_json::to_string(data)?,
                    expiry_to_sql(expiry),
                    serde_json::to_string(tags)?,
                    Utc::now().timestamp()
                ],
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Cache for SqlCache {
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>, ContentError> {
        Ok(self.get_entry(key).await?)
    }

    async fn set(
        &self,
        key: &str,
        data: Value,
        expiry: CacheExpiry,
        tags: &[&str],
    ) -> Result<(), ContentError> {
        Ok(self.set_entry(key, &data, expiry, tags).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    async fn test_cache() -> SqlCache {
        SqlCache::new(Arc::new(InkDb::open_local(":memory:").await.unwrap()))
    }

    #[tokio::test]
    async fn miss_on_unknown_key() {
        let cache = test_cache().await;
        assert!(cache.get_entry("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_then_get() {
        let cache = test_cache().await;
        cache
            .set_entry("k", &json!({"a": 1}), CacheExpiry::Permanent, &["tag_a"])
            .await
            .unwrap();

        let entry = cache.get_entry("k").await.unwrap().unwrap();
        assert_eq!(entry.data, json!({"a": 1}));
        assert_eq!(entry.expiry, CacheExpiry::Permanent);
        assert_eq!(entry.tags, vec!["tag_a".to_string()]);
    }

    #[tokio::test]
    async fn set_overwrites_whole_value() {
        let cache = test_cache().await;
        cache
            .set_entry("k", &json!([1, 2]), CacheExpiry::Permanent, &["old"])
            .await
            .unwrap();
        cache
            .set_entry("k", &json!([3]), CacheExpiry::Permanent, &[])
            .await
            .unwrap();

        let entry = cache.get_entry("k").await.unwrap().unwrap();
        assert_eq!(entry.data, json!([3]));
        assert!(entry.tags.is_empty());
    }

    #[tokio::test]
    async fn expired_entry_is_a_miss() {
        let cache = test_cache().await;
        let past = Utc::now().timestamp() - 60;
        cache
            .set_entry("k", &json!(1), CacheExpiry::At(past), &[])
            .await
            .unwrap();
        assert!(cache.get_entry("k").await.unwrap().is_none());
    }
}
