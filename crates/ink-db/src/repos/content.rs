//! Content repository: entity CRUD, status/created queries, and the raw
//! published listing.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use tokio::sync::Mutex;

use ink_core::entities::RawContentRow;
use ink_core::ports::{ContentQuery, ContentStore, RawContentQuery};
use ink_core::{ContentError, ContentId, ContentItem, ContentKind, ContentRecord};

use crate::InkDb;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_u64, get_u64, parse_datetime, to_sql_id};

const SELECT_COLUMNS: &str =
    "id, type, title, body, status, revision_id, fields, created_at, changed_at";

/// Ids bound per `IN (...)` query; SQLite builds before 3.32 cap bound
/// variables at 999.
const MAX_BOUND_IDS: usize = 500;

/// Fixed-width RFC 3339 so `ORDER BY created_at` sorts chronologically.
fn sql_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn row_to_item(row: &libsql::Row) -> Result<ContentItem, DatabaseError> {
    let fields: BTreeMap<String, String> = serde_json::from_str(&row.get::<String>(6)?)?;
    Ok(ContentItem::from(ContentRecord {
        id: Some(get_u64(row, 0)?),
        kind: ContentKind::parse(&row.get::<String>(1)?),
        title: row.get::<String>(2)?,
        body: row.get::<String>(3)?,
        published: row.get::<i64>(4)? != 0,
        revision_id: get_opt_u64(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        changed_at: parse_datetime(&row.get::<String>(8)?)?,
        fields,
    }))
}

/// `ContentStore` and `RawContentQuery` backed by the content database.
///
/// Saves and deletes are serialized through a write lock so the content row
/// and its revision row are always written together.
pub struct SqlContentStore {
    db: Arc<InkDb>,
    write_lock: Mutex<()>,
}

impl SqlContentStore {
    #[must_use]
    pub fn new(db: Arc<InkDb>) -> Self {
        Self {
            db,
            write_lock: Mutex::new(()),
        }
    }

    /// Ids past the SQLite integer range can never have been assigned and
    /// load as absent.
    pub async fn get_content(&self, id: ContentId) -> Result<Option<ContentItem>, DatabaseError> {
        let Ok(sql_id) = i64::try_from(id) else {
            return Ok(None);
        };
        let mut rows = self
            .db
            .conn()
            .query(
                &format!("SELECT {SELECT_COLUMNS} FROM content WHERE id = ?1"),
                [sql_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_item(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn query_ids(&self, query: ContentQuery) -> Result<Vec<ContentId>, DatabaseError> {
        let mut sql = String::from("SELECT id FROM content WHERE 1=1");
        let mut params: Vec<libsql::Value> = Vec::new();
        if let Some(published) = query.published {
            sql.push_str(" AND status = ?1");
            params.push(i64::from(published).into());
        }
        if let Some(direction) = query.created {
            let dir = direction.as_sql();
            sql.push_str(&format!(" ORDER BY created_at {dir}, id {dir}"));
        }

        let mut rows = self
            .db
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next().await? {
            ids.push(get_u64(&row, 0)?);
        }
        Ok(ids)
    }

    pub async fn get_many(&self, ids: &[ContentId]) -> Result<Vec<ContentItem>, DatabaseError> {
        let mut by_id = HashMap::with_capacity(ids.len());
        for chunk in ids.chunks(MAX_BOUND_IDS) {
            let placeholders = (1..=chunk.len())
                .map(|i| format!("?{i}"))
                .collect::<Vec<_>>()
                .join(", ");
            let params = chunk
                .iter()
                .map(|id| to_sql_id(*id).map(libsql::Value::from))
                .collect::<Result<Vec<_>, _>>()?;

            let mut rows = self
                .db
                .conn()
                .query(
                    &format!("SELECT {SELECT_COLUMNS} FROM content WHERE id IN ({placeholders})"),
                    libsql::params_from_iter(params),
                )
                .await?;
            while let Some(row) = rows.next().await? {
                let item = row_to_item(&row)?;
                if let Some(id) = item.id() {
                    by_id.insert(id, item);
                }
            }
        }
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    pub async fn save_content(&self, item: &mut ContentItem) -> Result<(), DatabaseError> {
        let _guard = self.write_lock.lock().await;
        let now = Utc::now();
        let record = item.to_record();
        let fields = serde_json::to_string(&record.fields)?;
        let status = i64::from(record.published);

        let tx = self.db.conn().transaction().await?;

        let id = if let Some(id) = record.id {
            let updated = tx
                .execute(
                    "UPDATE content SET title = ?1, body = ?2, status = ?3, fields = ?4, changed_at = ?5
                     WHERE id = ?6",
                    libsql::params![
                        record.title.as_str(),
                        record.body.as_str(),
                        status,
                        fields.as_str(),
                        sql_timestamp(now),
                        to_sql_id(id)?
                    ],
                )
                .await?;
            if updated == 0 {
                return Err(DatabaseError::InvalidState(format!(
                    "content {id} no longer exists"
                )));
            }
            id
        } else {
            let mut rows = tx
                .query(
                    "INSERT INTO content (type, title, body, status, fields, created_at, changed_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING id",
                    libsql::params![
                        record.kind.as_str(),
                        record.title.as_str(),
                        record.body.as_str(),
                        status,
                        fields.as_str(),
                        sql_timestamp(record.created_at),
                        sql_timestamp(now)
                    ],
                )
                .await?;
            let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
            get_u64(&row, 0)?
        };

        // The RETURNING statement must be finished before the transaction commits.
        let revision_id = {
            let mut rows = tx
                .query(
                    "INSERT INTO content_revisions (content_id, title, body, created_at)
                     VALUES (?1, ?2, ?3, ?4) RETURNING revision_id",
                    libsql::params![
                        to_sql_id(id)?,
                        record.title.as_str(),
                        record.body.as_str(),
                        sql_timestamp(now)
                    ],
                )
                .await?;
            let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
            get_u64(&row, 0)?
        };

        tx.execute(
            "UPDATE content SET revision_id = ?1 WHERE id = ?2",
            libsql::params![to_sql_id(revision_id)?, to_sql_id(id)?],
        )
        .await?;
        tx.commit().await?;

        item.mark_saved(id, revision_id, now);
        tracing::debug!(id, revision_id, kind = %record.kind, "content saved");
        Ok(())
    }

    pub async fn delete_content(&self, item: &ContentItem) -> Result<(), DatabaseError> {
        let id = item
            .id()
            .ok_or_else(|| DatabaseError::InvalidState("cannot delete unsaved content".into()))?;
        let _guard = self.write_lock.lock().await;

        let tx = self.db.conn().transaction().await?;
        tx.execute(
            "DELETE FROM content_revisions WHERE content_id = ?1",
            [to_sql_id(id)?],
        )
        .await?;
        tx.execute("DELETE FROM content WHERE id = ?1", [to_sql_id(id)?])
            .await?;
        tx.commit().await?;

        tracing::debug!(id, "content deleted");
        Ok(())
    }

    pub async fn list_published_rows(&self, limit: u32) -> Result<Vec<RawContentRow>, DatabaseError> {
        let mut rows = self
            .db
            .conn()
            .query(
                "SELECT c.id, COALESCE(c.revision_id, 0), c.title
                 FROM content c
                 LEFT JOIN content_revisions r ON c.revision_id = r.revision_id
                 WHERE c.status = 1
                 LIMIT ?1",
                [i64::from(limit)],
            )
            .await?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            out.push(RawContentRow {
                id: get_u64(&row, 0)?,
                vid: get_u64(&row, 1)?,
                title: row.get::<String>(2)?,
            });
        }
        Ok(out)
    }

    pub async fn count_published(&self) -> Result<u64, DatabaseError> {
        let mut rows = self
            .db
            .conn()
            .query(
                "SELECT COUNT(*)
                 FROM content c
                 LEFT JOIN content_revisions r ON c.revision_id = r.revision_id
                 WHERE c.status = 1",
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        get_u64(&row, 0)
    }
}

#[async_trait]
impl ContentStore for SqlContentStore {
    async fn load(&self, id: ContentId) -> Result<Option<ContentItem>, ContentError> {
        Ok(self.get_content(id).await?)
    }

    async fn query(&self, query: ContentQuery) -> Result<Vec<ContentId>, ContentError> {
        Ok(self.query_ids(query).await?)
    }

    async fn load_many(&self, ids: &[ContentId]) -> Result<Vec<ContentItem>, ContentError> {
        Ok(self.get_many(ids).await?)
    }

    async fn save(&self, item: &mut ContentItem) -> Result<(), ContentError> {
        Ok(self.save_content(item).await?)
    }

    async fn delete(&self, item: ContentItem) -> Result<(), ContentError> {
        Ok(self.delete_content(&item).await?)
    }
}

#[async_trait]
impl RawContentQuery for SqlContentStore {
    async fn published_rows(&self, limit: u32) -> Result<Vec<RawContentRow>, ContentError> {
        Ok(self.list_published_rows(limit).await?)
    }

    async fn published_count(&self) -> Result<u64, ContentError> {
        Ok(self.count_published().await?)
    }
}
