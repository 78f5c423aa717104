use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::ContentKind;

/// Store-assigned content identifier.
pub type ContentId = u64;

/// A content item handle.
///
/// The identifier is assigned by the store on first save and the kind is
/// fixed at construction; neither has a setter. Everything else is reached
/// through [`ContentItem::set`] and [`ContentItem::get`] by field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    id: Option<ContentId>,
    kind: ContentKind,
    title: String,
    body: String,
    published: bool,
    revision_id: Option<u64>,
    created_at: DateTime<Utc>,
    changed_at: DateTime<Utc>,
    fields: BTreeMap<String, String>,
}

impl ContentItem {
    /// A new, unsaved, published item of the given kind.
    #[must_use]
    pub fn new(kind: ContentKind) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            kind,
            title: String::new(),
            body: String::new(),
            published: true,
            revision_id: None,
            created_at: now,
            changed_at: now,
            fields: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> Option<ContentId> {
        self.id
    }

    #[must_use]
    pub const fn kind(&self) -> &ContentKind {
        &self.kind
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    #[must_use]
    pub const fn is_published(&self) -> bool {
        self.published
    }

    #[must_use]
    pub const fn revision_id(&self) -> Option<u64> {
        self.revision_id
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn changed_at(&self) -> DateTime<Utc> {
        self.changed_at
    }

    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Set a named field. `title` and `body` are first-class; any other name
    /// lands in the additional-fields map.
    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        let value = value.into();
        match field {
            "title" => self.title = value,
            "body" => self.body = value,
            _ => {
                self.fields.insert(field.to_string(), value);
            }
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        match field {
            "title" => Some(&self.title),
            "body" => Some(&self.body),
            _ => self.fields.get(field).map(String::as_str),
        }
    }

    pub const fn set_published(&mut self, published: bool) {
        self.published = published;
    }

    /// Record the outcome of a save. Only stores call this.
    ///
    /// An identifier already held by the item is never replaced.
    pub fn mark_saved(&mut self, id: ContentId, revision_id: u64, changed_at: DateTime<Utc>) {
        self.id.get_or_insert(id);
        self.revision_id = Some(revision_id);
        self.changed_at = changed_at;
    }

    /// Flatten into the persistence shape.
    #[must_use]
    pub fn to_record(&self) -> ContentRecord {
        ContentRecord {
            id: self.id,
            kind: self.kind.clone(),
            title: self.title.clone(),
            body: self.body.clone(),
            published: self.published,
            revision_id: self.revision_id,
            created_at: self.created_at,
            changed_at: self.changed_at,
            fields: self.fields.clone(),
        }
    }
}

/// Flat persistence shape of a [`ContentItem`], used by store backends to
/// hydrate handles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentRecord {
    pub id: Option<ContentId>,
    pub kind: ContentKind,
    pub title: String,
    pub body: String,
    pub published: bool,
    pub revision_id: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub changed_at: DateTime<Utc>,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl From<ContentRecord> for ContentItem {
    fn from(record: ContentRecord) -> Self {
        Self {
            id: record.id,
            kind: record.kind,
            title: record.title,
            body: record.body,
            published: record.published,
            revision_id: record.revision_id,
            created_at: record.created_at,
            changed_at: record.changed_at,
            fields: record.fields,
        }
    }
}
