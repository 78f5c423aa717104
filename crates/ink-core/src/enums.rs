//! Content kinds, sort directions, and cache expiry markers.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ContentKind
// ---------------------------------------------------------------------------

/// The bundle a content item belongs to.
///
/// Only [`ContentKind::Article`] may be created, read in detail, updated or
/// deleted through the REST layer. Unknown type names are kept verbatim in
/// [`ContentKind::Other`] so a stored item always round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentKind {
    Article,
    Page,
    Other(String),
}

impl ContentKind {
    /// Kinds accepted by write, update, delete, and detail operations.
    pub const WRITABLE: &'static [Self] = &[Self::Article];

    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "article" => Self::Article,
            "page" => Self::Page,
            other => Self::Other(other.to_string()),
        }
    }

    /// Return the machine name used in storage.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Article => "article",
            Self::Page => "page",
            Self::Other(name) => name,
        }
    }

    #[must_use]
    pub fn is_writable(&self) -> bool {
        Self::WRITABLE.contains(self)
    }

    /// Human-readable description of a content type name.
    ///
    /// Never fails: unknown and empty names get the "not valid" message.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Article => "Article content type.",
            Self::Page => "Basic page content type.",
            Self::Other(_) => "Content type is not valid.",
        }
    }
}

impl From<String> for ContentKind {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<ContentKind> for String {
    fn from(kind: ContentKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SortDirection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

// ---------------------------------------------------------------------------
// CacheExpiry
// ---------------------------------------------------------------------------

/// Lifetime of a cache entry.
///
/// Only `Permanent` is written by the service: entries live until they are
/// explicitly overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheExpiry {
    Permanent,
    /// Unix timestamp (seconds) after which the entry is a miss.
    At(i64),
}

impl CacheExpiry {
    #[must_use]
    pub const fn is_expired(self, now: i64) -> bool {
        match self {
            Self::Permanent => false,
            Self::At(deadline) => deadline <= now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("article", ContentKind::Article)]
    #[case("page", ContentKind::Page)]
    #[case("landing", ContentKind::Other("landing".into()))]
    #[case("", ContentKind::Other(String::new()))]
    fn parse_known_and_unknown(#[case] name: &str, #[case] expected: ContentKind) {
        let kind = ContentKind::parse(name);
        assert_eq!(kind, expected);
        assert_eq!(kind.as_str(), name);
    }

    #[test]
    fn only_article_is_writable() {
        assert!(ContentKind::Article.is_writable());
        assert!(!ContentKind::Page.is_writable());
        assert!(!ContentKind::Other("article ".into()).is_writable());
    }

    #[test]
    fn serializes_as_machine_name() {
        let json = serde_json::to_string(&ContentKind::Page).unwrap();
        assert_eq!(json, r#""page""#);
        let kind: ContentKind = serde_json::from_str(r#""blog""#).unwrap();
        assert_eq!(kind, ContentKind::Other("blog".into()));
    }

    #[test]
    fn permanent_never_expires() {
        assert!(!CacheExpiry::Permanent.is_expired(i64::MAX));
        assert!(CacheExpiry::At(10).is_expired(10));
        assert!(!CacheExpiry::At(11).is_expired(10));
    }
}
