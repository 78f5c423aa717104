//! # ink-db
//!
//! libSQL storage for Ink content.
//!
//! Provides the production backends for three `ink-core` capability traits:
//! - [`SqlContentStore`] implements `ContentStore` and `RawContentQuery`
//!   over the `content` and `content_revisions` tables.
//! - [`SqlCache`] implements `Cache` over the `cache_entries` table.
//!
//! Uses the `libsql` crate (C `SQLite` fork) in local, embedded mode.

pub mod cache;
pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;

pub use cache::SqlCache;
pub use error::DatabaseError;
pub use repos::content::SqlContentStore;

use libsql::Builder;

/// Central database handle for all Ink storage.
///
/// Wraps a libSQL database and a single shared connection.
pub struct InkDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl InkDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let ink_db = Self { db, conn };
        ink_db.run_migrations().await?;
        tracing::debug!(path, "content database opened");
        Ok(ink_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
