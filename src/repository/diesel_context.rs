//! Diesel database context for managing connections and repository access.

use std::path::Path;

use diesel_async::SimpleAsyncConnection;
use tracing::debug;

use super::diesel_artwork::DieselArtworkRepository;
use super::diesel_history::DieselHistoryRepository;
use super::diesel_period::DieselPeriodRepository;
use super::diesel_pool::{AsyncSqlitePool, DieselError};
use super::util::redact_url_password;

/// Entry point for all catalogue persistence.
///
/// Create one context per command or server, then use it to access the
/// repositories.
///
/// # Example
/// ```ignore
/// let ctx = DieselDbContext::new(&db_path);
/// ctx.init_schema().await?;
/// let periods = ctx.periods().list().await?;
/// ```
#[derive(Clone)]
pub struct DieselDbContext {
    pool: AsyncSqlitePool,
}

impl DieselDbContext {
    /// Create a context for a SQLite file.
    pub fn new(db_path: &Path) -> Self {
        Self {
            pool: AsyncSqlitePool::from_path(db_path),
        }
    }

    /// Create a context from a database URL (`sqlite:path` or a bare path).
    pub fn from_url(database_url: &str) -> Self {
        debug!("Using database {}", redact_url_password(database_url));
        Self {
            pool: AsyncSqlitePool::new(database_url),
        }
    }

    /// Get the underlying connection factory.
    pub fn pool(&self) -> &AsyncSqlitePool {
        &self.pool
    }

    /// Get a period repository.
    pub fn periods(&self) -> DieselPeriodRepository {
        DieselPeriodRepository::new(self.pool.clone())
    }

    /// Get an artwork repository.
    pub fn artworks(&self) -> DieselArtworkRepository {
        DieselArtworkRepository::new(self.pool.clone())
    }

    /// Get an extraction history repository.
    pub fn history(&self) -> DieselHistoryRepository {
        DieselHistoryRepository::new(self.pool.clone())
    }

    /// Create tables and indexes if they don't exist.
    pub async fn init_schema(&self) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;
        conn.batch_execute(
            r#"
            CREATE TABLE IF NOT EXISTS art_periods (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                start_year INTEGER NOT NULL,
                end_year INTEGER NOT NULL,
                color TEXT NOT NULL DEFAULT '#1e6bd6',
                description TEXT NOT NULL DEFAULT '',
                image_url TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS artworks (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                artist TEXT NOT NULL,
                year INTEGER NOT NULL,
                image_url TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT '',
                period_id TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_artworks_period ON artworks(period_id);
            CREATE INDEX IF NOT EXISTS idx_artworks_year ON artworks(year);

            CREATE TABLE IF NOT EXISTS extraction_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                filename TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .await
    }

    /// Open a connection and run a trivial query.
    pub async fn test_connection(&self) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;
        conn.batch_execute("SELECT 1").await
    }
}
