//! Diesel-based extraction history repository for SQLite.

use chrono::{SecondsFormat, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::diesel_models::{HistoryRecord, NewHistory};
use super::diesel_pool::{AsyncSqlitePool, DieselError};
use super::parse_datetime;
use crate::models::{ExtractionHistoryRecord, UNTITLED_FILENAME};
use crate::schema::extraction_history;

impl From<HistoryRecord> for ExtractionHistoryRecord {
    fn from(record: HistoryRecord) -> Self {
        ExtractionHistoryRecord {
            id: record.id,
            filename: record.filename,
            created_at: parse_datetime(&record.created_at),
        }
    }
}

/// Append-only log of completed extraction runs.
#[derive(Clone)]
pub struct DieselHistoryRepository {
    pool: AsyncSqlitePool,
}

impl DieselHistoryRepository {
    /// Create a new history repository with an existing pool.
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// Record one run. Blank or missing filenames are stored as "untitled".
    pub async fn append(&self, filename: Option<&str>) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;
        // Fixed-width timestamps keep lexical order chronological.
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let filename = filename
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(UNTITLED_FILENAME);

        diesel::insert_into(extraction_history::table)
            .values(&NewHistory {
                filename,
                created_at: &now,
            })
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    /// Most recent entries first, up to `limit` if given.
    pub async fn list(
        &self,
        limit: Option<i64>,
    ) -> Result<Vec<ExtractionHistoryRecord>, DieselError> {
        let mut conn = self.pool.get().await?;

        extraction_history::table
            .order((
                extraction_history::created_at.desc(),
                extraction_history::id.desc(),
            ))
            .limit(limit.unwrap_or(i64::MAX))
            .load::<HistoryRecord>(&mut conn)
            .await
            .map(|records| {
                records
                    .into_iter()
                    .map(ExtractionHistoryRecord::from)
                    .collect()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::DieselDbContext;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_history_newest_first() {
        let dir = tempdir().unwrap();
        let ctx = DieselDbContext::new(&dir.path().join("test.db"));
        ctx.init_schema().await.unwrap();
        let repo = ctx.history();

        repo.append(Some("lecture-1.docx")).await.unwrap();
        repo.append(None).await.unwrap();
        repo.append(Some("   ")).await.unwrap();
        repo.append(Some("lecture-2.docx")).await.unwrap();

        let names: Vec<_> = repo
            .list(None)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.filename)
            .collect();
        assert_eq!(
            names,
            vec!["lecture-2.docx", "untitled", "untitled", "lecture-1.docx"]
        );

        assert_eq!(repo.list(Some(1)).await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_appends_all_land() {
        let dir = tempdir().unwrap();
        let ctx = DieselDbContext::new(&dir.path().join("test.db"));
        ctx.init_schema().await.unwrap();

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let repo = ctx.history();
                tokio::spawn(async move {
                    let name = format!("lecture-{}.docx", i);
                    repo.append(Some(&name)).await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(ctx.history().list(None).await.unwrap().len(), 64);
    }
}
