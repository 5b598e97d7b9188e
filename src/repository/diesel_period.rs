//! Diesel-based art period repository for SQLite.

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::diesel_artwork::DieselArtworkRepository;
use super::diesel_models::{NewPeriod, PeriodChangeset, PeriodRecord};
use super::diesel_pool::{AsyncSqlitePool, DieselError};
use super::parse_datetime;
use crate::models::{ArtPeriod, PeriodPatch};
use crate::schema::art_periods;

impl From<PeriodRecord> for ArtPeriod {
    fn from(record: PeriodRecord) -> Self {
        ArtPeriod {
            id: record.id,
            name: record.name,
            start_year: record.start_year,
            end_year: record.end_year,
            color: record.color,
            description: record.description,
            image_url: record.image_url,
            created_at: parse_datetime(&record.created_at),
            updated_at: parse_datetime(&record.updated_at),
        }
    }
}

/// Diesel-based period repository.
#[derive(Clone)]
pub struct DieselPeriodRepository {
    pool: AsyncSqlitePool,
}

impl DieselPeriodRepository {
    /// Create a new period repository with an existing pool.
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// All periods, earliest first.
    pub async fn list(&self) -> Result<Vec<ArtPeriod>, DieselError> {
        let mut conn = self.pool.get().await?;

        art_periods::table
            .order((art_periods::start_year.asc(), art_periods::name.asc()))
            .load::<PeriodRecord>(&mut conn)
            .await
            .map(|records| records.into_iter().map(ArtPeriod::from).collect())
    }

    /// Get a period by ID.
    pub async fn get(&self, id: &str) -> Result<Option<ArtPeriod>, DieselError> {
        let mut conn = self.pool.get().await?;

        art_periods::table
            .find(id)
            .first::<PeriodRecord>(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(ArtPeriod::from))
    }

    /// Find a period by exact name.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<ArtPeriod>, DieselError> {
        let mut conn = self.pool.get().await?;

        art_periods::table
            .filter(art_periods::name.eq(name))
            .first::<PeriodRecord>(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(ArtPeriod::from))
    }

    /// Insert a new period.
    pub async fn create(&self, period: &ArtPeriod) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;
        let created_at = period.created_at.to_rfc3339();
        let updated_at = period.updated_at.to_rfc3339();

        diesel::insert_into(art_periods::table)
            .values(&NewPeriod {
                id: &period.id,
                name: &period.name,
                start_year: period.start_year,
                end_year: period.end_year,
                color: &period.color,
                description: &period.description,
                image_url: &period.image_url,
                created_at: &created_at,
                updated_at: &updated_at,
            })
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    /// Apply a partial update. Returns the stored period, or `None` if absent.
    pub async fn update(
        &self,
        id: &str,
        patch: &PeriodPatch,
    ) -> Result<Option<ArtPeriod>, DieselError> {
        let now = Utc::now().to_rfc3339();
        let changes = PeriodChangeset {
            name: patch.name.as_deref(),
            start_year: patch.start_year,
            end_year: patch.end_year,
            color: patch.color.as_deref(),
            description: patch.description.as_deref(),
            image_url: patch.image_url.as_deref(),
            updated_at: Some(&now),
        };

        let rows = {
            let mut conn = self.pool.get().await?;
            diesel::update(art_periods::table.find(id))
                .set(&changes)
                .execute(&mut conn)
                .await?
        };

        if rows == 0 {
            return Ok(None);
        }
        self.get(id).await
    }

    /// Delete a period after detaching its artworks.
    ///
    /// Returns the number of artworks detached, or `None` if no such period.
    pub async fn delete(&self, id: &str) -> Result<Option<usize>, DieselError> {
        let mut conn = self.pool.get().await?;

        let exists: i64 = art_periods::table
            .filter(art_periods::id.eq(id))
            .count()
            .get_result(&mut conn)
            .await?;
        if exists == 0 {
            return Ok(None);
        }

        let detached = DieselArtworkRepository::new(self.pool.clone())
            .clear_period(id)
            .await?;

        diesel::delete(art_periods::table.find(id))
            .execute(&mut conn)
            .await?;

        Ok(Some(detached))
    }
}
