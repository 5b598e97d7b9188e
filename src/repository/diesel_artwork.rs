//! Diesel-based artwork repository for SQLite.

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::diesel_models::{ArtworkChangeset, ArtworkRecord, NewArtwork};
use super::diesel_pool::{AsyncSqlitePool, DieselError};
use super::parse_datetime;
use crate::models::{Artwork, ArtworkPatch};
use crate::schema::artworks;

impl From<ArtworkRecord> for Artwork {
    fn from(record: ArtworkRecord) -> Self {
        Artwork {
            id: record.id,
            title: record.title,
            artist: record.artist,
            year: record.year,
            image_url: record.image_url,
            description: record.description,
            period_id: record.period_id,
            created_at: parse_datetime(&record.created_at),
            updated_at: parse_datetime(&record.updated_at),
        }
    }
}

/// Diesel-based artwork repository.
#[derive(Clone)]
pub struct DieselArtworkRepository {
    pool: AsyncSqlitePool,
}

impl DieselArtworkRepository {
    /// Create a new artwork repository with an existing pool.
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// All artworks, earliest first.
    pub async fn list(&self) -> Result<Vec<Artwork>, DieselError> {
        let mut conn = self.pool.get().await?;

        artworks::table
            .order((artworks::year.asc(), artworks::title.asc()))
            .load::<ArtworkRecord>(&mut conn)
            .await
            .map(|records| records.into_iter().map(Artwork::from).collect())
    }

    /// Get an artwork by ID.
    pub async fn get(&self, id: &str) -> Result<Option<Artwork>, DieselError> {
        let mut conn = self.pool.get().await?;

        artworks::table
            .find(id)
            .first::<ArtworkRecord>(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(Artwork::from))
    }

    /// Find an artwork with exactly this title, artist and year.
    pub async fn find_exact(
        &self,
        title: &str,
        artist: &str,
        year: i32,
    ) -> Result<Option<Artwork>, DieselError> {
        let mut conn = self.pool.get().await?;

        artworks::table
            .filter(artworks::title.eq(title))
            .filter(artworks::artist.eq(artist))
            .filter(artworks::year.eq(year))
            .first::<ArtworkRecord>(&mut conn)
            .await
            .optional()
            .map(|opt| opt.map(Artwork::from))
    }

    /// Insert a new artwork.
    pub async fn create(&self, artwork: &Artwork) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;
        let created_at = artwork.created_at.to_rfc3339();
        let updated_at = artwork.updated_at.to_rfc3339();

        diesel::insert_into(artworks::table)
            .values(&NewArtwork {
                id: &artwork.id,
                title: &artwork.title,
                artist: &artwork.artist,
                year: artwork.year,
                image_url: &artwork.image_url,
                description: &artwork.description,
                period_id: artwork.period_id.as_deref(),
                created_at: &created_at,
                updated_at: &updated_at,
            })
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    /// Apply a partial update. Returns the stored artwork, or `None` if absent.
    pub async fn update(
        &self,
        id: &str,
        patch: &ArtworkPatch,
    ) -> Result<Option<Artwork>, DieselError> {
        let now = Utc::now().to_rfc3339();
        let changes = ArtworkChangeset {
            title: patch.title.as_deref(),
            artist: patch.artist.as_deref(),
            year: patch.year,
            image_url: patch.image_url.as_deref(),
            description: patch.description.as_deref(),
            period_id: patch.period_id.as_ref().map(|p| p.as_deref()),
            updated_at: Some(&now),
        };

        let rows = {
            let mut conn = self.pool.get().await?;
            diesel::update(artworks::table.find(id))
                .set(&changes)
                .execute(&mut conn)
                .await?
        };

        if rows == 0 {
            return Ok(None);
        }
        self.get(id).await
    }

    /// Delete an artwork. Returns whether a row was removed.
    pub async fn delete(&self, id: &str) -> Result<bool, DieselError> {
        let mut conn = self.pool.get().await?;

        let rows = diesel::delete(artworks::table.find(id))
            .execute(&mut conn)
            .await?;

        Ok(rows > 0)
    }

    /// Clear the period reference on every artwork pointing at `period_id`.
    pub async fn clear_period(&self, period_id: &str) -> Result<usize, DieselError> {
        let mut conn = self.pool.get().await?;
        let now = Utc::now().to_rfc3339();

        diesel::update(artworks::table.filter(artworks::period_id.eq(period_id)))
            .set((
                artworks::period_id.eq(None::<String>),
                artworks::updated_at.eq(&now),
            ))
            .execute(&mut conn)
            .await
    }
}
