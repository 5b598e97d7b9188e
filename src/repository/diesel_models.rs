//! Diesel ORM models for database tables.
//!
//! Timestamps are stored as RFC 3339 text and converted to `chrono` types at
//! the repository boundary.

use diesel::prelude::*;

use crate::schema;

/// Period record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::art_periods)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PeriodRecord {
    pub id: String,
    pub name: String,
    pub start_year: i32,
    pub end_year: i32,
    pub color: String,
    pub description: String,
    pub image_url: String,
    pub created_at: String,
    pub updated_at: String,
}

/// New period for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::art_periods)]
pub struct NewPeriod<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub start_year: i32,
    pub end_year: i32,
    pub color: &'a str,
    pub description: &'a str,
    pub image_url: &'a str,
    pub created_at: &'a str,
    pub updated_at: &'a str,
}

/// Partial period update; `None` columns are left untouched.
#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = schema::art_periods)]
pub struct PeriodChangeset<'a> {
    pub name: Option<&'a str>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub color: Option<&'a str>,
    pub description: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub updated_at: Option<&'a str>,
}

/// Artwork record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::artworks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ArtworkRecord {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub year: i32,
    pub image_url: String,
    pub description: String,
    pub period_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// New artwork for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::artworks)]
pub struct NewArtwork<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub artist: &'a str,
    pub year: i32,
    pub image_url: &'a str,
    pub description: &'a str,
    pub period_id: Option<&'a str>,
    pub created_at: &'a str,
    pub updated_at: &'a str,
}

/// Partial artwork update.
///
/// `period_id: Some(None)` writes NULL; `None` leaves the column alone.
#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = schema::artworks)]
pub struct ArtworkChangeset<'a> {
    pub title: Option<&'a str>,
    pub artist: Option<&'a str>,
    pub year: Option<i32>,
    pub image_url: Option<&'a str>,
    pub description: Option<&'a str>,
    pub period_id: Option<Option<&'a str>>,
    pub updated_at: Option<&'a str>,
}

/// Extraction history record from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::extraction_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HistoryRecord {
    pub id: i32,
    pub filename: String,
    pub created_at: String,
}

/// New extraction history entry for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::extraction_history)]
pub struct NewHistory<'a> {
    pub filename: &'a str,
    pub created_at: &'a str,
}
