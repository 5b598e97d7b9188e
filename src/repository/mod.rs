//! Repository layer for database persistence.
//!
//! All database access uses Diesel ORM over SQLite via diesel-async's
//! `SyncConnectionWrapper`.

pub mod diesel_artwork;
pub mod diesel_context;
pub mod diesel_history;
pub mod diesel_models;
pub mod diesel_period;
pub mod diesel_pool;
pub mod util;

pub use diesel_artwork::DieselArtworkRepository;
pub use diesel_context::DieselDbContext;
pub use diesel_history::DieselHistoryRepository;
pub use diesel_period::DieselPeriodRepository;
pub use diesel_pool::{AsyncSqlitePool, DieselError};

use chrono::{DateTime, Utc};

/// Parse a datetime string from the database, defaulting to Unix epoch on error.
pub fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::UNIX_EPOCH)
}
