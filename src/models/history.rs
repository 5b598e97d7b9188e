//! Extraction audit log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Filename recorded when a request does not name its source document.
pub const UNTITLED_FILENAME: &str = "untitled";

/// One completed extraction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionHistoryRecord {
    pub id: i32,
    pub filename: String,
    pub created_at: DateTime<Utc>,
}
