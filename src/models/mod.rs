//! Data models for the catalogue.

mod artwork;
mod history;
mod period;

pub use artwork::{Artwork, ArtworkDraft, ArtworkInput, ArtworkPatch, ArtworkSuggestion};
pub use history::{ExtractionHistoryRecord, UNTITLED_FILENAME};
pub use period::{ArtPeriod, PeriodDraft, PeriodInput, PeriodPatch, DEFAULT_PERIOD_COLOR};

use thiserror::Error;

/// Rejected catalogue input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    Missing(&'static str),
}

/// Require a non-blank string, returning it trimmed.
fn non_empty(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::Missing(field))
}
