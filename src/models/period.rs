//! Art-historical period model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{non_empty, ValidationError};

/// Display color used when a period is created without one.
pub const DEFAULT_PERIOD_COLOR: &str = "#1e6bd6";

/// A named era spanning a range of (signed) years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtPeriod {
    pub id: String,
    pub name: String,
    /// Negative for B.C.
    pub start_year: i32,
    pub end_year: i32,
    pub color: String,
    pub description: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArtPeriod {
    /// Build a fresh period from a validated draft.
    pub fn new(draft: PeriodDraft) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: draft.name,
            start_year: draft.start_year,
            end_year: draft.end_year,
            color: draft.color,
            description: draft.description,
            image_url: draft.image_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Human-readable span such as "500 BC – 323 BC".
    pub fn span_label(&self) -> String {
        format!(
            "{} – {}",
            crate::timeline::format_year(self.start_year),
            crate::timeline::format_year(self.end_year)
        )
    }
}

/// Period fields as they arrive over the wire; every field optional.
///
/// Used both for creation (validated into a [`PeriodDraft`]) and for
/// partial updates (validated into a [`PeriodPatch`]).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodInput {
    pub name: Option<String>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Validated fields for a new period.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodDraft {
    pub name: String,
    pub start_year: i32,
    pub end_year: i32,
    pub color: String,
    pub description: String,
    pub image_url: String,
}

impl TryFrom<PeriodInput> for PeriodDraft {
    type Error = ValidationError;

    fn try_from(input: PeriodInput) -> Result<Self, Self::Error> {
        let name = non_empty(input.name, "name")?;
        let start_year = input
            .start_year
            .ok_or(ValidationError::Missing("startYear"))?;
        let end_year = input.end_year.ok_or(ValidationError::Missing("endYear"))?;

        Ok(Self {
            name,
            start_year,
            end_year,
            color: input
                .color
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PERIOD_COLOR.to_string()),
            description: input.description.unwrap_or_default(),
            image_url: input.image_url.unwrap_or_default(),
        })
    }
}

/// Validated partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodPatch {
    pub name: Option<String>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl TryFrom<PeriodInput> for PeriodPatch {
    type Error = ValidationError;

    fn try_from(input: PeriodInput) -> Result<Self, Self::Error> {
        let name = match input.name {
            Some(name) => Some(non_empty(Some(name), "name")?),
            None => None,
        };

        Ok(Self {
            name,
            start_year: input.start_year,
            end_year: input.end_year,
            color: input.color,
            description: input.description,
            image_url: input.image_url,
        })
    }
}
