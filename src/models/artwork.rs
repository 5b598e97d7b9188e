//! Artwork model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{non_empty, ValidationError};

/// A single catalogued piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub id: String,
    pub title: String,
    pub artist: String,
    /// Negative for B.C.
    pub year: i32,
    pub image_url: String,
    pub description: String,
    /// Weak reference to an [`ArtPeriod`](super::ArtPeriod); may dangle.
    pub period_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Artwork {
    /// Build a fresh artwork from a validated draft.
    pub fn new(draft: ArtworkDraft) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: draft.title,
            artist: draft.artist,
            year: draft.year,
            image_url: draft.image_url,
            description: draft.description,
            period_id: draft.period_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Artwork fields as they arrive over the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkInput {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub year: Option<i32>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    /// `null` or `""` clears the association.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub period_id: Option<Option<String>>,
}

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`).
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Empty strings are treated as "no period".
fn normalize_period_id(period_id: Option<String>) -> Option<String> {
    period_id.filter(|id| !id.trim().is_empty())
}

/// Validated fields for a new artwork.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtworkDraft {
    pub title: String,
    pub artist: String,
    pub year: i32,
    pub image_url: String,
    pub description: String,
    pub period_id: Option<String>,
}

impl TryFrom<ArtworkInput> for ArtworkDraft {
    type Error = ValidationError;

    fn try_from(input: ArtworkInput) -> Result<Self, Self::Error> {
        Ok(Self {
            title: non_empty(input.title, "title")?,
            artist: non_empty(input.artist, "artist")?,
            year: input.year.ok_or(ValidationError::Missing("year"))?,
            image_url: input.image_url.unwrap_or_default(),
            description: input.description.unwrap_or_default(),
            period_id: normalize_period_id(input.period_id.flatten()),
        })
    }
}

/// Validated partial update.
///
/// `period_id` is doubly optional: `None` leaves it alone, `Some(None)`
/// clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtworkPatch {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub year: Option<i32>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub period_id: Option<Option<String>>,
}

impl TryFrom<ArtworkInput> for ArtworkPatch {
    type Error = ValidationError;

    fn try_from(input: ArtworkInput) -> Result<Self, Self::Error> {
        let title = match input.title {
            Some(title) => Some(non_empty(Some(title), "title")?),
            None => None,
        };
        let artist = match input.artist {
            Some(artist) => Some(non_empty(Some(artist), "artist")?),
            None => None,
        };

        Ok(Self {
            title,
            artist,
            year: input.year,
            image_url: input.image_url,
            description: input.description,
            period_id: input.period_id.map(normalize_period_id),
        })
    }
}

/// An artwork proposed by the extraction pipeline, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkSuggestion {
    pub title: String,
    pub artist: String,
    /// 0 when no year could be determined.
    pub year: i32,
    pub image_url: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_validation() {
        let input: ArtworkInput =
            serde_json::from_value(serde_json::json!({ "title": "Doryphoros", "year": -445 }))
                .unwrap();
        assert_eq!(
            ArtworkDraft::try_from(input).unwrap_err(),
            ValidationError::Missing("artist")
        );

        let input: ArtworkInput = serde_json::from_value(serde_json::json!({
            "title": "Doryphoros",
            "artist": "Polykleitos",
            "year": -445,
            "periodId": ""
        }))
        .unwrap();
        let draft = ArtworkDraft::try_from(input).unwrap();
        assert_eq!(draft.period_id, None);
        assert_eq!(draft.image_url, "");
    }

    #[test]
    fn test_patch_distinguishes_null_from_absent() {
        let absent: ArtworkInput =
            serde_json::from_value(serde_json::json!({ "year": 1503 })).unwrap();
        assert_eq!(ArtworkPatch::try_from(absent).unwrap().period_id, None);

        let null: ArtworkInput =
            serde_json::from_value(serde_json::json!({ "periodId": null })).unwrap();
        assert_eq!(ArtworkPatch::try_from(null).unwrap().period_id, Some(None));

        let set: ArtworkInput =
            serde_json::from_value(serde_json::json!({ "periodId": "p-1" })).unwrap();
        assert_eq!(
            ArtworkPatch::try_from(set).unwrap().period_id,
            Some(Some("p-1".to_string()))
        );
    }

    #[test]
    fn test_suggestion_wire_format() {
        let suggestion = ArtworkSuggestion {
            title: "Kouros".to_string(),
            artist: "anonymous".to_string(),
            year: -530,
            image_url: String::new(),
            description: "marble".to_string(),
        };
        let json = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(json["imageUrl"], "");
        assert_eq!(json["year"], -530);
    }
}
