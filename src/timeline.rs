//! Vertical timeline layout.
//!
//! Maps signed years onto a 0–100% track with an 8% margin above and below
//! the data, so the earliest and latest items never sit on the edge.

use serde::Serialize;

use crate::models::{ArtPeriod, Artwork};

/// Fraction of the raw span added as margin on each side.
const BUFFER_RATIO: f64 = 0.08;

/// Year range of the visible track.
///
/// Bounds are `i64` so the margin never overflows for extreme stored years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineScale {
    pub min_year: i64,
    pub max_year: i64,
    pub total_years: i64,
}

impl TimelineScale {
    /// Build a scale covering every given year plus the margin.
    ///
    /// Returns `None` when there are no years at all.
    pub fn from_years(years: impl IntoIterator<Item = i32>) -> Option<Self> {
        let (raw_min, raw_max) = years
            .into_iter()
            .map(i64::from)
            .fold(None, |acc: Option<(i64, i64)>, y| match acc {
                None => Some((y, y)),
                Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            })?;

        let buffer = ((raw_max - raw_min) as f64 * BUFFER_RATIO).round() as i64;
        let min_year = raw_min - buffer;
        let max_year = raw_max + buffer;

        Some(Self {
            min_year,
            max_year,
            total_years: max_year - min_year,
        })
    }

    /// Scale covering all periods and artworks.
    pub fn for_catalogue(periods: &[ArtPeriod], artworks: &[Artwork]) -> Option<Self> {
        let years = periods
            .iter()
            .flat_map(|p| [p.start_year, p.end_year])
            .chain(artworks.iter().map(|a| a.year));
        Self::from_years(years)
    }

    /// Position of a year on the track, as a percentage clamped to 0–100.
    pub fn year_to_percent(&self, year: i32) -> f64 {
        if self.total_years == 0 {
            return 50.0;
        }
        let raw = (i64::from(year) - self.min_year) as f64 / self.total_years as f64 * 100.0;
        raw.clamp(0.0, 100.0)
    }
}

/// Format a signed year for display: `-450` → "450 BC", `0` → "1 AD".
pub fn format_year(year: i32) -> String {
    match year {
        y if y < 0 => format!("{} BC", y.unsigned_abs()),
        0 => "1 AD".to_string(),
        y => format!("{} AD", y),
    }
}

/// A period rendered as a block on the track.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodBlock {
    pub id: String,
    pub name: String,
    pub color: String,
    pub top: f64,
    pub height: f64,
    pub label: String,
}

/// An artwork rendered as a marker on the track.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkMarker {
    pub id: String,
    pub title: String,
    pub position: f64,
    pub label: String,
    /// Name of the linked period, `None` when unset or dangling.
    pub period: Option<String>,
}

/// Full layout of the catalogue.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineLayout {
    #[serde(flatten)]
    pub scale: TimelineScale,
    pub periods: Vec<PeriodBlock>,
    pub artworks: Vec<ArtworkMarker>,
}

impl TimelineLayout {
    /// Lay out periods and artworks; `None` for an empty catalogue.
    pub fn build(periods: &[ArtPeriod], artworks: &[Artwork]) -> Option<Self> {
        let scale = TimelineScale::for_catalogue(periods, artworks)?;

        let blocks = periods
            .iter()
            .map(|p| {
                let top = scale.year_to_percent(p.start_year);
                let bottom = scale.year_to_percent(p.end_year);
                PeriodBlock {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    color: p.color.clone(),
                    top: top.min(bottom),
                    height: (bottom - top).abs(),
                    label: p.span_label(),
                }
            })
            .collect();

        let markers = artworks
            .iter()
            .map(|a| ArtworkMarker {
                id: a.id.clone(),
                title: a.title.clone(),
                position: scale.year_to_percent(a.year),
                label: format_year(a.year),
                period: a
                    .period_id
                    .as_deref()
                    .and_then(|pid| periods.iter().find(|p| p.id == pid))
                    .map(|p| p.name.clone()),
            })
            .collect();

        Some(Self {
            scale,
            periods: blocks,
            artworks: markers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArtworkDraft, PeriodDraft};

    #[test]
    fn test_format_year() {
        assert_eq!(format_year(-450), "450 BC");
        assert_eq!(format_year(0), "1 AD");
        assert_eq!(format_year(1503), "1503 AD");
    }

    #[test]
    fn test_scale_adds_buffer() {
        let scale = TimelineScale::from_years([1400, 1900]).unwrap();
        assert_eq!(scale.min_year, 1360);
        assert_eq!(scale.max_year, 1940);
        assert_eq!(scale.total_years, 580);
    }

    #[test]
    fn test_scale_empty() {
        assert!(TimelineScale::from_years(std::iter::empty()).is_none());
    }

    #[test]
    fn test_year_to_percent_clamps() {
        let scale = TimelineScale::from_years([0, 100]).unwrap();
        assert_eq!(scale.min_year, -8);
        assert!((scale.year_to_percent(-8) - 0.0).abs() < f64::EPSILON);
        assert!((scale.year_to_percent(108) - 100.0).abs() < f64::EPSILON);
        assert_eq!(scale.year_to_percent(-5000), 0.0);
        assert_eq!(scale.year_to_percent(5000), 100.0);
    }

    #[test]
    fn test_extreme_years_do_not_overflow() {
        let scale = TimelineScale::from_years([i32::MIN, i32::MAX]).unwrap();
        let span = i64::from(i32::MAX) - i64::from(i32::MIN);
        assert!(scale.min_year < i64::from(i32::MIN));
        assert!(scale.max_year > i64::from(i32::MAX));
        assert_eq!(scale.total_years, scale.max_year - scale.min_year);
        assert!(scale.total_years > span);

        let low = scale.year_to_percent(i32::MIN);
        let high = scale.year_to_percent(i32::MAX);
        assert!(low > 0.0 && low < 10.0);
        assert!(high > 90.0 && high < 100.0);
        assert!((scale.year_to_percent(0) - 50.0).abs() < 1.0);
    }

    #[test]
    fn test_scale_serializes_camel_case() {
        let json = serde_json::to_value(TimelineScale::from_years([1400, 1900]).unwrap()).unwrap();
        assert_eq!(json["minYear"], 1360);
        assert_eq!(json["maxYear"], 1940);
        assert_eq!(json["totalYears"], 580);
        assert!(json.get("min_year").is_none());
    }

    #[test]
    fn test_single_year_scale() {
        let scale = TimelineScale::from_years([1503]).unwrap();
        assert_eq!(scale.total_years, 0);
        assert_eq!(scale.year_to_percent(1503), 50.0);
    }

    #[test]
    fn test_layout_resolves_period_names() {
        let period = ArtPeriod::new(PeriodDraft {
            name: "Renaissance".to_string(),
            start_year: 1400,
            end_year: 1600,
            color: "#ff6b6b".to_string(),
            description: String::new(),
            image_url: String::new(),
        });
        let linked = Artwork::new(ArtworkDraft {
            title: "Mona Lisa".to_string(),
            artist: "Leonardo da Vinci".to_string(),
            year: 1503,
            image_url: String::new(),
            description: String::new(),
            period_id: Some(period.id.clone()),
        });
        let dangling = Artwork::new(ArtworkDraft {
            title: "Lost work".to_string(),
            artist: "Unknown".to_string(),
            year: 1550,
            image_url: String::new(),
            description: String::new(),
            period_id: Some("missing".to_string()),
        });

        let layout = TimelineLayout::build(&[period], &[linked, dangling]).unwrap();
        assert_eq!(layout.artworks[0].period.as_deref(), Some("Renaissance"));
        assert_eq!(layout.artworks[1].period, None);
        assert_eq!(layout.periods[0].label, "1400 AD – 1600 AD");
        assert!(layout.periods[0].height > 0.0);
    }
}
