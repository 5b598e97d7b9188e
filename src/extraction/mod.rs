//! Local heuristic extraction of artwork entries from document text.
//!
//! The pipeline runs in four stages:
//! - [`section`] isolates the `IMAGES:` block
//! - [`segment`] breaks it into numbered entries with bullet notes
//! - [`classify`] decides artist and title from each main line
//! - [`year`] pulls a signed year out of the main line
//!
//! Everything here is a pure function of its input; the remote fallback
//! lives in [`crate::services::extraction`].

pub mod classify;
pub mod section;
pub mod segment;
pub mod year;

pub use classify::{classify, Attribution, KeywordTables, ANONYMOUS};
pub use section::{locate_images_block, IMAGES_MARKER};
pub use segment::{segment_entries, ParsedEntry};
pub use year::{parse_year, Era};

/// An entry that survived classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedEntry {
    pub title: String,
    pub artist: String,
    /// `None` when no year could be determined.
    pub year: Option<i32>,
    /// Bullet notes joined with single spaces.
    pub description: String,
}

impl ClassifiedEntry {
    /// Classify a segmented entry, returning `None` when artist or title is missing.
    pub fn from_entry(entry: &ParsedEntry, tables: &KeywordTables) -> Option<Self> {
        let attribution = classify(&entry.main_line, tables);
        if !attribution.is_complete() {
            return None;
        }

        Some(Self {
            title: attribution.title,
            artist: attribution.artist,
            year: parse_year(&entry.main_line),
            description: entry.notes.join(" "),
        })
    }
}

/// Run the local pipeline over a whole document.
///
/// Returns `None` when there is no `IMAGES:` section; otherwise the usable
/// entries in document order (possibly empty).
pub fn parse_local(text: &str, tables: &KeywordTables) -> Option<Vec<ClassifiedEntry>> {
    let block = locate_images_block(text)?;

    let entries = segment_entries(block)
        .iter()
        .filter_map(|entry| ClassifiedEntry::from_entry(entry, tables))
        .collect();

    Some(entries)
}
