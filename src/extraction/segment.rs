//! Splits an `IMAGES:` block into numbered entries with bullet notes.

use regex::Regex;
use std::sync::LazyLock;

/// One numbered entry and the bullet notes beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    /// Text after the entry number.
    pub main_line: String,
    /// Bullet lines, in document order.
    pub notes: Vec<String>,
}

impl ParsedEntry {
    fn new(main_line: &str) -> Self {
        Self {
            main_line: main_line.to_string(),
            notes: Vec::new(),
        }
    }
}

static NUMBERED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.?\s*(.+)$").expect("valid numbered-line regex"));

static NOTE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-–—]\s*(.+)$").expect("valid note-line regex"));

/// Segment a block into entries.
///
/// Numbered lines open a new entry; dash-prefixed lines attach to the open
/// entry. Blank lines, and anything seen before the first numbered line, are
/// skipped.
pub fn segment_entries(block: &str) -> Vec<ParsedEntry> {
    let mut entries = Vec::new();
    let mut current: Option<ParsedEntry> = None;

    for raw in block.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(main) = NUMBERED_LINE.captures(line).and_then(|c| c.get(1)) {
            if let Some(done) = current.replace(ParsedEntry::new(main.as_str())) {
                entries.push(done);
            }
            continue;
        }

        if let (Some(entry), Some(note)) = (
            current.as_mut(),
            NOTE_LINE.captures(raw).and_then(|c| c.get(1)),
        ) {
            entry.notes.push(note.as_str().trim().to_string());
        }
    }

    entries.extend(current);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_with_notes() {
        let block = "1. Anonymous, Kouros statue, c.530 B.C.\n   - marble\n   – found in Attica\n2 Exekias, amphora\n— black-figure";
        let entries = segment_entries(block);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].main_line, "Anonymous, Kouros statue, c.530 B.C.");
        assert_eq!(entries[0].notes, vec!["marble", "found in Attica"]);
        assert_eq!(entries[1].main_line, "Exekias, amphora");
        assert_eq!(entries[1].notes, vec!["black-figure"]);
    }

    #[test]
    fn test_preamble_notes_are_ignored() {
        let block = "- stray bullet\nSee slides below\n1. Warrior Vase";
        let entries = segment_entries(block);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].main_line, "Warrior Vase");
        assert!(entries[0].notes.is_empty());
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let block = "1. Lion Gate\r\n\r\n   - Mycenae\r\n\r\n2. Treasury of Atreus\r\n";
        let entries = segment_entries(block);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].notes, vec!["Mycenae"]);
        assert_eq!(entries[1].main_line, "Treasury of Atreus");
    }

    #[test]
    fn test_unbulleted_continuation_is_dropped() {
        let block = "1. Lion Gate\ncontinued text\n   - Mycenae";
        let entries = segment_entries(block);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].notes, vec!["Mycenae"]);
    }

    #[test]
    fn test_empty_block() {
        assert!(segment_entries("").is_empty());
    }
}
