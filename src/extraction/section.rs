//! Locates the `IMAGES:` block inside a document.

use regex::Regex;
use std::sync::LazyLock;

/// Literal marker that opens the image list.
pub const IMAGES_MARKER: &str = "IMAGES:";

/// Next all-caps heading (e.g. `\nREADINGS:`) terminating the block.
static NEXT_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[A-Z][A-Z \-()&]*:\s*").expect("valid heading regex"));

/// Return the trimmed text between `IMAGES:` and the next all-caps heading.
///
/// Returns `None` when the marker is absent. Without a terminating heading
/// the block runs to the end of the document.
pub fn locate_images_block(text: &str) -> Option<&str> {
    let start = text.find(IMAGES_MARKER)? + IMAGES_MARKER.len();
    let rest = &text[start..];

    let block = match NEXT_HEADING.find(rest) {
        Some(heading) => &rest[..heading.start()],
        None => rest,
    };

    Some(block.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_marker() {
        assert_eq!(locate_images_block("READINGS:\n1. Pollitt"), None);
        assert_eq!(locate_images_block(""), None);
    }

    #[test]
    fn test_block_bounded_by_next_heading() {
        let doc = "LECTURE 3\nIMAGES:\n1. Lion Gate, Mycenae\n2. Warrior Vase\nREADINGS:\nPollitt, ch. 2";
        assert_eq!(
            locate_images_block(doc),
            Some("1. Lion Gate, Mycenae\n2. Warrior Vase")
        );
    }

    #[test]
    fn test_heading_with_punctuation() {
        let doc = "IMAGES:\n1. Kouros\nTERMS & CONCEPTS (REVIEW):\narchaic smile";
        assert_eq!(locate_images_block(doc), Some("1. Kouros"));
    }

    #[test]
    fn test_block_runs_to_end_without_heading() {
        let doc = "IMAGES:\n\n1. Kouros\n   - marble\n\n";
        assert_eq!(locate_images_block(doc), Some("1. Kouros\n   - marble"));
    }

    #[test]
    fn test_lowercase_line_does_not_terminate() {
        let doc = "IMAGES:\n1. Kouros\nnote: compare with korai\n2. Kore";
        assert_eq!(
            locate_images_block(doc),
            Some("1. Kouros\nnote: compare with korai\n2. Kore")
        );
    }
}
