//! Artist/title classification for an entry's main line.
//!
//! Main lines look like `Artist, Title, date` but just as often
//! `Object, material, date` with no artist at all. The keyword tables that
//! drive the heuristics are plain data so they can be tuned from config.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Artist name used whenever no attribution can be made.
pub const ANONYMOUS: &str = "anonymous";

/// Keyword tables driving the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordTables {
    /// First segments meaning "no known artist" (exact, case-insensitive).
    pub anonymous_names: Vec<String>,
    /// Object/architecture words marking the first segment as a title.
    pub object_hints: Vec<String>,
    /// Material/geography words marking the second segment as a description.
    pub material_hints: Vec<String>,
}

impl Default for KeywordTables {
    fn default() -> Self {
        fn owned(words: &[&str]) -> Vec<String> {
            words.iter().map(|w| w.to_string()).collect()
        }

        Self {
            anonymous_names: owned(&["anonymous", "anon", "unknown"]),
            object_hints: owned(&[
                "palace",
                "temple",
                "statue",
                "group of sculptures",
                "jar",
                "fresco",
                "kouros",
                "amphora",
                "krater",
                "birth",
                "lapiths",
                "centaurs",
            ]),
            material_hints: owned(&[
                "marble",
                "bronze",
                "terracotta",
                "fresco",
                "athens",
                "crete",
                "thera",
                "island",
                "painting",
            ]),
        }
    }
}

impl KeywordTables {
    fn is_anonymous(&self, segment: &str) -> bool {
        self.anonymous_names
            .iter()
            .any(|name| name.eq_ignore_ascii_case(segment))
    }

    fn has_object_hint(&self, segment: &str) -> bool {
        contains_any(segment, &self.object_hints)
    }

    fn has_material_hint(&self, segment: &str) -> bool {
        contains_any(segment, &self.material_hints)
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    let haystack = haystack.to_lowercase();
    needles
        .iter()
        .any(|needle| haystack.contains(&needle.to_lowercase()))
}

/// Joint attributions ("Kleophrades and Epiktetos", "Euphronios & Euxitheos").
static JOINT_NAMES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\band\b|&").expect("valid conjunction regex"));

/// Name followed by a parenthetical, e.g. "Polykleitos (Argive)".
static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]+\)").expect("valid parenthetical regex"));

/// Resolved attribution for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribution {
    pub artist: String,
    pub title: String,
}

impl Attribution {
    fn new(artist: &str, title: &str) -> Self {
        Self {
            artist: artist.to_string(),
            title: title.to_string(),
        }
    }

    /// Both artist and title resolved to non-empty text.
    pub fn is_complete(&self) -> bool {
        !self.artist.is_empty() && !self.title.is_empty()
    }
}

/// Split a main line on commas into trimmed, non-empty segments.
pub fn split_segments(main_line: &str) -> Vec<&str> {
    main_line
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Decide artist and title from an entry's main line.
///
/// Rules, first match wins:
/// 1. explicit anonymous name → anonymous, second segment is the title
/// 2. joint names or a parenthetical → first segment is the artist
/// 3. object keyword in the first segment → anonymous, first segment is the title
/// 4. material/place keyword in the second segment → anonymous, first is the title
/// 5. otherwise artist = first segment, title = second
pub fn classify(main_line: &str, tables: &KeywordTables) -> Attribution {
    let parts = split_segments(main_line);
    let candidate = parts.first().copied().unwrap_or_default();
    let second = parts.get(1).copied().unwrap_or_default();

    if tables.is_anonymous(candidate) {
        return Attribution::new(ANONYMOUS, second);
    }

    if JOINT_NAMES.is_match(candidate) || PARENTHETICAL.is_match(candidate) {
        return Attribution::new(candidate, second);
    }

    if tables.has_object_hint(candidate) || tables.has_material_hint(second) {
        return Attribution::new(ANONYMOUS, candidate);
    }

    Attribution::new(candidate, second)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_default(line: &str) -> Attribution {
        classify(line, &KeywordTables::default())
    }

    #[test]
    fn test_explicit_anonymous_wins() {
        let a = classify_default("Anonymous, Kouros statue — marble, Greek, c.530 B.C.");
        assert_eq!(a.artist, "anonymous");
        assert_eq!(a.title, "Kouros statue — marble");

        let a = classify_default("UNKNOWN, Warrior Vase");
        assert_eq!(a.artist, "anonymous");
        assert_eq!(a.title, "Warrior Vase");
    }

    #[test]
    fn test_anonymous_without_title_is_incomplete() {
        let a = classify_default("anon");
        assert_eq!(a.artist, "anonymous");
        assert!(!a.is_complete());
    }

    #[test]
    fn test_joint_attribution() {
        let a = classify_default("Euphronios and Euxitheos, Sarpedon krater, c.515 B.C.");
        assert_eq!(a.artist, "Euphronios and Euxitheos");
        assert_eq!(a.title, "Sarpedon krater");

        let a = classify_default("Kleophrades & Epiktetos, cup");
        assert_eq!(a.artist, "Kleophrades & Epiktetos");
    }

    #[test]
    fn test_and_inside_a_word_is_not_a_conjunction() {
        let a = classify_default("Alexandros of Antioch, Aphrodite of Melos");
        assert_eq!(a.artist, "Alexandros of Antioch");
        assert_eq!(a.title, "Aphrodite of Melos");

        // Falls through to the object rule instead of rule 2.
        let a = classify_default("Standing statue, Samos");
        assert_eq!(a.artist, "anonymous");
        assert_eq!(a.title, "Standing statue");
    }

    #[test]
    fn test_parenthetical_artist() {
        let a = classify_default("Polykleitos (Argive), Doryphoros (Roman copy), 450-440 B.C.");
        assert_eq!(a.artist, "Polykleitos (Argive)");
        assert_eq!(a.title, "Doryphoros (Roman copy)");
    }

    #[test]
    fn test_object_keyword() {
        let a = classify_default("Palace of Minos, Knossos, c.1700 B.C.");
        assert_eq!(a.artist, "anonymous");
        assert_eq!(a.title, "Palace of Minos");

        let a = classify_default("Birth of Athena, east pediment");
        assert_eq!(a.artist, "anonymous");
        assert_eq!(a.title, "Birth of Athena");
    }

    #[test]
    fn test_material_keyword_in_second_segment() {
        let a = classify_default("Spring Fresco, Thera, c.1650 B.C.");
        // "fresco" is an object hint too, so rule 3 fires first.
        assert_eq!(a.title, "Spring Fresco");

        let a = classify_default("Riace Warrior A, bronze, c.450 B.C.");
        assert_eq!(a.artist, "anonymous");
        assert_eq!(a.title, "Riace Warrior A");
    }

    #[test]
    fn test_default_rule() {
        let a = classify_default("Exekias, Achilles and Ajax playing dice, c.540 B.C.");
        assert_eq!(a.artist, "Exekias");
        assert_eq!(a.title, "Achilles and Ajax playing dice");
    }

    #[test]
    fn test_single_segment_default_has_no_title() {
        let a = classify_default("Myron");
        assert_eq!(a.artist, "Myron");
        assert_eq!(a.title, "");
        assert!(!a.is_complete());
    }

    #[test]
    fn test_custom_tables() {
        let tables = KeywordTables {
            anonymous_names: vec!["n/a".to_string()],
            object_hints: vec!["stele".to_string()],
            material_hints: vec![],
        };

        assert_eq!(classify("N/A, Grave marker", &tables).artist, "anonymous");
        assert_eq!(classify("Grave stele of Hegeso, Athens", &tables).title, "Grave stele of Hegeso");
        // "marble" is not a material hint in these tables.
        assert_eq!(classify("Nike, marble", &tables).artist, "Nike");
    }

    #[test]
    fn test_split_segments_drops_empty_parts() {
        assert_eq!(split_segments(" a , , b,"), vec!["a", "b"]);
        assert!(split_segments("").is_empty());
    }
}
