//! Year parsing for catalogue entries.
//!
//! Turns loose art-historical date expressions into a single signed year
//! (negative for B.C.). Three shapes are recognized, tried in order:
//! - ranges: `1200-1150 B.C.` → -1175 (rounded mean)
//! - single years with an explicit era: `c.450 B.C.` → -450
//! - centuries: `16th c. B.C.` → -1550 (century midpoint)
//!
//! Parenthetical content wins over the surrounding sentence, so
//! `Roman copy (c.450-440 B.C.)` reads the date inside the parentheses.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Era marker determining the sign of a parsed year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Era {
    BC,
    AD,
}

impl Era {
    /// Parse an era token such as `B.C.`, `bc`, `A.D.` or `AD`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "B.C." | "BC" => Some(Era::BC),
            "A.D." | "AD" => Some(Era::AD),
            _ => None,
        }
    }

    fn apply(self, year: i32) -> i32 {
        match self {
            Era::BC => -year,
            Era::AD => year,
        }
    }
}

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]+)\)").expect("valid parenthetical regex"));

static ERA_BC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(B\.C\.|BC)").expect("valid BC regex"));

static ERA_AD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(A\.D\.|AD)").expect("valid AD regex"));

static RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)c?\.?\s*(\d{2,4})\s*[-–—]\s*(\d{2,4}).{0,10}(B\.C\.|A\.D\.|BC|AD)?")
        .expect("valid range regex")
});

static SINGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)c?\.?\s*(\d{2,4}).{0,10}?(B\.C\.|A\.D\.|BC|AD)").expect("valid year regex")
});

static CENTURY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,2})(st|nd|rd|th)\s*c\.?\s*(B\.C\.|A\.D\.|BC|AD)")
        .expect("valid century regex")
});

/// Parse a representative year from free text.
///
/// Every parenthetical group is tried left to right; the first one that
/// yields a year wins. Only when none do is the whole string parsed.
pub fn parse_year(text: &str) -> Option<i32> {
    PARENTHETICAL
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .find_map(|inner| parse_year_core(inner.as_str()))
        .or_else(|| parse_year_core(text))
}

/// Apply the range, single-year and century rules to one candidate string.
pub fn parse_year_core(candidate: &str) -> Option<i32> {
    parse_range(candidate)
        .or_else(|| parse_single(candidate))
        .or_else(|| parse_century(candidate))
}

/// Era implied anywhere in the candidate, B.C. taking precedence.
fn implied_era(candidate: &str) -> Option<Era> {
    if ERA_BC.is_match(candidate) {
        Some(Era::BC)
    } else if ERA_AD.is_match(candidate) {
        Some(Era::AD)
    } else {
        None
    }
}

fn parse_range(candidate: &str) -> Option<i32> {
    let caps = RANGE.captures(candidate)?;
    let a: i32 = caps.get(1)?.as_str().parse().ok()?;
    let b: i32 = caps.get(2)?.as_str().parse().ok()?;

    let era = caps
        .get(3)
        .and_then(|m| Era::from_token(m.as_str()))
        .or_else(|| implied_era(candidate));

    // Half-up rounding of the mean; both ends are non-negative here.
    let mid = (a + b + 1) / 2;
    Some(era.map_or(mid, |era| era.apply(mid)))
}

fn parse_single(candidate: &str) -> Option<i32> {
    SINGLE
        .captures_iter(candidate)
        .find(|caps| !is_ordinal(candidate, caps))
        .and_then(|caps| {
            let year: i32 = caps.get(1)?.as_str().parse().ok()?;
            let era = Era::from_token(caps.get(2)?.as_str())?;
            Some(era.apply(year))
        })
}

/// A number carrying an ordinal suffix ("16th") is a century, not a year.
fn is_ordinal(candidate: &str, caps: &Captures) -> bool {
    let Some(number) = caps.get(1) else {
        return false;
    };
    let rest = candidate[number.end()..].to_ascii_lowercase();
    ["st", "nd", "rd", "th"]
        .iter()
        .any(|suffix| rest.starts_with(suffix))
}

fn parse_century(candidate: &str) -> Option<i32> {
    let caps = CENTURY.captures(candidate)?;
    let century: i32 = caps.get(1)?.as_str().parse().ok()?;
    let era = Era::from_token(caps.get(3)?.as_str())?;
    Some(era.apply(century * 100 - 50))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_year_bc() {
        assert_eq!(parse_year("c.450 B.C."), Some(-450));
        assert_eq!(parse_year("c. 530 BC"), Some(-530));
    }

    #[test]
    fn test_single_year_ad() {
        assert_eq!(parse_year("Rome, 113 A.D."), Some(113));
        assert_eq!(parse_year("c.1503 ad"), Some(1503));
    }

    #[test]
    fn test_century_expressions() {
        assert_eq!(parse_year("16th c. B.C."), Some(-1550));
        assert_eq!(parse_year("1st c. A.D."), Some(50));
        assert_eq!(parse_year("2nd c BC"), Some(-150));
        assert_eq!(parse_year("Hellenistic, 3rd c. B.C."), Some(-250));
    }

    #[test]
    fn test_range_takes_rounded_mean() {
        assert_eq!(parse_year("1200-1150 B.C."), Some(-1175));
        assert_eq!(parse_year("c.450–440 BC"), Some(-445));
        assert_eq!(parse_year("447—433 B.C."), Some(-440));
        // 1503 + 1506 = 3009, mean 1504.5 rounds up
        assert_eq!(parse_year("1503-1506 A.D."), Some(1505));
    }

    #[test]
    fn test_range_without_era_is_positive() {
        assert_eq!(parse_year("painted 1503-1519"), Some(1511));
    }

    #[test]
    fn test_range_era_implied_elsewhere() {
        // The era token sits more than ten characters after the range.
        assert_eq!(
            parse_year("built 480-470, early classical period, B.C."),
            Some(-475)
        );
    }

    #[test]
    fn test_single_year_requires_era() {
        assert_eq!(parse_year("Inventory 1234"), None);
    }

    #[test]
    fn test_parenthetical_precedence() {
        assert_eq!(
            parse_year("Roman copy of a Greek original (c.450-440 B.C.)"),
            Some(-445)
        );
        // The outer text would parse to 100 A.D.; the parenthetical wins.
        assert_eq!(
            parse_year("copied 100 A.D. from an original (c.460 B.C.)"),
            Some(-460)
        );
    }

    #[test]
    fn test_parentheticals_without_year_fall_back_to_outer_text() {
        assert_eq!(
            parse_year("Kritios Boy (Athens, Acropolis), c.480 B.C."),
            Some(-480)
        );
    }

    #[test]
    fn test_first_parenthetical_with_year_wins() {
        assert_eq!(parse_year("Statue (marble) (c.530 B.C.) (1st c. A.D.)"), Some(-530));
    }

    #[test]
    fn test_no_year() {
        assert_eq!(parse_year("Lion Gate, Mycenae"), None);
        assert_eq!(parse_year(""), None);
    }

    #[test]
    fn test_era_tokens() {
        assert_eq!(Era::from_token("b.c."), Some(Era::BC));
        assert_eq!(Era::from_token("AD"), Some(Era::AD));
        assert_eq!(Era::from_token("CE"), None);
    }
}
