//! Harmful phrase patterns
//!
//! Pre-compiled word-boundary regexes matched against normalized text. The
//! `regex` crate runs in linear time, so attacker-controlled input cannot
//! trigger catastrophic backtracking.

use once_cell::sync::Lazy;
use regex::Regex;

/// Self-harm incitement and hate slogans, written against normalized text
/// (lower-case letters, digits and spaces only)
const HARMFUL_PHRASE_SOURCES: &[&str] = &[
    r"\bkill\s+(?:your|yo|ur)\s*(?:self|selves)\b",
    r"\bkill\s+urself\b",
    r"\b(?:hang|shoot)\s+(?:your|ur)\s*self\b",
    r"\bend\s+(?:your|ur)\s+(?:life|self)\b",
    r"\bgo\s+(?:and\s+)?die\b",
    r"\byou\s+should\s+(?:just\s+)?die\b",
    r"\bdrink\s+bleach\b",
    r"\bnobody\s+(?:would|will)\s+miss\s+you\b",
    r"\bheil\s+hitler\b",
    r"\bsieg\s+heil\b",
    r"\bwhite\s+power\b",
    r"\bgas\s+the\s+(?:jews?|kikes?|blacks|gays|muslims|immigrants)\b",
    r"\bracial\s+holy\s+war\b",
];

/// Compiled phrase patterns
///
/// A pattern that fails to compile is logged and skipped; this indicates a
/// code error that the tests below catch.
pub static HARMFUL_PHRASE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    HARMFUL_PHRASE_SOURCES
        .iter()
        .filter_map(|source| match Regex::new(source) {
            Ok(regex) => Some(regex),
            Err(e) => {
                tracing::error!("Failed to compile harmful phrase regex {}: {}", source, e);
                None
            }
        })
        .collect()
});

/// Whether any harmful phrase occurs in the normalized text
pub fn contains_harmful_phrase(normalized: &str) -> bool {
    HARMFUL_PHRASE_PATTERNS
        .iter()
        .any(|pattern| pattern.is_match(normalized))
}
