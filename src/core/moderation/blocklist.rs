//! Blocked term lists
//!
//! The default list is deliberately small: common profanity, a handful of
//! slurs and the spaced initialism `kys`. Deployments extend it through
//! `moderation.extra_blocked_terms`.

use super::normalize::{compact_token, letters_only, normalize};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::Arc;

/// Minimum term length for near (one-edit) matching
pub const NEAR_MATCH_MIN_LEN: usize = 5;

/// Minimum term length for compacted and containment matching
pub const CONTAINMENT_MIN_LEN: usize = 4;

const DEFAULT_TERMS: &[&str] = &[
    "ass",
    "fag",
    "kys",
    "fuck",
    "shit",
    "cunt",
    "twat",
    "slut",
    "bitch",
    "whore",
    "pussy",
    "fucker",
    "nigger",
    "faggot",
    "asshole",
    "bastard",
    "jackass",
    "bullshit",
    "dickhead",
    "shithead",
    "retarded",
    "douchebag",
    "cocksucker",
    "motherfucker",
];

/// Built-in blocklist, shared by every filter that is not configured otherwise
pub static DEFAULT_BLOCKLIST: Lazy<Arc<Blocklist>> =
    Lazy::new(|| Arc::new(Blocklist::new(DEFAULT_TERMS.iter().copied())));

/// Immutable, pre-indexed set of blocked terms
#[derive(Debug, Clone, Default)]
pub struct Blocklist {
    terms: Vec<String>,
    exact: HashSet<String>,
    near: Vec<String>,
    /// (compacted form, canonical term) for terms of at least four letters
    compacted: Vec<(String, String)>,
    long: Vec<String>,
}

impl Blocklist {
    /// Build a blocklist; terms are normalized to letters and deduplicated
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::default();

        for entry in terms {
            let term = letters_only(&normalize(entry.as_ref()));
            if term.is_empty() || list.exact.contains(&term) {
                continue;
            }
            let len = term.chars().count();

            if len >= NEAR_MATCH_MIN_LEN {
                list.near.push(term.clone());
            }
            if len >= CONTAINMENT_MIN_LEN {
                list.compacted.push((compact_token(&term), term.clone()));
                list.long.push(term.clone());
            }
            list.exact.insert(term.clone());
            list.terms.push(term);
        }

        list
    }

    /// Default terms plus configured extras
    pub fn with_extra_terms(extra_terms: &[String]) -> Self {
        Self::new(
            DEFAULT_TERMS
                .iter()
                .copied()
                .chain(extra_terms.iter().map(String::as_str)),
        )
    }

    /// All entries in insertion order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Exact lookup of a normalized token
    pub fn contains_exact(&self, token: &str) -> bool {
        self.exact.contains(token)
    }

    /// Terms of at least [`NEAR_MATCH_MIN_LEN`] letters, matched within one edit
    pub fn near_terms(&self) -> &[String] {
        &self.near
    }

    /// Terms of at least four letters, paired with their compacted form
    pub fn compacted_terms(&self) -> &[(String, String)] {
        &self.compacted
    }

    /// Terms of at least four letters
    pub fn containment_terms(&self) -> &[String] {
        &self.long
    }

    /// Every term, for initialism containment
    pub fn all_terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }
}
