//! Content safety filter
//!
//! Layered screening of user-authored text. Each pass defeats a different
//! evasion trick, so all passes run and their hits accumulate:
//!
//! 1. normalization (NFKD, invisible characters, diacritics, leetspeak)
//! 2. repeated-letter collapse
//! 3. harmful phrase patterns
//! 4. exact and one-edit token matches
//! 5. compacted-token matches (`shiiit`)
//! 6. joined-token and letters-only containment (`s h i t`, `s.h.i.t`)
//! 7. spaced initialisms (`k y s`)

use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, warn};

use super::blocklist::{Blocklist, DEFAULT_BLOCKLIST};
use super::matcher::within_one_edit;
use super::normalize::{collapse_repeats, compact_token, letters_only, normalize, tokenize};
use super::patterns::contains_harmful_phrase;
use super::types::*;
use crate::config::ModerationConfig;
use crate::utils::error::{Result, TrustError};

/// Screens text before it is persisted
#[derive(Debug, Clone)]
pub struct ContentSafetyFilter {
    blocklist: Arc<Blocklist>,
    enabled: bool,
}

impl ContentSafetyFilter {
    /// Filter over the built-in blocklist
    pub fn new() -> Self {
        Self::with_blocklist(Arc::clone(&DEFAULT_BLOCKLIST))
    }

    /// Filter over a caller-supplied blocklist
    pub fn with_blocklist(blocklist: Arc<Blocklist>) -> Self {
        Self {
            blocklist,
            enabled: true,
        }
    }

    /// Filter configured from the `moderation` section
    pub fn from_config(config: &ModerationConfig) -> Self {
        let blocklist = if config.extra_blocked_terms.is_empty() {
            Arc::clone(&DEFAULT_BLOCKLIST)
        } else {
            Arc::new(Blocklist::with_extra_terms(&config.extra_blocked_terms))
        };

        debug!(
            terms = blocklist.len(),
            enabled = config.enabled,
            "Content safety filter configured"
        );

        Self {
            blocklist,
            enabled: config.enabled,
        }
    }

    /// The blocklist in use
    pub fn blocklist(&self) -> &Blocklist {
        &self.blocklist
    }

    /// Whether screening is switched on
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Return the first blocked field, in caller order
    pub fn check(&self, fields: &[LabeledText]) -> Option<Violation> {
        if !self.enabled {
            return None;
        }

        fields.iter().find_map(|field| {
            let result = self.detect(&field.value);
            result.blocked.then(|| {
                warn!(
                    field = %field.label,
                    matches = result.matches.len(),
                    "Blocked user content"
                );
                Violation {
                    field: field.label.clone(),
                    matches: result.matches,
                }
            })
        })
    }

    /// Screen a typed payload, turning a violation into a rejection
    pub fn screen(&self, payload: &impl ModeratedFields) -> Result<()> {
        match self.check(&payload.labeled_fields()) {
            Some(violation) => Err(TrustError::ValidationRejected {
                message: violation.message(),
                field: violation.field,
            }),
            None => Ok(()),
        }
    }

    /// Screen one piece of text
    pub fn detect(&self, text: &str) -> ModerationMatch {
        let mut matches = BTreeSet::new();
        if text.trim().is_empty() {
            return ModerationMatch::default();
        }

        let normalized = collapse_repeats(&normalize(text));

        if contains_harmful_phrase(&normalized) {
            matches.insert(HARMFUL_PHRASE_TAG.to_string());
        }

        let tokens = tokenize(&normalized);

        for token in &tokens.words {
            self.match_token(token, &mut matches);
        }

        let joined: String = tokens.words.concat();
        self.match_containment(&joined, &mut matches);
        self.match_containment(&letters_only(&normalized), &mut matches);

        if !tokens.initialism.is_empty() {
            for term in self.blocklist.all_terms() {
                if tokens.initialism.contains(term) {
                    matches.insert(term.to_string());
                }
            }
        }

        ModerationMatch::from_matches(matches)
    }

    fn match_token(&self, token: &str, matches: &mut BTreeSet<String>) {
        if self.blocklist.contains_exact(token) {
            matches.insert(token.to_string());
        }

        for term in self.blocklist.near_terms() {
            if within_one_edit(token, term) {
                matches.insert(term.clone());
            }
        }

        let compacted = compact_token(token);
        for (compacted_term, term) in self.blocklist.compacted_terms() {
            if compacted == *compacted_term {
                matches.insert(term.clone());
            }
        }
    }

    fn match_containment(&self, haystack: &str, matches: &mut BTreeSet<String>) {
        if haystack.is_empty() {
            return;
        }
        for term in self.blocklist.containment_terms() {
            if haystack.contains(term.as_str()) {
                matches.insert(term.clone());
            }
        }
    }
}

impl Default for ContentSafetyFilter {
    fn default() -> Self {
        Self::new()
    }
}
