//! Content moderation configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Content moderation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationConfig {
    /// Screen user text; when false every input is accepted
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Terms blocked in addition to the built-in list
    #[serde(default)]
    pub extra_blocked_terms: Vec<String>,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            extra_blocked_terms: Vec::new(),
        }
    }
}

impl ModerationConfig {
    /// Merge moderation configurations
    pub fn merge(mut self, other: Self) -> Self {
        if !other.enabled {
            self.enabled = false;
        }
        self.extra_blocked_terms.extend(other.extra_blocked_terms);
        self
    }

    /// Validate moderation configuration
    pub fn validate(&self) -> Result<(), String> {
        let blank = self
            .extra_blocked_terms
            .iter()
            .any(|term| !term.chars().any(char::is_alphabetic));
        if blank {
            return Err("Blocked terms must contain at least one letter".to_string());
        }
        Ok(())
    }
}
