//! Identity and disclosure types

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Account identifier
pub type UserId = Uuid;

/// Conversation identifier
pub type ConversationId = Uuid;

/// A user's standing public disclosure preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum VisibilityLevel {
    /// Alias only
    #[default]
    Anonymous,
    /// Alias and role
    Role,
    /// Alias, role, school and graduation year
    School,
    /// Everything, including the real name
    RealName,
}

impl VisibilityLevel {
    /// Parse a stored value. Unrecognized values fall back to `Anonymous`,
    /// which downgrades disclosure instead of failing the render.
    pub fn from_stored(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "role" => Self::Role,
            "school" => Self::School,
            "real_name" | "realname" | "real-name" => Self::RealName,
            _ => Self::Anonymous,
        }
    }

    /// Canonical stored form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Role => "role",
            Self::School => "school",
            Self::RealName => "real_name",
        }
    }
}

impl From<String> for VisibilityLevel {
    fn from(value: String) -> Self {
        Self::from_stored(&value)
    }
}

impl From<&str> for VisibilityLevel {
    fn from(value: &str) -> Self {
        Self::from_stored(value)
    }
}

impl fmt::Display for VisibilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Disclosure-relevant attributes of one account. Owned by the profile
/// service; read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: UserId,
    /// Stable pseudonym, always present
    pub alias: String,
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub visibility_level: VisibilityLevel,
    /// Interests in priority order; the first one is the user's role
    #[serde(default)]
    pub fields_of_interest: Vec<String>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub graduation_year: Option<i32>,
}

impl UserIdentity {
    /// Identity with only an alias, visibility `Anonymous`
    pub fn new(id: UserId, alias: impl Into<String>) -> Self {
        Self {
            id,
            alias: alias.into(),
            real_name: None,
            visibility_level: VisibilityLevel::Anonymous,
            fields_of_interest: Vec::new(),
            school: None,
            graduation_year: None,
        }
    }

    /// First field of interest
    pub fn role(&self) -> Option<&str> {
        self.fields_of_interest.first().map(String::as_str)
    }

    /// Real name with surrounding whitespace removed, `None` when blank
    pub fn trimmed_real_name(&self) -> Option<&str> {
        self.real_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// What a display layer may render for one author, for one viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisclosurePresentation {
    /// Primary label; always the alias
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<i32>,
    pub is_anonymous: bool,
}
