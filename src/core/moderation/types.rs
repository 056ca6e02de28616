//! Moderation type definitions
//!
//! Inputs and results of the content safety filter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Synthetic match tag emitted by the phrase patterns
pub const HARMFUL_PHRASE_TAG: &str = "harmful_phrase";

/// One labelled piece of user-authored text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledText {
    /// Field label, e.g. `title` or `content`
    pub label: String,
    /// Raw text as submitted
    pub value: String,
}

impl LabeledText {
    /// Create a labelled field
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Result of screening a single piece of text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationMatch {
    /// Whether the text must not be published
    pub blocked: bool,
    /// Blocked terms or synthetic tags that triggered
    pub matches: BTreeSet<String>,
}

impl ModerationMatch {
    pub(crate) fn from_matches(matches: BTreeSet<String>) -> Self {
        Self {
            blocked: !matches.is_empty(),
            matches,
        }
    }
}

/// First blocked field of a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Label of the blocked field
    pub field: String,
    /// What triggered
    pub matches: BTreeSet<String>,
}

impl Violation {
    /// User-facing rejection message with the field label capitalized
    pub fn message(&self) -> String {
        format!(
            "{} contains inappropriate language. Please revise and try again.",
            capitalize(&self.field)
        )
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A write payload whose text fields must be screened before persisting
pub trait ModeratedFields {
    /// Fields in the order they are checked
    fn labeled_fields(&self) -> Vec<LabeledText>;
}

/// Community post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostFields {
    pub title: String,
    pub content: String,
}

impl ModeratedFields for PostFields {
    fn labeled_fields(&self) -> Vec<LabeledText> {
        vec![
            LabeledText::new("title", self.title.as_str()),
            LabeledText::new("content", self.content.as_str()),
        ]
    }
}

/// Company review
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewFields {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ModeratedFields for ReviewFields {
    fn labeled_fields(&self) -> Vec<LabeledText> {
        vec![
            LabeledText::new("title", self.title.as_str()),
            LabeledText::new("content", self.content.as_str()),
            LabeledText::new("tags", self.tags.join(" ")),
        ]
    }
}

/// Comment on a post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentFields {
    pub content: String,
}

impl ModeratedFields for CommentFields {
    fn labeled_fields(&self) -> Vec<LabeledText> {
        vec![LabeledText::new("comment", self.content.as_str())]
    }
}

/// Direct message body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageFields {
    pub content: String,
}

impl ModeratedFields for MessageFields {
    fn labeled_fields(&self) -> Vec<LabeledText> {
        vec![LabeledText::new("message", self.content.as_str())]
    }
}
