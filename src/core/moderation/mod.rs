//! Content safety screening
//!
//! Decides whether user-authored text (posts, reviews, comments, messages)
//! may be published. Screening is pure, deterministic and linear in the
//! input, so it runs synchronously on every write path.

mod blocklist;
mod filter;
mod matcher;
mod normalize;
mod patterns;
mod types;

pub use blocklist::{Blocklist, DEFAULT_BLOCKLIST};
pub use filter::ContentSafetyFilter;
pub use matcher::within_one_edit;
pub use normalize::{collapse_repeats, normalize};
pub use patterns::HARMFUL_PHRASE_PATTERNS;
pub use types::{
    CommentFields, HARMFUL_PHRASE_TAG, LabeledText, MessageFields, ModeratedFields,
    ModerationMatch, PostFields, ReviewFields, Violation,
};
