//! Identity disclosure
//!
//! Decides what may be shown about a user to a given viewer and runs the
//! per-conversation mutual reveal workflow.

mod engine;
mod peers;
mod presentation;
mod reveal;
mod types;

pub use engine::IdentityDisclosureEngine;
pub use peers::{PresentationContext, RevealedPeerSet};
pub use presentation::{present, sender_label};
pub use reveal::{
    ConversationDisclosureState, ConversationDisclosureView, PendingRevealView, RevealTransition,
    SystemEventKind,
};
pub use types::{
    ConversationId, DisclosurePresentation, UserId, UserIdentity, VisibilityLevel,
};
