//! Core trust and safety logic
//!
//! Pure content screening and identity disclosure. Nothing here knows about
//! HTTP; persistence is reached through [`crate::storage::ConversationStore`].

pub mod disclosure;
pub mod moderation;
