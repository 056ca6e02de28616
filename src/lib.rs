//! # trustgate
//!
//! Trust and safety layer for an anonymous professional community.
//!
//! - **Content safety**: screens user-authored text for profanity, slurs and
//!   harmful phrases, resisting common evasion (leetspeak, separators,
//!   repeated letters, homoglyphs, zero-width characters).
//! - **Identity disclosure**: decides what may be shown about an author to a
//!   given viewer and runs the per-conversation mutual reveal workflow.
//!
//! ```rust,no_run
//! use trustgate::core::moderation::{ContentSafetyFilter, PostFields};
//!
//! let filter = ContentSafetyFilter::default();
//! let post = PostFields {
//!     title: "Interview tips".to_string(),
//!     content: "Ask about the team's on-call load.".to_string(),
//! };
//! assert!(filter.screen(&post).is_ok());
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::disclosure::IdentityDisclosureEngine;
pub use core::moderation::ContentSafetyFilter;
pub use utils::error::{Result, TrustError};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
