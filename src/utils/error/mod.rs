//! Error handling utilities
//!
//! This module provides the error taxonomy shared by the moderation filter,
//! the disclosure engine, storage and the HTTP surface.

pub mod error;

// Re-export commonly used types
pub use error::*;
