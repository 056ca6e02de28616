//! Utility modules for trustgate

pub mod error; // Error handling
pub mod logging; // Tracing setup
