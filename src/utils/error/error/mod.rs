//! Error handling for trustgate
//!
//! This module defines all error types used throughout the service.

#![allow(missing_docs)]

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{Result, TrustError};
