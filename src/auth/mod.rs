//! Authentication
//!
//! Callers authenticate with a bearer JWT issued by the account service.

pub mod jwt;

pub use jwt::{Claims, JwtHandler};
