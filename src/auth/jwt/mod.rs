//! JWT token handling
//!
//! Bearer tokens identify the calling user; the subject claim is the user id
//! the disclosure engine acts for.

mod handler;
pub mod types;


pub use types::{Claims, JwtHandler};
