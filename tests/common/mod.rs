//! Common test utilities for trustgate
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::{TestDatabase, fixtures::IdentityFactory};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let db = TestDatabase::new().await;
//!     let author = IdentityFactory::anonymous("quiet-owl");
//!     // ...
//! }
//! ```

pub mod fixtures;

pub use database::TestDatabase;
pub use fixtures::{ConfigFactory, IdentityFactory, TEST_JWT_SECRET};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
