//! Database storage implementation using SeaORM
//!
//! Persists conversations, their participants and system messages on
//! SQLite or PostgreSQL.

/// Database entities module
pub mod entities;
/// Database migration module
pub mod migration;
/// SeaORM database implementation module
pub mod seaorm_db;

pub use seaorm_db::DatabaseBackendType;
pub use seaorm_db::SeaOrmDatabase as Database;
