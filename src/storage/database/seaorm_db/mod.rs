// Module declarations
mod connection;
mod conversation_ops;
mod types;

// Re-export public types
pub use types::{DatabaseBackendType, SeaOrmDatabase};
