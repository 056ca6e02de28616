//! Error types for trustgate

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for trustgate
pub type Result<T> = std::result::Result<T, TrustError>;

/// Main error type for trustgate
#[derive(Error, Debug)]
pub enum TrustError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Storage failures reported by a conversation store
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JWT errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Missing or invalid credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Content rejected by the safety filter
    #[error("{message}")]
    ValidationRejected {
        /// Label of the offending field
        field: String,
        /// User-facing message
        message: String,
    },

    /// Identity-reveal transition not allowed from the current state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Caller is not a participant of the conversation
    #[error("User {user_id} is not a participant of conversation {conversation_id}")]
    NotParticipant {
        conversation_id: Uuid,
        user_id: Uuid,
    },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
