//! Helper functions for creating specific error types

use super::types::TrustError;
use uuid::Uuid;

/// Helper functions for creating specific errors
impl TrustError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage(message.into())
    }

    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn invalid_state<S: Into<String>>(message: S) -> Self {
        Self::InvalidState(message.into())
    }

    pub fn not_participant(conversation_id: Uuid, user_id: Uuid) -> Self {
        Self::NotParticipant {
            conversation_id,
            user_id,
        }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Whether the caller can recover by editing input or refreshing state
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ValidationRejected { .. }
                | Self::InvalidState(_)
                | Self::Validation(_)
                | Self::BadRequest(_)
        )
    }
}
