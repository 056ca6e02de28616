//! HTTP response handling for errors

use super::types::TrustError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl TrustError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            TrustError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            TrustError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            TrustError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            TrustError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            TrustError::Jwt(_) => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            TrustError::ValidationRejected { .. } => {
                (StatusCode::BAD_REQUEST, "CONTENT_REJECTED")
            }
            TrustError::InvalidState(_) => (StatusCode::CONFLICT, "INVALID_STATE"),
            TrustError::NotParticipant { .. } => (StatusCode::FORBIDDEN, "NOT_PARTICIPANT"),
            TrustError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            TrustError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            TrustError::BadRequest(_) | TrustError::Serialization(_) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Message safe to hand back to a client
    fn public_message(&self) -> String {
        match self {
            TrustError::Database(_) | TrustError::Storage(_) => {
                "Storage operation failed".to_string()
            }
            TrustError::Jwt(_) => "Invalid or expired token".to_string(),
            TrustError::Config(_)
            | TrustError::Yaml(_)
            | TrustError::Io(_)
            | TrustError::Internal(_) => "An internal error occurred".to_string(),
            _ => self.to_string(),
        }
    }
}

impl ResponseError for TrustError {
    fn status_code(&self) -> StatusCode {
        self.status_and_code().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code) = self.status_and_code();

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message: self.public_message(),
                field: match self {
                    TrustError::ValidationRejected { field, .. } => Some(field.clone()),
                    _ => None,
                },
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub timestamp: i64,
}
