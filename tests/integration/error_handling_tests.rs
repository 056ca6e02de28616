//! Error handling integration tests
//!
//! Verifies that errors map to the right HTTP status and body, and that
//! internal details never reach the client.

#[cfg(test)]
mod tests {
    use actix_web::ResponseError;
    use actix_web::body::to_bytes;
    use trustgate::utils::error::{ErrorResponse, TrustError};
    use uuid::Uuid;

    async fn body_of(err: &TrustError) -> ErrorResponse {
        let response = err.error_response();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // ==================== Status Mapping ====================

    #[test]
    fn test_status_codes() {
        let cases = [
            (TrustError::unauthorized("no token"), 401),
            (TrustError::validation("bad input"), 400),
            (TrustError::bad_request("empty"), 400),
            (TrustError::not_found("conversation"), 404),
            (TrustError::invalid_state("already revealed"), 409),
            (TrustError::not_participant(Uuid::new_v4(), Uuid::new_v4()), 403),
            (TrustError::storage("disk full"), 500),
            (TrustError::config("bad yaml"), 500),
            (TrustError::internal("boom"), 500),
        ];

        for (err, status) in cases {
            assert_eq!(err.status_code().as_u16(), status, "{:?}", err);
        }
    }

    // ==================== Response Bodies ====================

    #[actix_web::test]
    async fn test_rejection_names_field() {
        let err = TrustError::ValidationRejected {
            field: "title".to_string(),
            message: "Title contains inappropriate language. Please revise and try again."
                .to_string(),
        };
        assert_eq!(err.status_code().as_u16(), 400);

        let body = body_of(&err).await;
        assert_eq!(body.error.code, "CONTENT_REJECTED");
        assert_eq!(body.error.field.as_deref(), Some("title"));
        assert!(body.error.message.starts_with("Title contains"));
    }

    #[actix_web::test]
    async fn test_storage_details_are_hidden() {
        let err = TrustError::storage("conversation 42 has 3 participants, expected 2");
        let body = body_of(&err).await;
        assert_eq!(body.error.code, "STORAGE_ERROR");
        assert_eq!(body.error.message, "Storage operation failed");
        assert!(body.error.field.is_none());
    }

    #[actix_web::test]
    async fn test_not_participant_body() {
        let conversation = Uuid::new_v4();
        let err = TrustError::not_participant(conversation, Uuid::new_v4());
        let body = body_of(&err).await;
        assert_eq!(body.error.code, "NOT_PARTICIPANT");
        assert!(body.error.message.contains(&conversation.to_string()));
    }

    // ==================== Conversions ====================

    #[test]
    fn test_json_error_converts_to_bad_request() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: TrustError = parse.into();
        assert!(matches!(err, TrustError::Serialization(_)));
        assert_eq!(err.status_code().as_u16(), 400);
    }

    #[test]
    fn test_yaml_error_is_internal() {
        let parse = serde_yaml::from_str::<serde_yaml::Value>("a: [b").unwrap_err();
        let err: TrustError = parse.into();
        assert_eq!(err.status_code().as_u16(), 500);
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(TrustError::validation("bad").is_recoverable());
        assert!(TrustError::invalid_state("revealed").is_recoverable());
        assert!(!TrustError::storage("timeout").is_recoverable());
        assert!(!TrustError::unauthorized("expired").is_recoverable());
    }
}
