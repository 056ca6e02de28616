//! HTTP API integration tests
//!
//! Drives the full route table through `actix_web::test` with bearer tokens
//! issued by the service's own JWT handler.

#[cfg(test)]
mod tests {
    use crate::common::{ConfigFactory, IdentityFactory};
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};
    use trustgate::config::Config;
    use trustgate::server::{AppState, HttpServer};
    use trustgate::storage::StorageLayer;
    use uuid::Uuid;

    fn state_for(config: Config) -> web::Data<AppState> {
        web::Data::new(AppState::new(config, StorageLayer::in_memory()))
    }

    fn bearer(state: &AppState, user_id: Uuid) -> (&'static str, String) {
        let token = state.jwt.create_access_token(user_id).unwrap();
        ("Authorization", format!("Bearer {}", token))
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state.clone())
                    .configure(HttpServer::configure),
            )
            .await
        };
    }

    // ==================== Health ====================

    #[actix_web::test]
    async fn test_health_reports_memory_store() {
        let state = state_for(ConfigFactory::create());
        let app = app!(state);

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "healthy");
        assert_eq!(body["data"]["storage"], "memory");
    }

    // ==================== Authentication ====================

    #[actix_web::test]
    async fn test_missing_token_is_unauthorized() {
        let state = state_for(ConfigFactory::create());
        let app = app!(state);

        let req = test::TestRequest::get()
            .uri("/v1/identity/revealed-peers")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[actix_web::test]
    async fn test_foreign_token_is_rejected() {
        let state = state_for(ConfigFactory::create());
        let app = app!(state);

        let mut other = ConfigFactory::create();
        other.gateway.auth.jwt_secret = "a-completely-different-secret-of-enough-length".to_string();
        let other_state = state_for(other);

        let req = test::TestRequest::get()
            .uri("/v1/identity/revealed-peers")
            .insert_header(bearer(&other_state, Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "INVALID_TOKEN");
    }

    // ==================== Moderation ====================

    #[actix_web::test]
    async fn test_moderation_check_blocked_field() {
        let state = state_for(ConfigFactory::create());
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/v1/moderation/check")
            .insert_header(bearer(&state, Uuid::new_v4()))
            .set_json(json!({
                "fields": [
                    {"label": "title", "value": "Team offsite"},
                    {"label": "content", "value": "what a b1tch of a week"}
                ]
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"]["allowed"], false);
        assert_eq!(body["data"]["field"], "content");
        assert_eq!(
            body["data"]["message"],
            "Content contains inappropriate language. Please revise and try again."
        );
        // matched terms stay server-side
        assert!(body["data"].get("matches").is_none());
    }

    #[actix_web::test]
    async fn test_moderation_check_clean() {
        let state = state_for(ConfigFactory::create());
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/v1/moderation/check")
            .insert_header(bearer(&state, Uuid::new_v4()))
            .set_json(json!({"fields": [{"label": "comment", "value": "Great write-up"}]}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["allowed"], true);
        assert!(body["data"].get("field").is_none());
    }

    #[actix_web::test]
    async fn test_moderation_check_disabled() {
        let state = state_for(ConfigFactory::without_moderation());
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/v1/moderation/check")
            .insert_header(bearer(&state, Uuid::new_v4()))
            .set_json(json!({"fields": [{"label": "comment", "value": "shit"}]}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["allowed"], true);
    }

    #[actix_web::test]
    async fn test_moderation_check_requires_fields() {
        let state = state_for(ConfigFactory::create());
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/v1/moderation/check")
            .insert_header(bearer(&state, Uuid::new_v4()))
            .set_json(json!({"fields": []}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    // ==================== Identity Reveal ====================

    #[actix_web::test]
    async fn test_reveal_flow_over_http() {
        let state = state_for(ConfigFactory::create());
        let app = app!(state);
        let a = IdentityFactory::anonymous("night-owl");
        let b = IdentityFactory::anonymous("early-bird");

        let req = test::TestRequest::post()
            .uri("/v1/conversations")
            .insert_header(bearer(&state, a.id))
            .set_json(json!({"participant": a, "counterpart": b}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["disclosure"]["state"], "no_request");
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri(&format!("/v1/conversations/{}/identity/request", id))
            .insert_header(bearer(&state, a.id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["pending"]["is_incoming"], false);

        let req = test::TestRequest::get()
            .uri(&format!("/v1/conversations/{}/identity", id))
            .insert_header(bearer(&state, b.id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["pending"]["is_incoming"], true);

        let req = test::TestRequest::post()
            .uri(&format!("/v1/conversations/{}/identity/respond", id))
            .insert_header(bearer(&state, b.id))
            .set_json(json!({"accept": true}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["is_mutually_revealed"], true);

        let req = test::TestRequest::get()
            .uri("/v1/identity/revealed-peers")
            .insert_header(bearer(&state, b.id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["peers"], json!([a.id]));

        let req = test::TestRequest::post()
            .uri("/v1/identity/present")
            .insert_header(bearer(&state, b.id))
            .set_json(json!({"authors": [a]}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"][0]["display_name"], "night-owl");
        assert_eq!(body["data"][0]["real_name"], "Real night-owl");
        assert_eq!(body["data"][0]["is_anonymous"], false);

        let req = test::TestRequest::get()
            .uri(&format!("/v1/conversations/{}/messages", id))
            .insert_header(bearer(&state, a.id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let kinds: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["kind"].as_str().unwrap())
            .collect();
        assert_eq!(kinds, vec!["identity-request", "identity-accepted"]);
    }

    #[actix_web::test]
    async fn test_present_for_stranger_hides_details() {
        let state = state_for(ConfigFactory::create());
        let app = app!(state);
        let author = IdentityFactory::anonymous("silent-fox");

        let req = test::TestRequest::post()
            .uri("/v1/identity/present")
            .insert_header(bearer(&state, Uuid::new_v4()))
            .set_json(json!({"authors": [author]}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"][0]["display_name"], "silent-fox");
        assert!(body["data"][0]["real_name"].is_null());
        assert_eq!(body["data"][0]["is_anonymous"], true);
    }

    #[actix_web::test]
    async fn test_open_for_someone_else_is_rejected() {
        let state = state_for(ConfigFactory::create());
        let app = app!(state);
        let a = IdentityFactory::anonymous("a");
        let b = IdentityFactory::anonymous("b");

        let req = test::TestRequest::post()
            .uri("/v1/conversations")
            .insert_header(bearer(&state, Uuid::new_v4()))
            .set_json(json!({"participant": a, "counterpart": b}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_outsider_and_state_errors() {
        let state = state_for(ConfigFactory::create());
        let app = app!(state);
        let a = IdentityFactory::anonymous("a");
        let b = IdentityFactory::anonymous("b");
        let record = state.engine.open_conversation(&a, &b).await.unwrap();

        let req = test::TestRequest::post()
            .uri(&format!("/v1/conversations/{}/identity/request", record.id))
            .insert_header(bearer(&state, Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::post()
            .uri(&format!("/v1/conversations/{}/identity/respond", record.id))
            .insert_header(bearer(&state, b.id))
            .set_json(json!({"accept": true}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::get()
            .uri(&format!("/v1/conversations/{}/identity", Uuid::new_v4()))
            .insert_header(bearer(&state, a.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
