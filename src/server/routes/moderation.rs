//! Content moderation endpoint
//!
//! Lets clients check text before they submit it. Write paths screen their
//! own payloads with [`ContentSafetyFilter::screen`].
//!
//! [`ContentSafetyFilter::screen`]: crate::core::moderation::ContentSafetyFilter::screen

use crate::core::moderation::LabeledText;
use crate::server::extractors::AuthenticatedUser;
use crate::server::routes::ok;
use crate::server::state::AppState;
use crate::utils::error::{Result, TrustError};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configure moderation routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/moderation/check", web::post().to(check_content));
}

/// Fields to check, in the order they appear in the client's form
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModerationCheckRequest {
    pub fields: Vec<LabeledText>,
}

/// Verdict for a check request. Matched terms are never echoed back.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModerationCheckResponse {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

async fn check_content(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    request: web::Json<ModerationCheckRequest>,
) -> Result<HttpResponse> {
    if request.fields.is_empty() {
        return Err(TrustError::bad_request("at least one field is required"));
    }
    debug!(
        "Moderation check of {} fields for user {}",
        request.fields.len(),
        user.user_id
    );

    let response = match state.filter.check(&request.fields) {
        Some(violation) => ModerationCheckResponse {
            allowed: false,
            message: Some(violation.message()),
            field: Some(violation.field),
        },
        None => ModerationCheckResponse {
            allowed: true,
            field: None,
            message: None,
        },
    };

    Ok(ok(response))
}
