//! Request extractors

use crate::server::state::AppState;
use crate::utils::error::TrustError;
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures::future::{Ready, ready};
use uuid::Uuid;

/// The user a request acts for, taken from a verified bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

/// Bearer token from the `Authorization` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequest for AuthenticatedUser {
    type Error = TrustError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            return ready(Err(TrustError::internal("application state missing")));
        };

        let result = bearer_token(req.headers())
            .ok_or_else(|| TrustError::unauthorized("missing bearer token"))
            .and_then(|token| state.jwt.verify_token(token))
            .map(|claims| AuthenticatedUser {
                user_id: claims.sub,
            });

        ready(result)
    }
}
