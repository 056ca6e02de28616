//! Health check endpoint

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use std::borrow::Cow;
use tracing::{debug, error};

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Reports the service as healthy when its conversation store answers
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let storage_healthy = match state.storage.health_check().await {
        Ok(()) => true,
        Err(e) => {
            error!("Storage health check failed: {}", e);
            false
        }
    };

    let health_status = HealthStatus {
        status: Cow::Borrowed(if storage_healthy { "healthy" } else { "unhealthy" }),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        storage: if state.storage.database.is_some() {
            Cow::Borrowed("database")
        } else {
            Cow::Borrowed("memory")
        },
    };

    let body = ApiResponse::success(health_status);
    if storage_healthy {
        Ok(HttpResponse::Ok().json(body))
    } else {
        Ok(HttpResponse::ServiceUnavailable().json(body))
    }
}

/// Health status payload
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HealthStatus {
    pub status: Cow<'static, str>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: Cow<'static, str>,
    /// Active conversation store backend
    pub storage: Cow<'static, str>,
}
