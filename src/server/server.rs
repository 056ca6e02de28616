//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use crate::config::{Config, ServerConfig};
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::StorageLayer;
use crate::utils::error::{Result, TrustError};
use actix_cors::Cors;
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::DefaultHeaders,
    web,
};
use std::time::Duration;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let storage = StorageLayer::new(config.storage()).await?;
        Ok(Self::with_storage(config, storage))
    }

    /// Create a server over an already initialized storage layer
    pub fn with_storage(config: &Config, storage: StorageLayer) -> Self {
        Self {
            config: config.gateway.server.clone(),
            state: AppState::new(config.clone(), storage),
        }
    }

    /// Build the CORS middleware from configuration
    pub fn cors(state: &AppState) -> Cors {
        let cors_config = &state.config.gateway.server.cors;
        if !cors_config.enabled {
            return Cors::default();
        }

        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allow_any_header()
            .max_age(cors_config.max_age as usize);

        if cors_config.allows_all_origins() {
            cors = cors.allow_any_origin();
            cors_config.validate().unwrap_or_else(|e| {
                warn!(error = %e, "CORS Configuration Warning");
            });
        } else {
            for origin in &cors_config.allowed_origins {
                cors = cors.allowed_origin(origin);
            }
        }

        if cors_config.allow_credentials {
            cors = cors.supports_credentials();
        }
        cors
    }

    /// Register every route on an app or test service
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.configure(routes::health::configure_routes).service(
            web::scope("/v1")
                .configure(routes::moderation::configure_routes)
                .configure(routes::identity::configure_routes),
        );
    }

    /// Create the Actix-web application
    fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let max_body_size = state.config.gateway.server.max_body_size;
        let cors = Self::cors(&state);

        App::new()
            .app_data(state)
            .app_data(web::JsonConfig::default().limit(max_body_size))
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(DefaultHeaders::new().add(("Server", "trustgate")))
            .configure(Self::configure)
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let workers = self.config.worker_count();
        let timeout = Duration::from_secs(self.config.timeout);

        info!("Starting HTTP server on {} with {} workers", bind_addr, workers);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .workers(workers)
            .client_request_timeout(timeout)
            .bind(&bind_addr)
            .map_err(|e| TrustError::config(format!("Failed to bind {}: {}", bind_addr, e)))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| TrustError::internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
