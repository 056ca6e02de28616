//! Application state shared across HTTP handlers

use crate::auth::JwtHandler;
use crate::config::Config;
use crate::core::disclosure::IdentityDisclosureEngine;
use crate::core::moderation::ContentSafetyFilter;
use crate::storage::StorageLayer;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Every field is behind an `Arc`; cloning the state per worker is cheap.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Content safety filter
    pub filter: Arc<ContentSafetyFilter>,
    /// Identity disclosure engine
    pub engine: Arc<IdentityDisclosureEngine>,
    /// Bearer token verification
    pub jwt: Arc<JwtHandler>,
    /// Storage layer
    pub storage: Arc<StorageLayer>,
}

impl AppState {
    /// Wire the components for `config` on top of `storage`
    pub fn new(config: Config, storage: StorageLayer) -> Self {
        let filter = ContentSafetyFilter::from_config(config.moderation());
        let engine = IdentityDisclosureEngine::new(storage.conversations.clone());
        let jwt = JwtHandler::new(config.auth());

        Self {
            config: Arc::new(config),
            filter: Arc::new(filter),
            engine: Arc::new(engine),
            jwt: Arc::new(jwt),
            storage: Arc::new(storage),
        }
    }

    /// Get service configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
