//! Top-level service configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::env;

/// Service configuration as laid out in the YAML file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrustGateConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Content moderation configuration
    #[serde(default)]
    pub moderation: ModerationConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TrustGateConfig {
    /// Defaults overridden by `TRUSTGATE_*`, `DATABASE_URL` and `JWT_SECRET`
    pub fn from_env() -> crate::utils::error::Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = env::var("TRUSTGATE_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = env::var("TRUSTGATE_PORT") {
            config.server.port = port.parse().map_err(|_| {
                crate::utils::error::TrustError::config(format!(
                    "TRUSTGATE_PORT is not a valid port: {}",
                    port
                ))
            })?;
        }
        if let Ok(url) = env::var("DATABASE_URL") {
            config.storage.database.url = url;
            config.storage.database.enabled = true;
        }
        if let Ok(secret) = env::var("JWT_SECRET") {
            config.auth.jwt_secret = secret;
        }
        if let Ok(level) = env::var("TRUSTGATE_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(json) = env::var("TRUSTGATE_LOG_JSON") {
            config.logging.json = matches!(json.as_str(), "1" | "true" | "yes");
        }

        Ok(config)
    }

    /// Merge two configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.storage = self.storage.merge(other.storage);
        self.auth = self.auth.merge(other.auth);
        self.moderation = self.moderation.merge(other.moderation);
        self.logging = self.logging.merge(other.logging);
        self
    }
}
