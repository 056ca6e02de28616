//! Configuration management for trustgate
//!
//! This module handles loading, validation, and management of the service
//! configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{Result, TrustError};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Service configuration
    pub gateway: TrustGateConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| TrustError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let gateway: TrustGateConfig = serde_yaml::from_str(content)
            .map_err(|e| TrustError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { gateway };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let gateway = TrustGateConfig::from_env()?;
        let config = Self { gateway };

        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.gateway.storage
    }

    /// Get auth configuration
    pub fn auth(&self) -> &AuthConfig {
        &self.gateway.auth
    }

    /// Get moderation configuration
    pub fn moderation(&self) -> &ModerationConfig {
        &self.gateway.moderation
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.gateway.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.gateway
            .server
            .validate()
            .map_err(|e| TrustError::Config(format!("Server config error: {}", e)))?;

        self.gateway
            .server
            .cors
            .validate()
            .map_err(|e| TrustError::Config(format!("CORS config error: {}", e)))?;

        self.gateway
            .storage
            .database
            .validate()
            .map_err(|e| TrustError::Config(format!("Database config error: {}", e)))?;

        self.gateway
            .auth
            .validate()
            .map_err(|e| TrustError::Config(format!("Auth config error: {}", e)))?;

        self.gateway
            .moderation
            .validate()
            .map_err(|e| TrustError::Config(format!("Moderation config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.gateway = self.gateway.merge(other.gateway);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.gateway)
            .map_err(|e| TrustError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
