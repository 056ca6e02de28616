//! Server startup
//!
//! Loads configuration, prepares storage and runs the HTTP server.

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::storage::StorageLayer;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "config/trustgate.yaml";

/// Where the running configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// The file was missing
    Environment { missing: PathBuf },
}

impl ConfigSource {
    /// Report the source; call once tracing is initialized
    pub fn log(&self) {
        match self {
            Self::File(path) => info!("Configuration loaded from {}", path.display()),
            Self::Environment { missing } => warn!(
                "Configuration file {} not found, using environment",
                missing.display()
            ),
        }
    }
}

/// Load the configuration file, falling back to the environment when the
/// file does not exist. Tracing is not set up yet at this point, so the
/// source is returned for the caller to log.
pub async fn load_config(path: &Path) -> Result<(Config, ConfigSource)> {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        let config = Config::from_file(path).await?;
        return Ok((config, ConfigSource::File(path.to_path_buf())));
    }

    let config = Config::from_env()?;
    Ok((
        config,
        ConfigSource::Environment {
            missing: path.to_path_buf(),
        },
    ))
}

/// Run the server with `config`, running migrations first when asked
pub async fn run_server(config: Config, migrate: bool) -> Result<()> {
    info!("Starting trustgate");

    let storage = StorageLayer::new(config.storage()).await?;
    if migrate {
        storage.migrate().await?;
    }

    let server = HttpServer::with_storage(&config, storage);
    info!(
        "Server starting at: http://{}",
        config.server().address()
    );
    info!("API Endpoints:");
    info!("   GET  /health");
    info!("   POST /v1/moderation/check");
    info!("   POST /v1/conversations");
    info!("   GET  /v1/conversations/{{id}}/identity");
    info!("   POST /v1/conversations/{{id}}/identity/request");
    info!("   POST /v1/conversations/{{id}}/identity/respond");
    info!("   GET  /v1/conversations/{{id}}/messages");
    info!("   GET  /v1/identity/revealed-peers");
    info!("   POST /v1/identity/present");

    server.start().await
}
