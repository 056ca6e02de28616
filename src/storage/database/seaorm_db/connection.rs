use crate::config::DatabaseConfig;
use crate::utils::error::{Result, TrustError};
use sea_orm::*;
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::super::entities;
use super::super::migration::Migrator;
use super::types::{DatabaseBackendType, SeaOrmDatabase};

impl SeaOrmDatabase {
    /// Create a new database connection
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let backend_type = DatabaseBackendType::from_url(&config.url);
        let db = Self::try_connect(&config.url, config).await?;
        info!("Database connection established ({:?})", backend_type);
        Ok(Self {
            db,
            backend_type,
            write_gate: Mutex::new(()),
        })
    }

    /// Try to connect to a database
    async fn try_connect(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url.to_string());
        opt.max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.connection_timeout))
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(3600))
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        Database::connect(opt).await.map_err(TrustError::Database)
    }

    /// Get the current backend type
    pub fn backend_type(&self) -> DatabaseBackendType {
        self.backend_type
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        info!("Running database migrations...");
        Migrator::up(&self.db, None).await.map_err(|e| {
            warn!("Migration failed: {}", e);
            TrustError::Database(e)
        })?;
        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get the underlying database connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Close the database connection
    pub async fn close(self) -> Result<()> {
        self.db.close().await.map_err(TrustError::Database)?;
        Ok(())
    }

    /// Health check
    pub(super) async fn ping(&self) -> Result<()> {
        debug!("Performing database health check");

        entities::Conversation::find()
            .limit(1)
            .all(&self.db)
            .await
            .map_err(TrustError::Database)?;

        debug!("Database health check passed");
        Ok(())
    }
}
