use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;

/// SeaORM-based database implementation
#[derive(Debug)]
pub struct SeaOrmDatabase {
    pub(super) db: DatabaseConnection,
    /// Backend type indicator
    pub(super) backend_type: DatabaseBackendType,
    /// Serializes disclosure updates on SQLite, which has no row locks
    pub(super) write_gate: Mutex<()>,
}

/// Database backend type indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackendType {
    PostgreSQL,
    SQLite,
}

impl DatabaseBackendType {
    /// Backend implied by a connection URL
    pub fn from_url(url: &str) -> Self {
        if url.starts_with("sqlite") {
            Self::SQLite
        } else {
            Self::PostgreSQL
        }
    }

    /// Whether row locks (`SELECT ... FOR UPDATE`) are available
    pub fn supports_row_locks(&self) -> bool {
        matches!(self, Self::PostgreSQL)
    }
}
