//! Storage layer for trustgate
//!
//! Conversations and their disclosure state are owned by the messaging
//! service; this module defines the interface the disclosure engine needs
//! from it and provides an in-memory and a SeaORM implementation.

/// Database storage module
pub mod database;
/// In-memory conversation store
pub mod memory;
mod types;

pub use memory::InMemoryConversationStore;
pub use types::{ConversationRecord, NewParticipant, Participant, SystemMessage};

use crate::config::StorageConfig;
use crate::core::disclosure::{ConversationId, RevealTransition, UserId};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Decides the transition for the current record. Runs inside the store's
/// atomic unit; an error aborts the unit without writing.
pub type DisclosureUpdate =
    Box<dyn FnOnce(&ConversationRecord) -> Result<RevealTransition> + Send>;

/// Persistence the disclosure engine depends on
#[async_trait]
pub trait ConversationStore: Send + Sync + std::fmt::Debug {
    /// Create a conversation in `NoRequest`
    async fn create_conversation(
        &self,
        participants: [NewParticipant; 2],
    ) -> Result<ConversationRecord>;

    /// Look a conversation up
    async fn find_conversation(&self, id: ConversationId) -> Result<Option<ConversationRecord>>;

    /// Read the record, let `update` decide, then write the new state, the
    /// participant flags and the system message as one atomic unit.
    /// Returns `NotFound` for an unknown conversation.
    async fn update_disclosure(
        &self,
        id: ConversationId,
        update: DisclosureUpdate,
    ) -> Result<ConversationRecord>;

    /// Counterparts of `viewer` across mutually revealed conversations
    async fn revealed_counterparts(&self, viewer: UserId) -> Result<Vec<UserId>>;

    /// System messages of a conversation, oldest first
    async fn system_messages(&self, id: ConversationId) -> Result<Vec<SystemMessage>>;

    /// Backend reachability
    async fn health_check(&self) -> Result<()>;
}

/// Storage backends selected by configuration
#[derive(Debug, Clone)]
pub struct StorageLayer {
    /// Conversation store used by the disclosure engine
    pub conversations: Arc<dyn ConversationStore>,
    /// Database connection, when one is configured
    pub database: Option<Arc<database::Database>>,
}

impl StorageLayer {
    /// Create a new storage layer
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        info!("Initializing storage layer");

        if !config.database.enabled {
            debug!("Database disabled, using in-memory conversation store");
            return Ok(Self::in_memory());
        }

        debug!("Connecting to database");
        let database = Arc::new(database::Database::new(&config.database).await?);

        info!("Storage layer initialized successfully");
        Ok(Self {
            conversations: database.clone(),
            database: Some(database),
        })
    }

    /// Storage backed only by process memory
    pub fn in_memory() -> Self {
        Self {
            conversations: Arc::new(InMemoryConversationStore::new()),
            database: None,
        }
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        if let Some(database) = &self.database {
            database.migrate().await?;
        }
        Ok(())
    }

    /// Health check for the active backend
    pub async fn health_check(&self) -> Result<()> {
        self.conversations.health_check().await
    }
}
