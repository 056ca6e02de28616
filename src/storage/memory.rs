//! In-memory conversation store
//!
//! Used when no database is configured and throughout the tests. A single
//! mutex guards all tables so every disclosure update is one atomic unit.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::debug;

use super::types::{ConversationRecord, NewParticipant, SystemMessage};
use super::{ConversationStore, DisclosureUpdate};
use crate::core::disclosure::{ConversationId, UserId};
use crate::utils::error::{Result, TrustError};

#[derive(Debug, Default)]
struct Tables {
    conversations: HashMap<ConversationId, ConversationRecord>,
    messages: Vec<SystemMessage>,
}

/// Conversation store held in process memory
#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    tables: Mutex<Tables>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn create_conversation(
        &self,
        participants: [NewParticipant; 2],
    ) -> Result<ConversationRecord> {
        let record = ConversationRecord::open(participants, Utc::now());
        debug!("Creating conversation: {}", record.id);

        self.tables
            .lock()
            .conversations
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_conversation(&self, id: ConversationId) -> Result<Option<ConversationRecord>> {
        debug!("Finding conversation by ID: {}", id);
        Ok(self.tables.lock().conversations.get(&id).cloned())
    }

    async fn update_disclosure(
        &self,
        id: ConversationId,
        update: DisclosureUpdate,
    ) -> Result<ConversationRecord> {
        debug!("Updating disclosure state for conversation: {}", id);

        let mut tables = self.tables.lock();
        let mut record = tables
            .conversations
            .get(&id)
            .cloned()
            .ok_or_else(|| TrustError::not_found(format!("conversation {}", id)))?;

        let transition = update(&record)?;
        if let Some(message) = record.apply(transition) {
            tables.messages.push(message);
            tables.conversations.insert(id, record.clone());
        }

        Ok(record)
    }

    async fn revealed_counterparts(&self, viewer: UserId) -> Result<Vec<UserId>> {
        let tables = self.tables.lock();
        Ok(tables
            .conversations
            .values()
            .filter(|record| record.disclosure.is_mutually_revealed())
            .filter_map(|record| record.counterpart_of(viewer))
            .collect())
    }

    async fn system_messages(&self, id: ConversationId) -> Result<Vec<SystemMessage>> {
        let tables = self.tables.lock();
        Ok(tables
            .messages
            .iter()
            .filter(|message| message.conversation_id == id)
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
