use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, conversation, conversation_participant, message};
use super::types::SeaOrmDatabase;
use crate::core::disclosure::{ConversationDisclosureState, ConversationId, UserId};
use crate::storage::{
    ConversationRecord, ConversationStore, DisclosureUpdate, NewParticipant, Participant,
    SystemMessage,
};
use crate::utils::error::{Result, TrustError};

impl SeaOrmDatabase {
    async fn load_record<C: ConnectionTrait>(
        conn: &C,
        model: conversation::Model,
    ) -> Result<ConversationRecord> {
        let rows = entities::ConversationParticipant::find()
            .filter(conversation_participant::Column::ConversationId.eq(model.id))
            .order_by_asc(conversation_participant::Column::Position)
            .all(conn)
            .await
            .map_err(TrustError::Database)?;

        let participants: [Participant; 2] = rows
            .iter()
            .map(conversation_participant::Model::to_participant)
            .collect::<Vec<_>>()
            .try_into()
            .map_err(|found: Vec<Participant>| {
                TrustError::storage(format!(
                    "conversation {} has {} participants, expected 2",
                    model.id,
                    found.len()
                ))
            })?;

        let disclosure = ConversationDisclosureState::from_persisted(
            model.is_mutually_revealed,
            model.identity_reveal_requested_by,
            model
                .identity_reveal_requested_at
                .map(|at| at.naive_utc().and_utc()),
        )?;

        Ok(ConversationRecord {
            id: model.id,
            participants,
            disclosure,
            created_at: model.created_at.naive_utc().and_utc(),
            updated_at: model.updated_at.naive_utc().and_utc(),
        })
    }

    /// Write the disclosure columns, participant flags and message of an
    /// applied transition
    async fn persist_transition<C: ConnectionTrait>(
        conn: &C,
        record: &ConversationRecord,
        message: &SystemMessage,
    ) -> Result<()> {
        let (revealed, requested_by, requested_at) = record.disclosure.to_persisted();
        let row = conversation::ActiveModel {
            id: ActiveValue::Unchanged(record.id),
            is_mutually_revealed: Set(revealed),
            identity_reveal_requested_by: Set(requested_by),
            identity_reveal_requested_at: Set(requested_at.map(Into::into)),
            updated_at: Set(record.updated_at.into()),
            ..Default::default()
        };
        row.update(conn).await.map_err(TrustError::Database)?;

        if revealed {
            entities::ConversationParticipant::update_many()
                .col_expr(
                    conversation_participant::Column::IsAnonymous,
                    Expr::value(false),
                )
                .filter(conversation_participant::Column::ConversationId.eq(record.id))
                .exec(conn)
                .await
                .map_err(TrustError::Database)?;
        }

        entities::Message::insert(message::Model::from_system_message(message))
            .exec(conn)
            .await
            .map_err(TrustError::Database)?;

        Ok(())
    }
}

#[async_trait]
impl ConversationStore for SeaOrmDatabase {
    async fn create_conversation(
        &self,
        participants: [NewParticipant; 2],
    ) -> Result<ConversationRecord> {
        let record = ConversationRecord::open(participants, Utc::now());
        debug!("Creating conversation: {}", record.id);

        let txn = self.db.begin().await.map_err(TrustError::Database)?;

        let row = conversation::ActiveModel {
            id: Set(record.id),
            is_mutually_revealed: Set(false),
            identity_reveal_requested_by: Set(None),
            identity_reveal_requested_at: Set(None),
            created_at: Set(record.created_at.into()),
            updated_at: Set(record.updated_at.into()),
        };
        entities::Conversation::insert(row)
            .exec(&txn)
            .await
            .map_err(TrustError::Database)?;

        let rows = record
            .participants
            .iter()
            .zip(0i16..)
            .map(|(participant, position)| conversation_participant::ActiveModel {
                conversation_id: Set(record.id),
                user_id: Set(participant.user_id),
                position: Set(position),
                is_anonymous: Set(participant.is_anonymous),
            });
        entities::ConversationParticipant::insert_many(rows)
            .exec(&txn)
            .await
            .map_err(TrustError::Database)?;

        txn.commit().await.map_err(TrustError::Database)?;
        Ok(record)
    }

    async fn find_conversation(&self, id: ConversationId) -> Result<Option<ConversationRecord>> {
        debug!("Finding conversation by ID: {}", id);

        let model = entities::Conversation::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(TrustError::Database)?;

        match model {
            Some(model) => Ok(Some(Self::load_record(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    async fn update_disclosure(
        &self,
        id: ConversationId,
        update: DisclosureUpdate,
    ) -> Result<ConversationRecord> {
        debug!("Updating disclosure state for conversation: {}", id);

        let _gate = if self.backend_type.supports_row_locks() {
            None
        } else {
            Some(self.write_gate.lock().await)
        };

        // Dropping the transaction on any early return rolls it back
        let txn = self.db.begin().await.map_err(TrustError::Database)?;

        let mut select = entities::Conversation::find_by_id(id);
        if self.backend_type.supports_row_locks() {
            select = select.lock_exclusive();
        } else {
            // Take the SQLite write lock before reading so no other writer
            // can commit between the read and the write
            entities::Conversation::update_many()
                .col_expr(
                    conversation::Column::UpdatedAt,
                    Expr::col(conversation::Column::UpdatedAt).into(),
                )
                .filter(conversation::Column::Id.eq(id))
                .exec(&txn)
                .await
                .map_err(TrustError::Database)?;
        }
        let model = select
            .one(&txn)
            .await
            .map_err(TrustError::Database)?
            .ok_or_else(|| TrustError::not_found(format!("conversation {}", id)))?;

        let mut record = Self::load_record(&txn, model).await?;
        let transition = update(&record)?;

        if let Some(message) = record.apply(transition) {
            Self::persist_transition(&txn, &record, &message).await?;
        }

        txn.commit().await.map_err(TrustError::Database)?;
        Ok(record)
    }

    async fn revealed_counterparts(&self, viewer: UserId) -> Result<Vec<UserId>> {
        debug!("Finding revealed counterparts of: {}", viewer);

        let joined: Vec<ConversationId> = entities::ConversationParticipant::find()
            .filter(conversation_participant::Column::UserId.eq(viewer))
            .all(&self.db)
            .await
            .map_err(TrustError::Database)?
            .into_iter()
            .map(|row| row.conversation_id)
            .collect();
        if joined.is_empty() {
            return Ok(Vec::new());
        }

        let revealed: Vec<ConversationId> = entities::Conversation::find()
            .filter(conversation::Column::Id.is_in(joined))
            .filter(conversation::Column::IsMutuallyRevealed.eq(true))
            .all(&self.db)
            .await
            .map_err(TrustError::Database)?
            .into_iter()
            .map(|row| row.id)
            .collect();
        if revealed.is_empty() {
            return Ok(Vec::new());
        }

        let counterparts = entities::ConversationParticipant::find()
            .filter(conversation_participant::Column::ConversationId.is_in(revealed))
            .filter(conversation_participant::Column::UserId.ne(viewer))
            .all(&self.db)
            .await
            .map_err(TrustError::Database)?
            .into_iter()
            .map(|row| row.user_id)
            .collect();

        Ok(counterparts)
    }

    async fn system_messages(&self, id: ConversationId) -> Result<Vec<SystemMessage>> {
        debug!("Listing system messages of conversation: {}", id);

        entities::Message::find()
            .filter(message::Column::ConversationId.eq(id))
            .order_by_asc(message::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(TrustError::Database)?
            .iter()
            .map(message::Model::to_system_message)
            .collect()
    }

    async fn health_check(&self) -> Result<()> {
        self.ping().await
    }
}
