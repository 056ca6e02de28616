use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::disclosure::SystemEventKind;
use crate::storage::SystemMessage;
use crate::utils::error::TrustError;

/// Conversation message. Only system messages are written here.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub conversation_id: Uuid,

    pub sender_id: Uuid,

    /// `identity-request`, `identity-accepted` or `identity-declined`
    pub message_type: String,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::conversation::Entity",
        from = "Column::ConversationId",
        to = "super::conversation::Column::Id"
    )]
    Conversation,
}

impl Related<super::conversation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Conversation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn to_system_message(&self) -> crate::utils::error::Result<SystemMessage> {
        let kind = SystemEventKind::parse(&self.message_type).ok_or_else(|| {
            TrustError::storage(format!(
                "message {} has unknown type '{}'",
                self.id, self.message_type
            ))
        })?;

        Ok(SystemMessage {
            id: self.id,
            conversation_id: self.conversation_id,
            sender_id: self.sender_id,
            kind,
            content: self.content.clone(),
            created_at: self.created_at.naive_utc().and_utc(),
        })
    }

    pub fn from_system_message(message: &SystemMessage) -> ActiveModel {
        ActiveModel {
            id: Set(message.id),
            conversation_id: Set(message.conversation_id),
            sender_id: Set(message.sender_id),
            message_type: Set(message.kind.as_str().to_string()),
            content: Set(message.content.clone()),
            created_at: Set(message.created_at.into()),
        }
    }
}
