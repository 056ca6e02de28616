use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Conversation database model; only the disclosure columns live here
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "conversations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub is_mutually_revealed: bool,

    /// Participant whose reveal request is pending
    pub identity_reveal_requested_by: Option<Uuid>,

    pub identity_reveal_requested_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::conversation_participant::Entity")]
    Participants,
    #[sea_orm(has_many = "super::message::Entity")]
    Messages,
}

impl Related<super::conversation_participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participants.def()
    }
}

impl Related<super::message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
