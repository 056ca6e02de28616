//! Conversation records shared by every store implementation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::disclosure::{
    ConversationDisclosureState, ConversationId, RevealTransition, SystemEventKind, UserId,
};

/// Participant seed used when opening a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewParticipant {
    pub user_id: UserId,
    /// Initial per-conversation anonymity flag
    pub is_anonymous: bool,
}

/// One side of a two-party conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: UserId,
    pub is_anonymous: bool,
}

/// The disclosure-relevant part of a conversation row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: ConversationId,
    pub participants: [Participant; 2],
    pub disclosure: ConversationDisclosureState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConversationRecord {
    /// Fresh conversation in `NoRequest`
    pub fn open(participants: [NewParticipant; 2], now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            participants: participants.map(|p| Participant {
                user_id: p.user_id,
                is_anonymous: p.is_anonymous,
            }),
            disclosure: ConversationDisclosureState::NoRequest,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_participant(&self, user_id: UserId) -> bool {
        self.participants.iter().any(|p| p.user_id == user_id)
    }

    /// The other participant, if `user_id` is one of the two
    pub fn counterpart_of(&self, user_id: UserId) -> Option<UserId> {
        match self.participants {
            [a, b] if a.user_id == user_id => Some(b.user_id),
            [a, b] if b.user_id == user_id => Some(a.user_id),
            _ => None,
        }
    }

    /// Apply a transition in place, returning the system message to append
    pub fn apply(&mut self, transition: RevealTransition) -> Option<SystemMessage> {
        match transition {
            RevealTransition::Unchanged => None,
            RevealTransition::Changed {
                next,
                event,
                actor,
                at,
            } => {
                self.disclosure = next;
                if next.is_mutually_revealed() {
                    for participant in &mut self.participants {
                        participant.is_anonymous = false;
                    }
                }
                self.updated_at = at;
                Some(SystemMessage::new(self.id, actor, event, at))
            }
        }
    }
}

/// Message appended to a conversation by a disclosure transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemMessage {
    pub id: Uuid,
    pub conversation_id: ConversationId,
    pub sender_id: UserId,
    pub kind: SystemEventKind,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl SystemMessage {
    pub fn new(
        conversation_id: ConversationId,
        sender_id: UserId,
        kind: SystemEventKind,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            conversation_id,
            sender_id,
            kind,
            content: kind.content().to_string(),
            created_at,
        }
    }
}
