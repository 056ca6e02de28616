//! Conversation identity-reveal state machine
//!
//! `NoRequest -> Pending -> MutuallyRevealed` with decline returning to
//! `NoRequest`. `MutuallyRevealed` is terminal. Transitions here are pure;
//! the engine applies them inside the store's per-conversation atomic unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::types::{ConversationId, UserId};
use crate::utils::error::{Result, TrustError};

/// Disclosure state of one two-party conversation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConversationDisclosureState {
    #[default]
    NoRequest,
    Pending {
        requested_by: UserId,
        requested_at: DateTime<Utc>,
    },
    MutuallyRevealed,
}

/// System message kinds appended on every transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SystemEventKind {
    IdentityRequest,
    IdentityAccepted,
    IdentityDeclined,
}

impl SystemEventKind {
    /// Tag stored with the message
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IdentityRequest => "identity-request",
            Self::IdentityAccepted => "identity-accepted",
            Self::IdentityDeclined => "identity-declined",
        }
    }

    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "identity-request" => Some(Self::IdentityRequest),
            "identity-accepted" => Some(Self::IdentityAccepted),
            "identity-declined" => Some(Self::IdentityDeclined),
            _ => None,
        }
    }

    /// Default message body shown in the transcript
    pub fn content(&self) -> &'static str {
        match self {
            Self::IdentityRequest => "Requested to reveal identities",
            Self::IdentityAccepted => "Accepted the identity reveal request",
            Self::IdentityDeclined => "Declined the identity reveal request",
        }
    }
}

/// Outcome of applying an operation to a state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealTransition {
    /// Nothing to write
    Unchanged,
    /// Write `next` and append a system message from `actor`
    Changed {
        next: ConversationDisclosureState,
        event: SystemEventKind,
        actor: UserId,
        at: DateTime<Utc>,
    },
}

impl ConversationDisclosureState {
    /// Rebuild from the three persisted columns
    pub fn from_persisted(
        is_mutually_revealed: bool,
        requested_by: Option<UserId>,
        requested_at: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        match (is_mutually_revealed, requested_by, requested_at) {
            (true, pending, _) => {
                if pending.is_some() {
                    warn!("Revealed conversation still carries a pending request; ignoring it");
                }
                Ok(Self::MutuallyRevealed)
            }
            (false, Some(requested_by), Some(requested_at)) => Ok(Self::Pending {
                requested_by,
                requested_at,
            }),
            (false, None, _) => Ok(Self::NoRequest),
            (false, Some(requested_by), None) => Err(TrustError::storage(format!(
                "reveal request by {} has no timestamp",
                requested_by
            ))),
        }
    }

    /// The three persisted columns
    pub fn to_persisted(&self) -> (bool, Option<UserId>, Option<DateTime<Utc>>) {
        match *self {
            Self::NoRequest => (false, None, None),
            Self::Pending {
                requested_by,
                requested_at,
            } => (false, Some(requested_by), Some(requested_at)),
            Self::MutuallyRevealed => (true, None, None),
        }
    }

    pub fn is_mutually_revealed(&self) -> bool {
        matches!(self, Self::MutuallyRevealed)
    }

    /// A participant asks to reveal identities.
    ///
    /// An existing request is never overwritten, whoever made it, and the
    /// original timestamp is kept.
    pub fn request(&self, requester: UserId, now: DateTime<Utc>) -> RevealTransition {
        match self {
            Self::NoRequest => RevealTransition::Changed {
                next: Self::Pending {
                    requested_by: requester,
                    requested_at: now,
                },
                event: SystemEventKind::IdentityRequest,
                actor: requester,
                at: now,
            },
            Self::Pending { .. } | Self::MutuallyRevealed => RevealTransition::Unchanged,
        }
    }

    /// The other participant accepts or declines a pending request
    pub fn respond(
        &self,
        responder: UserId,
        accept: bool,
        now: DateTime<Utc>,
    ) -> Result<RevealTransition> {
        match self {
            Self::Pending { requested_by, .. } if *requested_by == responder => Err(
                TrustError::invalid_state("cannot respond to your own identity reveal request"),
            ),
            Self::Pending { .. } => {
                let (next, event) = if accept {
                    (Self::MutuallyRevealed, SystemEventKind::IdentityAccepted)
                } else {
                    (Self::NoRequest, SystemEventKind::IdentityDeclined)
                };
                Ok(RevealTransition::Changed {
                    next,
                    event,
                    actor: responder,
                    at: now,
                })
            }
            Self::NoRequest | Self::MutuallyRevealed => Err(TrustError::invalid_state(
                "no pending identity reveal request",
            )),
        }
    }

    /// Project the shared state for one participant
    pub fn view(
        &self,
        conversation_id: ConversationId,
        viewer: UserId,
    ) -> ConversationDisclosureView {
        let pending = match *self {
            Self::Pending {
                requested_by,
                requested_at,
            } => Some(PendingRevealView {
                requested_by,
                requested_at,
                is_incoming: requested_by != viewer,
            }),
            _ => None,
        };

        ConversationDisclosureView {
            conversation_id,
            is_mutually_revealed: self.is_mutually_revealed(),
            pending,
        }
    }
}

/// Viewer-relative rendering of a conversation's disclosure state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationDisclosureView {
    pub conversation_id: ConversationId,
    pub is_mutually_revealed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<PendingRevealView>,
}

/// Pending request as seen by one participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRevealView {
    pub requested_by: UserId,
    pub requested_at: DateTime<Utc>,
    /// True when the other participant asked
    pub is_incoming: bool,
}
