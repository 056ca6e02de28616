//! Identity disclosure engine
//!
//! Runs the reveal state machine against a [`ConversationStore`] and builds
//! the per-viewer presentation context.

use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

use super::peers::{PresentationContext, RevealedPeerSet};
use super::presentation;
use super::reveal::{ConversationDisclosureView, RevealTransition};
use super::types::{
    ConversationId, DisclosurePresentation, UserId, UserIdentity, VisibilityLevel,
};
use crate::storage::{ConversationRecord, ConversationStore, NewParticipant, SystemMessage};
use crate::utils::error::{Result, TrustError};

/// Identity disclosure engine
#[derive(Debug, Clone)]
pub struct IdentityDisclosureEngine {
    store: Arc<dyn ConversationStore>,
}

impl IdentityDisclosureEngine {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    /// See [`presentation::present`]
    pub fn present(
        identity: &UserIdentity,
        viewer_is_owner: bool,
        force_reveal: bool,
    ) -> DisclosurePresentation {
        presentation::present(identity, viewer_is_owner, force_reveal)
    }

    /// Open a two-party conversation in `NoRequest`
    pub async fn open_conversation(
        &self,
        initiator: &UserIdentity,
        counterpart: &UserIdentity,
    ) -> Result<ConversationRecord> {
        if initiator.id == counterpart.id {
            return Err(TrustError::validation(
                "a conversation needs two distinct participants",
            ));
        }

        let seed = |identity: &UserIdentity| NewParticipant {
            user_id: identity.id,
            is_anonymous: identity.visibility_level != VisibilityLevel::RealName,
        };

        let record = self
            .store
            .create_conversation([seed(initiator), seed(counterpart)])
            .await?;
        info!("Opened conversation {}", record.id);
        Ok(record)
    }

    /// Ask to reveal identities in a conversation. Repeating the request, or
    /// requesting while the other side's request is pending, changes nothing.
    pub async fn request_reveal(
        &self,
        conversation_id: ConversationId,
        requester: UserId,
    ) -> Result<ConversationDisclosureView> {
        let now = Utc::now();
        let changed = Arc::new(AtomicBool::new(false));
        let record = self
            .store
            .update_disclosure(conversation_id, {
                let changed = Arc::clone(&changed);
                Box::new(move |record: &ConversationRecord| -> Result<RevealTransition> {
                    ensure_participant(record, requester)?;
                    let transition = record.disclosure.request(requester, now);
                    changed.store(
                        matches!(transition, RevealTransition::Changed { .. }),
                        Ordering::Relaxed,
                    );
                    Ok(transition)
                })
            })
            .await?;

        if changed.load(Ordering::Relaxed) {
            info!(
                "Identity reveal requested in conversation {} by {}",
                conversation_id, requester
            );
        } else {
            debug!(
                "Reveal request in conversation {} by {} left state unchanged",
                conversation_id, requester
            );
        }
        Ok(record.disclosure.view(conversation_id, requester))
    }

    /// Accept or decline the other participant's pending request
    pub async fn respond_reveal(
        &self,
        conversation_id: ConversationId,
        responder: UserId,
        accept: bool,
    ) -> Result<ConversationDisclosureView> {
        let now = Utc::now();
        let record = self
            .store
            .update_disclosure(
                conversation_id,
                Box::new(move |record: &ConversationRecord| -> Result<RevealTransition> {
                    ensure_participant(record, responder)?;
                    record.disclosure.respond(responder, accept, now)
                }),
            )
            .await?;

        info!(
            "Identity reveal {} in conversation {} by {}",
            if accept { "accepted" } else { "declined" },
            conversation_id,
            responder
        );
        Ok(record.disclosure.view(conversation_id, responder))
    }

    /// Current disclosure state as seen by `viewer`
    pub async fn disclosure_view(
        &self,
        conversation_id: ConversationId,
        viewer: UserId,
    ) -> Result<ConversationDisclosureView> {
        let record = self.participant_record(conversation_id, viewer).await?;
        Ok(record.disclosure.view(conversation_id, viewer))
    }

    /// Counterparts across every mutually revealed conversation of `viewer`
    pub async fn revealed_peer_set(&self, viewer: UserId) -> Result<RevealedPeerSet> {
        let peers: RevealedPeerSet = self
            .store
            .revealed_counterparts(viewer)
            .await?
            .into_iter()
            .collect();
        debug!("Viewer {} has {} revealed peers", viewer, peers.len());
        Ok(peers)
    }

    /// Presentation context for one render request by `viewer`
    pub async fn presentation_context(&self, viewer: UserId) -> Result<PresentationContext> {
        let revealed_peers = self.revealed_peer_set(viewer).await?;
        Ok(PresentationContext::new(viewer, revealed_peers))
    }

    /// Transcript of disclosure events, visible to participants only
    pub async fn system_messages(
        &self,
        conversation_id: ConversationId,
        viewer: UserId,
    ) -> Result<Vec<SystemMessage>> {
        self.participant_record(conversation_id, viewer).await?;
        self.store.system_messages(conversation_id).await
    }

    async fn participant_record(
        &self,
        conversation_id: ConversationId,
        user_id: UserId,
    ) -> Result<ConversationRecord> {
        let record = self
            .store
            .find_conversation(conversation_id)
            .await?
            .ok_or_else(|| TrustError::not_found(format!("conversation {}", conversation_id)))?;
        ensure_participant(&record, user_id)?;
        Ok(record)
    }
}

fn ensure_participant(record: &ConversationRecord, user_id: UserId) -> Result<()> {
    if record.has_participant(user_id) {
        Ok(())
    } else {
        Err(TrustError::not_participant(record.id, user_id))
    }
}
