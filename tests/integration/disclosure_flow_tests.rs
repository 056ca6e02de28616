//! Identity reveal workflow integration tests
//!
//! Runs the disclosure engine end to end over the in-memory store and the
//! SeaORM store, including concurrent transitions on one conversation.

#[cfg(test)]
mod tests {
    use crate::common::{IdentityFactory, TestDatabase};
    use std::sync::Arc;
    use trustgate::core::disclosure::{
        IdentityDisclosureEngine, PresentationContext, SystemEventKind, UserIdentity,
        sender_label,
    };
    use trustgate::storage::{ConversationStore, InMemoryConversationStore};
    use trustgate::utils::error::TrustError;

    fn memory_engine() -> IdentityDisclosureEngine {
        IdentityDisclosureEngine::new(Arc::new(InMemoryConversationStore::new()))
    }

    async fn database_engine() -> (TestDatabase, IdentityDisclosureEngine) {
        let db = TestDatabase::new().await;
        let store: Arc<dyn ConversationStore> = db.db_arc();
        (db, IdentityDisclosureEngine::new(store))
    }

    /// The full reveal scenario, shared by both stores
    async fn run_reveal_scenario(engine: &IdentityDisclosureEngine) {
        let a = IdentityFactory::anonymous("night-owl");
        let b = IdentityFactory::anonymous("early-bird");
        let c = IdentityFactory::anonymous("bystander");

        let record = engine.open_conversation(&a, &b).await.unwrap();
        assert!(record.participants.iter().all(|p| p.is_anonymous));

        let requested = engine.request_reveal(record.id, a.id).await.unwrap();
        let pending = requested.pending.expect("request should be pending");
        assert_eq!(pending.requested_by, a.id);
        assert!(!pending.is_incoming);

        let seen_by_b = engine.disclosure_view(record.id, b.id).await.unwrap();
        assert!(seen_by_b.pending.unwrap().is_incoming);

        let accepted = engine.respond_reveal(record.id, b.id, true).await.unwrap();
        assert!(accepted.is_mutually_revealed);
        assert!(accepted.pending.is_none());

        // B now sees A's details everywhere; C still sees the alias only
        let for_b = engine.presentation_context(b.id).await.unwrap();
        let author = for_b.present_author(&a);
        assert_eq!(author.display_name, "night-owl");
        assert_eq!(author.real_name.as_deref(), Some("Real night-owl"));
        assert_eq!(author.school.as_deref(), Some("State University"));
        assert!(!author.is_anonymous);

        let for_c = engine.presentation_context(c.id).await.unwrap();
        let author = for_c.present_author(&a);
        assert_eq!(author.real_name, None);
        assert!(author.is_anonymous);

        let messages = engine.system_messages(record.id, a.id).await.unwrap();
        let kinds: Vec<_> = messages.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![SystemEventKind::IdentityRequest, SystemEventKind::IdentityAccepted]
        );
        assert_eq!(messages[0].sender_id, a.id);
        assert_eq!(messages[1].sender_id, b.id);
    }

    // ==================== Scenario ====================

    #[tokio::test]
    async fn test_reveal_scenario_in_memory() {
        run_reveal_scenario(&memory_engine()).await;
    }

    #[tokio::test]
    async fn test_reveal_scenario_database() {
        let (_db, engine) = database_engine().await;
        run_reveal_scenario(&engine).await;
    }

    #[test]
    fn test_reveal_scenario_blocking() {
        tokio_test::block_on(run_reveal_scenario(&memory_engine()));
    }

    // ==================== Peer Sets ====================

    #[tokio::test]
    async fn test_peer_set_spans_conversations() {
        let engine = memory_engine();
        let viewer = IdentityFactory::anonymous("hub");
        let revealed = IdentityFactory::anonymous("revealed");
        let pending = IdentityFactory::anonymous("pending");
        let declined = IdentityFactory::anonymous("declined");

        let first = engine.open_conversation(&viewer, &revealed).await.unwrap().id;
        engine.request_reveal(first, revealed.id).await.unwrap();
        engine.respond_reveal(first, viewer.id, true).await.unwrap();

        let second = engine.open_conversation(&viewer, &pending).await.unwrap().id;
        engine.request_reveal(second, viewer.id).await.unwrap();

        let third = engine.open_conversation(&declined, &viewer).await.unwrap().id;
        engine.request_reveal(third, declined.id).await.unwrap();
        engine.respond_reveal(third, viewer.id, false).await.unwrap();

        let peers = engine.revealed_peer_set(viewer.id).await.unwrap();
        assert_eq!(peers.len(), 1);
        assert!(peers.contains(&revealed.id));
        assert!(!peers.contains(&pending.id));
        assert!(!peers.contains(&declined.id));

        // a second revealed conversation with the same peer changes nothing
        let again = engine.open_conversation(&revealed, &viewer).await.unwrap().id;
        engine.request_reveal(again, viewer.id).await.unwrap();
        engine.respond_reveal(again, revealed.id, true).await.unwrap();
        assert_eq!(engine.revealed_peer_set(viewer.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_peer_set_database() {
        let (_db, engine) = database_engine().await;
        let a = IdentityFactory::anonymous("alpha");
        let b = IdentityFactory::public("beta");
        let c = IdentityFactory::anonymous("gamma");

        let ab = engine.open_conversation(&a, &b).await.unwrap().id;
        let ac = engine.open_conversation(&a, &c).await.unwrap().id;
        engine.request_reveal(ab, b.id).await.unwrap();
        engine.respond_reveal(ab, a.id, true).await.unwrap();
        engine.request_reveal(ac, c.id).await.unwrap();

        let peers_a = engine.revealed_peer_set(a.id).await.unwrap();
        assert_eq!(peers_a.len(), 1);
        assert!(peers_a.contains(&b.id));
        assert!(engine.revealed_peer_set(b.id).await.unwrap().contains(&a.id));
        assert!(engine.revealed_peer_set(c.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_signed_out_viewer_sees_public_levels_only() {
        let engine = memory_engine();
        let a = IdentityFactory::anonymous("author");
        let b = IdentityFactory::public("reader");
        let id = engine.open_conversation(&a, &b).await.unwrap().id;
        engine.request_reveal(id, a.id).await.unwrap();
        engine.respond_reveal(id, b.id, true).await.unwrap();

        let signed_out = PresentationContext::anonymous_viewer();
        let authors: Vec<UserIdentity> = vec![a.clone(), b.clone()];
        let rendered = signed_out.present_all(&authors);
        assert!(rendered[0].is_anonymous);
        assert_eq!(rendered[0].real_name, None);
        assert!(!rendered[1].is_anonymous);
        assert_eq!(rendered[1].real_name.as_deref(), Some("Real reader"));
    }

    // ==================== Transcript ====================

    #[tokio::test]
    async fn test_sender_labels_follow_conversation_state() {
        let engine = memory_engine();
        let a = IdentityFactory::anonymous("quiet-fox");
        let b = IdentityFactory::anonymous("loud-crow");
        let id = engine.open_conversation(&a, &b).await.unwrap().id;

        let view = engine.disclosure_view(id, a.id).await.unwrap();
        assert_eq!(sender_label(&a, view.is_mutually_revealed), "quiet-fox");

        engine.request_reveal(id, b.id).await.unwrap();
        let view = engine.respond_reveal(id, a.id, true).await.unwrap();
        assert_eq!(sender_label(&a, view.is_mutually_revealed), "Real quiet-fox");
    }

    #[tokio::test]
    async fn test_requester_cannot_accept_own_request() {
        let engine = memory_engine();
        let a = IdentityFactory::anonymous("a");
        let b = IdentityFactory::anonymous("b");
        let id = engine.open_conversation(&a, &b).await.unwrap().id;
        engine.request_reveal(id, a.id).await.unwrap();

        let result = engine.respond_reveal(id, a.id, true).await;
        assert!(matches!(result, Err(TrustError::InvalidState(_))));

        let messages = engine.system_messages(id, b.id).await.unwrap();
        assert_eq!(messages.len(), 1);
    }

    #[tokio::test]
    async fn test_respond_without_request() {
        let (_db, engine) = database_engine().await;
        let a = IdentityFactory::anonymous("a");
        let b = IdentityFactory::anonymous("b");
        let id = engine.open_conversation(&a, &b).await.unwrap().id;

        let result = engine.respond_reveal(id, b.id, true).await;
        assert!(matches!(result, Err(TrustError::InvalidState(_))));
        assert!(engine.system_messages(id, a.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_decline_then_request_again() {
        let (_db, engine) = database_engine().await;
        let a = IdentityFactory::anonymous("a");
        let b = IdentityFactory::anonymous("b");
        let id = engine.open_conversation(&a, &b).await.unwrap().id;

        engine.request_reveal(id, a.id).await.unwrap();
        let declined = engine.respond_reveal(id, b.id, false).await.unwrap();
        assert!(declined.pending.is_none());

        // after a decline either side may ask again
        let view = engine.request_reveal(id, b.id).await.unwrap();
        assert_eq!(view.pending.unwrap().requested_by, b.id);
        let view = engine.respond_reveal(id, a.id, true).await.unwrap();
        assert!(view.is_mutually_revealed);

        let kinds: Vec<_> = engine
            .system_messages(id, a.id)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                SystemEventKind::IdentityRequest,
                SystemEventKind::IdentityDeclined,
                SystemEventKind::IdentityRequest,
                SystemEventKind::IdentityAccepted,
            ]
        );
    }

    // ==================== Concurrency ====================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_requests_emit_one_message() {
        let engine = Arc::new(memory_engine());
        let a = IdentityFactory::anonymous("a");
        let b = IdentityFactory::anonymous("b");
        let id = engine.open_conversation(&a, &b).await.unwrap().id;

        let mut handles = Vec::new();
        for i in 0..16 {
            let engine = Arc::clone(&engine);
            let requester = if i % 2 == 0 { a.id } else { b.id };
            handles.push(tokio::spawn(async move {
                engine.request_reveal(id, requester).await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        let messages = engine.system_messages(id, a.id).await.unwrap();
        assert_eq!(messages.len(), 1);
        let view = engine.disclosure_view(id, a.id).await.unwrap();
        assert_eq!(view.pending.unwrap().requested_by, messages[0].sender_id);
    }

    /// Races an accept against a decline of the same pending request
    async fn race_accept_and_decline(engine: Arc<IdentityDisclosureEngine>) {
        let a = IdentityFactory::anonymous("a");
        let b = IdentityFactory::anonymous("b");
        let id = engine.open_conversation(&a, &b).await.unwrap().id;
        engine.request_reveal(id, a.id).await.unwrap();

        let accept = {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move { engine.respond_reveal(id, b.id, true).await })
        };
        let decline = {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move { engine.respond_reveal(id, b.id, false).await })
        };

        let results = [accept.await.unwrap(), decline.await.unwrap()];
        let succeeded = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(succeeded, 1);
        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            assert!(
                matches!(err, TrustError::InvalidState(_)),
                "loser got {:?}",
                err
            );
        }

        // exactly one response message follows the request
        let messages = engine.system_messages(id, a.id).await.unwrap();
        assert_eq!(messages.len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_accept_and_decline_one_wins() {
        race_accept_and_decline(Arc::new(memory_engine())).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_responses_on_pooled_database() {
        let db = TestDatabase::file_backed(4).await;
        let store: Arc<dyn ConversationStore> = db.db_arc();
        let engine = Arc::new(IdentityDisclosureEngine::new(store));

        for _ in 0..10 {
            race_accept_and_decline(Arc::clone(&engine)).await;
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_requests_on_pooled_database() {
        let db = TestDatabase::file_backed(4).await;
        let store: Arc<dyn ConversationStore> = db.db_arc();
        let engine = Arc::new(IdentityDisclosureEngine::new(store));
        let a = IdentityFactory::anonymous("a");
        let b = IdentityFactory::anonymous("b");
        let id = engine.open_conversation(&a, &b).await.unwrap().id;

        let mut handles = Vec::new();
        for i in 0..8 {
            let engine = Arc::clone(&engine);
            let requester = if i % 2 == 0 { a.id } else { b.id };
            handles.push(tokio::spawn(async move {
                engine.request_reveal(id, requester).await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        assert_eq!(engine.system_messages(id, a.id).await.unwrap().len(), 1);
    }
}
