//! End-to-end flows through the query layer against the scriptable stub:
//! fetch coalescing, superseded-response discard, mutation-driven
//! invalidation, and placeholder bridging during page navigation.

use std::sync::Arc;
use std::time::Duration;

use notehub_api::stub::{StubFailure, StubNoteService};
use notehub_core::{NoteDraft, NoteService, NoteTag};
use notehub_query::{Mutations, QueryClient, QueryEvent, QueryKey, QueryStatus};

fn harness(service: &StubNoteService) -> (QueryClient, Mutations) {
    notehub_core::logging::init();
    let service: Arc<dyn NoteService> = Arc::new(service.clone());
    let queries = QueryClient::new(service.clone());
    let mutations = Mutations::new(service, queries.clone());
    (queries, mutations)
}

async fn next_update(rx: &mut tokio::sync::broadcast::Receiver<QueryEvent>) -> QueryKey {
    loop {
        if let QueryEvent::Updated { key } = rx.recv().await.unwrap() {
            return key;
        }
    }
}

#[tokio::test]
async fn concurrent_fetches_share_one_service_call() {
    let service = StubNoteService::new().with_seed_notes(5).with_latency_ms(20);
    let (queries, _) = harness(&service);
    let key = QueryKey::new(1, 12, "");

    let (a, b, c) = futures::join!(queries.fetch(&key), queries.fetch(&key), queries.fetch(&key));

    assert_eq!(a.status, QueryStatus::Success);
    assert_eq!(a.data, b.data);
    assert_eq!(b.data, c.data);
    assert_eq!(service.list_call_count(), 1);
}

#[tokio::test]
async fn invalidation_mid_flight_discards_the_first_response() {
    let service = StubNoteService::new().with_seed_notes(3).with_latency_ms(50);
    let (queries, _) = harness(&service);
    let key = QueryKey::new(1, 12, "");
    let mut rx = queries.subscribe();

    let _guard = queries.observe(&key);
    queries.spawn_fetch(&key);
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(service.list_call_count(), 1);

    // The entry is observed, so invalidation keeps it but bumps the epoch;
    // the in-flight response must not land.
    queries.invalidate_all();

    let updated = next_update(&mut rx).await;
    assert_eq!(updated, key);
    assert_eq!(service.list_call_count(), 2);

    let snap = queries.snapshot(&key);
    assert_eq!(snap.status, QueryStatus::Success);
    assert!(!snap.is_stale);

    // Exactly one response applied; the superseded one produced no event.
    assert!(matches!(
        rx.try_recv(),
        Err(tokio::sync::broadcast::error::TryRecvError::Empty)
    ));
}

#[tokio::test]
async fn create_refetches_every_observed_page() {
    let service = StubNoteService::new().with_seed_notes(15);
    let (queries, mutations) = harness(&service);
    let page1 = QueryKey::new(1, 12, "");
    let page2 = QueryKey::new(2, 12, "");

    let _g1 = queries.observe(&page1);
    let _g2 = queries.observe(&page2);
    queries.fetch(&page1).await;
    queries.fetch(&page2).await;
    assert_eq!(service.list_call_count(), 2);

    let mut rx = queries.subscribe();
    mutations
        .create(NoteDraft::new("Fresh note", "body", NoteTag::Meeting))
        .await
        .unwrap();

    let mut refreshed = std::collections::HashSet::new();
    while refreshed.len() < 2 {
        refreshed.insert(next_update(&mut rx).await);
    }
    assert!(refreshed.contains(&page1));
    assert!(refreshed.contains(&page2));
    assert_eq!(service.list_call_count(), 4);

    // Newest first, so the created note heads page one.
    let snap = queries.snapshot(&page1);
    let data = snap.data.unwrap();
    assert_eq!(data.notes[0].id, "note-16");
    assert_eq!(queries.entry_count(), 2);
}

#[tokio::test]
async fn delete_refetches_and_drops_the_note() {
    let service = StubNoteService::new().with_seed_notes(3);
    let (queries, mutations) = harness(&service);
    let key = QueryKey::new(1, 12, "");

    let _guard = queries.observe(&key);
    let before = queries.fetch(&key).await;
    assert!(before.data.unwrap().contains("note-2"));

    let mut rx = queries.subscribe();
    mutations.delete("note-2").await.unwrap();
    next_update(&mut rx).await;

    let after = queries.snapshot(&key);
    let data = after.data.unwrap();
    assert!(!data.contains("note-2"));
    assert_eq!(data.notes.len(), 2);
    assert_eq!(service.delete_call_count(), 1);
    assert_eq!(service.stored_notes().len(), 2);
}

#[tokio::test]
async fn page_navigation_shows_placeholder_until_the_new_page_lands() {
    let service = StubNoteService::new().with_seed_notes(30).with_latency_ms(50);
    let (queries, _) = harness(&service);
    let page1 = QueryKey::new(1, 12, "");
    let page2 = QueryKey::new(2, 12, "");
    let mut rx = queries.subscribe();

    let first = queries.fetch(&page1).await;
    assert_eq!(first.status, QueryStatus::Success);

    queries.spawn_fetch(&page2);
    let bridging = queries.snapshot(&page2);
    assert!(bridging.is_placeholder);
    assert!(!bridging.is_loading());
    assert_eq!(bridging.data, first.data);

    loop {
        if next_update(&mut rx).await == page2 {
            break;
        }
    }
    let landed = queries.snapshot(&page2);
    assert!(!landed.is_placeholder);
    assert_eq!(landed.status, QueryStatus::Success);
    assert_eq!(landed.data.unwrap().notes[0].id, "note-18");
}

#[tokio::test]
async fn search_failure_is_scoped_to_its_own_key() {
    let service = StubNoteService::new().with_seed_notes(5);
    let (queries, _) = harness(&service);
    let all = QueryKey::new(1, 12, "");
    let filtered = QueryKey::new(1, 12, "note 3");

    queries.fetch(&all).await;

    service.push_failure(StubFailure::Network("reset".into()));
    let mut rx = queries.subscribe();
    let failed = queries.fetch(&filtered).await;
    assert_eq!(failed.status, QueryStatus::Error);
    assert!(failed.error.unwrap().to_string().contains("reset"));
    assert!(matches!(
        rx.recv().await.unwrap(),
        QueryEvent::Failed { key } if key == filtered
    ));

    // The unfiltered page keeps its cached success.
    let untouched = queries.snapshot(&all);
    assert_eq!(untouched.status, QueryStatus::Success);

    // A retry of the failing key goes back to the service and recovers.
    let recovered = queries.fetch(&filtered).await;
    assert_eq!(recovered.status, QueryStatus::Success);
    assert_eq!(recovered.data.unwrap().notes.len(), 1);
    assert_eq!(service.list_call_count(), 3);
}
