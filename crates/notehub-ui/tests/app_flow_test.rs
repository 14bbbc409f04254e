//! Full app flows against the scriptable stub: initial load, debounced
//! search, pagination with placeholder bridging, the create dialog, and
//! per-row deletes. Time is paused, so settle windows and stub latency
//! advance instantly and deterministically.

use std::sync::Arc;
use std::time::Duration;

use notehub_api::stub::{StubFailure, StubNoteService};
use notehub_core::NoteService;
use notehub_query::{Mutations, QueryClient};
use notehub_ui::app::{App, AppEvent, CREATE_NOTE_ID, LIST_ERROR_ID, LIST_STATUS_ID};
use notehub_ui::modal::{BACKDROP_ID, DIALOG_ID};
use notehub_ui::node::NodeKind;
use notehub_ui::note_form::{FORM_ERROR_ID, SUBMIT_ID, TITLE_INPUT_ID};
use notehub_ui::note_list::{delete_button_id, delete_error_id, NOTE_LIST_ID};
use notehub_ui::search_box::SEARCH_INPUT_ID;

fn build_app(service: &StubNoteService) -> App {
    notehub_core::logging::init();
    let service: Arc<dyn NoteService> = Arc::new(service.clone());
    let queries = QueryClient::new(service.clone());
    let mutations = Mutations::new(service, queries.clone());
    App::new(queries, mutations)
}

/// Run queued tasks and fold in their notifications.
async fn settle(app: &mut App) {
    for _ in 0..20 {
        tokio::task::yield_now().await;
        app.drain();
    }
}

#[tokio::test(start_paused = true)]
async fn initial_load_shows_loading_then_notes() {
    let service = StubNoteService::new().with_seed_notes(3);
    let mut app = build_app(&service);

    let first = app.render();
    assert_eq!(
        first.find(LIST_STATUS_ID).unwrap().text.as_deref(),
        Some("Loading…")
    );
    assert!(first.overlay_is_empty());
    assert!(first.find(CREATE_NOTE_ID).is_some());

    settle(&mut app).await;
    let loaded = app.render();
    assert!(loaded.find(LIST_STATUS_ID).is_none());
    assert_eq!(loaded.find_all(NodeKind::ListItem).len(), 3);
    assert!(loaded.contains_text("Note 3"));
}

#[tokio::test(start_paused = true)]
async fn empty_collection_shows_no_notes_yet() {
    let service = StubNoteService::new();
    let mut app = build_app(&service);
    settle(&mut app).await;

    let screen = app.render();
    assert_eq!(
        screen.find(LIST_STATUS_ID).unwrap().text.as_deref(),
        Some("No notes yet")
    );
    assert!(screen.find(NOTE_LIST_ID).is_none());
}

#[tokio::test(start_paused = true)]
async fn failed_load_shows_an_inline_error() {
    let service = StubNoteService::new().with_seed_notes(2);
    let mut app = build_app(&service);
    service.push_failure(StubFailure::Service {
        status: 500,
        body: "maintenance".into(),
    });
    settle(&mut app).await;

    let screen = app.render();
    let error = screen.find(LIST_ERROR_ID).unwrap();
    assert!(error.text.as_deref().unwrap().starts_with("Error: "));
    assert!(error.text.as_deref().unwrap().contains("maintenance"));
    assert!(screen.find(NOTE_LIST_ID).is_none());
}

#[tokio::test(start_paused = true)]
async fn search_debounces_and_resets_to_the_first_page() {
    let service = StubNoteService::new().with_seed_notes(30);
    let mut app = build_app(&service);
    settle(&mut app).await;

    app.handle(AppEvent::PageSelected(2)).await;
    settle(&mut app).await;
    assert_eq!(service.list_call_count(), 2);

    app.handle(AppEvent::SearchInput("note 3".into())).await;
    let typed = app.render();
    assert_eq!(
        typed.find(SEARCH_INPUT_ID).unwrap().text.as_deref(),
        Some("note 3")
    );
    // Raw keystrokes never fetch.
    assert_eq!(service.list_call_count(), 2);

    tokio::time::sleep(Duration::from_millis(501)).await;
    settle(&mut app).await;
    assert_eq!(service.list_call_count(), 3);

    let results = app.render();
    assert_eq!(results.find_all(NodeKind::ListItem).len(), 2);
    assert!(results.contains_text("Note 30"));
    assert!(results.find("page-1").unwrap().active);
}

#[tokio::test(start_paused = true)]
async fn enter_flushes_the_search_immediately() {
    let service = StubNoteService::new().with_seed_notes(5);
    let mut app = build_app(&service);
    settle(&mut app).await;

    app.handle(AppEvent::SearchInput("note 2".into())).await;
    app.handle(AppEvent::SearchSubmitted).await;
    settle(&mut app).await;

    assert_eq!(service.list_call_count(), 2);
    let results = app.render();
    assert_eq!(results.find_all(NodeKind::ListItem).len(), 1);
    assert!(results.contains_text("Note 2"));

    // The aborted settle timer must not fire a duplicate fetch.
    tokio::time::sleep(Duration::from_millis(600)).await;
    settle(&mut app).await;
    assert_eq!(service.list_call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn page_navigation_bridges_with_the_previous_page() {
    let service = StubNoteService::new().with_seed_notes(30).with_latency_ms(40);
    let mut app = build_app(&service);
    tokio::time::sleep(Duration::from_millis(41)).await;
    settle(&mut app).await;

    app.handle(AppEvent::PageSelected(2)).await;
    let bridging = app.render();
    assert!(bridging.find("page-2").unwrap().active);
    assert!(bridging.contains_text("Note 30"));
    assert!(bridging.find(LIST_STATUS_ID).is_none());

    tokio::time::sleep(Duration::from_millis(41)).await;
    settle(&mut app).await;
    let landed = app.render();
    assert!(landed.contains_text("Note 18"));
    assert!(!landed.contains_text("Note 30"));
}

#[tokio::test(start_paused = true)]
async fn out_of_range_page_selection_is_ignored() {
    // 25 notes at 12 per page leaves 3 pages; page 4 must never be fetched.
    let service = StubNoteService::new().with_seed_notes(25);
    let mut app = build_app(&service);
    settle(&mut app).await;

    app.handle(AppEvent::PageSelected(4)).await;
    settle(&mut app).await;
    assert_eq!(service.list_call_count(), 1);
    assert!(app.render().find("page-1").unwrap().active);

    app.handle(AppEvent::PageSelected(2)).await;
    settle(&mut app).await;
    assert_eq!(service.list_call_count(), 2);
    assert!(app.render().find("page-2").unwrap().active);
}

#[tokio::test(start_paused = true)]
async fn create_dialog_submits_and_refreshes_the_list() {
    let service = StubNoteService::new().with_seed_notes(2);
    let mut app = build_app(&service);
    settle(&mut app).await;

    app.handle(AppEvent::OpenCreateModal).await;
    let open = app.render();
    assert!(open.find(DIALOG_ID).is_some());
    assert!(open.find(SUBMIT_ID).unwrap().disabled);

    app.handle(AppEvent::TitleChanged("Team sync".into())).await;
    app.handle(AppEvent::ContentChanged("Agenda".into())).await;
    app.handle(AppEvent::TagChanged("Meeting".into())).await;
    assert!(!app.render().find(SUBMIT_ID).unwrap().disabled);

    app.handle(AppEvent::SubmitForm).await;
    let closed = app.render();
    assert!(closed.overlay_is_empty());
    assert_eq!(service.create_call_count(), 1);

    settle(&mut app).await;
    assert!(app.render().contains_text("Team sync"));
}

#[tokio::test(start_paused = true)]
async fn failed_create_keeps_the_dialog_open_with_the_error() {
    let service = StubNoteService::new().with_seed_notes(2);
    let mut app = build_app(&service);
    settle(&mut app).await;

    app.handle(AppEvent::OpenCreateModal).await;
    app.handle(AppEvent::TitleChanged("Team sync".into())).await;
    app.handle(AppEvent::TagChanged("Meeting".into())).await;
    service.push_failure(StubFailure::Service {
        status: 500,
        body: "quota exceeded".into(),
    });

    app.handle(AppEvent::SubmitForm).await;
    let screen = app.render();
    assert!(!screen.overlay_is_empty());
    assert!(screen
        .find(FORM_ERROR_ID)
        .unwrap()
        .text
        .as_deref()
        .unwrap()
        .contains("quota exceeded"));
    assert_eq!(
        screen.find(TITLE_INPUT_ID).unwrap().text.as_deref(),
        Some("Team sync")
    );
    // Failure must not invalidate the cached page.
    assert_eq!(service.list_call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn invalid_form_never_reaches_the_service() {
    let service = StubNoteService::new().with_seed_notes(1);
    let mut app = build_app(&service);
    settle(&mut app).await;

    app.handle(AppEvent::OpenCreateModal).await;
    app.handle(AppEvent::TitleChanged("ab".into())).await;
    app.handle(AppEvent::SubmitForm).await;

    assert_eq!(service.create_call_count(), 0);
    let screen = app.render();
    assert!(!screen.overlay_is_empty());
    assert!(screen.contains_text("Min 3"));
}

#[tokio::test(start_paused = true)]
async fn dialog_close_paths_and_fresh_form_per_open() {
    let service = StubNoteService::new().with_seed_notes(1);
    let mut app = build_app(&service);
    settle(&mut app).await;

    app.handle(AppEvent::OpenCreateModal).await;
    app.handle(AppEvent::TitleChanged("draft title".into())).await;

    // Clicks inside the dialog never dismiss it.
    app.handle(AppEvent::BackdropClicked {
        target_id: DIALOG_ID.to_string(),
    })
    .await;
    assert!(!app.render().overlay_is_empty());

    app.handle(AppEvent::BackdropClicked {
        target_id: BACKDROP_ID.to_string(),
    })
    .await;
    assert!(app.render().overlay_is_empty());

    // Reopening builds a fresh form; the discarded draft is gone.
    app.handle(AppEvent::OpenCreateModal).await;
    let reopened = app.render();
    assert_eq!(
        reopened.find(TITLE_INPUT_ID).unwrap().text.as_deref(),
        Some("")
    );

    app.handle(AppEvent::EscapePressed).await;
    assert!(app.render().overlay_is_empty());

    // Escape with no open dialog is a no-op.
    app.handle(AppEvent::EscapePressed).await;
    assert!(app.render().overlay_is_empty());
}

#[tokio::test(start_paused = true)]
async fn delete_disables_the_row_then_removes_it() {
    let service = StubNoteService::new().with_seed_notes(3).with_latency_ms(30);
    let mut app = build_app(&service);
    tokio::time::sleep(Duration::from_millis(31)).await;
    settle(&mut app).await;

    app.handle(AppEvent::DeleteNote("note-2".into())).await;
    let during = app.render();
    let deleting = during.find(&delete_button_id("note-2")).unwrap();
    assert!(deleting.disabled);
    assert_eq!(deleting.text.as_deref(), Some("Deleting…"));
    assert!(!during.find(&delete_button_id("note-1")).unwrap().disabled);

    tokio::time::sleep(Duration::from_millis(100)).await;
    settle(&mut app).await;
    let after = app.render();
    assert_eq!(after.find_all(NodeKind::ListItem).len(), 2);
    assert!(!after.contains_text("Note 2"));
    assert_eq!(service.delete_call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn failed_delete_shows_a_row_error_and_reenables_the_button() {
    let service = StubNoteService::new().with_seed_notes(2);
    let mut app = build_app(&service);
    settle(&mut app).await;

    service.push_failure(StubFailure::Network("reset".into()));
    app.handle(AppEvent::DeleteNote("note-1".into())).await;
    settle(&mut app).await;

    let screen = app.render();
    let error = screen.find(&delete_error_id("note-1")).unwrap();
    assert!(error.text.as_deref().unwrap().contains("Network error"));
    let button = screen.find(&delete_button_id("note-1")).unwrap();
    assert!(!button.disabled);
    assert_eq!(button.text.as_deref(), Some("Delete"));
    assert_eq!(service.list_call_count(), 1);

    // Retrying clears the row error and goes through.
    app.handle(AppEvent::DeleteNote("note-1".into())).await;
    settle(&mut app).await;
    let retried = app.render();
    assert!(retried.find(&delete_error_id("note-1")).is_none());
    assert_eq!(retried.find_all(NodeKind::ListItem).len(), 1);
    assert_eq!(service.delete_call_count(), 2);
}
