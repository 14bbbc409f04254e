//! In-memory stub of the note service for deterministic testing.
//!
//! Implements the full [`NoteService`] contract against a local note store,
//! including search filtering and pagination, so query and mutation logic
//! can be exercised without a network.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use notehub_api::stub::StubNoteService;
//!
//! #[tokio::test]
//! async fn test_with_stub_service() {
//!     let service = StubNoteService::new().with_seed_notes(25);
//!
//!     let page = service
//!         .list_notes(&ListNotesParams::default())
//!         .await
//!         .unwrap();
//!     assert_eq!(page.notes.len(), 12);
//! }
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use notehub_core::{
    Error, ListNotesParams, Note, NoteDraft, NoteService, NoteTag, NotesPage, Result,
};

/// Failure injected into upcoming stub calls.
#[derive(Debug, Clone)]
pub enum StubFailure {
    /// Fail as if the request never reached the service.
    Network(String),
    /// Fail with a service status and body.
    Service { status: u16, body: String },
}

impl StubFailure {
    fn into_error(self) -> Error {
        match self {
            StubFailure::Network(msg) => Error::Network(msg),
            StubFailure::Service { status, body } => Error::Service { status, body },
        }
    }
}

/// One recorded stub invocation, for test assertions.
#[derive(Debug, Clone)]
pub struct StubCall {
    pub operation: String,
    pub input: String,
    pub timestamp: std::time::Instant,
}

#[derive(Debug)]
struct StubState {
    /// Notes in creation order; listings return newest first.
    notes: Vec<Note>,
    next_id: u64,
    /// One-shot failures, consumed front to back, one per call.
    fail_queue: VecDeque<StubFailure>,
    /// Failure applied to every call until cleared.
    fail_all: Option<StubFailure>,
    latency_ms: u64,
}

/// In-memory note service for testing.
#[derive(Clone)]
pub struct StubNoteService {
    state: Arc<Mutex<StubState>>,
    call_log: Arc<Mutex<Vec<StubCall>>>,
}

impl StubNoteService {
    /// Create an empty stub service.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(StubState {
                notes: Vec::new(),
                next_id: 1,
                fail_queue: VecDeque::new(),
                fail_all: None,
                latency_ms: 0,
            })),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Seed `count` generated notes ("Note 1".."Note N", tags cycling
    /// through the full set).
    pub fn with_seed_notes(self, count: usize) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            for _ in 0..count {
                let id = state.next_id;
                state.next_id += 1;
                state.notes.push(Note {
                    id: format!("note-{}", id),
                    title: format!("Note {}", id),
                    content: format!("Contents of note {}", id),
                    tag: NoteTag::ALL[(id as usize - 1) % NoteTag::ALL.len()],
                });
            }
        }
        self
    }

    /// Seed specific notes (ids are kept as given).
    pub fn with_notes(self, notes: Vec<Note>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.next_id += notes.len() as u64;
            state.notes.extend(notes);
        }
        self
    }

    /// Set simulated latency for all operations.
    pub fn with_latency_ms(self, latency_ms: u64) -> Self {
        self.state.lock().unwrap().latency_ms = latency_ms;
        self
    }

    /// Queue a one-shot failure; the next call consumes it and fails.
    pub fn push_failure(&self, failure: StubFailure) {
        self.state.lock().unwrap().fail_queue.push_back(failure);
    }

    /// Fail every call with the given failure until [`clear_failures`] is
    /// called.
    ///
    /// [`clear_failures`]: StubNoteService::clear_failures
    pub fn fail_all(&self, failure: StubFailure) {
        self.state.lock().unwrap().fail_all = Some(failure);
    }

    /// Remove all queued and persistent failures.
    pub fn clear_failures(&self) {
        let mut state = self.state.lock().unwrap();
        state.fail_queue.clear();
        state.fail_all = None;
    }

    /// Snapshot of the stored notes, newest first.
    pub fn stored_notes(&self) -> Vec<Note> {
        let state = self.state.lock().unwrap();
        let mut notes = state.notes.clone();
        notes.reverse();
        notes
    }

    /// Get all logged calls for assertion.
    pub fn calls(&self) -> Vec<StubCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.call_log.lock().unwrap().clear()
    }

    /// Number of list calls made so far.
    pub fn list_call_count(&self) -> usize {
        self.count_calls("list_notes")
    }

    /// Number of create calls made so far.
    pub fn create_call_count(&self) -> usize {
        self.count_calls("create_note")
    }

    /// Number of delete calls made so far.
    pub fn delete_call_count(&self) -> usize {
        self.count_calls("delete_note")
    }

    fn count_calls(&self, operation: &str) -> usize {
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    fn log_call(&self, operation: &str, input: &str) {
        self.call_log.lock().unwrap().push(StubCall {
            operation: operation.to_string(),
            input: input.to_string(),
            timestamp: std::time::Instant::now(),
        });
    }

    fn next_failure(&self) -> Option<Error> {
        let mut state = self.state.lock().unwrap();
        if let Some(failure) = state.fail_queue.pop_front() {
            return Some(failure.into_error());
        }
        state
            .fail_all
            .clone()
            .map(|failure| failure.into_error())
    }

    async fn simulate_latency(&self) {
        let latency_ms = self.state.lock().unwrap().latency_ms;
        if latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(latency_ms)).await;
        }
    }

    fn matches_search(note: &Note, search: &str) -> bool {
        let needle = search.to_lowercase();
        note.title.to_lowercase().contains(&needle)
            || note.content.to_lowercase().contains(&needle)
    }
}

impl Default for StubNoteService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NoteService for StubNoteService {
    async fn list_notes(&self, params: &ListNotesParams) -> Result<NotesPage> {
        self.log_call(
            "list_notes",
            &format!("page={} search={}", params.page, params.search),
        );
        self.simulate_latency().await;
        if let Some(err) = self.next_failure() {
            return Err(err);
        }

        let state = self.state.lock().unwrap();
        let mut filtered: Vec<Note> = state
            .notes
            .iter()
            .filter(|n| !params.is_filtered() || Self::matches_search(n, &params.search))
            .cloned()
            .collect();
        filtered.reverse();

        let per_page = params.per_page.max(1) as usize;
        let total = filtered.len();
        let total_pages = (total.div_ceil(per_page)).max(1) as u32;
        let offset = (params.page.max(1) as usize - 1) * per_page;
        let notes: Vec<Note> = filtered.into_iter().skip(offset).take(per_page).collect();

        Ok(NotesPage {
            notes,
            total_pages,
            page: Some(params.page),
            per_page: Some(params.per_page),
            total_items: Some(total as u64),
        })
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<Note> {
        self.log_call("create_note", &draft.title);
        self.simulate_latency().await;
        if let Some(err) = self.next_failure() {
            return Err(err);
        }

        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        let note = Note {
            id: format!("note-{}", id),
            title: draft.title.clone(),
            content: draft.content.clone(),
            tag: draft.tag,
        };
        state.notes.push(note.clone());
        Ok(note)
    }

    async fn delete_note(&self, id: &str) -> Result<Note> {
        self.log_call("delete_note", id);
        self.simulate_latency().await;
        if let Some(err) = self.next_failure() {
            return Err(err);
        }

        let mut state = self.state.lock().unwrap();
        match state.notes.iter().position(|n| n.id == id) {
            Some(index) => Ok(state.notes.remove(index)),
            None => Err(Error::NoteNotFound(id.to_string())),
        }
    }
}
