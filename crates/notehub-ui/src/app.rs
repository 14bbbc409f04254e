//! App shell.
//!
//! Owns the query client handle, the mutation coordinator, list state, the
//! search debouncer, and the dialog, and turns harness events into state
//! changes. The shell is event-driven: `handle` applies one input event,
//! `drain` folds in settled search commits and bus notifications, and
//! `render` produces the current frame from snapshots alone.

use std::collections::HashMap;

use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::broadcast::Receiver;
use tracing::debug;

use notehub_query::{
    Debouncer, ListState, MutationEvent, Mutations, QueryClient, QueryEvent, QueryObserver,
};

use crate::modal::Modal;
use crate::node::{Node, NodeKind, Screen};
use crate::note_form::NoteForm;
use crate::pagination::Paginator;
use crate::{note_list, search_box};

pub const APP_ID: &str = "app";
pub const TOOLBAR_ID: &str = "toolbar";
pub const CREATE_NOTE_ID: &str = "create-note";
pub const LIST_STATUS_ID: &str = "list-status";
pub const LIST_ERROR_ID: &str = "list-error";

const LOADING_TEXT: &str = "Loading…";
const EMPTY_TEXT: &str = "No notes yet";
const CREATE_NOTE_LABEL: &str = "Create note +";

/// Input events the harness can feed into the shell.
#[derive(Debug, Clone)]
pub enum AppEvent {
    SearchInput(String),
    SearchSubmitted,
    PageSelected(u32),
    OpenCreateModal,
    CloseModal,
    EscapePressed,
    BackdropClicked { target_id: String },
    TitleChanged(String),
    ContentChanged(String),
    TagChanged(String),
    SubmitForm,
    DeleteNote(String),
}

pub struct App {
    queries: QueryClient,
    mutations: Mutations,
    list: ListState,
    debouncer: Debouncer,
    modal: Modal,
    form: Option<NoteForm>,
    _observer: QueryObserver,
    query_events: Receiver<QueryEvent>,
    mutation_events: Receiver<MutationEvent>,
    delete_errors: HashMap<String, String>,
}

impl App {
    /// Starts observing the initial key and kicks off its first fetch.
    pub fn new(queries: QueryClient, mutations: Mutations) -> Self {
        let list = ListState::new();
        let key = list.key();
        let observer = queries.observe(&key);
        queries.spawn_fetch(&key);
        let query_events = queries.subscribe();
        let mutation_events = mutations.subscribe();
        Self {
            queries,
            mutations,
            list,
            debouncer: Debouncer::new(),
            modal: Modal::new(),
            form: None,
            _observer: observer,
            query_events,
            mutation_events,
            delete_errors: HashMap::new(),
        }
    }

    pub async fn handle(&mut self, event: AppEvent) {
        match event {
            AppEvent::SearchInput(value) => {
                self.list.set_raw_search(&value);
                self.debouncer.submit(&value);
            }
            AppEvent::SearchSubmitted => {
                if let Some(term) = self.debouncer.flush() {
                    self.apply_search(term);
                }
            }
            AppEvent::PageSelected(page) => {
                let paginator = Paginator::new(self.list.page, self.page_count());
                if let Some(page) = paginator.select(page) {
                    debug!(page, "Switching page");
                    self.list.set_page(page);
                    self.refresh_observation();
                }
            }
            AppEvent::OpenCreateModal => {
                self.form = Some(NoteForm::new());
                self.modal.open();
            }
            AppEvent::CloseModal => {
                self.modal.close();
                self.form = None;
            }
            AppEvent::EscapePressed => {
                if self.modal.on_escape() {
                    self.form = None;
                }
            }
            AppEvent::BackdropClicked { target_id } => {
                if self.modal.on_overlay_click(&target_id) {
                    self.form = None;
                }
            }
            AppEvent::TitleChanged(value) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_title(&value);
                }
            }
            AppEvent::ContentChanged(value) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_content(&value);
                }
            }
            AppEvent::TagChanged(value) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_tag(&value);
                }
            }
            AppEvent::SubmitForm => self.submit_form().await,
            AppEvent::DeleteNote(id) => {
                self.delete_errors.remove(&id);
                let mutations = self.mutations.clone();
                tokio::spawn(async move {
                    let _ = mutations.delete(&id).await;
                });
                // Let the spawned delete register as pending before the
                // next render reads the pending set.
                tokio::task::yield_now().await;
            }
        }
    }

    /// Fold in settled search commits and bus notifications.
    ///
    /// Returns whether anything changed that warrants a re-render.
    pub fn drain(&mut self) -> bool {
        let mut dirty = false;
        while let Some(term) = self.debouncer.poll_committed() {
            dirty |= self.apply_search(term);
        }
        loop {
            match self.query_events.try_recv() {
                Ok(_) | Err(TryRecvError::Lagged(_)) => dirty = true,
                Err(_) => break,
            }
        }
        loop {
            match self.mutation_events.try_recv() {
                Ok(MutationEvent::DeleteFailed { id, message }) => {
                    self.delete_errors.insert(id, message);
                    dirty = true;
                }
                Ok(MutationEvent::Deleted { id }) => {
                    self.delete_errors.remove(&id);
                    dirty = true;
                }
                Ok(_) | Err(TryRecvError::Lagged(_)) => dirty = true,
                Err(_) => break,
            }
        }
        dirty
    }

    pub fn render(&self) -> Screen {
        let snapshot = self.queries.snapshot(&self.list.key());
        let page_count = snapshot
            .data
            .as_ref()
            .map(|page| page.total_pages)
            .unwrap_or(1);

        let toolbar = Node::new(NodeKind::Toolbar)
            .with_id(TOOLBAR_ID)
            .child(search_box::render(&self.list.raw_search))
            .child(Paginator::new(self.list.page, page_count).render())
            .child(
                Node::new(NodeKind::Button)
                    .with_id(CREATE_NOTE_ID)
                    .with_text(CREATE_NOTE_LABEL),
            );

        let main = match (&snapshot.error, &snapshot.data) {
            (Some(error), _) => Node::new(NodeKind::Status)
                .with_id(LIST_ERROR_ID)
                .with_text(format!("Error: {}", error)),
            (None, Some(page)) if page.notes.is_empty() => Node::new(NodeKind::Status)
                .with_id(LIST_STATUS_ID)
                .with_text(EMPTY_TEXT),
            (None, Some(page)) => note_list::render(
                &page.notes,
                |id| self.mutations.is_deleting(id),
                &self.delete_errors,
            ),
            (None, None) => Node::new(NodeKind::Status)
                .with_id(LIST_STATUS_ID)
                .with_text(LOADING_TEXT),
        };

        let body = Node::new(NodeKind::Container)
            .with_id(APP_ID)
            .child(toolbar)
            .child(main);
        let overlay = self.modal.render(
            self.form
                .as_ref()
                .map(|form| form.render(self.mutations.create_pending())),
        );
        Screen { body, overlay }
    }

    async fn submit_form(&mut self) {
        let Some(draft) = self.form.as_ref().and_then(NoteForm::values) else {
            return;
        };
        match self.mutations.create(draft).await {
            Ok(_) => {
                self.modal.close();
                self.form = None;
            }
            Err(e) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_submit_error(e.to_string());
                }
            }
        }
    }

    fn apply_search(&mut self, term: String) -> bool {
        if self.list.commit_search(&term) {
            debug!(search_term = %term, "Search committed");
            self.refresh_observation();
            true
        } else {
            false
        }
    }

    fn refresh_observation(&mut self) {
        let key = self.list.key();
        self._observer = self.queries.observe(&key);
        self.queries.spawn_fetch(&key);
    }

    fn page_count(&self) -> u32 {
        self.queries
            .snapshot(&self.list.key())
            .data
            .map(|page| page.total_pages)
            .unwrap_or(1)
    }
}
