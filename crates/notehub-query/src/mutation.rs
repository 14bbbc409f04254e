//! Mutation coordination for note create and delete.
//!
//! Mutations run against the service and, on success, invalidate the query
//! cache so observed pages refetch. The pending flags exposed here are what
//! lets the UI disable the submit button and individual delete buttons
//! while their mutation is in flight.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use uuid::Uuid;

use notehub_core::defaults::EVENT_CAPACITY;
use notehub_core::{Error, Note, NoteDraft, NoteService, Result};

use crate::client::QueryClient;
use crate::events::MutationEvent;

struct Inner {
    service: Arc<dyn NoteService>,
    queries: QueryClient,
    pending_deletes: Mutex<HashSet<String>>,
    create_pending: AtomicBool,
    events: broadcast::Sender<MutationEvent>,
}

/// Cheaply clonable handle to the mutation coordinator.
#[derive(Clone)]
pub struct Mutations {
    inner: Arc<Inner>,
}

impl Mutations {
    pub fn new(service: Arc<dyn NoteService>, queries: QueryClient) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                service,
                queries,
                pending_deletes: Mutex::new(HashSet::new()),
                create_pending: AtomicBool::new(false),
                events,
            }),
        }
    }

    /// Subscribe to mutation outcomes.
    pub fn subscribe(&self) -> broadcast::Receiver<MutationEvent> {
        self.inner.events.subscribe()
    }

    /// True while a create call is in flight.
    pub fn create_pending(&self) -> bool {
        self.inner.create_pending.load(Ordering::SeqCst)
    }

    /// True while a delete for this id is in flight.
    pub fn is_deleting(&self, id: &str) -> bool {
        self.pending_deletes().contains(id)
    }

    fn pending_deletes(&self) -> MutexGuard<'_, HashSet<String>> {
        self.inner
            .pending_deletes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Create a note from a draft.
    ///
    /// The draft is validated first; an invalid draft returns
    /// [`Error::Validation`] without any service call. On success the query
    /// cache is invalidated before the `Created` event fires, so event
    /// consumers always see a cache that already knows about the change.
    pub async fn create(&self, draft: NoteDraft) -> Result<Note> {
        draft.validate()?;

        let mutation_id = Uuid::new_v4();
        debug!(mutation_id = %mutation_id, tag = %draft.tag, "Creating note");

        self.inner.create_pending.store(true, Ordering::SeqCst);
        let started = std::time::Instant::now();
        let result = self.inner.service.create_note(&draft).await;
        self.inner.create_pending.store(false, Ordering::SeqCst);
        let duration_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(note) => {
                info!(
                    mutation_id = %mutation_id,
                    note_id = %note.id,
                    duration_ms,
                    "Note created"
                );
                self.inner.queries.invalidate_all();
                let _ = self.inner.events.send(MutationEvent::Created {
                    id: note.id.clone(),
                });
                Ok(note)
            }
            Err(e) => {
                warn!(
                    mutation_id = %mutation_id,
                    duration_ms,
                    error = %e,
                    "Note creation failed"
                );
                Err(e)
            }
        }
    }

    /// Delete a note by id.
    ///
    /// The id joins the pending-delete set for the duration of the call.
    /// A second delete for an id already in flight is rejected without a
    /// service call; the UI disables the control, so this only catches
    /// callers bypassing it. Failures emit `DeleteFailed` so the owning
    /// row can surface the message.
    pub async fn delete(&self, id: &str) -> Result<Note> {
        if !self.pending_deletes().insert(id.to_string()) {
            return Err(Error::Validation(format!(
                "Delete already in progress for note {}",
                id
            )));
        }

        let mutation_id = Uuid::new_v4();
        debug!(mutation_id = %mutation_id, note_id = %id, "Deleting note");

        let started = std::time::Instant::now();
        let result = self.inner.service.delete_note(id).await;
        self.pending_deletes().remove(id);
        let duration_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(note) => {
                info!(
                    mutation_id = %mutation_id,
                    note_id = %note.id,
                    duration_ms,
                    "Note deleted"
                );
                self.inner.queries.invalidate_all();
                let _ = self.inner.events.send(MutationEvent::Deleted {
                    id: note.id.clone(),
                });
                Ok(note)
            }
            Err(e) => {
                warn!(
                    mutation_id = %mutation_id,
                    note_id = %id,
                    duration_ms,
                    error = %e,
                    "Note deletion failed"
                );
                let _ = self.inner.events.send(MutationEvent::DeleteFailed {
                    id: id.to_string(),
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }
}
