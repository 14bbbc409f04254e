//! Core traits for NoteHub client abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ListNotesParams, Note, NoteDraft, NotesPage};

/// Remote note service operations.
///
/// The HTTP client in `notehub-api` is the production implementation; tests
/// substitute an in-memory stub. All methods map one-to-one onto service
/// endpoints and return already-decoded domain types.
#[async_trait]
pub trait NoteService: Send + Sync {
    /// Fetch one page of notes, optionally filtered by a search term.
    async fn list_notes(&self, params: &ListNotesParams) -> Result<NotesPage>;

    /// Create a note from a validated draft. Returns the stored note with
    /// its server-assigned id.
    async fn create_note(&self, draft: &NoteDraft) -> Result<Note>;

    /// Delete a note by id. Returns the deleted note's last state.
    async fn delete_note(&self, id: &str) -> Result<Note>;
}
