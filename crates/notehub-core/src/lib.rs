//! # notehub-core
//!
//! Core types, traits, and abstractions for the NoteHub client.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the other notehub crates depend on.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;
pub mod validation;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::{DataEnvelope, ListNotesParams, Note, NoteDraft, NoteTag, NotesPage};
pub use traits::NoteService;
pub use validation::{
    validate_content, validate_tag, validate_title, MSG_CONTENT_MAX, MSG_INVALID_TAG,
    MSG_REQUIRED, MSG_TITLE_MAX, MSG_TITLE_MIN,
};
