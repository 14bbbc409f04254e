//! # notehub-api
//!
//! HTTP client for the NoteHub REST service.
//!
//! This crate provides:
//! - [`HttpNoteService`], the production client for the remote service
//! - [`ServiceConfig`], connection settings with environment loading
//! - An in-memory stub service (feature `stub`) for deterministic tests
//!
//! # Feature Flags
//!
//! - `stub`: Enable [`stub::StubNoteService`] outside of this crate's own
//!   tests
//!
//! # Example
//!
//! ```rust,no_run
//! use notehub_api::HttpNoteService;
//! use notehub_core::{ListNotesParams, NoteService};
//!
//! #[tokio::main]
//! async fn main() {
//!     let service = HttpNoteService::from_env().unwrap();
//!     let page = service
//!         .list_notes(&ListNotesParams::default())
//!         .await
//!         .unwrap();
//!     println!("{} notes", page.notes.len());
//! }
//! ```

pub mod client;
pub mod config;

#[cfg(any(test, feature = "stub"))]
pub mod stub;

// Re-export core types
pub use notehub_core::{
    Error, ListNotesParams, Note, NoteDraft, NoteService, NoteTag, NotesPage, Result,
};

pub use client::HttpNoteService;
pub use config::ServiceConfig;

#[cfg(any(test, feature = "stub"))]
pub use stub::{StubFailure, StubNoteService};
