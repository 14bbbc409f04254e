//! Headless presentation layer.
//!
//! Components are plain state machines that render into the view-node tree
//! in [`node`]; there is no real DOM and no styling. The [`app::App`] shell
//! wires the query and mutation layers to the components and is driven
//! entirely by [`app::AppEvent`] values, which keeps every functional
//! contract (disabled buttons, error rows, overlay contents) assertable
//! from tests.

pub mod app;
pub mod modal;
pub mod node;
pub mod note_form;
pub mod note_list;
pub mod pagination;
pub mod search_box;

pub use app::{App, AppEvent};
pub use modal::Modal;
pub use node::{Node, NodeKind, Screen};
pub use note_form::NoteForm;
pub use pagination::{PageItem, Paginator};
