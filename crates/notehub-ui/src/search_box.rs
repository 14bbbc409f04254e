//! Search input component.
//!
//! Renders the raw (undebounced) search text; the app shell feeds input
//! events into the debouncer, so this stays a pure echo of what the user
//! typed.

use crate::node::{Node, NodeKind};

pub const SEARCH_INPUT_ID: &str = "search-input";

pub fn render(raw_search: &str) -> Node {
    Node::new(NodeKind::TextInput)
        .with_id(SEARCH_INPUT_ID)
        .with_text(raw_search)
}
