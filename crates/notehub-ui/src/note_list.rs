//! Note list rows.
//!
//! Each row shows title, content, and tag plus a delete button. The button
//! reflects the pending-delete set: while its note's delete is in flight it
//! is disabled and relabeled, and a failed delete leaves a row-level error
//! message until the next attempt.

use std::collections::HashMap;

use notehub_core::Note;

use crate::node::{Node, NodeKind};

pub const NOTE_LIST_ID: &str = "note-list";

const DELETE_LABEL: &str = "Delete";
const DELETING_LABEL: &str = "Deleting…";

pub fn row_id(note_id: &str) -> String {
    format!("note-{}", note_id)
}

pub fn delete_button_id(note_id: &str) -> String {
    format!("delete-{}", note_id)
}

pub fn delete_error_id(note_id: &str) -> String {
    format!("delete-error-{}", note_id)
}

pub fn render<F>(notes: &[Note], is_deleting: F, delete_errors: &HashMap<String, String>) -> Node
where
    F: Fn(&str) -> bool,
{
    Node::new(NodeKind::List)
        .with_id(NOTE_LIST_ID)
        .children(notes.iter().map(|note| {
            let deleting = is_deleting(&note.id);
            let mut row = Node::new(NodeKind::ListItem)
                .with_id(row_id(&note.id))
                .child(Node::new(NodeKind::Heading).with_text(note.title.as_str()))
                .child(Node::new(NodeKind::Paragraph).with_text(note.content.as_str()))
                .child(Node::new(NodeKind::Tag).with_text(note.tag.as_str()))
                .child(
                    Node::new(NodeKind::Button)
                        .with_id(delete_button_id(&note.id))
                        .with_text(if deleting { DELETING_LABEL } else { DELETE_LABEL })
                        .disabled(deleting),
                );
            if let Some(message) = delete_errors.get(&note.id) {
                row = row.child(
                    Node::new(NodeKind::Status)
                        .with_id(delete_error_id(&note.id))
                        .with_text(message.as_str()),
                );
            }
            row
        }))
}
