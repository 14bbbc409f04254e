//! Note creation form.
//!
//! Validates on every change and only yields a draft when all fields pass,
//! so the submit button's disabled state and the service-call contract
//! (`Mutations::create` never sees an invalid draft from here) agree by
//! construction. The app shell drops the instance after a successful
//! submission and builds a fresh one per dialog open.

use notehub_core::validation::{validate_content, validate_tag, validate_title};
use notehub_core::{NoteDraft, NoteTag};

use crate::node::{Node, NodeKind};

pub const FORM_ID: &str = "note-form";
pub const TITLE_INPUT_ID: &str = "title-input";
pub const CONTENT_INPUT_ID: &str = "content-input";
pub const TAG_SELECT_ID: &str = "tag-select";
pub const TITLE_ERROR_ID: &str = "title-error";
pub const CONTENT_ERROR_ID: &str = "content-error";
pub const TAG_ERROR_ID: &str = "tag-error";
pub const FORM_ERROR_ID: &str = "form-error";
pub const SUBMIT_ID: &str = "submit-note";
pub const CANCEL_ID: &str = "cancel-create";

const EMPTY_TAG_OPTION: &str = "Select tag";
const SUBMIT_LABEL: &str = "Create note";
const CANCEL_LABEL: &str = "Cancel";

/// Stateful form backing the create dialog.
///
/// Field errors appear once their field has been edited; an untouched form
/// shows no messages but still refuses to produce values.
#[derive(Debug, Default)]
pub struct NoteForm {
    title: String,
    content: String,
    tag: String,
    title_error: Option<&'static str>,
    content_error: Option<&'static str>,
    tag_error: Option<&'static str>,
    submit_error: Option<String>,
}

impl NoteForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, value: &str) {
        self.title = value.to_string();
        self.title_error = validate_title(&self.title);
    }

    pub fn set_content(&mut self, value: &str) {
        self.content = value.to_string();
        self.content_error = validate_content(&self.content);
    }

    pub fn set_tag(&mut self, value: &str) {
        self.tag = value.to_string();
        self.tag_error = validate_tag(&self.tag);
    }

    /// Surface a failed submission inside the form; entered values stay.
    pub fn set_submit_error(&mut self, message: impl Into<String>) {
        self.submit_error = Some(message.into());
    }

    /// The draft, if every field currently validates.
    pub fn values(&self) -> Option<NoteDraft> {
        if validate_title(&self.title).is_some() || validate_content(&self.content).is_some() {
            return None;
        }
        let tag = NoteTag::parse(&self.tag)?;
        Some(NoteDraft::new(self.title.as_str(), self.content.as_str(), tag))
    }

    pub fn is_valid(&self) -> bool {
        self.values().is_some()
    }

    pub fn render(&self, create_pending: bool) -> Node {
        let mut form = Node::new(NodeKind::Form)
            .with_id(FORM_ID)
            .child(field(
                "Title",
                Node::new(NodeKind::TextInput)
                    .with_id(TITLE_INPUT_ID)
                    .with_text(self.title.as_str()),
                TITLE_ERROR_ID,
                self.title_error,
            ))
            .child(field(
                "Content",
                Node::new(NodeKind::TextArea)
                    .with_id(CONTENT_INPUT_ID)
                    .with_text(self.content.as_str()),
                CONTENT_ERROR_ID,
                self.content_error,
            ))
            .child(field(
                "Tag",
                self.render_tag_select(),
                TAG_ERROR_ID,
                self.tag_error,
            ));
        if let Some(message) = &self.submit_error {
            form = form.child(
                Node::new(NodeKind::Status)
                    .with_id(FORM_ERROR_ID)
                    .with_text(message.as_str()),
            );
        }
        form.child(
            Node::new(NodeKind::Toolbar)
                .child(
                    Node::new(NodeKind::Button)
                        .with_id(CANCEL_ID)
                        .with_text(CANCEL_LABEL),
                )
                .child(
                    Node::new(NodeKind::Button)
                        .with_id(SUBMIT_ID)
                        .with_text(SUBMIT_LABEL)
                        .disabled(!self.is_valid() || create_pending),
                ),
        )
    }

    fn render_tag_select(&self) -> Node {
        let mut select = Node::new(NodeKind::Select)
            .with_id(TAG_SELECT_ID)
            .with_text(self.tag.as_str())
            .child(
                Node::new(NodeKind::SelectOption)
                    .with_text(EMPTY_TAG_OPTION)
                    .active(self.tag.is_empty()),
            );
        for tag in NoteTag::ALL {
            select = select.child(
                Node::new(NodeKind::SelectOption)
                    .with_text(tag.as_str())
                    .active(self.tag == tag.as_str()),
            );
        }
        select
    }
}

fn field(label: &str, control: Node, error_id: &str, error: Option<&'static str>) -> Node {
    let mut field = Node::new(NodeKind::Field)
        .child(Node::new(NodeKind::Label).with_text(label))
        .child(control);
    if let Some(message) = error {
        field = field.child(
            Node::new(NodeKind::FieldError)
                .with_id(error_id)
                .with_text(message),
        );
    }
    field
}
