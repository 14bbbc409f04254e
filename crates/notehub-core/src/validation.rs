//! Client-side validation of note drafts.
//!
//! Rules and messages match the note service's own constraints, so a draft
//! that passes here is accepted by the service (absent races). Validation
//! runs before any network call; an invalid draft never leaves the client.

use crate::defaults::{CONTENT_MAX_LENGTH, TITLE_MAX_LENGTH, TITLE_MIN_LENGTH};
use crate::error::{Error, Result};
use crate::models::{NoteDraft, NoteTag};

/// Message for a missing required field.
pub const MSG_REQUIRED: &str = "Required";
/// Message for a title below the minimum length.
pub const MSG_TITLE_MIN: &str = "Min 3";
/// Message for a title above the maximum length.
pub const MSG_TITLE_MAX: &str = "Max 50";
/// Message for content above the maximum length.
pub const MSG_CONTENT_MAX: &str = "Max 500";
/// Message for a tag outside the allowed set.
pub const MSG_INVALID_TAG: &str = "Invalid tag";

/// Validate a title. Lengths are counted in characters, not bytes.
pub fn validate_title(title: &str) -> Option<&'static str> {
    if title.is_empty() {
        return Some(MSG_REQUIRED);
    }
    let len = title.chars().count();
    if len < TITLE_MIN_LENGTH {
        Some(MSG_TITLE_MIN)
    } else if len > TITLE_MAX_LENGTH {
        Some(MSG_TITLE_MAX)
    } else {
        None
    }
}

/// Validate note content. Empty content is allowed.
pub fn validate_content(content: &str) -> Option<&'static str> {
    if content.chars().count() > CONTENT_MAX_LENGTH {
        Some(MSG_CONTENT_MAX)
    } else {
        None
    }
}

/// Validate a raw tag string as entered in a form.
pub fn validate_tag(tag: &str) -> Option<&'static str> {
    if tag.is_empty() {
        return Some(MSG_REQUIRED);
    }
    if NoteTag::parse(tag).is_none() {
        Some(MSG_INVALID_TAG)
    } else {
        None
    }
}

impl NoteDraft {
    /// Validate the whole draft, reporting the first failing field in
    /// title, content, tag order.
    pub fn validate(&self) -> Result<()> {
        if let Some(msg) = validate_title(&self.title) {
            return Err(Error::Validation(msg.to_string()));
        }
        if let Some(msg) = validate_content(&self.content) {
            return Err(Error::Validation(msg.to_string()));
        }
        // The typed tag is always in the allowed set; nothing left to check.
        Ok(())
    }
}
