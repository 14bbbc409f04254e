//! Core data models for the NoteHub client.
//!
//! These types mirror the remote note service's wire shapes and are shared
//! across all notehub crates.

use serde::{Deserialize, Serialize};

// =============================================================================
// TAGS
// =============================================================================

/// Fixed category tag carried by every note.
///
/// The service accepts exactly these five values; the wire form is the
/// variant name verbatim (`"Todo"`, `"Work"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteTag {
    Todo,
    Work,
    Personal,
    Meeting,
    Shopping,
}

impl NoteTag {
    /// All tags in display order (form select options).
    pub const ALL: [NoteTag; 5] = [
        NoteTag::Todo,
        NoteTag::Work,
        NoteTag::Personal,
        NoteTag::Meeting,
        NoteTag::Shopping,
    ];

    /// Stable string form, identical to the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteTag::Todo => "Todo",
            NoteTag::Work => "Work",
            NoteTag::Personal => "Personal",
            NoteTag::Meeting => "Meeting",
            NoteTag::Shopping => "Shopping",
        }
    }

    /// Parse a tag from its wire/display form. Returns `None` for anything
    /// outside the fixed set (including the empty string).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Todo" => Some(NoteTag::Todo),
            "Work" => Some(NoteTag::Work),
            "Personal" => Some(NoteTag::Personal),
            "Meeting" => Some(NoteTag::Meeting),
            "Shopping" => Some(NoteTag::Shopping),
            _ => None,
        }
    }
}

impl std::fmt::Display for NoteTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NoteTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid note tag: {}", s))
    }
}

// =============================================================================
// NOTES
// =============================================================================

/// A persisted note as returned by the service.
///
/// `id` is opaque and server-assigned; the client never fabricates one.
/// Unknown wire fields (timestamps etc.) are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub tag: NoteTag,
}

/// Fields submitted when creating a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tag: NoteTag,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>, tag: NoteTag) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tag,
        }
    }
}

// =============================================================================
// LIST REQUEST / RESPONSE
// =============================================================================

/// Parameters for a paginated, optionally filtered list request.
///
/// An empty `search` means "no filter" and the parameter is omitted from
/// the request entirely (the service distinguishes it from filtering on
/// the empty string).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListNotesParams {
    /// 1-based page number.
    pub page: u32,
    /// Notes per page, > 0.
    pub per_page: u32,
    /// Raw search term; empty means unfiltered.
    pub search: String,
}

impl ListNotesParams {
    pub fn new(page: u32, per_page: u32, search: impl Into<String>) -> Self {
        Self {
            page,
            per_page,
            search: search.into(),
        }
    }

    /// True when a search filter should be sent.
    pub fn is_filtered(&self) -> bool {
        !self.search.is_empty()
    }
}

impl Default for ListNotesParams {
    fn default() -> Self {
        Self {
            page: crate::defaults::FIRST_PAGE,
            per_page: crate::defaults::PER_PAGE,
            search: String::new(),
        }
    }
}

/// One page of the note collection for a list request.
///
/// Owned by the query cache and always replaced wholesale by a fresh fetch
/// result, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesPage {
    pub notes: Vec<Note>,
    pub total_pages: u32,
    /// Echo of the requested page, when the service includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_items: Option<u64>,
}

impl NotesPage {
    /// An empty single-page result (the degenerate "no notes" shape).
    pub fn empty() -> Self {
        Self {
            notes: Vec::new(),
            total_pages: 1,
            page: None,
            per_page: None,
            total_items: None,
        }
    }

    /// True when this page contains a note with the given id.
    pub fn contains(&self, id: &str) -> bool {
        self.notes.iter().any(|n| n.id == id)
    }
}

/// Wire envelope for single-note responses (`{ "data": Note }`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}
