//! Pagination and search state behind the visible note list.
//!
//! `raw_search` tracks the text box keystroke by keystroke while
//! `effective_search` only moves when a debounced term commits, so the
//! cache key (and therefore fetching) is driven by settled input alone.

use notehub_core::defaults::{FIRST_PAGE, PER_PAGE};

use crate::key::QueryKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    pub page: u32,
    pub per_page: u32,
    pub raw_search: String,
    pub effective_search: String,
}

impl ListState {
    pub fn new() -> Self {
        Self {
            page: FIRST_PAGE,
            per_page: PER_PAGE,
            raw_search: String::new(),
            effective_search: String::new(),
        }
    }

    /// Mirror the text box contents. Does not touch the effective term.
    pub fn set_raw_search(&mut self, value: &str) {
        self.raw_search = value.to_string();
    }

    /// Apply a settled search term.
    ///
    /// A changed term resets the page to the first page, so the first fetch
    /// for the new term never lands on an out-of-range page. Returns whether
    /// anything changed; committing the current term is a no-op.
    pub fn commit_search(&mut self, term: &str) -> bool {
        if self.effective_search == term {
            return false;
        }
        self.effective_search = term.to_string();
        self.page = FIRST_PAGE;
        true
    }

    /// Store a page selection already validated by the paginator.
    pub fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    /// Cache key for the current page and effective term.
    pub fn key(&self) -> QueryKey {
        QueryKey::new(self.page, self.per_page, &self.effective_search)
    }
}

impl Default for ListState {
    fn default() -> Self {
        Self::new()
    }
}
