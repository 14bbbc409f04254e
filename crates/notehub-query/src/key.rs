//! Cache keys for note list queries.

use notehub_core::ListNotesParams;

/// Identity of one cached list query.
///
/// Two requests share a cache entry exactly when page, page size, and
/// effective search term all match. The `Display` form is the canonical
/// key used in logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub page: u32,
    pub per_page: u32,
    /// Effective search term; empty means unfiltered.
    pub search: String,
}

impl QueryKey {
    pub fn new(page: u32, per_page: u32, search: impl Into<String>) -> Self {
        Self {
            page,
            per_page,
            search: search.into(),
        }
    }

    /// First unfiltered page at the given page size.
    pub fn first_page(per_page: u32) -> Self {
        Self::new(notehub_core::defaults::FIRST_PAGE, per_page, "")
    }

    /// Request parameters for this key.
    pub fn to_params(&self) -> ListNotesParams {
        ListNotesParams::new(self.page, self.per_page, self.search.clone())
    }
}

impl From<&ListNotesParams> for QueryKey {
    fn from(params: &ListNotesParams) -> Self {
        Self::new(params.page, params.per_page, params.search.clone())
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "notes?page={}&perPage={}", self.page, self.per_page)?;
        if !self.search.is_empty() {
            write!(f, "&search={}", self.search)?;
        }
        Ok(())
    }
}
