//! Centralized default constants for the NoteHub client.
//!
//! **This module is the single source of truth** for all shared default
//! values. All crates should reference these constants instead of defining
//! their own magic numbers.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section.

// =============================================================================
// PAGINATION
// =============================================================================

/// Notes requested per page.
pub const PER_PAGE: u32 = 12;

/// First page number (the service pages from 1).
pub const FIRST_PAGE: u32 = 1;

/// Sibling pages shown around the current page in the pagination control.
pub const PAGE_RANGE_DISPLAYED: u32 = 3;

/// Boundary pages always shown at each end of the pagination control.
pub const PAGE_MARGIN_DISPLAYED: u32 = 1;

// =============================================================================
// SEARCH
// =============================================================================

/// Quiet period before a typed search term is committed, in milliseconds.
pub const SEARCH_DEBOUNCE_MS: u64 = 500;

// =============================================================================
// SERVICE
// =============================================================================

/// Default base URL of the public note service.
pub const SERVICE_BASE_URL: &str = "https://notehub-public.goit.study/api";

/// HTTP request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variable holding the bearer token.
pub const ENV_TOKEN: &str = "NOTEHUB_TOKEN";

/// Environment variable overriding the service base URL.
pub const ENV_BASE_URL: &str = "NOTEHUB_API_BASE";

/// Environment variable overriding the request timeout (seconds).
pub const ENV_TIMEOUT_SECS: &str = "NOTEHUB_TIMEOUT_SECS";

// =============================================================================
// VALIDATION
// =============================================================================

/// Minimum note title length in characters.
pub const TITLE_MIN_LENGTH: usize = 3;

/// Maximum note title length in characters.
pub const TITLE_MAX_LENGTH: usize = 50;

/// Maximum note content length in characters.
pub const CONTENT_MAX_LENGTH: usize = 500;

// =============================================================================
// QUERY CACHE
// =============================================================================

/// Broadcast channel capacity for query and mutation event buses.
pub const EVENT_CAPACITY: usize = 64;

/// Age after which an unobserved cache entry may be evicted, in seconds.
pub const CACHE_MAX_AGE_SECS: u64 = 300;
