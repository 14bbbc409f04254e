//! Structured logging schema and field name constants for the NoteHub client.
//!
//! All crates use these constants for consistent structured logging fields,
//! so host applications can filter and aggregate by standardized names
//! across every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Operation failed and the failure is surfaced to the user |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Mutation completions, cache invalidation |
//! | DEBUG | Fetch lifecycle, cache decisions, state transitions |
//! | TRACE | Per-event fan-out, render passes |

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "api", "query", "mutation", "ui"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "query_client", "debouncer", "note_form", "modal"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "list_notes", "create_note", "delete_note", "invalidate"
pub const OPERATION: &str = "op";

/// Correlation ID for one mutation attempt (UUIDv4).
pub const MUTATION_ID: &str = "mutation_id";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Note id being operated on.
pub const NOTE_ID: &str = "note_id";

/// Canonical cache key of the query involved.
pub const QUERY_KEY: &str = "query_key";

/// Requested page number.
pub const PAGE: &str = "page";

/// Search term applied to a list request (raw, may be empty).
pub const SEARCH_TERM: &str = "search";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of notes returned by a list request.
pub const RESULT_COUNT: &str = "result_count";

/// HTTP status of a service response.
pub const STATUS: &str = "status";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Install a global tracing subscriber with env-filter support.
///
/// Intended for binaries and demos embedding the client; libraries must not
/// call this. Honors `RUST_LOG`, falling back to `notehub=debug`. Safe to
/// call more than once; later calls are no-ops.
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("notehub=debug"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
