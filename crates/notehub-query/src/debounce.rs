//! Settle-window debouncing for the search input.
//!
//! Every keystroke calls [`Debouncer::submit`]; only after the settle
//! window passes with no further submission does the value commit. Commits
//! arrive on an internal channel and are collected with
//! [`Debouncer::poll_committed`], which keeps the consumer loop free of
//! timer bookkeeping.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use notehub_core::defaults::SEARCH_DEBOUNCE_MS;

struct Scheduled {
    value: String,
    generation: u64,
    handle: JoinHandle<()>,
}

/// Delays search commits until input settles.
///
/// Each `submit` aborts the previously scheduled commit and schedules a new
/// one, so a burst of keystrokes yields at most one commit. Commits carry a
/// generation stamp; a stale send that slips past an abort is filtered out
/// in [`Debouncer::poll_committed`], never delivered.
pub struct Debouncer {
    settle: Duration,
    generation: u64,
    scheduled: Option<Scheduled>,
    tx: mpsc::UnboundedSender<(u64, String)>,
    rx: mpsc::UnboundedReceiver<(u64, String)>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::with_settle(Duration::from_millis(SEARCH_DEBOUNCE_MS))
    }

    pub fn with_settle(settle: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            settle,
            generation: 0,
            scheduled: None,
            tx,
            rx,
        }
    }

    /// Schedule `value` to commit after the settle window.
    ///
    /// Cancels whatever was scheduled before, so only the latest value of a
    /// burst ever commits.
    pub fn submit(&mut self, value: &str) {
        if let Some(prev) = self.scheduled.take() {
            prev.handle.abort();
        }
        self.generation += 1;
        let generation = self.generation;
        let owned = value.to_string();
        let sent = owned.clone();
        let tx = self.tx.clone();
        let settle = self.settle;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(settle).await;
            let _ = tx.send((generation, sent));
        });
        self.scheduled = Some(Scheduled {
            value: owned,
            generation,
            handle,
        });
    }

    /// Commit the scheduled value immediately, if any.
    ///
    /// Used when the user presses Enter: the settle window is skipped and
    /// the pending value is returned for an immediate search.
    pub fn flush(&mut self) -> Option<String> {
        let scheduled = self.scheduled.take()?;
        scheduled.handle.abort();
        debug!(search_term = %scheduled.value, "Flushing debounced search");
        Some(scheduled.value)
    }

    /// Collect the commit whose settle window has elapsed, if any.
    ///
    /// Drains stale sends from cancelled schedules along the way.
    pub fn poll_committed(&mut self) -> Option<String> {
        while let Ok((generation, value)) = self.rx.try_recv() {
            let live = self
                .scheduled
                .as_ref()
                .is_some_and(|s| s.generation == generation);
            if live {
                self.scheduled = None;
                debug!(search_term = %value, "Search input settled");
                return Some(value);
            }
        }
        None
    }

    /// True while a submission is waiting out its settle window.
    pub fn is_pending(&self) -> bool {
        self.scheduled.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(scheduled) = self.scheduled.take() {
            scheduled.handle.abort();
        }
    }
}
