//! Shared query cache for note list pages.
//!
//! The [`QueryClient`] owns every cached list query. Fetches for the same
//! key coalesce into one service call, invalidation marks entries stale and
//! refetches the observed ones, and completed fetches that an invalidation
//! overtook are discarded instead of overwriting newer state. Presentation
//! code only ever reads [`QuerySnapshot`]s; the cache is the single writer.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use notehub_core::defaults::EVENT_CAPACITY;
use notehub_core::{Error, NoteService, NotesPage};

use crate::events::QueryEvent;
use crate::key::QueryKey;

/// Resolution state of a cached query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// No resolved result yet for the current generation.
    Pending,
    /// Last fetch succeeded; `data` holds the page.
    Success,
    /// Last fetch failed; `error` holds the failure.
    Error,
}

/// Immutable view of one query, as seen at a single point in time.
#[derive(Debug, Clone)]
pub struct QuerySnapshot {
    pub key: QueryKey,
    pub status: QueryStatus,
    /// Page data: the entry's own result, or borrowed placeholder data
    /// when `is_placeholder` is set.
    pub data: Option<Arc<NotesPage>>,
    /// True when `data` was borrowed from the most recent successful query
    /// because this key has not resolved yet.
    pub is_placeholder: bool,
    /// True when the entry was invalidated and a refetch has not landed.
    pub is_stale: bool,
    pub error: Option<Arc<Error>>,
    /// When the entry's own data was last refreshed.
    pub updated_at: Option<DateTime<Utc>>,
}

impl QuerySnapshot {
    /// True when there is nothing to render yet, not even placeholder data.
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Pending && self.data.is_none()
    }
}

struct Inflight {
    /// Identity of the task driving this fetch; only the owning task may
    /// clear the marker.
    lead_id: u64,
    done: watch::Receiver<bool>,
}

struct Entry {
    status: QueryStatus,
    data: Option<Arc<NotesPage>>,
    error: Option<Arc<Error>>,
    updated_at: Option<DateTime<Utc>>,
    stale: bool,
    /// Generation stamp; a fetch result applies only when the entry still
    /// carries the epoch the fetch started under.
    epoch: u64,
    observers: usize,
    inflight: Option<Inflight>,
}

impl Entry {
    fn new(epoch: u64) -> Self {
        Self {
            status: QueryStatus::Pending,
            data: None,
            error: None,
            updated_at: None,
            stale: false,
            epoch,
            observers: 0,
            inflight: None,
        }
    }
}

struct CacheState {
    entries: HashMap<QueryKey, Entry>,
    /// Most recent successful page anywhere in the cache, kept as
    /// placeholder data for keys that have not resolved yet.
    last_success: Option<(QueryKey, Arc<NotesPage>)>,
}

struct Inner {
    service: Arc<dyn NoteService>,
    state: Mutex<CacheState>,
    events: broadcast::Sender<QueryEvent>,
    /// Global generation counter, bumped by invalidation.
    epoch: AtomicU64,
    lead_seq: AtomicU64,
}

/// Cheaply clonable handle to the shared query cache.
#[derive(Clone)]
pub struct QueryClient {
    inner: Arc<Inner>,
}

impl QueryClient {
    /// Create a cache backed by the given service.
    pub fn new(service: Arc<dyn NoteService>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                service,
                state: Mutex::new(CacheState {
                    entries: HashMap::new(),
                    last_success: None,
                }),
                events,
                epoch: AtomicU64::new(0),
                lead_seq: AtomicU64::new(0),
            }),
        }
    }

    /// Subscribe to change notifications. Each receiver gets its own
    /// independent stream.
    pub fn subscribe(&self) -> broadcast::Receiver<QueryEvent> {
        self.inner.events.subscribe()
    }

    fn state(&self) -> MutexGuard<'_, CacheState> {
        // A panicked holder cannot leave partial edits behind; every write
        // section completes before the guard drops. Recover the guard.
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn current_epoch(&self) -> u64 {
        self.inner.epoch.load(Ordering::SeqCst)
    }

    fn entry_snapshot(key: &QueryKey, entry: &Entry) -> QuerySnapshot {
        QuerySnapshot {
            key: key.clone(),
            status: entry.status,
            data: entry.data.clone(),
            is_placeholder: false,
            is_stale: entry.stale,
            error: entry.error.clone(),
            updated_at: entry.updated_at,
        }
    }

    /// Current view of a key without awaiting anything.
    ///
    /// A key that has not resolved yet borrows the most recent successful
    /// page (any key) as placeholder data, so callers can keep rendering
    /// content instead of a loading state.
    pub fn snapshot(&self, key: &QueryKey) -> QuerySnapshot {
        let state = self.state();
        if let Some(entry) = state.entries.get(key) {
            if entry.data.is_some() || entry.status == QueryStatus::Error {
                return Self::entry_snapshot(key, entry);
            }
        }

        let placeholder = state.last_success.as_ref().map(|(_, page)| page.clone());
        QuerySnapshot {
            key: key.clone(),
            status: QueryStatus::Pending,
            is_placeholder: placeholder.is_some(),
            data: placeholder,
            is_stale: false,
            error: None,
            updated_at: None,
        }
    }

    /// Await a resolved snapshot for the key.
    ///
    /// A fresh cached success returns immediately with no service call.
    /// Otherwise the call either joins the in-flight fetch for this key or
    /// starts one; concurrent callers observe exactly one service call.
    /// A cached error is retried by a new `fetch`, while the failure of the
    /// fetch this call waited on is returned, not retried.
    pub async fn fetch(&self, key: &QueryKey) -> QuerySnapshot {
        let mut waited = false;
        loop {
            let mut done = {
                let epoch_now = self.current_epoch();
                let mut state = self.state();
                let entry = state
                    .entries
                    .entry(key.clone())
                    .or_insert_with(|| Entry::new(epoch_now));

                if entry.status == QueryStatus::Success && !entry.stale {
                    return Self::entry_snapshot(key, entry);
                }
                if waited
                    && entry.status == QueryStatus::Error
                    && !entry.stale
                    && entry.inflight.is_none()
                {
                    return Self::entry_snapshot(key, entry);
                }

                match &entry.inflight {
                    // A closed channel means the driving task is gone;
                    // take over instead of joining.
                    Some(inflight) if inflight.done.has_changed().is_ok() => {
                        inflight.done.clone()
                    }
                    _ => self.lead_fetch(key, entry),
                }
            };

            let _ = done.changed().await;
            waited = true;
        }
    }

    /// Start a fetch task for the entry and return its completion signal.
    /// Caller holds the state lock.
    fn lead_fetch(&self, key: &QueryKey, entry: &mut Entry) -> watch::Receiver<bool> {
        let lead_id = self.inner.lead_seq.fetch_add(1, Ordering::Relaxed);
        let (done_tx, done_rx) = watch::channel(false);
        entry.inflight = Some(Inflight {
            lead_id,
            done: done_rx.clone(),
        });

        let client = self.clone();
        let fetch_key = key.clone();
        let epoch = entry.epoch;
        tokio::spawn(async move {
            client.drive(fetch_key, epoch, lead_id, done_tx).await;
        });

        done_rx
    }

    /// Perform the service call and apply the outcome, unless the entry
    /// moved to a newer generation in the meantime.
    async fn drive(&self, key: QueryKey, epoch: u64, lead_id: u64, done: watch::Sender<bool>) {
        debug!(query_key = %key, "Fetching notes page");
        let params = key.to_params();
        let started = std::time::Instant::now();
        let result = self.inner.service.list_notes(&params).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        let event = {
            let mut state = self.state();
            match state.entries.get_mut(&key) {
                None => {
                    debug!(query_key = %key, "Dropping fetch result for evicted query");
                    None
                }
                Some(entry) => {
                    if entry
                        .inflight
                        .as_ref()
                        .is_some_and(|inflight| inflight.lead_id == lead_id)
                    {
                        entry.inflight = None;
                    }

                    if entry.epoch != epoch {
                        debug!(query_key = %key, "Discarding superseded fetch result");
                        None
                    } else {
                        match result {
                            Ok(page) => {
                                let page = Arc::new(page);
                                entry.status = QueryStatus::Success;
                                entry.data = Some(page.clone());
                                entry.error = None;
                                entry.stale = false;
                                entry.updated_at = Some(Utc::now());
                                debug!(
                                    query_key = %key,
                                    duration_ms,
                                    result_count = page.notes.len(),
                                    "Notes page cached"
                                );
                                state.last_success = Some((key.clone(), page));
                                Some(QueryEvent::Updated { key: key.clone() })
                            }
                            Err(e) => {
                                warn!(
                                    query_key = %key,
                                    duration_ms,
                                    error = %e,
                                    "Notes fetch failed"
                                );
                                entry.status = QueryStatus::Error;
                                entry.error = Some(Arc::new(e));
                                entry.stale = false;
                                Some(QueryEvent::Failed { key: key.clone() })
                            }
                        }
                    }
                }
            }
        };

        if let Some(event) = event {
            let _ = self.inner.events.send(event);
        }
        let _ = done.send(true);
    }

    /// Fire-and-forget fetch, for event handlers that must not await.
    pub fn spawn_fetch(&self, key: &QueryKey) {
        let client = self.clone();
        let key = key.clone();
        tokio::spawn(async move {
            client.fetch(&key).await;
        });
    }

    /// Register interest in a key. Observed entries survive invalidation
    /// and are refetched eagerly; unobserved ones are dropped and reload
    /// lazily. The guard releases the registration on drop.
    pub fn observe(&self, key: &QueryKey) -> QueryObserver {
        let epoch_now = self.current_epoch();
        let mut state = self.state();
        let entry = state
            .entries
            .entry(key.clone())
            .or_insert_with(|| Entry::new(epoch_now));
        entry.observers += 1;
        QueryObserver {
            client: self.clone(),
            key: key.clone(),
        }
    }

    /// Mark every cached query stale and move to a new generation.
    ///
    /// Unobserved entries are dropped outright. Observed keys keep their
    /// current data for display and get an eager refetch; in-flight results
    /// from the old generation will be discarded when they land.
    pub fn invalidate_all(&self) {
        let new_epoch = self.inner.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let observed: Vec<QueryKey> = {
            let mut state = self.state();
            let mut observed = Vec::new();
            state.entries.retain(|key, entry| {
                if entry.observers == 0 {
                    return false;
                }
                entry.epoch = new_epoch;
                entry.stale = true;
                observed.push(key.clone());
                true
            });
            observed
        };

        info!(observed = observed.len(), "Invalidating note queries");
        let _ = self.inner.events.send(QueryEvent::Invalidated);

        for key in &observed {
            self.spawn_fetch(key);
        }
    }

    /// Drop unobserved entries whose data is older than `max_age`.
    /// Returns the number of evicted entries.
    pub fn evict_unobserved(&self, max_age: Duration) -> usize {
        let now = Utc::now();
        let mut state = self.state();
        let before = state.entries.len();
        state.entries.retain(|_, entry| {
            if entry.observers > 0 || entry.inflight.is_some() {
                return true;
            }
            let age = entry
                .updated_at
                .map(|t| now.signed_duration_since(t).to_std().unwrap_or_default())
                .unwrap_or(max_age);
            age < max_age
        });
        let evicted = before - state.entries.len();
        if evicted > 0 {
            debug!(evicted, "Evicted unobserved cache entries");
        }
        evicted
    }

    /// Number of entries currently cached.
    pub fn entry_count(&self) -> usize {
        self.state().entries.len()
    }
}

/// RAII registration of interest in one query key.
///
/// Created by [`QueryClient::observe`]; dropping it releases the
/// registration.
pub struct QueryObserver {
    client: QueryClient,
    key: QueryKey,
}

impl QueryObserver {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }
}

impl Drop for QueryObserver {
    fn drop(&mut self) {
        let mut state = self.client.state();
        if let Some(entry) = state.entries.get_mut(&self.key) {
            entry.observers = entry.observers.saturating_sub(1);
        }
    }
}
