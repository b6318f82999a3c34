//! Query cache with tag-based invalidation
//!
//! State is a map of cache entries plus an index from every provided tag to
//! the entries that provided it.
//!
//! - Subscribing to a fulfilled, fresh entry costs no request.
//! - A missing, stale or failed entry is fetched; concurrent subscribers of
//!   a pending entry share the request.
//! - [`QueryCache::invalidate`] marks every entry registered under a
//!   matching tag stale. Entries with subscribers are refetched right away,
//!   the rest on their next subscription.
//! - An entry whose last subscriber leaves is evicted once
//!   `keep_unused_for` elapses without a new subscriber.
//! - A result arriving for an evicted, reset or superseded request is
//!   discarded.
//! - A failed refetch keeps the data and tags of the last success, so the
//!   entry still reacts to invalidation.
//!
//! The lock is never held across an `.await`; fetches run on spawned tasks,
//! so subscribing requires a Tokio runtime.

mod entry;
mod subscription;

pub use entry::{CacheKey, EntryId, QuerySnapshot, QueryStatus};
pub use subscription::{QueryResult, QuerySubscription};

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, Weak};
use std::time::Duration;

use futures::future::BoxFuture;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::watch;

use crate::error::QueryError;
use crate::tags::Tag;
use entry::Entry;

/// Successful fetch: raw data plus the tags it provides
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    pub data: Value,
    pub provides: Vec<Tag>,
}

pub type FetchOutcome = Result<Fetched, QueryError>;

/// Type-erased fetch, re-run on every refetch of an entry
pub type Fetcher = Arc<dyn Fn() -> BoxFuture<'static, FetchOutcome> + Send + Sync>;

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<CacheKey, Entry>,
    tag_index: HashMap<Tag, HashSet<CacheKey>>,
    next_request_id: u64,
    next_entry_id: u64,
}

impl CacheState {
    /// Mark the entry pending under a fresh request id (superseding any
    /// request already in flight)
    fn begin_fetch(&mut self, key: &CacheKey) -> Option<(u64, Fetcher)> {
        let request_id = self.next_request_id;
        let entry = self.entries.get_mut(key)?;
        self.next_request_id += 1;
        entry.in_flight = Some(request_id);
        entry.status = QueryStatus::Pending;
        entry.publish();
        Some((request_id, entry.fetcher.clone()))
    }

    fn entry_mut(&mut self, key: &CacheKey, id: EntryId) -> Option<&mut Entry> {
        self.entries.get_mut(key).filter(|e| e.id == id)
    }

    fn unregister(&mut self, key: &CacheKey) {
        let Some(entry) = self.entries.get_mut(key) else {
            return;
        };
        for tag in std::mem::take(&mut entry.provides) {
            if let Some(keys) = self.tag_index.get_mut(&tag) {
                keys.remove(key);
                if keys.is_empty() {
                    self.tag_index.remove(&tag);
                }
            }
        }
    }

    fn register(&mut self, key: &CacheKey, tags: Vec<Tag>) {
        self.unregister(key);
        let Some(entry) = self.entries.get_mut(key) else {
            return;
        };
        for tag in &tags {
            self.tag_index
                .entry(*tag)
                .or_default()
                .insert(key.clone());
        }
        entry.provides = tags;
    }

    fn matching_keys(&self, invalidated: &[Tag]) -> BTreeSet<CacheKey> {
        self.tag_index
            .iter()
            .filter(|(provided, _)| invalidated.iter().any(|tag| tag.matches(provided)))
            .flat_map(|(_, keys)| keys.iter().cloned())
            .collect()
    }
}

#[derive(Debug)]
struct CacheInner {
    state: Mutex<CacheState>,
    keep_unused_for: Duration,
}

/// Shared query cache (cheap to clone)
#[derive(Debug, Clone)]
pub struct QueryCache {
    inner: Arc<CacheInner>,
}

/// Handle that does not keep the cache alive
#[derive(Debug, Clone)]
pub struct WeakQueryCache {
    inner: Weak<CacheInner>,
}

impl WeakQueryCache {
    pub fn upgrade(&self) -> Option<QueryCache> {
        self.inner.upgrade().map(|inner| QueryCache { inner })
    }
}

impl QueryCache {
    pub fn new(keep_unused_for: Duration) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                state: Mutex::new(CacheState::default()),
                keep_unused_for,
            }),
        }
    }

    pub fn keep_unused_for(&self) -> Duration {
        self.inner.keep_unused_for
    }

    pub fn downgrade(&self) -> WeakQueryCache {
        WeakQueryCache {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Add a subscriber to `key`, creating the entry with `fetcher` if needed,
    /// and fetch if the entry has no usable data.
    ///
    /// Every call must be paired with [`QueryCache::unsubscribe`] for the
    /// returned entry; [`QuerySubscription`] does this on drop.
    pub fn subscribe(
        &self,
        key: CacheKey,
        fetcher: Fetcher,
    ) -> (EntryId, watch::Receiver<QuerySnapshot>) {
        let (id, rx, fetch) = {
            let mut state = self.inner.state.lock();
            let next_id = EntryId(state.next_entry_id);
            let entry = state
                .entries
                .entry(key.clone())
                .or_insert_with(|| Entry::new(next_id, fetcher));
            let id = entry.id;
            entry.subscribers += 1;
            entry.idle_generation += 1;
            let rx = entry.tx.subscribe();

            let fetch = if entry.needs_fetch() {
                tracing::debug!(%key, stale = entry.stale, status = ?entry.status, "cache miss");
                state.begin_fetch(&key)
            } else {
                tracing::debug!(%key, status = ?entry.status, "cache hit");
                None
            };
            if id == next_id {
                state.next_entry_id += 1;
            }
            (id, rx, fetch)
        };

        if let Some((request_id, fetcher)) = fetch {
            self.spawn_fetch(key, request_id, fetcher);
        }
        (id, rx)
    }

    /// Remove a subscriber of entry `id`. The last one out cancels interest
    /// in any in-flight request and starts the eviction timer.
    ///
    /// A subscription that outlived its entry (reset, then the key was
    /// subscribed again) is ignored.
    pub fn unsubscribe(&self, key: &CacheKey, id: EntryId) {
        let generation = {
            let mut state = self.inner.state.lock();
            let Some(entry) = state.entry_mut(key, id) else {
                tracing::trace!(%key, "subscription outlived its entry");
                return;
            };
            entry.subscribers = entry.subscribers.saturating_sub(1);
            if entry.subscribers > 0 {
                return;
            }
            entry.idle_generation += 1;
            if entry.in_flight.take().is_some() {
                tracing::debug!(%key, "no subscribers left, in-flight result will be discarded");
                entry.status = entry.settled_status();
                entry.publish();
            }
            entry.idle_generation
        };
        self.schedule_eviction(key.clone(), generation);
    }

    /// Mark entries provided under any of `tags` stale and refetch the
    /// subscribed ones. Returns the number of refetches started.
    pub fn invalidate(&self, tags: &[Tag]) -> usize {
        if tags.is_empty() {
            return 0;
        }

        let fetches = {
            let mut state = self.inner.state.lock();
            let mut fetches = Vec::new();
            for key in state.matching_keys(tags) {
                let Some(entry) = state.entries.get_mut(&key) else {
                    continue;
                };
                entry.stale = true;
                if entry.subscribers == 0 {
                    tracing::debug!(%key, "marked stale, refetch deferred until subscribed");
                    entry.publish();
                    continue;
                }
                if let Some(fetch) = state.begin_fetch(&key) {
                    tracing::debug!(%key, "marked stale, refetching");
                    fetches.push((key, fetch));
                }
            }
            fetches
        };

        let started = fetches.len();
        tracing::debug!(tags = ?tags, refetching = started, "tags invalidated");
        for (key, (request_id, fetcher)) in fetches {
            self.spawn_fetch(key, request_id, fetcher);
        }
        started
    }

    /// Force a refetch of one entry (deferred if it has no subscribers)
    pub fn refetch(&self, key: &CacheKey) {
        let fetch = {
            let mut state = self.inner.state.lock();
            let Some(entry) = state.entries.get_mut(key) else {
                return;
            };
            entry.stale = true;
            if entry.subscribers == 0 {
                entry.publish();
                None
            } else {
                state.begin_fetch(key)
            }
        };
        if let Some((request_id, fetcher)) = fetch {
            self.spawn_fetch(key.clone(), request_id, fetcher);
        }
    }

    /// Drop every entry; in-flight results are discarded
    pub fn reset(&self) {
        self.clear(None);
    }

    /// Drop every entry and fail the requests in flight with `error`.
    ///
    /// Subscribers waiting on a request settle on the error instead of an
    /// empty entry.
    pub fn reset_with_error(&self, error: QueryError) {
        self.clear(Some(error));
    }

    fn clear(&self, in_flight_error: Option<QueryError>) {
        let entries = {
            let mut state = self.inner.state.lock();
            state.tag_index.clear();
            std::mem::take(&mut state.entries)
        };
        tracing::debug!(entries = entries.len(), "cache reset");
        for entry in entries.values() {
            let last = match (&in_flight_error, entry.in_flight) {
                (Some(error), Some(_)) => QuerySnapshot {
                    status: QueryStatus::Rejected,
                    data: None,
                    error: Some(error.clone()),
                    is_stale: false,
                },
                _ => QuerySnapshot::default(),
            };
            entry.tx.send_replace(last);
        }
    }

    pub fn snapshot(&self, key: &CacheKey) -> Option<QuerySnapshot> {
        self.inner
            .state
            .lock()
            .entries
            .get(key)
            .map(Entry::snapshot)
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.inner.state.lock().entries.contains_key(key)
    }

    pub fn subscriber_count(&self, key: &CacheKey) -> usize {
        self.inner
            .state
            .lock()
            .entries
            .get(key)
            .map_or(0, |e| e.subscribers)
    }

    /// Tags the entry registered with its last successful fetch
    pub fn provided_tags(&self, key: &CacheKey) -> Vec<Tag> {
        self.inner
            .state
            .lock()
            .entries
            .get(key)
            .map(|e| e.provides.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.inner.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn spawn_fetch(&self, key: CacheKey, request_id: u64, fetcher: Fetcher) {
        let cache = self.clone();
        tokio::spawn(async move {
            let outcome = fetcher().await;
            cache.complete(&key, request_id, outcome);
        });
    }

    fn complete(&self, key: &CacheKey, request_id: u64, outcome: FetchOutcome) {
        let mut state = self.inner.state.lock();
        let accepted = state
            .entries
            .get(key)
            .is_some_and(|e| e.in_flight == Some(request_id));
        if !accepted {
            tracing::debug!(%key, request_id, "discarding result nobody is waiting for");
            return;
        }

        let result = match outcome {
            Ok(fetched) => {
                state.register(key, fetched.provides);
                Ok(fetched.data)
            }
            // Registrations of the data still shown stay in place
            Err(e) => Err(e),
        };

        let Some(entry) = state.entries.get_mut(key) else {
            return;
        };
        entry.in_flight = None;
        entry.stale = false;
        match result {
            Ok(data) => {
                entry.status = QueryStatus::Fulfilled;
                entry.data = Some(data);
                entry.error = None;
            }
            Err(error) => {
                tracing::debug!(%key, error = %error, "query failed");
                entry.status = QueryStatus::Rejected;
                entry.error = Some(error);
            }
        }
        entry.publish();
    }

    fn schedule_eviction(&self, key: CacheKey, generation: u64) {
        let keep = self.inner.keep_unused_for;
        if keep.is_zero() {
            self.evict_if_idle(&key, generation);
            return;
        }
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let cache = self.clone();
                handle.spawn(async move {
                    tokio::time::sleep(keep).await;
                    cache.evict_if_idle(&key, generation);
                });
            }
            Err(_) => {
                tracing::debug!(%key, "no runtime for the eviction timer, entry kept until reset");
            }
        }
    }

    fn evict_if_idle(&self, key: &CacheKey, generation: u64) -> bool {
        let mut state = self.inner.state.lock();
        let idle = state
            .entries
            .get(key)
            .is_some_and(|e| e.subscribers == 0 && e.idle_generation == generation);
        if idle {
            state.unregister(key);
            state.entries.remove(key);
            tracing::debug!(%key, "evicted unused query");
        }
        idle
    }
}
