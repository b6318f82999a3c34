//! Cache entries and the snapshots subscribers see

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;

use super::Fetcher;
use crate::error::QueryError;
use crate::tags::Tag;

static UNKEYED: AtomicU64 = AtomicU64::new(0);

/// Identity of a cached query: endpoint name plus serialized argument
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// `getZones(null)`, `getShops({"status":"pending",...})`
    ///
    /// An argument that cannot be serialized gets a key of its own, so two
    /// such calls never share an entry.
    pub fn new<A: Serialize + ?Sized>(endpoint: &str, arg: &A) -> Self {
        match serde_json::to_string(arg) {
            Ok(arg) => Self(format!("{endpoint}({arg})")),
            Err(e) => {
                let n = UNKEYED.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(endpoint, error = %e, "query argument is not serializable, result will not be shared");
                Self(format!("{endpoint}(#unkeyed-{n})"))
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of a cached query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Uninitialized,
    /// A request is in flight (previous data, if any, is kept)
    Pending,
    Fulfilled,
    Rejected,
}

/// What subscribers observe
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySnapshot {
    pub status: QueryStatus,
    /// Last successful result
    pub data: Option<Value>,
    /// Error of the last attempt, if it failed
    pub error: Option<QueryError>,
    /// Invalidated and waiting for a refetch
    pub is_stale: bool,
}

impl QuerySnapshot {
    pub fn is_settled(&self) -> bool {
        matches!(self.status, QueryStatus::Fulfilled | QueryStatus::Rejected)
    }
}

impl Default for QuerySnapshot {
    fn default() -> Self {
        Self {
            status: QueryStatus::Uninitialized,
            data: None,
            error: None,
            is_stale: false,
        }
    }
}

/// Identity of one incarnation of an entry.
///
/// A key can be dropped (reset, eviction) and created again; subscriptions
/// remember the incarnation they joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(pub(super) u64);

pub(super) struct Entry {
    pub id: EntryId,
    pub status: QueryStatus,
    pub data: Option<Value>,
    pub error: Option<QueryError>,
    pub stale: bool,
    pub subscribers: usize,
    pub provides: Vec<Tag>,
    /// Request id whose result will be accepted
    pub in_flight: Option<u64>,
    /// Bumped on every subscribe/unsubscribe; an eviction timer only fires
    /// if the generation it captured is still current
    pub idle_generation: u64,
    pub fetcher: Fetcher,
    pub tx: watch::Sender<QuerySnapshot>,
}

impl Entry {
    pub fn new(id: EntryId, fetcher: Fetcher) -> Self {
        let (tx, _) = watch::channel(QuerySnapshot::default());
        Self {
            id,
            status: QueryStatus::Uninitialized,
            data: None,
            error: None,
            stale: false,
            subscribers: 0,
            provides: Vec::new(),
            in_flight: None,
            idle_generation: 0,
            fetcher,
            tx,
        }
    }

    pub fn snapshot(&self) -> QuerySnapshot {
        QuerySnapshot {
            status: self.status,
            data: self.data.clone(),
            error: self.error.clone(),
            is_stale: self.stale,
        }
    }

    /// Push the current state to every subscriber
    pub fn publish(&self) {
        self.tx.send_replace(self.snapshot());
    }

    pub fn needs_fetch(&self) -> bool {
        self.in_flight.is_none()
            && (self.stale
                || matches!(
                    self.status,
                    QueryStatus::Uninitialized | QueryStatus::Rejected
                ))
    }

    /// Status to fall back to when an in-flight request is abandoned
    pub fn settled_status(&self) -> QueryStatus {
        if self.error.is_some() {
            QueryStatus::Rejected
        } else if self.data.is_some() {
            QueryStatus::Fulfilled
        } else {
            QueryStatus::Uninitialized
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.id.0)
            .field("status", &self.status)
            .field("stale", &self.stale)
            .field("subscribers", &self.subscribers)
            .field("provides", &self.provides)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}
