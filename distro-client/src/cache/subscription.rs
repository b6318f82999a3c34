//! Typed handle on a cache entry

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use tokio::sync::watch;

use super::{CacheKey, EntryId, QueryCache, QuerySnapshot, QueryStatus};
use crate::error::QueryError;

/// Decoded view of a cache entry
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<T> {
    pub status: QueryStatus,
    pub data: Option<T>,
    pub error: Option<QueryError>,
    pub is_stale: bool,
}

impl<T> QueryResult<T> {
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Pending && self.data.is_none()
    }

    pub fn is_fetching(&self) -> bool {
        self.status == QueryStatus::Pending
    }

    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Fulfilled
    }

    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Rejected
    }
}

/// A mounted query. Keeps its entry alive and is notified on every change.
///
/// Dropping the subscription releases the entry, which is evicted after the
/// cache's idle window unless someone subscribes again.
pub struct QuerySubscription<T> {
    key: CacheKey,
    entry: EntryId,
    rx: watch::Receiver<QuerySnapshot>,
    cache: QueryCache,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> QuerySubscription<T> {
    pub(crate) fn new(
        key: CacheKey,
        entry: EntryId,
        rx: watch::Receiver<QuerySnapshot>,
        cache: QueryCache,
    ) -> Self {
        Self {
            key,
            entry,
            rx,
            cache,
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    /// Current state, with the data decoded into `T`
    pub fn current(&self) -> QueryResult<T> {
        let snapshot = self.rx.borrow().clone();
        decode(snapshot)
    }

    /// Wait for the next change of the entry.
    ///
    /// Returns `None` once the entry is gone (cache reset).
    pub async fn changed(&mut self) -> Option<QueryResult<T>> {
        self.rx.changed().await.ok()?;
        Some(self.current())
    }

    /// Wait until no request is in flight and return the result.
    ///
    /// If the cache was reset meanwhile the last observed state is returned.
    pub async fn settled(&mut self) -> QueryResult<T> {
        let settled = self
            .rx
            .wait_for(QuerySnapshot::is_settled)
            .await
            .map(|snapshot| snapshot.clone());
        let snapshot = match settled {
            Ok(snapshot) => snapshot,
            Err(_) => self.rx.borrow().clone(),
        };
        decode(snapshot)
    }

    /// Force a refetch of this query
    pub fn refetch(&self) {
        self.cache.refetch(&self.key);
    }
}

impl<T> Drop for QuerySubscription<T> {
    fn drop(&mut self) {
        self.cache.unsubscribe(&self.key, self.entry);
    }
}

impl<T> std::fmt::Debug for QuerySubscription<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuerySubscription")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

fn decode<T: DeserializeOwned>(snapshot: QuerySnapshot) -> QueryResult<T> {
    let QuerySnapshot {
        status,
        data,
        mut error,
        is_stale,
    } = snapshot;

    let data = match data.map(serde_json::from_value::<T>) {
        Some(Ok(value)) => Some(value),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "cached data does not match the requested type");
            error.get_or_insert_with(|| QueryError::decode(e));
            None
        }
        None => None,
    };

    QueryResult {
        status,
        data,
        error,
        is_stale,
    }
}
