//! In-memory request cache with per-key request de-duplication.
//!
//! # Design
//! Each key maps to a `OnceCell` holding the outcome of one fetch. The first
//! caller for a key drives the fetch; concurrent callers await the same cell
//! and observe the same outcome, so N consumers mounted together cost one
//! request. Successful values stay cached for the life of the cache and are
//! never marked stale.
//!
//! A failed outcome stays visible to `peek` until the next `get_or_fetch`
//! for that key, which replaces the cell and starts a fresh attempt. Nothing
//! retries on its own.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::error::FetchError;

type Shared = Arc<dyn Any + Send + Sync>;
type Slot = Arc<OnceCell<Result<Shared, FetchError>>>;

/// Stable identifier of a cached query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(String);

impl QueryKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the cache currently knows about a key, without fetching.
#[derive(Debug)]
pub enum CacheLookup<T> {
    Missing,
    Pending,
    Ready(Arc<T>),
    Failed(FetchError),
}

/// Shared request cache. Cloning yields another handle to the same entries.
#[derive(Clone, Default)]
pub struct QueryCache {
    entries: Arc<Mutex<HashMap<QueryKey, Slot>>>,
}

impl fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCache")
            .field("keys", &self.lock().len())
            .finish()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, or run `fetch` to produce it.
    ///
    /// At most one `fetch` runs per key at a time; callers arriving while it
    /// is in flight wait for its outcome instead of issuing their own.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: &QueryKey, fetch: F) -> Result<Arc<T>, FetchError>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let slot = self.slot(key);
        if slot.initialized() {
            debug!(%key, "cache hit");
        }
        let outcome = slot
            .get_or_init(|| async {
                match fetch().await {
                    Ok(value) => {
                        info!(%key, "cache filled");
                        Ok(Arc::new(value) as Shared)
                    }
                    Err(err) => {
                        warn!(%key, error = %err, "fetch failed");
                        Err(err)
                    }
                }
            })
            .await
            .clone();
        downcast(key, outcome?)
    }

    /// Inspect `key` without triggering a fetch.
    pub fn peek<T: Send + Sync + 'static>(&self, key: &QueryKey) -> CacheLookup<T> {
        let Some(slot) = self.lock().get(key).cloned() else {
            return CacheLookup::Missing;
        };
        match slot.get() {
            None => CacheLookup::Pending,
            Some(Ok(value)) => match downcast(key, value.clone()) {
                Ok(value) => CacheLookup::Ready(value),
                Err(err) => CacheLookup::Failed(err),
            },
            Some(Err(err)) => CacheLookup::Failed(err.clone()),
        }
    }

    /// Slot for `key`, replacing one that holds a failure so a new query
    /// gets a fresh attempt.
    fn slot(&self, key: &QueryKey) -> Slot {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(slot) if !matches!(slot.get(), Some(Err(_))) => slot.clone(),
            _ => {
                let slot: Slot = Arc::new(OnceCell::new());
                entries.insert(key.clone(), slot.clone());
                slot
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QueryKey, Slot>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn downcast<T: Send + Sync + 'static>(key: &QueryKey, value: Shared) -> Result<Arc<T>, FetchError> {
    value
        .downcast::<T>()
        .map_err(|_| FetchError::Decode(format!("cached value for {key} has a different type")))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn second_call_is_served_from_cache() {
        let cache = QueryCache::new();
        let key = QueryKey::new("todosData");
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        for _ in 0..2 {
            let value = cache
                .get_or_fetch(&key, move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, FetchError>(vec![1, 2, 3])
                })
                .await
                .unwrap();
            assert_eq!(*value, vec![1, 2, 3]);
        }
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_share_one_fetch() {
        let cache = QueryCache::new();
        let key = QueryKey::new("todosData");
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let fetch = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok::<_, FetchError>("todos".to_string())
        };

        let (a, b) = tokio::join!(cache.get_or_fetch(&key, fetch), cache.get_or_fetch(&key, fetch));
        assert_eq!(*a.unwrap(), "todos");
        assert_eq!(*b.unwrap(), "todos");
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn peek_reports_pending_while_in_flight() {
        let cache = QueryCache::new();
        let key = QueryKey::new("postsData");
        assert!(matches!(cache.peek::<u8>(&key), CacheLookup::Missing));

        let fetching = cache.get_or_fetch(&key, || async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok::<_, FetchError>(7u8)
        });
        let observe = async {
            tokio::task::yield_now().await;
            assert!(matches!(cache.peek::<u8>(&key), CacheLookup::Pending));
        };
        let (value, ()) = tokio::join!(fetching, observe);
        assert_eq!(*value.unwrap(), 7);
        assert!(matches!(cache.peek::<u8>(&key), CacheLookup::Ready(v) if *v == 7));
    }

    #[tokio::test]
    async fn failure_is_visible_then_retried_by_next_query() {
        let cache = QueryCache::new();
        let key = QueryKey::new("albumsData");

        let err = cache
            .get_or_fetch(&key, || async { Err::<u8, _>(FetchError::Status { status: 500 }) })
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::Status { status: 500 });
        assert!(matches!(cache.peek::<u8>(&key), CacheLookup::Failed(_)));

        let value = cache
            .get_or_fetch(&key, || async { Ok::<_, FetchError>(1u8) })
            .await
            .unwrap();
        assert_eq!(*value, 1);
    }

    #[tokio::test]
    async fn type_mismatch_is_reported_not_panicked() {
        let cache = QueryCache::new();
        let key = QueryKey::new("usersData");
        cache
            .get_or_fetch(&key, || async { Ok::<_, FetchError>(1u8) })
            .await
            .unwrap();
        assert!(matches!(cache.peek::<String>(&key), CacheLookup::Failed(FetchError::Decode(_))));
    }
}
