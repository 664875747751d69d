//! # Query Client
//!
//! Cache-aside read model for the three entity collections.
//!
//! ## Read Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fetch("products", fetcher)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  entry fresh? ──yes──► QueryState::success(cached)     (no request)     │
//! │       │ no (missing, older than 60 s, or invalidated)                   │
//! │       ▼                                                                 │
//! │  fetcher().await ──ok──► store entry, QueryState::success(new)          │
//! │       │                                                                 │
//! │       └──err──► QueryState::failure(message, previous data if any)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! Entries live in a `std::sync::Mutex`. The lock is taken only to read or
//! write an entry and is never held across an `.await`.
//!
//! Every key carries a generation that `invalidate` bumps. A read records
//! the generation before it awaits its fetcher; if the key was invalidated
//! in the meantime, the rows it brings back are stored already stale, so a
//! write that landed mid-read is picked up by the next read.
//! ```text
//! read A: gen=0 ── fetcher().await ─────────────────► store(gen 0 ≠ 1) → stale
//! mutation:           insert ── invalidate (gen=1)
//! read B:                                              miss → refetch
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::error::AppError;

/// How long a fetched collection is served without a refetch.
pub const STALE_TIME: Duration = Duration::from_secs(cellparts_core::STALE_TIME_SECS);

// =============================================================================
// Query State
// =============================================================================

/// What a page sees of one cached collection.
#[derive(Debug, Clone)]
pub struct QueryState<T> {
    pub data: Option<Arc<Vec<T>>>,
    pub is_loading: bool,
    pub is_error: bool,
    pub error: Option<String>,
}

impl<T> QueryState<T> {
    /// Before the first response arrives.
    pub fn loading() -> Self {
        QueryState {
            data: None,
            is_loading: true,
            is_error: false,
            error: None,
        }
    }

    pub fn success(data: Arc<Vec<T>>) -> Self {
        QueryState {
            data: Some(data),
            is_loading: false,
            is_error: false,
            error: None,
        }
    }

    /// A failed fetch. Previously cached data stays visible.
    pub fn failure(message: impl Into<String>, previous: Option<Arc<Vec<T>>>) -> Self {
        QueryState {
            data: previous,
            is_loading: false,
            is_error: true,
            error: Some(message.into()),
        }
    }

    /// The rows, or an empty slice while loading / after a first failure.
    pub fn items(&self) -> &[T] {
        self.data.as_deref().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Loaded successfully and there is nothing to show.
    pub fn is_empty(&self) -> bool {
        !self.is_loading && !self.is_error && self.items().is_empty()
    }
}

// =============================================================================
// Query Client
// =============================================================================

struct CacheEntry {
    data: Arc<dyn Any + Send + Sync>,
    fetched_at: Instant,
    invalidated: bool,
}

#[derive(Default)]
struct Cache {
    entries: HashMap<String, CacheEntry>,
    generations: HashMap<String, u64>,
}

impl Cache {
    fn generation(&self, key: &str) -> u64 {
        self.generations.get(key).copied().unwrap_or(0)
    }
}

/// Keyed cache of fetched collections.
pub struct QueryClient {
    cache: Mutex<Cache>,
    stale_time: Duration,
}

impl std::fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryClient")
            .field("keys", &self.lock().entries.keys().cloned().collect::<Vec<_>>())
            .field("stale_time", &self.stale_time)
            .finish()
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        QueryClient::new()
    }
}

impl QueryClient {
    /// Client with the standard 60 s staleness window.
    pub fn new() -> Self {
        QueryClient::with_stale_time(STALE_TIME)
    }

    pub fn with_stale_time(stale_time: Duration) -> Self {
        QueryClient {
            cache: Mutex::new(Cache::default()),
            stale_time,
        }
    }

    // A poisoned lock only means a panic elsewhere; the maps are intact.
    fn lock(&self) -> MutexGuard<'_, Cache> {
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Cached data for `key`, fresh or not.
    pub fn get_cached<T: Send + Sync + 'static>(&self, key: &str) -> Option<Arc<Vec<T>>> {
        let cache = self.lock();
        let entry = cache.entries.get(key)?;
        Arc::downcast::<Vec<T>>(entry.data.clone()).ok()
    }

    /// Cached data for `key` if it is still fresh.
    pub fn get_fresh<T: Send + Sync + 'static>(&self, key: &str) -> Option<Arc<Vec<T>>> {
        let cache = self.lock();
        let entry = cache.entries.get(key)?;
        if entry.invalidated || entry.fetched_at.elapsed() >= self.stale_time {
            return None;
        }
        Arc::downcast::<Vec<T>>(entry.data.clone()).ok()
    }

    /// Stores a freshly fetched collection.
    pub fn set<T: Send + Sync + 'static>(&self, key: &str, data: Arc<Vec<T>>) {
        self.lock().entries.insert(
            key.to_string(),
            CacheEntry {
                data,
                fetched_at: Instant::now(),
                invalidated: false,
            },
        );
    }

    /// Stores rows fetched while `key` was at `generation`.
    ///
    /// When `key` has been invalidated since, the rows are kept for display
    /// but marked stale.
    fn store_fetched<T: Send + Sync + 'static>(
        &self,
        key: &str,
        data: Arc<Vec<T>>,
        generation: u64,
    ) {
        let mut cache = self.lock();
        let invalidated = cache.generation(key) != generation;
        if invalidated {
            debug!(key, "Query invalidated during fetch, storing as stale");
        }
        cache.entries.insert(
            key.to_string(),
            CacheEntry {
                data,
                fetched_at: Instant::now(),
                invalidated,
            },
        );
    }

    /// Marks `key` stale; the next read refetches. Cached data stays
    /// available to show while that happens. Reads already in flight for
    /// `key` store their result as stale.
    pub fn invalidate(&self, key: &str) {
        let mut cache = self.lock();
        *cache.generations.entry(key.to_string()).or_insert(0) += 1;
        if let Some(entry) = cache.entries.get_mut(key) {
            debug!(key, "Invalidating query");
            entry.invalidated = true;
        }
    }

    /// Whether a read of `key` would go to the backend.
    pub fn is_stale(&self, key: &str) -> bool {
        match self.lock().entries.get(key) {
            Some(entry) => entry.invalidated || entry.fetched_at.elapsed() >= self.stale_time,
            None => true,
        }
    }

    /// Serves `key` from cache when fresh, otherwise runs `fetcher`.
    ///
    /// Failures are not retried.
    pub async fn fetch<T, F, Fut>(&self, key: &str, fetcher: F) -> QueryState<T>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, AppError>>,
    {
        if let Some(data) = self.get_fresh::<T>(key) {
            debug!(key, "Query cache hit");
            return QueryState::success(data);
        }

        debug!(key, "Query cache miss, fetching");
        let generation = self.lock().generation(key);
        match fetcher().await {
            Ok(rows) => {
                let data = Arc::new(rows);
                self.store_fetched(key, data.clone(), generation);
                QueryState::success(data)
            }
            Err(err) => {
                let message = err
                    .user_message()
                    .unwrap_or_else(|| "Não foi possível carregar os dados.".to_string());
                warn!(key, error = %err, "Query failed");
                QueryState::failure(message, self.get_cached::<T>(key))
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use cellparts_data::DataError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn read(client: &QueryClient, calls: &AtomicUsize) -> QueryState<i32> {
        client
            .fetch("numbers", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec![1, 2, 3])
            })
            .await
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_entry_served_without_fetch() {
        let client = QueryClient::new();
        let calls = AtomicUsize::new(0);

        read(&client, &calls).await;
        tokio::time::advance(Duration::from_secs(59)).await;
        let state = read(&client, &calls).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.items(), &[1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_entry_refetches() {
        let client = QueryClient::new();
        let calls = AtomicUsize::new(0);

        read(&client, &calls).await;
        tokio::time::advance(Duration::from_secs(60)).await;
        read(&client, &calls).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let client = QueryClient::new();
        let calls = AtomicUsize::new(0);

        read(&client, &calls).await;
        assert!(!client.is_stale("numbers"));
        client.invalidate("numbers");
        assert!(client.is_stale("numbers"));
        read(&client, &calls).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(!client.is_stale("numbers"));
    }

    #[tokio::test]
    async fn test_invalidate_during_fetch_is_not_lost() {
        let client = QueryClient::new();
        let calls = AtomicUsize::new(0);
        let (release, parked) = tokio::sync::oneshot::channel::<()>();

        let in_flight = client.fetch("numbers", || async move {
            let _ = parked.await;
            Ok(vec![0])
        });
        let writer = async {
            tokio::task::yield_now().await;
            client.invalidate("numbers");
            let _ = release.send(());
        };
        let (first, ()) = tokio::join!(in_flight, writer);

        assert_eq!(first.items(), &[0]);
        assert!(client.is_stale("numbers"));
        assert_eq!(client.get_cached::<i32>("numbers").as_deref(), Some(&vec![0]));

        let second = read(&client, &calls).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(second.items(), &[1, 2, 3]);
        assert!(!client.is_stale("numbers"));
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_data() {
        let client = QueryClient::new();
        client.set("numbers", Arc::new(vec![7]));
        client.invalidate("numbers");

        let state: QueryState<i32> = client
            .fetch("numbers", || async {
                Err(AppError::from(DataError::Api {
                    status: 500,
                    message: "upstream down".into(),
                }))
            })
            .await;

        assert!(state.is_error);
        assert_eq!(state.error.as_deref(), Some("upstream down"));
        assert_eq!(state.items(), &[7]);
    }

    #[tokio::test]
    async fn test_first_failure_without_server_message() {
        let client = QueryClient::new();
        let state: QueryState<i32> = client
            .fetch("numbers", || async {
                Err(AppError::from(DataError::Request("reset".into())))
            })
            .await;

        assert!(state.is_error);
        assert!(state.data.is_none());
        assert_eq!(
            state.error.as_deref(),
            Some("Não foi possível carregar os dados.")
        );
    }

    #[test]
    fn test_state_helpers() {
        let loading: QueryState<i32> = QueryState::loading();
        assert!(loading.is_loading);
        assert!(!loading.is_empty());

        let empty: QueryState<i32> = QueryState::success(Arc::new(Vec::new()));
        assert!(empty.is_empty());
    }
}
