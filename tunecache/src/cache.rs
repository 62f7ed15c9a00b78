//! Generic single-flight cache keyed by string.

use anyhow::{bail, Result};
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::debug;

type Entry = Arc<dyn Any + Send + Sync>;

/// In-memory memoization cache with single-flight population.
///
/// Values of any `Send + Sync + 'static` type can be stored; each key is
/// expected to always be used with the same type. Entries live until the
/// process exits or [`Cache::evict`] is called.
///
/// This type is designed to be shared behind an `Arc<Cache>`.
#[derive(Default)]
pub struct Cache {
    /// Stored entries, type-erased.
    entries: RwLock<HashMap<String, Entry>>,
    /// Population lock, shared by all keys of this instance.
    populate: Mutex<()>,
}

impl Cache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, or compute and store it.
    ///
    /// The fast path takes only a read lock. On a miss, the population mutex
    /// is acquired (cancellable through `token`), the cache is re-checked to
    /// absorb a racing population, and only then is `factory` invoked. The
    /// factory receives a clone of the cancellation token.
    ///
    /// All concurrent callers for the same key receive the same `Arc<T>`.
    ///
    /// Note that the mutex is held for the whole factory call: a slow factory
    /// delays population of every other key of this instance.
    pub async fn get_or_compute<T, F, Fut>(
        &self,
        key: &str,
        factory: F,
        token: &CancellationToken,
    ) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(hit) = self.lookup::<T>(key).await {
            return Ok(hit);
        }

        let guard = match token.run_until_cancelled(self.populate.lock()).await {
            Some(guard) => guard,
            None => bail!("cache population cancelled for key {key}"),
        };

        // Double check: another caller may have populated the key while we
        // were waiting on the mutex.
        if let Some(hit) = self.lookup::<T>(key).await {
            return Ok(hit);
        }

        debug!(key, "cache miss, invoking factory");
        let value = Arc::new(factory(token.clone()).await?);

        self.entries
            .write()
            .await
            .insert(key.to_string(), value.clone() as Entry);

        drop(guard);
        Ok(value)
    }

    /// Return the cached value for `key` without populating.
    ///
    /// A stored entry of a different type is treated as a miss.
    pub async fn lookup<T>(&self, key: &str) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .cloned()
            .and_then(|entry| entry.downcast::<T>().ok())
    }

    /// Remove an entry. Returns true if the key was present.
    pub async fn evict(&self, key: &str) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True if the cache holds no entry.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_and_returns_value() {
        let cache = Cache::new();
        let token = CancellationToken::new();

        let value = cache
            .get_or_compute("k", |_| async { Ok("hello".to_string()) }, &token)
            .await
            .unwrap();
        assert_eq!(*value, "hello");
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn empty_result_is_cached() {
        let cache = Cache::new();
        let token = CancellationToken::new();

        let first = cache
            .get_or_compute("genres", |_| async { Ok(Vec::<String>::new()) }, &token)
            .await
            .unwrap();
        assert!(first.is_empty());

        // The empty vector was stored; the second factory must not run.
        let second = cache
            .get_or_compute(
                "genres",
                |_| async { Ok(vec!["unexpected".to_string()]) },
                &token,
            )
            .await
            .unwrap();
        assert!(second.is_empty());
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn factory_error_is_not_cached() {
        let cache = Cache::new();
        let token = CancellationToken::new();

        let failed: Result<Arc<u32>> = cache
            .get_or_compute("k", |_| async { bail!("remote feed unavailable") }, &token)
            .await;
        assert!(failed.is_err());
        assert!(cache.is_empty().await);

        // The next call retries and succeeds.
        let value = cache
            .get_or_compute("k", |_| async { Ok(7u32) }, &token)
            .await
            .unwrap();
        assert_eq!(*value, 7);
    }

    #[tokio::test]
    async fn mismatched_type_is_a_miss() {
        let cache = Cache::new();
        let token = CancellationToken::new();

        cache
            .get_or_compute("k", |_| async { Ok(1u32) }, &token)
            .await
            .unwrap();

        // Reading the same key with another type recomputes and overwrites.
        let value = cache
            .get_or_compute("k", |_| async { Ok("text".to_string()) }, &token)
            .await
            .unwrap();
        assert_eq!(*value, "text");
    }

    #[tokio::test]
    async fn cancelled_token_aborts_population() {
        let cache = Cache::new();
        let token = CancellationToken::new();
        token.cancel();

        let result: Result<Arc<u32>> = cache
            .get_or_compute("k", |_| async { Ok(1u32) }, &token)
            .await;
        assert!(result.is_err());
        assert!(cache.is_empty().await);
    }
}
