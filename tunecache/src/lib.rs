//! # tunecache - Single-flight memoization cache
//!
//! This crate provides a small in-memory cache for expensive, idempotent
//! lookups (e.g. a remote genre catalog fetched once per process). It
//! guarantees at most one in-flight population per cache instance: concurrent
//! callers racing on a missing key all receive the result of a single factory
//! invocation.
//!
//! ## Semantics
//!
//! - Lock-free fast path: a cached value is returned without touching the
//!   population mutex.
//! - One `tokio::sync::Mutex` per cache *instance*, shared by all keys. This
//!   is deliberately coarse: while one factory runs, population of unrelated
//!   keys waits. Reads of already-cached keys are unaffected.
//! - Successful results are stored unconditionally (empty collections
//!   included). There is no expiration and no negative caching.
//! - Factory errors propagate to the caller and are **not** cached; the next
//!   call retries the factory.
//!
//! ## Example
//!
//! ```no_run
//! use tunecache::Cache;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cache = Cache::new();
//!     let token = CancellationToken::new();
//!
//!     let value = cache
//!         .get_or_compute("answer", |_token| async { Ok(42u32) }, &token)
//!         .await?;
//!     assert_eq!(*value, 42);
//!
//!     // Second call hits the cache, the factory is not invoked.
//!     let again: std::sync::Arc<u32> = cache
//!         .get_or_compute("answer", |_token| async { unreachable!() }, &token)
//!         .await?;
//!     assert_eq!(*again, 42u32);
//!     Ok(())
//! }
//! ```

mod cache;

pub use cache::Cache;
