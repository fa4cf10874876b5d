//! # Cache Trait Hierarchy
//!
//! Two layers of abstraction keep the eviction engines independent of the
//! locking and memoization protocol:
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                         Cache<K, V>  (public contract)               │
//!   │                                                                      │
//!   │   get(&K) → Result<Arc<V>, Error>     write lock, may call source    │
//!   │   stat() → Stat                       read lock                      │
//!   │   peek(&K) / contains(&K)             read lock, no reordering       │
//!   │   capacity() → Option<usize>                                         │
//!   └──────────────────────────────────┬───────────────────────────────────┘
//!                                      │ implemented once by MemoCache
//!                                      ▼
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                    PolicyCore<K, V>  (single-threaded engine)        │
//!   │                                                                      │
//!   │   lookup(&mut, &K)   hit path, may promote (LRU)                     │
//!   │   admit(&mut, K, V)  insert an absent key, return the evicted pair   │
//!   │   peek / len / capacity / keys / check_invariants                    │
//!   └──────────┬─────────────────┬─────────────────┬──────────────┬──────┘
//!              ▼                 ▼                 ▼              ▼
//!         SingleCore       UnboundedCore       FifoCore        LruCore
//! ```
//!
//! A core never sees the source function and never touches [`Stat`]; the
//! wrapper owns both and drives the core under its lock.

use std::sync::Arc;

use crate::error::InvariantError;
use crate::stat::Stat;

/// Function that computes the value for a key on a cache miss.
///
/// The source must behave as a pure function of its key for the lifetime of
/// the cache. Its error type is handed back to `get` callers unchanged.
pub type Source<K, V, E> = Box<dyn Fn(&K) -> Result<V, E> + Send + Sync>;

/// Memoizing cache contract shared by every eviction policy.
///
/// # Example
///
/// ```
/// use memokit::policy::fifo::FifoCache;
/// use memokit::traits::Cache;
///
/// fn warm<C: Cache<u64, String>>(cache: &C, keys: &[u64]) -> usize {
///     keys.iter().filter(|k| cache.get(k).is_ok()).count()
/// }
///
/// let cache = FifoCache::new(4, |k: &u64| Ok::<_, ()>(k.to_string())).unwrap();
/// assert_eq!(warm(&cache, &[1, 2, 3]), 3);
/// assert_eq!(cache.misses(), 3);
/// ```
pub trait Cache<K, V> {
    /// Error produced by the cache's source function.
    type Error;

    /// Returns the value for `key`, consulting the source on a miss.
    ///
    /// A hit bumps `hits`; a miss bumps `misses` and calls the source. A
    /// failing source leaves the cache contents untouched and its error is
    /// returned as is.
    fn get(&self, key: &K) -> Result<Arc<V>, Self::Error>;

    /// Returns a consistent snapshot of the counters.
    fn stat(&self) -> Stat;

    /// Returns the cached value for `key` without counting a lookup or
    /// changing eviction order.
    fn peek(&self, key: &K) -> Option<Arc<V>>;

    /// Returns `true` if `key` is resident.
    fn contains(&self, key: &K) -> bool {
        self.peek(key).is_some()
    }

    /// Maximum number of resident entries, `None` when unbounded.
    fn capacity(&self) -> Option<usize>;

    /// Number of `get` calls served from the cache.
    fn hits(&self) -> u64 {
        self.stat().hits()
    }

    /// Number of `get` calls that consulted the source.
    fn misses(&self) -> u64 {
        self.stat().misses()
    }

    /// Number of resident entries.
    fn size(&self) -> usize {
        self.stat().size()
    }
}

/// Single-threaded eviction engine driven by [`MemoCache`](crate::memo::MemoCache).
///
/// Implementations keep their key index and ordering structure in lock-step:
/// a key is indexed if and only if its entry is reachable in the ordering.
pub trait PolicyCore<K, V> {
    /// Short policy name used in logs and errors.
    const NAME: &'static str;

    /// Looks up `key` on the `get` hit path. Policies that track recency
    /// promote the entry here.
    fn lookup(&mut self, key: &K) -> Option<&V>;

    /// Looks up `key` without touching eviction order.
    fn peek(&self, key: &K) -> Option<&V>;

    /// Inserts `key`, which the caller guarantees is not resident, and
    /// returns the entry evicted to make room, if any.
    fn admit(&mut self, key: K, value: V) -> Option<(K, V)>;

    /// Number of resident entries.
    fn len(&self) -> usize;

    /// Returns `true` when nothing is resident.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of resident entries, `None` when unbounded.
    fn capacity(&self) -> Option<usize>;

    /// Resident keys, next eviction candidate first.
    fn keys(&self) -> Vec<K>;

    /// Verifies that the index and the ordering structure agree.
    fn check_invariants(&self) -> Result<(), InvariantError>;
}
