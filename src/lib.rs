//! memokit: thread-safe memoizing caches over a fallible source function.
//!
//! A cache wraps a `Fn(&K) -> Result<V, E>` and remembers what it returned.
//! Four eviction policies share one `get` protocol:
//!
//! | Policy      | Type                                      | Evicts                     |
//! |-------------|-------------------------------------------|----------------------------|
//! | single-slot | [`SingleCache`](policy::single::SingleCache)          | the previous entry         |
//! | unbounded   | [`UnboundedCache`](policy::unbounded::UnboundedCache) | never                      |
//! | FIFO        | [`FifoCache`](policy::fifo::FifoCache)                | oldest insertion           |
//! | LRU         | [`LruCache`](policy::lru::LruCache)                   | least recently used        |
//!
//! ```
//! use memokit::prelude::*;
//!
//! let cache = LruCache::new(3, |x: &i32| Ok::<_, ()>(x * x)).unwrap();
//! for x in [1, 1, 2, 3, 4, 3, 1] {
//!     cache.get(&x).unwrap();
//! }
//! assert_eq!((cache.hits(), cache.misses(), cache.size()), (2, 5, 3));
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod memo;
pub mod policy;
pub mod prelude;
pub mod stat;
pub mod traits;
