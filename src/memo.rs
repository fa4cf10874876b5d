//! Thread-safe memoizing wrapper shared by every policy.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                     MemoCache<K, V, E, P>                            │
//!   │                                                                      │
//!   │   source: Source<K, V, E>          called on miss, under the lock    │
//!   │                                                                      │
//!   │   ┌────────────────────────────────────────────────────────────────┐ │
//!   │   │            parking_lot::RwLock<State<P>>                       │ │
//!   │   │                                                                │ │
//!   │   │    core: P   (SingleCore | UnboundedCore | FifoCore | LruCore) │ │
//!   │   │    stat: Stat                                                  │ │
//!   │   └────────────────────────────────────────────────────────────────┘ │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Get Flow
//!
//! ```text
//!   get(key)                                       [write lock held throughout]
//!     │
//!     ├─ core.lookup(key) = Some(v) ─► hits += 1 ─► Ok(v)
//!     │
//!     └─ None ─► misses += 1 ─► source(key)
//!                                  │
//!                                  ├─ Err(e) ─► Err(e)        (cache untouched)
//!                                  │
//!                                  └─ Ok(v) ─► core.admit(key, v)
//!                                                 ├─ evicted ─► size unchanged
//!                                                 └─ none    ─► size += 1
//! ```
//!
//! ## Concurrency Model
//!
//! Every `get`, hit or miss, takes the write lock: a hit bumps counters and
//! may reorder the LRU list. The source runs while the lock is held, so two
//! threads missing on different keys still fetch one after the other, and a
//! slow source stalls every lookup on this instance. Introspection (`stat`,
//! `peek`, `contains`, `keys`) takes the read lock.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::error::InvariantError;
use crate::stat::Stat;
use crate::traits::{Cache, PolicyCore, Source};

#[derive(Debug)]
struct State<P> {
    core: P,
    stat: Stat,
}

/// Memoizing cache over a source function and an eviction core `P`.
///
/// Usually named through a policy alias such as
/// [`LruCache`](crate::policy::lru::LruCache) or
/// [`FifoCache`](crate::policy::fifo::FifoCache).
pub struct MemoCache<K, V, E, P> {
    state: RwLock<State<P>>,
    source: Source<K, V, E>,
}

impl<K, V, E, P> MemoCache<K, V, E, P>
where
    K: Clone,
    P: PolicyCore<K, Arc<V>>,
{
    /// Wraps an already configured core.
    pub fn with_core(core: P, source: Source<K, V, E>) -> Self {
        Self {
            state: RwLock::new(State {
                core,
                stat: Stat::new(),
            }),
            source,
        }
    }

    /// Resident keys, next eviction candidate first.
    pub fn keys(&self) -> Vec<K> {
        self.state.read().core.keys()
    }

    /// Checks that the core's index, its ordering structure and the `size`
    /// counter all agree.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let state = self.state.read();
        state.core.check_invariants()?;
        if state.core.len() != state.stat.size() {
            return Err(InvariantError::new(format!(
                "{}: core holds {} entries but size is {}",
                P::NAME,
                state.core.len(),
                state.stat.size()
            )));
        }
        if let Some(capacity) = state.core.capacity() {
            if state.stat.size() > capacity {
                return Err(InvariantError::new(format!(
                    "{}: size {} exceeds capacity {capacity}",
                    P::NAME,
                    state.stat.size()
                )));
            }
        }
        Ok(())
    }
}

impl<K, V, E, P> Cache<K, V> for MemoCache<K, V, E, P>
where
    K: Clone,
    P: PolicyCore<K, Arc<V>>,
{
    type Error = E;

    fn get(&self, key: &K) -> Result<Arc<V>, E> {
        let mut guard = self.state.write();
        let state = &mut *guard;

        if let Some(value) = state.core.lookup(key) {
            let value = Arc::clone(value);
            state.stat.record_hit();
            return Ok(value);
        }
        state.stat.record_miss();

        let value = match (self.source)(key) {
            Ok(value) => Arc::new(value),
            Err(err) => {
                debug!(policy = P::NAME, "source failed, cache left unchanged");
                return Err(err);
            },
        };

        match state.core.admit(key.clone(), Arc::clone(&value)) {
            Some(_evicted) => trace!(policy = P::NAME, size = state.stat.size(), "evicted entry"),
            None => {
                state.stat.record_grow();
                trace!(policy = P::NAME, size = state.stat.size(), "inserted entry");
            },
        }
        debug_assert_eq!(state.core.len(), state.stat.size());
        Ok(value)
    }

    fn stat(&self) -> Stat {
        self.state.read().stat
    }

    fn peek(&self, key: &K) -> Option<Arc<V>> {
        self.state.read().core.peek(key).cloned()
    }

    fn capacity(&self) -> Option<usize> {
        self.state.read().core.capacity()
    }
}

impl<K, V, E, P> fmt::Debug for MemoCache<K, V, E, P>
where
    K: Clone,
    P: PolicyCore<K, Arc<V>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("MemoCache")
            .field("policy", &P::NAME)
            .field("capacity", &state.core.capacity())
            .field("stat", &state.stat)
            .finish_non_exhaustive()
    }
}
