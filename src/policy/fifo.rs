//! # First-In-First-Out (FIFO) Cache
//!
//! Evicts the entry that was inserted longest ago. Hits never change the
//! order: two caches that saw the same sequence of misses evict the same keys
//! no matter how often each key was read in between.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          FifoCore<K, V>                              │
//!   │                                                                      │
//!   │   index: FxHashMap<K, usize>  (key -> slot)                          │
//!   │   ┌─────────┬──────┐                                                 │
//!   │   │  key 3  │  0   │    slots (ring of N)                            │
//!   │   │  key 2  │  2   │    ┌─────────┬─────────┬─────────┐              │
//!   │   └─────────┴──────┘    │ [3 => c]│  None   │ [2 => b]│              │
//!   │                         └─────────┴─────────┴─────────┘              │
//!   │                              0         1 ▲       2                   │
//!   │                                          │                           │
//!   │                                        head (next slot to write)     │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Insertion Flow
//!
//! ```text
//!   admit(key, value)
//!     1. slot[head] occupied? → drop its key from the index (eviction)
//!                   empty?    → capacity-filling insert, len += 1
//!     2. slot[head] = Entry { key, value }; index[key] = head
//!     3. head = (head + 1) % N
//! ```
//!
//! Once the ring has wrapped, `head` always points at the oldest entry, so
//! the eviction candidate is found without scanning or comparing anything.
//!
//! ## Performance
//!
//! | Operation | Time     | Notes                               |
//! |-----------|----------|-------------------------------------|
//! | `lookup`  | O(1) avg | index probe + slot read             |
//! | `admit`   | O(1) avg | one slot write, at most one eviction|
//! | `keys`    | O(N)     | ring walk starting at `head`        |

use std::hash::Hash;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::{ConfigError, InvariantError};
use crate::memo::MemoCache;
use crate::traits::{PolicyCore, Source};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Ring of `N` optional slots plus a key index.
#[derive(Debug)]
pub struct FifoCore<K, V> {
    slots: Vec<Option<Entry<K, V>>>,
    index: FxHashMap<K, usize>,
    head: usize,
    len: usize,
}

impl<K, V> FifoCore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a ring with `capacity` empty slots.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidSize`] when `capacity < 2`.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        ConfigError::check_capacity(<Self as PolicyCore<K, V>>::NAME, capacity)?;
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Ok(Self {
            slots,
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            head: 0,
            len: 0,
        })
    }

    fn slot(&self, key: &K) -> Option<&Entry<K, V>> {
        let idx = *self.index.get(key)?;
        self.slots.get(idx)?.as_ref()
    }
}

impl<K, V> PolicyCore<K, V> for FifoCore<K, V>
where
    K: Eq + Hash + Clone,
{
    const NAME: &'static str = "fifo";

    fn lookup(&mut self, key: &K) -> Option<&V> {
        self.peek(key)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        self.slot(key).map(|entry| &entry.value)
    }

    fn admit(&mut self, key: K, value: V) -> Option<(K, V)> {
        let head = self.head;
        self.head = (head + 1) % self.slots.len();
        self.index.insert(key.clone(), head);

        let evicted = self.slots[head].replace(Entry { key, value });
        match evicted {
            Some(old) => {
                self.index.remove(&old.key);
                Some((old.key, old.value))
            },
            None => {
                self.len += 1;
                None
            },
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.slots.len())
    }

    fn keys(&self) -> Vec<K> {
        let n = self.slots.len();
        (0..n)
            .filter_map(|offset| self.slots[(self.head + offset) % n].as_ref())
            .map(|entry| entry.key.clone())
            .collect()
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        let occupied = self.slots.iter().filter(|slot| slot.is_some()).count();
        if occupied != self.len || self.index.len() != self.len {
            return Err(InvariantError::new(format!(
                "fifo: {occupied} occupied slots, {} indexed keys, len {}",
                self.index.len(),
                self.len
            )));
        }
        if self.head >= self.slots.len() {
            return Err(InvariantError::new("fifo: head cursor out of range"));
        }
        for (key, &idx) in &self.index {
            match self.slots.get(idx).and_then(Option::as_ref) {
                Some(entry) if entry.key == *key => {},
                _ => {
                    return Err(InvariantError::new(format!(
                        "fifo: index points at stale slot {idx}"
                    )));
                },
            }
        }
        // Until the ring wraps, occupied slots form the prefix [0, len).
        if self.len < self.slots.len() && self.head != self.len {
            return Err(InvariantError::new("fifo: partially filled ring has a gap"));
        }
        Ok(())
    }
}

/// Thread-safe memoizing cache with FIFO eviction.
pub type FifoCache<K, V, E> = MemoCache<K, V, E, FifoCore<K, Arc<V>>>;

impl<K, V, E> FifoCache<K, V, E>
where
    K: Eq + Hash + Clone,
{
    /// Creates a FIFO cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidSize`] when `capacity < 2`.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::fifo::FifoCache;
    /// use memokit::traits::Cache;
    ///
    /// let cache = FifoCache::new(2, |k: &i32| Ok::<_, ()>(k.to_string())).unwrap();
    /// cache.get(&1).unwrap();
    /// cache.get(&2).unwrap();
    /// cache.get(&1).unwrap(); // hit, does not protect 1
    /// cache.get(&3).unwrap(); // evicts 1
    /// assert!(!cache.contains(&1));
    /// assert!(cache.contains(&2));
    /// ```
    pub fn new<F>(capacity: usize, source: F) -> Result<Self, ConfigError>
    where
        F: Fn(&K) -> Result<V, E> + Send + Sync + 'static,
    {
        let source: Source<K, V, E> = Box::new(source);
        Ok(MemoCache::with_core(FifoCore::new(capacity)?, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(capacity: usize, keys: &[u32]) -> FifoCore<u32, u32> {
        let mut core = FifoCore::new(capacity).unwrap();
        for &k in keys {
            core.admit(k, k * 10);
        }
        core
    }

    #[test]
    fn rejects_capacity_below_two() {
        assert!(matches!(
            FifoCore::<u8, u8>::new(0),
            Err(ConfigError::InvalidSize { capacity: 0, .. })
        ));
        assert!(FifoCore::<u8, u8>::new(1).is_err());
        assert!(FifoCore::<u8, u8>::new(2).is_ok());
    }

    #[test]
    fn fills_before_evicting() {
        let mut core = filled(3, &[1, 2]);
        assert_eq!(core.len(), 2);
        assert_eq!(core.admit(3, 30), None);
        assert_eq!(core.len(), 3);
        assert_eq!(core.admit(4, 40), Some((1, 10)));
        assert_eq!(core.len(), 3);
        assert!(core.check_invariants().is_ok());
    }

    #[test]
    fn evicts_in_insertion_order_despite_lookups() {
        let mut core = filled(2, &[1, 2]);
        assert_eq!(core.lookup(&1), Some(&10));
        assert_eq!(core.lookup(&1), Some(&10));

        assert_eq!(core.admit(3, 30), Some((1, 10)));
        assert_eq!(core.lookup(&2), Some(&20));
        assert_eq!(core.admit(4, 40), Some((2, 20)));
        assert_eq!(core.keys(), vec![3, 4]);
    }

    #[test]
    fn keys_start_at_oldest_after_wrap() {
        let core = filled(3, &[1, 2, 3, 4, 5]);
        assert_eq!(core.keys(), vec![3, 4, 5]);
        assert_eq!(core.peek(&1), None);
        assert_eq!(core.peek(&5), Some(&50));
        assert!(core.check_invariants().is_ok());
    }

    #[test]
    fn keys_before_wrap_are_insertion_order() {
        let core = filled(4, &[7, 8]);
        assert_eq!(core.keys(), vec![7, 8]);
        assert_eq!(core.capacity(), Some(4));
    }
}
