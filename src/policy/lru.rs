//! # Least Recently Used (LRU) Cache
//!
//! Evicts the entry that has gone longest without being read or inserted.
//! Every hit splices the entry to the head of a recency list; misses insert at
//! the head and, once over capacity, drop the tail.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                           LruCore<K, V>                              │
//!   │                                                                      │
//!   │   index: FxHashMap<K, SlotId>                                        │
//!   │   ┌─────────┬────────┐                                               │
//!   │   │  key A  │  id_2  │ ─────────┐                                    │
//!   │   │  key B  │  id_0  │ ───┐     │                                    │
//!   │   │  key C  │  id_1  │ ─┐ │     │                                    │
//!   │   └─────────┴────────┘  │ │     │                                    │
//!   │                         ▼ ▼     ▼                                    │
//!   │   list: IntrusiveList<Entry<K, V>>   (nodes in a SlotArena)          │
//!   │                                                                      │
//!   │   head ──► [A] ◄──► [B] ◄──► [C] ◄── tail                            │
//!   │           (MRU)                (LRU, next eviction)                  │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations Flow
//!
//! ```text
//!   lookup(B)  hit
//!     head ──► [A] ◄──► [B] ◄──► [C]      before
//!     head ──► [B] ◄──► [A] ◄──► [C]      after: B spliced out, relinked at head
//!
//!   admit(D)   miss, capacity 3
//!     head ──► [D] ◄──► [B] ◄──► [A] ◄──► [C]    push_front, len 4 > 3
//!     head ──► [D] ◄──► [B] ◄──► [A]             pop_back evicts C
//! ```
//!
//! Node handles are stable `SlotId`s, so promotion never invalidates the
//! index and nothing is ever found by walking the list.
//!
//! ## Performance
//!
//! | Operation | Time     | Notes                                   |
//! |-----------|----------|-----------------------------------------|
//! | `lookup`  | O(1) avg | index probe + splice to head            |
//! | `peek`    | O(1) avg | index probe, order untouched            |
//! | `admit`   | O(1) avg | push_front + at most one pop_back       |
//! | `keys`    | O(n)     | tail-to-head walk                       |

use std::hash::Hash;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::SlotId;
use crate::error::{ConfigError, InvariantError};
use crate::memo::MemoCache;
use crate::traits::{PolicyCore, Source};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Recency list plus key index.
#[derive(Debug)]
pub struct LruCore<K, V> {
    index: FxHashMap<K, SlotId>,
    list: IntrusiveList<Entry<K, V>>,
    capacity: usize,
}

impl<K, V> LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty core bounded to `capacity` entries.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidSize`] when `capacity < 2`.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        ConfigError::check_capacity(<Self as PolicyCore<K, V>>::NAME, capacity)?;
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(
                capacity.saturating_add(1),
                Default::default(),
            ),
            // One spare node: admit links the newcomer before dropping the tail.
            list: IntrusiveList::with_capacity(capacity.saturating_add(1)),
            capacity,
        })
    }

    /// Removes and returns the least recently used pair.
    fn evict_tail(&mut self) -> Option<(K, V)> {
        let entry = self.list.pop_back()?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    /// Position of `key` in recency order, 0 being the most recent.
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        self.index.get(key)?;
        self.list.iter().position(|entry| entry.key == *key)
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
        if let Err(err) = self.check_invariants() {
            panic!("{err}");
        }
    }
}

impl<K, V> PolicyCore<K, V> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    const NAME: &'static str = "lru";

    fn lookup(&mut self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.list.move_to_front(id);
        self.list.get(id).map(|entry| &entry.value)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    fn admit(&mut self, key: K, value: V) -> Option<(K, V)> {
        let id = self.list.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);

        if self.list.len() > self.capacity {
            return self.evict_tail();
        }
        None
    }

    fn len(&self) -> usize {
        self.list.len()
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.capacity)
    }

    fn keys(&self) -> Vec<K> {
        self.list.iter_rev().map(|entry| entry.key.clone()).collect()
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        let linked = self.list.iter().count();
        if linked != self.list.len() || self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "lru: {linked} linked nodes, {} indexed keys, len {}",
                self.index.len(),
                self.list.len()
            )));
        }
        if self.list.len() > self.capacity {
            return Err(InvariantError::new("lru: over capacity"));
        }
        for (key, &id) in &self.index {
            match self.list.get(id) {
                Some(entry) if entry.key == *key => {},
                _ => {
                    return Err(InvariantError::new(format!("lru: stale handle {id:?}")));
                },
            }
        }
        Ok(())
    }
}

/// Thread-safe memoizing cache with LRU eviction.
pub type LruCache<K, V, E> = MemoCache<K, V, E, LruCore<K, Arc<V>>>;

impl<K, V, E> LruCache<K, V, E>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidSize`] when `capacity < 2`.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::lru::LruCache;
    /// use memokit::traits::Cache;
    ///
    /// let cache = LruCache::new(2, |k: &i32| Ok::<_, ()>(k.to_string())).unwrap();
    /// cache.get(&1).unwrap();
    /// cache.get(&2).unwrap();
    /// cache.get(&1).unwrap(); // hit, 1 becomes most recent
    /// cache.get(&3).unwrap(); // evicts 2
    /// assert!(cache.contains(&1));
    /// assert!(!cache.contains(&2));
    /// ```
    pub fn new<F>(capacity: usize, source: F) -> Result<Self, ConfigError>
    where
        F: Fn(&K) -> Result<V, E> + Send + Sync + 'static,
    {
        let source: Source<K, V, E> = Box::new(source);
        Ok(MemoCache::with_core(LruCore::new(capacity)?, source))
    }
}
