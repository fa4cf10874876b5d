//! Single-slot cache: remembers only the most recently fetched pair.
//!
//! Useful when the same key tends to be requested many times in a row, e.g.
//! memoizing the last parsed config or the last resolved path.
//!
//! ```text
//!   get(1) miss ─► [1 => a]
//!   get(1) hit     [1 => a]
//!   get(2) miss ─► [2 => b]      (1 replaced, size stays 1)
//! ```
//!
//! The slot starts empty, so the very first lookup is always a miss no matter
//! what the key is; an empty slot is never confused with a default key.

use std::sync::Arc;

use crate::error::InvariantError;
use crate::memo::MemoCache;
use crate::traits::{PolicyCore, Source};

/// One optional `(key, value)` slot.
#[derive(Debug)]
pub struct SingleCore<K, V> {
    slot: Option<(K, V)>,
}

impl<K, V> SingleCore<K, V> {
    pub fn new() -> Self {
        Self { slot: None }
    }
}

impl<K, V> Default for SingleCore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> PolicyCore<K, V> for SingleCore<K, V>
where
    K: Eq + Clone,
{
    const NAME: &'static str = "single";

    fn lookup(&mut self, key: &K) -> Option<&V> {
        self.peek(key)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        match &self.slot {
            Some((k, v)) if k == key => Some(v),
            _ => None,
        }
    }

    fn admit(&mut self, key: K, value: V) -> Option<(K, V)> {
        self.slot.replace((key, value))
    }

    fn len(&self) -> usize {
        usize::from(self.slot.is_some())
    }

    fn capacity(&self) -> Option<usize> {
        Some(1)
    }

    fn keys(&self) -> Vec<K> {
        self.slot.iter().map(|(k, _)| k.clone()).collect()
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        Ok(())
    }
}

/// Thread-safe memoizing cache holding at most one entry.
pub type SingleCache<K, V, E> = MemoCache<K, V, E, SingleCore<K, Arc<V>>>;

impl<K, V, E> SingleCache<K, V, E>
where
    K: Eq + Clone,
{
    /// Creates a single-slot cache over `source`.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::single::SingleCache;
    /// use memokit::traits::Cache;
    ///
    /// let cache = SingleCache::new(|k: &u8| Ok::<_, ()>(*k as u32 * 2));
    /// assert_eq!(*cache.get(&4).unwrap(), 8);
    /// assert_eq!(*cache.get(&4).unwrap(), 8);
    /// assert_eq!((cache.hits(), cache.misses(), cache.size()), (1, 1, 1));
    /// ```
    pub fn new<F>(source: F) -> Self
    where
        F: Fn(&K) -> Result<V, E> + Send + Sync + 'static,
    {
        let source: Source<K, V, E> = Box::new(source);
        MemoCache::with_core(SingleCore::new(), source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slot_never_matches_default_key() {
        let mut core: SingleCore<u32, &str> = SingleCore::new();
        assert_eq!(core.lookup(&0), None);
        assert_eq!(core.len(), 0);
        assert!(core.keys().is_empty());
    }

    #[test]
    fn admit_replaces_previous_pair() {
        let mut core = SingleCore::new();
        assert_eq!(core.admit(1, "a"), None);
        assert_eq!(core.lookup(&1), Some(&"a"));

        assert_eq!(core.admit(2, "b"), Some((1, "a")));
        assert_eq!(core.lookup(&1), None);
        assert_eq!(core.peek(&2), Some(&"b"));
        assert_eq!(core.len(), 1);
        assert_eq!(core.keys(), vec![2]);
    }

    #[test]
    fn capacity_is_one() {
        let core: SingleCore<u8, u8> = SingleCore::default();
        assert_eq!(core.capacity(), Some(1));
        assert!(core.check_invariants().is_ok());
    }
}
