//! Unbounded cache: a plain key → value map that never evicts.
//!
//! Size grows with every distinct key successfully fetched. Only suitable
//! when the key space is known to be small.

use std::hash::Hash;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::InvariantError;
use crate::memo::MemoCache;
use crate::traits::{PolicyCore, Source};

#[derive(Debug)]
pub struct UnboundedCore<K, V> {
    map: FxHashMap<K, V>,
}

impl<K, V> UnboundedCore<K, V> {
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }
}

impl<K, V> Default for UnboundedCore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> PolicyCore<K, V> for UnboundedCore<K, V>
where
    K: Eq + Hash + Clone,
{
    const NAME: &'static str = "unbounded";

    fn lookup(&mut self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    fn admit(&mut self, key: K, value: V) -> Option<(K, V)> {
        self.map.insert(key, value);
        None
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn capacity(&self) -> Option<usize> {
        None
    }

    fn keys(&self) -> Vec<K> {
        self.map.keys().cloned().collect()
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        Ok(())
    }
}

/// Thread-safe memoizing cache without an eviction bound.
pub type UnboundedCache<K, V, E> = MemoCache<K, V, E, UnboundedCore<K, Arc<V>>>;

impl<K, V, E> UnboundedCache<K, V, E>
where
    K: Eq + Hash + Clone,
{
    /// Creates an unbounded cache over `source`.
    pub fn new<F>(source: F) -> Self
    where
        F: Fn(&K) -> Result<V, E> + Send + Sync + 'static,
    {
        let source: Source<K, V, E> = Box::new(source);
        MemoCache::with_core(UnboundedCore::new(), source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admit_never_evicts() {
        let mut core = UnboundedCore::new();
        for i in 0..1000u32 {
            assert_eq!(core.admit(i, i * 2), None);
        }
        assert_eq!(core.len(), 1000);
        assert_eq!(core.lookup(&999), Some(&1998));
        assert_eq!(core.capacity(), None);
    }

    #[test]
    fn keys_lists_every_resident_key() {
        let mut core = UnboundedCore::new();
        core.admit("b", 2);
        core.admit("a", 1);
        let mut keys = core.keys();
        keys.sort();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
