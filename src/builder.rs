//! Unified cache builder for all eviction policies.
//!
//! Lets callers pick a policy at run time (for example from their own config
//! text) and get back a boxed [`Cache`] trait object, or build a concrete
//! policy type directly.
//!
//! ## Example
//!
//! ```rust
//! use memokit::builder::{CacheBuilder, CachePolicy};
//! use memokit::traits::Cache;
//!
//! let policy: CachePolicy = "lru".parse().unwrap();
//! let cache = CacheBuilder::new(100)
//!     .source(|k: &u64| Ok::<_, std::io::Error>(k * k))
//!     .build(policy)
//!     .unwrap();
//! assert_eq!(*cache.get(&12).unwrap(), 144);
//! assert_eq!(cache.misses(), 1);
//! ```

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::memo::MemoCache;
use crate::policy::fifo::{FifoCache, FifoCore};
use crate::policy::lru::{LruCache, LruCore};
use crate::policy::single::{SingleCache, SingleCore};
use crate::policy::unbounded::{UnboundedCache, UnboundedCore};
use crate::traits::{Cache, Source};

/// Available eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CachePolicy {
    /// One entry; a miss replaces it.
    Single,
    /// No bound, never evicts.
    Unbounded,
    /// First In, First Out eviction.
    Fifo,
    /// Least Recently Used eviction.
    Lru,
}

impl CachePolicy {
    /// Every policy, in declaration order.
    pub const ALL: [CachePolicy; 4] = [
        CachePolicy::Single,
        CachePolicy::Unbounded,
        CachePolicy::Fifo,
        CachePolicy::Lru,
    ];

    /// Lowercase policy name, as accepted by `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            CachePolicy::Single => "single",
            CachePolicy::Unbounded => "unbounded",
            CachePolicy::Fifo => "fifo",
            CachePolicy::Lru => "lru",
        }
    }

    /// Whether the builder's capacity applies to this policy.
    pub fn uses_capacity(self) -> bool {
        matches!(self, CachePolicy::Fifo | CachePolicy::Lru)
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CachePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(CachePolicy::Single),
            "unbounded" | "infinity" => Ok(CachePolicy::Unbounded),
            "fifo" => Ok(CachePolicy::Fifo),
            "lru" => Ok(CachePolicy::Lru),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

/// Type-erased thread-safe cache returned by [`CacheBuilder::build`].
pub type BoxedCache<K, V, E> = Box<dyn Cache<K, V, Error = E> + Send + Sync>;

/// Collects a capacity and a source, then builds any policy.
///
/// Capacity is ignored by [`CachePolicy::Single`] and
/// [`CachePolicy::Unbounded`]. Building without a source fails with
/// [`ConfigError::NoSource`].
pub struct CacheBuilder<K, V, E> {
    capacity: usize,
    source: Option<Source<K, V, E>>,
}

impl<K, V, E> CacheBuilder<K, V, E> {
    /// Starts a builder with the given bounded-policy capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            source: None,
        }
    }

    /// Sets the bounded-policy capacity.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the function consulted on every miss.
    pub fn source<F>(mut self, source: F) -> Self
    where
        F: Fn(&K) -> Result<V, E> + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Sets an already boxed source, or clears it with `None`.
    pub fn boxed_source(mut self, source: Option<Source<K, V, E>>) -> Self {
        self.source = source;
        self
    }

    fn take_source(self) -> Result<(usize, Source<K, V, E>), ConfigError> {
        match self.source {
            Some(source) => Ok((self.capacity, source)),
            None => {
                tracing::debug!("rejecting cache without a source");
                Err(ConfigError::NoSource)
            },
        }
    }
}

impl<K, V, E> CacheBuilder<K, V, E>
where
    K: Eq + Hash + Clone,
{
    pub fn build_single(self) -> Result<SingleCache<K, V, E>, ConfigError> {
        let (_, source) = self.take_source()?;
        Ok(MemoCache::with_core(SingleCore::new(), source))
    }

    pub fn build_unbounded(self) -> Result<UnboundedCache<K, V, E>, ConfigError> {
        let (_, source) = self.take_source()?;
        Ok(MemoCache::with_core(UnboundedCore::new(), source))
    }

    pub fn build_fifo(self) -> Result<FifoCache<K, V, E>, ConfigError> {
        let (capacity, source) = self.take_source()?;
        Ok(MemoCache::with_core(FifoCore::new(capacity)?, source))
    }

    pub fn build_lru(self) -> Result<LruCache<K, V, E>, ConfigError> {
        let (capacity, source) = self.take_source()?;
        Ok(MemoCache::with_core(LruCore::new(capacity)?, source))
    }

    /// Builds the requested policy behind a trait object.
    pub fn build(self, policy: CachePolicy) -> Result<BoxedCache<K, V, E>, ConfigError>
    where
        K: Send + Sync + 'static,
        V: Send + Sync + 'static,
        E: 'static,
    {
        let cache: BoxedCache<K, V, E> = match policy {
            CachePolicy::Single => Box::new(self.build_single()?),
            CachePolicy::Unbounded => Box::new(self.build_unbounded()?),
            CachePolicy::Fifo => Box::new(self.build_fifo()?),
            CachePolicy::Lru => Box::new(self.build_lru()?),
        };
        Ok(cache)
    }
}

impl<K, V, E> fmt::Debug for CacheBuilder<K, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheBuilder")
            .field("capacity", &self.capacity)
            .field("has_source", &self.source.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(k: &u32) -> Result<u32, String> {
        Ok(k * k)
    }

    #[test]
    fn policy_round_trips_through_str() {
        for policy in CachePolicy::ALL {
            assert_eq!(policy.to_string().parse::<CachePolicy>(), Ok(policy));
        }
        assert_eq!(" LRU ".parse::<CachePolicy>(), Ok(CachePolicy::Lru));
        assert_eq!("infinity".parse::<CachePolicy>(), Ok(CachePolicy::Unbounded));
        assert_eq!(
            "arc".parse::<CachePolicy>(),
            Err(ConfigError::UnknownPolicy("arc".to_string()))
        );
    }

    #[test]
    fn missing_source_is_rejected_for_every_policy() {
        for policy in CachePolicy::ALL {
            let result = CacheBuilder::<u32, u32, String>::new(4).build(policy);
            assert!(matches!(result, Err(ConfigError::NoSource)), "{policy}");
        }
        let cleared = CacheBuilder::new(4).source(square).boxed_source(None);
        assert!(matches!(cleared.build_lru(), Err(ConfigError::NoSource)));
    }

    #[test]
    fn no_source_is_reported_before_bad_capacity() {
        let result = CacheBuilder::<u32, u32, String>::new(0).build_fifo();
        assert!(matches!(result, Err(ConfigError::NoSource)));
    }

    #[test]
    fn bounded_policies_validate_capacity() {
        for policy in [CachePolicy::Fifo, CachePolicy::Lru] {
            assert!(policy.uses_capacity());
            let result = CacheBuilder::new(1).source(square).build(policy);
            assert!(matches!(
                result,
                Err(ConfigError::InvalidSize { capacity: 1, .. })
            ));
        }
    }

    #[test]
    fn unbounded_and_single_ignore_capacity() {
        let single = CacheBuilder::new(0).source(square).build(CachePolicy::Single).unwrap();
        assert_eq!(single.capacity(), Some(1));

        let unbounded = CacheBuilder::new(0)
            .source(square)
            .build(CachePolicy::Unbounded)
            .unwrap();
        assert_eq!(unbounded.capacity(), None);
        assert!(!CachePolicy::Unbounded.uses_capacity());
    }

    #[test]
    fn built_caches_memoize() {
        for policy in CachePolicy::ALL {
            let cache = CacheBuilder::new(2).capacity(3).source(square).build(policy).unwrap();
            assert_eq!(*cache.get(&3).unwrap(), 9);
            assert_eq!(*cache.get(&3).unwrap(), 9);
            assert_eq!((cache.hits(), cache.misses(), cache.size()), (1, 1, 1));
        }
    }

    #[test]
    fn typed_builders_return_concrete_caches() {
        let lru = CacheBuilder::new(2).source(square).build_lru().unwrap();
        lru.get(&1).unwrap();
        lru.get(&2).unwrap();
        lru.get(&1).unwrap();
        lru.get(&3).unwrap();
        assert_eq!(lru.keys(), vec![1, 3]);

        let fifo = CacheBuilder::new(2).source(square).build_fifo().unwrap();
        fifo.get(&1).unwrap();
        fifo.get(&2).unwrap();
        fifo.get(&1).unwrap();
        fifo.get(&3).unwrap();
        assert_eq!(fifo.keys(), vec![2, 3]);
    }

    #[test]
    fn debug_hides_source() {
        let builder = CacheBuilder::new(8).source(square);
        let dbg = format!("{builder:?}");
        assert!(dbg.contains("capacity: 8"));
        assert!(dbg.contains("has_source: true"));
    }
}
