//! Hit/miss/size counters shared by every policy.
//!
//! A [`Stat`] lives next to the policy core inside the cache lock and is only
//! mutated by the thread holding that lock. Readers get a `Copy` snapshot.

/// Hit, miss and occupancy counters of one cache instance.
///
/// `hits` and `misses` only ever grow, and every `get` bumps exactly one of
/// them. `size` is the number of resident entries.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stat {
    hits: u64,
    misses: u64,
    size: usize,
}

impl Stat {
    /// Creates zeroed counters.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `get` calls answered from the cache.
    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of `get` calls that had to consult the source.
    #[inline]
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Number of resident entries.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of `get` calls.
    #[inline]
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups served from the cache, `0.0` before the first lookup.
    pub fn hit_ratio(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    #[inline]
    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    #[inline]
    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// A new entry took a free slot.
    #[inline]
    pub(crate) fn record_grow(&mut self) {
        self.size += 1;
    }
}
