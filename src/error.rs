//! Error types for the memokit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned by constructors when a cache can not be built
//!   (bad capacity, missing source, unknown policy name). No partially built
//!   cache is ever handed out.
//! - [`InvariantError`]: Returned by `check_invariants` when the index, the
//!   ordering structure and the statistics disagree.
//!
//! Errors produced by a cache's source function are *not* wrapped here: `get`
//! returns the caller's own error type untouched so it can be matched on.
//!
//! ## Example Usage
//!
//! ```
//! use memokit::error::ConfigError;
//! use memokit::policy::lru::LruCache;
//!
//! let bad = LruCache::new(1, |k: &u32| Ok::<_, ()>(*k));
//! assert!(matches!(bad, Err(ConfigError::InvalidSize { capacity: 1, .. })));
//! ```

use thiserror::Error;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Smallest capacity accepted by the bounded (FIFO, LRU) policies.
///
/// A one-slot bounded cache is served by the single-slot policy instead.
pub const MIN_BOUNDED_CAPACITY: usize = 2;

/// Error returned when a cache can not be constructed from its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The requested capacity is below [`MIN_BOUNDED_CAPACITY`].
    #[error("InvalidSize: {policy} capacity must be at least 2, got {capacity}")]
    InvalidSize {
        /// Name of the policy that rejected the capacity.
        policy: &'static str,
        /// The rejected capacity.
        capacity: usize,
    },
    /// No source function was supplied.
    #[error("NoSource: a source function is required to build a cache")]
    NoSource,
    /// A policy name did not match any known policy.
    #[error("unknown cache policy {0:?}, expected one of single, unbounded, fifo, lru")]
    UnknownPolicy(String),
}

impl ConfigError {
    /// Validates a bounded-policy capacity.
    pub(crate) fn check_capacity(policy: &'static str, capacity: usize) -> Result<(), Self> {
        if capacity < MIN_BOUNDED_CAPACITY {
            tracing::debug!(policy, capacity, "rejecting cache capacity");
            return Err(ConfigError::InvalidSize { policy, capacity });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by [`MemoCache::check_invariants`](crate::memo::MemoCache::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
