//! Operation counters for the concurrent sets (requires `metrics` feature).
//!
//! Each concurrent set embeds a [`SetMetrics`] and bumps it on every insert,
//! splitting outcomes into new keys and duplicates. Counters are plain
//! relaxed atomics: they impose one uncontended `fetch_add` per insert and
//! make no cross-counter consistency promise. Read them for monitoring,
//! not for correctness decisions.
//!
//! # Examples
//!
//! ```
//! use dedupset::LockFreeSet;
//!
//! let set = LockFreeSet::new(100).unwrap();
//! set.insert(1);
//! set.insert(1);
//!
//! let m = set.metrics();
//! assert_eq!(m.inserts_total(), 2);
//! assert_eq!(m.duplicates_total(), 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Insert-outcome counters embedded in a concurrent set.
#[derive(Debug, Default)]
pub struct SetMetrics {
    /// Total `insert` calls, regardless of outcome.
    inserts: AtomicU64,

    /// Insert calls that found the key already resident.
    duplicates: AtomicU64,
}

impl SetMetrics {
    /// Create zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one insert outcome.
    #[inline]
    pub(crate) fn record_insert(&self, inserted: bool) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
        if !inserted {
            self.duplicates.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Total `insert` calls observed so far.
    #[must_use]
    pub fn inserts_total(&self) -> u64 {
        self.inserts.load(Ordering::Relaxed)
    }

    /// Insert calls that reported a duplicate.
    #[must_use]
    pub fn duplicates_total(&self) -> u64 {
        self.duplicates.load(Ordering::Relaxed)
    }

    /// Insert calls that claimed a new key.
    #[must_use]
    pub fn unique_total(&self) -> u64 {
        self.inserts_total() - self.duplicates_total()
    }
}
