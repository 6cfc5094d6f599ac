//! Sharded lock-based hash set for high-concurrency workloads.
//!
//! `ShardedSet` partitions the key space across many independently-locked
//! sub-tables. A thread only ever contends with other threads targeting the
//! *same* shard, and with 64 shards per hinted thread
//! ([`params::SHARDS_PER_THREAD`]) that collision is rare even when every
//! thread inserts continuously.
//!
//! # Architecture
//!
//! ```text
//! ShardedSet
//! ┌──────────────────────────────────────────────────────┐
//! │ shard_index(key) = (lower 32 bits of key) % shards   │
//! └──────────────────────────────────────────────────────┘
//!        │
//! ┌──────┴──────┬─────────────┬─────────────┬───────────┐
//! Shard 0       Shard 1       Shard 2       Shard N
//! ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐
//! │ RwLock   │  │ RwLock   │  │ RwLock   │  │ RwLock   │
//! │ SeqSet   │  │ SeqSet   │  │ SeqSet   │  │ SeqSet   │
//! └──────────┘  └──────────┘  └──────────┘  └──────────┘
//! ```
//!
//! Routing uses the key's *lower* 32 bits; each shard's [`SequentialSet`]
//! probes by the *upper* 32 bits. The two halves are disjoint, so keys that
//! share a shard still spread across that shard's slots.
//!
//! # Locking Protocol
//!
//! | Operation    | Locks acquired       | Mode      | Notes |
//! |--------------|----------------------|-----------|-------|
//! | `insert`     | One shard            | Shared, then exclusive | See below |
//! | `len`        | Each shard in turn   | Shared    | Not a snapshot |
//! | `prefetch`   | One shard, `try_read`| Shared    | Skipped if contended |
//!
//! `insert` is optimistic: it first takes the shard lock in *shared* mode
//! and probes. Duplicates, the common case in a dedup stream, resolve
//! entirely under the shared lock, never blocking other readers. Only a miss
//! releases the shared lock and re-acquires in *exclusive* mode. The gap
//! between the two critical sections is a benign race: another thread may
//! insert the same key in between, but [`SequentialSet::insert`] re-probes
//! under the exclusive lock, so the loser simply observes a duplicate.
//!
//! No deadlock is possible: a thread holds at most one shard lock at a time
//! and never re-enters it. Per-shard growth happens inside the exclusive
//! section and other shards are unaffected; the shard count itself never
//! changes.
//!
//! # Examples
//!
//! ```
//! use dedupset::ShardedSet;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let set = Arc::new(ShardedSet::new(4).unwrap());
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let set = Arc::clone(&set);
//!         thread::spawn(move || {
//!             for i in 0..1_000u64 {
//!                 set.insert(t * 1_000 + i);
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for h in handles {
//!     h.join().unwrap();
//! }
//!
//! assert_eq!(set.len(), 4_000);
//! ```

use crate::core::{params, ConcurrentSet, SequentialSet};
use crate::error::{DedupSetError, Result};
use parking_lot::RwLock;

#[cfg(feature = "metrics")]
use crate::metrics::SetMetrics;

/// One shard: a reader/writer lock over its own sequential table.
///
/// Aligned to 128 bytes so adjacent shards never share a cache line;
/// otherwise lock traffic on one shard would invalidate its neighbors'
/// lines (false sharing).
///
/// `parking_lot::RwLock` is chosen over `std::sync::RwLock` because:
/// - No poisoning: a panicking inserter must not wedge its whole shard
/// - Writer-fair queueing: a growing shard is not starved by readers
/// - Compact: one word per lock keeps the shard array dense
#[repr(align(128))]
#[derive(Debug)]
struct Shard {
    table: RwLock<SequentialSet>,
}

impl Shard {
    fn new() -> Self {
        Self {
            table: RwLock::new(SequentialSet::new()),
        }
    }
}

/// Sharded, lock-based concurrent hash set over `u64` keys.
///
/// # Thread Safety
///
/// - **Send + Sync**: share freely via `Arc`
/// - **Blocking**: an insert may block, but only on threads targeting the
///   same shard; there is no timeout or cancellation
/// - **Growth under lock**: each shard's table doubles independently while
///   that shard's exclusive lock is held
///
/// # Examples
///
/// ```
/// use dedupset::ShardedSet;
///
/// let set = ShardedSet::new(2).unwrap();
/// assert_eq!(set.shard_count(), 128);
/// assert!(set.insert(99));
/// assert!(!set.insert(99));
/// ```
#[derive(Debug)]
pub struct ShardedSet {
    /// Independent shards; count fixed at construction.
    shards: Box<[Shard]>,

    /// Thread-count hint supplied at construction (metadata only).
    thread_hint: usize,

    #[cfg(feature = "metrics")]
    metrics: SetMetrics,
}

impl ShardedSet {
    /// Create a set tuned for `thread_hint` concurrent inserter threads.
    ///
    /// Allocates `thread_hint × 64` shards; the count is never recomputed.
    ///
    /// # Errors
    ///
    /// - [`InvalidThreadHint`](DedupSetError::InvalidThreadHint) if
    ///   `thread_hint == 0`
    /// - [`CapacityOverflow`](DedupSetError::CapacityOverflow) if the shard
    ///   count overflows
    ///
    /// # Examples
    ///
    /// ```
    /// use dedupset::ShardedSet;
    ///
    /// let set = ShardedSet::new(8).unwrap();
    /// assert_eq!(set.shard_count(), 512);
    /// ```
    pub fn new(thread_hint: usize) -> Result<Self> {
        let num_shards = params::shard_count(thread_hint)?;
        Self::build(num_shards, thread_hint)
    }

    /// Create a set with an explicit shard count.
    ///
    /// Escape hatch for callers that want to tune contention directly
    /// instead of going through the thread-hint multiplier.
    ///
    /// # Errors
    ///
    /// [`InvalidShardCount`](DedupSetError::InvalidShardCount) if
    /// `num_shards == 0`.
    pub fn with_shard_count(num_shards: usize) -> Result<Self> {
        if num_shards == 0 {
            return Err(DedupSetError::invalid_shard_count(num_shards));
        }
        // Round up so the recorded hint still covers the shard count.
        let hint = (num_shards + params::SHARDS_PER_THREAD - 1) / params::SHARDS_PER_THREAD;
        Self::build(num_shards, hint)
    }

    fn build(num_shards: usize, thread_hint: usize) -> Result<Self> {
        let shards = (0..num_shards)
            .map(|_| Shard::new())
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Ok(Self {
            shards,
            thread_hint,
            #[cfg(feature = "metrics")]
            metrics: SetMetrics::new(),
        })
    }

    /// Number of shards (fixed for the lifetime of the set).
    #[inline]
    #[must_use]
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Thread-count hint supplied at construction.
    #[must_use]
    pub fn thread_hint(&self) -> usize {
        self.thread_hint
    }

    /// Insert-outcome counters (requires `metrics` feature).
    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn metrics(&self) -> &SetMetrics {
        &self.metrics
    }

    /// Owning shard of a key: lower 32 bits modulo shard count.
    ///
    /// A pure function of the key alone: shard residency never changes,
    /// regardless of any table growth inside the shard.
    #[inline]
    fn shard_index(&self, key: u64) -> usize {
        ((key as u32) as usize) % self.shards.len()
    }

    /// Insert `key` if absent; returns `true` iff the key was new.
    ///
    /// Optimistic read-then-upgrade: probe under the shared lock first so
    /// duplicates never serialize against each other, and take the
    /// exclusive lock only on a miss. The insert under the exclusive lock
    /// re-probes, so losing the race in the unlock/lock gap is harmless.
    ///
    /// # Examples
    ///
    /// ```
    /// use dedupset::ShardedSet;
    ///
    /// let set = ShardedSet::new(1).unwrap();
    /// assert!(set.insert(7));
    /// assert!(!set.insert(7));
    /// ```
    pub fn insert(&self, key: u64) -> bool {
        let inserted = self.insert_impl(key);

        #[cfg(feature = "metrics")]
        self.metrics.record_insert(inserted);

        inserted
    }

    fn insert_impl(&self, key: u64) -> bool {
        let shard = &self.shards[self.shard_index(key)];

        {
            let table = shard.table.read();
            if table.find(key) {
                return false;
            }
        }

        // Shared lock released above; re-acquire exclusively. The table's
        // own probe re-checks presence, so an interleaved insert of the
        // same key is detected here.
        let mut table = shard.table.write();
        table.insert(key)
    }

    /// Number of resident keys, summed across shards.
    ///
    /// Aggregation takes each shard's lock in shared mode one at a time;
    /// the total is **not** a transactional snapshot. Under concurrent
    /// inserts it may miss in-flight keys; it is exact once all writers
    /// have quiesced.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.table.read().len()).sum()
    }

    /// Whether the set holds no keys, with the same staleness caveat as
    /// [`len`](ShardedSet::len).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Issue a cache-prefetch hint for the key's home slot in its shard.
    ///
    /// Best-effort: if the shard is write-locked at this instant the hint
    /// is simply dropped rather than blocking. A hint that has to wait for
    /// a lock has already defeated its purpose.
    #[inline]
    pub fn prefetch(&self, key: u64) {
        let shard = &self.shards[self.shard_index(key)];
        if let Some(table) = shard.table.try_read() {
            table.prefetch(key);
        }
    }
}

impl ConcurrentSet for ShardedSet {
    #[inline]
    fn insert(&self, key: u64) -> bool {
        ShardedSet::insert(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        ShardedSet::len(self)
    }

    #[inline]
    fn prefetch(&self, key: u64) {
        ShardedSet::prefetch(self, key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_shard_count_from_hint() {
        assert_eq!(ShardedSet::new(1).unwrap().shard_count(), 64);
        assert_eq!(ShardedSet::new(2).unwrap().shard_count(), 128);
    }

    #[test]
    fn test_zero_hint_rejected() {
        assert!(ShardedSet::new(0).is_err());
        assert!(ShardedSet::with_shard_count(0).is_err());
    }

    #[test]
    fn test_explicit_shard_count() {
        let set = ShardedSet::with_shard_count(7).unwrap();
        assert_eq!(set.shard_count(), 7);
        assert!(set.insert(123));
        assert!(!set.insert(123));
    }

    #[test]
    fn test_insert_and_duplicate() {
        let set = ShardedSet::new(1).unwrap();

        assert!(set.insert(5));
        assert!(set.insert(21));
        assert!(!set.insert(5));
        assert!(set.insert(37));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_keys_spread_across_shards() {
        let set = ShardedSet::new(1).unwrap();
        // Lower 32 bits select the shard: consecutive keys hit
        // consecutive shards.
        for i in 0..64u64 {
            assert!(set.insert(i));
        }
        assert_eq!(set.len(), 64);
    }

    #[test]
    fn test_shard_growth_under_lock() {
        let set = ShardedSet::new(1).unwrap();
        // Fixed lower 32 bits: every key routes to one shard, whose table
        // must grow from 64 slots to hold 100 residents.
        let keys: Vec<u64> = (1..=100).map(|i| (i << 32) | 7).collect();

        for &k in &keys {
            assert!(set.insert(k));
        }
        assert_eq!(set.len(), 100);
        for &k in &keys {
            assert!(!set.insert(k), "key {:#x} lost across shard growth", k);
        }
    }

    #[test]
    fn test_concurrent_same_key_single_winner() {
        for _ in 0..100 {
            let set = Arc::new(ShardedSet::new(2).unwrap());
            assert_eq!(set.shard_count(), 128);

            let handles: Vec<_> = (0..2)
                .map(|_| {
                    let set = Arc::clone(&set);
                    thread::spawn(move || set.insert(0xFEED_FACE))
                })
                .collect();

            let wins = handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|&won| won)
                .count();

            assert_eq!(wins, 1, "exactly one thread must claim the key");
            assert_eq!(set.len(), 1);
        }
    }

    #[test]
    fn test_prefetch_never_blocks() {
        let set = ShardedSet::new(1).unwrap();
        set.prefetch(42);
        set.insert(42);
        set.prefetch(42);
        assert_eq!(set.len(), 1);
    }
}
