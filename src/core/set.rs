//! Core trait definitions.
//!
//! Both concurrent sets expose one uniform contract so a driving workload
//! can swap implementations without changing a line:
//!
//! ```text
//! ConcurrentSet (methods take &self)
//!     ├── ShardedSet   (reader/writer lock per shard, grows per shard)
//!     └── LockFreeSet  (CAS on atomic slots, fixed capacity)
//! ```
//!
//! # Contract
//!
//! 1. **Insert-if-absent**: `insert` returns `true` exactly once per
//!    distinct key across all threads, no matter how calls interleave
//! 2. **No deletion**: a resident key stays resident for the set's lifetime
//! 3. **Quiescent counting**: `len` is exact once all writers have finished;
//!    under concurrent inserts it may lag, but never overcounts
//! 4. **Hints are free**: `prefetch` has no correctness contract at all

/// Uniform interface of the concurrent insert-if-absent sets.
///
/// All methods take `&self`; implementations provide interior mutability via
/// locks or atomics and are safe to drive from any number of threads through
/// an `Arc`.
///
/// # Examples
///
/// ```
/// use dedupset::core::ConcurrentSet;
/// use dedupset::{LockFreeSet, ShardedSet};
/// use std::sync::Arc;
///
/// fn dedup<S: ConcurrentSet>(set: &S, stream: &[u64]) -> usize {
///     stream.iter().filter(|&&h| set.insert(h)).count()
/// }
///
/// let sharded = Arc::new(ShardedSet::new(4).unwrap());
/// let lockfree = Arc::new(LockFreeSet::new(100).unwrap());
///
/// assert_eq!(dedup(&*sharded, &[1, 2, 2, 3]), 3);
/// assert_eq!(dedup(&*lockfree, &[1, 2, 2, 3]), 3);
/// ```
pub trait ConcurrentSet: Send + Sync {
    /// Insert `key` if absent; returns `true` iff the key was new.
    fn insert(&self, key: u64) -> bool;

    /// Number of resident keys.
    ///
    /// Exact once all writers have quiesced. Under concurrent inserts the
    /// value may trail in-flight successes but is never an overcount.
    fn len(&self) -> usize;

    /// Whether the set holds no keys, with the same staleness caveat as
    /// [`len`](ConcurrentSet::len).
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Issue a cache-prefetch hint for the slot `key` would probe first.
    ///
    /// Performance hint only: implementations may drop it, and it is safe
    /// to call for keys that will never be inserted.
    fn prefetch(&self, key: u64);
}
