//! dedupset: concurrent insert-if-absent sets for 64-bit hash values.
//!
//! This crate deduplicates large streams of pre-hashed 64-bit keys across
//! many worker threads with minimal contention. It stores keys, not
//! key→value pairs, and assumes the keys are already well-distributed
//! hashes; no further mixing is applied.
//!
//! # Two Synchronization Strategies
//!
//! The same `insert`/`len`/`prefetch` contract is provided by two
//! implementations that trade off differently between synchronization cost
//! and memory-ordering complexity:
//!
//! ## 1. Sharded Locking ([`ShardedSet`])
//!
//! Keys are partitioned across many independently-locked sub-tables (64 per
//! hinted thread). Each shard pairs a reader/writer lock with a
//! [`SequentialSet`](crate::core::SequentialSet) that grows by doubling. Duplicate
//! inserts, the common case in a dedup stream, resolve under a shared
//! lock and never serialize against each other.
//!
//! ```
//! use dedupset::ShardedSet;
//! use std::sync::Arc;
//!
//! let set = Arc::new(ShardedSet::new(4).unwrap());
//!
//! let set_clone = Arc::clone(&set);
//! std::thread::spawn(move || {
//!     set_clone.insert(0xABCD_1234);  // &self method, no external Mutex
//! })
//! .join()
//! .unwrap();
//!
//! assert!(!set.insert(0xABCD_1234)); // already present
//! ```
//!
//! ## 2. Lock-Free CAS ([`LockFreeSet`])
//!
//! A flat array of atomic slots sized once at construction. Insert-if-absent
//! is a compare-and-swap from the empty sentinel to the key; no locks, no
//! blocking, no growth path. The caller supplies an upper-bound estimate of
//! the unique count, and that estimate is a hard contract (see the module
//! docs for what happens when it is wrong).
//!
//! ```
//! use dedupset::LockFreeSet;
//!
//! let set = LockFreeSet::new(10_000).unwrap();
//! assert!(set.insert(77));
//! assert!(!set.insert(77));
//! assert_eq!(set.len(), 1);
//! ```
//!
//! # Choosing a Set
//!
//! | | [`ShardedSet`] | [`LockFreeSet`] |
//! |---|---|---|
//! | Synchronization | RwLock per shard | CAS per slot |
//! | Capacity | Grows per shard | Fixed at construction |
//! | Blocking | Same-shard writers only | Never |
//! | Reserved (unstorable) key | `u64::MAX` | `0` |
//! | Needs cardinality estimate | No | Yes (hard limit) |
//!
//! Both implement the [`ConcurrentSet`](crate::core::ConcurrentSet) trait, so
//! driving code can stay generic:
//!
//! ```
//! use dedupset::core::ConcurrentSet;
//! use dedupset::{LockFreeSet, ShardedSet};
//!
//! fn unique_count<S: ConcurrentSet>(set: &S, stream: &[u64]) -> usize {
//!     stream.iter().filter(|&&h| set.insert(h)).count()
//! }
//!
//! let stream = [3u64, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5];
//! assert_eq!(unique_count(&ShardedSet::new(1).unwrap(), &stream), 7);
//! assert_eq!(unique_count(&LockFreeSet::new(16).unwrap(), &stream), 7);
//! ```
//!
//! # Prefetching
//!
//! Both sets expose `prefetch(key)`: a non-blocking cache hint for the slot
//! the key would probe first. Streaming workloads that know their next keys
//! can hide memory latency by prefetching a fixed stride ahead:
//!
//! ```
//! use dedupset::LockFreeSet;
//!
//! const PREFETCH_STRIDE: usize = 16;
//!
//! let hashes: Vec<u64> = (1..=1_000u64).collect();
//! let set = LockFreeSet::new(1_000).unwrap();
//!
//! for i in 0..hashes.len() {
//!     if i + PREFETCH_STRIDE < hashes.len() {
//!         set.prefetch(hashes[i + PREFETCH_STRIDE]);
//!     }
//!     set.insert(hashes[i]);
//! }
//!
//! assert_eq!(set.len(), 1_000);
//! ```
//!
//! # Non-Goals
//!
//! - **Deletion**: a resident key stays resident for the set's lifetime
//! - **Persistence**: nothing is serialized; sets live and die in memory
//! - **Lock-free growth**: [`LockFreeSet`] never resizes; exceeding its
//!   capacity is a sizing bug on the caller's side, reported by panic

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::manual_range_contains)]

/// Core traits, the sequential table, and sizing math
pub mod core;

/// Error types and result aliases
pub mod error;

/// Concurrent set implementations
pub mod sync;

/// Type-safe builders for both concurrent sets
pub mod builder;

/// Operation counters (requires `metrics` feature)
#[cfg(feature = "metrics")]
pub mod metrics;

/// Internal helpers (prefetch)
mod util;

// Re-export commonly used types at the crate root
pub use error::{DedupSetError, Result};

pub use crate::core::set::ConcurrentSet;
pub use sync::{LockFreeSet, ShardedSet};

pub use builder::{LockFreeSetBuilder, ShardedSetBuilder};

#[cfg(feature = "metrics")]
pub use metrics::SetMetrics;

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```
/// use dedupset::prelude::*;
///
/// let set = ShardedSet::new(1).unwrap();
/// assert!(set.insert(42));
/// ```
pub mod prelude {
    pub use crate::builder::{LockFreeSetBuilder, ShardedSetBuilder};
    pub use crate::core::set::ConcurrentSet;
    pub use crate::core::table::SequentialSet;
    pub use crate::error::{DedupSetError, Result};
    pub use crate::sync::{LockFreeSet, ShardedSet};

    #[cfg(feature = "metrics")]
    pub use crate::metrics::SetMetrics;
}
