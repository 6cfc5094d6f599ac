//! Lock-free fixed-capacity hash set built on compare-and-swap.
//!
//! `LockFreeSet` stores 64-bit keys directly in a flat array of `AtomicU64`
//! slots. Insert-if-absent is a single-word CAS protocol: no locks, no
//! blocking, and no thread can prevent another from making progress (a slot
//! once claimed is never released, so every retry strictly shrinks the set
//! of slots still contendable).
//!
//! # Capacity Is Fixed
//!
//! The slot array is sized once at construction (smallest power of two ≥
//! 1.5 × the expected unique count) and **never grows**. Sizing is the
//! caller's contract: the probe protocol only terminates while empty slots
//! remain reachable. As a backstop, a probe that walks the entire table
//! without resolving panics with a capacity-exhausted message rather than
//! spinning forever. Treat that panic as a construction-time sizing bug,
//! not a recoverable condition.
//!
//! # Memory Ordering
//!
//! All atomics use `Relaxed` ordering. The set publishes nothing besides the
//! key itself, which travels inside the single CAS word; correctness needs
//! only the per-slot total order on the empty → occupied transition that CAS
//! already provides. No fence is required for `len` either; it is
//! documented as quiescent-accurate only.
//!
//! # Examples
//!
//! ```
//! use dedupset::LockFreeSet;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let set = Arc::new(LockFreeSet::new(1_000).unwrap());
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let set = Arc::clone(&set);
//!         thread::spawn(move || {
//!             for i in 1..=250u64 {
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
//! assert_eq!(set.len(), 1_000);
//! ```

use crate::core::{params, ConcurrentSet};
use crate::error::Result;
use crate::util::prefetch_read;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

#[cfg(feature = "metrics")]
use crate::metrics::SetMetrics;

/// Reserved slot value marking "empty".
///
/// The slot array is zero-initialized, so zero doubles as the empty
/// sentinel, which means the key value `0` is indistinguishable from an
/// empty slot and **cannot be stored**. Insert rejects it with
/// `debug_assert!`. Note the asymmetry with
/// [`SequentialSet`](crate::core::SequentialSet), whose reserved key is
/// `u64::MAX`.
pub const EMPTY_SLOT: u64 = 0;

/// Lock-free, fixed-capacity concurrent hash set over `u64` keys.
///
/// # Thread Safety
///
/// - **Send + Sync**: slots are `AtomicU64`, the counter is `AtomicUsize`
/// - **Lock-free**: every operation completes in a bounded number of its own
///   steps once contended slots resolve; nothing blocks
/// - **At-most-once claim**: CAS guarantees exactly one thread transitions a
///   given slot from empty to occupied, and an occupied slot is never
///   overwritten
///
/// # Examples
///
/// ```
/// use dedupset::LockFreeSet;
///
/// let set = LockFreeSet::new(4).unwrap();
/// assert_eq!(set.capacity(), 8); // 4 × 1.5 = 6, rounded up to 8
/// assert!(set.insert(7));
/// assert!(!set.insert(7));
/// ```
#[derive(Debug)]
pub struct LockFreeSet {
    /// Flat atomic slot array; zero means empty.
    slots: Box<[AtomicU64]>,

    /// Resident-key counter, incremented after each successful claim.
    len: AtomicUsize,

    /// Expected unique count supplied at construction (metadata only).
    expected_items: usize,

    #[cfg(feature = "metrics")]
    metrics: SetMetrics,
}

impl LockFreeSet {
    /// Create a set sized for `expected_items` distinct keys.
    ///
    /// Capacity is fixed at the smallest power of two ≥ 1.5 ×
    /// `expected_items` and all slots start empty.
    ///
    /// # Errors
    ///
    /// - [`InvalidItemCount`](crate::DedupSetError::InvalidItemCount) if
    ///   `expected_items == 0`
    /// - [`CapacityOverflow`](crate::DedupSetError::CapacityOverflow) if the
    ///   rounded capacity overflows `usize`
    ///
    /// # Examples
    ///
    /// ```
    /// use dedupset::LockFreeSet;
    ///
    /// let set = LockFreeSet::new(1_000_000).unwrap();
    /// assert!(set.capacity() >= 1_500_000);
    /// assert!(set.capacity().is_power_of_two());
    /// ```
    pub fn new(expected_items: usize) -> Result<Self> {
        let capacity = params::lockfree_capacity(expected_items)?;

        let slots = (0..capacity)
            .map(|_| AtomicU64::new(EMPTY_SLOT))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Ok(Self {
            slots,
            len: AtomicUsize::new(0),
            expected_items,
            #[cfg(feature = "metrics")]
            metrics: SetMetrics::new(),
        })
    }

    /// Fixed slot count of this set.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Expected unique count supplied at construction.
    #[must_use]
    pub fn expected_items(&self) -> usize {
        self.expected_items
    }

    /// Insert-outcome counters (requires `metrics` feature).
    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn metrics(&self) -> &SetMetrics {
        &self.metrics
    }

    /// Home slot of a key: upper 32 bits modulo capacity.
    #[inline]
    fn slot_index(&self, key: u64) -> usize {
        ((key >> 32) as usize) % self.slots.len()
    }

    /// Insert `key` if absent; returns `true` iff this call claimed it.
    ///
    /// Probes linearly from the key's home slot:
    ///
    /// 1. Slot holds `key` → duplicate, return `false`
    /// 2. Slot holds another key → advance to the next slot
    /// 3. Slot empty → CAS empty → `key`; on success count and return
    ///    `true`; if the race was lost to the *same* key return `false`; if
    ///    lost to a different key, re-read the same slot (the occupant is
    ///    now permanent, so the retry resolves it as case 1 or 2)
    ///
    /// # Panics
    ///
    /// Panics if a probe walks the whole table without resolving: the
    /// resident count has effectively reached capacity, violating the sizing
    /// contract made at construction.
    pub fn insert(&self, key: u64) -> bool {
        let inserted = self.insert_impl(key);

        #[cfg(feature = "metrics")]
        self.metrics.record_insert(inserted);

        inserted
    }

    fn insert_impl(&self, key: u64) -> bool {
        debug_assert_ne!(key, EMPTY_SLOT, "0 is the reserved empty sentinel");

        let capacity = self.slots.len();
        let mut i = self.slot_index(key);
        let mut occupied = 0usize;

        loop {
            let current = self.slots[i].load(Ordering::Relaxed);

            if current == key {
                return false;
            }

            if current == EMPTY_SLOT {
                match self.slots[i].compare_exchange(
                    EMPTY_SLOT,
                    key,
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                ) {
                    Ok(_) => {
                        self.len.fetch_add(1, Ordering::Relaxed);
                        return true;
                    }
                    // Lost the race to the same key: duplicate inserted
                    // concurrently.
                    Err(winner) if winner == key => return false,
                    // Lost to a different key. The slot is now permanently
                    // occupied; re-read it without advancing.
                    Err(_) => continue,
                }
            }

            // Occupied by another key: step forward, wrapping at capacity.
            occupied += 1;
            assert!(
                occupied < capacity,
                "LockFreeSet capacity exhausted ({} slots full); \
                 construct with a larger expected_items",
                capacity
            );
            i = (i + 1) % capacity;
        }
    }

    /// Number of resident keys.
    ///
    /// Reflects a lower bound at the instant of the read: successful inserts
    /// still in flight may not be counted yet, but the value is never an
    /// overcount. Exact once all writers have quiesced.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }

    /// Whether the set holds no keys, with the same staleness caveat as
    /// [`len`](LockFreeSet::len).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Issue a cache-prefetch hint for the key's home slot.
    ///
    /// Unsynchronized and free to race with concurrent inserts; it never
    /// reads the slot value.
    #[inline]
    pub fn prefetch(&self, key: u64) {
        let i = self.slot_index(key);
        prefetch_read(&self.slots[i] as *const AtomicU64);
    }
}

impl ConcurrentSet for LockFreeSet {
    #[inline]
    fn insert(&self, key: u64) -> bool {
        LockFreeSet::insert(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        LockFreeSet::len(self)
    }

    #[inline]
    fn prefetch(&self, key: u64) {
        LockFreeSet::prefetch(self, key);
    }
}
