//! Sizing parameter calculations.
//!
//! All capacity and shard-count math lives here so the tables themselves
//! never have to reason about rounding or overflow. Every function validates
//! its inputs and returns [`Result`], keeping allocation sites panic-free.
//!
//! # Constants
//!
//! | Constant | Value | Role |
//! |----------|-------|------|
//! | [`INITIAL_CAPACITY`] | 64 | Starting slot count of a [`SequentialSet`](crate::core::SequentialSet) |
//! | [`LOAD_FACTOR`] | 0.5 | Growth trigger: resident keys / capacity |
//! | [`SHARDS_PER_THREAD`] | 64 | Shard-count multiplier for [`ShardedSet`](crate::ShardedSet) |
//! | [`LOCKFREE_HEADROOM`] | 1.5 | Slack multiplier before power-of-two rounding |

use crate::error::{DedupSetError, Result};

/// Initial slot count of a freshly created sequential table.
pub const INITIAL_CAPACITY: usize = 64;

/// Maximum ratio of resident keys to capacity before a table grows.
///
/// At 0.5, linear probe chains stay short (expected O(1) probes) and a
/// single doubling always restores the invariant.
pub const LOAD_FACTOR: f64 = 0.5;

/// Shards allocated per hinted thread.
///
/// With 64 shards per thread, the probability of two threads colliding on a
/// shard at any instant stays low even when every thread inserts
/// continuously, keeping the reader/writer locks nearly uncontended.
pub const SHARDS_PER_THREAD: usize = 64;

/// Headroom multiplier applied to the expected item count before rounding
/// the lock-free capacity up to a power of two.
pub const LOCKFREE_HEADROOM: f64 = 1.5;

/// Number of resident keys above which a table of `capacity` slots must grow.
#[inline]
#[must_use]
pub(crate) fn grow_threshold(capacity: usize) -> usize {
    (capacity as f64 * LOAD_FACTOR) as usize
}

/// Derive the shard count for a given thread-count hint.
///
/// The shard count is fixed for the lifetime of the set; it is never
/// recomputed after construction.
///
/// # Errors
///
/// - [`DedupSetError::InvalidThreadHint`] if `thread_hint == 0`
/// - [`DedupSetError::CapacityOverflow`] if `thread_hint × 64` overflows
///
/// # Examples
///
/// ```
/// use dedupset::core::params;
///
/// assert_eq!(params::shard_count(2).unwrap(), 128);
/// assert!(params::shard_count(0).is_err());
/// ```
pub fn shard_count(thread_hint: usize) -> Result<usize> {
    if thread_hint == 0 {
        return Err(DedupSetError::invalid_thread_hint(thread_hint));
    }

    thread_hint
        .checked_mul(SHARDS_PER_THREAD)
        .ok_or_else(|| DedupSetError::capacity_overflow(thread_hint))
}

/// Derive the fixed slot count for a lock-free set.
///
/// Returns the smallest power of two ≥ `1.5 × expected_items`. The headroom
/// keeps probe sequences short near the expected fill, and the power-of-two
/// rounding gives the table extra slack on top.
///
/// # Errors
///
/// - [`DedupSetError::InvalidItemCount`] if `expected_items == 0`
/// - [`DedupSetError::CapacityOverflow`] if the rounded capacity overflows
///
/// # Examples
///
/// ```
/// use dedupset::core::params;
///
/// assert_eq!(params::lockfree_capacity(4).unwrap(), 8);
/// assert_eq!(params::lockfree_capacity(1_000).unwrap(), 2_048);
/// assert!(params::lockfree_capacity(0).is_err());
/// ```
pub fn lockfree_capacity(expected_items: usize) -> Result<usize> {
    if expected_items == 0 {
        return Err(DedupSetError::invalid_item_count(expected_items));
    }

    let with_headroom = expected_items
        .checked_add(expected_items / 2)
        .ok_or_else(|| DedupSetError::capacity_overflow(expected_items))?;

    with_headroom
        .checked_next_power_of_two()
        .ok_or_else(|| DedupSetError::capacity_overflow(with_headroom))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grow_threshold_is_half_capacity() {
        assert_eq!(grow_threshold(64), 32);
        assert_eq!(grow_threshold(128), 64);
        assert_eq!(grow_threshold(2), 1);
    }

    #[test]
    fn test_shard_count_scales_with_hint() {
        assert_eq!(shard_count(1).unwrap(), 64);
        assert_eq!(shard_count(2).unwrap(), 128);
        assert_eq!(shard_count(16).unwrap(), 1024);
    }

    #[test]
    fn test_shard_count_rejects_zero_hint() {
        assert_eq!(
            shard_count(0),
            Err(DedupSetError::InvalidThreadHint { hint: 0 })
        );
    }

    #[test]
    fn test_shard_count_overflow() {
        assert!(matches!(
            shard_count(usize::MAX),
            Err(DedupSetError::CapacityOverflow { .. })
        ));
    }

    #[test]
    fn test_lockfree_capacity_rounds_up() {
        // 4 × 1.5 = 6, next power of two is 8
        assert_eq!(lockfree_capacity(4).unwrap(), 8);
        // 1000 × 1.5 = 1500 → 2048
        assert_eq!(lockfree_capacity(1_000).unwrap(), 2_048);
        // Already a power of two after headroom: 2 × 1.5 = 3 → 4
        assert_eq!(lockfree_capacity(2).unwrap(), 4);
        assert_eq!(lockfree_capacity(1).unwrap(), 1);
    }

    #[test]
    fn test_lockfree_capacity_rejects_zero() {
        assert_eq!(
            lockfree_capacity(0),
            Err(DedupSetError::InvalidItemCount { count: 0 })
        );
    }

    #[test]
    fn test_lockfree_capacity_overflow() {
        assert!(matches!(
            lockfree_capacity(usize::MAX),
            Err(DedupSetError::CapacityOverflow { .. })
        ));
    }
}
