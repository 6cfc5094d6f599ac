//! Builders for the concurrent sets.
//!
//! Thin, validated construction layers over [`ShardedSet`] and
//! [`LockFreeSet`]. The builders exist for the knobs the plain constructors
//! don't surface (a CPU-derived default thread hint, an explicit shard
//! count) and route every parameter through the same [`Result`]-returning
//! validation as the constructors.
//!
//! # Examples
//!
//! ## Defaults from the machine
//!
//! ```
//! use dedupset::builder::ShardedSetBuilder;
//!
//! // Thread hint defaults to the number of logical CPUs.
//! let set = ShardedSetBuilder::new().build().unwrap();
//! assert!(set.shard_count() >= 64);
//! ```
//!
//! ## Error Handling
//!
//! ```
//! use dedupset::builder::LockFreeSetBuilder;
//!
//! let result = LockFreeSetBuilder::new().expected_items(0).build();
//! assert!(result.is_err());
//! ```

use crate::error::Result;
use crate::{LockFreeSet, ShardedSet};

/// Builder for [`ShardedSet`].
///
/// # Examples
///
/// ```
/// use dedupset::builder::ShardedSetBuilder;
///
/// let set = ShardedSetBuilder::new()
///     .thread_hint(8)
///     .build()
///     .unwrap();
/// assert_eq!(set.shard_count(), 512);
/// ```
#[derive(Debug, Default)]
pub struct ShardedSetBuilder {
    thread_hint: Option<usize>,
    shard_count: Option<usize>,
}

impl ShardedSetBuilder {
    /// Start a builder with machine-derived defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tune for this many concurrent inserter threads (64 shards each).
    #[must_use]
    pub fn thread_hint(mut self, hint: usize) -> Self {
        self.thread_hint = Some(hint);
        self
    }

    /// Override the shard count directly, bypassing the thread-hint
    /// multiplier. Takes precedence over [`thread_hint`](Self::thread_hint).
    #[must_use]
    pub fn shard_count(mut self, count: usize) -> Self {
        self.shard_count = Some(count);
        self
    }

    /// Construct the set.
    ///
    /// With neither knob set, the thread hint defaults to the number of
    /// logical CPUs.
    ///
    /// # Errors
    ///
    /// Same validation as [`ShardedSet::new`] /
    /// [`ShardedSet::with_shard_count`].
    pub fn build(self) -> Result<ShardedSet> {
        if let Some(count) = self.shard_count {
            return ShardedSet::with_shard_count(count);
        }

        let hint = self.thread_hint.unwrap_or_else(|| num_cpus::get().max(1));
        ShardedSet::new(hint)
    }
}

/// Builder for [`LockFreeSet`].
///
/// # Examples
///
/// ```
/// use dedupset::builder::LockFreeSetBuilder;
///
/// let set = LockFreeSetBuilder::new()
///     .expected_items(1_000)
///     .build()
///     .unwrap();
/// assert_eq!(set.capacity(), 2_048);
/// ```
#[derive(Debug, Default)]
pub struct LockFreeSetBuilder {
    expected_items: usize,
}

impl LockFreeSetBuilder {
    /// Start an empty builder.
    ///
    /// [`expected_items`](Self::expected_items) is required; building
    /// without it fails validation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Upper-bound estimate of distinct keys. This is a hard sizing
    /// contract, not a hint; see [`LockFreeSet`] for the consequences of
    /// underestimating.
    #[must_use]
    pub fn expected_items(mut self, count: usize) -> Self {
        self.expected_items = count;
        self
    }

    /// Construct the set.
    ///
    /// # Errors
    ///
    /// Same validation as [`LockFreeSet::new`].
    pub fn build(self) -> Result<LockFreeSet> {
        LockFreeSet::new(self.expected_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sharded_builder_explicit_hint() {
        let set = ShardedSetBuilder::new().thread_hint(2).build().unwrap();
        assert_eq!(set.shard_count(), 128);
    }

    #[test]
    fn test_sharded_builder_shard_count_overrides_hint() {
        let set = ShardedSetBuilder::new()
            .thread_hint(2)
            .shard_count(10)
            .build()
            .unwrap();
        assert_eq!(set.shard_count(), 10);
    }

    #[test]
    fn test_sharded_builder_default_uses_cpus() {
        let set = ShardedSetBuilder::new().build().unwrap();
        assert_eq!(set.shard_count(), set.thread_hint() * 64);
    }

    #[test]
    fn test_sharded_builder_rejects_zero() {
        assert!(ShardedSetBuilder::new().thread_hint(0).build().is_err());
        assert!(ShardedSetBuilder::new().shard_count(0).build().is_err());
    }

    #[test]
    fn test_lockfree_builder() {
        let set = LockFreeSetBuilder::new()
            .expected_items(4)
            .build()
            .unwrap();
        assert_eq!(set.capacity(), 8);
    }

    #[test]
    fn test_lockfree_builder_requires_items() {
        assert!(LockFreeSetBuilder::new().build().is_err());
    }
}
