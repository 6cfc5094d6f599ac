//! Error types for dedupset operations.
//!
//! The insert/len/prefetch paths are infallible; errors occur only during
//! construction, where sizing parameters are validated before any allocation
//! happens.
//!
//! # Error Propagation
//!
//! ```
//! use dedupset::{Result, DedupSetError};
//! use dedupset::core::params;
//!
//! fn plan_capacity(expected_items: usize) -> Result<usize> {
//!     let capacity = params::lockfree_capacity(expected_items)?;
//!     Ok(capacity)
//! }
//! # assert!(plan_capacity(1_000_000).is_ok());
//! # assert!(plan_capacity(0).is_err());
//! ```

use std::fmt;

/// Result type alias for dedupset operations.
///
/// All fallible operations in this crate return [`Result<T>`] where the error
/// type is [`DedupSetError`].
pub type Result<T> = std::result::Result<T, DedupSetError>;

/// Errors that can occur while constructing a set.
///
/// Each variant carries the offending value so callers can report exactly
/// what was rejected.
///
/// # Design Notes
/// - `Clone` + `PartialEq` enable testing and error comparison
/// - `Debug` required by the `std::error::Error` trait
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DedupSetError {
    /// Expected item count is invalid.
    ///
    /// A lock-free set sized for zero items has no slot to claim; its probe
    /// loop could never terminate.
    InvalidItemCount {
        /// The invalid count that was provided.
        count: usize,
    },

    /// Thread-count hint is invalid.
    ///
    /// The sharded set derives its shard count from this hint; a hint of
    /// zero would produce a set with nowhere to route keys.
    InvalidThreadHint {
        /// The invalid hint that was provided.
        hint: usize,
    },

    /// Explicit shard count is invalid.
    ///
    /// Zero shards would leave keys with no destination.
    InvalidShardCount {
        /// The invalid count that was provided.
        count: usize,
    },

    /// A derived capacity or shard count would overflow `usize`.
    ///
    /// Occurs when the requested sizing, after headroom and power-of-two
    /// rounding, exceeds the address space. Such a set could not be
    /// allocated anyway.
    CapacityOverflow {
        /// The sizing value that triggered the overflow.
        requested: usize,
    },
}

impl DedupSetError {
    /// Create a [`DedupSetError::InvalidItemCount`] error.
    #[must_use]
    pub fn invalid_item_count(count: usize) -> Self {
        Self::InvalidItemCount { count }
    }

    /// Create a [`DedupSetError::InvalidThreadHint`] error.
    #[must_use]
    pub fn invalid_thread_hint(hint: usize) -> Self {
        Self::InvalidThreadHint { hint }
    }

    /// Create a [`DedupSetError::InvalidShardCount`] error.
    #[must_use]
    pub fn invalid_shard_count(count: usize) -> Self {
        Self::InvalidShardCount { count }
    }

    /// Create a [`DedupSetError::CapacityOverflow`] error.
    #[must_use]
    pub fn capacity_overflow(requested: usize) -> Self {
        Self::CapacityOverflow { requested }
    }
}

impl fmt::Display for DedupSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidItemCount { count } => {
                write!(f, "Invalid expected item count: {} (must be > 0).", count)
            }
            Self::InvalidThreadHint { hint } => {
                write!(f, "Invalid thread-count hint: {} (must be > 0).", hint)
            }
            Self::InvalidShardCount { count } => {
                write!(f, "Invalid shard count: {} (must be > 0).", count)
            }
            Self::CapacityOverflow { requested } => {
                write!(
                    f,
                    "Derived capacity overflows usize (requested sizing: {}).",
                    requested
                )
            }
        }
    }
}

impl std::error::Error for DedupSetError {}
