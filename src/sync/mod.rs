//! Concurrent insert-if-absent set implementations.
//!
//! # Module Organization
//!
//! - [`ShardedSet`] - Lock-based sharding: reader/writer lock per shard,
//!   per-shard dynamic growth
//! - [`LockFreeSet`] - Pure compare-and-swap: fixed capacity, no blocking
//!
//! # Choosing a Set
//!
//! | | `ShardedSet` | `LockFreeSet` |
//! |---|---|---|
//! | Capacity | Grows per shard | Fixed at construction |
//! | Unique-count estimate | Not needed | Required (hard limit) |
//! | Blocking | Same-shard contention only | Never |
//! | Reserved key | `u64::MAX` | `0` |
//!
//! Prefer `LockFreeSet` when a trustworthy upper bound on the unique count
//! exists; prefer `ShardedSet` when the stream's cardinality is unknown.
//!
//! Both implement [`ConcurrentSet`](crate::core::ConcurrentSet), so the
//! choice can be deferred to a type parameter.

pub mod lockfree;
pub mod sharded;

pub use lockfree::{LockFreeSet, EMPTY_SLOT};
pub use sharded::ShardedSet;
