//! Internal utility functions and helpers.
//!
//! Implementation details, not part of the public API.
//!
//! # Modules
//!
//! - [`prefetch`] - Cache-prefetch hint wrappers

pub(crate) mod prefetch;

pub(crate) use prefetch::prefetch_read;
