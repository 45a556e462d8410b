//! Synchronization primitives shared across the cache core.
//!
//! The replacement policies themselves are single-threaded data structures;
//! serialization happens one layer up, where a `Cache` is wrapped in a
//! [`Mutex`] and shared behind an [`Arc`] across connection tasks. Keeping
//! the aliases here (rather than importing `parking_lot` ad hoc) matches how
//! the rest of the crate is meant to reach for synchronization primitives.

pub use parking_lot::Mutex;
pub use std::sync::Arc;
