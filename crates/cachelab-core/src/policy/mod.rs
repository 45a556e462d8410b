//! Cache replacement policies (§4).
//!
//! Each policy is its own concrete struct implementing [`CachePolicy`].
//! [`Cache`] is a tagged dispatch layer over all of them, chosen once at
//! construction from a [`crate::cache_type::CacheType`] and never mixed at
//! runtime — a flat enum match is simpler here than a trait object and
//! keeps every policy's internals monomorphized.

mod calecar;
mod fifo;
mod ghost;
mod lcr;
mod lecar;
mod lfu;
mod lru;
mod none;
mod ordered_map;

pub use calecar::CALeCaR;
pub use fifo::Fifo;
pub use lcr::Lcr;
pub use lecar::LeCaR;
pub use lfu::Lfu;
pub use lru::Lru;
pub use none::NoCache;

use crate::cache_type::CacheType;
use crate::entry::Entry;
use crate::error::Result;

/// Common surface every replacement policy implements (§4.2).
pub trait CachePolicy {
    /// Reports whether `key` is currently resident, without counting as an
    /// access for recency/frequency bookkeeping. For the adaptive policies
    /// this is also where a miss against ghost history feeds back into the
    /// expert weights (I9).
    fn present(&mut self, key: &str) -> bool;

    /// Reads `key`, touching it for whatever recency/frequency bookkeeping
    /// the policy keeps. Fails with [`crate::error::Error::NotPresent`] if
    /// `key` is not resident.
    fn get(&mut self, key: &str) -> Result<Entry>;

    /// Inserts or replaces `key`. A key already resident is replaced in
    /// place and re-touched as if freshly inserted; this never itself
    /// counts as eviction pressure. Otherwise, if the cache is at capacity,
    /// exactly one resident entry is evicted first (I1).
    fn put(&mut self, key: &str, entry: Entry);

    /// Number of entries currently resident.
    fn len(&self) -> usize;
}

/// A running cache under one of the replacement policies, selected at
/// construction time and fixed for its lifetime.
pub enum Cache {
    None(NoCache),
    Fifo(Fifo),
    Lru(Lru),
    Lfu(Lfu),
    Lcr(Lcr),
    LeCaR(LeCaR),
    CALeCaR(CALeCaR),
}

impl Cache {
    /// Builds a cache running `cache_type` with the given capacity.
    ///
    /// `capacity` is ignored for [`CacheType::None`], which never holds
    /// anything; every other policy requires `capacity >= 1`.
    #[must_use]
    pub fn new(cache_type: CacheType, capacity: usize) -> Self {
        match cache_type {
            CacheType::None => Self::None(NoCache),
            CacheType::Fifo => Self::Fifo(Fifo::new(capacity)),
            CacheType::Lru => Self::Lru(Lru::new(capacity)),
            CacheType::Lfu => Self::Lfu(Lfu::new(capacity)),
            CacheType::Lcr => Self::Lcr(Lcr::new(capacity)),
            CacheType::LeCaR => Self::LeCaR(LeCaR::new(capacity)),
            CacheType::CALeCaR => Self::CALeCaR(CALeCaR::new(capacity)),
        }
    }
}

impl CachePolicy for Cache {
    fn present(&mut self, key: &str) -> bool {
        match self {
            Self::None(c) => c.present(key),
            Self::Fifo(c) => c.present(key),
            Self::Lru(c) => c.present(key),
            Self::Lfu(c) => c.present(key),
            Self::Lcr(c) => c.present(key),
            Self::LeCaR(c) => c.present(key),
            Self::CALeCaR(c) => c.present(key),
        }
    }

    fn get(&mut self, key: &str) -> Result<Entry> {
        match self {
            Self::None(c) => c.get(key),
            Self::Fifo(c) => c.get(key),
            Self::Lru(c) => c.get(key),
            Self::Lfu(c) => c.get(key),
            Self::Lcr(c) => c.get(key),
            Self::LeCaR(c) => c.get(key),
            Self::CALeCaR(c) => c.get(key),
        }
    }

    fn put(&mut self, key: &str, entry: Entry) {
        match self {
            Self::None(c) => c.put(key, entry),
            Self::Fifo(c) => c.put(key, entry),
            Self::Lru(c) => c.put(key, entry),
            Self::Lfu(c) => c.put(key, entry),
            Self::Lcr(c) => c.put(key, entry),
            Self::LeCaR(c) => c.put(key, entry),
            Self::CALeCaR(c) => c.put(key, entry),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::None(c) => c.len(),
            Self::Fifo(c) => c.len(),
            Self::Lru(c) => c.len(),
            Self::Lfu(c) => c.len(),
            Self::Lcr(c) => c.len(),
            Self::LeCaR(c) => c.len(),
            Self::CALeCaR(c) => c.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_to_the_requested_policy() {
        let mut cache = Cache::new(CacheType::Fifo, 2);
        cache.put("a", Entry::new("va", 1));
        assert!(cache.present("a"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn none_type_never_retains_anything() {
        let mut cache = Cache::new(CacheType::None, 4);
        cache.put("a", Entry::new("va", 1));
        assert!(!cache.present("a"));
        assert_eq!(cache.len(), 0);
    }
}
