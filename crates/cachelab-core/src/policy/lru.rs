//! Least-recently-used eviction (§4.4).

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::policy::ordered_map::OrderedMap;
use crate::policy::CachePolicy;

/// Head is the least-recently-touched entry, tail the most-recently-touched.
/// A touch is either `put` on insertion or `get` on hit.
pub struct Lru(OrderedMap);

impl Lru {
    /// Builds an LRU cache with the given capacity (`C >= 1`).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self(OrderedMap::new(capacity))
    }
}

impl CachePolicy for Lru {
    fn present(&mut self, key: &str) -> bool {
        self.0.contains(key)
    }

    fn get(&mut self, key: &str) -> Result<Entry> {
        self.0.touch_to_back(key).ok_or(Error::NotPresent)
    }

    fn put(&mut self, key: &str, entry: Entry) {
        self.0.insert_evicting(key, entry);
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}
