//! First-in-first-out eviction (§4.3).

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::policy::ordered_map::OrderedMap;
use crate::policy::CachePolicy;

/// Head is the earliest inserted entry still present; `get` never reorders.
pub struct Fifo(OrderedMap);

impl Fifo {
    /// Builds a FIFO cache with the given capacity (`C >= 1`).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self(OrderedMap::new(capacity))
    }
}

impl CachePolicy for Fifo {
    fn present(&mut self, key: &str) -> bool {
        self.0.contains(key)
    }

    fn get(&mut self, key: &str) -> Result<Entry> {
        self.0.peek(key).ok_or(Error::NotPresent)
    }

    fn put(&mut self, key: &str, entry: Entry) {
        self.0.insert_evicting(key, entry);
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_earliest_inserted_on_overflow() {
        // S2: capacity 3, insert a,b,c; get a; insert d. FIFO still evicts a.
        let mut cache = Fifo::new(3);
        cache.put("a", Entry::new("va", 1));
        cache.put("b", Entry::new("vb", 1));
        cache.put("c", Entry::new("vc", 1));
        cache.get("a").unwrap();
        cache.put("d", Entry::new("vd", 1));

        assert!(!cache.present("a"));
        assert!(cache.present("b"));
        assert!(cache.present("c"));
        assert!(cache.present("d"));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn put_then_get_round_trips() {
        let mut cache = Fifo::new(2);
        cache.put("k", Entry::new("v", 9));
        assert_eq!(cache.get("k").unwrap(), Entry::new("v", 9));
    }

    #[test]
    fn get_on_absent_key_fails() {
        let mut cache = Fifo::new(2);
        assert!(matches!(cache.get("missing"), Err(Error::NotPresent)));
    }
}
