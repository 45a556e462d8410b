//! Least-frequently-used eviction (§4.5).

use indexmap::IndexMap;

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::policy::CachePolicy;

/// Ordered head-to-tail by non-decreasing access count (I4). New entries
/// enter at the head with `accessCount = 1`. `get` increments the node's
/// count and sifts it right while `count >= next.count` — the `>=`, not
/// `>`, is deliberate: it lets the most-recently-accessed node among ties
/// migrate past its peers, an MRU tiebreaker within a frequency band.
pub struct Lfu {
    capacity: usize,
    map: IndexMap<String, (Entry, u64)>,
}

impl Lfu {
    /// Builds an LFU cache with the given capacity (`C >= 1`).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "cache capacity must be at least 1");
        Self {
            capacity,
            map: IndexMap::with_capacity(capacity),
        }
    }

    fn sift_right(&mut self, mut idx: usize) {
        while idx + 1 < self.map.len() {
            let count = self.map.get_index(idx).unwrap().1 .1;
            let next_count = self.map.get_index(idx + 1).unwrap().1 .1;
            if count >= next_count {
                self.map.swap_indices(idx, idx + 1);
                idx += 1;
            } else {
                break;
            }
        }
    }
}

impl CachePolicy for Lfu {
    fn present(&mut self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    fn get(&mut self, key: &str) -> Result<Entry> {
        let idx = self.map.get_index_of(key).ok_or(Error::NotPresent)?;
        let entry = {
            let slot = self.map.get_index_mut(idx).unwrap().1;
            slot.1 += 1;
            slot.0.clone()
        };
        self.sift_right(idx);
        Ok(entry)
    }

    fn put(&mut self, key: &str, entry: Entry) {
        self.map.shift_remove(key);
        if self.map.len() >= self.capacity {
            self.map.shift_remove_index(0);
        }
        // count=1 is the minimum possible count, so no sift is needed: the
        // new node stays at the head, making it the next eviction candidate.
        self.map.shift_insert(0, key.to_string(), (entry, 1));
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_lowest_access_count() {
        // S3: capacity 3, insert a,b,c; get a,a,b; insert d.
        // accessCount: a=3, b=2, c=1. Evicted: c. Residents {a,b,d}.
        let mut cache = Lfu::new(3);
        cache.put("a", Entry::new("va", 1));
        cache.put("b", Entry::new("vb", 1));
        cache.put("c", Entry::new("vc", 1));
        cache.get("a").unwrap();
        cache.get("a").unwrap();
        cache.get("b").unwrap();
        cache.put("d", Entry::new("vd", 1));

        assert!(cache.present("a"));
        assert!(cache.present("b"));
        assert!(!cache.present("c"));
        assert!(cache.present("d"));
    }

    #[test]
    fn tie_break_favors_most_recently_accessed() {
        let mut cache = Lfu::new(2);
        cache.put("a", Entry::new("a", 1));
        cache.put("b", Entry::new("b", 1));
        // Both at count 1. Touch a: count becomes 2, sifts past b (count 1 < 2, stop before).
        cache.get("a").unwrap();
        // b is now the lower count and sits at the head; inserting c evicts b.
        cache.put("c", Entry::new("c", 1));
        assert!(cache.present("a"));
        assert!(!cache.present("b"));
        assert!(cache.present("c"));
    }

    #[test]
    fn new_entry_is_immediate_eviction_candidate_at_capacity() {
        let mut cache = Lfu::new(1);
        cache.put("a", Entry::new("a", 1));
        cache.get("a").unwrap(); // count 2
        cache.put("b", Entry::new("b", 1)); // only slot, evicts a regardless
        assert!(!cache.present("a"));
        assert!(cache.present("b"));
    }
}
