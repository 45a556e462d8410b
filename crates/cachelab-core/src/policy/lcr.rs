//! Lowest-cost-to-recompute eviction (§4.6).

use indexmap::IndexMap;

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::policy::CachePolicy;

/// Ordered head-to-tail by non-decreasing `Entry::cost` (I5), fixed at
/// insertion since cost never changes on access. `get` is a pure read;
/// `put` inserts at the head and sifts right past strictly-lower-cost
/// neighbors. The head (cheapest to recompute) is always the next victim.
pub struct Lcr {
    capacity: usize,
    map: IndexMap<String, Entry>,
}

impl Lcr {
    /// Builds an LCR cache with the given capacity (`C >= 1`).
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
            let cost = self.map.get_index(idx).unwrap().1.cost;
            let next_cost = self.map.get_index(idx + 1).unwrap().1.cost;
            if next_cost < cost {
                self.map.swap_indices(idx, idx + 1);
                idx += 1;
            } else {
                break;
            }
        }
    }
}

impl CachePolicy for Lcr {
    fn present(&mut self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    fn get(&mut self, key: &str) -> Result<Entry> {
        self.map.get(key).cloned().ok_or(Error::NotPresent)
    }

    fn put(&mut self, key: &str, entry: Entry) {
        self.map.shift_remove(key);
        if self.map.len() >= self.capacity {
            self.map.shift_remove_index(0);
        }
        self.map.shift_insert(0, key.to_string(), entry);
        self.sift_right(0);
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_cheapest_entry() {
        // S4: capacity 3, insert a(cost=5), b(cost=1), c(cost=8); insert d(cost=3).
        // Evicted: b. Residents {a, c, d}.
        let mut cache = Lcr::new(3);
        cache.put("a", Entry::new("va", 5));
        cache.put("b", Entry::new("vb", 1));
        cache.put("c", Entry::new("vc", 8));
        cache.put("d", Entry::new("vd", 3));

        assert!(cache.present("a"));
        assert!(!cache.present("b"));
        assert!(cache.present("c"));
        assert!(cache.present("d"));
    }

    #[test]
    fn ordering_is_non_decreasing_by_cost() {
        let mut cache = Lcr::new(5);
        for (key, cost) in [("a", 5), ("b", 1), ("c", 8), ("d", 3), ("e", 2)] {
            cache.put(key, Entry::new(key, cost));
        }
        let costs: Vec<u64> = cache.map.values().map(|e| e.cost).collect();
        let mut sorted = costs.clone();
        sorted.sort_unstable();
        assert_eq!(costs, sorted);
    }

    #[test]
    fn get_does_not_reorder() {
        let mut cache = Lcr::new(3);
        cache.put("a", Entry::new("a", 5));
        cache.put("b", Entry::new("b", 1));
        cache.get("b").unwrap();
        cache.get("b").unwrap();
        // b is still cheapest and thus still the head / first evicted.
        cache.put("c", Entry::new("c", 9));
        cache.put("d", Entry::new("d", 9));
        assert!(!cache.present("b"));
    }
}
