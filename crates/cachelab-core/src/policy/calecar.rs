//! CALeCaR: three-expert adaptive policy combining LRU, LFU and LCR via a
//! multiplicative-weights ghost history (§4.8).
//!
//! Differs from [`crate::policy::LeCaR`] in exactly the two ways the spec
//! calls out: a third expert (LCR), and a weight update that *penalizes*
//! the expert responsible for a regretted eviction rather than rewarding
//! the alternative. Both are valid multiplicative-weights schemes; they are
//! kept distinct on purpose.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::policy::ghost::{ExpertTag, GhostHistory};
use crate::policy::CachePolicy;

const LAMBDA: f64 = 0.45;
const DISCOUNT: f64 = 0.99;

pub struct CALeCaR {
    capacity: usize,
    lookup: HashMap<String, Entry>,
    lru_order: IndexSet<String>,
    lfu_order: IndexMap<String, u64>,
    /// Ordered by `Entry::cost`, fixed at insertion (cost never changes).
    lcr_order: IndexSet<String>,
    history: GhostHistory,
    weight_lru: f64,
    weight_lfu: f64,
    weight_lcr: f64,
    rng: Box<dyn RngCore + Send>,
}

impl CALeCaR {
    /// Builds a CALeCaR cache with the given capacity (`C >= 1`), seeded
    /// from the OS entropy source.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::with_rng(capacity, StdRng::from_entropy())
    }

    /// Builds a CALeCaR cache with an injected RNG, for deterministic tests.
    #[must_use]
    pub fn with_rng(capacity: usize, rng: impl RngCore + Send + 'static) -> Self {
        assert!(capacity >= 1, "cache capacity must be at least 1");
        Self {
            capacity,
            lookup: HashMap::new(),
            lru_order: IndexSet::with_capacity(capacity),
            lfu_order: IndexMap::with_capacity(capacity),
            lcr_order: IndexSet::with_capacity(capacity),
            history: GhostHistory::new(capacity),
            weight_lru: 1.0 / 3.0,
            weight_lfu: 1.0 / 3.0,
            weight_lcr: 1.0 / 3.0,
            rng: Box::new(rng),
        }
    }

    /// Current weight assigned to the LRU expert.
    #[must_use]
    pub fn weight_lru(&self) -> f64 {
        self.weight_lru
    }

    /// Current weight assigned to the LFU expert.
    #[must_use]
    pub fn weight_lfu(&self) -> f64 {
        self.weight_lfu
    }

    /// Current weight assigned to the LCR expert.
    #[must_use]
    pub fn weight_lcr(&self) -> f64 {
        self.weight_lcr
    }

    /// Number of keys currently in ghost history.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn sift_lfu_right(&mut self, mut idx: usize) {
        while idx + 1 < self.lfu_order.len() {
            let count = *self.lfu_order.get_index(idx).unwrap().1;
            let next_count = *self.lfu_order.get_index(idx + 1).unwrap().1;
            if count >= next_count {
                self.lfu_order.swap_indices(idx, idx + 1);
                idx += 1;
            } else {
                break;
            }
        }
    }

    fn sift_lcr_right(&mut self, mut idx: usize) {
        while idx + 1 < self.lcr_order.len() {
            let cur = self.lcr_order.get_index(idx).unwrap().clone();
            let next = self.lcr_order.get_index(idx + 1).unwrap().clone();
            let cur_cost = self.lookup[&cur].cost;
            let next_cost = self.lookup[&next].cost;
            if next_cost < cur_cost {
                self.lcr_order.swap_indices(idx, idx + 1);
                idx += 1;
            } else {
                break;
            }
        }
    }

    /// Draws `u ~ Uniform[0,1)` and evicts whichever expert's head the draw
    /// lands on, splicing the victim out of the other two lists and
    /// tagging its ghost history entry.
    fn evict(&mut self) {
        let u: f64 = self.rng.gen();
        let (victim, tag) = if u <= self.weight_lru {
            let victim = self
                .lru_order
                .get_index(0)
                .cloned()
                .expect("non-empty cache has an LRU head at eviction time");
            (victim, ExpertTag::Lru)
        } else if u <= self.weight_lru + self.weight_lfu {
            let victim = self
                .lfu_order
                .get_index(0)
                .expect("non-empty cache has an LFU head at eviction time")
                .0
                .clone();
            (victim, ExpertTag::Lfu)
        } else {
            let victim = self
                .lcr_order
                .get_index(0)
                .cloned()
                .expect("non-empty cache has an LCR head at eviction time");
            (victim, ExpertTag::Lcr)
        };

        self.lookup.remove(&victim);
        self.lru_order.shift_remove(&victim);
        self.lfu_order.shift_remove(&victim);
        self.lcr_order.shift_remove(&victim);
        self.history.insert(victim, tag);
    }

    /// Penalizes the expert responsible for the regretted eviction, then
    /// renormalizes across all three weights (I9).
    fn penalize_responsible_expert(&mut self, tag: ExpertTag, regret: f64) {
        let adjust = (-LAMBDA * regret).exp();
        match tag {
            ExpertTag::Lru => self.weight_lru *= adjust,
            ExpertTag::Lfu => self.weight_lfu *= adjust,
            ExpertTag::Lcr => self.weight_lcr *= adjust,
        }
        let sum = self.weight_lru + self.weight_lfu + self.weight_lcr;
        self.weight_lru /= sum;
        self.weight_lfu /= sum;
        self.weight_lcr /= sum;
    }
}

impl CachePolicy for CALeCaR {
    fn present(&mut self, key: &str) -> bool {
        if self.lookup.contains_key(key) {
            return true;
        }
        if let Some(tag) = self.history.tag_of(key) {
            let regret = self
                .history
                .regret_of(key, DISCOUNT)
                .expect("tag_of succeeded so the key is in history");
            self.penalize_responsible_expert(tag, regret);
        }
        false
    }

    fn get(&mut self, key: &str) -> Result<Entry> {
        let entry = self.lookup.get(key).cloned().ok_or(Error::NotPresent)?;

        self.lru_order.shift_remove(key);
        self.lru_order.insert(key.to_string());

        let idx = self
            .lfu_order
            .get_index_of(key)
            .expect("lfu_order tracks every live key");
        *self.lfu_order.get_index_mut(idx).unwrap().1 += 1;
        self.sift_lfu_right(idx);

        // LCR is unchanged on access: cost is fixed, so ordering is stable.
        Ok(entry)
    }

    fn put(&mut self, key: &str, entry: Entry) {
        if self.lookup.remove(key).is_some() {
            self.lru_order.shift_remove(key);
            self.lfu_order.shift_remove(key);
            self.lcr_order.shift_remove(key);
        } else if self.lookup.len() >= self.capacity {
            self.evict();
        }

        self.history.remove(key);

        self.lookup.insert(key.to_string(), entry);
        self.lru_order.insert(key.to_string());
        self.lfu_order.shift_insert(0, key.to_string(), 1);
        self.lcr_order.shift_insert(0, key.to_string());
        self.sift_lcr_right(0);
    }

    fn len(&self) -> usize {
        self.lookup.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn always_picks_lcr() -> StepRng {
        // next_u64() always returns u64::MAX => gen::<f64>() is just under 1.0,
        // always beyond weight_lru + weight_lfu.
        StepRng::new(u64::MAX, 0)
    }

    #[test]
    fn weights_start_equal_on_the_simplex() {
        let cache = CALeCaR::new(4);
        assert!((cache.weight_lru() - 1.0 / 3.0).abs() < 1e-12);
        assert!((cache.weight_lfu() - 1.0 / 3.0).abs() < 1e-12);
        assert!((cache.weight_lcr() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn present_on_ghosted_key_penalizes_the_responsible_expert() {
        // S6: seed RNG so the first eviction picks LCR; evicted key y.
        let mut cache = CALeCaR::with_rng(2, always_picks_lcr());
        cache.put("a", Entry::new("a", 1));
        cache.put("b", Entry::new("b", 1));
        cache.put("c", Entry::new("c", 1)); // evicts LCR head

        let before_lcr = cache.weight_lcr();
        let before_lru = cache.weight_lru();
        let before_lfu = cache.weight_lfu();

        // All three costs tie at 1; each later put's shift_insert(0, ...) keeps
        // pushing fresh keys to the LCR head, so "b" (inserted after "a", before
        // "c" triggers the eviction) sits at the head and is the one evicted.
        assert!(!cache.present("b"));

        assert!(cache.weight_lcr() < before_lcr);
        assert!(cache.weight_lru() > before_lru || cache.weight_lfu() > before_lfu);
        let sum = cache.weight_lru() + cache.weight_lfu() + cache.weight_lcr();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn lcr_sub_order_is_non_decreasing_by_cost() {
        let mut cache = CALeCaR::new(5);
        for (key, cost) in [("a", 5), ("b", 1), ("c", 8), ("d", 3)] {
            cache.put(key, Entry::new(key, cost));
        }
        let costs: Vec<u64> = cache
            .lcr_order
            .iter()
            .map(|k| cache.lookup[k].cost)
            .collect();
        let mut sorted = costs.clone();
        sorted.sort_unstable();
        assert_eq!(costs, sorted);
    }

    #[test]
    fn round_trip_put_then_get() {
        let mut cache = CALeCaR::new(3);
        cache.put("k", Entry::new("v", 5));
        assert_eq!(cache.get("k").unwrap(), Entry::new("v", 5));
    }
}
