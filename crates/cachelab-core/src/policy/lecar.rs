//! LeCaR: two-expert adaptive policy combining LRU and LFU via a
//! multiplicative-weights ghost history (§4.7).

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

/// Central lookup owns the `Entry`; `lru_order` and `lfu_order` are
/// non-owning orderings over the same key set, kept in sync by every
/// `get`/`put`/eviction.
pub struct LeCaR {
    capacity: usize,
    lookup: HashMap<String, Entry>,
    lru_order: IndexSet<String>,
    lfu_order: IndexMap<String, u64>,
    history: GhostHistory,
    weight_lru: f64,
    weight_lfu: f64,
    rng: Box<dyn RngCore + Send>,
}

impl LeCaR {
    /// Builds a LeCaR cache with the given capacity (`C >= 1`), seeded from
    /// the OS entropy source.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::with_rng(capacity, StdRng::from_entropy())
    }

    /// Builds a LeCaR cache with an injected RNG, so tests can drive the
    /// eviction draw deterministically (the design explicitly wants the
    /// RNG as a field, not a global).
    #[must_use]
    pub fn with_rng(capacity: usize, rng: impl RngCore + Send + 'static) -> Self {
        assert!(capacity >= 1, "cache capacity must be at least 1");
        Self {
            capacity,
            lookup: HashMap::new(),
            lru_order: IndexSet::with_capacity(capacity),
            lfu_order: IndexMap::with_capacity(capacity),
            history: GhostHistory::new(capacity),
            weight_lru: 0.5,
            weight_lfu: 0.5,
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

    /// Draws `u ~ Uniform[0,1)` and evicts the LRU-head or LFU-head
    /// accordingly, splicing the victim out of the other list and tagging
    /// its ghost history entry with whichever expert chose it.
    fn evict(&mut self) {
        let u: f64 = self.rng.gen();
        let (victim, tag) = if u <= self.weight_lru {
            let victim = self
                .lru_order
                .get_index(0)
                .cloned()
                .expect("non-empty cache has an LRU head at eviction time");
            (victim, ExpertTag::Lru)
        } else {
            let victim = self
                .lfu_order
                .get_index(0)
                .expect("non-empty cache has an LFU head at eviction time")
                .0
                .clone();
            (victim, ExpertTag::Lfu)
        };

        self.lookup.remove(&victim);
        self.lru_order.shift_remove(&victim);
        self.lfu_order.shift_remove(&victim);
        self.history.insert(victim, tag);
    }

    /// Rewards the expert that did *not* choose the regretted eviction,
    /// then renormalizes so the two weights keep summing to 1 (I9).
    fn reward_opposite_expert(&mut self, tag: ExpertTag, regret: f64) {
        let adjust = (LAMBDA * regret).exp();
        match tag {
            ExpertTag::Lru => self.weight_lfu *= adjust,
            ExpertTag::Lfu => self.weight_lru *= adjust,
            ExpertTag::Lcr => unreachable!("LeCaR never tags an eviction LCR"),
        }
        let sum = self.weight_lru + self.weight_lfu;
        self.weight_lru /= sum;
        self.weight_lfu /= sum;
    }
}

impl CachePolicy for LeCaR {
    fn present(&mut self, key: &str) -> bool {
        if self.lookup.contains_key(key) {
            return true;
        }
        if let Some(tag) = self.history.tag_of(key) {
            let regret = self
                .history
                .regret_of(key, DISCOUNT)
                .expect("tag_of succeeded so the key is in history");
            self.reward_opposite_expert(tag, regret);
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

        Ok(entry)
    }

    fn put(&mut self, key: &str, entry: Entry) {
        if self.lookup.remove(key).is_some() {
            self.lru_order.shift_remove(key);
            self.lfu_order.shift_remove(key);
        } else if self.lookup.len() >= self.capacity {
            self.evict();
        }

        // I8: a key can't be simultaneously live and ghosted.
        self.history.remove(key);

        self.lookup.insert(key.to_string(), entry);
        self.lru_order.insert(key.to_string());
        self.lfu_order.shift_insert(0, key.to_string(), 1);
    }

    fn len(&self) -> usize {
        self.lookup.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn always_picks_lru() -> StepRng {
        // next_u64() always returns 0 => gen::<f64>() == 0.0 <= weight_lru.
        StepRng::new(0, 0)
    }

    #[test]
    fn weights_start_equal_and_on_the_simplex() {
        let cache = LeCaR::new(4);
        assert!((cache.weight_lru() - 0.5).abs() < f64::EPSILON);
        assert!((cache.weight_lfu() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn eviction_writes_a_tagged_ghost_entry() {
        let mut cache = LeCaR::with_rng(2, always_picks_lru());
        cache.put("a", Entry::new("a", 1));
        cache.put("b", Entry::new("b", 1));
        cache.put("c", Entry::new("c", 1)); // evicts LRU head = a
        assert_eq!(cache.history_len(), 1);
        assert!(!cache.lookup.contains_key("a"));
    }

    #[test]
    fn present_on_ghosted_key_rewards_the_opposite_expert() {
        // S5: seed RNG so the first eviction picks LRU; evicted key x.
        let mut cache = LeCaR::with_rng(2, always_picks_lru());
        cache.put("a", Entry::new("a", 1));
        cache.put("b", Entry::new("b", 1));
        cache.put("c", Entry::new("c", 1)); // evicts "a" via LRU, tags it LRU

        let before_lru = cache.weight_lru();
        let before_lfu = cache.weight_lfu();

        assert!(!cache.present("a")); // "a" is ghosted, not live

        assert!(cache.weight_lfu() > before_lfu);
        assert!(cache.weight_lru() < before_lru);
        assert!((cache.weight_lru() + cache.weight_lfu() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn put_on_ghosted_key_clears_it_from_history() {
        let mut cache = LeCaR::with_rng(2, always_picks_lru());
        cache.put("a", Entry::new("a", 1));
        cache.put("b", Entry::new("b", 1));
        cache.put("c", Entry::new("c", 1)); // evicts "a" into history
        assert_eq!(cache.history_len(), 1);

        cache.put("a", Entry::new("a2", 9)); // "a" comes back into the live cache
        assert_eq!(cache.history_len(), 0);
        assert_eq!(cache.get("a").unwrap(), Entry::new("a2", 9));
    }

    #[test]
    fn round_trip_put_then_get() {
        let mut cache = LeCaR::new(3);
        cache.put("k", Entry::new("v", 5));
        assert_eq!(cache.get("k").unwrap(), Entry::new("v", 5));
    }
}
