//! Ghost history shared by LeCaR and CALeCaR: a bounded FIFO of recently
//! evicted keys plus the tag of whichever expert chose to evict them (§4.7,
//! §4.8, I8).

use indexmap::IndexMap;

/// Which expert's ordering picked a ghosted key for eviction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExpertTag {
    Lru,
    Lfu,
    Lcr,
}

/// FIFO by insertion time: front (index 0) is the oldest ghost entry, back
/// is the most recently evicted key.
pub(crate) struct GhostHistory {
    capacity: usize,
    order: IndexMap<String, ExpertTag>,
}

impl GhostHistory {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            order: IndexMap::with_capacity(capacity),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    pub(crate) fn tag_of(&self, key: &str) -> Option<ExpertTag> {
        self.order.get(key).copied()
    }

    /// `discount^d`, where `d` is the number of edges from `key`'s ghost
    /// node to the history tail: 0 for the freshest eviction, growing for
    /// older ones. `None` if `key` is not in the history.
    pub(crate) fn regret_of(&self, key: &str, discount: f64) -> Option<f64> {
        let idx = self.order.get_index_of(key)?;
        let d = (self.order.len() - 1 - idx) as i32;
        Some(discount.powi(d))
    }

    /// Records an eviction: drops any existing entry for `key` first (no
    /// duplicates, I8), then appends at the tail, evicting the oldest
    /// (head) ghost entry if this would exceed capacity.
    pub(crate) fn insert(&mut self, key: String, tag: ExpertTag) {
        self.order.shift_remove(&key);
        if self.order.len() >= self.capacity {
            self.order.shift_remove_index(0);
        }
        self.order.insert(key, tag);
    }

    /// Drops `key` from history, if present. Used to re-enforce I8 when a
    /// previously-ghosted key is inserted back into the live cache.
    pub(crate) fn remove(&mut self, key: &str) {
        self.order.shift_remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regret_decays_with_age() {
        let mut history = GhostHistory::new(3);
        history.insert("old".into(), ExpertTag::Lru);
        history.insert("mid".into(), ExpertTag::Lfu);
        history.insert("new".into(), ExpertTag::Lru);

        let regret_new = history.regret_of("new", 0.99).unwrap();
        let regret_old = history.regret_of("old", 0.99).unwrap();
        assert_eq!(regret_new, 1.0);
        assert!(regret_old < regret_new);
    }

    #[test]
    fn capacity_evicts_oldest_ghost_first() {
        let mut history = GhostHistory::new(2);
        history.insert("a".into(), ExpertTag::Lru);
        history.insert("b".into(), ExpertTag::Lfu);
        history.insert("c".into(), ExpertTag::Lru);
        assert_eq!(history.len(), 2);
        assert!(history.tag_of("a").is_none());
        assert!(history.tag_of("b").is_some());
        assert!(history.tag_of("c").is_some());
    }

    #[test]
    fn duplicate_insert_moves_to_tail_without_duplicating() {
        let mut history = GhostHistory::new(3);
        history.insert("a".into(), ExpertTag::Lru);
        history.insert("b".into(), ExpertTag::Lfu);
        history.insert("a".into(), ExpertTag::Lfu);
        assert_eq!(history.len(), 2);
        assert_eq!(history.tag_of("a"), Some(ExpertTag::Lfu));
        // "a" is now freshest: regret 1.0, strictly greater than "b"'s.
        assert!(history.regret_of("a", 0.99).unwrap() > history.regret_of("b", 0.99).unwrap());
    }
}
