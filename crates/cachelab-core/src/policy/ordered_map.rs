//! Shared engine for the two insertion-order policies, FIFO and LRU.
//!
//! Both keep a single `IndexMap` whose front is the head (next eviction
//! victim) and whose back is the tail (freshest / most-protected element);
//! they differ only in whether `get` moves the accessed key to the tail.

use indexmap::IndexMap;

use crate::entry::Entry;

pub(crate) struct OrderedMap {
    capacity: usize,
    map: IndexMap<String, Entry>,
}

impl OrderedMap {
    pub(crate) fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "cache capacity must be at least 1");
        Self {
            capacity,
            map: IndexMap::with_capacity(capacity),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub(crate) fn peek(&self, key: &str) -> Option<Entry> {
        self.map.get(key).cloned()
    }

    /// Moves `key` to the tail, leaving its entry unchanged. No-op if absent.
    pub(crate) fn touch_to_back(&mut self, key: &str) -> Option<Entry> {
        let entry = self.map.shift_remove(key)?;
        self.map.insert(key.to_string(), entry.clone());
        Some(entry)
    }

    /// Inserts `(key, entry)` at the tail, evicting the head first if at
    /// capacity. A key already present is replaced in place (removed, then
    /// re-inserted at the tail as if freshly put) and never counts as an
    /// eviction.
    pub(crate) fn insert_evicting(&mut self, key: &str, entry: Entry) {
        self.map.shift_remove(key);
        if self.map.len() >= self.capacity {
            self.map.shift_remove_index(0);
        }
        self.map.insert(key.to_string(), entry);
    }
}
