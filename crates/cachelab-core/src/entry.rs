//! The immutable (value, cost) record that every cache policy stores.

/// A dataset record: the value returned to a client, and the cost charged
/// to recompute it on a cache miss.
///
/// Entries are created once by the dataset loader and never mutated; the
/// cache only ever clones them in and out of its ordering structures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The value served to the client. Never contains `:` or `\n`.
    pub value: String,
    /// Cost charged to the client when this entry is served from the
    /// dataset (a miss). Cache hits are always charged cost 0.
    pub cost: u64,
}

impl Entry {
    /// Builds a new entry.
    #[must_use]
    pub fn new(value: impl Into<String>, cost: u64) -> Self {
        Self {
            value: value.into(),
            cost,
        }
    }
}
