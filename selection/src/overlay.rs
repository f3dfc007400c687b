//! Sparse index-to-value remapping over an implicit identity array.

/// Number of buckets used by the selection engine.
pub const DEFAULT_BUCKETS: usize = 11;

/// A tiny hash map from array position to the value swapped into it.
///
/// Keys are spread over a fixed number of buckets by `key % buckets`, each bucket
/// an append-only list of `(key, value)` pairs scanned linearly. Unmapped
/// positions read back as their own index.
#[derive(Clone, Debug)]
pub struct SparseOverlay {
    buckets: Vec<Vec<(u32, u32)>>,
}

impl SparseOverlay {
    /// Create an overlay with `bucket_count` buckets (at least one).
    pub fn new(bucket_count: usize) -> Self {
        Self {
            buckets: vec![Vec::new(); bucket_count.max(1)],
        }
    }

    fn bucket_of(&self, key: u32) -> usize {
        key as usize % self.buckets.len()
    }

    /// The value at position `key`: the recorded remap or `key` itself.
    pub fn lookup(&self, key: u32) -> u32 {
        self.buckets[self.bucket_of(key)]
            .iter()
            .find(|(k, _)| *k == key)
            .map(|&(_, v)| v)
            .unwrap_or(key)
    }

    /// Record that position `key` now holds `value`.
    pub fn set(&mut self, key: u32, value: u32) {
        let bucket = self.bucket_of(key);
        let bucket = &mut self.buckets[bucket];
        match bucket.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => bucket.push((key, value)),
        }
    }

    /// Number of recorded positions.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Length of the longest bucket, i.e. the worst-case lookup scan.
    pub fn longest_bucket(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }
}

impl Default for SparseOverlay {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKETS)
    }
}
