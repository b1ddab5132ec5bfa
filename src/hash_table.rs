//! Fixed-size hash table resolving collisions with linked chains.
//!
//! The bucket count never changes after construction: there is no resizing
//! and no rehashing, so chains grow without bound when many keys land in the
//! same bucket. Missing keys read as 0.

use crate::chain::*;
use crate::types::*;

pub const DEFAULT_BUCKET_COUNT: usize = 213;

pub struct ChainedHashTable {
    buckets: Vec<Chain>,
}

impl ChainedHashTable {
    pub fn new(bucket_count: usize) -> Self {
        let bucket_count = bucket_count.max(1);
        let mut buckets = Vec::with_capacity(bucket_count);
        for _ in 0..bucket_count {
            buckets.push(Chain::new());
        }
        ChainedHashTable { buckets }
    }

    /// `|key| mod bucket_count`
    fn hash(&self, key: Key) -> usize {
        key.unsigned_abs() as usize % self.buckets.len()
    }

    /// Inserts `key`, or overwrites its value if it is already present.
    pub fn put(&mut self, key: Key, value: Value) {
        let index = self.hash(key);
        self.buckets[index].add(key, value);
    }

    /// Returns the value stored under `key`, or 0 if there is none.
    pub fn get(&self, key: Key) -> Value {
        self.buckets[self.hash(key)].get(key).unwrap_or(0)
    }

    pub fn contains_key(&self, key: Key) -> bool {
        self.buckets[self.hash(key)].get(key).is_some()
    }

    /// Number of entries across all buckets.
    pub fn size(&self) -> usize {
        self.buckets.iter().map(|chain| chain.len()).sum()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn chain_len(&self, bucket: usize) -> usize {
        self.buckets.get(bucket).map_or(0, |chain| chain.len())
    }

    /// Entries in bucket order, then chain order.
    pub fn iter(&self) -> impl Iterator<Item = (Key, Value)> + '_ {
        self.buckets.iter().flat_map(|chain| chain.iter())
    }
}

impl Default for ChainedHashTable {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET_COUNT)
    }
}
