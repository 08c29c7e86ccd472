// =====================================================================
// File: hash/table.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Final Project
// Date: Nov. 30, 2025 - Refactored Dec. 3, 2025
//
// Description:
//   Implements the Extendable Hashing map (`HashIndex`). Buckets live in
//   an arena; the directory is a power-of-two array of arena ids, so
//   many directory slots can alias one bucket without copying it.
//
// Features:
//   - `put`     : Appends into the addressed bucket, splitting it (and
//                 doubling the directory when needed) while it is full.
//   - `get`     : One bucket scan.
//   - `entries` : Every entry once, de-duplicated by bucket identity.
//
// Notes:
//   * A slot is the low `global_depth` bits of the key's hash.
//   * A bucket with local depth `d` is referenced by exactly
//     `2^(global_depth - d)` slots, all sharing the same low `d` bits.
//   * There is no delete, no merge and no directory shrink.
// =====================================================================
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::atomic::{AtomicU64, Ordering};

use ahash::{AHashSet, RandomState};
use tracing::{debug, warn};

use super::bucket::Bucket;
use crate::error::{IndexError, Result};
use crate::index::KeyIndex;

/// Default number of key-value slots per bucket.
pub const DEFAULT_SLOTS: usize = 4;

/// Directory growth stops at `2^MAX_GLOBAL_DEPTH` slots.
pub const MAX_GLOBAL_DEPTH: u32 = 28;


/// Extendable hash map over any hashable key type.
#[derive(Debug)]
pub struct HashIndex<K, V, S = RandomState> {
    slots: usize,
    global_depth: u32,
    /// Slot -> bucket arena id
    directory: Vec<usize>,
    buckets: Vec<Bucket<K, V>>,
    len: usize,
    hasher: S,
    /// Depth past which the directory refuses to double
    max_depth: u32,
    splits: u64,
    /// Buckets scanned by lookups, diagnostics only
    accesses: AtomicU64,
}


impl<K: Hash + Eq, V> HashIndex<K, V, RandomState> {
    /// Creates an index whose directory starts with `capacity_hint` slots,
    /// rounded up to a power of two, and [`DEFAULT_SLOTS`] per bucket.
    ///
    /// # Example
    /// ```
    /// use tableindex::HashIndex;
    ///
    /// let index: HashIndex<u32, u32> = HashIndex::new(10);
    /// assert_eq!(index.directory_len(), 16);
    /// assert_eq!(index.global_depth(), 4);
    /// assert_eq!(index.size(), 16 * 4);
    /// ```
    pub fn new(capacity_hint: usize) -> Self {
        Self::build(capacity_hint, DEFAULT_SLOTS, RandomState::new())
    }

    /// Like [`new`](HashIndex::new) with a custom bucket capacity.
    pub fn with_slots(capacity_hint: usize, slots: usize) -> Result<Self> {
        Self::with_hasher(capacity_hint, slots, RandomState::new())
    }
}


impl<K: Hash + Eq, V, S: BuildHasher> HashIndex<K, V, S> {
    /// Creates an index that hashes keys with `hasher`.
    ///
    /// # Errors
    /// [`IndexError::InvalidConfig`] when `slots` is zero.
    pub fn with_hasher(capacity_hint: usize, slots: usize, hasher: S) -> Result<Self> {
        if slots == 0 {
            return Err(IndexError::InvalidConfig(
                "hash buckets need at least one slot".to_string(),
            ));
        }
        Ok(Self::build(capacity_hint, slots, hasher))
    }

    fn build(capacity_hint: usize, slots: usize, hasher: S) -> Self {
        let directory_len = capacity_hint
            .clamp(1, 1 << MAX_GLOBAL_DEPTH)
            .next_power_of_two();
        if directory_len != capacity_hint {
            debug!(capacity_hint, directory_len, "hash directory size rounded to a power of two");
        }
        let global_depth = directory_len.trailing_zeros();

        // One bucket per initial slot, nothing aliased yet
        let buckets = (0..directory_len)
            .map(|_| Bucket::new(global_depth, slots))
            .collect();
        let directory = (0..directory_len).collect();

        Self {
            slots,
            global_depth,
            directory,
            buckets,
            len: 0,
            hasher,
            max_depth: MAX_GLOBAL_DEPTH,
            splits: 0,
            accesses: AtomicU64::new(0),
        }
    }

    /// Lowers the depth cap below [`MAX_GLOBAL_DEPTH`].
    ///
    /// # Example
    /// ```
    /// use tableindex::{HashIndex, IndexError};
    ///
    /// // One slot per bucket and a directory that may not grow
    /// let mut index = HashIndex::with_slots(1, 1).unwrap().with_max_depth(0);
    /// index.put(1u32, "one").unwrap();
    /// assert!(matches!(index.put(2, "two"), Err(IndexError::DirectoryFull { depth: 0 })));
    /// assert_eq!(index.len(), 1);
    /// ```
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth.min(MAX_GLOBAL_DEPTH);
        self
    }

    /// Live key count.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slot capacity: `slots * bucket_count`. Not the number of keys.
    pub fn size(&self) -> usize {
        self.slots * self.buckets.len()
    }

    pub fn slots(&self) -> usize {
        self.slots
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn global_depth(&self) -> u32 {
        self.global_depth
    }

    pub fn directory_len(&self) -> usize {
        self.directory.len()
    }

    /// Local depth of the bucket a directory slot points at.
    pub fn local_depth(&self, slot: usize) -> Option<u32> {
        let id = *self.directory.get(slot)?;
        Some(self.buckets[id].local_depth)
    }

    /// Bucket splits performed so far.
    pub fn splits(&self) -> u64 {
        self.splits
    }

    /// Buckets scanned by `get` since creation or the last reset.
    pub fn bucket_accesses(&self) -> u64 {
        self.accesses.load(Ordering::Relaxed)
    }

    pub fn reset_stats(&self) {
        self.accesses.store(0, Ordering::Relaxed);
    }

    fn hash_of(&self, key: &K) -> u64 {
        self.hasher.hash_one(key)
    }

    /// Directory slot for a hash: its low `global_depth` bits.
    fn slot_for(&self, hash: u64) -> usize {
        (hash as usize) & (self.directory.len() - 1)
    }

    /// Look up the value stored for a key. Scans one bucket.
    ///
    /// # Example
    /// ```
    /// use tableindex::HashIndex;
    /// let mut h = HashIndex::new(4);
    /// h.put("dog", "bark").unwrap();
    /// assert_eq!(h.get(&"dog"), Some(&"bark"));
    /// assert_eq!(h.get(&"cat"), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.accesses.fetch_add(1, Ordering::Relaxed);
        let slot = self.slot_for(self.hash_of(key));
        self.buckets[self.directory[slot]].find(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Insert a new key-value pair.
    ///
    /// - An existing key is rejected with [`IndexError::DuplicateKey`].
    /// - While the addressed bucket is full it is split, doubling the
    ///   directory first when its local depth already equals the global
    ///   depth. The insert is then retried against the new target.
    ///
    /// # Errors
    /// [`IndexError::DirectoryFull`] when the keys colliding in one bucket
    /// cannot be told apart within the depth cap ([`MAX_GLOBAL_DEPTH`]
    /// unless lowered with [`with_max_depth`](HashIndex::with_max_depth)).
    /// The index is unchanged apart from splits already made.
    pub fn put(&mut self, key: K, value: V) -> Result<()> {
        let hash = self.hash_of(&key);
        let mut slot = self.slot_for(hash);

        if self.buckets[self.directory[slot]].contains(&key) {
            warn!(len = self.len, "hash index rejected duplicate key");
            return Err(IndexError::DuplicateKey);
        }

        // Split until the target has room; all entries may land on one side
        while self.buckets[self.directory[slot]].len() >= self.slots {
            let id = self.directory[slot];
            self.split(id, slot)?;
            slot = self.slot_for(hash);
        }

        let id = self.directory[slot];
        self.buckets[id].entries.push((key, value));
        self.len += 1;
        Ok(())
    }

    /// Every entry exactly once, walking the directory and skipping
    /// buckets already seen through an aliased slot.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        let mut seen = AHashSet::with_capacity(self.buckets.len());
        self.directory
            .iter()
            .filter(move |id| seen.insert(**id))
            .flat_map(move |&id| self.buckets[id].entries.iter().map(|(k, v)| (k, v)))
    }

    pub fn entries(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    /// Checks the directory invariants.
    ///
    /// - Directory length is `2^global_depth`.
    /// - Every bucket has `local_depth <= global_depth`, at most `slots`
    ///   entries, and is referenced by exactly `2^(global - local)` slots.
    /// - Every key hashes to a slot that points at its bucket.
    /// - The entry total matches `len`.
    ///
    /// # Errors
    /// [`IndexError::Corrupted`] describing the first violation found.
    pub fn validate(&self) -> Result<()> {
        let corrupted = |msg: String| Err(IndexError::Corrupted(msg));

        if self.directory.len() != 1 << self.global_depth {
            return corrupted(format!(
                "directory has {} slots at global depth {}",
                self.directory.len(),
                self.global_depth
            ));
        }

        let mut refs = vec![0usize; self.buckets.len()];
        for (slot, &id) in self.directory.iter().enumerate() {
            let Some(bucket) = self.buckets.get(id) else {
                return corrupted(format!("slot {} points at missing bucket {}", slot, id));
            };
            refs[id] += 1;
            if bucket.local_depth > self.global_depth {
                return corrupted(format!("bucket {} is deeper than the directory", id));
            }
            let mask = (1usize << bucket.local_depth) - 1;
            let misplaced = bucket
                .entries
                .iter()
                .any(|(k, _)| self.slot_for(self.hash_of(k)) & mask != slot & mask);
            if misplaced {
                return corrupted(format!("bucket {} holds a key addressed elsewhere", id));
            }
        }

        let mut total = 0;
        for (id, bucket) in self.buckets.iter().enumerate() {
            let expected = 1usize << (self.global_depth - bucket.local_depth.min(self.global_depth));
            if refs[id] != expected {
                return corrupted(format!(
                    "bucket {} at local depth {} has {} slots, expected {}",
                    id, bucket.local_depth, refs[id], expected
                ));
            }
            if bucket.len() > self.slots {
                return corrupted(format!("bucket {} holds {} entries", id, bucket.len()));
            }
            total += bucket.len();
        }
        if total != self.len {
            return corrupted(format!("buckets hold {} keys but len is {}", total, self.len));
        }
        Ok(())
    }

    /// Splits bucket `id`, reached through directory `slot`.
    ///
    /// The bucket keeps its arena id and the entries whose next hash bit
    /// is clear; a new sibling takes the rest, and every slot of the old
    /// addressing range with that bit set is repointed at the sibling.
    fn split(&mut self, id: usize, slot: usize) -> Result<()> {
        let local = self.buckets[id].local_depth;

        if local == self.global_depth {
            if self.global_depth >= self.max_depth {
                warn!(depth = self.global_depth, "hash directory at maximum depth");
                return Err(IndexError::DirectoryFull {
                    depth: self.global_depth,
                });
            }
            // Upper half aliases the lower half until buckets split
            self.directory.extend_from_within(..);
            self.global_depth += 1;
            debug!(
                global_depth = self.global_depth,
                directory_len = self.directory.len(),
                "hash directory doubled"
            );
        }

        let bit = 1u64 << local;
        let old_entries = std::mem::take(&mut self.buckets[id].entries);
        let hasher = &self.hasher;
        let (moved, kept): (Vec<_>, Vec<_>) = old_entries
            .into_iter()
            .partition(|(k, _)| hasher.hash_one(k) & bit != 0);

        let sibling_id = self.buckets.len();
        let bucket = &mut self.buckets[id];
        bucket.local_depth = local + 1;
        bucket.entries = kept;
        let mut sibling = Bucket::new(local + 1, self.slots);
        sibling.entries = moved;
        self.buckets.push(sibling);

        // Walk the old addressing range in strides of the new one
        let pattern = slot & ((1usize << local) - 1);
        let stride = 1usize << (local + 1);
        let mut target = pattern | (1usize << local);
        while target < self.directory.len() {
            debug_assert_eq!(self.directory[target], id);
            self.directory[target] = sibling_id;
            target += stride;
        }

        self.splits += 1;
        debug!(
            bucket = id,
            sibling = sibling_id,
            local_depth = local + 1,
            kept = self.buckets[id].len(),
            moved = self.buckets[sibling_id].len(),
            "hash bucket split"
        );
        Ok(())
    }
}


impl<K: Clone, V: Clone, S: Clone> Clone for HashIndex<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots,
            global_depth: self.global_depth,
            directory: self.directory.clone(),
            buckets: self.buckets.clone(),
            len: self.len,
            hasher: self.hasher.clone(),
            max_depth: self.max_depth,
            splits: self.splits,
            accesses: AtomicU64::new(0),
        }
    }
}


/// Duplicates in the input are skipped (and logged by `put`).
impl<K: Hash + Eq, V, S: BuildHasher> Extend<(K, V)> for HashIndex<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            let _ = self.put(key, value);
        }
    }
}


/// Bucket dump in physical (arena) order.
impl<K: fmt::Display, V: fmt::Display, S> fmt::Display for HashIndex<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hash Table (global depth {})", self.global_depth)?;
        writeln!(f, "-------------------------------------------")?;
        for (id, bucket) in self.buckets.iter().enumerate() {
            let aliases = self.directory.iter().filter(|&&slot_id| slot_id == id).count();
            writeln!(
                f,
                "Bucket #{} (local depth {}, {} slots):",
                id, bucket.local_depth, aliases
            )?;
            for (key, value) in &bucket.entries {
                writeln!(f, "\t{} = {}", key, value)?;
            }
        }
        write!(f, "-------------------------------------------")
    }
}


impl<K: Hash + Eq, V, S: BuildHasher> KeyIndex<K, V> for HashIndex<K, V, S> {
    fn put(&mut self, key: K, value: V) -> Result<()> {
        HashIndex::put(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        HashIndex::get(self, key)
    }

    fn size(&self) -> usize {
        HashIndex::size(self)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn entries(&self) -> Vec<(&K, &V)> {
        HashIndex::entries(self)
    }
}
