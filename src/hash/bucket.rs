// =====================================================================
// File: hash/bucket.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Final Project
// Date: Nov. 30, 2025
//
// Description:
//   Fixed-capacity hash bucket. Entries are kept in arrival order and
//   searched linearly; the capacity is enforced by the owning
//   `HashIndex`, which splits a bucket before it would overflow.
// =====================================================================

/// One bucket of the extendable hash index.
#[derive(Debug, Clone)]
pub struct Bucket<K, V> {
    /// Number of low hash bits every key in this bucket agrees on.
    pub local_depth: u32,
    pub entries: Vec<(K, V)>,
}


impl<K: Eq, V> Bucket<K, V> {
    pub fn new(local_depth: u32, slots: usize) -> Self {
        Self {
            local_depth,
            entries: Vec::with_capacity(slots),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Linear scan for a key.
    ///
    /// # Example
    /// ```
    /// use tableindex::hash::Bucket;
    ///
    /// let mut bucket = Bucket::new(0, 4);
    /// bucket.entries.push(("cat", "meow"));
    /// assert_eq!(bucket.find(&"cat"), Some(&"meow"));
    /// assert_eq!(bucket.find(&"dog"), None);
    /// ```
    pub fn find(&self, key: &K) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }
}
