// =====================================================================
// File: index/mod.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Final Project
// Date: Nov. 24, 2025
//
//! The `index` module contains the B+Tree map used as the table's
//! ordered index, plus the [`KeyIndex`] trait every index implements.
//!
//! Structure:
//! - `node.rs`  : Defines the [`Node`] variant and its split helpers.
//! - `tree.rs`  : Defines the [`OrderedIndex`] and its algorithms
//!                (put, get, first/last, range extraction).
//! - `iter.rs`  : Ascending and bounded iterators over the leaves.
//! - `tests.rs` : Unit tests for the B+Tree (compiled only in test mode).
// =====================================================================

pub mod iter;
pub mod node;
pub mod tree;

pub use self::iter::{Iter, Range};
pub use self::node::Node;
pub use self::tree::{DEFAULT_FANOUT, MIN_FANOUT, OrderedIndex};

use crate::error::Result;

/// Associative-map contract a table engine uses to drive any index.
///
/// On table insert the engine calls [`put`](KeyIndex::put) on every live
/// index; point queries go through [`get`](KeyIndex::get); full scans go
/// through [`entries`](KeyIndex::entries).
///
/// # Example
/// ```
/// use tableindex::{HashIndex, KeyIndex, OrderedIndex};
///
/// let mut indexes: Vec<Box<dyn KeyIndex<u32, &str>>> = vec![
///     Box::new(OrderedIndex::new()),
///     Box::new(HashIndex::new(4)),
/// ];
/// for index in indexes.iter_mut() {
///     index.put(42, "answer").unwrap();
/// }
/// assert!(indexes.iter().all(|index| index.get(&42) == Some(&"answer")));
/// ```
pub trait KeyIndex<K, V> {
    /// Inserts a new key. An existing key is never overwritten.
    fn put(&mut self, key: K, value: V) -> Result<()>;

    fn get(&self, key: &K) -> Option<&V>;

    /// Size as each structure defines it. The tree reports its key count,
    /// the hash index its slot capacity. Use [`len`](KeyIndex::len) for
    /// the live key count.
    fn size(&self) -> usize;

    /// Live key count.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every entry once. Ascending for the tree, unspecified for the hash.
    fn entries(&self) -> Vec<(&K, &V)>;
}

#[cfg(test)]
pub mod tests;
