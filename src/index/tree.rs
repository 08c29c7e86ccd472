// =====================================================================
// File: index/tree.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Final Project
// Date: Nov. 24, 2025 - Refactored Dec. 2, 2025
//
// Description:
//   Implements the B+Tree map (`OrderedIndex`) that backs the table's
//   point and range lookups. Values live only in the leaves; internal
//   nodes hold separator keys that route a search down one path.
//
// Features:
//   - `put`       : Inserts a unique key. Duplicates are rejected.
//   - `get`       : Point lookup, O(log n) node visits.
//   - `first_key` / `last_key` : Leftmost / rightmost leaf.
//   - `range`, `sub_map`, `head_map`, `tail_map` : Half-open range
//     extraction into a new, independently owned index.
//   - `iter` / `entries` : Ascending traversal of every leaf.
//
// Notes:
//   * There is no delete. The tree only ever grows.
//   * A split hands `(separator, right sibling)` back to the caller,
//     which wedges it in place or, at the top, grows a new root.
//   * Relies on `node.rs` for `Node` and on `iter.rs` for traversal.
// =====================================================================
use std::fmt;
use std::ops::{Bound, RangeBounds};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, trace, warn};

use super::iter::{Iter, Range};
use super::node::{Node, child_index};
use super::KeyIndex;
use crate::error::{IndexError, Result};

/// Default maximum number of children per internal node.
pub const DEFAULT_FANOUT: usize = 5;

/// Smallest fanout that still splits into two non-empty halves.
pub const MIN_FANOUT: usize = 3;

/// Split result bubbled up one level: the promoted separator and the new
/// right sibling.
type Promoted<K, V> = (K, Box<Node<K, V>>);


/// B+Tree map over any totally ordered key type.
#[derive(Debug)]
pub struct OrderedIndex<K, V> {
    fanout: usize,
    root: Box<Node<K, V>>,
    len: usize,
    /// Nodes touched by lookups, diagnostics only
    visits: AtomicU64,
}


impl<K: Ord + Clone, V> OrderedIndex<K, V> {
    /// Creates an empty tree with [`DEFAULT_FANOUT`].
    pub fn new() -> Self {
        Self::build(DEFAULT_FANOUT)
    }

    /// Creates an empty tree with the given fanout (at least [`MIN_FANOUT`]).
    ///
    /// # Example
    /// ```
    /// use tableindex::{IndexError, OrderedIndex};
    ///
    /// let index = OrderedIndex::<u32, u32>::with_fanout(8).unwrap();
    /// assert_eq!(index.fanout(), 8);
    /// assert!(matches!(
    ///     OrderedIndex::<u32, u32>::with_fanout(2),
    ///     Err(IndexError::InvalidConfig(_))
    /// ));
    /// ```
    pub fn with_fanout(fanout: usize) -> Result<Self> {
        if fanout < MIN_FANOUT {
            return Err(IndexError::InvalidConfig(format!(
                "fanout must be at least {}, got {}",
                MIN_FANOUT, fanout
            )));
        }
        Ok(Self::build(fanout))
    }

    fn build(fanout: usize) -> Self {
        Self {
            fanout,
            root: Box::new(Node::new_leaf(fanout)),
            len: 0,
            visits: AtomicU64::new(0),
        }
    }

    pub fn fanout(&self) -> usize {
        self.fanout
    }

    /// Number of keys inserted so far.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Look up the value stored for a key.
    ///
    /// Descends from the root following the strict routing rule, then
    /// binary-searches the leaf.
    ///
    /// # Returns
    /// * `Some(&V)` if the key exists.
    /// * `None` if it does not.
    ///
    /// # Example
    /// ```
    /// use tableindex::OrderedIndex;
    /// let mut t = OrderedIndex::new();
    /// t.put("dog".to_string(), "bark").unwrap();
    /// assert_eq!(t.get(&"dog".to_string()), Some(&"bark"));
    /// assert_eq!(t.get(&"cat".to_string()), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        let mut node = &*self.root;
        loop {
            self.visits.fetch_add(1, Ordering::Relaxed);
            match node {
                Node::Internal { keys, children } => node = &*children[child_index(keys, key)],
                Node::Leaf { keys, values } => {
                    return keys.binary_search(key).ok().map(|pos| &values[pos]);
                }
            }
        }
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Insert a new key-value pair.
    ///
    /// - If the key already exists the tree is left untouched and
    ///   [`IndexError::DuplicateKey`] is returned (no overwrite).
    /// - A full leaf is split and the split propagates upward as far as
    ///   needed. A root split grows the tree by one level.
    ///
    /// # Example
    /// ```
    /// use tableindex::{IndexError, OrderedIndex};
    ///
    /// let mut index = OrderedIndex::new();
    /// index.put(7, "seven").unwrap();
    /// assert_eq!(index.put(7, "again"), Err(IndexError::DuplicateKey));
    /// assert_eq!(index.get(&7), Some(&"seven"));
    /// assert_eq!(index.len(), 1);
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Result<()> {
        let fanout = self.fanout;

        match Self::insert_internal(&mut self.root, fanout, key, value) {
            Err(err) => {
                warn!(len = self.len, "ordered index rejected duplicate key");
                return Err(err);
            }
            Ok(None) => {}
            Ok(Some((separator, right))) => {
                // Hang the old root and its new sibling under a fresh root
                let left = std::mem::replace(&mut self.root, Box::new(Node::new_leaf(fanout)));
                self.root = Box::new(Node::new_root(separator, left, right));
                debug!(height = self.height(), "ordered index root split");
            }
        }

        self.len += 1;
        Ok(())
    }

    /// Smallest key in the tree.
    ///
    /// # Errors
    /// [`IndexError::EmptyIndex`] when nothing has been inserted.
    pub fn first_key(&self) -> Result<&K> {
        self.first_key_value().map(|(k, _)| k)
    }

    /// Largest key in the tree.
    ///
    /// # Errors
    /// [`IndexError::EmptyIndex`] when nothing has been inserted.
    pub fn last_key(&self) -> Result<&K> {
        self.last_key_value().map(|(k, _)| k)
    }

    /// Smallest entry. Walks `children[0]` down to the leftmost leaf.
    pub fn first_key_value(&self) -> Result<(&K, &V)> {
        let mut node = &*self.root;
        loop {
            match node {
                Node::Internal { children, .. } => node = &*children[0],
                Node::Leaf { keys, values } => {
                    return keys
                        .first()
                        .zip(values.first())
                        .ok_or(IndexError::EmptyIndex);
                }
            }
        }
    }

    /// Largest entry. Walks the last child down to the rightmost leaf.
    pub fn last_key_value(&self) -> Result<(&K, &V)> {
        let mut node = &*self.root;
        loop {
            match node {
                Node::Internal { children, .. } => node = &*children[children.len() - 1],
                Node::Leaf { keys, values } => {
                    return keys
                        .last()
                        .zip(values.last())
                        .ok_or(IndexError::EmptyIndex);
                }
            }
        }
    }

    /// Ascending iterator over every entry.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root, self.len)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Every entry in ascending key order, collected.
    pub fn entries(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    /// Borrowing iterator over the entries inside `bounds`.
    ///
    /// Malformed bounds (start after end, or an empty half-open pair)
    /// yield nothing.
    pub fn range_iter<R: RangeBounds<K>>(&self, bounds: R) -> Range<'_, K, V> {
        if is_empty_range(bounds.start_bound(), bounds.end_bound()) {
            return Range::empty();
        }
        Range::new(&self.root, bounds.start_bound(), bounds.end_bound().cloned())
    }

    /// Copies the entries inside `bounds` into a new index with the same
    /// fanout.
    ///
    /// # Example
    /// ```
    /// use tableindex::OrderedIndex;
    ///
    /// let mut index = OrderedIndex::new();
    /// for k in 1..=10 {
    ///     index.put(k, k * k).unwrap();
    /// }
    /// let middle = index.range(3..7);
    /// assert_eq!(middle.len(), 4);
    /// assert_eq!(middle.get(&3), Some(&9));
    /// assert_eq!(middle.get(&7), None);
    /// ```
    pub fn range<R: RangeBounds<K>>(&self, bounds: R) -> Self
    where
        V: Clone,
    {
        let mut sub = Self::build(self.fanout);
        for (key, value) in self.range_iter(bounds) {
            // Entries arrive sorted and unique
            let inserted = sub.put(key.clone(), value.clone());
            debug_assert!(inserted.is_ok());
        }
        trace!(from_len = self.len, to_len = sub.len, "ordered index range extracted");
        sub
    }

    /// Entries with `from <= key < to`.
    pub fn sub_map(&self, from: &K, to: &K) -> Self
    where
        V: Clone,
    {
        self.range((Bound::Included(from), Bound::Excluded(to)))
    }

    /// Entries with `key < to`.
    pub fn head_map(&self, to: &K) -> Self
    where
        V: Clone,
    {
        self.range((Bound::Unbounded, Bound::Excluded(to)))
    }

    /// Entries with `from <= key`, the last key included.
    pub fn tail_map(&self, from: &K) -> Self
    where
        V: Clone,
    {
        self.range((Bound::Included(from), Bound::Unbounded))
    }

    /// Number of levels, 1 for a lone leaf root.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut node = &*self.root;
        while let Node::Internal { children, .. } = node {
            node = &*children[0];
            height += 1;
        }
        height
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Nodes visited by `get` since creation or the last reset.
    pub fn node_visits(&self) -> u64 {
        self.visits.load(Ordering::Relaxed)
    }

    pub fn reset_stats(&self) {
        self.visits.store(0, Ordering::Relaxed);
    }

    /// Checks every structural invariant of the tree.
    ///
    /// - Node capacity (`fanout - 1` keys) and strictly increasing keys.
    /// - Internal nodes own `keys + 1` children and every separator
    ///   partitions its two neighbours (`left < sep <= right`).
    /// - All leaves sit at the same depth, only the root may be empty.
    /// - The leaf key count matches `len`.
    ///
    /// # Errors
    /// [`IndexError::Corrupted`] describing the first violation found.
    pub fn validate(&self) -> Result<()> {
        let mut leaf_depth = None;
        let counted = Self::validate_node(&self.root, self.fanout, 0, None, None, &mut leaf_depth)?;
        if counted != self.len {
            return Err(IndexError::Corrupted(format!(
                "leaves hold {} keys but len is {}",
                counted, self.len
            )));
        }
        Ok(())
    }


    // =========================
    // Insertion helpers
    // =========================

    /// Inserts into the subtree rooted at `node`.
    ///
    /// # Behavior
    /// - **Leaf**: wedge at the sorted position, reject an equal key.
    /// - **Internal**: recurse into the routed child; if that child split,
    ///   wedge the promoted separator and right sibling just after it.
    /// - Either way, a node that now holds `fanout` keys is split and the
    ///   result is returned to the caller.
    fn insert_internal(
        node: &mut Node<K, V>,
        fanout: usize,
        key: K,
        value: V,
    ) -> Result<Option<Promoted<K, V>>> {
        match node {
            Node::Leaf { keys, values } => {
                let pos = match keys.binary_search(&key) {
                    Ok(_) => return Err(IndexError::DuplicateKey),
                    Err(pos) => pos,
                };
                keys.insert(pos, key);
                values.insert(pos, value);
                if keys.len() < fanout {
                    return Ok(None);
                }
            }
            Node::Internal { keys, children } => {
                let idx = child_index(keys, &key);
                let Some((separator, right)) =
                    Self::insert_internal(&mut children[idx], fanout, key, value)?
                else {
                    return Ok(None);
                };
                keys.insert(idx, separator);
                children.insert(idx + 1, right);
                if keys.len() < fanout {
                    return Ok(None);
                }
            }
        }

        // Node holds one key past capacity - cut it in two
        let promoted = if node.is_leaf() {
            node.split_leaf(fanout)
        } else {
            node.split_internal(fanout)
        };
        debug_assert!(node.keys().len() < fanout && promoted.1.keys().len() < fanout);
        debug!(leaf = node.is_leaf(), "ordered index node split");
        Ok(Some(promoted))
    }


    // =========================
    // Validation helpers
    // =========================

    /// Validates one subtree whose keys must lie in `[lower, upper)`.
    /// Returns the number of leaf keys below it.
    fn validate_node(
        node: &Node<K, V>,
        fanout: usize,
        depth: usize,
        lower: Option<&K>,
        upper: Option<&K>,
        leaf_depth: &mut Option<usize>,
    ) -> Result<usize> {
        let corrupted = |msg: String| Err(IndexError::Corrupted(msg));
        let keys = node.keys();

        if keys.len() > fanout - 1 {
            return corrupted(format!("node at depth {} holds {} keys", depth, keys.len()));
        }
        if depth > 0 && keys.is_empty() {
            return corrupted(format!("empty non-root node at depth {}", depth));
        }
        if keys.windows(2).any(|w| w[0] >= w[1]) {
            return corrupted(format!("keys out of order at depth {}", depth));
        }
        let below_lower = lower.is_some_and(|lo| keys.first().is_some_and(|k| k < lo));
        let above_upper = upper.is_some_and(|hi| keys.last().is_some_and(|k| k >= hi));
        if below_lower || above_upper {
            return corrupted(format!("separator does not partition depth {}", depth));
        }

        match node {
            Node::Leaf { keys, values } => {
                if keys.len() != values.len() {
                    return corrupted(format!("leaf at depth {} has mismatched values", depth));
                }
                match *leaf_depth {
                    None => *leaf_depth = Some(depth),
                    Some(expected) if expected != depth => {
                        return corrupted(format!(
                            "leaf at depth {} but others at depth {}",
                            depth, expected
                        ));
                    }
                    Some(_) => {}
                }
                Ok(keys.len())
            }
            Node::Internal { keys, children } => {
                if children.len() != keys.len() + 1 {
                    return corrupted(format!(
                        "internal node at depth {} has {} keys and {} children",
                        depth,
                        keys.len(),
                        children.len()
                    ));
                }
                let mut total = 0;
                for (i, child) in children.iter().enumerate() {
                    let lo = if i == 0 { lower } else { Some(&keys[i - 1]) };
                    let hi = if i == keys.len() { upper } else { Some(&keys[i]) };
                    total += Self::validate_node(child, fanout, depth + 1, lo, hi, leaf_depth)?;
                }
                Ok(total)
            }
        }
    }
}


/// True when no key can satisfy both bounds.
fn is_empty_range<K: Ord>(start: Bound<&K>, end: Bound<&K>) -> bool {
    match (start, end) {
        (Bound::Included(s), Bound::Included(e)) => s > e,
        (Bound::Included(s), Bound::Excluded(e))
        | (Bound::Excluded(s), Bound::Included(e))
        | (Bound::Excluded(s), Bound::Excluded(e)) => s >= e,
        _ => false,
    }
}


impl<K: Ord + Clone, V> Default for OrderedIndex<K, V> {
    fn default() -> Self {
        Self::new()
    }
}


impl<K: Clone, V: Clone> Clone for OrderedIndex<K, V> {
    fn clone(&self) -> Self {
        Self {
            fanout: self.fanout,
            root: self.root.clone(),
            len: self.len,
            visits: AtomicU64::new(0),
        }
    }
}


impl<'a, K: Ord + Clone, V> IntoIterator for &'a OrderedIndex<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


/// Duplicates in the input are skipped (and logged by `put`).
impl<K: Ord + Clone, V> Extend<(K, V)> for OrderedIndex<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            let _ = self.put(key, value);
        }
    }
}


impl<K: Ord + Clone, V> FromIterator<(K, V)> for OrderedIndex<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}


/// Pre-order dump, one node per line, indented one tab per level.
impl<K: fmt::Display, V> fmt::Display for OrderedIndex<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn print_node<K: fmt::Display, V>(
            f: &mut fmt::Formatter<'_>,
            node: &Node<K, V>,
            level: usize,
        ) -> fmt::Result {
            for _ in 0..level {
                write!(f, "\t")?;
            }
            write!(f, "[ . ")?;
            let keys = match node {
                Node::Leaf { keys, .. } | Node::Internal { keys, .. } => keys,
            };
            for key in keys {
                write!(f, "{} . ", key)?;
            }
            writeln!(f, "]")?;
            if let Node::Internal { children, .. } = node {
                for child in children {
                    print_node(f, child, level + 1)?;
                }
            }
            Ok(())
        }
        print_node(f, &self.root, 0)
    }
}


impl<K: Ord + Clone, V> KeyIndex<K, V> for OrderedIndex<K, V> {
    fn put(&mut self, key: K, value: V) -> Result<()> {
        OrderedIndex::put(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        OrderedIndex::get(self, key)
    }

    fn size(&self) -> usize {
        self.len
    }

    fn len(&self) -> usize {
        self.len
    }

    fn entries(&self) -> Vec<(&K, &V)> {
        OrderedIndex::entries(self)
    }
}
