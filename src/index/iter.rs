// =====================================================================
// File: index/iter.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Final Project
// Date: Dec. 2, 2025
//
// Description:
//   Borrowing iterators over the ordered index. Both walk the leaves
//   left to right with an explicit stack of the unvisited siblings on
//   the path from the root, so no parent pointers or leaf links are
//   needed.
//
//   - `Iter`  : every entry, ascending. Exact size.
//   - `Range` : entries between two bounds. Seeks to the lower bound
//               in O(log n) and stops at the first key past the upper.
// =====================================================================
use std::iter::{FusedIterator, Zip};
use std::ops::Bound;
use std::slice;

use super::node::{Node, child_index};

type LeafEntries<'a, K, V> = Zip<slice::Iter<'a, K>, slice::Iter<'a, V>>;


/// Position inside the tree: the remaining siblings at each internal
/// level plus the remaining entries of the current leaf.
struct Cursor<'a, K, V> {
    stack: Vec<slice::Iter<'a, Box<Node<K, V>>>>,
    leaf: Option<LeafEntries<'a, K, V>>,
}


impl<'a, K, V> Cursor<'a, K, V> {
    fn empty() -> Self {
        Self {
            stack: Vec::new(),
            leaf: None,
        }
    }

    /// Positions the cursor on the leftmost entry under `node`.
    fn descend(&mut self, mut node: &'a Node<K, V>) {
        loop {
            match node {
                Node::Leaf { keys, values } => {
                    self.leaf = Some(keys.iter().zip(values.iter()));
                    return;
                }
                Node::Internal { children, .. } => {
                    let mut rest = children.iter();
                    let first = rest.next();
                    self.stack.push(rest);
                    match first {
                        Some(child) => node = &**child,
                        None => return,
                    }
                }
            }
        }
    }

    /// Positions the cursor on the first entry that satisfies `start`.
    fn seek(&mut self, mut node: &'a Node<K, V>, start: Bound<&K>)
    where
        K: Ord,
    {
        loop {
            match node {
                Node::Internal { keys, children } => {
                    let idx = match start {
                        Bound::Unbounded => 0,
                        Bound::Included(key) | Bound::Excluded(key) => child_index(keys, key),
                    };
                    // Siblings left of idx only hold keys below the bound
                    let mut rest = children[idx..].iter();
                    let first = rest.next();
                    self.stack.push(rest);
                    match first {
                        Some(child) => node = &**child,
                        None => return,
                    }
                }
                Node::Leaf { keys, values } => {
                    let pos = match start {
                        Bound::Unbounded => 0,
                        Bound::Included(key) => keys.partition_point(|k| k < key),
                        Bound::Excluded(key) => keys.partition_point(|k| k <= key),
                    };
                    self.leaf = Some(keys[pos..].iter().zip(values[pos..].iter()));
                    return;
                }
            }
        }
    }

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        loop {
            if let Some(entries) = self.leaf.as_mut() {
                if let Some(entry) = entries.next() {
                    return Some(entry);
                }
                self.leaf = None;
            }

            // Leaf exhausted: climb until a level still has an unvisited child
            let child = loop {
                let level = self.stack.last_mut()?;
                match level.next() {
                    Some(child) => break child,
                    None => {
                        self.stack.pop();
                    }
                }
            };
            self.descend(child);
        }
    }

    fn clear(&mut self) {
        self.stack.clear();
        self.leaf = None;
    }
}


/// Ascending iterator over every entry of an
/// [`OrderedIndex`](crate::OrderedIndex).
///
/// # Example
/// ```
/// use tableindex::OrderedIndex;
///
/// let mut index = OrderedIndex::new();
/// for k in [3, 1, 2] {
///     index.put(k, k * 10).unwrap();
/// }
/// let keys: Vec<i32> = index.iter().map(|(k, _)| *k).collect();
/// assert_eq!(keys, vec![1, 2, 3]);
/// ```
pub struct Iter<'a, K, V> {
    cursor: Cursor<'a, K, V>,
    remaining: usize,
}


impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(root: &'a Node<K, V>, len: usize) -> Self {
        let mut cursor = Cursor::empty();
        cursor.descend(root);
        Self {
            cursor,
            remaining: len,
        }
    }
}


impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.cursor.next()?;
        self.remaining = self.remaining.saturating_sub(1);
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}


/// Iterator over the entries of an [`OrderedIndex`](crate::OrderedIndex)
/// that fall inside a pair of bounds. Created by
/// [`OrderedIndex::range_iter`](crate::OrderedIndex::range_iter).
pub struct Range<'a, K, V> {
    cursor: Cursor<'a, K, V>,
    end: Bound<K>,
}


impl<'a, K: Ord, V> Range<'a, K, V> {
    pub(crate) fn new(root: &'a Node<K, V>, start: Bound<&K>, end: Bound<K>) -> Self {
        let mut cursor = Cursor::empty();
        cursor.seek(root, start);
        Self { cursor, end }
    }

    /// A range that yields nothing (malformed bounds).
    pub(crate) fn empty() -> Self {
        Self {
            cursor: Cursor::empty(),
            end: Bound::Unbounded,
        }
    }
}


impl<'a, K: Ord, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.cursor.next()?;
        let within = match &self.end {
            Bound::Unbounded => true,
            Bound::Included(end) => key <= end,
            Bound::Excluded(end) => key < end,
        };
        if within {
            Some((key, value))
        } else {
            // Everything after this key is past the bound too
            self.cursor.clear();
            None
        }
    }
}

impl<K: Ord, V> FusedIterator for Range<'_, K, V> {}
