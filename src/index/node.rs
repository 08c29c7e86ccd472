// =====================================================================
// File: index/node.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Final Project
// Date: Nov. 24, 2025 - Refactored Dec. 1, 2025
//
// Description:
//   Defines the B+Tree node (`Node`) used by the ordered index. A node
//   is either:
//
//   - `Leaf`    : sorted keys with their values at the same positions.
//   - `Internal`: sorted separator keys with `keys.len() + 1` children.
//
// Notes:
//   * Routing is strict: keys `< keys[i]` live under `children[i]`,
//     keys `>= keys[i]` live under `children[i + 1]`.
//   * Nodes may hold one key past capacity for the duration of a single
//     insert. The split helpers here cut such a node in two and hand the
//     promoted separator plus the new right sibling back to the caller.
//   * Higher-level operations (put, get, range) are in `tree.rs`.
// =====================================================================

/// B+Tree node. Leaves carry the values, internal nodes only route.
#[derive(Debug, Clone)]
pub enum Node<K, V> {
    Leaf {
        keys: Vec<K>,
        values: Vec<V>,
    },
    Internal {
        keys: Vec<K>,
        /// Box allows the tree to own its subtrees recursively - Heap
        children: Vec<Box<Node<K, V>>>,
    },
}


impl<K: Ord, V> Node<K, V> {
    /// Creates a new empty leaf sized for the given fanout.
    ///
    /// # Example
    /// ```
    /// use tableindex::index::Node;
    /// let leaf: Node<u32, u32> = Node::new_leaf(5);
    /// assert!(leaf.is_leaf());
    /// assert!(leaf.keys().is_empty());
    /// ```
    pub fn new_leaf(fanout: usize) -> Self {
        Node::Leaf {
            keys: Vec::with_capacity(fanout),
            values: Vec::with_capacity(fanout),
        }
    }

    /// Builds the 1-key internal node produced when a split reaches the root.
    pub(crate) fn new_root(separator: K, left: Box<Node<K, V>>, right: Box<Node<K, V>>) -> Self {
        Node::Internal {
            keys: vec![separator],
            children: vec![left, right],
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Keys held by this node (separators for internal nodes).
    pub fn keys(&self) -> &[K] {
        match self {
            Node::Leaf { keys, .. } | Node::Internal { keys, .. } => keys,
        }
    }

    /// Index of the child a key routes to. See [`child_index`].
    pub fn route(&self, key: &K) -> usize {
        child_index(self.keys(), key)
    }

    /// Cuts an overflowing leaf at `fanout / 2`.
    ///
    /// The left half stays in `self`, the right half is returned together
    /// with a copy of its first key, which becomes the separator.
    pub(crate) fn split_leaf(&mut self, fanout: usize) -> (K, Box<Node<K, V>>)
    where
        K: Clone,
    {
        let mid = fanout / 2;
        match self {
            Node::Leaf { keys, values } => {
                let right_keys = keys.split_off(mid);
                let right_values = values.split_off(mid);
                let separator = right_keys[0].clone();
                let right = Node::Leaf {
                    keys: right_keys,
                    values: right_values,
                };
                (separator, Box::new(right))
            }
            Node::Internal { .. } => unreachable!("split_leaf called on an internal node"),
        }
    }

    /// Cuts an overflowing internal node at `fanout / 2`.
    ///
    /// Left keeps `keys[..mid]` and `children[..=mid]`, `keys[mid]` moves
    /// up to the caller, right takes everything after it.
    pub(crate) fn split_internal(&mut self, fanout: usize) -> (K, Box<Node<K, V>>) {
        let mid = fanout / 2;
        match self {
            Node::Internal { keys, children } => {
                let right_keys = keys.split_off(mid + 1);
                let right_children = children.split_off(mid + 1);
                // Middle key moves up, it is not copied
                let separator = keys.pop().expect("overflowing node has a middle key");
                let right = Node::Internal {
                    keys: right_keys,
                    children: right_children,
                };
                (separator, Box::new(right))
            }
            Node::Leaf { .. } => unreachable!("split_internal called on a leaf"),
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { children, .. } => {
                1 + children.iter().map(|c| c.node_count()).sum::<usize>()
            }
        }
    }
}


/// Strict routing rule shared by lookups, inserts and range seeks.
///
/// Counts the separators that are `<= key`, so a key equal to a
/// separator always goes right.
///
/// # Example
/// ```
/// use tableindex::index::node::child_index;
/// let seps = [10, 20];
/// assert_eq!(child_index(&seps, &5), 0);
/// assert_eq!(child_index(&seps, &10), 1);
/// assert_eq!(child_index(&seps, &25), 2);
/// ```
pub fn child_index<K: Ord>(separators: &[K], key: &K) -> usize {
    separators.partition_point(|sep| sep <= key)
}
