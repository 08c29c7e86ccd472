// =====================================================================
// File: index/tests.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Final Project
// Date: Nov. 25, 2025 - Refactored Dec. 2, 2025
//
// Description:
//   Unit tests for the B+Tree (`Node` and `OrderedIndex`). Covers put,
//   get, node splits at every level, first/last, range extraction and
//   the structural validator.
//
// Notes:
//   * Only compiled when running `cargo test`.
//   * Does not affect release builds.
// =====================================================================


// =================================================================
// Unit tests cover the Node helpers
// =================================================================
#[cfg(test)]
mod node_tests {
    use crate::index::node::{Node, child_index};

    #[test]
    fn test_new_leaf_node() {
        let node: Node<u32, u32> = Node::new_leaf(5);
        assert!(node.is_leaf());
        assert!(node.keys().is_empty());
        assert_eq!(node.node_count(), 1);
    }

    #[test]
    fn test_strict_routing() {
        let seps = ["g", "p"];
        assert_eq!(child_index(&seps, &"a"), 0);
        // Equal to a separator goes right
        assert_eq!(child_index(&seps, &"g"), 1);
        assert_eq!(child_index(&seps, &"h"), 1);
        assert_eq!(child_index(&seps, &"p"), 2);
        assert_eq!(child_index(&seps, &"z"), 2);
        assert_eq!(child_index::<&str>(&[], &"a"), 0);
    }

    #[test]
    fn test_split_leaf_copies_separator_up() {
        let mut leaf = Node::Leaf {
            keys: vec![1, 2, 3, 4, 5],
            values: vec!["a", "b", "c", "d", "e"],
        };
        let (sep, right) = leaf.split_leaf(5);

        assert_eq!(sep, 3);
        assert_eq!(leaf.keys(), &[1, 2]);
        assert_eq!(right.keys(), &[3, 4, 5]);
        match *right {
            Node::Leaf { values, .. } => assert_eq!(values, vec!["c", "d", "e"]),
            Node::Internal { .. } => panic!("right half of a leaf must be a leaf"),
        }
    }

    #[test]
    fn test_split_internal_moves_separator_up() {
        let children = (0..6).map(|_| Box::new(Node::<u32, ()>::new_leaf(5))).collect();
        let mut node = Node::Internal {
            keys: vec![10, 20, 30, 40, 50],
            children,
        };
        let (sep, right) = node.split_internal(5);

        assert_eq!(sep, 30);
        assert_eq!(node.keys(), &[10, 20]);
        assert_eq!(right.keys(), &[40, 50]);
        match (&node, &*right) {
            (Node::Internal { children: l, .. }, Node::Internal { children: r, .. }) => {
                assert_eq!(l.len(), 3);
                assert_eq!(r.len(), 3);
            }
            _ => panic!("both halves of an internal node must stay internal"),
        }
    }
}


// =================================================================
// Unit tests cover put / get and split structure
// =================================================================
#[cfg(test)]
mod tree_tests {
    use crate::{IndexError, OrderedIndex};

    /// Keys 1..=n with value k*k, validated after every put.
    fn squares(n: u32, fanout: usize) -> OrderedIndex<u32, u32> {
        let mut index = OrderedIndex::with_fanout(fanout).unwrap();
        for k in 1..=n {
            index.put(k, k * k).unwrap();
            index.validate().unwrap();
        }
        index
    }

    #[test]
    fn test_new_tree_is_empty() {
        let index: OrderedIndex<u32, u32> = OrderedIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert_eq!(index.height(), 1);
        assert_eq!(index.get(&1), None);
        assert_eq!(index.first_key(), Err(IndexError::EmptyIndex));
        assert_eq!(index.last_key(), Err(IndexError::EmptyIndex));
        assert!(index.entries().is_empty());
        assert!(index.validate().is_ok());
    }

    #[test]
    fn test_first_split_creates_root() {
        let index = squares(5, 5);
        // [1 2 3 4 5] overflows and cuts at 2, separator 3
        assert_eq!(index.height(), 2);
        assert_eq!(index.node_count(), 3);
        assert_eq!(index.to_string(), "[ . 3 . ]\n\t[ . 1 . 2 . ]\n\t[ . 3 . 4 . 5 . ]\n");
    }

    #[test]
    fn test_four_keys_fit_in_one_leaf() {
        let index = squares(4, 5);
        assert_eq!(index.height(), 1);
        assert_eq!(index.to_string(), "[ . 1 . 2 . 3 . 4 . ]\n");
    }

    #[test]
    fn test_scenario_squares_one_to_ten() {
        let index = squares(10, 5);

        assert_eq!(index.first_key(), Ok(&1));
        assert_eq!(index.last_key(), Ok(&10));
        assert_eq!(index.len(), 10);
        assert_eq!(index.entries().len(), 10);
        for k in 1..=10 {
            assert_eq!(index.get(&k), Some(&(k * k)));
        }
        assert_eq!(index.get(&0), None);
        assert_eq!(index.get(&11), None);

        // Root [3 5 7] over four leaves
        assert_eq!(index.height(), 2);
        assert_eq!(index.node_count(), 5);
    }

    #[test]
    fn test_internal_split_grows_third_level() {
        let index = squares(13, 5);
        assert_eq!(index.height(), 3);
        assert_eq!(index.node_count(), 9);
        let expected = "[ . 7 . ]\n\
                        \t[ . 3 . 5 . ]\n\
                        \t\t[ . 1 . 2 . ]\n\
                        \t\t[ . 3 . 4 . ]\n\
                        \t\t[ . 5 . 6 . ]\n\
                        \t[ . 9 . 11 . ]\n\
                        \t\t[ . 7 . 8 . ]\n\
                        \t\t[ . 9 . 10 . ]\n\
                        \t\t[ . 11 . 12 . 13 . ]\n";
        assert_eq!(index.to_string(), expected);
    }

    #[test]
    fn test_separator_keys_are_found_in_right_child() {
        let index = squares(13, 5);
        // 3, 5, 7, 9, 11 all appear as separators
        for k in [3, 5, 7, 9, 11] {
            assert_eq!(index.get(&k), Some(&(k * k)));
        }
    }

    #[test]
    fn test_reverse_and_interleaved_inserts() {
        for fanout in [3, 4, 5, 8] {
            let mut index = OrderedIndex::with_fanout(fanout).unwrap();
            for k in (0..200u32).rev().chain((200..400).step_by(2)).chain((201..400).step_by(2)) {
                index.put(k, k.to_string()).unwrap();
            }
            index.validate().unwrap();
            assert_eq!(index.len(), 400);
            let keys: Vec<u32> = index.keys().copied().collect();
            assert_eq!(keys, (0..400).collect::<Vec<_>>());
            assert_eq!(index.get(&257), Some(&"257".to_string()));
        }
    }

    #[test]
    fn test_string_keys_sort_lexicographically() {
        let mut index = OrderedIndex::new();
        for word in ["pear", "apple", "fig", "banana", "kiwi", "cherry", "date"] {
            index.put(word.to_string(), word.len()).unwrap();
        }
        assert_eq!(index.first_key().unwrap(), "apple");
        assert_eq!(index.last_key().unwrap(), "pear");
        let keys: Vec<&str> = index.keys().map(String::as_str).collect();
        assert_eq!(keys, ["apple", "banana", "cherry", "date", "fig", "kiwi", "pear"]);
    }

    #[test]
    fn test_duplicate_put_changes_nothing() {
        let mut index = squares(10, 5);
        let before = index.to_string();

        assert_eq!(index.put(4, 0), Err(IndexError::DuplicateKey));
        // Separator key as well
        assert_eq!(index.put(5, 0), Err(IndexError::DuplicateKey));

        assert_eq!(index.len(), 10);
        assert_eq!(index.entries().len(), 10);
        assert_eq!(index.get(&4), Some(&16));
        assert_eq!(index.to_string(), before);
        index.validate().unwrap();
    }

    #[test]
    fn test_invalid_fanout_rejected() {
        for fanout in [0, 1, 2] {
            assert!(matches!(
                OrderedIndex::<u32, u32>::with_fanout(fanout),
                Err(IndexError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_first_and_last_values() {
        let index = squares(30, 4);
        assert_eq!(index.first_key_value(), Ok((&1, &1)));
        assert_eq!(index.last_key_value(), Ok((&30, &900)));
    }

    #[test]
    fn test_iter_is_exact_size() {
        let index = squares(17, 5);
        let mut iter = index.iter();
        assert_eq!(iter.len(), 17);
        iter.next();
        assert_eq!(iter.len(), 16);
        assert_eq!(iter.count(), 16);
    }

    #[test]
    fn test_node_visits_follow_height() {
        let index = squares(13, 5);
        index.reset_stats();
        index.get(&8);
        assert_eq!(index.node_visits(), 3);
        index.get(&100);
        assert_eq!(index.node_visits(), 6);
        index.reset_stats();
        assert_eq!(index.node_visits(), 0);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = squares(6, 5);
        let copy = original.clone();
        original.put(7, 49).unwrap();

        assert_eq!(copy.len(), 6);
        assert_eq!(copy.get(&7), None);
        copy.validate().unwrap();
    }

    #[test]
    fn test_from_iterator_skips_duplicates() {
        let index: OrderedIndex<u32, &str> =
            [(2, "two"), (1, "one"), (2, "again"), (3, "three")].into_iter().collect();
        assert_eq!(index.len(), 3);
        assert_eq!(index.get(&2), Some(&"two"));
    }
}


// =================================================================
// Unit tests cover range extraction
// =================================================================
#[cfg(test)]
mod range_tests {
    use std::ops::Bound;

    use crate::{OrderedIndex, Range};

    fn squares(n: u32) -> OrderedIndex<u32, u32> {
        (1..=n).map(|k| (k, k * k)).collect()
    }

    fn keys_of(index: &OrderedIndex<u32, u32>) -> Vec<u32> {
        index.keys().copied().collect()
    }

    #[test]
    fn test_sub_map_is_half_open() {
        let index = squares(10);
        let sub = index.sub_map(&3, &7);

        assert_eq!(sub.get(&3), Some(&9));
        assert_eq!(sub.get(&8), None);
        assert_eq!(sub.get(&2), None);
        assert_eq!(sub.get(&7), None);
        assert_eq!(keys_of(&sub), vec![3, 4, 5, 6]);
        assert_eq!(sub.fanout(), index.fanout());
        sub.validate().unwrap();
    }

    #[test]
    fn test_sub_map_bounds_missing_from_tree() {
        let index: OrderedIndex<u32, u32> = (0..50).map(|k| (k * 2, k)).collect();
        let sub = index.sub_map(&13, &21);
        assert_eq!(keys_of(&sub), vec![14, 16, 18, 20]);
    }

    #[test]
    fn test_head_and_tail_maps() {
        let index = squares(10);
        assert_eq!(keys_of(&index.head_map(&4)), vec![1, 2, 3]);
        assert_eq!(keys_of(&index.tail_map(&8)), vec![8, 9, 10]);
        // Tail keeps the last key
        assert_eq!(keys_of(&index.tail_map(&10)), vec![10]);
        assert!(index.head_map(&1).is_empty());
        assert!(index.tail_map(&11).is_empty());
    }

    #[test]
    fn test_malformed_ranges_are_empty() {
        let index = squares(10);
        assert!(index.sub_map(&7, &3).is_empty());
        assert!(index.sub_map(&5, &5).is_empty());
        assert_eq!(index.range_iter((Bound::Excluded(5), Bound::Excluded(5))).count(), 0);
        assert_eq!(index.range_iter(6..=5).count(), 0);
    }

    #[test]
    fn test_range_iter_bound_kinds() {
        fn collect(range: Range<'_, u32, u32>) -> Vec<u32> {
            range.map(|(k, _)| *k).collect()
        }
        let index = squares(30);

        assert_eq!(collect(index.range_iter(10..13)), vec![10, 11, 12]);
        assert_eq!(collect(index.range_iter(10..=13)), vec![10, 11, 12, 13]);
        assert_eq!(collect(index.range_iter(28..)), vec![28, 29, 30]);
        assert_eq!(collect(index.range_iter(..3)), vec![1, 2]);
        assert_eq!(
            collect(index.range_iter((Bound::Excluded(10), Bound::Included(12)))),
            vec![11, 12]
        );
        assert_eq!(index.range_iter(..).count(), 30);
    }

    #[test]
    fn test_range_crosses_many_leaves() {
        let index: OrderedIndex<u32, u32> = (0..1000).map(|k| (k, k)).collect();
        let sub = index.range(123..877);
        assert_eq!(sub.len(), 754);
        assert_eq!(sub.first_key(), Ok(&123));
        assert_eq!(sub.last_key(), Ok(&876));
        sub.validate().unwrap();
    }

    #[test]
    fn test_range_on_empty_tree() {
        let index: OrderedIndex<u32, u32> = OrderedIndex::new();
        assert!(index.sub_map(&1, &5).is_empty());
        assert_eq!(index.range_iter(..).count(), 0);
    }

    #[test]
    fn test_range_result_is_independent() {
        let index = squares(10);
        let mut sub = index.sub_map(&2, &5);
        sub.put(100, 0).unwrap();
        assert_eq!(index.get(&100), None);
        assert_eq!(index.len(), 10);
    }
}
