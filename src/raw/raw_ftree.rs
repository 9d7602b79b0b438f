use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::mem;

use tracing::{debug, trace};

use super::node::{Node, SearchResult};
use crate::Degree;

/// The core multiway search tree backing `FTree`.
#[derive(Clone)]
pub(crate) struct RawFTree<K, V> {
    /// The root node; an empty leaf until the first insertion.
    root: Node<K, V>,
    /// Fixed at construction.
    degree: Degree,
}

impl<K, V> RawFTree<K, V> {
    /// Creates a new, empty tree.
    pub(crate) fn new(degree: Degree) -> Self {
        Self {
            root: Node::new(),
            degree,
        }
    }

    pub(crate) fn degree(&self) -> Degree {
        self.degree
    }

    /// Returns a reference to the root node.
    pub(crate) fn root(&self) -> &Node<K, V> {
        &self.root
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) fn len(&self) -> usize {
        self.root.size()
    }

    /// Returns true if the tree contains no elements.
    pub(crate) fn is_empty(&self) -> bool {
        self.root.size() == 0
    }

    /// Returns the number of edges between the root and any leaf.
    pub(crate) fn height(&self) -> usize {
        self.root.height()
    }

    /// Returns the smallest key, descending along first children.
    pub(crate) fn first_key(&self) -> Option<&K> {
        let mut node = &self.root;
        while let Some(child) = node.children().first() {
            node = child;
        }
        node.keys().first()
    }

    /// Returns the largest key, descending along last children.
    pub(crate) fn last_key(&self) -> Option<&K> {
        let mut node = &self.root;
        while let Some(child) = node.children().last() {
            node = child;
        }
        node.keys().last()
    }

    /// Collects every key-value pair in ascending key order.
    pub(crate) fn entries(&self) -> Vec<(&K, &V)> {
        let mut entries = Vec::with_capacity(self.len());
        visit_in_order(&self.root, &mut |key, value| entries.push((key, value)));
        entries
    }

    /// Collects every key in ascending order.
    pub(crate) fn keys(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.len());
        visit_in_order(&self.root, &mut |key, _| keys.push(key));
        keys
    }

    /// Collects every value in ascending key order.
    pub(crate) fn values(&self) -> Vec<&V> {
        let mut values = Vec::with_capacity(self.len());
        visit_in_order(&self.root, &mut |_, value| values.push(value));
        values
    }

    /// Returns the key-value pair with exactly `rank` smaller keys.
    pub(crate) fn select(&self, rank: usize) -> Option<(&K, &V)> {
        if rank >= self.len() {
            return None;
        }
        select_in(&self.root, rank)
    }
}

impl<K: Ord, V> RawFTree<K, V> {
    /// Returns a reference to the value corresponding to the key.
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut node = &self.root;
        loop {
            match node.search(key) {
                SearchResult::Found(index) => return Some(node.value(index)),
                SearchResult::NotFound(_) if node.is_leaf() => return None,
                SearchResult::NotFound(index) => node = node.child(index),
            }
        }
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut node = &mut self.root;
        loop {
            match node.search(key) {
                SearchResult::Found(index) => return Some(node.value_mut(index)),
                SearchResult::NotFound(_) if node.is_leaf() => return None,
                SearchResult::NotFound(index) => node = node.child_mut(index),
            }
        }
    }

    /// Inserts a key-value pair into the tree.
    /// Returns the old value if the key was already present.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.root.is_full(self.degree) {
            let old_root = mem::replace(&mut self.root, Node::new());
            self.root = Node::with_child(old_root);
            self.root.split_child(0, self.degree);
            debug!(height = self.root.height(), size = self.root.size(), "root split, tree grew a level");
        }
        insert_into(&mut self.root, key, value, self.degree)
    }

    /// Returns the number of keys strictly less than `key`.
    pub(crate) fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Some(max) = self.last_key() else {
            return 0;
        };
        let max: &Q = max.borrow();
        if key > max {
            self.len()
        } else {
            rank_in(&self.root, key)
        }
    }

    /// Returns the greatest key less than or equal to `key`.
    pub(crate) fn floor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        floor_in(&self.root, key)
    }

    /// Returns the smallest key greater than or equal to `key`.
    pub(crate) fn ceiling<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        ceiling_in(&self.root, key)
    }

    /// Collects the pairs with `min <= key <= max` in ascending key order.
    ///
    /// Walks the whole tree: subtrees outside the bounds are not pruned.
    pub(crate) fn entries_between<Q>(&self, min: &Q, max: &Q) -> Vec<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut entries = Vec::new();
        visit_in_order(&self.root, &mut |key, value| {
            let probe: &Q = key.borrow();
            if min <= probe && probe <= max {
                entries.push((key, value));
            }
        });
        entries
    }

    /// Returns the number of keys with `min <= key <= max`.
    pub(crate) fn len_between<Q>(&self, min: &Q, max: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if self.is_empty() || min > max {
            return 0;
        }
        let below_max = self.rank(max) - self.rank(min);
        below_max + usize::from(self.get(max).is_some())
    }
}

/// Inserts into the subtree rooted at `node`, which must not be full.
///
/// Full children are split before they are entered, so no node ever
/// overflows. Cached aggregates are restored on the way back up.
fn insert_into<K: Ord, V>(node: &mut Node<K, V>, key: K, value: V, degree: Degree) -> Option<V> {
    let mut index = match node.search(&key) {
        SearchResult::Found(index) => return Some(node.replace_value(index, value)),
        SearchResult::NotFound(index) => index,
    };

    if node.is_leaf() {
        node.insert_entry(index, key, value);
        return None;
    }

    if node.child(index).is_full(degree) {
        trace!(index, height = node.height(), "splitting full child");
        node.split_child(index, degree);
        match key.cmp(node.key(index)) {
            Ordering::Equal => return Some(node.replace_value(index, value)),
            Ordering::Greater => index += 1,
            Ordering::Less => {}
        }
    }

    let old_value = insert_into(node.child_mut(index), key, value, degree);
    node.restore_aggregates();
    old_value
}

/// Calls `visit` on every pair below `node` in ascending key order.
fn visit_in_order<'a, K, V, F>(node: &'a Node<K, V>, visit: &mut F)
where
    F: FnMut(&'a K, &'a V),
{
    let children = node.children();
    for (index, (key, value)) in node.keys().iter().zip(node.values()).enumerate() {
        if let Some(child) = children.get(index) {
            visit_in_order(child, visit);
        }
        visit(key, value);
    }
    if let Some(last) = children.get(node.key_count()) {
        visit_in_order(last, visit);
    }
}

fn rank_in<K, V, Q>(node: &Node<K, V>, key: &Q) -> usize
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
{
    let index = node.search(key).index();
    let children = node.children();
    // Keys `0..index` and the subtrees left of them are all below `key`.
    let mut rank = index + children.iter().take(index).map(Node::size).sum::<usize>();
    if let Some(child) = children.get(index) {
        rank += rank_in(child, key);
    }
    rank
}

fn select_in<K, V>(node: &Node<K, V>, rank: usize) -> Option<(&K, &V)> {
    if node.is_leaf() {
        return node.entry(rank);
    }

    // Keys known to precede the key under examination.
    let mut count = 0;
    for (index, left) in node.children().iter().take(node.key_count()).enumerate() {
        let boundary = count + left.size();
        match rank.cmp(&boundary) {
            Ordering::Less => return select_in(left, rank - count),
            Ordering::Equal => return node.entry(index),
            Ordering::Greater => count = boundary + 1,
        }
    }
    node.children().last().and_then(|last| select_in(last, rank - count))
}

fn floor_in<'a, K, V, Q>(node: &'a Node<K, V>, key: &Q) -> Option<&'a K>
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
{
    match node.search(key) {
        SearchResult::Found(index) => Some(node.key(index)),
        SearchResult::NotFound(0) => node.children().first().and_then(|first| floor_in(first, key)),
        SearchResult::NotFound(index) if node.is_leaf() => Some(node.key(index - 1)),
        SearchResult::NotFound(index) => floor_in(node.child(index), key).or_else(|| Some(node.key(index - 1))),
    }
}

fn ceiling_in<'a, K, V, Q>(node: &'a Node<K, V>, key: &Q) -> Option<&'a K>
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
{
    match node.search(key) {
        SearchResult::Found(index) => Some(node.key(index)),
        SearchResult::NotFound(index) if node.is_leaf() => node.keys().get(index),
        SearchResult::NotFound(index) if index == node.key_count() => ceiling_in(node.child(index), key),
        SearchResult::NotFound(index) => ceiling_in(node.child(index), key).or_else(|| Some(node.key(index))),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::uninlined_format_args)]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use proptest::prelude::*;

    /// Subtree summary returned by the validator: `(size, height, min, max)`.
    type Summary<'a, K> = (usize, usize, Option<&'a K>, Option<&'a K>);

    impl<K: Ord + core::fmt::Debug, V> RawFTree<K, V> {
        /// Validates every structural invariant. Panics with a descriptive
        /// message if any are violated.
        pub(crate) fn validate_invariants(&self) {
            let mut errors: Vec<String> = Vec::new();
            let (size, height, _, _) = self.validate_node(&self.root, true, &mut errors);
            if size != self.len() {
                errors.push(alloc::format!("len mismatch: len={}, counted={}", self.len(), size));
            }
            if height != self.height() {
                errors.push(alloc::format!("height mismatch: height={}, measured={}", self.height(), height));
            }
            assert!(errors.is_empty(), "Tree invariant violations:\n{}", errors.join("\n"));
        }

        fn validate_node<'a>(&self, node: &'a Node<K, V>, is_root: bool, errors: &mut Vec<String>) -> Summary<'a, K> {
            let keys = node.keys();

            if keys.len() != node.values().len() {
                errors.push(alloc::format!("keys/values length mismatch at {:?}", keys));
            }
            if keys.len() > self.degree.max_keys() {
                errors.push(alloc::format!("overfull node {:?} (max {})", keys, self.degree.max_keys()));
            }
            if !is_root && keys.len() < self.degree.split_index() {
                errors.push(alloc::format!("underfull non-root node {:?}", keys));
            }
            for pair in keys.windows(2) {
                if pair[0] >= pair[1] {
                    errors.push(alloc::format!("keys not strictly increasing: {:?}", keys));
                }
            }

            if node.is_leaf() {
                if node.size() != keys.len() {
                    errors.push(alloc::format!("leaf {:?} caches size {}", keys, node.size()));
                }
                if node.height() != 0 {
                    errors.push(alloc::format!("leaf {:?} caches height {}", keys, node.height()));
                }
                return (keys.len(), 0, keys.first(), keys.last());
            }

            let children = node.children();
            if children.len() != keys.len() + 1 {
                errors.push(alloc::format!("node {:?} has {} children", keys, children.len()));
            }

            let mut size = keys.len();
            let mut child_height = None;
            let mut first = None;
            let mut last = None;
            for (index, child) in children.iter().enumerate() {
                let (child_size, height, child_min, child_max) = self.validate_node(child, false, errors);
                size += child_size;

                match child_height {
                    None => child_height = Some(height),
                    Some(expected) if expected != height => {
                        errors.push(alloc::format!("children of {:?} have heights {} and {}", keys, expected, height));
                    }
                    Some(_) => {}
                }

                // Child `index` lies strictly between `keys[index - 1]` and `keys[index]`.
                if let (Some(lower), Some(child_min)) = (index.checked_sub(1).map(|i| &keys[i]), child_min)
                    && child_min <= lower
                {
                    errors.push(alloc::format!("child {} of {:?} holds {:?}", index, keys, child_min));
                }
                if let (Some(upper), Some(child_max)) = (keys.get(index), child_max)
                    && child_max >= upper
                {
                    errors.push(alloc::format!("child {} of {:?} holds {:?}", index, keys, child_max));
                }

                if index == 0 {
                    first = child_min;
                }
                last = child_max;
            }

            let height = child_height.map_or(0, |h| h + 1);
            if node.size() != size {
                errors.push(alloc::format!("node {:?} caches size {}, counted {}", keys, node.size(), size));
            }
            if node.height() != height {
                errors.push(alloc::format!("node {:?} caches height {}, measured {}", keys, node.height(), height));
            }
            (size, height, first, last)
        }
    }

    fn tree(g: usize) -> RawFTree<i32, i32> {
        RawFTree::new(Degree::new(g).unwrap())
    }

    #[test]
    fn empty_tree() {
        let tree = tree(3);
        tree.validate_invariants();
        assert_eq!(tree.get(&5), None);
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.first_key(), None);
        assert_eq!(tree.last_key(), None);
        assert_eq!(tree.rank(&5), 0);
        assert_eq!(tree.select(0), None);
        assert_eq!(tree.floor(&5), None);
        assert_eq!(tree.ceiling(&5), None);
        assert_eq!(tree.len_between(&0, &10), 0);
        assert!(tree.entries().is_empty());
    }

    #[test]
    fn ascending_inserts_degree_three() {
        let mut tree = tree(3);
        for key in 1..=12 {
            assert_eq!(tree.insert(key, key * 2), None);
            tree.validate_invariants();

            assert_eq!(tree.len(), key as usize);
            assert_eq!(tree.first_key(), Some(&1));
            assert_eq!(tree.last_key(), Some(&key));
            assert_eq!(tree.rank(&7), (key as usize).min(6));
        }
        // Root [3, 6, 9] over four leaves.
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.root().keys(), &[3, 6, 9]);
    }

    #[test]
    fn root_grows_on_the_insert_after_it_fills() {
        let mut tree = tree(2);
        for key in [10, 20, 30] {
            tree.insert(key, key);
        }
        assert_eq!(tree.height(), 0);
        assert!(tree.root().is_full(tree.degree()));

        tree.insert(40, 40);
        tree.validate_invariants();
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.root().keys(), &[20]);
    }

    #[test]
    fn overwriting_the_promoted_key_keeps_sizes() {
        // The root is full, so `insert(20, _)` first splits it and then finds
        // 20 in the new root.
        let mut tree = tree(2);
        for key in [10, 20, 30] {
            tree.insert(key, key);
        }
        assert_eq!(tree.insert(20, 200), Some(20));
        tree.validate_invariants();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.get(&20), Some(&200));
    }

    #[test]
    fn overwriting_a_key_promoted_from_a_full_child() {
        let mut tree = tree(2);
        for key in 1..=5 {
            tree.insert(key, key);
        }
        // Root [2], children [1] and [3, 4, 5]; the right child is full.
        assert_eq!(tree.root().keys(), &[2]);
        assert_eq!(tree.insert(4, 40), Some(4));
        tree.validate_invariants();
        assert_eq!(tree.root().keys(), &[2, 4]);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut tree = tree(2);
        for key in 0..50 {
            tree.insert(key, key);
        }
        *tree.get_mut(&33).unwrap() = -1;
        assert_eq!(tree.get(&33), Some(&-1));
        assert_eq!(tree.get_mut(&50), None);
    }

    #[test]
    fn floor_and_ceiling_between_keys() {
        let mut tree = tree(2);
        for key in (0..100).step_by(10) {
            tree.insert(key, key);
        }
        assert_eq!(tree.floor(&-1), None);
        assert_eq!(tree.floor(&0), Some(&0));
        assert_eq!(tree.floor(&45), Some(&40));
        assert_eq!(tree.floor(&1_000), Some(&90));
        assert_eq!(tree.ceiling(&-1), Some(&0));
        assert_eq!(tree.ceiling(&45), Some(&50));
        assert_eq!(tree.ceiling(&90), Some(&90));
        assert_eq!(tree.ceiling(&91), None);
    }

    #[test]
    fn string_keys_borrow_as_str() {
        let mut tree: RawFTree<String, usize> = RawFTree::new(Degree::DEFAULT);
        for (i, word) in ["pear", "apple", "fig", "kiwi", "banana", "cherry", "date"].iter().enumerate() {
            tree.insert(String::from(*word), i);
        }
        assert_eq!(tree.get("fig"), Some(&2));
        assert_eq!(tree.rank("cherry"), 2);
        assert_eq!(tree.floor("grape").map(String::as_str), Some("fig"));
        assert_eq!(tree.ceiling("grape").map(String::as_str), Some("kiwi"));
        assert_eq!(tree.len_between("b", "e"), 3);
    }

    #[test]
    fn entries_between_visits_everything_but_keeps_bounds() {
        let mut tree = tree(3);
        for key in (0..200).rev() {
            tree.insert(key, -key);
        }
        let between: Vec<i32> = tree.entries_between(&50, &59).into_iter().map(|(k, _)| *k).collect();
        assert_eq!(between, (50..=59).collect::<Vec<_>>());
        assert!(tree.entries_between(&59, &50).is_empty());
        assert_eq!(tree.len_between(&50, &59), 10);
        assert_eq!(tree.len_between(&59, &50), 0);
        assert_eq!(tree.len_between(&-10, &-1), 0);
        assert_eq!(tree.len_between(&195, &1_000), 5);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn tree_invariants_maintained_after_operations(
            g in 2usize..7,
            ops in prop::collection::vec((0i32..1000, any::<i32>()), 0..500),
        ) {
            let mut tree = tree(g);
            let mut model = BTreeMap::new();

            for (key, value) in ops {
                prop_assert_eq!(tree.insert(key, value), model.insert(key, value));
                tree.validate_invariants();
            }

            prop_assert_eq!(tree.len(), model.len());
            prop_assert_eq!(tree.entries(), model.iter().collect::<Vec<_>>());
        }

        #[test]
        fn height_stays_logarithmic(g in 2usize..7, keys in prop::collection::vec(any::<i32>(), 0..2_000)) {
            let mut tree = tree(g);
            for key in keys {
                tree.insert(key, key);
            }
            // g^height <= n + 1
            let bound = g.checked_pow(tree.height() as u32).unwrap();
            prop_assert!(bound <= tree.len() + 1, "height {} too tall for {} keys", tree.height(), tree.len());
        }

        #[test]
        fn select_general_branch_matches_leaf_shortcut(
            g in 2usize..7,
            keys in prop::collection::btree_set(0i32..500, 1..300),
        ) {
            let mut tree = tree(g);
            for &key in &keys {
                tree.insert(key, key * 2);
            }
            for (rank, expected) in keys.iter().enumerate() {
                prop_assert_eq!(tree.select(rank), Some((expected, &(expected * 2))));
                prop_assert_eq!(tree.rank(expected), rank);
            }
            prop_assert_eq!(tree.select(keys.len()), None);
        }

        #[test]
        fn rank_counts_smaller_keys(
            g in 2usize..7,
            keys in prop::collection::btree_set(0i32..500, 0..300),
            probes in prop::collection::vec(-10i32..510, 1..50),
        ) {
            let mut tree = tree(g);
            for &key in &keys {
                tree.insert(key, key);
            }
            for probe in probes {
                let expected = keys.range(..probe).count();
                prop_assert_eq!(tree.rank(&probe), expected, "rank({})", probe);
            }
        }

        #[test]
        fn floor_and_ceiling_match_btreeset(
            g in 2usize..7,
            keys in prop::collection::btree_set(0i32..500, 0..300),
            probes in prop::collection::vec(-10i32..510, 1..50),
        ) {
            let mut tree = tree(g);
            for &key in &keys {
                tree.insert(key, key);
            }
            for probe in probes {
                prop_assert_eq!(tree.floor(&probe), keys.range(..=probe).next_back(), "floor({})", probe);
                prop_assert_eq!(tree.ceiling(&probe), keys.range(probe..).next(), "ceiling({})", probe);
            }
        }
    }

    #[test]
    #[should_panic(expected = "Tree invariant violations")]
    fn validator_catches_stale_size() {
        let mut tree = tree(2);
        for key in 0..10 {
            tree.insert(key, key);
        }
        // Grow the leftmost leaf without refreshing its ancestors.
        let mut node = &mut tree.root;
        while !node.is_leaf() {
            node = node.child_mut(0);
        }
        node.insert_entry(0, -1, -1);
        tree.validate_invariants();
    }
}
