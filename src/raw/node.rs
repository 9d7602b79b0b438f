use alloc::vec::Vec;
use core::borrow::Borrow;
use core::mem;

use smallvec::SmallVec;

use crate::Degree;

/// Key/value slots stored inline before a node spills to the heap. Sized so
/// that trees of the default degree never allocate for keys or values.
pub(crate) const INLINE_KEYS: usize = Degree::DEFAULT.max_keys();

#[derive(Clone)]
pub(crate) struct Node<K, V> {
    keys: SmallVec<[K; INLINE_KEYS]>,
    // Parallel to `keys`.
    values: SmallVec<[V; INLINE_KEYS]>,
    // Empty for a leaf, otherwise exactly `keys.len() + 1` children.
    children: Vec<Node<K, V>>,
    // Number of keys in the subtree rooted here, including this node's own.
    size: usize,
    // Edges from this node down to any leaf. Every child has the same height.
    height: usize,
}

/// Result of searching for a key in a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SearchResult {
    /// Key was found at the given index.
    Found(usize),
    /// Key was not found; index is where it would be inserted, which is also
    /// the child whose subtree would contain it.
    NotFound(usize),
}

impl SearchResult {
    /// Returns the index regardless of whether the key was found.
    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            SearchResult::Found(index) | SearchResult::NotFound(index) => index,
        }
    }
}

impl<K, V> Node<K, V> {
    /// Creates a new empty leaf node.
    pub(crate) fn new() -> Self {
        Self {
            keys: SmallVec::new(),
            values: SmallVec::new(),
            children: Vec::new(),
            size: 0,
            height: 0,
        }
    }

    /// Creates a key-less internal node whose only child is `child`.
    ///
    /// This is the transient shape of a new root right before its child is
    /// split; the cached aggregates already describe the finished subtree.
    pub(crate) fn with_child(child: Node<K, V>) -> Self {
        let mut node = Self::new();
        node.size = child.size;
        node.height = child.height + 1;
        node.children.push(child);
        node
    }

    /// Returns true if this is a leaf node.
    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns true if this node holds `2g - 1` keys and must be split before
    /// anything is inserted below it.
    #[inline]
    pub(crate) fn is_full(&self, degree: Degree) -> bool {
        self.keys.len() == degree.max_keys()
    }

    /// Returns the number of keys in this node.
    #[inline]
    pub(crate) fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Returns the number of keys in the subtree rooted at this node.
    #[inline]
    pub(crate) fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of edges from this node to a leaf.
    #[inline]
    pub(crate) fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub(crate) fn key(&self, index: usize) -> &K {
        &self.keys[index]
    }

    pub(crate) fn keys(&self) -> &[K] {
        &self.keys
    }

    pub(crate) fn values(&self) -> &[V] {
        &self.values
    }

    #[inline]
    pub(crate) fn value(&self, index: usize) -> &V {
        &self.values[index]
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, index: usize) -> &mut V {
        &mut self.values[index]
    }

    /// Returns the key/value pair at `index`, if this node has one there.
    pub(crate) fn entry(&self, index: usize) -> Option<(&K, &V)> {
        Some((self.keys.get(index)?, self.values.get(index)?))
    }

    #[inline]
    pub(crate) fn child(&self, index: usize) -> &Node<K, V> {
        &self.children[index]
    }

    #[inline]
    pub(crate) fn child_mut(&mut self, index: usize) -> &mut Node<K, V> {
        &mut self.children[index]
    }

    pub(crate) fn children(&self) -> &[Node<K, V>] {
        &self.children
    }

    /// Inserts a key and value into a leaf at the given position.
    pub(crate) fn insert_entry(&mut self, index: usize, key: K, value: V) {
        debug_assert!(self.is_leaf(), "insert_entry: entries are only inserted into leaves");
        self.keys.insert(index, key);
        self.values.insert(index, value);
        self.size += 1;
    }

    /// Overwrites the value at `index`, returning the previous one.
    pub(crate) fn replace_value(&mut self, index: usize, value: V) -> V {
        mem::replace(&mut self.values[index], value)
    }

    /// Recomputes `size` from this node's keys and its children's sizes.
    pub(crate) fn restore_size(&mut self) {
        self.size = self.keys.len() + self.children.iter().map(Node::size).sum::<usize>();
    }

    /// Recomputes `height` from the first child; all children share it.
    pub(crate) fn restore_height(&mut self) {
        self.height = self.children.first().map_or(0, |child| child.height + 1);
    }

    /// Restores both cached aggregates after a child's subtree changed shape.
    /// Children must already be consistent.
    pub(crate) fn restore_aggregates(&mut self) {
        self.restore_size();
        self.restore_height();
    }

    /// Splits the full child at `index` in two.
    ///
    /// The child's median (position `g - 1`) moves up into this node at
    /// `index`, and a new right sibling holding the child's upper `g - 1` keys
    /// (and upper `g` children, if internal) is inserted at `index + 1`.
    pub(crate) fn split_child(&mut self, index: usize, degree: Degree) {
        let split_index = degree.split_index();

        let child = &mut self.children[index];
        debug_assert!(child.is_full(degree), "split_child: child {index} is not full");
        let old_size = child.size;

        let mut sibling = Node::new();
        sibling.keys = child.keys.drain(split_index + 1..).collect();
        sibling.values = child.values.drain(split_index + 1..).collect();
        if !child.is_leaf() {
            sibling.children = child.children.drain(split_index + 1..).collect();
        }
        let median_key = child.keys.remove(split_index);
        let median_value = child.values.remove(split_index);

        if child.is_leaf() {
            child.size = split_index;
            sibling.size = split_index;
        } else {
            child.restore_size();
            // The promoted median is counted in neither half.
            sibling.size = old_size - child.size - 1;
        }
        sibling.height = child.height;

        // Keys only move within this subtree, so `self.size` is unchanged.
        self.keys.insert(index, median_key);
        self.values.insert(index, median_value);
        self.children.insert(index + 1, sibling);
    }

    /// Binary-searches this node's keys.
    ///
    /// The returned index is always in `0..=key_count()`, and is the exact
    /// position of `key` whenever it is present.
    #[inline]
    pub(crate) fn search<Q>(&self, key: &Q) -> SearchResult
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self.keys.binary_search_by(|k| k.borrow().cmp(key)) {
            Ok(index) => SearchResult::Found(index),
            Err(index) => SearchResult::NotFound(index),
        }
    }
}
