use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::ops::Index;

use crate::raw::RawFTree;
use crate::{Degree, InvalidDegree};

mod levels;
mod order_statistic;
mod range;

pub use crate::Rank;
pub use levels::Levels;

/// An ordered map built on a multiway search tree of configurable [`Degree`].
///
/// With degree `g`, every node holds at most `2g - 1` keys and an internal node
/// has exactly one more child than it has keys. Full nodes are split on the way
/// down during [`put`](FTree::put), so the tree never needs a rebalancing pass
/// afterwards and every leaf sits at the same depth.
///
/// Each node caches the number of keys in its subtree, which makes
/// [`size`](FTree::size) O(1) and [`rank`](FTree::rank)/[`select`](FTree::select)
/// O(g log n).
///
/// Keys must have a [total order]. It is a logic error for a key to be modified
/// in such a way that its ordering relative to any other key changes while it
/// is in the tree.
///
/// There is no deletion: once inserted, a key stays until the tree is dropped.
///
/// [total order]: core::cmp::Ord
///
/// # Examples
///
/// ```
/// use ftree::FTree;
///
/// let mut tree = FTree::new(3);
/// tree.put(10, "a");
/// tree.put(5, "b");
/// tree.put(20, "c");
/// tree.put(5, "d");
///
/// assert_eq!(tree.size(), 3);
/// assert_eq!(tree.get(&5), Some(&"d"));
/// assert_eq!(tree.keys(), [&5, &10, &20]);
///
/// // Order statistics.
/// assert_eq!(tree.rank(&10), 1);
/// assert_eq!(tree.select(2), Some(&20));
/// assert_eq!(tree.floor(&7), Some(&5));
/// assert_eq!(tree.ceiling(&7), Some(&10));
/// ```
pub struct FTree<K, V> {
    raw: RawFTree<K, V>,
}

impl<K, V> FTree<K, V> {
    /// Makes a new, empty `FTree` of degree `degree`.
    ///
    /// # Panics
    ///
    /// Panics if `degree < 2`. Use [`FTree::try_new`] to handle that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use ftree::FTree;
    ///
    /// let mut tree = FTree::new(2);
    /// tree.put(1, "a");
    /// assert_eq!(tree.degree().max_keys(), 3);
    /// ```
    #[must_use]
    pub fn new(degree: usize) -> Self {
        match Self::try_new(degree) {
            Ok(tree) => tree,
            Err(err) => panic!("`FTree::new()` - {err}"),
        }
    }

    /// Makes a new, empty `FTree`, rejecting an invalid degree.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDegree`] if `degree < 2`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ftree::{FTree, InvalidDegree};
    ///
    /// assert!(FTree::<i32, i32>::try_new(4).is_ok());
    /// assert_eq!(FTree::<i32, i32>::try_new(1).err(), Some(InvalidDegree(1)));
    /// ```
    pub fn try_new(degree: usize) -> Result<Self, InvalidDegree> {
        Ok(Self::with_degree(Degree::new(degree)?))
    }

    /// Makes a new, empty `FTree` from an already validated degree.
    #[must_use]
    pub fn with_degree(degree: Degree) -> Self {
        FTree {
            raw: RawFTree::new(degree),
        }
    }

    /// Returns the degree this tree was built with.
    #[must_use]
    pub fn degree(&self) -> Degree {
        self.raw.degree()
    }

    /// Returns the number of keys in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn size(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of edges between the root and any leaf; 0 for an
    /// empty tree or a tree whose root is a leaf.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use ftree::FTree;
    ///
    /// let mut tree = FTree::new(2);
    /// for key in 0..3 {
    ///     tree.put(key, ());
    /// }
    /// assert_eq!(tree.height(), 0);
    ///
    /// // The root is full, so this insert splits it.
    /// tree.put(3, ());
    /// assert_eq!(tree.height(), 1);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Returns the smallest key, or `None` if the tree is empty.
    ///
    /// # Complexity
    ///
    /// O(height)
    #[must_use]
    pub fn min(&self) -> Option<&K> {
        self.raw.first_key()
    }

    /// Returns the largest key, or `None` if the tree is empty.
    ///
    /// # Complexity
    ///
    /// O(height)
    #[must_use]
    pub fn max(&self) -> Option<&K> {
        self.raw.last_key()
    }

    /// Returns a snapshot of every key in ascending order.
    ///
    /// The whole sequence is collected before returning.
    ///
    /// # Examples
    ///
    /// ```
    /// use ftree::FTree;
    ///
    /// let tree = FTree::from([(3, 'c'), (1, 'a'), (2, 'b')]);
    /// assert_eq!(tree.keys(), [&1, &2, &3]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn keys(&self) -> Vec<&K> {
        self.raw.keys()
    }

    /// Returns a snapshot of every value, in ascending order of their keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use ftree::FTree;
    ///
    /// let tree = FTree::from([(3, 'c'), (1, 'a'), (2, 'b')]);
    /// assert_eq!(tree.values(), [&'a', &'b', &'c']);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn values(&self) -> Vec<&V> {
        self.raw.values()
    }

    /// Returns a snapshot of every key-value pair in ascending key order.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn entries(&self) -> Vec<(&K, &V)> {
        self.raw.entries()
    }
}

impl<K: Ord, V> FTree<K, V> {
    /// Inserts a key-value pair into the tree.
    ///
    /// If the tree did not have this key present, `None` is returned. If it
    /// did, the value is overwritten and the old value is returned; the tree's
    /// shape is unchanged in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use ftree::FTree;
    ///
    /// let mut tree = FTree::default();
    /// assert_eq!(tree.put(37, "a"), None);
    /// assert_eq!(tree.put(37, "b"), Some("a"));
    /// assert_eq!(tree[&37], "b");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(g log n)
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the tree's key type, but the
    /// ordering on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use ftree::FTree;
    ///
    /// let mut tree = FTree::default();
    /// tree.put(1, "a");
    /// assert_eq!(tree.get(&1), Some(&"a"));
    /// assert_eq!(tree.get(&2), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ftree::FTree;
    ///
    /// let mut tree = FTree::default();
    /// tree.put(1, "a");
    /// if let Some(x) = tree.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(tree[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Returns `true` if the tree contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ftree::FTree;
    ///
    /// let mut tree = FTree::default();
    /// tree.put(1, "a");
    /// assert!(tree.contains(&1));
    /// assert!(!tree.contains(&2));
    /// ```
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key).is_some()
    }
}

impl<K: Clone, V: Clone> Clone for FTree<K, V> {
    fn clone(&self) -> Self {
        FTree { raw: self.raw.clone() }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for FTree<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.entries() == other.entries()
    }
}

impl<K: Eq, V: Eq> Eq for FTree<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for FTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

impl<K, V> Default for FTree<K, V> {
    /// Creates an empty tree of [`Degree::DEFAULT`].
    fn default() -> Self {
        FTree::with_degree(Degree::DEFAULT)
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for FTree<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut tree = FTree::default();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for FTree<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K, Q, V> Index<&Q> for FTree<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the tree.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for FTree<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(FTree<i32, i32>: Send, Sync, Clone, Default);
    assert_impl_all!(InvalidDegree: core::error::Error, Send, Sync);

    #[test]
    #[should_panic(expected = "`FTree::new()` - tree degree must be at least 2, got 1")]
    fn new_rejects_degree_one() {
        let _: FTree<i32, i32> = FTree::new(1);
    }

    #[test]
    fn overwrite_keeps_size() {
        let mut tree = FTree::new(3);
        for (key, value) in [(10, "a"), (5, "b"), (20, "c"), (5, "d")] {
            tree.put(key, value);
        }
        assert_eq!(tree.size(), 3);
        assert_eq!(tree.get(&5), Some(&"d"));
    }

    #[test]
    fn equality_ignores_degree() {
        let mut narrow = FTree::new(2);
        let mut wide = FTree::new(8);
        for key in 0..100 {
            narrow.put(key, key);
            wide.put(99 - key, 99 - key);
        }
        assert_ne!(narrow.height(), wide.height());
        assert_eq!(narrow, wide);
    }
}
