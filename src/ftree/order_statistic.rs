use core::borrow::Borrow;
use core::ops::Index;

use super::FTree;
use crate::Rank;

impl<K: Ord, V> FTree<K, V> {
    /// Returns the number of keys strictly less than `key`.
    ///
    /// `key` does not have to be present. For a present key this is its
    /// zero-based position in ascending order.
    ///
    /// # Complexity
    ///
    /// O(g log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ftree::FTree;
    ///
    /// let tree = FTree::from([(10, ()), (20, ()), (30, ())]);
    ///
    /// assert_eq!(tree.rank(&10), 0);
    /// assert_eq!(tree.rank(&25), 2);
    /// assert_eq!(tree.rank(&99), 3);
    /// ```
    #[must_use]
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank(key)
    }

    /// Returns the greatest key less than or equal to `key`, or `None` if
    /// every key is greater.
    ///
    /// # Examples
    ///
    /// ```
    /// use ftree::FTree;
    ///
    /// let tree = FTree::from([(10, ()), (20, ())]);
    ///
    /// assert_eq!(tree.floor(&15), Some(&10));
    /// assert_eq!(tree.floor(&20), Some(&20));
    /// assert_eq!(tree.floor(&5), None);
    /// ```
    #[must_use]
    pub fn floor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.floor(key)
    }

    /// Returns the smallest key greater than or equal to `key`, or `None` if
    /// every key is smaller.
    ///
    /// # Examples
    ///
    /// ```
    /// use ftree::FTree;
    ///
    /// let tree = FTree::from([(10, ()), (20, ())]);
    ///
    /// assert_eq!(tree.ceiling(&15), Some(&20));
    /// assert_eq!(tree.ceiling(&10), Some(&10));
    /// assert_eq!(tree.ceiling(&25), None);
    /// ```
    #[must_use]
    pub fn ceiling<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.ceiling(key)
    }
}

impl<K, V> FTree<K, V> {
    /// Returns the key with exactly `rank` smaller keys, or `None` if
    /// `rank >= self.size()`.
    ///
    /// This is the inverse of [`rank`](FTree::rank).
    ///
    /// # Complexity
    ///
    /// O(g log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ftree::FTree;
    ///
    /// let tree = FTree::from([("c", 3), ("a", 1), ("b", 2)]);
    ///
    /// assert_eq!(tree.select(0), Some(&"a"));
    /// assert_eq!(tree.select(2), Some(&"c"));
    /// assert_eq!(tree.select(3), None);
    /// ```
    #[must_use]
    pub fn select(&self, rank: usize) -> Option<&K> {
        self.raw.select(rank).map(|(key, _)| key)
    }

    /// Returns the key-value pair at position `rank` in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ftree::FTree;
    ///
    /// let tree = FTree::from([("c", 3), ("a", 1), ("b", 2)]);
    /// assert_eq!(tree.select_entry(1), Some((&"b", &2)));
    /// ```
    #[must_use]
    pub fn select_entry(&self, rank: usize) -> Option<(&K, &V)> {
        self.raw.select(rank)
    }
}

/// Indexes into the tree by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use ftree::{FTree, Rank};
///
/// let tree = FTree::from([("a", 1), ("b", 2)]);
/// assert_eq!(tree[Rank(1)], 2);
/// ```
impl<K, V> Index<Rank> for FTree<K, V> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.select_entry(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}
