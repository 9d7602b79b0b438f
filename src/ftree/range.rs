use alloc::vec::Vec;
use core::borrow::Borrow;

use super::FTree;

impl<K: Ord, V> FTree<K, V> {
    /// Returns the number of keys in `min..=max`.
    ///
    /// Returns 0 if `min > max`.
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
    /// let tree: FTree<i32, ()> = (0..10).map(|k| (k * 10, ())).collect();
    ///
    /// assert_eq!(tree.size_between(&15, &40), 3);
    /// assert_eq!(tree.size_between(&40, &15), 0);
    /// ```
    #[must_use]
    pub fn size_between<Q>(&self, min: &Q, max: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.len_between(min, max)
    }

    /// Returns a snapshot of the keys in `min..=max`, in ascending order.
    ///
    /// The snapshot is filtered from a walk over the whole tree, so the cost
    /// does not shrink with the width of the range.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ftree::FTree;
    ///
    /// let tree = FTree::from([(1, 'a'), (5, 'e'), (9, 'i')]);
    /// assert_eq!(tree.keys_between(&2, &9), [&5, &9]);
    /// ```
    #[must_use]
    pub fn keys_between<Q>(&self, min: &Q, max: &Q) -> Vec<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.entries_between(min, max).into_iter().map(|(key, _)| key).collect()
    }

    /// Returns a snapshot of the values whose keys are in `min..=max`, in
    /// ascending key order.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ftree::FTree;
    ///
    /// let tree = FTree::from([(1, 'a'), (5, 'e'), (9, 'i')]);
    /// assert_eq!(tree.values_between(&0, &5), [&'a', &'e']);
    /// ```
    #[must_use]
    pub fn values_between<Q>(&self, min: &Q, max: &Q) -> Vec<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.entries_between(min, max).into_iter().map(|(_, value)| value).collect()
    }

    /// Returns a snapshot of the key-value pairs whose keys are in
    /// `min..=max`, in ascending key order.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn entries_between<Q>(&self, min: &Q, max: &Q) -> Vec<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.entries_between(min, max)
    }
}
