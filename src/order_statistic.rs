/// A zero-based position in the ascending key order of an [`FTree`](crate::FTree).
///
/// Indexing a tree by `Rank(n)` yields the value whose key has exactly `n`
/// smaller keys, the same entry [`FTree::select`](crate::FTree::select) finds.
///
/// # Examples
///
/// ```
/// use ftree::{FTree, Rank};
///
/// let mut tree = FTree::default();
/// tree.put("b", 20);
/// tree.put("a", 10);
///
/// assert_eq!(tree[Rank(0)], 10);
/// assert_eq!(tree[Rank(1)], 20);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
