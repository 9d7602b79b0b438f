use alloc::collections::VecDeque;
use core::fmt::{self, Write};

use super::FTree;
use crate::raw::Node;

/// Breadth-first rendering of a tree's nodes, one line per depth.
///
/// Each node is written as its keys in brackets, `[k1,k2,...]`, with the nodes
/// of one level concatenated left to right. Returned by [`FTree::levels`].
///
/// # Examples
///
/// ```
/// use ftree::FTree;
///
/// let tree: FTree<i32, ()> = (1..=6).map(|k| (k, ())).collect();
/// assert_eq!(tree.levels().to_string(), "[3]\n[1,2][4,5,6]");
/// ```
pub struct Levels<'a, K, V> {
    root: &'a Node<K, V>,
}

impl<K: fmt::Display, V> fmt::Display for Levels<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut queue = VecDeque::from([self.root]);
        let mut level = self.root.height();

        while let Some(node) = queue.pop_front() {
            // Siblings share a height, so a change in height starts a new level.
            if node.height() != level {
                f.write_char('\n')?;
                level = node.height();
            }

            f.write_char('[')?;
            for (index, key) in node.keys().iter().enumerate() {
                if index > 0 {
                    f.write_char(',')?;
                }
                write!(f, "{key}")?;
            }
            f.write_char(']')?;

            queue.extend(node.children());
        }
        Ok(())
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Levels<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Levels")
            .field("height", &self.root.height())
            .field("root", &self.root.keys())
            .finish_non_exhaustive()
    }
}

impl<K, V> FTree<K, V> {
    /// Returns a breadth-first, level-per-line rendering of the tree's nodes.
    ///
    /// This is a diagnostic view of the tree's shape; nothing else depends on
    /// it.
    #[must_use]
    pub fn levels(&self) -> Levels<'_, K, V> {
        Levels { root: self.raw.root() }
    }

    /// Prints [`levels`](FTree::levels) to standard output.
    ///
    /// # Examples
    ///
    /// ```
    /// use ftree::FTree;
    ///
    /// let tree = FTree::from([(1, "a"), (2, "b")]);
    /// tree.print_tree(); // prints "[1,2]"
    /// ```
    #[cfg(feature = "std")]
    pub fn print_tree(&self)
    where
        K: fmt::Display,
    {
        std::println!("{}", self.levels());
    }
}
