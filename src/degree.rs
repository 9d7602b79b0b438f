use core::fmt;
use core::num::NonZero;

use crate::InvalidDegree;

/// The branching parameter `g` of an [`FTree`](crate::FTree).
///
/// A node holds at most `2g - 1` keys and `2g` children. A full node is split
/// around the key at position `g - 1`, leaving `g - 1` keys on each side.
///
/// # Examples
///
/// ```
/// use ftree::Degree;
///
/// let degree = Degree::new(4).unwrap();
/// assert_eq!(degree.max_keys(), 7);
/// assert_eq!(degree.max_children(), 8);
/// assert_eq!(degree.split_index(), 3);
///
/// assert!(Degree::new(1).is_err());
/// assert_eq!(Degree::default(), Degree::DEFAULT);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Degree(NonZero<usize>);

impl Degree {
    /// The smallest degree for which splitting is well defined.
    pub const MIN: usize = 2;
    /// The degree used by [`FTree::default`](crate::FTree::default).
    pub const DEFAULT: Self = Self::from_usize(3);

    /// Validates `degree`, rejecting anything below [`Degree::MIN`].
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDegree`] if `degree < 2`.
    pub const fn new(degree: usize) -> Result<Self, InvalidDegree> {
        if degree < Self::MIN {
            return Err(InvalidDegree(degree));
        }
        Ok(Self::from_usize(degree))
    }

    #[inline]
    const fn from_usize(degree: usize) -> Self {
        assert!(degree >= Self::MIN, "`Degree::from_usize()` - `degree` < `Degree::MIN`!");
        let Some(degree) = NonZero::new(degree) else {
            unreachable!()
        };
        Self(degree)
    }

    /// Returns the raw degree `g`.
    #[inline]
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }

    /// Returns `2g - 1`, the most keys a node may hold.
    #[inline]
    #[must_use]
    pub const fn max_keys(self) -> usize {
        2 * self.get() - 1
    }

    /// Returns `2g`, the most children an internal node may hold.
    #[inline]
    #[must_use]
    pub const fn max_children(self) -> usize {
        2 * self.get()
    }

    /// Returns `g - 1`, the position of the key promoted by a split.
    #[inline]
    #[must_use]
    pub const fn split_index(self) -> usize {
        self.get() - 1
    }
}

impl Default for Degree {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for Degree {
    type Error = InvalidDegree;

    fn try_from(degree: usize) -> Result<Self, Self::Error> {
        Self::new(degree)
    }
}

impl From<Degree> for usize {
    fn from(degree: Degree) -> Self {
        degree.get()
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
