use thiserror::Error;

/// Error returned when a tree is configured with a degree below
/// [`Degree::MIN`](crate::Degree::MIN).
///
/// A degree of `g` lets each node hold up to `2g - 1` keys and splits full
/// nodes around position `g - 1`, so `g` must be at least 2 for a split to
/// leave a key on both sides.
///
/// # Examples
///
/// ```
/// use ftree::{Degree, InvalidDegree};
///
/// assert_eq!(Degree::new(1), Err(InvalidDegree(1)));
/// assert_eq!(InvalidDegree(1).to_string(), "tree degree must be at least 2, got 1");
/// ```
#[derive(Error, Clone, Copy, Debug, Eq, PartialEq)]
#[error("tree degree must be at least 2, got {0}")]
pub struct InvalidDegree(pub usize);
