//! An order-statistic multiway search tree with a configurable degree.
//!
//! This crate provides [`FTree`], an ordered map built on a B-tree whose
//! fanout is fixed by a [`Degree`] chosen at construction. Besides point
//! lookup and insertion it answers order-statistic queries from subtree sizes
//! cached in every node:
//!
//! - [`rank`](FTree::rank) - How many keys are smaller than a given key
//! - [`select`](FTree::select) - The key at a given sorted position
//! - [`floor`](FTree::floor) / [`ceiling`](FTree::ceiling) - Nearest present key at or below / above
//! - [`size_between`](FTree::size_between) - How many keys fall in an inclusive range
//!
//! # Example
//!
//! ```
//! use ftree::{FTree, Rank};
//!
//! let mut scores = FTree::new(3);
//! scores.put("Alice", 100);
//! scores.put("Bob", 85);
//! scores.put("Carol", 92);
//!
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//! assert_eq!(scores.size(), 3);
//!
//! // The median name, and where "Carol" sits in sorted order.
//! assert_eq!(scores.select(1), Some(&"Bob"));
//! assert_eq!(scores.rank(&"Carol"), 2);
//!
//! // Index by rank.
//! assert_eq!(scores[Rank(0)], 100);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`; the default `std` feature adds
//!   [`FTree::print_tree`]
//! - **Eager snapshots** - [`keys`](FTree::keys), [`values`](FTree::values) and the `_between`
//!   variants return fully collected `Vec`s rather than lazy iterators
//! - **Insert-only** - There is no removal; nodes only ever split
//!
//! # Implementation
//!
//! Insertion splits any full node it is about to descend into, so a node
//! never exceeds `2g - 1` keys and all leaves stay at the same depth. Each
//! node caches its subtree's key count and height, restored bottom-up along
//! the insertion path.
//!
//! Splits emit `tracing` events (`debug` when the root splits, `trace` for
//! every other split); install a subscriber to see them.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;
#[cfg(any(test, feature = "std"))]
extern crate std;

mod degree;
mod error;
mod order_statistic;
mod raw;

pub mod ftree;

pub use degree::Degree;
pub use error::InvalidDegree;
pub use ftree::FTree;
pub use order_statistic::Rank;
