//! An unbalanced binary search tree with a pluggable node strategy.
//!
//! [`Tree`] is an ordered set over any [`Ord`] value type. It keeps the binary-search ordering
//! (everything left of a node is smaller, everything right is larger), rejects duplicates, and
//! offers pre-, in- and post-order enumeration into a fresh [`Vec`](alloc::vec::Vec).
//!
//! # Example
//!
//! ```
//! use arbor_bst::Tree;
//!
//! let mut tree = Tree::new();
//! for value in [10, 5, 15] {
//!     tree.insert(value);
//! }
//!
//! assert!(tree.contains(&5));
//! assert!(!tree.contains(&20));
//!
//! assert!(tree.remove(&15));
//! assert!(!tree.remove(&15));
//! assert_eq!(tree.len(), 2);
//! assert_eq!(tree.in_order(), [5, 10]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`. The optional `std` feature adds
//!   [`Tree::print`].
//! - **Pluggable structure** - Where values go and how nodes are spliced out is decided by a
//!   [`NodeStrategy`] type parameter. [`Unbalanced`] is the default.
//! - **Arena storage** - Nodes live in a single [`Nodes`](raw::Nodes) arena and link to each
//!   other through [`Handle`](raw::Handle)s, parent back-references included. Dropping the tree
//!   drops every node exactly once.
//!
//! # Implementation
//!
//! The [`Tree`] engine owns the arena, the root handle and the element count. It deals with
//! removal of the root itself, since the root has no parent slot to splice through, and hands
//! every other structural change to its strategy. Removing a node with two children keeps the
//! node, moves the in-order successor's value into it, and splices out the successor's node,
//! which has at most one child. No operation recurses, so a degenerate tree of height `n`
//! cannot overflow the stack.
//!
//! Diagnostics go through the [`log`] facade at `trace`/`debug` level; no logger is installed
//! by the crate.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
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

pub mod raw;
pub mod strategy;
pub mod tree;

pub use strategy::{NodeStrategy, Order, Unbalanced};
pub use tree::Tree;
