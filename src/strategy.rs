//! Structural rules for one tree variant.
//!
//! A [`NodeStrategy`] decides how values are placed into and spliced out of a subtree stored in
//! [`Nodes`]. The [`Tree`](crate::Tree) engine owns the storage and the root, handles the root's
//! own removal, and delegates everything below the root to its strategy. Swapping the strategy
//! type parameter swaps the structural policy without touching the engine.
//!
//! [`Unbalanced`] is the plain binary search tree: no rotations, so sorted input degrades the
//! tree into a list of height `n`.

use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};
use core::fmt;

use smallvec::SmallVec;

use crate::raw::{Handle, Nodes};

mod unbalanced;

pub use unbalanced::Unbalanced;

/// Spaces of indentation per depth level in [`NodeStrategy::print`].
pub(crate) const PRINT_INDENT: usize = 4;

/// Explicit stack used by the traversals. Most trees stay shallow enough to avoid the heap.
type Stack<E> = SmallVec<[E; 32]>;

/// The order in which a traversal visits a subtree.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Order {
    /// Node, then left subtree, then right subtree.
    Pre,
    /// Left subtree, then node, then right subtree. Ascending for a valid search tree.
    In,
    /// Left subtree, then right subtree, then node.
    Post,
}

/// The structural policy of a tree variant.
///
/// Every function works on the subtree rooted at `subtree` inside `nodes`. Functions that remove
/// nodes must only ever be asked to remove a node that has a parent; the tree engine deals with
/// the root itself.
///
/// Lookups, successor discovery and traversals have provided implementations that hold for any
/// binary search tree. A variant only has to say how values go in and how nodes come out.
pub trait NodeStrategy {
    /// Inserts `value` below `subtree`.
    ///
    /// Returns `true` if a new node was created, and `false` (dropping `value`) if an equal value
    /// is already present. A rejected insert leaves the subtree untouched.
    fn insert<T: Ord>(nodes: &mut Nodes<T>, subtree: Handle, value: T) -> bool;

    /// Removes the value equal to `value` from below `subtree` and returns it.
    ///
    /// Returns `None`, without mutating anything, if no such value exists. The node holding the
    /// value must not be the tree root.
    fn remove<T, Q>(nodes: &mut Nodes<T>, subtree: Handle, value: &Q) -> Option<T>
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord;

    /// Splices out `node`, which has a parent and at most one child, and returns its value.
    ///
    /// The sole child, if any, takes the node's place in its parent.
    fn unlink<T>(nodes: &mut Nodes<T>, node: Handle) -> T;

    /// Returns the handle of the node holding `value`, if any.
    fn find<T, Q>(nodes: &Nodes<T>, subtree: Handle, value: &Q) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = Some(subtree);
        while let Some(handle) = current {
            let node = nodes.get(handle);
            current = match value.cmp(node.value().borrow()) {
                Less => node.left(),
                Equal => return Some(handle),
                Greater => node.right(),
            };
        }
        None
    }

    /// Returns true if a value equal to `value` is stored below `subtree`.
    fn contains<T, Q>(nodes: &Nodes<T>, subtree: Handle, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Self::find(nodes, subtree, value).is_some()
    }

    /// Returns the in-order successor of `node`, which must have two children.
    ///
    /// The successor is the leftmost node of the right subtree, so it never has a left child and
    /// can always be taken out with [`unlink`](NodeStrategy::unlink).
    ///
    /// # Panics
    ///
    /// Panics if `node` has no right child.
    fn substitute<T>(nodes: &Nodes<T>, node: Handle) -> Handle {
        debug_assert!(
            nodes.get(node).has_two_children(),
            "`NodeStrategy::substitute()` - `node` does not have two children!"
        );
        let mut current = nodes.right(node).expect("`NodeStrategy::substitute()` - `node` has no right child!");
        while let Some(left) = nodes.left(current) {
            current = left;
        }
        current
    }

    /// Visits every value below `subtree` in the given order.
    fn traverse<'a, T, F>(nodes: &'a Nodes<T>, subtree: Handle, order: Order, mut visit: F)
    where
        F: FnMut(&'a T),
    {
        let mut stack: Stack<Handle> = SmallVec::new();
        match order {
            Order::Pre => {
                stack.push(subtree);
                while let Some(handle) = stack.pop() {
                    let node = nodes.get(handle);
                    visit(node.value());
                    // Right goes on first so the left subtree is popped first.
                    stack.extend(node.right());
                    stack.extend(node.left());
                }
            }
            Order::In => {
                let mut current = Some(subtree);
                loop {
                    while let Some(handle) = current {
                        stack.push(handle);
                        current = nodes.left(handle);
                    }
                    let Some(handle) = stack.pop() else {
                        break;
                    };
                    visit(nodes.value(handle));
                    current = nodes.right(handle);
                }
            }
            Order::Post => {
                let mut current = Some(subtree);
                let mut last_visited: Option<Handle> = None;
                loop {
                    while let Some(handle) = current {
                        stack.push(handle);
                        current = nodes.left(handle);
                    }
                    let Some(&top) = stack.last() else {
                        break;
                    };
                    match nodes.right(top) {
                        Some(right) if last_visited != Some(right) => current = Some(right),
                        _ => {
                            visit(nodes.value(top));
                            last_visited = stack.pop();
                        }
                    }
                }
            }
        }
    }

    /// Appends clones of the values below `subtree` to `out` in pre-order.
    fn pre_order<T: Clone>(nodes: &Nodes<T>, subtree: Handle, out: &mut Vec<T>) {
        Self::traverse(nodes, subtree, Order::Pre, |value| out.push(value.clone()));
    }

    /// Appends clones of the values below `subtree` to `out` in ascending order.
    fn in_order<T: Clone>(nodes: &Nodes<T>, subtree: Handle, out: &mut Vec<T>) {
        Self::traverse(nodes, subtree, Order::In, |value| out.push(value.clone()));
    }

    /// Appends clones of the values below `subtree` to `out` in post-order.
    fn post_order<T: Clone>(nodes: &Nodes<T>, subtree: Handle, out: &mut Vec<T>) {
        Self::traverse(nodes, subtree, Order::Post, |value| out.push(value.clone()));
    }

    /// Writes the subtree sideways: right subtree above, left subtree below, one value per line
    /// indented by its depth (starting at `depth`).
    fn print<T, W>(nodes: &Nodes<T>, subtree: Handle, depth: usize, out: &mut W) -> fmt::Result
    where
        T: fmt::Display,
        W: fmt::Write,
    {
        let mut stack: Stack<(Handle, usize)> = SmallVec::new();
        let mut current = Some((subtree, depth));
        loop {
            while let Some((handle, level)) = current {
                stack.push((handle, level));
                current = nodes.right(handle).map(|right| (right, level + 1));
            }
            let Some((handle, level)) = stack.pop() else {
                break;
            };
            writeln!(out, "{:indent$}{}", "", nodes.value(handle), indent = level * PRINT_INDENT)?;
            current = nodes.left(handle).map(|left| (left, level + 1));
        }
        Ok(())
    }
}
