use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};

use log::debug;

use super::NodeStrategy;
use crate::raw::{Handle, Nodes, Side};

/// A plain binary search tree with no rebalancing.
///
/// Every operation is O(h). Because nothing ever rotates, inserting values in sorted order
/// produces a chain and h grows to n. That is a limitation of this variant, not a bug.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Unbalanced;

impl NodeStrategy for Unbalanced {
    fn insert<T: Ord>(nodes: &mut Nodes<T>, subtree: Handle, value: T) -> bool {
        let mut current = subtree;
        loop {
            let node = nodes.get(current);
            let side = match value.cmp(node.value()) {
                Less => Side::Left,
                Equal => return false,
                Greater => Side::Right,
            };
            match node.child(side) {
                Some(child) => current = child,
                None => {
                    let leaf = nodes.alloc(value, None);
                    nodes.attach(current, side, leaf);
                    return true;
                }
            }
        }
    }

    fn remove<T, Q>(nodes: &mut Nodes<T>, subtree: Handle, value: &Q) -> Option<T>
    where
        T: Borrow<Q> + Ord,
        Q: ?Sized + Ord,
    {
        let target = Self::find(nodes, subtree, value)?;
        if nodes.get(target).has_two_children() {
            // The node stays; its value is swapped for the successor's and the successor's node,
            // which has no left child, is the one that goes.
            let successor = Self::substitute(nodes, target);
            let replacement = Self::unlink(nodes, successor);
            Some(nodes.get_mut(target).replace_value(replacement))
        } else {
            Some(Self::unlink(nodes, target))
        }
    }

    fn unlink<T>(nodes: &mut Nodes<T>, node: Handle) -> T {
        let target = nodes.get(node);
        assert!(!target.has_two_children(), "`Unbalanced::unlink()` - `node` has two children!");
        let parent = target.parent().expect("`Unbalanced::unlink()` - `node` is the root!");
        let child = target.sole_child();
        nodes.replace_child(parent, node, child);
        debug!("unlinked node {node:?} from parent {parent:?}, promoted {child:?}");
        nodes.free(node)
    }
}
