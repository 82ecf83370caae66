use super::handle::Handle;

/// Which child slot of a parent a node occupies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Left,
    Right,
}

/// A single tree node: one value, up to two owned children and a back-reference to its parent.
///
/// Children are owned through the [`Nodes`](super::Nodes) arena that stores them; the `parent`
/// link is navigation only and is never used to free anything.
#[derive(Debug)]
pub struct Node<T> {
    value: T,
    left: Option<Handle>,
    right: Option<Handle>,
    parent: Option<Handle>,
}

impl<T> Node<T> {
    /// Creates a childless node hanging under `parent`.
    pub(crate) const fn new(value: T, parent: Option<Handle>) -> Self {
        Self {
            value,
            left: None,
            right: None,
            parent,
        }
    }

    /// Returns the stored value.
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Replaces the stored value, returning the old one.
    pub fn replace_value(&mut self, value: T) -> T {
        core::mem::replace(&mut self.value, value)
    }

    #[inline]
    pub fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub fn parent(&self) -> Option<Handle> {
        self.parent
    }

    /// Returns the child on the given side.
    #[inline]
    pub fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    /// Sets the child on the given side.
    pub fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Returns true if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Returns true if both child slots are occupied.
    pub fn has_two_children(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }

    /// Returns the only child of a node with exactly one child.
    pub fn sole_child(&self) -> Option<Handle> {
        match (self.left, self.right) {
            (Some(child), None) | (None, Some(child)) => Some(child),
            _ => None,
        }
    }

    /// Returns which side `child` hangs from, or `None` if it is not a child of this node.
    pub fn side_of(&self, child: Handle) -> Option<Side> {
        if self.left == Some(child) {
            Some(Side::Left)
        } else if self.right == Some(child) {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub(crate) fn into_value(self) -> T {
        self.value
    }
}
