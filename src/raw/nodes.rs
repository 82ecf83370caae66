use alloc::vec::Vec;

use super::handle::Handle;
use super::node::{Node, Side};

/// Slot storage for the nodes of one tree.
///
/// The arena is the single owner of every node. Freed slots go on a free list and are handed
/// out again by the next [`alloc`](Nodes::alloc), so handles are stable for as long as their
/// node lives. Dropping or clearing the arena drops every live node exactly once.
pub struct Nodes<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<Handle>,
}

impl<T> Nodes<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Returns the number of live nodes.
    pub const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stores a new childless node under `parent` and returns its handle.
    ///
    /// The caller is responsible for linking the new node into the parent's child slot.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds [`Handle::MAX`] nodes.
    pub fn alloc(&mut self, value: T, parent: Option<Handle>) -> Handle {
        let node = Node::new(value, parent);
        if let Some(handle) = self.free.pop() {
            self.slots[handle.to_index()] = Some(node);
            handle
        } else {
            assert!(
                self.slots.len() <= Handle::MAX,
                "`Nodes::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX + 1
            );
            self.slots.push(Some(node));
            Handle::from_index(self.slots.len() - 1)
        }
    }

    /// Returns the node behind `handle`.
    ///
    /// # Panics
    ///
    /// Panics if `handle` does not name a live node.
    #[inline]
    pub fn get(&self, handle: Handle) -> &Node<T> {
        self.slots[handle.to_index()].as_ref().expect("`Nodes::get()` - `handle` is invalid!")
    }

    /// Returns the node behind `handle` mutably.
    ///
    /// # Panics
    ///
    /// Panics if `handle` does not name a live node.
    #[inline]
    pub fn get_mut(&mut self, handle: Handle) -> &mut Node<T> {
        self.slots[handle.to_index()].as_mut().expect("`Nodes::get_mut()` - `handle` is invalid!")
    }

    #[inline]
    pub fn value(&self, handle: Handle) -> &T {
        self.get(handle).value()
    }

    #[inline]
    pub fn left(&self, handle: Handle) -> Option<Handle> {
        self.get(handle).left()
    }

    #[inline]
    pub fn right(&self, handle: Handle) -> Option<Handle> {
        self.get(handle).right()
    }

    #[inline]
    pub fn parent(&self, handle: Handle) -> Option<Handle> {
        self.get(handle).parent()
    }

    /// Releases the node behind `handle` and returns its value.
    ///
    /// The node's own links are discarded; unlinking it from its parent and children first is the
    /// caller's job.
    ///
    /// # Panics
    ///
    /// Panics if `handle` does not name a live node.
    pub fn free(&mut self, handle: Handle) -> T {
        let node = self.slots[handle.to_index()].take().expect("`Nodes::free()` - `handle` is invalid!");
        self.free.push(handle);
        node.into_value()
    }

    /// Makes `child` the `side` child of `parent`, and points `child` back at `parent`.
    pub fn attach(&mut self, parent: Handle, side: Side, child: Handle) {
        self.get_mut(parent).set_child(side, Some(child));
        self.get_mut(child).set_parent(Some(parent));
    }

    /// Puts `new` into the slot of `parent` that currently holds `old`.
    ///
    /// `new` may be `None` to clear the slot. When it is a node, its parent link is updated.
    ///
    /// # Panics
    ///
    /// Panics if `old` is not a child of `parent`.
    pub fn replace_child(&mut self, parent: Handle, old: Handle, new: Option<Handle>) {
        let side = self
            .get(parent)
            .side_of(old)
            .expect("`Nodes::replace_child()` - `old` is not a child of `parent`!");
        self.get_mut(parent).set_child(side, new);
        if let Some(new) = new {
            self.get_mut(new).set_parent(Some(parent));
        }
    }

    /// Drops every node and forgets all handles.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
