use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering::Equal;
use core::fmt;
use core::marker::PhantomData;

use log::trace;
use smallvec::SmallVec;

use crate::raw::{Handle, Nodes};
use crate::strategy::{NodeStrategy, Order, Unbalanced};

mod print;

pub use print::Sideways;

/// An ordered set stored as a binary search tree.
///
/// Values are kept so that an in-order walk yields them in ascending order. Equal values are
/// rejected: [`insert`](Tree::insert) returns `false` and leaves the tree alone.
///
/// The structural rules (where a value goes, how a node is spliced out) come from the strategy
/// `S`, which defaults to [`Unbalanced`]. The tree itself owns the node storage, the root and
/// the element count, and handles removal of the root, which has no parent to splice through.
///
/// It is a logic error for a value to be modified in such a way that its ordering relative to
/// any other value, as determined by the [`Ord`] trait, changes while it is in the tree. The
/// behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `Tree` that observed the logic error and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use arbor_bst::Tree;
///
/// let mut tree = Tree::new();
/// for value in [5, 3, 8, 1, 4, 7, 9] {
///     assert!(tree.insert(value));
/// }
///
/// // Duplicates are rejected.
/// assert!(!tree.insert(4));
/// assert_eq!(tree.len(), 7);
///
/// // Removing a node with two children promotes its in-order successor.
/// assert!(tree.remove(&5));
/// assert_eq!(tree.in_order(), [1, 3, 4, 7, 8, 9]);
/// assert_eq!(tree.root(), Some(&7));
/// ```
pub struct Tree<T, S = Unbalanced> {
    nodes: Nodes<T>,
    root: Option<Handle>,
    len: usize,
    strategy: PhantomData<S>,
}

impl<T> Tree<T> {
    /// Makes a new, empty `Tree` using the [`Unbalanced`] strategy.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::with_strategy()
    }

    /// Makes a new, empty `Tree` with node storage for at least `capacity` values.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor_bst::Tree;
    ///
    /// let tree: Tree<i32> = Tree::with_capacity(16);
    /// assert!(tree.is_empty());
    /// assert!(tree.capacity() >= 16);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_strategy(capacity)
    }
}

impl<T, S> Tree<T, S> {
    /// Makes a new, empty `Tree` whose structure is governed by the strategy `S`.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor_bst::{Tree, Unbalanced};
    ///
    /// let tree = Tree::<u8, Unbalanced>::with_strategy();
    /// assert!(tree.is_empty());
    /// ```
    #[must_use]
    pub const fn with_strategy() -> Self {
        Self {
            nodes: Nodes::new(),
            root: None,
            len: 0,
            strategy: PhantomData,
        }
    }

    /// Makes a new, empty `Tree` for strategy `S` with node storage for at least `capacity`
    /// values.
    #[must_use]
    pub fn with_capacity_and_strategy(capacity: usize) -> Self {
        Self {
            nodes: Nodes::with_capacity(capacity),
            root: None,
            len: 0,
            strategy: PhantomData,
        }
    }

    /// Returns the number of values the node storage can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns the number of values in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.len(), 0);
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Same as [`len`](Tree::len).
    #[must_use]
    pub const fn size(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree contains no values.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every value, leaving an empty tree.
    ///
    /// The node storage keeps its allocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor_bst::Tree;
    ///
    /// let mut tree = Tree::from([1, 2, 3]);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// assert!(!tree.contains(&1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        trace!("clearing tree of {} values", self.len);
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Returns the value stored at the root, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor_bst::Tree;
    ///
    /// let tree = Tree::from([2, 1, 3]);
    /// assert_eq!(tree.root(), Some(&2));
    /// ```
    #[must_use]
    pub fn root(&self) -> Option<&T> {
        self.root.map(|root| self.nodes.value(root))
    }

    /// Returns the smallest value in the tree.
    ///
    /// # Complexity
    ///
    /// O(h)
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        let mut current = self.root?;
        while let Some(left) = self.nodes.left(current) {
            current = left;
        }
        Some(self.nodes.value(current))
    }

    /// Returns the largest value in the tree.
    ///
    /// # Complexity
    ///
    /// O(h)
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        let mut current = self.root?;
        while let Some(right) = self.nodes.right(current) {
            current = right;
        }
        Some(self.nodes.value(current))
    }

    /// Returns the number of nodes on the longest path from the root to a leaf, or 0 when empty.
    ///
    /// Without rebalancing, inserting sorted values makes the height equal the length.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor_bst::Tree;
    ///
    /// let balanced = Tree::from([2, 1, 3]);
    /// assert_eq!(balanced.height(), 2);
    ///
    /// let chain = Tree::from([1, 2, 3]);
    /// assert_eq!(chain.height(), 3);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: SmallVec<[(Handle, usize); 32]> = SmallVec::new();
        stack.extend(self.root.map(|root| (root, 1)));
        while let Some((handle, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.nodes.get(handle);
            stack.extend(node.left().map(|left| (left, depth + 1)));
            stack.extend(node.right().map(|right| (right, depth + 1)));
        }
        height
    }

    /// Returns an adapter that renders the tree sideways through [`Display`](fmt::Display).
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor_bst::Tree;
    ///
    /// let tree = Tree::from([2, 1, 3]);
    /// let rendered = tree.sideways().to_string();
    /// assert!(rendered.starts_with("Tree size = 3\n\n    3\n2\n    1\n"));
    /// ```
    pub fn sideways(&self) -> Sideways<'_, T, S> {
        Sideways::new(&self.nodes, self.root, self.len)
    }

    /// Prints the sideways rendering of the tree to standard output.
    #[cfg(feature = "std")]
    pub fn print(&self)
    where
        T: fmt::Display,
        S: NodeStrategy,
    {
        std::println!("{}", self.sideways());
    }
}

impl<T: Ord, S: NodeStrategy> Tree<T, S> {
    /// Adds a value to the tree.
    ///
    /// Returns whether the value was newly inserted. That is:
    ///
    /// - If the tree did not previously contain an equal value, `true` is returned.
    /// - If the tree already contained an equal value, `false` is returned, the tree is not
    ///   modified and `value` is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert_eq!(tree.insert(2), true);
    /// assert_eq!(tree.insert(2), false);
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h)
    pub fn insert(&mut self, value: T) -> bool {
        let inserted = match self.root {
            Some(root) => S::insert(&mut self.nodes, root, value),
            None => {
                self.root = Some(self.nodes.alloc(value, None));
                true
            }
        };
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Returns `true` if the tree contains a value equal to `value`.
    ///
    /// The value may be any borrowed form of the tree's value type, but the ordering on the
    /// borrowed form *must* match the ordering on the value type.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor_bst::Tree;
    ///
    /// let tree = Tree::from([10, 5, 15]);
    /// assert_eq!(tree.contains(&5), true);
    /// assert_eq!(tree.contains(&20), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h)
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.root.is_some_and(|root| S::contains(&self.nodes, root, value))
    }

    /// If the tree contains a value equal to `value`, removes and drops it. Returns whether such a
    /// value was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor_bst::Tree;
    ///
    /// let mut tree = Tree::from([10, 5, 15]);
    /// assert_eq!(tree.remove(&15), true);
    /// assert_eq!(tree.remove(&15), false);
    /// assert_eq!(tree.len(), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h)
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.take(value).is_some()
    }

    /// Removes and returns the value in the tree, if any, that is equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor_bst::Tree;
    ///
    /// let mut tree = Tree::from([2]);
    /// assert_eq!(tree.take(&2), Some(2));
    /// assert_eq!(tree.take(&2), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h)
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let root = self.root?;
        let removed = if value.cmp(self.nodes.value(root).borrow()) == Equal {
            Some(self.take_root(root))
        } else {
            S::remove(&mut self.nodes, root, value)
        };
        if removed.is_some() {
            self.len -= 1;
        }
        debug_assert_eq!(self.len, self.nodes.len(), "`Tree::take()` - length out of sync with node storage");
        removed
    }

    /// Removes the root's value. The root has no parent slot to splice through, so its three
    /// shapes are handled here rather than by the strategy.
    fn take_root(&mut self, root: Handle) -> T {
        let node = self.nodes.get(root);
        if node.has_two_children() {
            let successor = S::substitute(&self.nodes, root);
            trace!("root {root:?} has two children, promoting successor {successor:?}");
            let replacement = S::unlink(&mut self.nodes, successor);
            self.nodes.get_mut(root).replace_value(replacement)
        } else {
            let child = node.sole_child();
            if let Some(child) = child {
                self.nodes.get_mut(child).set_parent(None);
            }
            trace!("root {root:?} replaced by {child:?}");
            self.root = child;
            self.nodes.free(root)
        }
    }
}

impl<T, S: NodeStrategy> Tree<T, S> {
    /// Visits every value in the given order.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor_bst::{Order, Tree};
    ///
    /// let tree = Tree::from([2, 1, 3]);
    /// let mut sum = 0;
    /// tree.visit(Order::Post, |value| sum += value);
    /// assert_eq!(sum, 6);
    /// ```
    pub fn visit<'a, F>(&'a self, order: Order, visit: F)
    where
        F: FnMut(&'a T),
    {
        if let Some(root) = self.root {
            S::traverse(&self.nodes, root, order, visit);
        }
    }

    /// Returns references to the values in the given order.
    fn refs(&self, order: Order) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        self.visit(order, |value| out.push(value));
        out
    }
}

impl<T: Clone, S: NodeStrategy> Tree<T, S> {
    /// Returns the values in pre-order: each node before its left and right subtrees.
    ///
    /// Every call builds a fresh sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor_bst::Tree;
    ///
    /// let tree = Tree::from([5, 3, 8, 1, 4]);
    /// assert_eq!(tree.pre_order(), [5, 3, 1, 4, 8]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn pre_order(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len);
        if let Some(root) = self.root {
            S::pre_order(&self.nodes, root, &mut out);
        }
        out
    }

    /// Returns the values in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor_bst::Tree;
    ///
    /// let tree = Tree::from([5, 3, 8, 1, 4]);
    /// assert_eq!(tree.in_order(), [1, 3, 4, 5, 8]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn in_order(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len);
        if let Some(root) = self.root {
            S::in_order(&self.nodes, root, &mut out);
        }
        out
    }

    /// Returns the values in post-order: each node after its left and right subtrees.
    ///
    /// # Examples
    ///
    /// ```
    /// use arbor_bst::Tree;
    ///
    /// let tree = Tree::from([5, 3, 8, 1, 4]);
    /// assert_eq!(tree.post_order(), [1, 4, 3, 8, 5]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn post_order(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len);
        if let Some(root) = self.root {
            S::post_order(&self.nodes, root, &mut out);
        }
        out
    }

    /// The default enumeration of the tree, which is [`pre_order`](Tree::pre_order).
    ///
    /// Re-inserting these values into an empty tree in this order rebuilds the same set.
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        self.pre_order()
    }
}

/// Copies by re-inserting the source's pre-order enumeration into a new tree.
///
/// The copy holds the same set of values. It is not a node-for-node copy: the shape is whatever
/// strategy `S` builds from that insertion sequence, and the node storage is compacted.
impl<T: Clone + Ord, S: NodeStrategy> Clone for Tree<T, S> {
    fn clone(&self) -> Self {
        let mut tree = Self::with_capacity_and_strategy(self.len);
        self.visit(Order::Pre, |value| {
            tree.insert(value.clone());
        });
        tree
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        source.visit(Order::Pre, |value| {
            self.insert(value.clone());
        });
    }
}

impl<T: fmt::Debug, S: NodeStrategy> fmt::Debug for Tree<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.refs(Order::In)).finish()
    }
}

impl<T, S> Default for Tree<T, S> {
    /// Creates an empty `Tree`.
    fn default() -> Self {
        Self::with_strategy()
    }
}

/// Two trees are equal when they hold the same values, whatever their shape or strategy.
impl<T: PartialEq, S: NodeStrategy, S2: NodeStrategy> PartialEq<Tree<T, S2>> for Tree<T, S> {
    fn eq(&self, other: &Tree<T, S2>) -> bool {
        self.len == other.len && self.refs(Order::In) == other.refs(Order::In)
    }
}

impl<T: Eq, S: NodeStrategy> Eq for Tree<T, S> {}

impl<T: Ord, S: NodeStrategy> FromIterator<T> for Tree<T, S> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::with_strategy();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord, S: NodeStrategy> Extend<T> for Tree<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: 'a + Ord + Copy, S: NodeStrategy> Extend<&'a T> for Tree<T, S> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for Tree<T> {
    /// Builds a tree by inserting the array's values from first to last.
    ///
    /// ```
    /// use arbor_bst::Tree;
    ///
    /// let tree1 = Tree::from([1, 2, 3, 4]);
    /// let tree2: Tree<_> = [4, 3, 2, 1].into();
    /// assert_eq!(tree1, tree2);
    /// ```
    fn from(values: [T; N]) -> Self {
        let mut tree = Self::with_capacity(N);
        tree.extend(values);
        tree
    }
}
