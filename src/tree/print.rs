use core::fmt;
use core::marker::PhantomData;

use crate::raw::{Handle, Nodes};
use crate::strategy::NodeStrategy;

/// Width of the rule printed under a non-empty rendering.
const RULE_WIDTH: usize = 80;

/// Sideways rendering of a [`Tree`](crate::Tree), for diagnostics.
///
/// The first line reports the size. A non-empty tree follows with a blank line, then one value
/// per line with the right subtree above its parent and the left subtree below, indented four
/// spaces per level, then a rule of dashes. The layout carries no compatibility promise.
///
/// This `struct` is created by the [`sideways`](crate::Tree::sideways) method on
/// [`Tree`](crate::Tree).
#[must_use = "the rendering does nothing unless formatted"]
pub struct Sideways<'a, T, S> {
    nodes: &'a Nodes<T>,
    root: Option<Handle>,
    len: usize,
    strategy: PhantomData<S>,
}

impl<'a, T, S> Sideways<'a, T, S> {
    pub(super) const fn new(nodes: &'a Nodes<T>, root: Option<Handle>, len: usize) -> Self {
        Self {
            nodes,
            root,
            len,
            strategy: PhantomData,
        }
    }
}

impl<T: fmt::Display, S: NodeStrategy> fmt::Display for Sideways<'_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tree size = {}", self.len)?;
        if let Some(root) = self.root {
            f.write_str("\n\n")?;
            S::print(self.nodes, root, 0, f)?;
            write!(f, "{:-<width$}", "", width = RULE_WIDTH)?;
        }
        writeln!(f)
    }
}
