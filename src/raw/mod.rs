//! Node storage shared by the tree engine and its node strategies.
//!
//! Nodes live in a [`Nodes`] arena and refer to each other through [`Handle`]s. A strategy
//! mutates child links and parent back-references through this module; only the arena ever
//! frees a node.

mod handle;
mod node;
mod nodes;

pub use handle::Handle;
pub use node::{Node, Side};
pub use nodes::Nodes;
