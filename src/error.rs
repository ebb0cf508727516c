#![allow(clippy::module_name_repetitions)]
use thiserror::Error;

/// An error caused by a tree mutation that would break the content
/// exclusivity of a node.
///
/// A node holds either child nodes or text items, never both. The rejected
/// operation leaves the tree unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("this node holds text items, it cannot also hold child nodes")]
    ChildInTextNode,
    #[error("this node holds child nodes, it cannot also hold text items")]
    TextInChildNode,
}
