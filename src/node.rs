//! The mutable tree of layout nodes.
use smallvec::SmallVec;

use crate::direction::{Flow, Oriented};
use crate::error::TreeError;
use crate::rect::Padding;

/// How many text items a node stores inline before spilling to the heap.
const INLINE_ITEMS: usize = 4;

/// A box in the layout tree.
///
/// Style fields are plain data and freely mutable. Content is not: a node
/// holds either child nodes or text items, and [`Node::append_child`] /
/// [`Node::append_text`] reject any attempt to mix the two.
///
/// How a node claims space along its parent's main axis, in order of
/// precedence:
/// - `basis` nonzero (and `fit_content` unset): exactly `basis` cells.
/// - `fit_content`: the minimum extent needed to render the subtree. When
///   `expand` is also nonzero, the node still takes part in the leftover
///   distribution and gets whichever is larger.
/// - `expand` nonzero: a share of the parent's leftover proportional to
///   `expand` relative to sibling weights.
/// - none of the above: as `expand` with weight 1.
#[derive(Debug, Default)]
pub struct Node {
    /// The axis on which this node's children or text items are arranged.
    pub direction: Flow,
    /// Requested absolute main-axis extent. Zero means unspecified.
    pub basis: u32,
    /// Weight for claiming a share of the parent's leftover main-axis space.
    pub expand: u32,
    /// Size this node to its subtree's minimum extent.
    pub fit_content: bool,
    /// Pack text items onto multiple lines when they overflow.
    ///
    /// Only meaningful for text-holding nodes.
    pub wrap: bool,
    /// Inset applied to this node's rectangle before placing its content.
    pub padding: Padding,
    /// Background color for the node's whole rectangle, and the fallback
    /// color of its text items. Zero means none.
    pub color: u16,
    /// Fallback attribute mask for this node's text items.
    pub attr: u32,
    content: Content,
}

#[derive(Debug, Default)]
enum Content {
    #[default]
    Empty,
    Nodes(Vec<Node>),
    Text(SmallVec<[TextItem; INLINE_ITEMS]>),
}

/// An immutable byte string owned by a text-holding node.
///
/// In a [`Flow::Rows`] node an item is a single horizontal run, one row
/// tall. In a [`Flow::Cols`] node the bytes are split on `\n` and each
/// segment lands one row below the previous, so a newline-separated string
/// reads vertically down the item's column slot.
#[derive(Debug)]
pub struct TextItem {
    bytes: Box<[u8]>,
    /// Color override, zero inherits the owning node's.
    pub color: u16,
    /// Attribute override, zero inherits the owning node's.
    pub attr: u32,
}

impl Node {
    /// A default node arranging its content top-to-bottom.
    #[must_use]
    pub fn rows() -> Self {
        Self { direction: Flow::Rows, ..Self::default() }
    }
    /// A default node arranging its content left-to-right.
    #[must_use]
    pub fn cols() -> Self {
        Self { direction: Flow::Cols, ..Self::default() }
    }

    /// Append a default child node and return it for configuration.
    ///
    /// # Errors
    /// Fails without touching the tree if this node already holds text.
    pub fn append_child(&mut self) -> Result<&mut Node, TreeError> {
        let nodes = match &mut self.content {
            Content::Text(_) => return Err(TreeError::ChildInTextNode),
            Content::Nodes(nodes) => nodes,
            empty @ Content::Empty => {
                *empty = Content::Nodes(Vec::new());
                let Content::Nodes(nodes) = empty else { unreachable!() };
                nodes
            }
        };
        nodes.push(Node::default());
        Ok(nodes.last_mut().unwrap())
    }

    /// Append a text item inheriting this node's color and attributes.
    ///
    /// # Errors
    /// Fails without touching the tree if this node already holds children.
    pub fn append_text(&mut self, text: impl Into<Box<[u8]>>) -> Result<(), TreeError> {
        self.append_styled_text(text, 0, 0)
    }

    /// Append a text item with its own color and attribute mask.
    ///
    /// Zero `color` or `attr` falls back to this node's own.
    ///
    /// # Errors
    /// Fails without touching the tree if this node already holds children.
    pub fn append_styled_text(
        &mut self,
        text: impl Into<Box<[u8]>>,
        color: u16,
        attr: u32,
    ) -> Result<(), TreeError> {
        let items = match &mut self.content {
            Content::Nodes(_) => return Err(TreeError::TextInChildNode),
            Content::Text(items) => items,
            empty @ Content::Empty => {
                *empty = Content::Text(SmallVec::new());
                let Content::Text(items) = empty else { unreachable!() };
                items
            }
        };
        items.push(TextItem { bytes: text.into(), color, attr });
        Ok(())
    }

    /// Remove all children and text items, keeping the node and its style.
    pub fn clear_children(&mut self) {
        self.content = Content::Empty;
    }

    /// The child nodes, empty for text-holding and empty nodes.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match &self.content {
            Content::Nodes(nodes) => nodes,
            Content::Empty | Content::Text(_) => &[],
        }
    }
    /// The text items, empty for child-holding and empty nodes.
    #[must_use]
    pub fn items(&self) -> &[TextItem] {
        match &self.content {
            Content::Text(items) => items,
            Content::Empty | Content::Nodes(_) => &[],
        }
    }
}

impl TextItem {
    /// The raw bytes of this item.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The item's extent in the frame of the owning node's direction.
    ///
    /// `main` is the extent along the axis items are sequenced on, `cross`
    /// the perpendicular one.
    pub(crate) fn measure(&self, flow: Flow) -> Oriented<u32> {
        match flow {
            Flow::Rows => Oriented::new(1, clamp_len(self.bytes.len())),
            Flow::Cols => {
                let widest = self.segments().map(|s| clamp_len(s.len())).max();
                let count = clamp_len(self.segments().count());
                Oriented::new(widest.unwrap_or(0), count)
            }
        }
    }

    /// The horizontal runs of this item, one per row, split on `\n`.
    pub(crate) fn segments(&self) -> impl Iterator<Item = &[u8]> {
        self.bytes.split(|byte| *byte == b'\n')
    }
}

pub(crate) fn clamp_len(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_kinds_are_exclusive() {
        let mut node = Node::rows();
        node.append_text(*b"hello").unwrap();
        assert_eq!(node.append_child().unwrap_err(), TreeError::ChildInTextNode);

        let mut node = Node::cols();
        node.append_child().unwrap();
        assert_eq!(node.append_text(*b"nope").unwrap_err(), TreeError::TextInChildNode);
        assert_eq!(node.children().len(), 1);
        assert!(node.items().is_empty());
    }

    #[test]
    fn clear_children_resets_content() {
        let mut node = Node::rows();
        node.append_text(*b"soon gone").unwrap();
        node.clear_children();
        assert!(node.items().is_empty());
        node.append_child().unwrap();
        assert_eq!(node.children().len(), 1);
    }

    #[test]
    fn item_measure_per_direction() {
        let mut node = Node::default();
        node.append_text(*b"ab\ncdef").unwrap();
        let item = &node.items()[0];
        assert_eq!(item.measure(Flow::Rows), Oriented::new(1, 7));
        assert_eq!(item.measure(Flow::Cols), Oriented::new(4, 2));
    }
}
