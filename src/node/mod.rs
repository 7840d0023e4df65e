//! Markup tree: `Element`, `Node`, `Text` and `Document`.
//!
//! The tree is produced once by [`crate::convert::html`] from
//! placeholder-safe markup and is read-only for the rest of a conversion.

mod element;
mod text;
mod document;

pub use element::Element;
pub use text::Text;
pub use document::{Document, ElementIterator};

use smallvec::SmallVec;

/// Node in a markup tree - either Element or Text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Box<Element>),
    Text(Text),
}

impl Node {
    /// Get as element reference.
    #[inline]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(elem: Element) -> Self {
        Node::Element(Box::new(elem))
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

/// Type alias for children collection.
pub type Children = SmallVec<[Node; 8]>;
