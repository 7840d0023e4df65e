//! Document type and related utilities
//!
//! The root container for markup trees, with query and traversal APIs.

use super::Element;

// =============================================================================
// Document
// =============================================================================

/// Root document container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Synthetic root element holding the top-level nodes
    pub root: Element,
}

impl Document {
    /// Tag name of the synthetic root element.
    pub const ROOT_TAG: &'static str = "#document";

    /// Create a new document with a root element
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// An empty document (used when markup cannot be parsed at all)
    pub fn empty() -> Self {
        Self::new(Element::new(Self::ROOT_TAG))
    }

    /// The `<body>` element if present, else the whole tree
    pub fn body(&self) -> &Element {
        self.find_element(|e| e.tag == "body").unwrap_or(&self.root)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query API
    // ─────────────────────────────────────────────────────────────────────────

    /// Find first element matching predicate (depth-first search)
    pub fn find_element<F>(&self, predicate: F) -> Option<&Element>
    where
        F: Fn(&Element) -> bool,
    {
        self.iter_elements().find(|e| predicate(e))
    }

    /// Count all elements including the root
    pub fn element_count(&self) -> usize {
        self.iter_elements().count()
    }

    /// Iterate over all elements (depth-first)
    pub fn iter_elements(&self) -> ElementIterator<'_> {
        ElementIterator::new(&self.root)
    }
}

// =============================================================================
// ElementIterator - depth-first element traversal
// =============================================================================

/// Depth-first iterator over elements
#[derive(Debug)]
pub struct ElementIterator<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> ElementIterator<'a> {
    fn new(root: &'a Element) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for ElementIterator<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let elem = self.stack.pop()?;
        // Push children in reverse order so they're visited left-to-right
        for child in elem.children.iter().rev() {
            if let Some(child_elem) = child.as_element() {
                self.stack.push(child_elem);
            }
        }
        Some(elem)
    }
}
