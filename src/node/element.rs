//! Element type - markup elements with attributes and children

use compact_str::CompactString;

use crate::attr::{Attrs, AttrsExt};

use super::{Children, Node, Text};

// =============================================================================
// Element
// =============================================================================

/// Markup element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lower-cased tag name
    pub tag: CompactString,
    /// Element attributes in source order
    pub attrs: Attrs,
    /// Child nodes
    pub children: Children,
}

impl Element {
    /// Create an element without attributes or children
    pub fn new(tag: impl Into<CompactString>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Attrs::new(),
            children: Children::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder
    // ─────────────────────────────────────────────────────────────────────────

    /// Add an attribute (builder)
    pub fn attr(mut self, name: impl Into<CompactString>, value: impl Into<String>) -> Self {
        self.attrs.set_attr(name, value);
        self
    }

    /// Append a child element (builder)
    pub fn child(mut self, elem: Element) -> Self {
        self.children.push(Node::from(elem));
        self
    }

    /// Append a text node (builder)
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.children.push(Node::Text(Text::new(content)));
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attribute access
    // ─────────────────────────────────────────────────────────────────────────

    /// Get attribute value by name
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get_attr(name)
    }

    /// Check if attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.has_attr(name)
    }

    /// Lower-cased `style` attribute, empty when absent
    pub fn style(&self) -> String {
        self.get_attr("style").unwrap_or_default().to_lowercase()
    }

    /// Lower-cased class list joined by single spaces, empty when absent
    pub fn classes(&self) -> String {
        self.get_attr("class")
            .unwrap_or_default()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Children
    // ─────────────────────────────────────────────────────────────────────────

    /// Check if element has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of direct children (all node types)
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Iterate over direct child elements
    pub fn children_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Direct child elements with the given tag name
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children_elements().filter(move |e| e.tag == tag)
    }

    /// All descendant elements (excluding self) whose tag is in `tags`,
    /// in document order
    pub fn find_all(&self, tags: &[&str]) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_descendants(tags, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, tags: &[&str], out: &mut Vec<&'a Element>) {
        for child in self.children_elements() {
            if tags.contains(&child.tag.as_str()) {
                out.push(child);
            }
            child.collect_descendants(tags, out);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Text
    // ─────────────────────────────────────────────────────────────────────────

    /// Get text content of this element (concatenated from all text nodes)
    pub fn text_content(&self) -> String {
        let mut result = String::new();
        for piece in self.strings() {
            result.push_str(piece);
        }
        result
    }

    /// Descendant text joined by single spaces, each piece trimmed and
    /// blank pieces dropped
    pub fn flattened_text(&self) -> String {
        self.strings()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Descendant text nodes in document order
    pub fn strings(&self) -> impl Iterator<Item = &str> {
        let mut out = Vec::new();
        self.collect_strings(&mut out);
        out.into_iter()
    }

    fn collect_strings<'a>(&'a self, out: &mut Vec<&'a str>) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push(&t.content),
                Node::Element(e) => e.collect_strings(out),
            }
        }
    }
}
