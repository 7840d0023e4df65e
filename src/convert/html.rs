//! Conversion from HTML text to a markup [`Document`]
//!
//! Parsing is lenient: unclosed tags and stray markup are accepted the way
//! `tl` accepts them, and a document `tl` refuses entirely becomes an empty
//! tree. Comments are dropped, tag and attribute names are lower-cased and
//! character references in text and attribute values are decoded here, once.
//!
//! # Flow
//!
//! ```text
//! placeholder-safe HTML
//!         │
//!         ▼ tl::parse()
//! tl::VDom
//!         │
//!         ▼ parse_document()
//! Document
//! ```

use compact_str::CompactString;
use tl::{HTMLTag, NodeHandle, Parser, ParserOptions};
use tracing::warn;

use crate::attr::{Attrs, AttrsExt};
use crate::escape::decode_entities;
use crate::node::{Children, Document, Element, Node, Text};

/// Guard against pathological nesting.
const MAX_DEPTH: usize = 256;

// =============================================================================
// Converter
// =============================================================================

/// Internal state for conversion
struct Converter<'p, 'a> {
    parser: &'p Parser<'a>,
}

impl<'p, 'a> Converter<'p, 'a> {
    fn new(parser: &'p Parser<'a>) -> Self {
        Self { parser }
    }

    /// Convert top-level handles into the synthetic document root
    fn convert_document(&self, top: &[NodeHandle]) -> Document {
        let mut root = Element::new(Document::ROOT_TAG);
        root.children = self.convert_children(top.iter(), 0);
        Document::new(root)
    }

    fn convert_children<'h>(
        &self,
        handles: impl Iterator<Item = &'h NodeHandle>,
        depth: usize,
    ) -> Children {
        let mut children = Children::new();
        for handle in handles {
            self.convert_node(*handle, depth, &mut children);
        }
        children
    }

    /// Convert one tl node into `out`; comments produce nothing
    fn convert_node(&self, handle: NodeHandle, depth: usize, out: &mut Children) {
        match handle.get(self.parser) {
            Some(tl::Node::Tag(tag)) => self.convert_element(tag, depth, out),
            Some(tl::Node::Raw(bytes)) => {
                let raw = bytes.as_utf8_str();
                out.push(Node::Text(Text::new(decode_entities(&raw).into_owned())));
            }
            Some(tl::Node::Comment(_)) | None => {}
        }
    }

    /// Push the element onto `out`. A void element never owns children:
    /// whatever the parser nested under it follows it as a sibling.
    fn convert_element(&self, tag: &HTMLTag<'_>, depth: usize, out: &mut Children) {
        let name = tag_name(tag);
        let void = is_void(&name);
        let mut element = Element::new(name);
        element.attrs = convert_attrs(tag);

        let children = if depth < MAX_DEPTH {
            self.convert_children(tag.children().top().iter(), depth + 1)
        } else {
            Children::new()
        };

        if void {
            out.push(Node::from(element));
            out.extend(children);
        } else {
            element.children = children;
            out.push(Node::from(element));
        }
    }
}

/// Elements that cannot have content.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

fn is_void(name: &str) -> bool {
    VOID_TAGS.contains(&name)
}

/// Lower-cased tag name; `<br/>` is read by tl as `br/`.
fn tag_name(tag: &HTMLTag<'_>) -> CompactString {
    let raw = tag.name().as_utf8_str();
    CompactString::from(raw.trim_end_matches('/').to_lowercase())
}

/// Lower-cased names, decoded values; valueless attributes map to ""
fn convert_attrs(tag: &HTMLTag<'_>) -> Attrs {
    let attributes = tag.attributes();
    let mut attrs = Attrs::new();
    for (name, value) in attributes.iter() {
        let name = name.to_lowercase();
        if name.is_empty() || name == "/" || attrs.has_attr(&name) {
            continue;
        }
        let value = value.map(|v| decode_entities(&v).into_owned()).unwrap_or_default();
        attrs.push((CompactString::from(name), value));
    }

    // `id` and `class` are stored apart from the raw attribute list
    for special in ["id", "class"] {
        if attrs.has_attr(special) {
            continue;
        }
        if let Some(Some(value)) = attributes.get(special) {
            attrs.set_attr(special, decode_entities(&value.as_utf8_str()).into_owned());
        }
    }
    attrs
}

// =============================================================================
// Public API
// =============================================================================

/// Parse HTML into a [`Document`], never failing
pub fn parse_document(html: &str) -> Document {
    match tl::parse(html, ParserOptions::default()) {
        Ok(dom) => Converter::new(dom.parser()).convert_document(dom.children()),
        Err(err) => {
            warn!(error = %err, "HTML could not be parsed, using empty document");
            Document::empty()
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
