//! Attribute system and presentation resolution.
//!
//! - `Attrs`: ordered key-value pairs as parsed from markup
//! - `Presentation`: the `align`/`bold`/`underline` hints a thermal `<text>`
//!   element can carry, derived from `style`, `class` and legacy `align`

use compact_str::CompactString;

use crate::node::Element;

/// Element attributes as simple key-value pairs
pub type Attrs = Vec<(CompactString, String)>;

/// Extension trait for attribute operations on Attrs
pub trait AttrsExt {
    /// Get an attribute value by name
    fn get_attr(&self, name: &str) -> Option<&str>;

    /// Check if an attribute exists
    fn has_attr(&self, name: &str) -> bool;

    /// Set an attribute value (insert or update)
    fn set_attr(&mut self, name: impl Into<CompactString>, value: impl Into<String>);
}

impl AttrsExt for Attrs {
    fn get_attr(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn has_attr(&self, name: &str) -> bool {
        self.iter().any(|(k, _)| k == name)
    }

    fn set_attr(&mut self, name: impl Into<CompactString>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(attr) = self.iter_mut().find(|(k, _)| *k == name) {
            attr.1 = value;
        } else {
            self.push((name, value));
        }
    }
}

// =============================================================================
// Align
// =============================================================================

/// Horizontal alignment of a printed text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    /// Attribute value as written in the XML dialect.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }

    /// Parse an exact attribute value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

impl std::fmt::Display for Align {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Presentation
// =============================================================================

/// Presentation hints resolved for one element.
///
/// Absent signals stay `None`/`false` and render no attribute at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presentation {
    pub align: Option<Align>,
    pub bold: bool,
    pub underline: bool,
}

/// Strip whitespace so `text-align: center` and `text-align:center` match alike.
fn compact_style(elem: &Element) -> String {
    elem.style().chars().filter(|c| !c.is_whitespace()).collect()
}

/// Resolve alignment, first match wins: inline style, then class names,
/// then the legacy `align` attribute.
pub fn resolve_alignment(elem: &Element) -> Option<Align> {
    let style = compact_style(elem);
    if style.contains("text-align:center") {
        return Some(Align::Center);
    } else if style.contains("text-align:right") {
        return Some(Align::Right);
    } else if style.contains("text-align:left") {
        return Some(Align::Left);
    }

    let classes = elem.classes();
    if classes.contains("text-center") || classes.contains("center") {
        return Some(Align::Center);
    } else if classes.contains("text-right") || classes.contains("right") {
        return Some(Align::Right);
    } else if classes.contains("text-left") || classes.contains("left") {
        return Some(Align::Left);
    }

    elem.get_attr("align")
        .map(str::to_lowercase)
        .and_then(|value| Align::parse(&value))
}

/// Resolve all presentation hints of an element.
pub fn resolve_presentation(elem: &Element) -> Presentation {
    let style = compact_style(elem);
    let classes = elem.classes();

    Presentation {
        align: resolve_alignment(elem),
        bold: style.contains("font-weight:bold") || classes.contains("bold"),
        underline: style.contains("text-decoration:underline") || classes.contains("underline"),
    }
}

// =============================================================================
// Tests
// =============================================================================
