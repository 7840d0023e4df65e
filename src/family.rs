//! Tag kinds and tag identification
//!
//! Each element is classified once by its lower-cased tag name. The set of
//! kinds is closed; anything unrecognised is [`TagKind::Generic`].

// =============================================================================
// ListKind
// =============================================================================

/// `ol` vs `ul`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    /// Item prefix for the 1-based `index`.
    pub fn prefix(self, index: usize) -> String {
        match self {
            Self::Ordered => format!("{index}. "),
            Self::Unordered => BULLET.to_string(),
        }
    }
}

/// Prefix of unordered and standalone list items.
pub const BULLET: &str = "• ";

// =============================================================================
// TagKind
// =============================================================================

/// Conversion rule selected for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// `<p>`
    Paragraph,
    /// `<span>`
    Span,
    /// `<div>`
    Div,
    /// `<h1>` through `<h6>`, with the level
    Heading(u8),
    /// `<b>`, `<strong>`
    Bold,
    /// `<i>`, `<em>`
    Italic,
    /// `<u>`
    Underline,
    /// `<br>`
    LineBreak,
    /// `<hr>`
    Rule,
    /// `<table>`
    Table,
    /// `<ul>`, `<ol>`
    List(ListKind),
    /// `<li>` reached outside a list
    ListItem,
    /// `<img>`
    Image,
    /// Everything else
    Generic,
}

impl TagKind {
    /// Identify the kind of a lower-cased tag name.
    pub fn identify(tag: &str) -> Self {
        match tag {
            "p" => Self::Paragraph,
            "span" => Self::Span,
            "div" => Self::Div,
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Self::Heading(heading_level(tag)),
            "b" | "strong" => Self::Bold,
            "i" | "em" => Self::Italic,
            "u" => Self::Underline,
            "br" => Self::LineBreak,
            "hr" => Self::Rule,
            "table" => Self::Table,
            "ul" => Self::List(ListKind::Unordered),
            "ol" => Self::List(ListKind::Ordered),
            "li" => Self::ListItem,
            "img" => Self::Image,
            _ => Self::Generic,
        }
    }

    /// Kind name, used in trace output.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Span => "span",
            Self::Div => "div",
            Self::Heading(_) => "heading",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::LineBreak => "line-break",
            Self::Rule => "rule",
            Self::Table => "table",
            Self::List(_) => "list",
            Self::ListItem => "list-item",
            Self::Image => "image",
            Self::Generic => "generic",
        }
    }
}

/// Parse level from tag name: "h1" → 1
fn heading_level(tag: &str) -> u8 {
    tag.chars()
        .last()
        .and_then(|c| c.to_digit(10))
        .map_or(1, |d| d as u8)
}
