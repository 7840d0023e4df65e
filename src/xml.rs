//! Output XML model: converted lines and the ticket envelope.
//!
//! Content stored in [`TextItem`] is already escaped (tokens copied
//! verbatim), so rendering is plain string assembly.

use smallvec::SmallVec;

use crate::attr::{Align, Presentation};

// =============================================================================
// LineItem
// =============================================================================

/// A `<text>` element inside a `<line>`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextItem {
    /// Escaped content
    pub content: String,
    pub align: Option<Align>,
    /// Column width in characters
    pub length: Option<usize>,
    pub bold: bool,
    pub underline: bool,
}

impl TextItem {
    /// Create a text item without attributes.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Apply resolved presentation hints.
    pub fn with_presentation(mut self, presentation: Presentation) -> Self {
        self.align = presentation.align;
        self.bold = presentation.bold;
        self.underline = presentation.underline;
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Attributes render in the order `align`, `length`, `bold`, `underline`.
    fn render(&self, out: &mut String) {
        out.push_str("<text");
        if let Some(align) = self.align {
            out.push_str(" align=\"");
            out.push_str(align.as_str());
            out.push('"');
        }
        if let Some(length) = self.length {
            out.push_str(&format!(" length=\"{length}\""));
        }
        if self.bold {
            out.push_str(" bold=\"true\"");
        }
        if self.underline {
            out.push_str(" underline=\"true\"");
        }
        out.push('>');
        out.push_str(&self.content);
        out.push_str("</text>");
    }
}

/// One element inside a `<line>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineItem {
    Text(TextItem),
    /// `<image>` with escaped content
    Image(String),
}

impl LineItem {
    fn render(&self, out: &mut String) {
        match self {
            Self::Text(text) => text.render(out),
            Self::Image(content) => {
                out.push_str("<image>");
                out.push_str(content);
                out.push_str("</image>");
            }
        }
    }
}

// =============================================================================
// XmlLine
// =============================================================================

/// What an output line holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlLineKind {
    /// Structural `<!-- ... -->` annotation
    Comment(String),
    /// `<line>` with its items, separated by single spaces
    Line(SmallVec<[LineItem; 4]>),
}

/// One indented output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlLine {
    pub indent: usize,
    pub kind: XmlLineKind,
}

impl XmlLine {
    /// A structural comment. `--` is not allowed inside XML comments and is
    /// broken up.
    pub fn comment(indent: usize, text: impl Into<String>) -> Self {
        let mut text = text.into();
        while text.contains("--") {
            text = text.replace("--", "- -");
        }
        Self {
            indent,
            kind: XmlLineKind::Comment(text),
        }
    }

    /// A line holding a single text item.
    pub fn text(indent: usize, item: TextItem) -> Self {
        Self::items(indent, [LineItem::Text(item)])
    }

    /// A line holding the given items.
    pub fn items(indent: usize, items: impl IntoIterator<Item = LineItem>) -> Self {
        Self {
            indent,
            kind: XmlLineKind::Line(items.into_iter().collect()),
        }
    }

    /// A line holding one image item.
    pub fn image(indent: usize, content: impl Into<String>) -> Self {
        Self::items(indent, [LineItem::Image(content.into())])
    }

    /// A line whose only text is a helper call such as `{{ blank_line() }}`.
    pub fn helper(indent: usize, call: &str) -> Self {
        Self::text(indent, TextItem::new(call))
    }

    /// Text items of this line (empty for comments).
    pub fn text_items(&self) -> impl Iterator<Item = &TextItem> {
        let items: &[LineItem] = match &self.kind {
            XmlLineKind::Line(items) => items,
            XmlLineKind::Comment(_) => &[],
        };
        items.iter().filter_map(|item| match item {
            LineItem::Text(text) => Some(text),
            LineItem::Image(_) => None,
        })
    }

    /// Render with indent, without a trailing newline.
    pub fn render(&self) -> String {
        let mut out = " ".repeat(self.indent);
        match &self.kind {
            XmlLineKind::Comment(text) => {
                out.push_str("<!-- ");
                out.push_str(text);
                out.push_str(" -->");
            }
            XmlLineKind::Line(items) => {
                out.push_str("<line>");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    item.render(&mut out);
                }
                out.push_str("</line>");
            }
        }
        out
    }
}

// =============================================================================
// Envelope
// =============================================================================

/// XML declaration opening every ticket template.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Wrap converted lines in `<output><ticket>`, joined by `\n`.
pub fn assemble(lines: &[XmlLine]) -> String {
    let mut parts = Vec::with_capacity(lines.len() + 5);
    parts.push(XML_DECLARATION.to_string());
    parts.push("<output>".to_string());
    parts.push("  <ticket>".to_string());
    parts.extend(lines.iter().map(XmlLine::render));
    parts.push("  </ticket>".to_string());
    parts.push("</output>".to_string());
    parts.join("\n")
}
