//! Per-tag conversion rules.
//!
//! [`convert_element`] maps an element to zero or more output lines by
//! its [`TagKind`]. Rules are grouped by what they produce:
//!
//! - [`text`] - single-line text runs (`p`, `span`, `b`, `i`, `u`)
//! - [`block`] - containers that recurse (`div`, generic tags)
//! - [`heading`] - `h1` through `h6`
//! - [`table`] - rows to fixed-width columns
//! - [`list`] - `ul`, `ol` and stray `li`
//! - [`media`] - `img`
//! - [`layout`] - `br` and `hr`

pub mod block;
pub mod heading;
pub mod layout;
pub mod list;
pub mod media;
pub mod table;
pub mod text;

use tracing::trace;

use crate::config::ConverterConfig;
use crate::escape::escape_preserving;
use crate::family::TagKind;
use crate::node::Element;
use crate::placeholder::Vault;
use crate::report::Report;
use crate::xml::XmlLine;

// =============================================================================
// Context
// =============================================================================

/// State shared by every rule during one conversion.
pub struct Context<'c> {
    pub config: &'c ConverterConfig,
    pub vault: &'c Vault,
    pub report: &'c mut Report,
}

impl<'c> Context<'c> {
    pub fn new(config: &'c ConverterConfig, vault: &'c Vault, report: &'c mut Report) -> Self {
        Self {
            config,
            vault,
            report,
        }
    }

    /// Escape text for output, keeping placeholder tokens intact.
    pub fn escape(&self, text: &str) -> String {
        escape_preserving(text, self.vault.token_spans(text))
    }

    /// Flattened, escaped text of an element.
    pub fn flattened(&self, elem: &Element) -> String {
        self.escape(&elem.flattened_text())
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Convert one element at `indent`.
pub fn convert_element(elem: &Element, indent: usize, cx: &mut Context<'_>) -> Vec<XmlLine> {
    let kind = TagKind::identify(&elem.tag);
    trace!(tag = %elem.tag, kind = kind.name(), "converting element");

    match kind {
        TagKind::Paragraph | TagKind::Span => text::convert_styled(elem, indent, cx),
        TagKind::Bold => text::convert_bold(elem, indent, cx),
        TagKind::Italic => text::convert_italic(elem, indent, cx),
        TagKind::Underline => text::convert_underline(elem, indent, cx),
        TagKind::Div => block::convert_div(elem, indent, cx),
        TagKind::Heading(level) => heading::convert_heading(elem, level, indent, cx),
        TagKind::LineBreak => layout::convert_break(indent),
        TagKind::Rule => layout::convert_rule(indent),
        TagKind::Table => table::convert_table(elem, indent, cx),
        TagKind::List(list) => list::convert_list(elem, list, indent, cx),
        TagKind::ListItem => list::convert_list_item(elem, indent, cx),
        TagKind::Image => media::convert_image(elem, indent, cx),
        TagKind::Generic => block::convert_generic(elem, indent, cx),
    }
}
