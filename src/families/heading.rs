//! Heading rule: `<h1>` through `<h6>`.

use crate::attr::Align;
use crate::node::Element;
use crate::xml::{TextItem, XmlLine};

use super::Context;
use super::layout::DOUBLE_SEPARATOR;

/// Deepest heading level followed by a `=` separator.
const UNDERLINED_LEVELS: u8 = 2;

/// Centered bold line, plus a `=` separator for `h1` and `h2`.
pub fn convert_heading(elem: &Element, level: u8, indent: usize, cx: &mut Context<'_>) -> Vec<XmlLine> {
    let content = cx.flattened(elem);
    if content.trim().is_empty() {
        return Vec::new();
    }

    let mut lines = vec![XmlLine::text(
        indent,
        TextItem::new(content).with_align(Align::Center).bold(),
    )];
    if level <= UNDERLINED_LEVELS {
        lines.push(XmlLine::helper(indent, DOUBLE_SEPARATOR));
    }
    lines
}
