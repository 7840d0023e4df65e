//! Containers: `div` and every tag without a dedicated rule.
//!
//! Both recurse instead of flattening. Element children are dispatched at
//! the same indent; non-blank text children become their own line.

use crate::attr::{Align, resolve_alignment};
use crate::node::{Element, Node};
use crate::xml::{TextItem, XmlLine};

use super::{Context, convert_element};

fn convert_children(
    elem: &Element,
    indent: usize,
    align: Option<Align>,
    cx: &mut Context<'_>,
) -> Vec<XmlLine> {
    let mut lines = Vec::new();
    for child in &elem.children {
        match child {
            Node::Element(child) => lines.extend(convert_element(child, indent, cx)),
            Node::Text(text) => {
                let trimmed = text.trimmed();
                if trimmed.is_empty() {
                    continue;
                }
                let mut item = TextItem::new(cx.escape(trimmed));
                item.align = align;
                lines.push(XmlLine::text(indent, item));
            }
        }
    }
    lines
}

/// `div`: text children inherit only the div's alignment.
pub fn convert_div(elem: &Element, indent: usize, cx: &mut Context<'_>) -> Vec<XmlLine> {
    let align = resolve_alignment(elem);
    if let Some(align) = align {
        cx.report.info(format!("Found div with alignment: {align}"));
    }
    convert_children(elem, indent, align, cx)
}

/// Any unrecognised tag.
pub fn convert_generic(elem: &Element, indent: usize, cx: &mut Context<'_>) -> Vec<XmlLine> {
    convert_children(elem, indent, None, cx)
}
