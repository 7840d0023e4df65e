//! List rules: `ul`, `ol` and `li` found outside a list.
//!
//! Only direct `li` children are enumerated; nested lists end up flattened
//! into their parent item's text.

use crate::family::{BULLET, ListKind};
use crate::node::Element;
use crate::xml::{TextItem, XmlLine};

use super::Context;

pub fn convert_list(elem: &Element, kind: ListKind, indent: usize, cx: &mut Context<'_>) -> Vec<XmlLine> {
    elem.children_named("li")
        .enumerate()
        .map(|(i, item)| {
            let content = format!("{}{}", kind.prefix(i + 1), cx.flattened(item));
            XmlLine::text(indent, TextItem::new(content))
        })
        .collect()
}

/// A stray `li` always gets a bullet, whatever list it came from.
pub fn convert_list_item(elem: &Element, indent: usize, cx: &mut Context<'_>) -> Vec<XmlLine> {
    let content = format!("{BULLET}{}", cx.flattened(elem));
    vec![XmlLine::text(indent, TextItem::new(content))]
}
