//! Table rule: one `<line>` per row, cells as fixed-width columns.
//!
//! The column width is the line budget divided by the row's cell count.
//! Truncation is left to the `truncate` helper at render time.

use crate::attr::Align;
use crate::node::Element;
use crate::xml::{LineItem, TextItem, XmlLine};

use super::Context;
use super::layout::SEPARATOR;

/// Alignment by position: first left, last right, interior center.
///
/// A single-cell row is left aligned, the first-cell rule wins.
pub fn cell_alignment(index: usize, count: usize) -> Align {
    if index == 0 {
        Align::Left
    } else if index + 1 == count {
        Align::Right
    } else {
        Align::Center
    }
}

/// Width of each column for a row of `cells` cells.
pub fn column_width(line_width: usize, cells: usize) -> usize {
    line_width / cells.max(1)
}

pub fn convert_table(elem: &Element, indent: usize, cx: &mut Context<'_>) -> Vec<XmlLine> {
    let mut lines = vec![XmlLine::comment(indent, "Table converted to lines")];

    let rows = elem.find_all(&["tr"]);
    for (row_index, row) in rows.iter().enumerate() {
        let cells = row.find_all(&["td", "th"]);
        if cells.is_empty() {
            continue;
        }

        let width = column_width(cx.config.line_width, cells.len());
        let items = cells.iter().enumerate().map(|(cell_index, cell)| {
            let content = format!("{{{{ truncate({}, {width}) }}}}", cx.flattened(cell));
            let mut item = TextItem::new(content)
                .with_align(cell_alignment(cell_index, cells.len()))
                .with_length(width);
            item.bold = cell.tag == "th" || row_index == 0;
            LineItem::Text(item)
        });
        lines.push(XmlLine::items(indent, items));
    }

    lines.push(XmlLine::helper(indent, SEPARATOR));
    cx.report.info(format!("Converted table with {} rows", rows.len()));
    lines
}
