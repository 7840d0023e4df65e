//! Spacing rules: `br` and `hr`.

use crate::xml::XmlLine;

/// Helper call printing a blank line.
pub const BLANK_LINE: &str = "{{ blank_line() }}";

/// Helper call printing a full-width `-` rule.
pub const SEPARATOR: &str = r#"{{ separator("-") }}"#;

/// Helper call printing a full-width `=` rule.
pub const DOUBLE_SEPARATOR: &str = r#"{{ separator("=") }}"#;

pub fn convert_break(indent: usize) -> Vec<XmlLine> {
    vec![XmlLine::helper(indent, BLANK_LINE)]
}

pub fn convert_rule(indent: usize) -> Vec<XmlLine> {
    vec![XmlLine::helper(indent, SEPARATOR)]
}
