//! Single-line text runs: `p`, `span`, `b`/`strong`, `i`/`em`, `u`.
//!
//! Each rule flattens the element's text into one `<text>`; blank elements
//! produce nothing.

use crate::attr::resolve_presentation;
use crate::node::Element;
use crate::xml::{TextItem, XmlLine};

use super::Context;

/// Recorded each time italic markup is downgraded.
pub const ITALIC_WARNING: &str =
    "Italic text detected - thermal printers don't support italic, using regular text";

/// Flattened text as one item, or `None` when blank.
fn text_item(elem: &Element, cx: &Context<'_>) -> Option<TextItem> {
    let content = cx.flattened(elem);
    if content.trim().is_empty() {
        None
    } else {
        Some(TextItem::new(content))
    }
}

/// `p` and `span`: presentation from style, class and `align`.
pub fn convert_styled(elem: &Element, indent: usize, cx: &mut Context<'_>) -> Vec<XmlLine> {
    text_item(elem, cx)
        .map(|item| XmlLine::text(indent, item.with_presentation(resolve_presentation(elem))))
        .into_iter()
        .collect()
}

pub fn convert_bold(elem: &Element, indent: usize, cx: &mut Context<'_>) -> Vec<XmlLine> {
    text_item(elem, cx)
        .map(|item| XmlLine::text(indent, item.bold()))
        .into_iter()
        .collect()
}

/// Italics cannot be printed; the text is kept plain and a warning recorded.
pub fn convert_italic(elem: &Element, indent: usize, cx: &mut Context<'_>) -> Vec<XmlLine> {
    let Some(item) = text_item(elem, cx) else {
        return Vec::new();
    };
    cx.report.warn(ITALIC_WARNING);
    vec![XmlLine::text(indent, item)]
}

pub fn convert_underline(elem: &Element, indent: usize, cx: &mut Context<'_>) -> Vec<XmlLine> {
    text_item(elem, cx)
        .map(|item| XmlLine::text(indent, item.underline()))
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::families::testing::convert_html;

    #[test]
    fn test_paragraph_with_expression() {
        let (lines, report) = convert_html("<p>Hello {{ doc.name }}</p>");
        assert_eq!(lines, ["<line><text>Hello {{ doc.name }}</text></line>"]);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_text_escaped_around_tokens() {
        let (lines, _) = convert_html("<p>Fish &amp; Chips <b>{{ doc.x }}</b> &lt;3</p>");
        assert_eq!(lines, ["<line><text>Fish &amp; Chips {{ doc.x }} &lt;3</text></line>"]);
    }

    #[test]
    fn test_expression_with_specials_is_verbatim() {
        let (lines, _) = convert_html(r#"<p>{{ doc.a > 1 and "x" }}</p>"#);
        assert_eq!(lines, [r#"<line><text>{{ doc.a > 1 and "x" }}</text></line>"#]);
    }

    #[test]
    fn test_presentation_attributes() {
        let (lines, _) =
            convert_html(r#"<p style="text-align:right" class="text-center bold">Total</p>"#);
        assert_eq!(lines, [r#"<line><text align="right" bold="true">Total</text></line>"#]);
    }

    #[test]
    fn test_blank_paragraph_skipped() {
        let (lines, _) = convert_html("<p>  </p><span>\n</span>");
        assert!(lines.is_empty());
    }

    #[test]
    fn test_inline_styles() {
        let (lines, report) = convert_html("<b>B</b><strong>S</strong><u>U</u><i>I</i><em>E</em>");
        assert_eq!(
            lines,
            [
                r#"<line><text bold="true">B</text></line>"#,
                r#"<line><text bold="true">S</text></line>"#,
                r#"<line><text underline="true">U</text></line>"#,
                "<line><text>I</text></line>",
                "<line><text>E</text></line>",
            ]
        );
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(report.warnings[0], super::ITALIC_WARNING);
    }
}
