//! HTML preview of rendered (Jinja-free) ticket XML.
//!
//! Each `<line>` becomes a `div.line` with one fixed-width `span` per
//! `<text>`; barcodes show as `[Barcode: value]`. Lines and barcodes are
//! shown in document order, so a barcode between two lines previews between
//! them rather than after every line of its ticket. Preview failures render
//! an error `div` instead of failing.

use quick_xml::Reader;
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::{BytesStart, Event};

use crate::config::PreviewConfig;
use crate::escape::{escape_attr, escape_html};
use crate::validate::wellformed::check_xml;

// =============================================================================
// Preview model
// =============================================================================

#[derive(Debug, Default)]
struct PreviewText {
    content: String,
    align: Option<String>,
    length: Option<String>,
    bold: bool,
    underline: bool,
}

#[derive(Debug)]
enum PreviewBlock {
    Line(Vec<PreviewText>),
    Barcode(String),
}

/// Where the reader currently is, relative to `<output><ticket>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Root,
    Ticket,
    Line,
    Text,
    Barcode,
    /// Any element the preview does not render
    Other,
}

fn attr_value(start: &BytesStart<'_>, name: &str) -> Result<Option<String>, String> {
    match start.try_get_attribute(name).map_err(|e| e.to_string())? {
        Some(attr) => attr
            .unescape_value_with(resolve_xml_entity)
            .map(|v| Some(v.into_owned()))
            .map_err(|e| e.to_string()),
        None => Ok(None),
    }
}

fn text_from(start: &BytesStart<'_>) -> Result<PreviewText, String> {
    Ok(PreviewText {
        content: String::new(),
        align: attr_value(start, "align")?,
        length: attr_value(start, "length")?,
        bold: attr_value(start, "bold")?.as_deref() == Some("true"),
        underline: attr_value(start, "underline")?.as_deref() == Some("true"),
    })
}

/// Collect the lines and barcodes of every `<ticket>` under the root.
fn collect_blocks(xml: &str) -> Result<Vec<PreviewBlock>, String> {
    check_xml(xml).map_err(|e| e.to_string())?;

    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Scope> = Vec::new();
    let mut blocks = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| e.to_string())?;
        match event {
            Event::Start(start) => {
                let parent = stack.last().copied();
                let name = start.name();
                let scope = match (parent, name.as_ref()) {
                    (None, _) => Scope::Root,
                    (Some(Scope::Root), b"ticket") => Scope::Ticket,
                    (Some(Scope::Ticket), b"line") => {
                        blocks.push(PreviewBlock::Line(Vec::new()));
                        Scope::Line
                    }
                    (Some(Scope::Ticket), b"barcode") => {
                        blocks.push(PreviewBlock::Barcode(String::new()));
                        Scope::Barcode
                    }
                    (Some(Scope::Line), b"text") => {
                        if let Some(PreviewBlock::Line(texts)) = blocks.last_mut() {
                            texts.push(text_from(&start)?);
                        }
                        Scope::Text
                    }
                    _ => Scope::Other,
                };
                stack.push(scope);
            }
            Event::Empty(start) => match (stack.last(), start.name().as_ref()) {
                (Some(Scope::Ticket), b"line") => blocks.push(PreviewBlock::Line(Vec::new())),
                (Some(Scope::Ticket), b"barcode") => blocks.push(PreviewBlock::Barcode(String::new())),
                (Some(Scope::Line), b"text") => {
                    let text = text_from(&start)?;
                    if let Some(PreviewBlock::Line(texts)) = blocks.last_mut() {
                        texts.push(text);
                    }
                }
                _ => {}
            },
            Event::Text(raw) => {
                let content = raw.unescape_with(resolve_xml_entity).map_err(|e| e.to_string())?;
                match (stack.last(), blocks.last_mut()) {
                    (Some(Scope::Text), Some(PreviewBlock::Line(texts))) => {
                        if let Some(text) = texts.last_mut() {
                            text.content.push_str(&content);
                        }
                    }
                    (Some(Scope::Barcode), Some(PreviewBlock::Barcode(value))) => {
                        value.push_str(&content);
                    }
                    _ => {}
                }
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(blocks)
}

// =============================================================================
// HTML output
// =============================================================================

fn parse_length(text: &PreviewText, default: usize) -> Result<usize, String> {
    match text.length.as_deref() {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| format!("invalid length '{value}'")),
    }
}

/// Cut to `length - 1` characters plus an ellipsis when too long.
fn fit(content: &str, length: usize) -> String {
    if content.chars().count() > length {
        let mut cut: String = content.chars().take(length.saturating_sub(1)).collect();
        cut.push('…');
        cut
    } else {
        content.to_string()
    }
}

fn render_line(texts: &[PreviewText], config: &PreviewConfig, out: &mut String) -> Result<(), String> {
    let width = config.line_width.max(1);
    let lengths = texts
        .iter()
        .map(|t| parse_length(t, width))
        .collect::<Result<Vec<_>, _>>()?;
    let total: usize = lengths.iter().sum();

    let (overflow_style, overflow_title) = if total > width && texts.len() > 1 {
        (
            "border-left: 3px solid red; padding-left: 3px;".to_string(),
            format!(r#" title="Line exceeds {width} chars ({total})""#),
        )
    } else {
        (String::new(), String::new())
    };

    out.push_str(&format!(
        r#"<div class="line" style="margin-bottom: 2px; white-space: nowrap; overflow: hidden; max-width: {}px;{overflow_style}"{overflow_title}>"#,
        config.pixel_width
    ));
    for (text, &length) in texts.iter().zip(&lengths) {
        let align = text.align.as_deref().unwrap_or("left");
        let percent = length as f64 / width as f64 * 100.0;
        let bold = if text.bold { "font-weight:bold;" } else { "" };
        let underline = if text.underline { "text-decoration:underline;" } else { "" };
        out.push_str(&format!(
            "<span style='display:inline-block;width:{percent:.2}%;text-align:{};overflow:hidden;text-overflow:ellipsis;white-space:nowrap;{bold}{underline}'>{}</span>",
            escape_attr(align),
            escape_html(&fit(&text.content, length)),
        ));
    }
    out.push_str("</div>");
    Ok(())
}

fn render_blocks(blocks: &[PreviewBlock], config: &PreviewConfig) -> Result<String, String> {
    let mut out = format!(
        r#"<div class="xml-preview" style="font-family: 'Courier New', monospace; font-size: 12px; line-height: 1.4; width: {0}px; max-width: {0}px; overflow: hidden; margin: auto; border: 1px dashed #ccc; padding: 8px; background: #fff; box-sizing: content-box;">"#,
        config.pixel_width
    );
    for block in blocks {
        match block {
            PreviewBlock::Line(texts) => render_line(texts, config, &mut out)?,
            PreviewBlock::Barcode(value) => out.push_str(&format!(
                r#"<div class="line" style="text-align:center; margin: 8px 0;"><div style="font-size:10px;">[Barcode: {}]</div></div>"#,
                escape_html(value)
            )),
        }
    }
    out.push_str("</div>");
    Ok(out)
}

/// Render ticket XML to an HTML preview.
pub fn render_preview(xml: &str, config: &PreviewConfig) -> String {
    match collect_blocks(xml).and_then(|blocks| render_blocks(&blocks, config)) {
        Ok(html) => html,
        Err(err) => format!(
            "<div style='color: red;'>Error rendering XML: {}</div>",
            escape_html(&err)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preview(xml: &str) -> String {
        render_preview(xml, &PreviewConfig::default())
    }

    #[test]
    fn test_line_spans() {
        let html = preview(
            r#"<output><ticket><line><text align="center" length="21" bold="true">A &amp; B</text><text length="21" underline="true">x</text></line></ticket></output>"#,
        );
        assert!(html.contains("width: 336px"));
        assert!(html.contains("width:50.00%;text-align:center;"));
        assert!(html.contains("font-weight:bold;'>A &amp; B</span>"));
        assert!(html.contains("text-align:left;"));
        assert!(html.contains("text-decoration:underline;'>x</span>"));
        assert!(!html.contains("solid red"));
    }

    #[test]
    fn test_overflow_flagged() {
        let html = preview(
            r#"<output><ticket><line><text length="30">a</text><text length="20">b</text></line></ticket></output>"#,
        );
        assert!(html.contains("border-left: 3px solid red"));
        assert!(html.contains(r#"title="Line exceeds 42 chars (50)""#));
    }

    #[test]
    fn test_content_cut_with_ellipsis() {
        let html = preview(r#"<output><ticket><line><text length="4">Espresso</text></line></ticket></output>"#);
        assert!(html.contains(">Esp…</span>"));
    }

    #[test]
    fn test_barcode() {
        let html = preview(r#"<output><ticket><barcode type="EAN13">590123412345</barcode></ticket></output>"#);
        assert!(html.contains("[Barcode: 590123412345]"));
    }

    #[test]
    fn test_blocks_in_document_order() {
        let html = preview(
            r#"<output><ticket><line><text>top</text></line><barcode type="CODE128">42</barcode><line><text>bottom</text></line></ticket></output>"#,
        );
        let top = html.find(">top<").unwrap();
        let barcode = html.find("[Barcode: 42]").unwrap();
        let bottom = html.find(">bottom<").unwrap();
        assert!(top < barcode && barcode < bottom);
    }

    #[test]
    fn test_errors_render_div() {
        let html = preview("<output><ticket></output>");
        assert!(html.starts_with("<div style='color: red;'>Error rendering XML: "));

        let html = preview(r#"<output><ticket><line><text length="wide">x</text></line></ticket></output>"#);
        assert!(html.contains("invalid length 'wide'"));
    }
}
