//! Pass 1: XML well-formedness with templating stripped.

use std::sync::LazyLock;

use quick_xml::Reader;
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::Event;
use regex::Regex;

use crate::report::Report;

/// Stand-in for every `{{ ... }}` expression.
pub const EXPRESSION_MARKER: &str = "JINJA_VAR";

static EXPRESSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[^}]+\}\}").expect("expression pattern"));
static STATEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{%[^%]+%\}").expect("statement pattern"));
static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{#[^#]+#\}").expect("comment pattern"));

/// Replace expressions with [`EXPRESSION_MARKER`], delete statements and comments.
pub fn strip_templating(template: &str) -> String {
    let stripped = EXPRESSION.replace_all(template, EXPRESSION_MARKER);
    let stripped = STATEMENT.replace_all(&stripped, "");
    COMMENT.replace_all(&stripped, "").into_owned()
}

/// A well-formedness violation with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlSyntaxError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for XmlSyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: line {}, column {}", self.message, self.line, self.column)
    }
}

impl XmlSyntaxError {
    fn at(xml: &str, offset: usize, message: impl Into<String>) -> Self {
        let offset = offset.min(xml.len());
        let before = xml.get(..offset).unwrap_or(xml);
        let line = before.matches('\n').count() + 1;
        let column = before.rfind('\n').map_or(before.len(), |nl| before.len() - nl - 1);
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

/// Check that `xml` is one well-formed document: a single root element,
/// balanced tags, legal entities and attributes, no text outside the root.
pub fn check_xml(xml: &str) -> Result<(), XmlSyntaxError> {
    let mut reader = Reader::from_str(xml);
    let mut depth = 0usize;
    let mut roots = 0usize;

    loop {
        let offset = reader.buffer_position() as usize;
        let event = reader
            .read_event()
            .map_err(|e| XmlSyntaxError::at(xml, reader.error_position() as usize, e.to_string()))?;

        match event {
            Event::Start(start) | Event::Empty(start) if depth == 0 && roots > 0 => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                return Err(XmlSyntaxError::at(
                    xml,
                    offset,
                    format!("junk after document element <{name}>"),
                ));
            }
            Event::Start(start) => {
                check_attributes(xml, offset, &start)?;
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
            }
            Event::Empty(start) => {
                check_attributes(xml, offset, &start)?;
                if depth == 0 {
                    roots += 1;
                }
            }
            Event::End(_) => {
                if depth == 0 {
                    return Err(XmlSyntaxError::at(xml, offset, "unexpected closing tag"));
                }
                depth -= 1;
            }
            Event::Text(text) => {
                let content = text
                    .unescape_with(resolve_xml_entity)
                    .map_err(|e| XmlSyntaxError::at(xml, offset, e.to_string()))?;
                if depth == 0 && !content.trim().is_empty() {
                    return Err(XmlSyntaxError::at(xml, offset, "text outside the document element"));
                }
            }
            Event::CData(_) if depth == 0 => {
                return Err(XmlSyntaxError::at(xml, offset, "CDATA outside the document element"));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth > 0 {
        return Err(XmlSyntaxError::at(xml, xml.len(), "unclosed token"));
    }
    if roots == 0 {
        return Err(XmlSyntaxError::at(xml, xml.len(), "no element found"));
    }
    Ok(())
}

fn check_attributes(
    xml: &str,
    offset: usize,
    start: &quick_xml::events::BytesStart<'_>,
) -> Result<(), XmlSyntaxError> {
    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlSyntaxError::at(xml, offset, e.to_string()))?;
        attr.unescape_value_with(resolve_xml_entity)
            .map_err(|e| XmlSyntaxError::at(xml, offset, e.to_string()))?;
    }
    Ok(())
}

pub(crate) fn check(template: &str, report: &mut Report) {
    match check_xml(&strip_templating(template)) {
        Ok(()) => report.info("XML structure is well-formed"),
        Err(err) => report.error(format!("XML Parse Error: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_templating() {
        let stripped = strip_templating("<a>{% if x %}{{ doc.name }}{# note #}{% endif %}</a>");
        assert_eq!(stripped, "<a>JINJA_VAR</a>");
    }

    #[test]
    fn test_well_formed() {
        assert!(check_xml("<?xml version=\"1.0\"?>\n<output><ticket/></output>\n").is_ok());
        assert!(check_xml("<a x=\"1 &amp; 2\">&lt;b&gt;</a>").is_ok());
        assert!(check_xml("<!-- c --><a/>").is_ok());
    }

    #[test]
    fn test_malformed() {
        assert!(check_xml("<a><b></a>").is_err());
        assert!(check_xml("<a>").is_err());
        assert!(check_xml("<a/><b/>").is_err());
        assert!(check_xml("<a>fish & chips</a>").is_err());
        assert!(check_xml("<a>&nbsp;</a>").is_err());
        assert!(check_xml(r#"<a b="&copy;"/>"#).is_err());
        assert!(check_xml("<a>&amp;&lt;&#169;&#xA9;</a>").is_ok());
        assert!(check_xml("text<a/>").is_err());
        assert!(check_xml("").is_err());
    }

    #[test]
    fn test_error_location() {
        let err = check_xml("<a>\n  <b>\n</a>").unwrap_err();
        assert_eq!(err.line, 3);
    }

    #[test]
    fn test_pass_messages() {
        let mut report = Report::new();
        check("<output><ticket>{{ x }}</ticket></output>", &mut report);
        assert_eq!(report.info, ["XML structure is well-formed"]);

        let mut report = Report::new();
        check("<output><ticket></output>", &mut report);
        assert!(report.errors[0].starts_with("XML Parse Error: "));
    }
}
