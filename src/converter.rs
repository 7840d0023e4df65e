//! HTML/Jinja to thermal XML conversion.
//!
//! # Flow
//!
//! ```text
//! raw HTML + Jinja
//!         │
//!         ▼ Vault::extract()
//! placeholder-safe HTML
//!         │
//!         ▼ parse_document()
//! Document ──▶ body() ──▶ convert_element() per child
//!         │
//!         ▼ assemble() + Vault::restore()
//! XML template
//! ```
//!
//! Conversion never fails on malformed markup; oddities are recorded as
//! warnings in the returned [`Conversion`].

use serde::Serialize;
use tracing::{debug, info};

use crate::config::ConverterConfig;
use crate::convert::parse_document;
use crate::families::{Context, convert_element};
use crate::placeholder::Vault;
use crate::report::Report;
use crate::xml::assemble;

/// Info line appended when no warning was recorded.
pub const SUCCESS_NOTE: &str = "Conversion completed successfully";

// =============================================================================
// Conversion
// =============================================================================

/// Result of converting one template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversion {
    pub xml_template: String,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl Conversion {
    fn from_report(xml_template: String, report: Report) -> Self {
        Self {
            xml_template,
            warnings: report.warnings,
            info: report.info,
        }
    }
}

// =============================================================================
// HtmlToXmlConverter
// =============================================================================

/// Converter from print-format HTML to the thermal XML dialect.
#[derive(Debug, Clone, Default)]
pub struct HtmlToXmlConverter {
    config: ConverterConfig,
    doc_type: Option<String>,
}

impl HtmlToXmlConverter {
    pub fn new(config: ConverterConfig) -> Self {
        Self {
            config,
            doc_type: None,
        }
    }

    /// Document type the template is printed for, used only for tracing.
    pub fn with_doc_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert `html` with a fresh report.
    pub fn convert(&self, html: &str) -> Conversion {
        self.convert_with_report(html, Report::new())
    }

    /// Convert `html`, appending to findings already in `report`.
    pub fn convert_with_report(&self, html: &str, mut report: Report) -> Conversion {
        let xml = self.convert_into(html, &mut report);
        Conversion::from_report(xml, report)
    }

    fn convert_into(&self, html: &str, report: &mut Report) -> String {
        let mut vault = Vault::new(&self.config.token, html);
        let safe = vault.extract(html);
        debug!(blocks = vault.len(), prefix = %vault.shape().prefix, "templating extracted");

        let doc = parse_document(&safe);
        let body = doc.body();

        let mut lines = Vec::new();
        {
            let mut cx = Context::new(&self.config, &vault, report);
            for child in body.children_elements() {
                lines.extend(convert_element(child, self.config.indent, &mut cx));
            }
        }

        let xml = vault.restore(&assemble(&lines));

        if !report.has_warnings() {
            report.info(SUCCESS_NOTE);
        }
        report.info(format!("Total Jinja blocks preserved: {}", vault.len()));
        info!(
            doc_type = self.doc_type.as_deref().unwrap_or("-"),
            lines = lines.len(),
            warnings = report.warnings.len(),
            "converted template"
        );
        xml
    }
}

/// Convert `html` with the standard configuration.
pub fn convert_html(html: &str) -> Conversion {
    HtmlToXmlConverter::default().convert(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TokenShape;

    #[test]
    fn test_envelope_and_notes() {
        let out = convert_html("<h2>Total</h2>");
        assert_eq!(
            out.xml_template,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<output>\n  <ticket>\n    \
             <line><text align=\"center\" bold=\"true\">Total</text></line>\n    \
             <line><text>{{ separator(\"=\") }}</text></line>\n  </ticket>\n</output>"
        );
        assert_eq!(out.info, [SUCCESS_NOTE, "Total Jinja blocks preserved: 0"]);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_no_success_note_with_warnings() {
        let out = convert_html("<p><i>slanted</i></p><em>x</em>");
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.info, ["Total Jinja blocks preserved: 0"]);
    }

    #[test]
    fn test_body_root_and_bare_text_ignored() {
        let out = convert_html("<html><body>loose text<p>kept</p></body></html>");
        assert!(out.xml_template.contains("<line><text>kept</text></line>"));
        assert!(!out.xml_template.contains("loose"));
    }

    #[test]
    fn test_every_fragment_restored() {
        let html = "{# header #}<p>{{ doc.a }}</p>{% if doc.b %}<p>{{ doc.a }}</p>{% endif %}";
        let out = convert_html(html);
        assert!(!out.xml_template.contains("___JINJA_BLOCK_"));
        assert_eq!(out.xml_template.matches("{{ doc.a }}").count(), 2);
        assert!(out.info.contains(&"Total Jinja blocks preserved: 5".to_string()));
    }

    #[test]
    fn test_existing_token_text_survives() {
        let out = convert_html("<p>___JINJA_BLOCK_0___ {{ doc.x }}</p>");
        assert!(out.xml_template.contains("<text>___JINJA_BLOCK_0___ {{ doc.x }}</text>"));
    }

    #[test]
    fn test_custom_token_shape() {
        let html = "<p>{{ doc.a }} &amp; {% if x %}b{% endif %}</p>";
        let config = ConverterConfig::default().with_token(TokenShape::new("@@FRAG", "@@"));
        let custom = HtmlToXmlConverter::new(config).convert(html);
        assert!(!custom.xml_template.contains("@@FRAG"));
        assert_eq!(custom, convert_html(html));
    }

    #[test]
    fn test_convert_with_report_appends() {
        let mut report = Report::new();
        report.info("Converted from Print Format: Receipt");
        let out = HtmlToXmlConverter::default().convert_with_report("<p>x</p>", report);
        assert_eq!(out.info[0], "Converted from Print Format: Receipt");
        assert_eq!(out.info.len(), 3);
    }
}
