//! Print format resolution: the conversion entry point.
//!
//! A request names either a stored print format or carries raw HTML. Stored
//! formats come from a [`PrintFormatSource`]; a format without inline HTML
//! may still point at a template file on disk.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ConverterConfig;
use crate::converter::{Conversion, HtmlToXmlConverter};
use crate::error::{ConvertError, ConvertResult};
use crate::report::Report;

// =============================================================================
// PrintFormat
// =============================================================================

/// How a print format is rendered by its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FormatType {
    /// Built from the document layout, no custom HTML
    Standard,
    #[default]
    Jinja,
    #[serde(rename = "JS")]
    Js,
}

/// A stored print format.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintFormat {
    pub name: String,
    pub doc_type: Option<String>,
    /// Inline HTML/Jinja content
    pub html: Option<String>,
    /// Shipped with the host application
    pub standard: bool,
    pub format_type: FormatType,
    /// Module owning the template file of a file-based format
    pub module: Option<String>,
    pub disabled: bool,
}

impl PrintFormat {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub fn with_doc_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_type(mut self, format_type: FormatType) -> Self {
        self.format_type = format_type;
        self
    }

    pub fn standard(mut self) -> Self {
        self.standard = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    fn is_standard(&self) -> bool {
        self.standard || self.format_type == FormatType::Standard
    }

    /// Path of the template file backing a file-based format:
    /// `<module>/print_format/<name>/<name>.html`, names scrubbed.
    pub fn template_path(&self) -> String {
        let module = self
            .module
            .as_deref()
            .map_or_else(|| "frappe".to_string(), |m| m.to_lowercase().replace(' ', "_"));
        let name = scrub(&self.name);
        format!("{module}/print_format/{name}/{name}.html")
    }
}

/// Lower-case with spaces and dashes turned into underscores.
pub fn scrub(name: &str) -> String {
    name.to_lowercase().replace(|c: char| c == ' ' || c == '-', "_")
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

// =============================================================================
// PrintFormatSource
// =============================================================================

/// Store of print formats and their template files.
pub trait PrintFormatSource {
    /// Fetch a print format by name.
    fn get(&self, name: &str) -> ConvertResult<PrintFormat>;

    /// Read a template file by its relative path.
    fn read_template_file(&self, path: &str) -> ConvertResult<String>;

    /// All print formats of a document type, in any order.
    fn formats_for_doctype(&self, doc_type: &str) -> ConvertResult<Vec<PrintFormat>>;
}

/// Print formats and template files held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFormats {
    formats: FxHashMap<String, PrintFormat>,
    files: FxHashMap<String, String>,
}

impl InMemoryFormats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a print format (builder).
    pub fn with_format(mut self, format: PrintFormat) -> Self {
        self.insert(format);
        self
    }

    /// Add a template file (builder).
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    pub fn insert(&mut self, format: PrintFormat) {
        self.formats.insert(format.name.clone(), format);
    }
}

impl PrintFormatSource for InMemoryFormats {
    fn get(&self, name: &str) -> ConvertResult<PrintFormat> {
        self.formats
            .get(name)
            .cloned()
            .ok_or_else(|| ConvertError::Source(format!("Print Format '{name}' not found")))
    }

    fn read_template_file(&self, path: &str) -> ConvertResult<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| ConvertError::Source(format!("file not found: {path}")))
    }

    fn formats_for_doctype(&self, doc_type: &str) -> ConvertResult<Vec<PrintFormat>> {
        Ok(self
            .formats
            .values()
            .filter(|f| f.doc_type.as_deref() == Some(doc_type))
            .cloned()
            .collect())
    }
}

// =============================================================================
// Conversion entry point
// =============================================================================

/// What to convert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertRequest {
    pub print_format_name: Option<String>,
    pub html_content: Option<String>,
    pub doc_type: Option<String>,
}

impl ConvertRequest {
    pub fn from_format(name: impl Into<String>) -> Self {
        Self {
            print_format_name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn from_html(html: impl Into<String>) -> Self {
        Self {
            html_content: Some(html.into()),
            ..Self::default()
        }
    }

    pub fn with_doc_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = Some(doc_type.into());
        self
    }
}

/// HTML of a named print format, trying the template file when the format
/// has no inline HTML.
fn resolve_format_html(
    format: &PrintFormat,
    formats: &dyn PrintFormatSource,
) -> ConvertResult<String> {
    if let Some(html) = non_empty(format.html.as_deref()) {
        return Ok(html.to_string());
    }
    if format.is_standard() {
        return Err(ConvertError::StandardFormat(format.name.clone()));
    }

    if format.format_type == FormatType::Jinja {
        let path = format.template_path();
        match formats.read_template_file(&path) {
            Ok(html) if !html.is_empty() => return Ok(html),
            Ok(_) => debug!(%path, "template file is empty"),
            Err(err) => debug!(%path, error = %err, "template file not readable"),
        }
    }
    Err(ConvertError::NoContent(format.name.clone()))
}

/// Convert a print format or raw HTML.
///
/// A print format name takes precedence over raw HTML. The format's document
/// type is used when the request has none.
pub fn convert_print_format(
    request: &ConvertRequest,
    formats: &dyn PrintFormatSource,
    config: &ConverterConfig,
) -> ConvertResult<Conversion> {
    let mut report = Report::new();
    let mut doc_type = non_empty(request.doc_type.as_deref()).map(str::to_string);

    let html = if let Some(name) = non_empty(request.print_format_name.as_deref()) {
        let format = formats.get(name)?;
        if doc_type.is_none() {
            doc_type = format.doc_type.clone();
        }
        let html = resolve_format_html(&format, formats)?;
        report.info(format!("Converted from Print Format: {name}"));
        info!(print_format = name, "resolved print format");
        html
    } else if let Some(html) = non_empty(request.html_content.as_deref()) {
        html.to_string()
    } else {
        return Err(ConvertError::MissingSource);
    };

    let mut converter = HtmlToXmlConverter::new(config.clone());
    if let Some(doc_type) = doc_type {
        converter = converter.with_doc_type(doc_type);
    }
    Ok(converter.convert_with_report(&html, report))
}

/// Enabled print formats of a document type, standard ones first, then by name.
pub fn list_print_formats(
    formats: &dyn PrintFormatSource,
    doc_type: &str,
) -> ConvertResult<Vec<PrintFormat>> {
    if doc_type.is_empty() {
        return Ok(Vec::new());
    }
    let mut list: Vec<PrintFormat> = formats
        .formats_for_doctype(doc_type)?
        .into_iter()
        .filter(|f| !f.disabled)
        .collect();
    list.sort_by(|a, b| b.standard.cmp(&a.standard).then_with(|| a.name.cmp(&b.name)));
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formats() -> InMemoryFormats {
        InMemoryFormats::new()
            .with_format(
                PrintFormat::new("Receipt")
                    .with_doc_type("POS Invoice")
                    .with_html("<h1>Shop</h1>"),
            )
            .with_format(PrintFormat::new("Classic").with_doc_type("POS Invoice").standard())
            .with_format(
                PrintFormat::new("Thermal Slip")
                    .with_doc_type("POS Invoice")
                    .with_module("Pos Spire"),
            )
            .with_format(PrintFormat::new("Empty JS").with_type(FormatType::Js))
            .with_format(PrintFormat::new("Old").with_doc_type("POS Invoice").disabled())
            .with_file("pos_spire/print_format/thermal_slip/thermal_slip.html", "<p>From file</p>")
    }

    #[test]
    fn test_scrub_and_path() {
        assert_eq!(scrub("Thermal Slip-v2"), "thermal_slip_v2");
        assert_eq!(
            PrintFormat::new("A B").template_path(),
            "frappe/print_format/a_b/a_b.html"
        );
    }

    #[test]
    fn test_convert_inline_format() {
        let out = convert_print_format(
            &ConvertRequest::from_format("Receipt"),
            &formats(),
            &ConverterConfig::default(),
        )
        .unwrap();
        assert!(out.xml_template.contains(">Shop</text>"));
        assert_eq!(out.info[0], "Converted from Print Format: Receipt");
    }

    #[test]
    fn test_convert_from_template_file() {
        let out = convert_print_format(
            &ConvertRequest::from_format("Thermal Slip"),
            &formats(),
            &ConverterConfig::default(),
        )
        .unwrap();
        assert!(out.xml_template.contains("<text>From file</text>"));
    }

    #[test]
    fn test_fatal_errors() {
        let config = ConverterConfig::default();
        let formats = formats();

        let err = convert_print_format(&ConvertRequest::default(), &formats, &config).unwrap_err();
        assert!(matches!(err, ConvertError::MissingSource));

        let err = convert_print_format(&ConvertRequest::from_format("Classic"), &formats, &config)
            .unwrap_err();
        assert!(matches!(err, ConvertError::StandardFormat(ref n) if n == "Classic"));

        let err = convert_print_format(&ConvertRequest::from_format("Empty JS"), &formats, &config)
            .unwrap_err();
        assert!(matches!(err, ConvertError::NoContent(_)));

        let err = convert_print_format(&ConvertRequest::from_format("Nope"), &formats, &config)
            .unwrap_err();
        assert!(matches!(err, ConvertError::Source(_)));
    }

    #[test]
    fn test_raw_html_request() {
        let request = ConvertRequest::from_html("<p>hi</p>").with_doc_type("POS Invoice");
        let out = convert_print_format(&request, &InMemoryFormats::new(), &ConverterConfig::default())
            .unwrap();
        assert!(out.xml_template.contains("<text>hi</text>"));
        assert!(!out.info.iter().any(|i| i.starts_with("Converted from")));
    }

    #[test]
    fn test_list_print_formats() {
        let names: Vec<String> = list_print_formats(&formats(), "POS Invoice")
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, ["Classic", "Receipt", "Thermal Slip"]);
        assert!(list_print_formats(&formats(), "").unwrap().is_empty());
    }
}
