//! Prelude module for common imports.
//!
//! ```ignore
//! use thermal_xml::prelude::*;
//! ```

// Configuration
pub use crate::config::{ConverterConfig, PreviewConfig, TokenShape, ValidatorConfig, LINE_WIDTH};

// Node types
pub use crate::node::{Children, Document, Element, Node, Text};

// Attributes
pub use crate::attr::{Align, Attrs, AttrsExt, Presentation};

// Conversion
pub use crate::converter::{convert_html, Conversion, HtmlToXmlConverter};
pub use crate::family::{ListKind, TagKind};
pub use crate::placeholder::{FragmentKind, Vault};
pub use crate::report::{Report, Severity};
pub use crate::xml::{LineItem, TextItem, XmlLine};

// Validation
pub use crate::schema::{NoSchema, SchemaLookup, StaticSchema};
pub use crate::validate::{extract_fields, validate_xml_template, TemplateValidator, ValidationResult};

// Hosting
pub use crate::designer::TemplateDesign;
pub use crate::preview::render_preview;
pub use crate::source::{ConvertRequest, FormatType, InMemoryFormats, PrintFormat, PrintFormatSource};

#[cfg(feature = "render")]
pub use crate::render::render_template;

// Error
pub use crate::error::{ConvertError, ConvertResult, DesignError, SchemaError};
