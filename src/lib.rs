//! thermal-xml - HTML/Jinja print templates to thermal-printer XML
//!
//! ## Core Concepts
//!
//! **Placeholder vault**: templating fragments (`{% %}`, `{{ }}`, `{# #}`) are
//! swapped for opaque tokens before the markup is parsed and restored after
//! the XML is assembled, so templating survives conversion byte-for-byte.
//!
//! **Tag dispatch**: every element is classified into a [`TagKind`] and
//! converted by the matching rule in [`families`]; unknown tags fall back to
//! their children.
//!
//! **Reports, not errors**: conversion never fails on odd markup. Warnings
//! and info notes are collected in a [`Report`] threaded through the run.
//!
//! ## Modules
//! - `placeholder`: token vault (extract / restore)
//! - `convert`: HTML parsing into the markup tree
//! - `node`: Document/Element/Text tree
//! - `family` / `families`: tag classification and per-tag rules
//! - `attr`: alignment and emphasis resolution
//! - `xml`: line model and document assembly
//! - `validate`: six-pass template validator
//! - `source`: print format resolution
//! - `designer`: save-time rules for stored templates
//! - `render` / `preview`: rendering against a document and HTML preview
//!
//! ## Usage
//!
//! ```
//! use thermal_xml::{convert_html, validate_xml_template, NoSchema};
//!
//! let out = convert_html("<p>Hello {{ doc.name }}</p>");
//! assert!(out.xml_template.contains("<text>Hello {{ doc.name }}</text>"));
//!
//! let result = validate_xml_template(&out.xml_template, None, &NoSchema);
//! assert!(result.valid);
//! ```

// =============================================================================
// Conversion
// =============================================================================

/// Placeholder vault for templating fragments
pub mod placeholder;

/// HTML parsing into the markup tree
pub mod convert;

/// Node types: Document, Element, Node, Text
pub mod node;

/// Tag classification
pub mod family;

/// Per-tag conversion rules
pub mod families;

/// Attribute and presentation resolution
pub mod attr;

/// Entity decoding and escaping
pub mod escape;

/// XML line model and assembly
pub mod xml;

/// Conversion driver
pub mod converter;

// =============================================================================
// Validation and hosting
// =============================================================================

/// Template validator
pub mod validate;

/// Schema lookup for field validation
pub mod schema;

/// Print format sources
pub mod source;

/// Template design rules
pub mod designer;

/// HTML preview of ticket XML
pub mod preview;

/// Template rendering
#[cfg(feature = "render")]
pub mod render;

/// Parallel batch helpers
#[cfg(feature = "parallel")]
pub mod batch;

// =============================================================================
// Shared
// =============================================================================

/// Configuration types
pub mod config;

/// Warning/info accumulation
pub mod report;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::{ConverterConfig, PreviewConfig, TokenShape, ValidatorConfig, LINE_WIDTH};

// Conversion
pub use converter::{convert_html, Conversion, HtmlToXmlConverter};
pub use family::TagKind;
pub use placeholder::Vault;
pub use report::{Report, Severity};

// Validation
pub use schema::{NoSchema, SchemaLookup, StaticSchema};
pub use validate::{validate_xml_template, TemplateValidator, ValidationResult};

// Hosting
pub use designer::TemplateDesign;
pub use preview::render_preview;
pub use source::{
    convert_print_format, list_print_formats, ConvertRequest, InMemoryFormats, PrintFormat,
    PrintFormatSource,
};

#[cfg(feature = "render")]
pub use render::render_template;

// Error types
#[cfg(feature = "render")]
pub use error::RenderError;
pub use error::{ConvertError, ConvertResult, DesignError, SchemaError};

// =============================================================================
// Tests
// =============================================================================
