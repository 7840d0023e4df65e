//! Configuration for conversion, validation and preview.
//!
//! All configs are plain structs with a `Default`, const presets and
//! `with_*` builders. They derive serde so a host application can load
//! them from its own settings store.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Standard thermal printer width in characters (80mm paper, font A).
pub const LINE_WIDTH: usize = 42;

/// Default placeholder token prefix.
pub const TOKEN_PREFIX: &str = "___JINJA_BLOCK_";

/// Default placeholder token suffix.
pub const TOKEN_SUFFIX: &str = "___";

// =============================================================================
// TokenShape
// =============================================================================

/// Literal delimiters of a placeholder token: `prefix + counter + suffix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenShape {
    pub prefix: Cow<'static, str>,
    pub suffix: Cow<'static, str>,
}

impl TokenShape {
    /// The `___JINJA_BLOCK_<n>___` shape used by stored templates.
    pub const JINJA_BLOCK: Self = Self {
        prefix: Cow::Borrowed(TOKEN_PREFIX),
        suffix: Cow::Borrowed(TOKEN_SUFFIX),
    };

    /// Create a custom token shape.
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: Cow::Owned(prefix.into()),
            suffix: Cow::Owned(suffix.into()),
        }
    }

    /// Format the token for counter value `n`.
    pub fn token(&self, n: usize) -> String {
        format!("{}{}{}", self.prefix, n, self.suffix)
    }
}

impl Default for TokenShape {
    fn default() -> Self {
        Self::JINJA_BLOCK
    }
}

// =============================================================================
// ConverterConfig
// =============================================================================

/// Configuration for the HTML to XML converter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Characters per printed line; table columns split this budget.
    pub line_width: usize,
    /// Indent (in spaces) of the converted lines inside `<ticket>`.
    pub indent: usize,
    /// Placeholder token delimiters.
    pub token: TokenShape,
}

impl ConverterConfig {
    /// 42 character printer, lines indented under `<ticket>`.
    pub const STANDARD: Self = Self {
        line_width: LINE_WIDTH,
        indent: 4,
        token: TokenShape::JINJA_BLOCK,
    };

    /// Set the printed line width.
    pub fn with_line_width(mut self, width: usize) -> Self {
        self.line_width = width.max(1);
        self
    }

    /// Set the placeholder token shape.
    pub fn with_token(mut self, token: TokenShape) -> Self {
        self.token = token;
        self
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

// =============================================================================
// ValidatorConfig
// =============================================================================

/// Fields every document has regardless of its schema.
pub const STANDARD_FIELDS: &[&str] = &[
    "name",
    "owner",
    "creation",
    "modified",
    "modified_by",
    "docstatus",
    "idx",
];

/// Child tables assumed to exist on every printable document.
pub const CHILD_TABLES: &[&str] = &["items", "payments", "taxes"];

/// Configuration for the template validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Width budget for `length` attributes and per-line sums.
    pub line_width: usize,
    /// Field names that are always valid.
    pub standard_fields: Vec<String>,
    /// Root names whose references are never looked up.
    pub child_tables: Vec<String>,
}

impl ValidatorConfig {
    /// Set the width budget.
    pub fn with_line_width(mut self, width: usize) -> Self {
        self.line_width = width;
        self
    }

    /// Add a child table name that is assumed valid.
    pub fn with_child_table(mut self, name: impl Into<String>) -> Self {
        self.child_tables.push(name.into());
        self
    }

    pub(crate) fn is_standard_field(&self, name: &str) -> bool {
        self.standard_fields.iter().any(|f| f == name)
    }

    pub(crate) fn is_child_table(&self, name: &str) -> bool {
        self.child_tables.iter().any(|t| t == name)
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            line_width: LINE_WIDTH,
            standard_fields: STANDARD_FIELDS.iter().map(|s| s.to_string()).collect(),
            child_tables: CHILD_TABLES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// =============================================================================
// PreviewConfig
// =============================================================================

/// Configuration for the HTML preview renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Characters per printed line.
    pub line_width: usize,
    /// Width of the preview container in CSS pixels.
    pub pixel_width: usize,
}

impl PreviewConfig {
    /// 42 characters on 336px (8px per character).
    pub const STANDARD: Self = Self {
        line_width: LINE_WIDTH,
        pixel_width: 336,
    };
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shape() {
        assert_eq!(TokenShape::default().token(7), "___JINJA_BLOCK_7___");
        assert_eq!(TokenShape::new("@@", "@@").token(0), "@@0@@");
    }

    #[test]
    fn test_converter_config_builders() {
        let config = ConverterConfig::default().with_line_width(0);
        assert_eq!(config.line_width, 1);
        assert_eq!(ConverterConfig::default(), ConverterConfig::STANDARD);
    }

    #[test]
    fn test_validator_config_from_json() {
        let config: ValidatorConfig =
            serde_json::from_str(r#"{"line_width": 48}"#).expect("valid config");
        assert_eq!(config.line_width, 48);
        assert!(config.is_standard_field("docstatus"));
        assert!(config.is_child_table("taxes"));
        assert!(!config.is_child_table("customer"));
    }
}
