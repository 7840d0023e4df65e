//! Error types for thermal-xml.
//!
//! Only fatal conditions live here. Advisory findings (unsupported images,
//! width overflow, unknown fields) are collected in a [`Report`](crate::Report)
//! and never surface as `Err`.

use thiserror::Error;

/// Errors that abort a conversion request.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Neither a print format name nor raw HTML was supplied
    #[error("either print_format_name or html_content must be provided")]
    MissingSource,

    /// Standard print formats carry no custom HTML to convert
    #[error(
        "cannot convert Standard Print Format '{0}'. Only custom Print Formats with HTML/Jinja content can be converted."
    )]
    StandardFormat(String),

    /// The print format has no HTML content after every fallback was tried
    #[error(
        "Print Format '{0}' has no HTML content to convert. Please select a Print Format with custom HTML/Jinja template."
    )]
    NoContent(String),

    /// The print format store failed or does not know the format
    #[error("print format source: {0}")]
    Source(String),
}

/// Errors raised by a [`SchemaLookup`](crate::schema::SchemaLookup) backend.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema identifier is not known to the backend
    #[error("unknown schema '{0}'")]
    UnknownSchema(String),

    /// The backend failed to answer
    #[error("schema backend error: {0}")]
    Backend(String),
}

/// Errors raised when saving a template design.
#[derive(Debug, Error)]
pub enum DesignError {
    /// A default design must carry template content
    #[error(
        "Cannot set as default template without XML template content. Please add XML template first or use 'Convert from Print Format' to generate one."
    )]
    DefaultWithoutTemplate,

    /// The template failed validation; one bullet per error
    #[error("Template validation failed:\n\n{}", bullets(.0))]
    Invalid(Vec<String>),
}

fn bullets(errors: &[String]) -> String {
    errors
        .iter()
        .map(|e| format!("• {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Errors raised while rendering a template against a document.
#[cfg(feature = "render")]
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template syntax or evaluation failure
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Result type alias for conversion requests.
pub type ConvertResult<T> = Result<T, ConvertError>;

impl ConvertError {
    /// Create a source error from any error type.
    pub fn source(err: impl std::fmt::Display) -> Self {
        Self::Source(err.to_string())
    }
}

impl SchemaError {
    /// Create a backend error with a message.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConvertError::MissingSource;
        assert_eq!(
            err.to_string(),
            "either print_format_name or html_content must be provided"
        );

        let err = ConvertError::NoContent("Receipt".to_string());
        assert!(err.to_string().starts_with("Print Format 'Receipt' has no HTML content"));

        let err = SchemaError::UnknownSchema("Sales Invoice".to_string());
        assert_eq!(err.to_string(), "unknown schema 'Sales Invoice'");

        let err = DesignError::Invalid(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "Template validation failed:\n\n• a\n• b");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConvertError>();
        assert_send_sync::<SchemaError>();
        assert_send_sync::<DesignError>();
    }
}
