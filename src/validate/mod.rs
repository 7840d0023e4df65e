//! Template validation: six independent passes over finished XML+Jinja.
//!
//! | Pass | Module | Severity |
//! |------|--------|----------|
//! | Well-formedness | [`wellformed`] | error |
//! | Required structure | [`structure`] | error |
//! | Templating balance | [`jinja`] | error |
//! | Field existence | [`fields`] | warning |
//! | Width budget | [`width`] | warning |
//! | Attribute legality | [`attrs`] | error |
//!
//! Every pass runs; none short-circuits another. A template is valid iff
//! no pass recorded an error.

pub mod attrs;
pub mod fields;
pub mod jinja;
pub mod structure;
pub mod wellformed;
pub mod width;

pub use fields::extract_fields;

use serde::Serialize;
use tracing::debug;

use crate::config::ValidatorConfig;
use crate::report::Report;
use crate::schema::SchemaLookup;

// =============================================================================
// ValidationResult
// =============================================================================

/// Outcome of validating one template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// `true` iff `errors` is empty
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl From<Report> for ValidationResult {
    fn from(report: Report) -> Self {
        Self {
            valid: report.errors.is_empty(),
            errors: report.errors,
            warnings: report.warnings,
            info: report.info,
        }
    }
}

// =============================================================================
// TemplateValidator
// =============================================================================

/// Validator for thermal XML templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateValidator {
    config: ValidatorConfig,
}

impl TemplateValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Run every pass. Field existence runs only when `schema_id` is given.
    pub fn validate(
        &self,
        template: &str,
        schema_id: Option<&str>,
        lookup: &dyn SchemaLookup,
    ) -> ValidationResult {
        let mut report = Report::new();

        wellformed::check(template, &mut report);
        structure::check(template, &mut report);
        jinja::check(template, &mut report);
        if let Some(schema_id) = schema_id.filter(|s| !s.is_empty()) {
            fields::check(template, schema_id, &self.config, lookup, &mut report);
        }
        width::check(template, self.config.line_width, &mut report);
        attrs::check(template, &mut report);

        debug!(
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "validated template"
        );
        report.into()
    }
}

/// Validate with the standard configuration.
pub fn validate_xml_template(
    template: &str,
    schema_id: Option<&str>,
    lookup: &dyn SchemaLookup,
) -> ValidationResult {
    TemplateValidator::default().validate(template, schema_id, lookup)
}
