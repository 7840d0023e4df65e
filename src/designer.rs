//! Save-time rules for stored template designs.
//!
//! A design binds one XML+Jinja template to a document type. At most one
//! design per document type is the default.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::DesignError;
use crate::schema::SchemaLookup;
use crate::validate::TemplateValidator;

/// A stored thermal template design.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDesign {
    pub name: String,
    pub ref_doctype: String,
    pub xml_template: String,
    #[serde(default)]
    pub is_default: bool,
}

impl TemplateDesign {
    pub fn new(name: impl Into<String>, ref_doctype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ref_doctype: ref_doctype.into(),
            ..Self::default()
        }
    }

    pub fn with_template(mut self, xml_template: impl Into<String>) -> Self {
        self.xml_template = xml_template.into();
        self
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Check the design before it is saved.
    ///
    /// Returns the validator warnings, which never block a save.
    pub fn check(
        &self,
        validator: &TemplateValidator,
        lookup: &dyn SchemaLookup,
    ) -> Result<Vec<String>, DesignError> {
        if self.is_default && self.xml_template.is_empty() {
            return Err(DesignError::DefaultWithoutTemplate);
        }
        if self.xml_template.is_empty() || self.ref_doctype.is_empty() {
            return Ok(Vec::new());
        }

        let result = validator.validate(&self.xml_template, Some(&self.ref_doctype), lookup);
        if !result.valid {
            debug!(design = %self.name, errors = result.errors.len(), "design rejected");
            return Err(DesignError::Invalid(result.errors));
        }
        Ok(result.warnings)
    }

    /// Clear `is_default` on every other design of the same doctype.
    ///
    /// Returns how many designs were changed. Does nothing unless `self`
    /// is the default.
    pub fn ensure_single_default(&self, designs: &mut [TemplateDesign]) -> usize {
        if !self.is_default {
            return 0;
        }
        let mut cleared = 0;
        for other in designs
            .iter_mut()
            .filter(|d| d.is_default && d.ref_doctype == self.ref_doctype && d.name != self.name)
        {
            other.is_default = false;
            cleared += 1;
        }
        info!(doctype = %self.ref_doctype, design = %self.name, "default template set");
        cleared
    }
}

/// Template of the default design for `doc_type`, if any.
pub fn default_template<'d>(designs: &'d [TemplateDesign], doc_type: &str) -> Option<&'d str> {
    designs
        .iter()
        .find(|d| d.is_default && d.ref_doctype == doc_type)
        .map(|d| d.xml_template.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::StaticSchema;

    const VALID: &str = r#"<output><ticket><line><text length="42">{{ doc.customer }}</text></line></ticket></output>"#;

    fn schema() -> StaticSchema {
        StaticSchema::new().with_schema("POS Invoice", ["customer"])
    }

    #[test]
    fn test_default_requires_template() {
        let design = TemplateDesign::new("Receipt", "POS Invoice").as_default();
        let err = design.check(&TemplateValidator::default(), &schema()).unwrap_err();
        assert!(matches!(err, DesignError::DefaultWithoutTemplate));
        assert!(err.to_string().starts_with("Cannot set as default template"));
    }

    #[test]
    fn test_valid_default_passes() {
        let design = TemplateDesign::new("Receipt", "POS Invoice")
            .with_template(VALID)
            .as_default();
        let warnings = design.check(&TemplateValidator::default(), &schema()).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_invalid_template_is_rejected() {
        let design = TemplateDesign::new("Broken", "POS Invoice").with_template("<output></output>");
        let err = design.check(&TemplateValidator::default(), &schema()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Template validation failed:\n\n• Missing required element: <ticket>"
        );
    }

    #[test]
    fn test_warnings_do_not_block() {
        let template = r#"<output><ticket><line><text>{{ doc.nope }}</text></line></ticket></output>"#;
        let design = TemplateDesign::new("Loose", "POS Invoice").with_template(template);
        let warnings = design.check(&TemplateValidator::default(), &schema()).unwrap();
        assert_eq!(warnings, ["Field 'nope' not found in POS Invoice"]);
    }

    #[test]
    fn test_no_doctype_skips_validation() {
        let design = TemplateDesign::new("Draft", "").with_template("not xml");
        assert!(design.check(&TemplateValidator::default(), &schema()).is_ok());
    }

    #[test]
    fn test_single_default_per_doctype() {
        let mut designs = vec![
            TemplateDesign::new("First", "POS Invoice").with_template(VALID).as_default(),
            TemplateDesign::new("Other", "Sales Invoice").with_template(VALID).as_default(),
        ];
        let second = TemplateDesign::new("Second", "POS Invoice").with_template(VALID).as_default();

        assert_eq!(second.ensure_single_default(&mut designs), 1);
        assert!(!designs[0].is_default);
        assert!(designs[1].is_default);

        designs.push(second);
        assert_eq!(default_template(&designs, "POS Invoice"), Some(VALID));
        assert_eq!(default_template(&designs, "Delivery Note"), None);
    }
}
