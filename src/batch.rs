//! Batch conversion and validation on the rayon pool.
//!
//! Each item is independent; results keep input order.

use rayon::prelude::*;

use crate::config::ConverterConfig;
use crate::converter::Conversion;
use crate::error::ConvertResult;
use crate::schema::SchemaLookup;
use crate::source::{ConvertRequest, PrintFormatSource, convert_print_format};
use crate::validate::{TemplateValidator, ValidationResult};

/// Convert many requests in parallel.
pub fn convert_batch<S>(
    requests: &[ConvertRequest],
    formats: &S,
    config: &ConverterConfig,
) -> Vec<ConvertResult<Conversion>>
where
    S: PrintFormatSource + Sync,
{
    requests
        .par_iter()
        .map(|request| convert_print_format(request, formats, config))
        .collect()
}

/// Validate many templates against one schema in parallel.
pub fn validate_batch<L>(
    templates: &[&str],
    schema_id: Option<&str>,
    validator: &TemplateValidator,
    lookup: &L,
) -> Vec<ValidationResult>
where
    L: SchemaLookup + Sync,
{
    templates
        .par_iter()
        .map(|template| validator.validate(template, schema_id, lookup))
        .collect()
}
