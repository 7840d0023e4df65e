//! Pass 4: field existence against a document schema.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::config::ValidatorConfig;
use crate::error::SchemaError;
use crate::report::Report;
use crate::schema::SchemaLookup;

static DOC_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*doc\.([a-zA-Z_][a-zA-Z0-9_]*(?:\.[a-zA-Z_][a-zA-Z0-9_]*)*)")
        .expect("doc field pattern")
});
static FOR_LOOP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{%-?\s*for\s+(\w+)\s+in\s+doc\.(\w+)").expect("for loop pattern")
});
static LOOP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{%-?\s*(for|endfor)\b").expect("loop tag pattern"));

/// Text from `start` up to the `endfor` closing the loop opened just before
/// it, or to the end of the template when the loop is never closed.
fn loop_body(template: &str, start: usize) -> &str {
    let rest = &template[start..];
    let mut depth = 1usize;
    for caps in LOOP_TAG.captures_iter(rest) {
        if &caps[1] == "for" {
            depth += 1;
        } else {
            depth -= 1;
            if depth == 0 {
                return &rest[..caps.get(0).map_or(rest.len(), |m| m.start())];
            }
        }
    }
    rest
}

/// Every field reference of a template, deduplicated and sorted.
///
/// Includes `doc.<path>` expressions, the `doc.<table>` of each
/// `{% for var in doc.<table> %}` loop, and `var.<field>` expressions
/// inside that loop's body.
pub fn extract_fields(template: &str) -> Vec<String> {
    let mut fields = BTreeSet::new();

    for caps in DOC_FIELD.captures_iter(template) {
        fields.insert(format!("doc.{}", &caps[1]));
    }

    for caps in FOR_LOOP.captures_iter(template) {
        let var = &caps[1];
        fields.insert(format!("doc.{}", &caps[2]));
        let body_start = caps.get(0).map_or(template.len(), |m| m.end());

        let pattern = format!(r"\{{\{{\s*{}\.([a-zA-Z_][a-zA-Z0-9_]*)", regex::escape(var));
        let Ok(loop_field) = Regex::new(&pattern) else {
            continue;
        };
        for field in loop_field.captures_iter(loop_body(template, body_start)) {
            fields.insert(format!("{var}.{}", &field[1]));
        }
    }

    fields.into_iter().collect()
}

/// Check one `doc.` reference. Paths deeper than `doc.field` are assumed valid.
fn reference_exists(
    path: &str,
    schema_id: &str,
    config: &ValidatorConfig,
    lookup: &dyn SchemaLookup,
) -> Result<bool, SchemaError> {
    let parts: Vec<&str> = path.split('.').collect();
    match parts.as_slice() {
        [_, field] if config.is_standard_field(field) => Ok(true),
        [_, field] => lookup.field_exists(schema_id, field),
        [_, _, ..] => Ok(true),
        _ => Ok(false),
    }
}

/// Root field names of missing `doc.` references, sorted.
pub fn missing_fields(
    template: &str,
    schema_id: &str,
    config: &ValidatorConfig,
    lookup: &dyn SchemaLookup,
) -> Result<Vec<String>, SchemaError> {
    lookup.check_schema(schema_id)?;

    let mut missing = BTreeSet::new();
    for field in extract_fields(template) {
        if !field.starts_with("doc.") {
            continue;
        }
        if reference_exists(&field, schema_id, config, lookup)? {
            continue;
        }
        let root = field.split('.').nth(1).unwrap_or_default();
        if !config.is_child_table(root) {
            missing.insert(root.to_string());
        }
    }
    Ok(missing.into_iter().collect())
}

pub(crate) fn check(
    template: &str,
    schema_id: &str,
    config: &ValidatorConfig,
    lookup: &dyn SchemaLookup,
    report: &mut Report,
) {
    match missing_fields(template, schema_id, config, lookup) {
        Ok(missing) if missing.is_empty() => {
            report.info(format!("All fields exist in {schema_id}"));
        }
        Ok(missing) => {
            debug!(schema = schema_id, count = missing.len(), "missing fields");
            for field in missing {
                report.warn(format!("Field '{field}' not found in {schema_id}"));
            }
        }
        Err(err) => report.warn(format!("Could not validate fields: {err}")),
    }
}
