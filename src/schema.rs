//! Document schema lookup used by the field-existence pass.
//!
//! The validator needs one question answered: does schema `S` have field
//! `F`? [`SchemaLookup`] is that question; [`StaticSchema`] answers it from
//! an in-memory field list, loadable from JSON.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

// =============================================================================
// SchemaLookup
// =============================================================================

/// Field-existence capability of a document schema store.
pub trait SchemaLookup {
    /// Check that `schema_id` is known before any field is looked up.
    fn check_schema(&self, _schema_id: &str) -> Result<(), SchemaError> {
        Ok(())
    }

    /// Check if `field` is a field of `schema_id`.
    fn field_exists(&self, schema_id: &str, field: &str) -> Result<bool, SchemaError>;
}

impl<T: SchemaLookup + ?Sized> SchemaLookup for &T {
    fn check_schema(&self, schema_id: &str) -> Result<(), SchemaError> {
        (**self).check_schema(schema_id)
    }

    fn field_exists(&self, schema_id: &str, field: &str) -> Result<bool, SchemaError> {
        (**self).field_exists(schema_id, field)
    }
}

/// Lookup that knows no schema at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSchema;

impl SchemaLookup for NoSchema {
    fn check_schema(&self, schema_id: &str) -> Result<(), SchemaError> {
        Err(SchemaError::UnknownSchema(schema_id.to_string()))
    }

    fn field_exists(&self, schema_id: &str, _field: &str) -> Result<bool, SchemaError> {
        Err(SchemaError::UnknownSchema(schema_id.to_string()))
    }
}

// =============================================================================
// StaticSchema
// =============================================================================

/// Schema ids mapped to their field names.
///
/// JSON form: `{"Sales Invoice": ["customer", "grand_total"]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticSchema {
    schemas: FxHashMap<String, FxHashSet<String>>,
}

impl StaticSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a schema with its fields (builder).
    pub fn with_schema<I, S>(mut self, schema_id: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(schema_id, fields);
        self
    }

    /// Add fields to a schema, creating it if needed.
    pub fn insert<I, S>(&mut self, schema_id: impl Into<String>, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schemas
            .entry(schema_id.into())
            .or_default()
            .extend(fields.into_iter().map(Into::into));
    }

    /// Parse the JSON form.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(json).map_err(|e| SchemaError::backend(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    fn fields(&self, schema_id: &str) -> Result<&FxHashSet<String>, SchemaError> {
        self.schemas
            .get(schema_id)
            .ok_or_else(|| SchemaError::UnknownSchema(schema_id.to_string()))
    }
}

impl SchemaLookup for StaticSchema {
    fn check_schema(&self, schema_id: &str) -> Result<(), SchemaError> {
        self.fields(schema_id).map(|_| ())
    }

    fn field_exists(&self, schema_id: &str, field: &str) -> Result<bool, SchemaError> {
        Ok(self.fields(schema_id)?.contains(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_schema() {
        let schema = StaticSchema::new().with_schema("POS Invoice", ["customer", "grand_total"]);
        assert!(schema.field_exists("POS Invoice", "customer").unwrap());
        assert!(!schema.field_exists("POS Invoice", "nope").unwrap());
        assert!(matches!(
            schema.field_exists("Quotation", "customer"),
            Err(SchemaError::UnknownSchema(_))
        ));
    }

    #[test]
    fn test_schema_from_json() {
        let schema = StaticSchema::from_json(r#"{"Sales Invoice": ["customer"]}"#).unwrap();
        assert_eq!(schema.len(), 1);
        assert!(schema.check_schema("Sales Invoice").is_ok());
        assert!(StaticSchema::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_no_schema() {
        assert!(NoSchema.check_schema("X").is_err());
    }
}
