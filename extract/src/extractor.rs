//! Schema extraction from in-memory JSON values.

use record_schema_core::{ExtractionError, Schema, SchemaExtractor};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::infer::property_type;

/// A JSON-valued property source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValueSource {
    /// An instance of a named shape; extracts with a source name attached,
    /// so the core can bind a dedicated converter to it.
    Named {
        name: String,
        value: serde_json::Value,
    },
    /// An anonymous object literal or projection.
    Literal(serde_json::Value),
    /// A homogeneous collection; the schema comes from the first element
    /// alone, and an empty collection yields an empty schema.
    Collection(Vec<serde_json::Value>),
}

impl ValueSource {
    /// Wraps an instance of a named shape.
    pub fn named(name: impl Into<String>, value: serde_json::Value) -> Self {
        ValueSource::Named {
            name: name.into(),
            value,
        }
    }

    /// Wraps an anonymous object literal.
    pub fn literal(value: serde_json::Value) -> Self {
        ValueSource::Literal(value)
    }

    /// Wraps a collection of instances.
    pub fn collection(values: Vec<serde_json::Value>) -> Self {
        ValueSource::Collection(values)
    }
}

/// Extracts schemas from [`ValueSource`]s by walking object keys in
/// insertion order.
///
/// # Examples
///
/// ```
/// use record_schema_core::{SchemaExtractor, TypeRef};
/// use record_schema_extract::{ValueExtractor, ValueSource};
/// use serde_json::json;
///
/// let source = ValueSource::named("User", json!({"name": "Ada", "age": 36}));
/// let schema = ValueExtractor.extract(&source).unwrap();
///
/// assert_eq!(schema.source_name.as_deref(), Some("User"));
/// assert_eq!(schema.property_names(), vec!["name", "age"]);
/// assert_eq!(schema.property("age").unwrap().ty, TypeRef::Int);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueExtractor;

impl SchemaExtractor<ValueSource> for ValueExtractor {
    fn extract(&self, source: &ValueSource) -> Result<Schema, ExtractionError> {
        let schema = match source {
            ValueSource::Named { name, value } => {
                let mut schema = object_schema(value)?;
                schema.source_name = Some(name.clone());
                schema
            }
            ValueSource::Literal(value) => object_schema(value)?,
            ValueSource::Collection(values) => match values.first() {
                Some(first) => object_schema(first)?,
                None => Schema::anonymous(),
            },
        };
        debug!(
            source_name = schema.source_name.as_deref().unwrap_or("<anonymous>"),
            properties = schema.len(),
            "Extracted value schema"
        );
        Ok(schema)
    }
}

/// Builds a schema from one JSON object, keys in insertion order.
fn object_schema(value: &serde_json::Value) -> Result<Schema, ExtractionError> {
    let map = value
        .as_object()
        .ok_or_else(|| ExtractionError::NotAnObject(shape_of(value).to_string()))?;

    let mut schema = Schema::anonymous();
    for (key, field) in map {
        schema = schema.with_property(key, property_type(key, field));
    }
    Ok(schema)
}

fn shape_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_literal_is_rejected() {
        let err = ValueExtractor
            .extract(&ValueSource::literal(json!(42)))
            .unwrap_err();
        assert_eq!(err, ExtractionError::NotAnObject("number".to_string()));
    }

    #[test]
    fn test_empty_collection_extracts_empty_schema() {
        let schema = ValueExtractor
            .extract(&ValueSource::collection(vec![]))
            .unwrap();
        assert!(schema.is_empty());
        assert!(schema.source_name.is_none());
    }

    #[test]
    fn test_collection_schema_comes_from_first_element_only() {
        let schema = ValueExtractor
            .extract(&ValueSource::collection(vec![
                json!({"a": 1}),
                json!({"a": 1, "b": 2}),
            ]))
            .unwrap();
        assert_eq!(schema.property_names(), vec!["a"]);
    }
}
