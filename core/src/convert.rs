//! Converter emitter: name-matched field copy from source shapes into the
//! output record.
//!
//! Converters are pure in-memory field copies keyed by exact name match
//! against the resolved schema; no value is ever coerced, validated, or
//! reformatted on the way through. Inputs and outputs are JSON object
//! values, the host-agnostic record representation, and output records keep
//! field order aligned with the resolved schema.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ConvertError, ResolvedSchema, Schema, SourceId};

/// An output record instance: an ordered field map matching the resolved
/// schema.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// A source schema captured from one add-source directive, as seen by the
/// converter emitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSchema {
    /// Source handle from the directive log.
    pub id: SourceId,
    /// Schema extracted for the source.
    pub schema: Schema,
    /// Whether the source was supplied with a name (named shapes get a
    /// dedicated converter; anonymous shapes and projections go through the
    /// generic single-object path).
    pub is_named: bool,
}

/// A converter bound to one named source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct NamedConverter {
    source_name: String,
    fn_name: String,
    /// Property names copied from this source (exact name intersection of
    /// the source schema and the resolved schema).
    copies: Vec<String>,
}

/// The set of converters emitted for one resolution pass.
///
/// Holds one converter per named source, a combined converter when exactly
/// two named sources were supplied, and the generic single-object and
/// collection converters that operate on arbitrary structurally compatible
/// inputs.
///
/// # Examples
///
/// ```
/// use record_schema_core::{emit_converters, ResolvedSchema, ResolvedProperty,
///     PropertyOrigin, TypeRef};
/// use serde_json::json;
///
/// let resolved = ResolvedSchema {
///     properties: vec![ResolvedProperty {
///         name: "name".into(),
///         ty: TypeRef::Str,
///         default: None,
///         origin: PropertyOrigin::Added,
///     }],
/// };
///
/// let set = emit_converters(&resolved, &[], true).unwrap();
/// let record = set.from_single(&json!({"name": "Ada", "extra": 1})).unwrap();
/// assert_eq!(record.get("name"), Some(&json!("Ada")));
/// assert!(record.get("extra").is_none());
///
/// // Disabled emission produces no converter artifact at all.
/// assert!(emit_converters(&resolved, &[], false).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConverterSet {
    output: ResolvedSchema,
    named: Vec<NamedConverter>,
    combined: bool,
}

impl ConverterSet {
    /// Names of the emitted converter functions, for the emission sink.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.named.iter().map(|c| c.fn_name.clone()).collect();
        if self.combined {
            names.push("from_both".to_string());
        }
        names.push("from_single".to_string());
        names.push("from_collection".to_string());
        names
    }

    /// Returns `true` when a combined two-source converter was emitted.
    pub fn has_combined(&self) -> bool {
        self.combined
    }

    /// Converts an instance of the named source into an output record.
    ///
    /// Fields present only in the output (from adds or other sources) are
    /// left at their supplied default or JSON null.
    ///
    /// # Errors
    ///
    /// [`ConvertError::UnknownSource`] when no converter is bound to
    /// `source_name`; [`ConvertError::NullInput`] /
    /// [`ConvertError::NotAnObject`] for bad inputs.
    pub fn from_named(
        &self,
        source_name: &str,
        instance: &serde_json::Value,
    ) -> Result<Record, ConvertError> {
        let converter = self
            .named
            .iter()
            .find(|c| c.source_name == source_name)
            .ok_or_else(|| ConvertError::UnknownSource(source_name.to_string()))?;
        let input = as_object(instance)?;

        let mut record = self.seed_record();
        for name in &converter.copies {
            if let Some(value) = input.get(name) {
                record.insert(name.clone(), value.clone());
            }
        }
        Ok(record)
    }

    /// Converts one instance of each of the two named sources into a single
    /// output record; the second source wins on name collision.
    ///
    /// # Errors
    ///
    /// [`ConvertError::CombinedUnavailable`] unless exactly two named
    /// sources were supplied at emission time.
    pub fn from_both(
        &self,
        first: &serde_json::Value,
        second: &serde_json::Value,
    ) -> Result<Record, ConvertError> {
        if !self.combined {
            return Err(ConvertError::CombinedUnavailable);
        }
        let first_obj = as_object(first)?;
        let second_obj = as_object(second)?;

        let mut record = self.seed_record();
        for (converter, input) in [(&self.named[0], first_obj), (&self.named[1], second_obj)] {
            for name in &converter.copies {
                if let Some(value) = input.get(name) {
                    record.insert(name.clone(), value.clone());
                }
            }
        }
        Ok(record)
    }

    /// Converts an arbitrary structurally compatible object into an output
    /// record by dynamic name-matched copy.
    ///
    /// This is the path for anonymous shapes and projection inputs, where no
    /// named type exists to bind a dedicated converter to.
    ///
    /// # Errors
    ///
    /// [`ConvertError::NullInput`] for a JSON null,
    /// [`ConvertError::NotAnObject`] for any other non-object value.
    pub fn from_single(&self, instance: &serde_json::Value) -> Result<Record, ConvertError> {
        let input = as_object(instance)?;

        let mut record = self.seed_record();
        for property in &self.output.properties {
            if let Some(value) = input.get(&property.name) {
                record.insert(property.name.clone(), value.clone());
            }
        }
        Ok(record)
    }

    /// Lifts [`from_single`](Self::from_single) over a sequence, preserving
    /// input order and element count exactly. An empty input yields an empty
    /// output, never an error.
    pub fn from_collection(
        &self,
        instances: &[serde_json::Value],
    ) -> Result<Vec<Record>, ConvertError> {
        instances.iter().map(|v| self.from_single(v)).collect()
    }

    /// Output record skeleton: every resolved field at its supplied default
    /// or JSON null, in resolved order.
    fn seed_record(&self) -> Record {
        let mut record = Record::new();
        for property in &self.output.properties {
            record.insert(
                property.name.clone(),
                property.default.clone().unwrap_or(serde_json::Value::Null),
            );
        }
        record
    }
}

/// Emits the converter set for a resolution pass.
///
/// Returns `None` when `enabled` is false — a visible behavioral switch,
/// not a default. Otherwise emits one converter per named source, a
/// combined converter iff exactly two named sources exist, and the generic
/// single-object and collection converters.
pub fn emit_converters(
    resolved: &ResolvedSchema,
    sources: &[SourceSchema],
    enabled: bool,
) -> Option<ConverterSet> {
    if !enabled {
        return None;
    }

    let named: Vec<NamedConverter> = sources
        .iter()
        .filter(|s| s.is_named)
        .filter_map(|s| {
            let source_name = s.schema.source_name.clone()?;
            let copies: Vec<String> = s
                .schema
                .properties
                .iter()
                .filter(|p| resolved.property(&p.name).is_some())
                .map(|p| p.name.clone())
                .collect();
            Some(NamedConverter {
                fn_name: converter_fn_name(&source_name),
                source_name,
                copies,
            })
        })
        .collect();
    let combined = named.len() == 2;

    debug!(
        named = named.len(),
        combined,
        fields = resolved.len(),
        "Emitted converter set"
    );

    Some(ConverterSet {
        output: resolved.clone(),
        named,
        combined,
    })
}

/// Derives a converter function name from a source name
/// (`CustomerOrder` → `from_customer_order`).
fn converter_fn_name(source_name: &str) -> String {
    let mut out = String::from("from_");
    let mut prev_lower = false;
    for ch in source_name.chars() {
        if ch.is_alphanumeric() {
            if ch.is_uppercase() && prev_lower {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
            prev_lower = ch.is_lowercase() || ch.is_numeric();
        } else if !out.ends_with('_') {
            out.push('_');
            prev_lower = false;
        }
    }
    out.trim_end_matches('_').to_string()
}

fn as_object(value: &serde_json::Value) -> Result<&Record, ConvertError> {
    match value {
        serde_json::Value::Null => Err(ConvertError::NullInput),
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(ConvertError::NotAnObject),
    }
}
