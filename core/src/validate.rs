//! Artifact validation.
//!
//! Validates structural invariants of an emitted artifact before it is
//! handed to the emission sink: non-empty type name, identifier-safe type
//! name, namespace segments, and field names. Field names come straight
//! from source shapes, so a projection with a `user-id` key is caught here
//! rather than producing an unusable definition.
//!
//! # Examples
//!
//! ```
//! use record_schema_core::{RecordBuilder, Schema, TypeRef, validate_artifact,
//!     ExtractionError};
//!
//! let extractor = |s: &Schema| Ok::<_, ExtractionError>(s.clone());
//! let artifact = RecordBuilder::new()
//!     .source(Schema::anonymous().with_property("id", TypeRef::Int))
//!     .type_name("Row")
//!     .generate(&extractor)
//!     .unwrap();
//! assert!(validate_artifact(&artifact).is_empty());
//! ```

use thiserror::Error;

use crate::OutputArtifact;

/// Structural problems found in an emitted artifact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Output type name is empty or whitespace-only.
    #[error("output type name cannot be empty")]
    EmptyTypeName,
    /// Output type name is not a valid identifier.
    #[error("invalid output type name: {0}")]
    InvalidTypeName(String),
    /// A namespace segment is not a valid identifier.
    #[error("invalid namespace segment: {0}")]
    InvalidNamespace(String),
    /// A field name is not a valid identifier.
    #[error("invalid field name: {0}")]
    InvalidFieldName(String),
    /// A field name collides with a reserved keyword.
    #[error("field name is a reserved keyword: {0}")]
    ReservedFieldName(String),
}

/// Reserved words that cannot be used as emitted field names.
const RESERVED: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while",
];

/// Validates an output artifact.
///
/// Returns an empty vector for a valid artifact; the zero-field artifact is
/// valid by definition.
pub fn validate_artifact(artifact: &OutputArtifact) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let name = artifact.name.trim();
    if name.is_empty() {
        errors.push(ValidationError::EmptyTypeName);
        return errors;
    }
    if !is_identifier(name) {
        errors.push(ValidationError::InvalidTypeName(name.to_string()));
        return errors;
    }

    if let Some(namespace) = &artifact.namespace {
        for segment in namespace.split("::") {
            if !is_identifier(segment) {
                errors.push(ValidationError::InvalidNamespace(segment.to_string()));
                return errors;
            }
        }
    }

    for property in &artifact.fields.properties {
        if !is_identifier(&property.name) {
            errors.push(ValidationError::InvalidFieldName(property.name.clone()));
            return errors;
        }
        if RESERVED.contains(&property.name.as_str()) {
            errors.push(ValidationError::ReservedFieldName(property.name.clone()));
            return errors;
        }
    }

    errors
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_alphanumeric() || ch == '_')
}
