//! Core data model for record composition.
//!
//! This module defines the types that flow through a resolution pass:
//! extracted [`Schema`]s feed the combinator, which produces a
//! [`ResolvedSchema`] handed to the emitters. All types serialize with
//! [`serde`] so directive logs and artifacts can round-trip through JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Version of the artifact contract (semver).
///
/// Embedded in every [`ArtifactRegistry`](crate::ArtifactRegistry) bundle to
/// track compatibility across artifact format revisions.
pub const ARTIFACT_CONTRACT_VERSION: &str = "1.0.0";

/// Opaque semantic type descriptor for a record property.
///
/// A `TypeRef` is either a primitive kind, a nullability wrapper, or an
/// opaque named token for complex and collection types. Equality is by
/// descriptor value, never by structural shape of whatever the name refers
/// to.
///
/// # Examples
///
/// ```
/// use record_schema_core::TypeRef;
///
/// assert_eq!(TypeRef::default(), TypeRef::Any);
/// assert_eq!(TypeRef::Int.to_string(), "i64");
/// assert_eq!(TypeRef::nullable(TypeRef::Str).to_string(), "Option<String>");
/// assert_eq!(TypeRef::named("Address").to_string(), "Address");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TypeRef {
    /// Boolean.
    Bool,
    /// Signed integer.
    Int,
    /// Floating-point number.
    Float,
    /// Fixed-point decimal, kept distinct from `Float` for retype fidelity.
    Decimal,
    /// Text.
    Str,
    /// Opaque named token for complex or collection types.
    Named(String),
    /// Nullable wrapper around another descriptor.
    Nullable(Box<TypeRef>),
    /// Unknown/any type (the default).
    #[default]
    Any,
}

impl TypeRef {
    /// Creates an opaque named descriptor.
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    /// Wraps a descriptor in a nullability flag.
    pub fn nullable(inner: TypeRef) -> Self {
        TypeRef::Nullable(Box::new(inner))
    }

    /// Returns `true` if this descriptor carries the nullability flag.
    pub fn is_nullable(&self) -> bool {
        matches!(self, TypeRef::Nullable(_))
    }

    /// Returns `true` if a zero value exists for this descriptor without a
    /// caller-supplied default.
    ///
    /// Text and named (complex/collection) types have no meaningful default,
    /// so fields of those types are caller-must-initialize unless a default
    /// value was attached.
    pub fn has_implicit_default(&self) -> bool {
        match self {
            TypeRef::Bool | TypeRef::Int | TypeRef::Float | TypeRef::Decimal => true,
            TypeRef::Nullable(_) | TypeRef::Any => true,
            TypeRef::Str | TypeRef::Named(_) => false,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Bool => f.write_str("bool"),
            TypeRef::Int => f.write_str("i64"),
            TypeRef::Float => f.write_str("f64"),
            TypeRef::Decimal => f.write_str("Decimal"),
            TypeRef::Str => f.write_str("String"),
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::Nullable(inner) => write!(f, "Option<{inner}>"),
            TypeRef::Any => f.write_str("serde_json::Value"),
        }
    }
}

/// A single `(name, type)` pair within a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Property name, unique within one schema.
    pub name: String,
    /// Semantic type descriptor.
    pub ty: TypeRef,
}

impl Property {
    /// Creates a property.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Ordered property list extracted from one source.
///
/// Produced once per add-source directive and immutable after extraction.
/// Ordering follows the declaration/member order of the source; names are
/// unique within one schema.
///
/// # Examples
///
/// ```
/// use record_schema_core::{Schema, TypeRef};
///
/// let user = Schema::named("User")
///     .with_property("name", TypeRef::Str)
///     .with_property("age", TypeRef::Int);
///
/// assert_eq!(user.len(), 2);
/// assert_eq!(user.source_name.as_deref(), Some("User"));
/// assert_eq!(user.property("age").unwrap().ty, TypeRef::Int);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Name of the source this schema came from, when the source is a named
    /// shape rather than an anonymous literal or projection.
    pub source_name: Option<String>,
    /// Properties in source declaration order.
    pub properties: Vec<Property>,
}

impl Schema {
    /// Creates an empty anonymous schema.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Creates an empty schema attributed to a named source.
    pub fn named(source_name: impl Into<String>) -> Self {
        Self {
            source_name: Some(source_name.into()),
            properties: Vec::new(),
        }
    }

    /// Appends a property, builder-style.
    pub fn with_property(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.properties.push(Property::new(name, ty));
        self
    }

    /// Finds a property by exact name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Property names in declaration order.
    pub fn property_names(&self) -> Vec<&str> {
        self.properties.iter().map(|p| p.name.as_str()).collect()
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns `true` when the schema has no properties.
    ///
    /// Empty schemas are legal (e.g. extraction from an empty collection)
    /// and must be tolerated by every downstream component.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Handle tying an add-source directive to the schema extracted for it.
///
/// Assigned sequentially by the builder; stable within one directive log.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SourceId(u32);

impl SourceId {
    /// Creates a source id from its raw index.
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Raw index value.
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source #{}", self.0)
    }
}

/// Output aggregate shape selection.
///
/// An explicit tag rather than host-language sugar: the shape decides the
/// field, constructor, and equality contract of the emitted type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputShape {
    /// Independently settable fields with copy (value) semantics on pass.
    ByValueAggregate,
    /// Independently settable fields, identity-based equality (the default).
    #[default]
    MutableAggregate,
    /// Positional constructor in schema order, no setters, structural
    /// equality over all fields.
    ImmutableAggregate,
}

/// Where a resolved property was introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyOrigin {
    /// Contributed by the schema extracted for an add-source directive.
    Source(SourceId),
    /// Introduced by an add-property directive.
    Added,
}

/// One entry of a [`ResolvedSchema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedProperty {
    /// Property name, unique across the resolved schema.
    pub name: String,
    /// Final type descriptor after all retypes.
    pub ty: TypeRef,
    /// Default value attached by an add-property directive, kept as emission
    /// metadata.
    pub default: Option<serde_json::Value>,
    /// Last writer that touched this entry.
    pub origin: PropertyOrigin,
}

/// Final ordered, unique-by-name property list.
///
/// The contract handed to both emitters. Every name traces back to either a
/// source schema entry that survived exclusion or an add-property directive,
/// possibly with its type overwritten by a later retype.
///
/// # Examples
///
/// ```
/// use record_schema_core::ResolvedSchema;
///
/// let empty = ResolvedSchema::default();
/// assert!(empty.is_empty());
/// assert!(empty.names().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSchema {
    /// Properties in first-insertion order among surviving names.
    pub properties: Vec<ResolvedProperty>,
}

impl ResolvedSchema {
    /// Finds a resolved property by exact name.
    pub fn property(&self, name: &str) -> Option<&ResolvedProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Property names in resolved order.
    pub fn names(&self) -> Vec<&str> {
        self.properties.iter().map(|p| p.name.as_str()).collect()
    }

    /// Number of resolved properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns `true` for the zero-field schema, a legal output.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_ref_display_tokens() {
        assert_eq!(TypeRef::Bool.to_string(), "bool");
        assert_eq!(TypeRef::Decimal.to_string(), "Decimal");
        assert_eq!(
            TypeRef::nullable(TypeRef::named("Vec<i64>")).to_string(),
            "Option<Vec<i64>>"
        );
        assert_eq!(TypeRef::Any.to_string(), "serde_json::Value");
    }

    #[test]
    fn test_type_ref_equality_is_by_value() {
        assert_eq!(TypeRef::named("Address"), TypeRef::named("Address"));
        assert_ne!(TypeRef::named("Address"), TypeRef::named("Location"));
        assert_ne!(TypeRef::Str, TypeRef::nullable(TypeRef::Str));
    }

    #[test]
    fn test_implicit_defaults() {
        assert!(TypeRef::Int.has_implicit_default());
        assert!(TypeRef::nullable(TypeRef::Str).has_implicit_default());
        assert!(!TypeRef::Str.has_implicit_default());
        assert!(!TypeRef::named("Address").has_implicit_default());
    }

    #[test]
    fn test_schema_builder_and_lookup() {
        let schema = Schema::anonymous()
            .with_property("x", TypeRef::Int)
            .with_property("y", TypeRef::Str);

        assert_eq!(schema.property_names(), vec!["x", "y"]);
        assert!(schema.property("z").is_none());
        assert!(schema.source_name.is_none());
    }
}
