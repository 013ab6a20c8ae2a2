//! Declarative record-type composition.
//!
//! This crate composes output record types from existing property sources.
//! A [`RecordBuilder`] accumulates a [`DirectiveLog`] of add-source,
//! add/exclude/retype property, and emission-steering directives; `generate`
//! extracts a [`Schema`] per source through a host-supplied
//! [`SchemaExtractor`], folds the log into a [`ResolvedSchema`] (a final
//! ordered, unique-by-name property list), and emits an [`OutputArtifact`]
//! holding the rendered type definition plus, when enabled, a
//! [`ConverterSet`] of name-matched instance converters.
//!
//! Main pieces:
//!
//! - [`RecordBuilder`]: fluent directive accumulation and the `generate` pass
//! - [`resolve`]: the combinator fold from directives to a [`ResolvedSchema`]
//! - [`emit_type`] / [`emit_converters`]: the two emitters
//! - [`ArtifactRegistry`]: insertion-ordered sink for generated artifacts
//! - [`SchemaExtractor`]: the host boundary; any closure
//!   `Fn(&S) -> Result<Schema, ExtractionError>` qualifies
//!
//! # Examples
//!
//! ```
//! use record_schema_core::{
//!     ExtractionError, OutputShape, RecordBuilder, Schema, TypeRef,
//! };
//! use serde_json::json;
//!
//! // Hosts plug in their own introspection; schemas extract as themselves
//! // when the sources are already schemas.
//! let extractor = |s: &Schema| Ok::<_, ExtractionError>(s.clone());
//!
//! let user = Schema::named("User")
//!     .with_property("name", TypeRef::Str)
//!     .with_property("password", TypeRef::Str)
//!     .with_property("age", TypeRef::Int);
//!
//! let artifact = RecordBuilder::new()
//!     .named_source("User", user)
//!     .exclude("password")
//!     .property("active", TypeRef::Bool)
//!     .shape(OutputShape::ImmutableAggregate)
//!     .type_name("UserDto")
//!     .converters(true)
//!     .generate(&extractor)
//!     .unwrap();
//!
//! assert_eq!(artifact.fields.names(), vec!["name", "age", "active"]);
//! assert!(artifact.source.contains("pub struct UserDto"));
//!
//! let converters = artifact.converters.unwrap();
//! let record = converters
//!     .from_named("User", &json!({"name": "Ada", "password": "s3cret", "age": 36}))
//!     .unwrap();
//! assert_eq!(record.get("name"), Some(&json!("Ada")));
//! assert!(record.get("password").is_none());
//! ```

mod builder;
mod combine;
mod convert;
mod directive;
mod emit;
mod error;
mod extract;
mod registry;
mod types;
mod validate;

pub use builder::RecordBuilder;
pub use combine::resolve;
pub use convert::{emit_converters, ConverterSet, Record, SourceSchema};
pub use directive::{Directive, DirectiveLog};
pub use emit::{emit_type, OutputArtifact, TypeDefinition};
pub use error::{ConvertError, ExtractionError, GenerateError, ResolveError};
pub use extract::SchemaExtractor;
pub use registry::{ArtifactBundle, ArtifactRegistry};
pub use types::{
    OutputShape, Property, PropertyOrigin, ResolvedProperty, ResolvedSchema, Schema, SourceId,
    TypeRef, ARTIFACT_CONTRACT_VERSION,
};
pub use validate::{validate_artifact, ValidationError};
