//! Fluent builder over a directive log.
//!
//! The builder is thin by design: every method appends one directive (plus,
//! for sources, the host source descriptor) and returns the builder. No
//! validation happens while chaining. All resolution is deferred to
//! [`generate`](RecordBuilder::generate), implemented as a pure fold over
//! the log, so generating twice from the same builder yields identical
//! artifacts.
//!
//! # Examples
//!
//! ```
//! use record_schema_core::{ExtractionError, OutputShape, RecordBuilder, Schema, TypeRef};
//!
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
//! assert!(artifact.converters.is_some());
//! ```

use std::collections::BTreeMap;

use tracing::info;

use crate::convert::SourceSchema;
use crate::{
    emit_converters, emit_type, resolve, validate_artifact, ArtifactRegistry, Directive,
    DirectiveLog, GenerateError, OutputArtifact, OutputShape, Schema, SchemaExtractor, SourceId,
    TypeRef,
};

struct SourceEntry<S> {
    id: SourceId,
    name: Option<String>,
    source: S,
}

/// Accumulates directives and host source descriptors for one record
/// composition.
///
/// Each builder instance owns a private directive log; builders share no
/// mutable state, so any number may run concurrently without coordination.
pub struct RecordBuilder<S> {
    log: DirectiveLog,
    sources: Vec<SourceEntry<S>>,
}

impl<S> Default for RecordBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> RecordBuilder<S> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            log: DirectiveLog::new(),
            sources: Vec::new(),
        }
    }

    fn push_source(mut self, name: Option<String>, source: S) -> Self {
        let id = SourceId::new(self.sources.len() as u32);
        self.log.push(Directive::AddSource(id));
        self.sources.push(SourceEntry { id, name, source });
        self
    }

    /// Adds an anonymous property source (object literal or projection).
    pub fn source(self, source: S) -> Self {
        self.push_source(None, source)
    }

    /// Adds a named property source; named sources get dedicated converters.
    pub fn named_source(self, name: impl Into<String>, source: S) -> Self {
        self.push_source(Some(name.into()), source)
    }

    /// Adds a property.
    pub fn property(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.log.push(Directive::AddProperty {
            name: name.into(),
            ty,
            default: None,
        });
        self
    }

    /// Adds a property with a default value kept as emission metadata.
    pub fn property_with_default(
        mut self,
        name: impl Into<String>,
        ty: TypeRef,
        default: serde_json::Value,
    ) -> Self {
        self.log.push(Directive::AddProperty {
            name: name.into(),
            ty,
            default: Some(default),
        });
        self
    }

    /// Excludes a property. Excluding an absent name is a no-op.
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.log.push(Directive::ExcludeProperty(name.into()));
        self
    }

    /// Excludes a property only when `condition` holds.
    pub fn exclude_if(mut self, name: impl Into<String>, condition: bool) -> Self {
        self.log.push(Directive::ExcludePropertyIf {
            name: name.into(),
            condition,
        });
        self
    }

    /// Rewrites the type of a property in place. Retyping an absent name is
    /// a no-op, so speculative retypes chain safely.
    pub fn retype(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.log.push(Directive::RetypeProperty {
            name: name.into(),
            ty,
        });
        self
    }

    /// Selects the output aggregate shape.
    pub fn shape(mut self, shape: OutputShape) -> Self {
        self.log.push(Directive::SetOutputShape(shape));
        self
    }

    /// Names the output type.
    pub fn type_name(mut self, name: impl Into<String>) -> Self {
        self.log.push(Directive::SetName {
            name: name.into(),
            namespace: None,
        });
        self
    }

    /// Names the output type with a namespace.
    pub fn qualified_type_name(
        mut self,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        self.log.push(Directive::SetName {
            name: name.into(),
            namespace: Some(namespace.into()),
        });
        self
    }

    /// Switches converter emission on or off (off unless requested).
    pub fn converters(mut self, enabled: bool) -> Self {
        self.log.push(Directive::EnableConverters(enabled));
        self
    }

    /// The accumulated directive log.
    pub fn log(&self) -> &DirectiveLog {
        &self.log
    }

    /// Resolves the directive log and emits the output artifact.
    ///
    /// Runs extraction per add-source directive in log order (the first
    /// failure is fatal for the whole pass, attributed to its source), then
    /// the combinator fold, emission, and validation. The builder is not
    /// consumed: calling `generate` again yields an identical artifact.
    ///
    /// # Errors
    ///
    /// [`GenerateError::Extraction`] for a source that cannot yield a
    /// schema, [`GenerateError::MissingName`] when no type name was set,
    /// [`GenerateError::Invalid`] when the artifact fails validation.
    pub fn generate<E>(&self, extractor: &E) -> Result<OutputArtifact, GenerateError>
    where
        E: SchemaExtractor<S>,
    {
        let mut schemas: BTreeMap<SourceId, Schema> = BTreeMap::new();
        let mut source_schemas: Vec<SourceSchema> = Vec::with_capacity(self.sources.len());
        for entry in &self.sources {
            let mut schema =
                extractor
                    .extract(&entry.source)
                    .map_err(|error| GenerateError::Extraction {
                        source_id: entry.id,
                        error,
                    })?;
            if let Some(name) = &entry.name {
                schema.source_name = Some(name.clone());
            }
            schemas.insert(entry.id, schema.clone());
            source_schemas.push(SourceSchema {
                id: entry.id,
                schema,
                is_named: entry.name.is_some(),
            });
        }

        let (name, namespace) = self.output_name().ok_or(GenerateError::MissingName)?;
        let shape = self.output_shape();
        let converters_enabled = self.converters_enabled();

        let resolved = resolve(&self.log, &schemas)?;
        let definition = emit_type(&resolved, shape, &name, namespace.as_deref());
        let converters = emit_converters(&resolved, &source_schemas, converters_enabled);

        let artifact = OutputArtifact {
            name: definition.name,
            namespace: definition.namespace,
            shape: definition.shape,
            fields: definition.fields,
            must_initialize: definition.must_initialize,
            source: definition.source,
            converters,
        };

        let errors = validate_artifact(&artifact);
        if !errors.is_empty() {
            return Err(GenerateError::Invalid(errors));
        }

        info!(
            name = %artifact.qualified_name(),
            shape = ?artifact.shape,
            fields = artifact.field_count(),
            converters = artifact.converters.is_some(),
            "Generated record artifact"
        );
        Ok(artifact)
    }

    /// Generates and registers the artifact in one step, returning the
    /// registered artifact. Re-running for the same qualified name replaces
    /// the previous registration (last registration wins).
    pub fn generate_into<E>(
        &self,
        extractor: &E,
        registry: &mut ArtifactRegistry,
    ) -> Result<OutputArtifact, GenerateError>
    where
        E: SchemaExtractor<S>,
    {
        let artifact = self.generate(extractor)?;
        registry.register(artifact.clone());
        Ok(artifact)
    }

    /// Last `SetName` directive wins.
    fn output_name(&self) -> Option<(String, Option<String>)> {
        self.log.iter().rev().find_map(|d| match d {
            Directive::SetName { name, namespace } => Some((name.clone(), namespace.clone())),
            _ => None,
        })
    }

    /// Last `SetOutputShape` directive wins; defaults to the mutable shape.
    fn output_shape(&self) -> OutputShape {
        self.log
            .iter()
            .rev()
            .find_map(|d| match d {
                Directive::SetOutputShape(shape) => Some(*shape),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Last `EnableConverters` directive wins; off unless requested.
    fn converters_enabled(&self) -> bool {
        self.log
            .iter()
            .rev()
            .find_map(|d| match d {
                Directive::EnableConverters(enabled) => Some(*enabled),
                _ => None,
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExtractionError;

    fn identity_extractor() -> impl SchemaExtractor<Schema> {
        |s: &Schema| Ok::<_, ExtractionError>(s.clone())
    }

    #[test]
    fn test_generate_requires_a_type_name() {
        let builder = RecordBuilder::<Schema>::new().property("x", TypeRef::Int);
        let err = builder.generate(&identity_extractor()).unwrap_err();
        assert_eq!(err, GenerateError::MissingName);
    }

    #[test]
    fn test_last_steering_directive_wins() {
        let builder = RecordBuilder::<Schema>::new()
            .shape(OutputShape::ImmutableAggregate)
            .type_name("First")
            .shape(OutputShape::ByValueAggregate)
            .qualified_type_name("api", "Second")
            .converters(true)
            .converters(false);

        let artifact = builder.generate(&identity_extractor()).unwrap();
        assert_eq!(artifact.qualified_name(), "api::Second");
        assert_eq!(artifact.shape, OutputShape::ByValueAggregate);
        assert!(artifact.converters.is_none());
    }

    #[test]
    fn test_extraction_failure_is_attributed_to_its_source() {
        let failing = |_: &Schema| {
            Err::<Schema, _>(ExtractionError::Unreadable("broken source".into()))
        };
        let builder = RecordBuilder::new()
            .source(Schema::anonymous())
            .type_name("Broken");

        match builder.generate(&failing).unwrap_err() {
            GenerateError::Extraction { source_id, error } => {
                assert_eq!(source_id, SourceId::new(0));
                assert_eq!(error, ExtractionError::Unreadable("broken source".into()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_builder_name_overrides_extracted_source_name() {
        let builder = RecordBuilder::new()
            .named_source(
                "Account",
                Schema::named("RawAccount").with_property("id", TypeRef::Int),
            )
            .type_name("AccountDto")
            .converters(true);

        let artifact = builder.generate(&identity_extractor()).unwrap();
        let set = artifact.converters.unwrap();
        assert!(set.names().contains(&"from_account".to_string()));
    }
}
