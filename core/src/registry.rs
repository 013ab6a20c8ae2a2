//! Artifact registry.
//!
//! Collects emitted artifacts keyed by qualified name so an emission sink
//! (code writer, doc generator, host binding layer) can consume them as one
//! bundle. Registration is idempotent per qualified name: re-registering
//! replaces the previous artifact in place, keeping the original position.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{OutputArtifact, ARTIFACT_CONTRACT_VERSION};

/// Insertion-ordered collection of generated artifacts.
///
/// # Examples
///
/// ```
/// use record_schema_core::{ArtifactRegistry, ExtractionError, RecordBuilder, Schema, TypeRef};
///
/// let extractor = |s: &Schema| Ok::<_, ExtractionError>(s.clone());
/// let mut registry = ArtifactRegistry::new();
///
/// RecordBuilder::new()
///     .source(Schema::anonymous().with_property("id", TypeRef::Int))
///     .type_name("Row")
///     .generate_into(&extractor, &mut registry)
///     .unwrap();
///
/// assert_eq!(registry.qualified_names(), vec!["Row"]);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactRegistry {
    artifacts: IndexMap<String, OutputArtifact>,
}

impl ArtifactRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an artifact under its qualified name.
    ///
    /// Last registration wins; the artifact keeps its original position in
    /// iteration order when replaced.
    pub fn register(&mut self, artifact: OutputArtifact) {
        let key = artifact.qualified_name();
        let replaced = self.artifacts.insert(key.clone(), artifact).is_some();
        debug!(name = %key, replaced, "Registered artifact");
    }

    /// Looks up an artifact by qualified name (`namespace::Name` or the bare
    /// name for artifacts without a namespace).
    pub fn get(&self, qualified_name: &str) -> Option<&OutputArtifact> {
        self.artifacts.get(qualified_name)
    }

    /// Number of registered artifacts.
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Returns `true` when no artifact has been registered.
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Qualified names in registration order.
    pub fn qualified_names(&self) -> Vec<&str> {
        self.artifacts.keys().map(String::as_str).collect()
    }

    /// Iterates artifacts in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &OutputArtifact> {
        self.artifacts.values()
    }

    /// Packages the registry for serialization, stamped with the artifact
    /// contract version.
    pub fn into_bundle(self) -> ArtifactBundle {
        ArtifactBundle {
            contract_version: ARTIFACT_CONTRACT_VERSION.to_string(),
            artifacts: self.artifacts,
        }
    }
}

/// Serializable snapshot of a registry, stamped with the contract version so
/// a consumer can reject bundles produced under an incompatible contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactBundle {
    pub contract_version: String,
    pub artifacts: IndexMap<String, OutputArtifact>,
}
