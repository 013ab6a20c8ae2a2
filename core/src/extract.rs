//! Schema extractor boundary.
//!
//! Extraction is the only inbound capability the core requires from its
//! host: given a source descriptor, produce a [`Schema`]. The core makes no
//! assumption about the introspection mechanism behind it — reflection, an
//! IDL, explicit schema literals, or the JSON-value extractor shipped in
//! `record-schema-extract` all satisfy the same contract.

use crate::{ExtractionError, Schema};

/// Produces a [`Schema`] for a host source descriptor.
///
/// The contract is a pure function over already-available in-memory data:
/// extraction never blocks, retries, or suspends. Any closure with the
/// right signature is an extractor, which keeps tests and embeddings cheap.
///
/// # Examples
///
/// ```
/// use record_schema_core::{ExtractionError, Schema, SchemaExtractor, TypeRef};
///
/// // Sources that are already schemas extract as themselves.
/// let extractor = |s: &Schema| Ok::<_, ExtractionError>(s.clone());
/// let schema = extractor
///     .extract(&Schema::anonymous().with_property("x", TypeRef::Int))
///     .unwrap();
/// assert_eq!(schema.property_names(), vec!["x"]);
/// ```
pub trait SchemaExtractor<S> {
    /// Extracts the ordered property list of `source`.
    ///
    /// # Errors
    ///
    /// [`ExtractionError`] when the source cannot yield a schema; the
    /// failure is fatal for the resolution it feeds.
    fn extract(&self, source: &S) -> Result<Schema, ExtractionError>;
}

impl<S, F> SchemaExtractor<S> for F
where
    F: Fn(&S) -> Result<Schema, ExtractionError>,
{
    fn extract(&self, source: &S) -> Result<Schema, ExtractionError> {
        self(source)
    }
}
