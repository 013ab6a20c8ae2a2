//! Error types for extraction, resolution, conversion, and generation.
//!
//! The taxonomy is deliberately small: extraction failures are fatal for the
//! resolution they feed, converter null inputs fail synchronously at call
//! time, and every missing-name directive target is a silent no-op rather
//! than an error.

use thiserror::Error;

use crate::{SourceId, ValidationError};

/// A source could not yield a schema.
///
/// Surfaced at the add-source resolution step and fatal for that resolution
/// only; retrying without changed input cannot change the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// The source is not an object shape (scalar, array literal, or a
    /// collection whose first element is not an object).
    #[error("source is not an object shape: {0}")]
    NotAnObject(String),

    /// The source could not be read at all.
    #[error("source could not be read: {0}")]
    Unreadable(String),
}

/// Resolution failure inside the schema combinator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// An add-source directive references a source no schema was supplied
    /// for. The only fatal combinator failure; everything else folds.
    #[error("no schema was supplied for {0}")]
    MissingSource(SourceId),
}

/// Failure inside a generated converter invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// Null/absent object passed to a single-object converter.
    #[error("null input passed to a single-object converter")]
    NullInput,

    /// Converter input was not an object value.
    #[error("converter input is not an object")]
    NotAnObject,

    /// No converter is bound to the requested named source.
    #[error("no converter is bound to source '{0}'")]
    UnknownSource(String),

    /// A combined converter exists only when exactly two named sources were
    /// supplied.
    #[error("a combined converter requires exactly two named sources")]
    CombinedUnavailable,
}

/// Failure of a full `generate()` pass.
///
/// The combinator never partially applies a resolution: either a complete
/// artifact is produced or the whole pass fails with the originating error,
/// attributed to the source that caused it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    /// Extraction failed for one add-source directive.
    #[error("extraction failed for {source_id}: {error}")]
    Extraction {
        source_id: SourceId,
        #[source]
        error: ExtractionError,
    },

    /// The combinator could not resolve the directive log.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// No output type name was set before generating.
    #[error("no output type name was set; call type_name() before generate()")]
    MissingName,

    /// The emitted artifact failed structural validation.
    #[error("generated artifact failed validation: {0:?}")]
    Invalid(Vec<ValidationError>),
}
