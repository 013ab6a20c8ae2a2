//! Directive model: the ordered description of "what to build".
//!
//! A [`DirectiveLog`] is the single serialized description of a record
//! composition. It is purely additive and append-only; nothing is validated
//! at append time. Order matters: the combinator folds the log strictly left
//! to right, and directive order decides tie-breaks between same-named
//! contributions.

use serde::{Deserialize, Serialize};

use crate::{OutputShape, SourceId, TypeRef};

/// One typed operation in a directive log.
///
/// # Examples
///
/// ```
/// use record_schema_core::{Directive, DirectiveLog, TypeRef};
///
/// let mut log = DirectiveLog::new();
/// log.push(Directive::AddProperty {
///     name: "age".into(),
///     ty: TypeRef::Int,
///     default: None,
/// });
/// log.push(Directive::ExcludeProperty("password".into()));
/// assert_eq!(log.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Directive {
    /// Pull every property of the schema extracted for this source.
    AddSource(SourceId),
    /// Insert or overwrite a single property; the default value, if any, is
    /// kept as emission metadata.
    AddProperty {
        name: String,
        ty: TypeRef,
        default: Option<serde_json::Value>,
    },
    /// Remove the named property wherever it came from. Absent names are a
    /// silent no-op.
    ExcludeProperty(String),
    /// Remove the named property only when the condition holds.
    ExcludePropertyIf { name: String, condition: bool },
    /// Rewrite the type of an existing property in place. Absent names are a
    /// silent no-op, so speculative retypes are always safe.
    RetypeProperty { name: String, ty: TypeRef },
    /// Select the output aggregate shape; the last occurrence wins.
    SetOutputShape(OutputShape),
    /// Name the output type, optionally qualified; the last occurrence wins.
    SetName {
        name: String,
        namespace: Option<String>,
    },
    /// Switch converter emission on or off; the last occurrence wins.
    EnableConverters(bool),
}

/// Append-only ordered sequence of [`Directive`]s.
///
/// Private to one builder instance; resolution never mutates it, so a log
/// can be resolved any number of times with identical results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectiveLog {
    directives: Vec<Directive>,
}

impl DirectiveLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a directive. No validation happens here.
    pub fn push(&mut self, directive: Directive) {
        self.directives.push(directive);
    }

    /// Directives in append order.
    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Number of directives.
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// Returns `true` for a log with no directives.
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Iterates the log in append order.
    pub fn iter(&self) -> std::slice::Iter<'_, Directive> {
        self.directives.iter()
    }
}

impl<'a> IntoIterator for &'a DirectiveLog {
    type Item = &'a Directive;
    type IntoIter = std::slice::Iter<'a, Directive>;

    fn into_iter(self) -> Self::IntoIter {
        self.directives.iter()
    }
}
