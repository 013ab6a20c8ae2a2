//! Schema combinator: folds a directive log into one resolved schema.
//!
//! Resolution is a pure, single-pass, left-to-right fold over the log,
//! maintaining an insertion-ordered `name -> property` map. The rule is
//! "last directive affecting a name wins, full stop":
//!
//! - same-named contributions overwrite the type **in place**, keeping the
//!   original position;
//! - exclusions remove whatever is currently mapped, regardless of where it
//!   came from; excluding an absent name is a no-op;
//! - a later add re-inserts an excluded name **at the end**;
//! - retyping an absent name is a silent no-op, so speculative retypes
//!   compose safely.
//!
//! # Examples
//!
//! ```
//! use std::collections::BTreeMap;
//! use record_schema_core::{resolve, Directive, DirectiveLog, Schema, SourceId, TypeRef};
//!
//! let id = SourceId::new(0);
//! let mut schemas = BTreeMap::new();
//! schemas.insert(
//!     id,
//!     Schema::named("User")
//!         .with_property("name", TypeRef::Str)
//!         .with_property("password", TypeRef::Str)
//!         .with_property("age", TypeRef::Int),
//! );
//!
//! let mut log = DirectiveLog::new();
//! log.push(Directive::AddSource(id));
//! log.push(Directive::ExcludeProperty("password".into()));
//!
//! let resolved = resolve(&log, &schemas).unwrap();
//! assert_eq!(resolved.names(), vec!["name", "age"]);
//! ```

use std::collections::BTreeMap;

use indexmap::IndexMap;
use tracing::debug;

use crate::{
    Directive, DirectiveLog, PropertyOrigin, ResolveError, ResolvedProperty, ResolvedSchema,
    Schema, SourceId,
};

/// Resolves a directive log against the schemas extracted for its sources.
///
/// Directives that only steer emission (`SetOutputShape`, `SetName`,
/// `EnableConverters`) never touch the property map. The returned schema
/// lists properties in first-insertion order among surviving names; the
/// same inputs always produce an identical result.
///
/// # Errors
///
/// [`ResolveError::MissingSource`] when an add-source directive references
/// a source id absent from `schemas`.
pub fn resolve(
    log: &DirectiveLog,
    schemas: &BTreeMap<SourceId, Schema>,
) -> Result<ResolvedSchema, ResolveError> {
    let mut map: IndexMap<String, ResolvedProperty> = IndexMap::new();

    for directive in log {
        match directive {
            Directive::AddSource(id) => {
                let schema = schemas
                    .get(id)
                    .ok_or(ResolveError::MissingSource(*id))?;
                append_source(&mut map, *id, schema);
            }
            Directive::AddProperty { name, ty, default } => {
                match map.get_mut(name) {
                    Some(existing) => {
                        // Position preserved; type and default replaced.
                        existing.ty = ty.clone();
                        existing.default = default.clone();
                        existing.origin = PropertyOrigin::Added;
                    }
                    None => {
                        map.insert(
                            name.clone(),
                            ResolvedProperty {
                                name: name.clone(),
                                ty: ty.clone(),
                                default: default.clone(),
                                origin: PropertyOrigin::Added,
                            },
                        );
                    }
                }
            }
            Directive::ExcludeProperty(name) => {
                map.shift_remove(name);
            }
            Directive::ExcludePropertyIf { name, condition } => {
                if *condition {
                    map.shift_remove(name);
                }
            }
            Directive::RetypeProperty { name, ty } => {
                if let Some(existing) = map.get_mut(name) {
                    existing.ty = ty.clone();
                }
            }
            Directive::SetOutputShape(_)
            | Directive::SetName { .. }
            | Directive::EnableConverters(_) => {}
        }
    }

    debug!(
        directives = log.len(),
        properties = map.len(),
        "Resolved directive log"
    );

    Ok(ResolvedSchema {
        properties: map.into_values().collect(),
    })
}

fn append_source(map: &mut IndexMap<String, ResolvedProperty>, id: SourceId, schema: &Schema) {
    for property in &schema.properties {
        match map.get_mut(&property.name) {
            Some(existing) => {
                // Later occurrence wins; position and name stay put. A
                // source contribution carries no default, so any default
                // metadata from an earlier add is dropped with its type.
                existing.ty = property.ty.clone();
                existing.default = None;
                existing.origin = PropertyOrigin::Source(id);
            }
            None => {
                map.insert(
                    property.name.clone(),
                    ResolvedProperty {
                        name: property.name.clone(),
                        ty: property.ty.clone(),
                        default: None,
                        origin: PropertyOrigin::Source(id),
                    },
                );
            }
        }
    }
}
