//! Type emitter: turns a resolved schema into an output type definition.
//!
//! Emission is total: every valid [`ResolvedSchema`] produces a definition,
//! including the empty one (a zero-field aggregate is a legal, fully
//! supported output). The selected [`OutputShape`] decides the field,
//! constructor, and equality contract; rendering is deterministic, so the
//! same inputs always yield byte-identical source text.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::convert::ConverterSet;
use crate::{OutputShape, ResolvedSchema, TypeRef};

/// Structured result of one type emission.
///
/// # Examples
///
/// ```
/// use record_schema_core::{emit_type, OutputShape, ResolvedSchema};
///
/// let def = emit_type(&ResolvedSchema::default(), OutputShape::MutableAggregate, "Empty", None);
/// assert!(def.source.contains("pub struct Empty;"));
/// assert!(def.must_initialize.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Unqualified output type name.
    pub name: String,
    /// Optional namespace the sink should place the type in.
    pub namespace: Option<String>,
    /// Shape the definition was emitted for.
    pub shape: OutputShape,
    /// Field list in resolved order.
    pub fields: ResolvedSchema,
    /// Fields with neither an implicit nor a supplied default. The rendered
    /// definition forces explicit initialization of these.
    pub must_initialize: Vec<String>,
    /// Rendered type definition source text.
    pub source: String,
}

/// The artifact of one full resolution pass.
///
/// Created once per pass, immutable, and handed to the external emission
/// sink; how it is persisted, compiled, or displayed is the sink's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputArtifact {
    /// Unqualified output type name.
    pub name: String,
    /// Optional namespace.
    pub namespace: Option<String>,
    /// Selected aggregate shape.
    pub shape: OutputShape,
    /// Resolved field list.
    pub fields: ResolvedSchema,
    /// Fields the caller must initialize explicitly.
    pub must_initialize: Vec<String>,
    /// Rendered type definition.
    pub source: String,
    /// Converter set, present only when converter emission was enabled.
    pub converters: Option<ConverterSet>,
}

impl OutputArtifact {
    /// Fully qualified registration name (`namespace::name` or bare name).
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}::{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Number of emitted fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

/// Emits a type definition for a resolved schema.
///
/// Never fails: the empty schema renders as a unit struct. Per-shape
/// contracts:
///
/// - [`OutputShape::ImmutableAggregate`] — private fields, positional
///   constructor in schema order, getters, structural equality.
/// - [`OutputShape::MutableAggregate`] — public fields, default-constructible
///   when every field is defaultable, no derived equality.
/// - [`OutputShape::ByValueAggregate`] — same field contract as the mutable
///   shape, with copy-on-pass value semantics.
///
/// # Examples
///
/// ```
/// use record_schema_core::{emit_type, OutputShape, ResolvedSchema, ResolvedProperty,
///     PropertyOrigin, TypeRef};
///
/// let resolved = ResolvedSchema {
///     properties: vec![ResolvedProperty {
///         name: "age".into(),
///         ty: TypeRef::Int,
///         default: None,
///         origin: PropertyOrigin::Added,
///     }],
/// };
/// let def = emit_type(&resolved, OutputShape::ImmutableAggregate, "Person", None);
/// assert!(def.source.contains("pub fn new(age: i64) -> Self"));
/// assert!(def.source.contains("PartialEq"));
/// ```
pub fn emit_type(
    resolved: &ResolvedSchema,
    shape: OutputShape,
    name: &str,
    namespace: Option<&str>,
) -> TypeDefinition {
    let must_initialize: Vec<String> = resolved
        .properties
        .iter()
        .filter(|p| !p.ty.has_implicit_default() && p.default.is_none())
        .map(|p| p.name.clone())
        .collect();

    let source = match shape {
        OutputShape::ImmutableAggregate => render_immutable(resolved, name),
        OutputShape::MutableAggregate | OutputShape::ByValueAggregate => {
            render_settable(resolved, shape, name, &must_initialize)
        }
    };

    TypeDefinition {
        name: name.to_string(),
        namespace: namespace.map(str::to_string),
        shape,
        fields: resolved.clone(),
        must_initialize,
        source,
    }
}

fn shape_comment(shape: OutputShape) -> &'static str {
    match shape {
        OutputShape::ImmutableAggregate => {
            "/// Immutable aggregate; structural equality over all fields."
        }
        OutputShape::MutableAggregate => {
            "/// Mutable aggregate; equality is by identity, none is derived."
        }
        OutputShape::ByValueAggregate => {
            "/// By-value aggregate; instances copy on pass and never alias."
        }
    }
}

fn render_immutable(resolved: &ResolvedSchema, name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", shape_comment(OutputShape::ImmutableAggregate));
    let _ = writeln!(out, "#[derive(Debug, Clone, PartialEq)]");

    if resolved.is_empty() {
        let _ = writeln!(out, "pub struct {name};");
        let _ = writeln!(out);
        let _ = writeln!(out, "impl {name} {{");
        let _ = writeln!(out, "    pub fn new() -> Self {{");
        let _ = writeln!(out, "        Self");
        let _ = writeln!(out, "    }}");
        let _ = writeln!(out, "}}");
        return out;
    }

    let _ = writeln!(out, "pub struct {name} {{");
    for p in &resolved.properties {
        let _ = writeln!(out, "    {}: {},", p.name, p.ty);
    }
    let _ = writeln!(out, "}}");
    let _ = writeln!(out);

    let params: Vec<String> = resolved
        .properties
        .iter()
        .map(|p| format!("{}: {}", p.name, p.ty))
        .collect();
    let _ = writeln!(out, "impl {name} {{");
    let _ = writeln!(out, "    pub fn new({}) -> Self {{", params.join(", "));
    let _ = writeln!(out, "        Self {{");
    for p in &resolved.properties {
        let _ = writeln!(out, "            {},", p.name);
    }
    let _ = writeln!(out, "        }}");
    let _ = writeln!(out, "    }}");
    for p in &resolved.properties {
        let _ = writeln!(out);
        let _ = writeln!(out, "    pub fn {}(&self) -> &{} {{", p.name, p.ty);
        let _ = writeln!(out, "        &self.{}", p.name);
        let _ = writeln!(out, "    }}");
    }
    let _ = writeln!(out, "}}");
    out
}

fn render_settable(
    resolved: &ResolvedSchema,
    shape: OutputShape,
    name: &str,
    must_initialize: &[String],
) -> String {
    let has_custom_default = resolved.properties.iter().any(|p| p.default.is_some());
    let derive_default = must_initialize.is_empty() && !has_custom_default;

    let mut out = String::new();
    let _ = writeln!(out, "{}", shape_comment(shape));
    if derive_default {
        let _ = writeln!(out, "#[derive(Debug, Clone, Default)]");
    } else {
        let _ = writeln!(out, "#[derive(Debug, Clone)]");
    }

    if resolved.is_empty() {
        let _ = writeln!(out, "pub struct {name};");
        return out;
    }

    let _ = writeln!(out, "pub struct {name} {{");
    for p in &resolved.properties {
        let _ = writeln!(out, "    pub {}: {},", p.name, p.ty);
    }
    let _ = writeln!(out, "}}");

    if derive_default {
        return out;
    }

    if must_initialize.is_empty() {
        // Custom defaults only: the type stays default-constructible through
        // a manual impl carrying the supplied literals.
        let _ = writeln!(out);
        let _ = writeln!(out, "impl Default for {name} {{");
        let _ = writeln!(out, "    fn default() -> Self {{");
        let _ = writeln!(out, "        Self {{");
        for p in &resolved.properties {
            let _ = writeln!(
                out,
                "            {}: {},",
                p.name,
                default_expr(&p.ty, p.default.as_ref())
            );
        }
        let _ = writeln!(out, "        }}");
        let _ = writeln!(out, "    }}");
        let _ = writeln!(out, "}}");
        return out;
    }

    // Caller-must-initialize fields force a constructor; the remaining
    // fields fall back to their supplied or implicit defaults.
    let params: Vec<String> = resolved
        .properties
        .iter()
        .filter(|p| must_initialize.contains(&p.name))
        .map(|p| format!("{}: {}", p.name, p.ty))
        .collect();
    let _ = writeln!(out);
    let _ = writeln!(out, "impl {name} {{");
    let _ = writeln!(out, "    pub fn new({}) -> Self {{", params.join(", "));
    let _ = writeln!(out, "        Self {{");
    for p in &resolved.properties {
        if must_initialize.contains(&p.name) {
            let _ = writeln!(out, "            {},", p.name);
        } else {
            let _ = writeln!(
                out,
                "            {}: {},",
                p.name,
                default_expr(&p.ty, p.default.as_ref())
            );
        }
    }
    let _ = writeln!(out, "        }}");
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out, "}}");
    out
}

fn default_expr(ty: &TypeRef, default: Option<&serde_json::Value>) -> String {
    match default {
        Some(serde_json::Value::String(s)) => format!("{s:?}.to_string()"),
        Some(serde_json::Value::Bool(b)) => b.to_string(),
        Some(serde_json::Value::Number(n)) => match ty {
            TypeRef::Float | TypeRef::Decimal => format!("{n}_f64"),
            TypeRef::Int => format!("{n}_i64"),
            _ => n.to_string(),
        },
        // Null, arrays, and objects fall back to the type's zero value.
        Some(_) | None => "Default::default()".to_string(),
    }
}
