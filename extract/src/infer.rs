//! Shallow type inference for JSON values.

use record_schema_core::TypeRef;

/// Infers a type descriptor for one property value.
///
/// Inference is shallow and covers one level: nested objects become opaque
/// named tokens derived from the property key, arrays become `Vec<T>` tokens
/// from their first element, and nulls become nullable-any.
///
/// # Examples
///
/// ```
/// use record_schema_core::TypeRef;
/// use record_schema_extract::property_type;
/// use serde_json::json;
///
/// assert_eq!(property_type("age", &json!(42)), TypeRef::Int);
/// assert_eq!(property_type("home_address", &json!({"street": "x"})),
///     TypeRef::named("HomeAddress"));
/// assert_eq!(property_type("tags", &json!(["a", "b"])),
///     TypeRef::named("Vec<String>"));
/// ```
pub fn property_type(key: &str, value: &serde_json::Value) -> TypeRef {
    match value {
        serde_json::Value::Null => TypeRef::nullable(TypeRef::Any),
        serde_json::Value::Bool(_) => TypeRef::Bool,
        serde_json::Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                TypeRef::Int
            } else {
                TypeRef::Float
            }
        }
        serde_json::Value::String(_) => TypeRef::Str,
        serde_json::Value::Array(items) => TypeRef::named(format!(
            "Vec<{}>",
            items
                .first()
                .map(|first| property_type(key, first))
                .unwrap_or_default()
        )),
        serde_json::Value::Object(_) => TypeRef::named(pascal_case(key)),
    }
}

/// Derives a type token from a property key (`home_address` → `HomeAddress`).
pub(crate) fn pascal_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = true;
    for ch in key.chars() {
        if ch.is_alphanumeric() {
            if upper_next {
                out.extend(ch.to_uppercase());
            } else {
                out.push(ch);
            }
            upper_next = false;
        } else {
            upper_next = true;
        }
    }
    out
}
