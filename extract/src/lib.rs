//! JSON value schema extraction for `record-schema-core`.
//!
//! Implements the [`SchemaExtractor`](record_schema_core::SchemaExtractor)
//! boundary over in-memory JSON values: named shape instances, anonymous
//! object literals, and homogeneous collections all extract into ordered
//! [`Schema`](record_schema_core::Schema)s with shallowly inferred property
//! types.
//!
//! # Examples
//!
//! ```
//! use record_schema_core::{OutputShape, RecordBuilder, TypeRef};
//! use record_schema_extract::{ValueExtractor, ValueSource};
//! use serde_json::json;
//!
//! let artifact = RecordBuilder::new()
//!     .named_source(
//!         "User",
//!         ValueSource::named("User", json!({"name": "Ada", "age": 36})),
//!     )
//!     .property("active", TypeRef::Bool)
//!     .type_name("UserDto")
//!     .generate(&ValueExtractor)
//!     .unwrap();
//!
//! assert_eq!(artifact.fields.names(), vec!["name", "age", "active"]);
//! ```

mod extractor;
mod infer;

pub use extractor::{ValueExtractor, ValueSource};
pub use infer::property_type;
