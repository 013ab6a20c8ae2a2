//! DTO composition example.
//!
//! Demonstrates deriving a trimmed, immutable DTO from a domain shape:
//! exclude a sensitive field, add a computed one, emit the type definition,
//! and convert live instances through the generated converters.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p record-schema-demos --example compose_dto
//! ```

use record_schema_core::{OutputShape, RecordBuilder, TypeRef};
use record_schema_extract::{ValueExtractor, ValueSource};
use serde_json::json;

fn main() {
    let user = json!({
        "name": "Ada",
        "email": "ada@example.com",
        "password_hash": "2b$12$...",
        "age": 36
    });

    let artifact = RecordBuilder::new()
        .named_source("User", ValueSource::named("User", user.clone()))
        .exclude("password_hash")
        .property("active", TypeRef::Bool)
        .shape(OutputShape::ImmutableAggregate)
        .type_name("UserDto")
        .converters(true)
        .generate(&ValueExtractor)
        .unwrap();

    println!("Emitted {} ({} fields):", artifact.qualified_name(), artifact.field_count());
    println!();
    println!("{}", artifact.source);

    let converters = artifact.converters.unwrap();
    println!("Converters: {}", converters.names().join(", "));

    let record = converters.from_named("User", &user).unwrap();
    println!();
    println!("Converted instance:");
    println!("{}", serde_json::to_string_pretty(&record).unwrap());
}
