//! Two-source merge example.
//!
//! Combines a customer shape and an order shape into one report row,
//! retypes the monetary field for export, and converts paired instances
//! through the combined converter plus a batch through the collection
//! converter.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p record-schema-demos --example merge_sources
//! ```

use record_schema_core::{ArtifactRegistry, RecordBuilder, TypeRef};
use record_schema_extract::{ValueExtractor, ValueSource};
use serde_json::json;

fn main() {
    let customer = json!({"name": "Ada", "email": "ada@example.com"});
    let order = json!({"order_id": 1042, "total": 99.5, "email": "ada@orders.example"});

    let mut registry = ArtifactRegistry::new();
    let artifact = RecordBuilder::new()
        .named_source("Customer", ValueSource::named("Customer", customer.clone()))
        .named_source("Order", ValueSource::named("Order", order.clone()))
        .retype("total", TypeRef::Str)
        .qualified_type_name("reports", "OrderRow")
        .converters(true)
        .generate_into(&ValueExtractor, &mut registry)
        .unwrap();

    println!("Registered: {}", registry.qualified_names().join(", "));
    println!();
    println!("{}", artifact.source);

    let converters = artifact.converters.unwrap();

    // Later source wins on the shared email field.
    let merged = converters.from_both(&customer, &order).unwrap();
    println!("Merged row:");
    println!("{}", serde_json::to_string_pretty(&merged).unwrap());

    let batch = converters
        .from_collection(&[
            json!({"name": "Bo", "order_id": 1, "total": 5.0}),
            json!({"name": "Cy", "order_id": 2, "total": 7.5}),
        ])
        .unwrap();
    println!();
    println!("Batch of {} rows converted", batch.len());
}
