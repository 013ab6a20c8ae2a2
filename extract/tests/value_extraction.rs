//! Integration tests for JSON value extraction feeding full generation.

use record_schema_core::{
    ExtractionError, GenerateError, OutputShape, RecordBuilder, SchemaExtractor, SourceId, TypeRef,
};
use record_schema_extract::{ValueExtractor, ValueSource};
use serde_json::json;

#[test]
fn test_named_instance_extraction() {
    let source = ValueSource::named(
        "Order",
        json!({
            "id": 1,
            "total": 9.99,
            "paid": false,
            "note": null,
            "lines": [{"sku": "a", "qty": 2}],
            "shipping_address": {"street": "Main"}
        }),
    );
    let schema = ValueExtractor.extract(&source).unwrap();

    assert_eq!(schema.source_name.as_deref(), Some("Order"));
    assert_eq!(
        schema.property_names(),
        vec!["id", "total", "paid", "note", "lines", "shipping_address"]
    );
    assert_eq!(schema.property("id").unwrap().ty, TypeRef::Int);
    assert_eq!(schema.property("total").unwrap().ty, TypeRef::Float);
    assert_eq!(
        schema.property("note").unwrap().ty,
        TypeRef::nullable(TypeRef::Any)
    );
    assert_eq!(
        schema.property("lines").unwrap().ty,
        TypeRef::named("Vec<Lines>")
    );
    assert_eq!(
        schema.property("shipping_address").unwrap().ty,
        TypeRef::named("ShippingAddress")
    );
}

#[test]
fn test_extraction_failure_surfaces_through_generate() {
    let err = RecordBuilder::new()
        .source(ValueSource::literal(json!("not an object")))
        .type_name("Broken")
        .generate(&ValueExtractor)
        .unwrap_err();

    match err {
        GenerateError::Extraction { source_id, error } => {
            assert_eq!(source_id, SourceId::new(0));
            assert_eq!(error, ExtractionError::NotAnObject("string".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_projection_merge_end_to_end() {
    let artifact = RecordBuilder::new()
        .named_source("Customer", ValueSource::named(
            "Customer",
            json!({"name": "Ada", "email": "ada@example.com", "password": "s3cret"}),
        ))
        .source(ValueSource::literal(json!({"loyalty_points": 120})))
        .exclude("password")
        .shape(OutputShape::ImmutableAggregate)
        .type_name("CustomerProfile")
        .converters(true)
        .generate(&ValueExtractor)
        .unwrap();

    assert_eq!(
        artifact.fields.names(),
        vec!["name", "email", "loyalty_points"]
    );

    let set = artifact.converters.unwrap();
    let record = set
        .from_named(
            "Customer",
            &json!({"name": "Ada", "email": "ada@example.com", "password": "s3cret"}),
        )
        .unwrap();
    assert_eq!(record.get("name"), Some(&json!("Ada")));
    assert!(record.get("password").is_none());
    assert_eq!(record.get("loyalty_points"), Some(&json!(null)));
}

#[test]
fn test_empty_collection_yields_valid_empty_artifact() {
    let artifact = RecordBuilder::new()
        .source(ValueSource::collection(vec![]))
        .type_name("Nothing")
        .generate(&ValueExtractor)
        .unwrap();

    assert_eq!(artifact.field_count(), 0);
    assert!(artifact.source.contains("pub struct Nothing;"));
}

#[test]
fn test_collection_source_feeds_collection_converter() {
    let rows = vec![
        json!({"sku": "a", "qty": 1}),
        json!({"sku": "b", "qty": 2}),
        json!({"sku": "c", "qty": 3}),
    ];
    let artifact = RecordBuilder::new()
        .source(ValueSource::collection(rows.clone()))
        .type_name("LineRow")
        .converters(true)
        .generate(&ValueExtractor)
        .unwrap();

    let set = artifact.converters.unwrap();
    let records = set.from_collection(&rows).unwrap();
    assert_eq!(records.len(), 3);
    let skus: Vec<_> = records.iter().map(|r| r.get("sku").cloned().unwrap()).collect();
    assert_eq!(skus, vec![json!("a"), json!("b"), json!("c")]);
}
