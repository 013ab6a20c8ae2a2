//! End-to-end generation tests: builder, emitters, converters, registry.

use record_schema_core::{
    ArtifactRegistry, ExtractionError, GenerateError, OutputShape, RecordBuilder, Schema,
    SchemaExtractor, TypeRef,
};
use serde_json::json;

fn identity() -> impl SchemaExtractor<Schema> {
    |s: &Schema| Ok::<_, ExtractionError>(s.clone())
}

fn customer() -> Schema {
    Schema::named("Customer")
        .with_property("name", TypeRef::Str)
        .with_property("email", TypeRef::Str)
}

fn order() -> Schema {
    Schema::named("Order")
        .with_property("total", TypeRef::Decimal)
        .with_property("email", TypeRef::Str)
}

#[test]
fn test_immutable_shape_contract() {
    let artifact = RecordBuilder::new()
        .named_source("Customer", customer())
        .shape(OutputShape::ImmutableAggregate)
        .type_name("CustomerView")
        .generate(&identity())
        .unwrap();

    assert!(artifact.source.contains("pub fn new(name: String, email: String) -> Self"));
    assert!(artifact.source.contains("PartialEq"));
    assert!(artifact.source.contains("pub fn email(&self) -> &String"));
    assert!(artifact.must_initialize.is_empty());
}

#[test]
fn test_mutable_shape_tracks_must_initialize() {
    let artifact = RecordBuilder::new()
        .named_source("Customer", customer())
        .property("visits", TypeRef::Int)
        .type_name("CustomerRow")
        .generate(&identity())
        .unwrap();

    assert_eq!(artifact.shape, OutputShape::MutableAggregate);
    assert_eq!(artifact.must_initialize, vec!["name", "email"]);
    assert!(artifact.source.contains("pub fn new(name: String, email: String) -> Self"));
    assert!(artifact.source.contains("visits: Default::default(),"));
}

#[test]
fn test_zero_field_artifact_is_valid() {
    let artifact = RecordBuilder::<Schema>::new()
        .type_name("Marker")
        .generate(&identity())
        .unwrap();

    assert_eq!(artifact.field_count(), 0);
    assert!(artifact.source.contains("pub struct Marker;"));
}

#[test]
fn test_converters_absent_unless_enabled() {
    let artifact = RecordBuilder::new()
        .named_source("Customer", customer())
        .type_name("CustomerDto")
        .generate(&identity())
        .unwrap();

    assert!(artifact.converters.is_none());
}

#[test]
fn test_two_named_sources_get_individual_and_combined_converters() {
    let artifact = RecordBuilder::new()
        .named_source("Customer", customer())
        .named_source("Order", order())
        .type_name("CustomerOrder")
        .converters(true)
        .generate(&identity())
        .unwrap();

    let set = artifact.converters.unwrap();
    assert!(set.has_combined());
    assert!(set.names().contains(&"from_customer".to_string()));
    assert!(set.names().contains(&"from_order".to_string()));

    let record = set
        .from_both(
            &json!({"name": "Ada", "email": "ada@old.example"}),
            &json!({"total": 9.5, "email": "ada@new.example"}),
        )
        .unwrap();
    assert_eq!(record.get("name"), Some(&json!("Ada")));
    assert_eq!(record.get("total"), Some(&json!(9.5)));
    // Order contributed email later, so its value wins.
    assert_eq!(record.get("email"), Some(&json!("ada@new.example")));
}

#[test]
fn test_named_converter_respects_exclusions() {
    let artifact = RecordBuilder::new()
        .named_source("Customer", customer())
        .exclude("email")
        .type_name("PublicCustomer")
        .converters(true)
        .generate(&identity())
        .unwrap();

    let set = artifact.converters.unwrap();
    let record = set
        .from_named("Customer", &json!({"name": "Ada", "email": "ada@example.com"}))
        .unwrap();
    assert_eq!(record.get("name"), Some(&json!("Ada")));
    assert!(record.get("email").is_none());
}

#[test]
fn test_retyped_field_passes_through_converters_unchanged() {
    let artifact = RecordBuilder::new()
        .named_source("Order", order())
        .retype("total", TypeRef::Str)
        .type_name("OrderExport")
        .converters(true)
        .generate(&identity())
        .unwrap();

    assert_eq!(
        artifact.fields.property("total").unwrap().ty,
        TypeRef::Str
    );

    // Retype changes the declared type only; the copied value is untouched.
    let set = artifact.converters.unwrap();
    let record = set.from_single(&json!({"total": 12.5, "email": "x@y"})).unwrap();
    assert_eq!(record.get("total"), Some(&json!(12.5)));
}

#[test]
fn test_from_collection_matches_input_order_and_count() {
    let artifact = RecordBuilder::new()
        .named_source("Customer", customer())
        .type_name("CustomerDto")
        .converters(true)
        .generate(&identity())
        .unwrap();

    let set = artifact.converters.unwrap();
    let records = set
        .from_collection(&[
            json!({"name": "a", "email": "a@x"}),
            json!({"name": "b", "email": "b@x"}),
        ])
        .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("name"), Some(&json!("a")));
    assert_eq!(records[1].get("name"), Some(&json!("b")));
}

#[test]
fn test_generate_twice_yields_identical_artifacts() {
    let builder = RecordBuilder::new()
        .named_source("Customer", customer())
        .exclude("email")
        .property_with_default("tier", TypeRef::Str, json!("standard"))
        .shape(OutputShape::ByValueAggregate)
        .type_name("Tiered")
        .converters(true);

    let first = builder.generate(&identity()).unwrap();
    let second = builder.generate(&identity()).unwrap();
    assert_eq!(first, second);
    assert!(first.source.contains("tier: \"standard\".to_string(),"));
}

#[test]
fn test_registry_reregistration_is_idempotent() {
    let mut registry = ArtifactRegistry::new();
    let builder = RecordBuilder::new()
        .named_source("Customer", customer())
        .qualified_type_name("crm", "CustomerDto");

    builder.generate_into(&identity(), &mut registry).unwrap();
    builder.generate_into(&identity(), &mut registry).unwrap();

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.qualified_names(), vec!["crm::CustomerDto"]);
    assert!(registry.get("crm::CustomerDto").is_some());
}

#[test]
fn test_invalid_field_name_fails_generation() {
    let invalid = Schema::anonymous().with_property("user-id", TypeRef::Int);
    let err = RecordBuilder::new()
        .source(invalid)
        .type_name("Broken")
        .generate(&identity())
        .unwrap_err();

    assert!(matches!(err, GenerateError::Invalid(_)));
}

#[test]
fn test_missing_type_name_fails_generation() {
    let err = RecordBuilder::new()
        .named_source("Customer", customer())
        .generate(&identity())
        .unwrap_err();

    assert_eq!(err, GenerateError::MissingName);
}
