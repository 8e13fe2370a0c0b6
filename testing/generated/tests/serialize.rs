//! Encode behavior of the generated artifacts.

use jsonforge::{Context, SerializerError};
use jsonforge_testing_fixtures::models::{
    AccessorOrder, GatedModel, ListModel, MapModel, Model, Nested, NonEmptyConstructor,
};
use jsonforge_testing_generated::serializer;
use serde_json::{Value, json};
use std::collections::BTreeMap;

#[test]
fn encodes_every_field_without_context() {
    let model = Model {
        api_string: Some("api".to_string()),
        detail_string: Some("details".to_string()),
        un_annotated: Some(json!({"free": [1, 2]})),
        nested_field: Some(Nested {
            nested_string: Some("in".to_string()),
        }),
        ..Model::default()
    };

    let encoded = serializer().serialize(&model, "json", None).unwrap();
    let value: Value = serde_json::from_str(&encoded).unwrap();

    assert_eq!(
        value,
        json!({
            "api_string": "api",
            "detail_string": "details",
            "un_annotated": {"free": [1, 2]},
            "nested_field": {"nested_string": "in"},
        })
    );
}

#[test]
fn group_filtering_drops_gated_fields() {
    let model = Model {
        api_string: Some("api".to_string()),
        detail_string: Some("details".to_string()),
        ..Model::default()
    };

    let context = Context::new().with_groups(["api"]);
    let encoded = serializer().serialize(&model, "json", Some(&context)).unwrap();
    let value: Value = serde_json::from_str(&encoded).unwrap();

    assert_eq!(value, json!({"api_string": "api"}));
}

#[test]
fn group_order_does_not_change_the_artifact() {
    let model = Model {
        api_string: Some("api".to_string()),
        detail_string: Some("details".to_string()),
        ..Model::default()
    };

    let forward = Context::new().with_groups(["api", "details"]);
    let reverse = Context::new().with_groups(["details", "api"]);

    let a = serializer().serialize(&model, "json", Some(&forward)).unwrap();
    let b = serializer().serialize(&model, "json", Some(&reverse)).unwrap();
    assert_eq!(a, b);

    let value: Value = serde_json::from_str(&a).unwrap();
    assert_eq!(value, json!({"api_string": "api", "detail_string": "details"}));
}

#[test]
fn fully_gated_class_collapses_to_an_empty_object() {
    let model = GatedModel {
        internal_note: Some("note".to_string()),
        audit_ref: Some("ref".to_string()),
    };

    // no property survives the "api" combination: explicit {} on the wire
    let context = Context::new().with_groups(["api"]);
    let encoded = serializer().serialize(&model, "json", Some(&context)).unwrap();
    assert_eq!(encoded, "{}");

    let context = Context::new().with_groups(["internal"]);
    let encoded = serializer().serialize(&model, "json", Some(&context)).unwrap();
    let value: Value = serde_json::from_str(&encoded).unwrap();
    assert_eq!(value, json!({"internal_note": "note"}));
}

#[test]
fn to_value_renders_empties_as_arrays() {
    let model = GatedModel::default();
    let context = Context::new().with_groups(["api"]);

    let value = serializer().to_value(&model, Some(&context)).unwrap();
    assert_eq!(value, json!([]));
}

#[test]
fn empty_scalar_collections_are_emitted() {
    let model = ListModel {
        strings: Some(Vec::new()),
        ..ListModel::default()
    };

    let encoded = serializer().serialize(&model, "json", None).unwrap();
    let value: Value = serde_json::from_str(&encoded).unwrap();

    // never omitted once the field guard passed
    assert_eq!(value, json!({"strings": []}));
}

#[test]
fn empty_map_and_empty_list_have_distinct_wire_shapes() {
    let map_model = MapModel {
        scores: Some(BTreeMap::new()),
        nested: Some(BTreeMap::new()),
    };
    let encoded = serializer().serialize(&map_model, "json", None).unwrap();
    let value: Value = serde_json::from_str(&encoded).unwrap();
    assert_eq!(value, json!({"scores": {}, "nested": {}}));

    let list_model = ListModel {
        strings: Some(Vec::new()),
        matrix: Some(Vec::new()),
        nested: Some(Vec::new()),
    };
    let encoded = serializer().serialize(&list_model, "json", None).unwrap();
    let value: Value = serde_json::from_str(&encoded).unwrap();
    assert_eq!(value, json!({"strings": [], "matrix": [], "nested": []}));
}

#[test]
fn nested_class_with_no_populated_fields_is_an_empty_object() {
    let model = Model {
        nested_field: Some(Nested::default()),
        ..Model::default()
    };

    let encoded = serializer().serialize(&model, "json", None).unwrap();
    let value: Value = serde_json::from_str(&encoded).unwrap();
    assert_eq!(value, json!({"nested_field": {}}));
}

#[test]
fn key_order_follows_metadata_order() {
    let model = AccessorOrder {
        first: Some("f".to_string()),
        second: Some("s".to_string()),
    };

    let encoded = serializer().serialize(&model, "json", None).unwrap();
    assert_eq!(encoded, "{\"second\":\"s\",\"first\":\"f\"}");
}

#[test]
fn constructor_classes_encode_normally() {
    let model = NonEmptyConstructor::new(Some("hello".to_string()), None);

    let encoded = serializer().serialize(&model, "json", None).unwrap();
    let value: Value = serde_json::from_str(&encoded).unwrap();
    assert_eq!(value, json!({"api_string": "hello"}));
}

#[test]
fn unconfigured_combination_is_an_unsupported_type() {
    let model = Model::default();
    let context = Context::new().with_groups(["nope"]);

    let err = serializer()
        .serialize(&model, "json", Some(&context))
        .unwrap_err();
    assert!(matches!(err, SerializerError::UnsupportedSerialization { .. }));
    assert!(err.to_string().contains("nope"));
}
