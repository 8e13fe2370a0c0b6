//! Decode behavior of the generated artifacts.

use jsonforge_testing_fixtures::metadata::ids;
use jsonforge_testing_fixtures::models::{
    CollectionModel, ContainsNonEmptyConstructor, FloatModel, ListModel, MapModel, Model,
    PostDeserialize, PrivateProperty, Versions, ZonedDate,
};
use jsonforge_testing_generated::serializer;
use serde_json::json;
use std::collections::VecDeque;
use time::macros::datetime;

#[test]
fn integer_literals_decode_into_float_fields() {
    let decoded: FloatModel = serializer()
        .deserialize(r#"{"ratio":1,"count":2,"flag":true}"#, ids::FLOAT_MODEL, "json", None)
        .unwrap();

    assert_eq!(decoded.ratio, Some(1.0));
    assert_eq!(decoded.count, Some(2));
    assert_eq!(decoded.flag, Some(true));
}

#[test]
fn missing_and_null_fields_stay_none() {
    let decoded: FloatModel = serializer()
        .deserialize(r#"{"ratio":null}"#, ids::FLOAT_MODEL, "json", None)
        .unwrap();

    assert_eq!(decoded, FloatModel::default());
}

#[test]
fn unknown_typed_fields_pass_through() {
    let decoded: Model = serializer()
        .deserialize(
            r#"{"un_annotated":{"anything":[1,"two"]}}"#,
            ids::MODEL,
            "json",
            None,
        )
        .unwrap();

    assert_eq!(decoded.un_annotated, Some(json!({"anything": [1, "two"]})));
}

#[test]
fn nested_classes_decode_recursively() {
    let decoded: Model = serializer()
        .deserialize(
            r#"{"nested_field":{"nested_string":"deep"}}"#,
            ids::MODEL,
            "json",
            None,
        )
        .unwrap();

    let nested = decoded.nested_field.unwrap();
    assert_eq!(nested.nested_string, Some("deep".to_string()));
}

#[test]
fn private_properties_go_through_the_setter() {
    let decoded: PrivateProperty = serializer()
        .deserialize(r#"{"secret":"hush"}"#, ids::PRIVATE_PROPERTY, "json", None)
        .unwrap();

    assert_eq!(decoded.secret(), Some(&"hush".to_string()));

    // absent value: the setter is never called
    let decoded: PrivateProperty = serializer()
        .deserialize("{}", ids::PRIVATE_PROPERTY, "json", None)
        .unwrap();
    assert_eq!(decoded.secret(), None);
}

#[test]
fn nested_constructors_bind_from_sibling_properties() {
    let decoded: ContainsNonEmptyConstructor = serializer()
        .deserialize(
            r#"{"child":{"api_string":"hello"}}"#,
            ids::CONTAINS_NON_EMPTY_CONSTRUCTOR,
            "json",
            None,
        )
        .unwrap();

    let child = decoded.child.unwrap();
    assert_eq!(child.api_string, Some("hello".to_string()));
    // the unmatched optional argument got its declared default
    assert_eq!(child.foo(), Some(&"bar".to_string()));

    // a present child without the bound field constructs with None
    let decoded: ContainsNonEmptyConstructor = serializer()
        .deserialize(
            r#"{"child":{}}"#,
            ids::CONTAINS_NON_EMPTY_CONSTRUCTOR,
            "json",
            None,
        )
        .unwrap();
    assert_eq!(decoded.child.unwrap().api_string, None);
}

#[test]
fn post_deserialize_hooks_run_once() {
    let decoded: PostDeserialize = serializer()
        .deserialize(r#"{"label":"x"}"#, ids::POST_DESERIALIZE, "json", None)
        .unwrap();

    assert_eq!(decoded.label, Some("x".to_string()));
    assert!(decoded.restored);

    // hooks run unconditionally, even on an empty payload
    let decoded: PostDeserialize = serializer()
        .deserialize("{}", ids::POST_DESERIALIZE, "json", None)
        .unwrap();
    assert!(decoded.restored);
}

#[test]
fn scalar_collections_copy_wholesale() {
    let decoded: ListModel = serializer()
        .deserialize(
            r#"{"strings":[],"matrix":[[1,2],[3]]}"#,
            ids::LIST_MODEL,
            "json",
            None,
        )
        .unwrap();

    assert_eq!(decoded.strings, Some(Vec::new()));
    assert_eq!(decoded.matrix, Some(vec![vec![1, 2], vec![3]]));
}

#[test]
fn class_collections_decode_per_element() {
    let decoded: ListModel = serializer()
        .deserialize(
            r#"{"nested":[{"nested_string":"a"},{},{"nested_string":"c"}]}"#,
            ids::LIST_MODEL,
            "json",
            None,
        )
        .unwrap();

    let nested = decoded.nested.unwrap();
    assert_eq!(nested.len(), 3);
    assert_eq!(nested[0].nested_string, Some("a".to_string()));
    assert_eq!(nested[1].nested_string, None);
    assert_eq!(nested[2].nested_string, Some("c".to_string()));
}

#[test]
fn maps_decode_by_key() {
    let decoded: MapModel = serializer()
        .deserialize(
            r#"{"scores":{"a":1,"b":2},"nested":{"x":{"nested_string":"v"}}}"#,
            ids::MAP_MODEL,
            "json",
            None,
        )
        .unwrap();

    let scores = decoded.scores.unwrap();
    assert_eq!(scores.get("a"), Some(&1));
    assert_eq!(scores.get("b"), Some(&2));

    let nested = decoded.nested.unwrap();
    assert_eq!(nested["x"].nested_string, Some("v".to_string()));
}

#[test]
fn collection_wrapped_arrays_are_wrapped_after_decoding() {
    let decoded: CollectionModel = serializer()
        .deserialize(
            r#"{"items":[{"nested_string":"a"}],"tags":["x","y"]}"#,
            ids::COLLECTION_MODEL,
            "json",
            None,
        )
        .unwrap();

    let items = decoded.items.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].nested_string, Some("a".to_string()));

    assert_eq!(decoded.tags, Some(VecDeque::from(vec!["x".to_string(), "y".to_string()])));
}

#[test]
fn read_only_virtual_properties_are_never_written() {
    let decoded: Versions = serializer()
        .deserialize(
            r#"{"old":"o","changed":"c","new":"n"}"#,
            ids::VERSIONS,
            "json",
            None,
        )
        .unwrap();

    // "changed" binds to the writable field, not the virtual accessor
    assert_eq!(decoded.old, Some("o".to_string()));
    assert_eq!(decoded.changed, Some("c".to_string()));
    assert_eq!(decoded.new, Some("n".to_string()));
}

#[test]
fn declared_zone_is_assumed_when_decoding() {
    let decoded: ZonedDate = serializer()
        .deserialize(
            r#"{"happened_at":"2021-06-01 10:30:00"}"#,
            ids::ZONED_DATE,
            "json",
            None,
        )
        .unwrap();

    assert_eq!(decoded.happened_at, Some(datetime!(2021-06-01 10:30:00 +06:00)));
}
