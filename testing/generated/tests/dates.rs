//! Date-time handling: default RFC-3339, declared formats, and the
//! declaration-order trial of multiple decode formats.

use jsonforge_testing_fixtures::metadata::ids;
use jsonforge_testing_fixtures::models::Model;
use jsonforge_testing_generated::serializer;
use serde_json::{Value, json};
use time::macros::{date, datetime};

#[test]
fn offset_date_times_round_trip_as_rfc3339() {
    let model = Model {
        date: Some(datetime!(2020-04-22 10:20:30 UTC)),
        ..Model::default()
    };

    let encoded = serializer().serialize(&model, "json", None).unwrap();
    let value: Value = serde_json::from_str(&encoded).unwrap();
    assert_eq!(value, json!({"date": "2020-04-22T10:20:30Z"}));

    let decoded: Model = serializer()
        .deserialize(&encoded, ids::MODEL, "json", None)
        .unwrap();
    assert_eq!(decoded.date, model.date);
}

#[test]
fn declared_format_is_used_both_ways() {
    let model = Model {
        date_with_format: Some(date!(2020 - 04 - 22)),
        ..Model::default()
    };

    let encoded = serializer().serialize(&model, "json", None).unwrap();
    let value: Value = serde_json::from_str(&encoded).unwrap();
    assert_eq!(value, json!({"date_with_format": "2020-04-22"}));

    let decoded: Model = serializer()
        .deserialize(&encoded, ids::MODEL, "json", None)
        .unwrap();
    assert_eq!(decoded.date_with_format, model.date_with_format);
}

#[test]
fn first_matching_decode_format_wins() {
    // the first declared format ([month]/[day]/[year]) matches directly
    let decoded: Model = serializer()
        .deserialize(
            r#"{"date_with_multiple_formats":"04/22/2020"}"#,
            ids::MODEL,
            "json",
            None,
        )
        .unwrap();
    assert_eq!(decoded.date_with_multiple_formats, Some(date!(2020 - 04 - 22)));

    // the first format fails on this input, the second succeeds; the result
    // is the same date
    let decoded: Model = serializer()
        .deserialize(
            r#"{"date_with_multiple_formats":"2020-04-22"}"#,
            ids::MODEL,
            "json",
            None,
        )
        .unwrap();
    assert_eq!(decoded.date_with_multiple_formats, Some(date!(2020 - 04 - 22)));
}
