//! Version-filtered artifacts: until/since bounds and the version-gated
//! virtual property taking over a wire name.

use jsonforge::Context;
use jsonforge_testing_fixtures::models::Versions;
use jsonforge_testing_generated::serializer;
use serde_json::{Value, json};

fn fixture() -> Versions {
    Versions {
        old: Some("o".to_string()),
        changed: Some("c".to_string()),
        new: Some("n".to_string()),
    }
}

fn encode(version: Option<&str>) -> Value {
    let context = version.map(|v| Context::new().with_version(v));
    let encoded = serializer()
        .serialize(&fixture(), "json", context.as_ref())
        .unwrap();
    serde_json::from_str(&encoded).unwrap()
}

#[test]
fn unversioned_view_keeps_the_plain_field() {
    assert_eq!(
        encode(None),
        json!({"old": "o", "changed": "c", "new": "n"})
    );
}

#[test]
fn until_bound_is_inclusive() {
    assert_eq!(encode(Some("1")), json!({"old": "o", "changed": "c"}));
    assert_eq!(encode(Some("2")), json!({"old": "o", "changed": "c"}));
}

#[test]
fn since_bound_swaps_in_the_virtual_property() {
    // from version 3 the virtual accessor owns the "changed" wire name and
    // upper-cases the underlying field
    assert_eq!(encode(Some("3")), json!({"new": "n", "changed": "C"}));
    assert_eq!(encode(Some("4")), json!({"new": "n", "changed": "C"}));
}
