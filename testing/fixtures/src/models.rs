//! Model structs the generated artifacts operate on.
//!
//! Conventions the generator relies on: every serializable property is an
//! `Option`, classes without constructor parameters implement `Default`,
//! classes with them expose `new` taking one `Option` per declared
//! parameter. The serde derives only exist for the dispatcher's generic
//! fallback path.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, VecDeque};
use time::{Date, OffsetDateTime};

///
/// Nested
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Nested {
    pub nested_string: Option<String>,
}

///
/// Model
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Model {
    pub api_string: Option<String>,
    pub detail_string: Option<String>,
    pub un_annotated: Option<Value>,
    pub nested_field: Option<Nested>,
    pub date: Option<OffsetDateTime>,
    pub date_with_format: Option<Date>,
    pub date_with_multiple_formats: Option<Date>,
}

///
/// ListModel
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ListModel {
    pub strings: Option<Vec<String>>,
    pub matrix: Option<Vec<Vec<i64>>>,
    pub nested: Option<Vec<Nested>>,
}

///
/// MapModel
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct MapModel {
    pub scores: Option<BTreeMap<String, i64>>,
    pub nested: Option<BTreeMap<String, Nested>>,
}

///
/// CollectionModel
/// Arrays the model keeps in a traversable collection instead of a vector.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct CollectionModel {
    pub items: Option<VecDeque<Nested>>,
    pub tags: Option<VecDeque<String>>,
}

///
/// FloatModel
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct FloatModel {
    pub ratio: Option<f64>,
    pub count: Option<i64>,
    pub flag: Option<bool>,
}

///
/// PrivateProperty
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct PrivateProperty {
    secret: Option<String>,
}

impl PrivateProperty {
    #[must_use]
    pub fn secret(&self) -> Option<&String> {
        self.secret.as_ref()
    }

    pub fn set_secret(&mut self, secret: Option<String>) {
        self.secret = secret;
    }
}

///
/// NonEmptyConstructor
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct NonEmptyConstructor {
    pub api_string: Option<String>,
    foo: Option<String>,
}

impl NonEmptyConstructor {
    #[must_use]
    pub fn new(api_string: Option<String>, foo: Option<String>) -> Self {
        Self { api_string, foo }
    }

    #[must_use]
    pub fn foo(&self) -> Option<&String> {
        self.foo.as_ref()
    }
}

///
/// ContainsNonEmptyConstructor
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ContainsNonEmptyConstructor {
    pub child: Option<NonEmptyConstructor>,
}

///
/// PostDeserialize
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct PostDeserialize {
    pub label: Option<String>,
    pub restored: bool,
}

impl PostDeserialize {
    pub fn post_deserialize(&mut self) {
        self.restored = true;
    }
}

///
/// RecursionModel
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct RecursionModel {
    pub property: Option<String>,
    pub recursion: Option<Box<RecursionModel>>,
}

///
/// Versions
/// The since-3 virtual accessor takes over the `changed` wire name from the
/// plain field.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Versions {
    pub old: Option<String>,
    pub changed: Option<String>,
    pub new: Option<String>,
}

impl Versions {
    #[must_use]
    pub fn changed_in_v3(&self) -> Option<String> {
        self.changed.as_ref().map(|changed| changed.to_uppercase())
    }
}

///
/// AccessorOrder
/// Metadata declares `second` before `first`; the wire keys must follow.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct AccessorOrder {
    pub first: Option<String>,
    pub second: Option<String>,
}

///
/// GatedModel
/// Every property is group-gated; under a non-matching combination the
/// encoded form collapses to the empty-object marker.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct GatedModel {
    pub internal_note: Option<String>,
    pub audit_ref: Option<String>,
}

///
/// ZonedDate
/// Decode-only: the declared zone makes encode generation fail by design.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ZonedDate {
    pub happened_at: Option<OffsetDateTime>,
}
