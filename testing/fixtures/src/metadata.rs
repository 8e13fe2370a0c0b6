//! Hand-built metadata definitions for the fixture models, the counterpart
//! of what an annotation or schema-file front end would produce.

use jsonforge_schema::{
    Accessor, ArrayType, ClassDef, ConstructorParameter, DateTimeRepr, DateTimeType,
    MetadataRegistry, Primitive, PropertyDef, PropertyType, ZoneOffset,
};
use serde_json::json;

///
/// ids
/// Class identities, as spelled in configuration and artifact names.
///

pub mod ids {
    pub const NESTED: &str = "jsonforge_testing_fixtures::models::Nested";
    pub const MODEL: &str = "jsonforge_testing_fixtures::models::Model";
    pub const LIST_MODEL: &str = "jsonforge_testing_fixtures::models::ListModel";
    pub const MAP_MODEL: &str = "jsonforge_testing_fixtures::models::MapModel";
    pub const COLLECTION_MODEL: &str = "jsonforge_testing_fixtures::models::CollectionModel";
    pub const FLOAT_MODEL: &str = "jsonforge_testing_fixtures::models::FloatModel";
    pub const PRIVATE_PROPERTY: &str = "jsonforge_testing_fixtures::models::PrivateProperty";
    pub const NON_EMPTY_CONSTRUCTOR: &str =
        "jsonforge_testing_fixtures::models::NonEmptyConstructor";
    pub const CONTAINS_NON_EMPTY_CONSTRUCTOR: &str =
        "jsonforge_testing_fixtures::models::ContainsNonEmptyConstructor";
    pub const POST_DESERIALIZE: &str = "jsonforge_testing_fixtures::models::PostDeserialize";
    pub const RECURSION_MODEL: &str = "jsonforge_testing_fixtures::models::RecursionModel";
    pub const VERSIONS: &str = "jsonforge_testing_fixtures::models::Versions";
    pub const ACCESSOR_ORDER: &str = "jsonforge_testing_fixtures::models::AccessorOrder";
    pub const GATED_MODEL: &str = "jsonforge_testing_fixtures::models::GatedModel";
    pub const ZONED_DATE: &str = "jsonforge_testing_fixtures::models::ZonedDate";
}

/// The registry with every fixture class registered.
#[must_use]
pub fn metadata_registry() -> MetadataRegistry {
    MetadataRegistry::new()
        .with(nested())
        .with(model())
        .with(list_model())
        .with(map_model())
        .with(collection_model())
        .with(float_model())
        .with(private_property())
        .with(non_empty_constructor())
        .with(contains_non_empty_constructor())
        .with(post_deserialize())
        .with(recursion_model())
        .with(versions())
        .with(accessor_order())
        .with(gated_model())
        .with(zoned_date())
}

fn string() -> PropertyType {
    PropertyType::Primitive(Primitive::String)
}

fn nested_class() -> PropertyType {
    PropertyType::Class(ids::NESTED.into())
}

fn nested() -> ClassDef {
    ClassDef::new(ids::NESTED).with_property(PropertyDef::new("nested_string", string()))
}

fn model() -> ClassDef {
    ClassDef::new(ids::MODEL)
        .with_property(PropertyDef::new("api_string", string()).with_groups(["api"]))
        .with_property(PropertyDef::new("detail_string", string()).with_groups(["details"]))
        .with_property(PropertyDef::new("un_annotated", PropertyType::Unknown))
        .with_property(PropertyDef::new("nested_field", nested_class()))
        .with_property(PropertyDef::new(
            "date",
            PropertyType::DateTime(DateTimeType::new(DateTimeRepr::OffsetDateTime)),
        ))
        .with_property(PropertyDef::new(
            "date_with_format",
            PropertyType::DateTime(
                DateTimeType::new(DateTimeRepr::Date).with_format("[year]-[month]-[day]"),
            ),
        ))
        .with_property(PropertyDef::new(
            "date_with_multiple_formats",
            PropertyType::DateTime(
                DateTimeType::new(DateTimeRepr::Date)
                    .with_format("[year]-[month]-[day]")
                    .with_deserialize_formats(["[month]/[day]/[year]", "[year]-[month]-[day]"]),
            ),
        ))
}

fn list_model() -> ClassDef {
    ClassDef::new(ids::LIST_MODEL)
        .with_property(PropertyDef::new(
            "strings",
            PropertyType::Array(ArrayType::list(string())),
        ))
        .with_property(PropertyDef::new(
            "matrix",
            PropertyType::Array(ArrayType::list(PropertyType::Array(ArrayType::list(
                PropertyType::Primitive(Primitive::Int),
            )))),
        ))
        .with_property(PropertyDef::new(
            "nested",
            PropertyType::Array(ArrayType::list(nested_class())),
        ))
}

fn map_model() -> ClassDef {
    ClassDef::new(ids::MAP_MODEL)
        .with_property(PropertyDef::new(
            "scores",
            PropertyType::Array(ArrayType::map(PropertyType::Primitive(Primitive::Int))),
        ))
        .with_property(PropertyDef::new(
            "nested",
            PropertyType::Array(ArrayType::map(nested_class())),
        ))
}

fn collection_model() -> ClassDef {
    ClassDef::new(ids::COLLECTION_MODEL)
        .with_property(PropertyDef::new(
            "items",
            PropertyType::Array(ArrayType::collection(nested_class())),
        ))
        .with_property(PropertyDef::new(
            "tags",
            PropertyType::Array(ArrayType::collection(string())),
        ))
}

fn float_model() -> ClassDef {
    ClassDef::new(ids::FLOAT_MODEL)
        .with_property(PropertyDef::new(
            "ratio",
            PropertyType::Primitive(Primitive::Float),
        ))
        .with_property(PropertyDef::new(
            "count",
            PropertyType::Primitive(Primitive::Int),
        ))
        .with_property(PropertyDef::new(
            "flag",
            PropertyType::Primitive(Primitive::Bool),
        ))
}

fn private_property() -> ClassDef {
    ClassDef::new(ids::PRIVATE_PROPERTY).with_property(
        PropertyDef::new("secret", string())
            .private()
            .with_accessor(Accessor::methods("secret", "set_secret")),
    )
}

fn non_empty_constructor() -> ClassDef {
    ClassDef::new(ids::NON_EMPTY_CONSTRUCTOR)
        .with_property(PropertyDef::new("api_string", string()))
        .with_constructor_parameter(ConstructorParameter::required("api_string"))
        .with_constructor_parameter(ConstructorParameter::optional("foo", json!("bar")))
}

fn contains_non_empty_constructor() -> ClassDef {
    ClassDef::new(ids::CONTAINS_NON_EMPTY_CONSTRUCTOR).with_property(PropertyDef::new(
        "child",
        PropertyType::Class(ids::NON_EMPTY_CONSTRUCTOR.into()),
    ))
}

fn post_deserialize() -> ClassDef {
    ClassDef::new(ids::POST_DESERIALIZE)
        .with_property(PropertyDef::new("label", string()))
        .with_post_deserialize_method("post_deserialize")
}

fn recursion_model() -> ClassDef {
    ClassDef::new(ids::RECURSION_MODEL)
        .with_property(PropertyDef::new("property", string()))
        .with_property(
            PropertyDef::new("recursion", PropertyType::Class(ids::RECURSION_MODEL.into()))
                .with_max_depth(2)
                .boxed(),
        )
}

fn versions() -> ClassDef {
    ClassDef::new(ids::VERSIONS)
        .with_property(PropertyDef::new("old", string()).until("2"))
        .with_property(PropertyDef::new("changed", string()).until("2"))
        .with_property(PropertyDef::new("new", string()).since("3"))
        .with_property(
            PropertyDef::new("changed_in_v3", string())
                .with_serialized_name("changed")
                .with_accessor(Accessor::getter_only("changed_in_v3"))
                .read_only()
                .since("3"),
        )
}

fn accessor_order() -> ClassDef {
    // declared order is emission order, regardless of struct field order
    ClassDef::new(ids::ACCESSOR_ORDER)
        .with_property(PropertyDef::new("second", string()))
        .with_property(PropertyDef::new("first", string()))
}

fn gated_model() -> ClassDef {
    ClassDef::new(ids::GATED_MODEL)
        .with_property(PropertyDef::new("internal_note", string()).with_groups(["internal"]))
        .with_property(PropertyDef::new("audit_ref", string()).with_groups(["audit"]))
}

fn zoned_date() -> ClassDef {
    ClassDef::new(ids::ZONED_DATE).with_property(PropertyDef::new(
        "happened_at",
        PropertyType::DateTime(
            DateTimeType::new(DateTimeRepr::OffsetDateTime)
                .with_format("[year]-[month]-[day] [hour]:[minute]:[second]")
                .with_zone(ZoneOffset::new(6, 0)),
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonforge_schema::{MetadataSource, Reducer};

    #[test]
    fn every_fixture_resolves() {
        let registry = metadata_registry();
        for id in [
            ids::NESTED,
            ids::MODEL,
            ids::LIST_MODEL,
            ids::MAP_MODEL,
            ids::COLLECTION_MODEL,
            ids::FLOAT_MODEL,
            ids::PRIVATE_PROPERTY,
            ids::NON_EMPTY_CONSTRUCTOR,
            ids::CONTAINS_NON_EMPTY_CONSTRUCTOR,
            ids::POST_DESERIALIZE,
            ids::RECURSION_MODEL,
            ids::VERSIONS,
            ids::ACCESSOR_ORDER,
            ids::GATED_MODEL,
            ids::ZONED_DATE,
        ] {
            registry
                .resolve(&id.into(), &[Reducer::TakeBest])
                .unwrap_or_else(|e| panic!("fixture {id} must resolve: {e}"));
        }
    }
}
