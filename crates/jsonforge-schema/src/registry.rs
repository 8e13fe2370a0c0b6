use crate::{
    class::{ClassDef, ClassMetadata},
    id::ClassId,
    property::PropertyDef,
    reduce::Reducer,
};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// ResolveError
///

#[derive(Debug, ThisError)]
pub enum ResolveError {
    #[error("unknown class: {0}")]
    UnknownClass(ClassId),

    #[error(
        "reduction left {count} candidates for serialized name \"{serialized_name}\" on {class}; \
         the reducer chain must end in a single view per name"
    )]
    AmbiguousSerializedName {
        class: ClassId,
        serialized_name: String,
        count: usize,
    },
}

///
/// MetadataSource
///
/// The resolve contract the generator consumes: produce one consistent
/// [`ClassMetadata`] view for a class under an ordered reducer chain.
///

pub trait MetadataSource {
    fn resolve(&self, class: &ClassId, chain: &[Reducer]) -> Result<ClassMetadata, ResolveError>;
}

///
/// MetadataRegistry
///
/// In-repo metadata front end: class definitions registered as plain data.
///

#[derive(Debug, Default)]
pub struct MetadataRegistry {
    classes: BTreeMap<ClassId, ClassDef>,
}

impl MetadataRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, def: ClassDef) {
        self.classes.insert(def.class.clone(), def);
    }

    #[must_use]
    pub fn with(mut self, def: ClassDef) -> Self {
        self.register(def);
        self
    }
}

impl MetadataSource for MetadataRegistry {
    fn resolve(&self, class: &ClassId, chain: &[Reducer]) -> Result<ClassMetadata, ResolveError> {
        let def = self
            .classes
            .get(class)
            .ok_or_else(|| ResolveError::UnknownClass(class.clone()))?;

        let mut candidates = def.properties.clone();
        for reducer in chain {
            candidates = reducer.apply(candidates);
        }

        // a consistent view has exactly one candidate per serialized name
        for property in &candidates {
            let count = candidates
                .iter()
                .filter(|p| p.serialized_name == property.serialized_name)
                .count();
            if count > 1 {
                return Err(ResolveError::AmbiguousSerializedName {
                    class: class.clone(),
                    serialized_name: property.serialized_name.clone(),
                    count,
                });
            }
        }

        Ok(ClassMetadata {
            class: def.class.clone(),
            properties: candidates.into_iter().map(PropertyDef::resolve).collect(),
            constructor_parameters: def.constructor_parameters.clone(),
            post_deserialize_methods: def.post_deserialize_methods.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        property::PropertyDef,
        types::{Primitive, PropertyType},
        version::Version,
    };

    fn registry() -> MetadataRegistry {
        MetadataRegistry::new().with(
            ClassDef::new("app::Versions")
                .with_property(PropertyDef::new(
                    "old",
                    PropertyType::Primitive(Primitive::String),
                ))
                .with_property(
                    PropertyDef::new("changed", PropertyType::Primitive(Primitive::String))
                        .until("2"),
                )
                .with_property(
                    PropertyDef::new("changed_in_v3", PropertyType::Primitive(Primitive::String))
                        .with_serialized_name("changed")
                        .read_only()
                        .since("3"),
                ),
        )
    }

    #[test]
    fn unknown_class_is_an_error() {
        let err = registry()
            .resolve(&ClassId::new("app::Missing"), &[Reducer::TakeBest])
            .unwrap_err();

        assert!(matches!(err, ResolveError::UnknownClass(_)));
    }

    #[test]
    fn chain_order_is_applied() {
        let metadata = registry()
            .resolve(
                &ClassId::new("app::Versions"),
                &[
                    Reducer::Version(Version::new("3")),
                    Reducer::Group(Vec::new()),
                    Reducer::TakeBest,
                ],
            )
            .unwrap();

        let names: Vec<&str> = metadata.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["old", "changed_in_v3"]);
    }

    #[test]
    fn ambiguous_view_is_rejected() {
        // without a TakeBest stage both "changed" candidates survive
        let err = registry()
            .resolve(&ClassId::new("app::Versions"), &[])
            .unwrap_err();

        assert!(matches!(
            err,
            ResolveError::AmbiguousSerializedName { serialized_name, .. } if serialized_name == "changed"
        ));
    }
}
