use crate::{
    id::ClassId,
    property::{PropertyDef, PropertyMetadata},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

///
/// ConstructorParameter
///
/// One declared constructor parameter: matched against property names during
/// decode generation. A required parameter with no matching property is a
/// generation-time error; an optional one falls back to its default value.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ConstructorParameter {
    pub name: String,
    pub required: bool,
    pub default: Option<Value>,
}

impl ConstructorParameter {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            default: None,
        }
    }

    pub fn optional(name: impl Into<String>, default: Value) -> Self {
        Self {
            name: name.into(),
            required: false,
            default: Some(default),
        }
    }
}

///
/// ClassMetadata
///
/// The resolved, read-only view of one class that the emitters walk.
/// Property order is significant and must be preserved exactly.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ClassMetadata {
    pub class: ClassId,
    pub properties: Vec<PropertyMetadata>,
    pub constructor_parameters: Vec<ConstructorParameter>,
    pub post_deserialize_methods: Vec<String>,
}

impl ClassMetadata {
    #[must_use]
    pub fn has_constructor_parameter(&self, name: &str) -> bool {
        self.constructor_parameter(name).is_some()
    }

    #[must_use]
    pub fn constructor_parameter(&self, name: &str) -> Option<&ConstructorParameter> {
        self.constructor_parameters.iter().find(|p| p.name == name)
    }
}

///
/// ClassDef
///
/// The raw definition a metadata front end registers: the full candidate
/// property list before any version/group reduction.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ClassDef {
    pub class: ClassId,
    pub properties: Vec<PropertyDef>,
    pub constructor_parameters: Vec<ConstructorParameter>,
    pub post_deserialize_methods: Vec<String>,
}

impl ClassDef {
    pub fn new(class: impl Into<ClassId>) -> Self {
        Self {
            class: class.into(),
            properties: Vec::new(),
            constructor_parameters: Vec::new(),
            post_deserialize_methods: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_property(mut self, property: PropertyDef) -> Self {
        self.properties.push(property);
        self
    }

    #[must_use]
    pub fn with_constructor_parameter(mut self, parameter: ConstructorParameter) -> Self {
        self.constructor_parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn with_post_deserialize_method(mut self, method: impl Into<String>) -> Self {
        self.post_deserialize_methods.push(method.into());
        self
    }
}
