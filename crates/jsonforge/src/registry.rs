use crate::artifact::{DeserializeFn, SerializeFn};
use std::collections::BTreeMap;

///
/// Registry
///
/// Artifact lookup by computed name. Generated registry modules populate
/// this once at startup; lookups are the runtime counterpart of the
/// generator writing a file under the same name.
///

#[derive(Clone, Debug, Default)]
pub struct Registry {
    serializers: BTreeMap<String, SerializeFn>,
    deserializers: BTreeMap<String, DeserializeFn>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_serializer(&mut self, name: impl Into<String>, function: SerializeFn) {
        self.serializers.insert(name.into(), function);
    }

    pub fn add_deserializer(&mut self, name: impl Into<String>, function: DeserializeFn) {
        self.deserializers.insert(name.into(), function);
    }

    #[must_use]
    pub fn serializer(&self, name: &str) -> Option<SerializeFn> {
        self.serializers.get(name).copied()
    }

    #[must_use]
    pub fn deserializer(&self, name: &str) -> Option<DeserializeFn> {
        self.deserializers.get(name).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.serializers.is_empty() && self.deserializers.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.serializers.len() + self.deserializers.len()
    }
}
