use crate::{
    context::Context,
    error::{SerializerError, unsupported_serialization},
    registry::Registry,
};
use jsonforge_schema::{ClassId, naming};
use serde_json::Value;
use std::any::{self, Any};

const JSON_FORMAT: &str = "json";

///
/// Serializer
///
/// Facade over the generated artifacts: almost every decision was taken at
/// generation time, so each call is a name computation, a registry lookup,
/// and one function invocation. There is no fallback here; a missing
/// artifact is an unsupported-type error.
///

#[derive(Clone, Debug, Default)]
pub struct Serializer {
    registry: Registry,
}

impl Serializer {
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Encode a model to a JSON string.
    pub fn serialize<T: Any>(
        &self,
        model: &T,
        format: &str,
        context: Option<&Context>,
    ) -> Result<String, SerializerError> {
        check_format(format)?;

        let value = self.object_to_value(model, true, context)?;
        serde_json::to_string(&value).map_err(SerializerError::JsonEncode)
    }

    /// Encode a model to a JSON value tree. Empty objects and maps render as
    /// empty arrays in this form, matching the legacy tree shape.
    pub fn to_value<T: Any>(
        &self,
        model: &T,
        context: Option<&Context>,
    ) -> Result<Value, SerializerError> {
        self.object_to_value(model, false, context)
    }

    /// Decode a JSON string into the named model type.
    pub fn deserialize<T: Any>(
        &self,
        data: &str,
        type_name: &str,
        format: &str,
        context: Option<&Context>,
    ) -> Result<T, SerializerError> {
        check_format(format)?;

        let value: Value = serde_json::from_str(data).map_err(SerializerError::JsonDecode)?;
        self.from_value(&value, type_name, context)
    }

    /// Decode a JSON value tree into the named model type.
    pub fn from_value<T: Any>(
        &self,
        value: &Value,
        type_name: &str,
        context: Option<&Context>,
    ) -> Result<T, SerializerError> {
        if context.is_some_and(Context::is_filtering) {
            return Err(SerializerError::DeserializationContext);
        }

        let name = naming::deserializer_function_name(&ClassId::new(type_name));
        let Some(function) = self.registry.deserializer(&name) else {
            return Err(SerializerError::UnsupportedDeserialization {
                type_name: type_name.to_string(),
            });
        };

        let model = function(value).map_err(SerializerError::Deserialization)?;
        model
            .downcast::<T>()
            .map(|model| *model)
            .map_err(|_| SerializerError::UnexpectedModel {
                type_name: type_name.to_string(),
            })
    }

    fn object_to_value<T: Any>(
        &self,
        model: &T,
        use_object_empty: bool,
        context: Option<&Context>,
    ) -> Result<Value, SerializerError> {
        let type_name = any::type_name::<T>();
        let version = context.and_then(Context::version);
        let groups = context.map(Context::groups).unwrap_or_default();

        let name = naming::serializer_function_name(&ClassId::new(type_name), version, groups);
        let Some(function) = self.registry.serializer(&name) else {
            return Err(unsupported_serialization(type_name, version, groups));
        };

        function(model, use_object_empty).map_err(SerializerError::Serialization)
    }
}

pub(crate) fn check_format(format: &str) -> Result<(), SerializerError> {
    if format == JSON_FORMAT {
        Ok(())
    } else {
        Err(SerializerError::UnsupportedFormat(format.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Unregistered;

    #[test]
    fn wrong_format_is_rejected() {
        let serializer = Serializer::default();
        let err = serializer
            .serialize(&Unregistered, "xml", None)
            .unwrap_err();

        assert!(matches!(err, SerializerError::UnsupportedFormat(format) if format == "xml"));
    }

    #[test]
    fn missing_artifact_names_the_requested_axes() {
        let serializer = Serializer::default();
        let context = Context::new().with_version("2").with_groups(["api"]);
        let err = serializer
            .serialize(&Unregistered, "json", Some(&context))
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("Unregistered"));
        assert!(message.contains("version 2"));
        assert!(message.contains("api"));

        let err = serializer.serialize(&Unregistered, "json", None).unwrap_err();
        assert!(err.to_string().contains("[no version]"));
        assert!(err.to_string().contains("[no groups]"));
    }

    #[test]
    fn decode_context_is_rejected() {
        let serializer = Serializer::default();
        let context = Context::new().with_groups(["api"]);
        let err = serializer
            .deserialize::<Unregistered>("{}", "app::Model", "json", Some(&context))
            .unwrap_err();

        assert!(matches!(err, SerializerError::DeserializationContext));

        // a non-filtering context is fine, the type is just unknown
        let err = serializer
            .deserialize::<Unregistered>("{}", "app::Model", "json", Some(&Context::new()))
            .unwrap_err();
        assert!(matches!(err, SerializerError::UnsupportedDeserialization { .. }));
    }
}
