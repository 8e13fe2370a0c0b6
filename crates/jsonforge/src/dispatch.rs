use crate::{
    context::Context,
    error::SerializerError,
    registry::Registry,
    serializer::check_format,
};
use jsonforge_schema::{ClassId, naming};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::{
    any::{self, Any},
    collections::BTreeSet,
};

///
/// GeneratedSerializer
///
/// Dispatching serializer with a generic fallback: artifacts are tried
/// first, and any miss or failure falls back to plain serde without
/// surfacing an error to the caller. An absent artifact and a failed
/// artifact are logged as distinct events; the first usually means the
/// generator configuration is incomplete, the second that an artifact
/// misbehaved on real data.
///

#[derive(Clone, Debug, Default)]
pub struct GeneratedSerializer {
    registry: Registry,
    enabled_classes: Option<BTreeSet<String>>,
}

impl GeneratedSerializer {
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            enabled_classes: None,
        }
    }

    /// Restrict artifact dispatch to the listed classes; everything else
    /// goes straight to the generic fallback.
    #[must_use]
    pub fn with_enabled_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enabled_classes = Some(classes.into_iter().map(Into::into).collect());
        self
    }

    pub fn serialize<T: Any + Serialize>(
        &self,
        model: &T,
        format: &str,
        context: Option<&Context>,
    ) -> Result<String, SerializerError> {
        check_format(format)?;

        let value = self.object_to_value(model, true, context)?;
        serde_json::to_string(&value).map_err(SerializerError::JsonEncode)
    }

    pub fn to_value<T: Any + Serialize>(
        &self,
        model: &T,
        context: Option<&Context>,
    ) -> Result<Value, SerializerError> {
        self.object_to_value(model, false, context)
    }

    pub fn deserialize<T: Any + DeserializeOwned>(
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

    pub fn from_value<T: Any + DeserializeOwned>(
        &self,
        value: &Value,
        type_name: &str,
        context: Option<&Context>,
    ) -> Result<T, SerializerError> {
        if context.is_some_and(Context::is_filtering) {
            return Err(SerializerError::DeserializationContext);
        }

        if self.enabled(type_name) {
            let name = naming::deserializer_function_name(&ClassId::new(type_name));
            if let Some(function) = self.registry.deserializer(&name) {
                match function(value) {
                    Ok(model) => {
                        if let Ok(model) = model.downcast::<T>() {
                            return Ok(*model);
                        }
                        tracing::warn!(
                            artifact = %name,
                            type_name,
                            "generated deserializer produced an unexpected model type, falling back"
                        );
                    }
                    Err(error) => {
                        tracing::warn!(
                            artifact = %name,
                            type_name,
                            %error,
                            "generated deserializer failed, falling back"
                        );
                    }
                }
            } else {
                tracing::debug!(
                    artifact = %name,
                    type_name,
                    "no generated deserializer, falling back"
                );
            }
        }

        serde_json::from_value(value.clone()).map_err(SerializerError::JsonDecode)
    }

    fn object_to_value<T: Any + Serialize>(
        &self,
        model: &T,
        use_object_empty: bool,
        context: Option<&Context>,
    ) -> Result<Value, SerializerError> {
        let type_name = any::type_name::<T>();

        if self.enabled(type_name) {
            let version = context.and_then(Context::version);
            let groups = context.map(Context::groups).unwrap_or_default();
            let name = naming::serializer_function_name(&ClassId::new(type_name), version, groups);

            if let Some(function) = self.registry.serializer(&name) {
                match function(model, use_object_empty) {
                    Ok(value) => return Ok(value),
                    Err(error) => {
                        tracing::warn!(
                            artifact = %name,
                            type_name,
                            %error,
                            "generated serializer failed, falling back"
                        );
                    }
                }
            } else {
                tracing::debug!(
                    artifact = %name,
                    type_name,
                    "no generated serializer, falling back"
                );
            }
        }

        serde_json::to_value(model).map_err(SerializerError::JsonEncode)
    }

    fn enabled(&self, type_name: &str) -> bool {
        self.enabled_classes
            .as_ref()
            .is_none_or(|classes| classes.contains(type_name))
    }
}
