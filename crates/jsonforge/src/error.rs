use crate::artifact::ArtifactError;
use thiserror::Error as ThisError;

///
/// SerializerError
///
/// Error surface of the top-level facade. Unsupported-type conditions name
/// the type and, for encoding, the requested version and groups, since the
/// usual cause is a missing entry in the generator configuration.
///

#[derive(Debug, ThisError)]
pub enum SerializerError {
    #[error("only the \"json\" format is supported, got \"{0}\"")]
    UnsupportedFormat(String),

    #[error(
        "type \"{type_name}\" is not known in version {version} and groups {groups}. This most \
         likely means the generators were not configured for this combination, or did not run."
    )]
    UnsupportedSerialization {
        type_name: String,
        version: String,
        groups: String,
    },

    #[error(
        "type \"{type_name}\" is not known. This most likely means the generators were not \
         configured for this type, or did not run."
    )]
    UnsupportedDeserialization { type_name: String },

    /// Decoding is context-free by design; only encoding understands
    /// version and group selection.
    #[error("version and group support is not implemented for deserialization")]
    DeserializationContext,

    #[error("error during serialization")]
    Serialization(#[source] ArtifactError),

    #[error("error during deserialization")]
    Deserialization(#[source] ArtifactError),

    #[error("deserializer for \"{type_name}\" produced an unexpected model type")]
    UnexpectedModel { type_name: String },

    #[error("failed to encode JSON")]
    JsonEncode(#[source] serde_json::Error),

    #[error("failed to decode JSON")]
    JsonDecode(#[source] serde_json::Error),
}

/// Unsupported-serialization error with the PHP-style placeholder rendering
/// for the missing axes.
pub(crate) fn unsupported_serialization(
    type_name: &str,
    version: Option<&str>,
    groups: &[String],
) -> SerializerError {
    SerializerError::UnsupportedSerialization {
        type_name: type_name.to_string(),
        version: version.map_or_else(|| "[no version]".to_string(), ToString::to_string),
        groups: if groups.is_empty() {
            "[no groups]".to_string()
        } else {
            groups.join(", ")
        },
    }
}
