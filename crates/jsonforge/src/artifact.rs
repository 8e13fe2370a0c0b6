use serde_json::Value;
use std::any::Any;
use thiserror::Error as ThisError;

/// Entry point of one generated encode artifact. The boolean selects how
/// empty objects and maps render: an explicit empty-object marker, or a bare
/// empty array for consumers of the legacy tree shape.
pub type SerializeFn = fn(&dyn Any, bool) -> Result<Value, ArtifactError>;

/// Entry point of one generated decode artifact.
pub type DeserializeFn = fn(&Value) -> Result<Box<dyn Any + Send + Sync>, ArtifactError>;

///
/// ArtifactError
///
/// Failure inside a generated function. Generated code only defends against
/// what its guards cover (presence checks, format parsing); anything else
/// surfaces here and is contained at the dispatcher boundary.
///

#[derive(Debug, ThisError)]
pub enum ArtifactError {
    #[error("expected a JSON string value")]
    ExpectedString,

    #[error("model has unexpected type, expected {expected}")]
    UnexpectedModelType { expected: &'static str },

    #[error("failed to parse date-time: {0}")]
    DateParse(#[from] time::error::Parse),

    #[error("failed to format date-time: {0}")]
    DateFormat(#[from] time::error::Format),

    #[error("date-time component out of range: {0}")]
    DateRange(#[from] time::error::ComponentRange),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
