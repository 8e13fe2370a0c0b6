//! Runtime surface for jsonforge's generated serializers.
//!
//! Artifacts generated ahead of time (see the `jsonforge-gen` crate) are
//! plain functions over model references and `serde_json::Value` trees.
//! This crate holds everything those functions and their callers share at
//! runtime:
//!
//! - [`Registry`]: artifact lookup by computed name.
//! - [`ArtifactError`]: the error type generated functions return.
//! - [`Context`]: version and group selection for one encode call.
//! - [`Serializer`]: the strict facade, where a missing artifact is an
//!   unsupported-type error.
//! - [`GeneratedSerializer`]: the dispatching facade that falls back to
//!   plain serde when an artifact is absent or fails.
//!
//! Generated code and the facades derive artifact names from the same pure
//! function in `jsonforge_schema::naming`; there is no other coupling
//! between generation time and runtime.

pub mod artifact;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod registry;
pub mod serializer;

pub use jsonforge_schema as schema;

pub use artifact::{ArtifactError, DeserializeFn, SerializeFn};
pub use context::Context;
pub use dispatch::GeneratedSerializer;
pub use error::SerializerError;
pub use registry::Registry;
pub use serializer::Serializer;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        ArtifactError, Context, GeneratedSerializer, Registry, Serializer, SerializerError,
    };
}
