//! Ahead-of-time serializer generation.
//!
//! This crate walks resolved class metadata and emits, for every configured
//! (class, version, group-combination) triple, a standalone conversion
//! function between a model type and a decoded JSON value. All decisions
//! that can be taken at generation time are: version and group filtering,
//! accessor selection, constructor binding, recursion bounds, date formats.
//! The emitted functions contain no reflection and no branching on any of
//! those axes.
//!
//! ## Crate layout
//! - `path`: access-path builders for the JSON and model address spaces.
//! - `recursion`: the per-descent class counter and its two checks.
//! - `template`: the code fragments both emitters compose.
//! - `serializer` / `deserializer`: the two emission directions.
//! - `config`: the declarative generation configuration (builder and TOML).
//! - `compiler`: the driver that writes artifacts and the registry module.

pub mod compiler;
pub mod config;
pub mod deserializer;
pub mod error;
pub mod path;
pub mod recursion;
pub mod rust_type;
pub mod serializer;
pub mod template;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        compiler::{Artifact, CompiledArtifacts, Compiler},
        config::{ClassConfig, ConfigError, GeneratorConfiguration, GroupCombination},
        deserializer::DeserializerGenerator,
        error::GenError,
        serializer::SerializerGenerator,
    };
}

pub use prelude::*;
