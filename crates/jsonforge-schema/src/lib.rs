//! Metadata contract for the jsonforge generator.
//!
//! This crate defines the read-only view of a class that the code generator
//! consumes: the class/property metadata nodes, the closed [`PropertyType`]
//! sum, the reducer strategies that narrow a class definition down to one
//! concrete view per (version, groups) context, and the pure artifact-naming
//! function shared between the generator and the runtime dispatcher.
//!
//! Metadata is data, not reflection: any front end (hand-built definitions,
//! schema files, derive output) can populate a [`MetadataRegistry`] as long
//! as it satisfies the [`MetadataSource`] contract.

pub mod class;
pub mod id;
pub mod naming;
pub mod property;
pub mod reduce;
pub mod registry;
pub mod types;
pub mod version;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        class::{ClassDef, ClassMetadata, ConstructorParameter},
        id::ClassId,
        property::{Accessor, PropertyDef, PropertyMetadata},
        reduce::Reducer,
        registry::{MetadataRegistry, MetadataSource, ResolveError},
        types::{ArrayType, DateTimeRepr, DateTimeType, Primitive, PropertyType, ZoneOffset},
        version::Version,
    };
}

pub use prelude::*;
