//! Generated-artifact test surface: the build script compiles the fixture
//! metadata into encode/decode functions, this crate includes the result
//! and exposes a ready registry for the integration tests.

pub mod generated {
    include!(concat!(env!("OUT_DIR"), "/jsonforge/mod.rs"));
}

/// A registry with every generated fixture artifact wired in.
#[must_use]
pub fn registry() -> jsonforge::Registry {
    let mut registry = jsonforge::Registry::new();
    generated::register(&mut registry);
    registry
}

/// The strict facade over [`registry`].
#[must_use]
pub fn serializer() -> jsonforge::Serializer {
    jsonforge::Serializer::new(registry())
}
