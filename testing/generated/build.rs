//! Runs the compiler against the fixture metadata and drops the artifact
//! module into `OUT_DIR`, where the crate includes it.

use jsonforge_gen::{ClassConfig, Compiler, GeneratorConfiguration, GroupCombination};
use jsonforge_testing_fixtures::metadata::{ids, metadata_registry};
use std::{env, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let configuration = configuration().expect("generator configuration is valid");

    Compiler::new(configuration, out_dir.join("jsonforge"))
        .compile(&metadata_registry())
        .expect("artifact generation succeeds");
}

fn configuration() -> Result<GeneratorConfiguration, jsonforge_gen::ConfigError> {
    let mut configuration = GeneratorConfiguration::new(Vec::new(), Vec::new());

    configuration.add_class(
        ClassConfig::new(ids::MODEL)
            .with_group_combination(GroupCombination::new(Vec::<String>::new()))
            .with_group_combination(GroupCombination::new(["api"]))
            .with_group_combination(GroupCombination::new(["details", "api"])),
    )?;
    configuration.add_class(
        ClassConfig::new(ids::VERSIONS)
            .with_default_versions(["", "1", "2", "3", "4"])?,
    )?;
    configuration.add_class(
        ClassConfig::new(ids::GATED_MODEL)
            .with_group_combination(GroupCombination::new(["api"]))
            .with_group_combination(GroupCombination::new(["internal"])),
    )?;

    for id in [
        ids::NESTED,
        ids::LIST_MODEL,
        ids::MAP_MODEL,
        ids::COLLECTION_MODEL,
        ids::FLOAT_MODEL,
        ids::PRIVATE_PROPERTY,
        ids::CONTAINS_NON_EMPTY_CONSTRUCTOR,
        ids::POST_DESERIALIZE,
        ids::RECURSION_MODEL,
        ids::ACCESSOR_ORDER,
    ] {
        configuration.add_class(ClassConfig::new(id))?;
    }

    // a root-level constructor cannot be deserialized into; encode only
    configuration.add_class(ClassConfig::new(ids::NON_EMPTY_CONSTRUCTOR).skip_deserializer())?;

    // the declared zone is decode-only by design
    configuration.add_class(ClassConfig::new(ids::ZONED_DATE).skip_serializer())?;

    Ok(configuration)
}
