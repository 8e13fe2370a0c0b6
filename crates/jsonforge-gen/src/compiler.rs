//! Generation driver.
//!
//! Runs both generators over one configuration and writes the artifact
//! module: every generated function in its own file, plus a `mod.rs` that
//! includes them and registers each one in the runtime registry under its
//! computed name. The consuming crate includes the module from its build
//! output and calls `register` once at startup.

use crate::{
    config::GeneratorConfiguration,
    deserializer::DeserializerGenerator,
    error::GenError,
    rust_type,
    serializer::SerializerGenerator,
};
use jsonforge_schema::{ClassId, MetadataSource};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use std::{
    fs,
    path::{Path, PathBuf},
};

const GENERATED_HEADER: &str = "// @generated by jsonforge. Do not edit.\n";

///
/// Artifact
///
/// One generated function, persisted under its artifact name.
///

#[derive(Clone, Debug)]
pub struct Artifact {
    pub function_name: String,
    pub class: ClassId,
    pub path: PathBuf,
}

///
/// CompiledArtifacts
///

#[derive(Clone, Debug)]
pub struct CompiledArtifacts {
    pub serializers: Vec<Artifact>,
    pub deserializers: Vec<Artifact>,
    pub module_path: PathBuf,
}

///
/// Compiler
///

pub struct Compiler {
    configuration: GeneratorConfiguration,
    out_dir: PathBuf,
}

impl Compiler {
    pub fn new(configuration: GeneratorConfiguration, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            configuration,
            out_dir: out_dir.into(),
        }
    }

    /// Generate every configured artifact and the registry module.
    pub fn compile(&self, metadata: &dyn MetadataSource) -> Result<CompiledArtifacts, GenError> {
        let serializers =
            SerializerGenerator::new(&self.configuration, &self.out_dir).generate(metadata)?;
        let deserializers =
            DeserializerGenerator::new(&self.configuration, &self.out_dir).generate(metadata)?;

        let module_path = self.write_module(&serializers, &deserializers)?;

        tracing::info!(
            serializers = serializers.len(),
            deserializers = deserializers.len(),
            out_dir = %self.out_dir.display(),
            "compiled artifacts"
        );

        Ok(CompiledArtifacts {
            serializers,
            deserializers,
            module_path,
        })
    }

    fn write_module(
        &self,
        serializers: &[Artifact],
        deserializers: &[Artifact],
    ) -> Result<PathBuf, GenError> {
        let mut includes = quote!();
        for artifact in serializers.iter().chain(deserializers) {
            let file = format!("{}.rs", artifact.function_name);
            includes.extend(quote! {
                include!(#file);
            });
        }

        let mut registrations = quote!();
        for artifact in serializers {
            let name = artifact.function_name.as_str();
            let function = format_ident!("{}", artifact.function_name);
            let class_path = rust_type::class_path(&artifact.class)?;
            let class_name = artifact.class.as_str();

            registrations.extend(quote! {
                registry.add_serializer(#name, |model, use_object_empty| {
                    let model = model
                        .downcast_ref::<#class_path>()
                        .ok_or(::jsonforge::ArtifactError::UnexpectedModelType {
                            expected: #class_name,
                        })?;
                    #function(model, use_object_empty)
                });
            });
        }
        for artifact in deserializers {
            let name = artifact.function_name.as_str();
            let function = format_ident!("{}", artifact.function_name);

            registrations.extend(quote! {
                registry.add_deserializer(#name, |json_data| {
                    #function(json_data).map(|model| {
                        ::std::boxed::Box::new(model)
                            as ::std::boxed::Box<
                                dyn ::std::any::Any + ::std::marker::Send + ::std::marker::Sync,
                            >
                    })
                });
            });
        }

        let module = quote! {
            #includes

            /// Wire every generated artifact into the registry under its
            /// computed name.
            #[allow(unused_qualifications, clippy::all, clippy::pedantic, clippy::nursery)]
            pub fn register(registry: &mut ::jsonforge::Registry) {
                #registrations
            }
        };

        let path = self.out_dir.join("mod.rs");
        write_artifact(&path, &module)?;

        Ok(path)
    }
}

/// Persist one generated token stream with the standard header.
pub(crate) fn write_artifact(path: &Path, tokens: &TokenStream) -> Result<(), GenError> {
    let source = format!("{GENERATED_HEADER}\n{tokens}\n");

    fs::write(path, source).map_err(|source| GenError::Write {
        path: path.to_path_buf(),
        source,
    })
}
