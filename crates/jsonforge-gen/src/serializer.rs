//! Serializer generation: model to JSON value, one artifact per
//! (class, version, group-combination) triple.

use crate::{
    compiler::{Artifact, write_artifact},
    config::GeneratorConfiguration,
    error::GenError,
    path::{ArrayPath, ModelPath},
    recursion::{self, RecursionStack},
    rust_type,
    template::ser as template,
};
use jsonforge_schema::{
    ArrayType, ClassId, ClassMetadata, DateTimeRepr, DateTimeType, MetadataSource, PropertyMetadata,
    PropertyType, Reducer, Version, naming,
};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use std::{fs, path::PathBuf};

///
/// SerializerGenerator
///

pub struct SerializerGenerator<'a> {
    configuration: &'a GeneratorConfiguration,
    out_dir: PathBuf,
}

impl<'a> SerializerGenerator<'a> {
    pub fn new(configuration: &'a GeneratorConfiguration, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            configuration,
            out_dir: out_dir.into(),
        }
    }

    /// Generate and persist every configured encode artifact.
    pub fn generate(&self, metadata: &dyn MetadataSource) -> Result<Vec<Artifact>, GenError> {
        fs::create_dir_all(&self.out_dir).map_err(|source| GenError::Write {
            path: self.out_dir.clone(),
            source,
        })?;

        let mut artifacts = Vec::new();
        for class in self.configuration.classes() {
            if !class.serialize {
                continue;
            }
            for combination in &class.combinations {
                for version in &combination.versions {
                    let version = if version.is_empty() {
                        None
                    } else {
                        Some(version.as_str())
                    };
                    artifacts.push(self.generate_artifact(
                        metadata,
                        &class.class,
                        version,
                        &combination.groups,
                    )?);
                }
            }
        }

        Ok(artifacts)
    }

    /// The reducer chain for one encode context. Version filtering always
    /// runs before group filtering; the preference pass only applies to
    /// unversioned views.
    #[must_use]
    pub fn reducer_chain(version: Option<&str>, groups: &[String]) -> Vec<Reducer> {
        match version {
            None => {
                if groups.is_empty() {
                    vec![Reducer::Preferred, Reducer::TakeBest]
                } else {
                    vec![
                        Reducer::Group(groups.to_vec()),
                        Reducer::Preferred,
                        Reducer::TakeBest,
                    ]
                }
            }
            Some(version) => vec![
                Reducer::Version(Version::new(version)),
                Reducer::Group(groups.to_vec()),
                Reducer::TakeBest,
            ],
        }
    }

    /// Emit one complete artifact function.
    pub fn generate_function(
        &self,
        metadata: &dyn MetadataSource,
        class: &ClassId,
        version: Option<&str>,
        groups: &[String],
    ) -> Result<TokenStream, GenError> {
        let chain = Self::reducer_chain(version, groups);
        let class_metadata = metadata.resolve(class, &chain)?;

        let emitter = Emitter {
            metadata,
            chain: &chain,
            allow_generic_arrays: self.configuration.generic_arrays_allowed(),
        };
        let code = emitter.generate_code_for_class(
            &class_metadata,
            &ArrayPath::new("json_data"),
            &ModelPath::new("model"),
            &RecursionStack::new(),
        )?;

        let function_name = naming::serializer_function_name(class, version, groups);
        let name = format_ident!("{function_name}");
        let class_path = rust_type::class_path(class)?;

        Ok(template::render_function(&name, &class_path, &code))
    }

    fn generate_artifact(
        &self,
        metadata: &dyn MetadataSource,
        class: &ClassId,
        version: Option<&str>,
        groups: &[String],
    ) -> Result<Artifact, GenError> {
        let tokens = self.generate_function(metadata, class, version, groups)?;
        let function_name = naming::serializer_function_name(class, version, groups);
        let path = self.out_dir.join(format!("{function_name}.rs"));
        write_artifact(&path, &tokens)?;

        tracing::info!(artifact = %function_name, class = %class, "generated serializer");

        Ok(Artifact {
            function_name,
            class: class.clone(),
            path,
        })
    }
}

///
/// Emitter
///
/// Per-artifact emission state: the metadata source and the reducer chain,
/// re-applied when descending into nested classes so the whole artifact sees
/// one consistent view.
///

struct Emitter<'a> {
    metadata: &'a dyn MetadataSource,
    chain: &'a [Reducer],
    allow_generic_arrays: bool,
}

impl Emitter<'_> {
    fn generate_code_for_class(
        &self,
        class: &ClassMetadata,
        json_path: &ArrayPath,
        model_path: &ModelPath,
        stack: &RecursionStack,
    ) -> Result<TokenStream, GenError> {
        let stack = stack.enter(&class.class);

        let mut code = quote!();
        for property in &class.properties {
            code.extend(self.generate_code_for_field(property, json_path, model_path, &stack)?);
        }

        Ok(template::render_class(json_path, &code))
    }

    fn generate_code_for_field(
        &self,
        property: &PropertyMetadata,
        json_path: &ArrayPath,
        model_path: &ModelPath,
        stack: &RecursionStack,
    ) -> Result<TokenStream, GenError> {
        if recursion::max_depth_reached(property, stack) {
            return Ok(TokenStream::new());
        }
        if property.max_depth.is_none()
            && let Some(class) = property.ty.leaf_class()
        {
            let path = format!("{}.{}", model_path.render(), property.name);
            recursion::check_unbounded(class, stack, &path)?;
        }

        let field_path = json_path.with_field_name(&property.serialized_name);
        let value = ModelPath::temp_variable(&[&model_path.render(), &property.name]);

        let accessor = if let Some(getter) = &property.accessor.getter {
            let getter = format_ident!("{getter}");
            quote!(#model_path.#getter())
        } else if property.public {
            let field = format_ident!("{}", property.name);
            quote!(#model_path.#field.as_ref())
        } else {
            return Err(GenError::InaccessibleProperty {
                path: format!("{}.{}", model_path.render(), property.name),
                stack: stack.render(),
            });
        };

        let bound = ModelPath::from_variable(value.clone());
        let inner = self.generate_code_for_field_type(&property.ty, &field_path, &bound, stack)?;

        Ok(template::render_guard(&value, &accessor, &inner))
    }

    fn generate_code_for_field_type(
        &self,
        ty: &PropertyType,
        json_path: &ArrayPath,
        model_path: &ModelPath,
        stack: &RecursionStack,
    ) -> Result<TokenStream, GenError> {
        match ty {
            PropertyType::Array(array) => match array.leaf() {
                // scalar collections copy wholesale, even when empty; the
                // serde conversion keeps map vs list wire shapes intact
                PropertyType::Primitive(_) => Ok(template::render_assign(
                    json_path,
                    &quote!(::serde_json::to_value(#model_path)?),
                )),
                PropertyType::Unknown if self.allow_generic_arrays => Ok(template::render_assign(
                    json_path,
                    &quote!(::serde_json::to_value(#model_path)?),
                )),
                PropertyType::Unknown => Err(GenError::GenericArraysDisabled {
                    path: model_path.render(),
                }),
                PropertyType::Class(_) => {
                    self.generate_code_for_array(array, json_path, model_path, stack)
                }
                other => Err(GenError::UnsupportedArrayElement {
                    kind: other.kind(),
                    path: model_path.render(),
                }),
            },

            PropertyType::DateTime(datetime) => {
                if datetime.zone.is_some() {
                    return Err(GenError::SerializeTimezone {
                        path: model_path.render(),
                    });
                }
                let format = render_encode_format(datetime, model_path);
                Ok(template::render_assign(
                    json_path,
                    &quote!(::serde_json::Value::from(#format)),
                ))
            }

            PropertyType::Primitive(_) => Ok(template::render_assign(
                json_path,
                &quote!(::serde_json::Value::from(#model_path.clone())),
            )),

            PropertyType::Unknown => Ok(template::render_assign(
                json_path,
                &quote!(#model_path.clone()),
            )),

            PropertyType::Class(class) => {
                let nested = self.metadata.resolve(class, self.chain)?;
                self.generate_code_for_class(&nested, json_path, model_path, stack)
            }
        }
    }

    fn generate_code_for_array(
        &self,
        array: &ArrayType,
        json_path: &ArrayPath,
        model_path: &ModelPath,
        stack: &RecursionStack,
    ) -> Result<TokenStream, GenError> {
        let rendered = json_path.render();

        if array.map {
            let key = ModelPath::key_variable(&rendered);
            let element_json = json_path.with_key(&key);
            let element_model = model_path.with_key(&key);
            let inner =
                self.generate_array_element(&array.element, &element_json, &element_model, stack)?;

            if inner.is_empty() {
                return Ok(template::render_loop_hashmap_empty(json_path));
            }
            Ok(template::render_loop_hashmap(
                json_path,
                &quote!(#model_path),
                &key,
                &inner,
            ))
        } else {
            let index = ModelPath::index_variable(&rendered);
            let element_json = json_path.with_index(&index);
            let element_model = model_path.with_index(&index);
            let inner =
                self.generate_array_element(&array.element, &element_json, &element_model, stack)?;

            if inner.is_empty() {
                return Ok(template::render_loop_array_empty(json_path));
            }
            Ok(template::render_loop_array(
                json_path,
                &quote!(#model_path),
                &index,
                &inner,
            ))
        }
    }

    fn generate_array_element(
        &self,
        element: &PropertyType,
        json_path: &ArrayPath,
        model_path: &ModelPath,
        stack: &RecursionStack,
    ) -> Result<TokenStream, GenError> {
        match element {
            PropertyType::Array(inner) => {
                self.generate_code_for_array(inner, json_path, model_path, stack)
            }
            PropertyType::Class(class) => {
                let nested = self.metadata.resolve(class, self.chain)?;
                self.generate_code_for_class(&nested, json_path, model_path, stack)
            }
            other => Err(GenError::UnsupportedArrayElement {
                kind: other.kind(),
                path: model_path.render(),
            }),
        }
    }
}

fn render_encode_format(datetime: &DateTimeType, model_path: &ModelPath) -> TokenStream {
    match &datetime.format {
        Some(format) => {
            quote!(#model_path.format(::time::macros::format_description!(#format))?)
        }
        None => match datetime.repr {
            DateTimeRepr::OffsetDateTime => {
                quote!(#model_path.format(&::time::format_description::well_known::Rfc3339)?)
            }
            DateTimeRepr::PrimitiveDateTime => quote! {
                #model_path.format(
                    ::time::macros::format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]")
                )?
            },
            DateTimeRepr::Date => quote! {
                #model_path.format(::time::macros::format_description!("[year]-[month]-[day]"))?
            },
        },
    }
}
