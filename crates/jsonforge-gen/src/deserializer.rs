//! Deserializer generation: JSON value to model, one artifact per class.
//!
//! Decoding is context-free by design: whatever version or groups produced a
//! payload, the decoder must be able to re-populate every constructor
//! argument, so it always resolves metadata with the most complete view.

use crate::{
    compiler::{Artifact, write_artifact},
    config::GeneratorConfiguration,
    error::GenError,
    path::{ArrayPath, ModelPath},
    recursion::{self, RecursionStack},
    rust_type,
    template::de as template,
};
use jsonforge_schema::{
    ArrayType, ClassId, ClassMetadata, ConstructorParameter, DateTimeRepr, DateTimeType,
    MetadataSource, Primitive, PropertyMetadata, PropertyType, Reducer, naming,
};
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use serde_json::Value;
use std::{fs, path::PathBuf};

///
/// DeserializerGenerator
///

pub struct DeserializerGenerator<'a> {
    configuration: &'a GeneratorConfiguration,
    out_dir: PathBuf,
}

impl<'a> DeserializerGenerator<'a> {
    pub fn new(configuration: &'a GeneratorConfiguration, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            configuration,
            out_dir: out_dir.into(),
        }
    }

    /// Generate and persist one decode artifact per configured class.
    pub fn generate(&self, metadata: &dyn MetadataSource) -> Result<Vec<Artifact>, GenError> {
        fs::create_dir_all(&self.out_dir).map_err(|source| GenError::Write {
            path: self.out_dir.clone(),
            source,
        })?;

        let mut artifacts = Vec::new();
        for class in self.configuration.classes() {
            if !class.deserialize {
                continue;
            }
            artifacts.push(self.generate_artifact(metadata, &class.class)?);
        }

        Ok(artifacts)
    }

    /// Emit one complete decode artifact function.
    pub fn generate_function(
        &self,
        metadata: &dyn MetadataSource,
        class: &ClassId,
    ) -> Result<TokenStream, GenError> {
        let chain = vec![Reducer::TakeBest];
        let class_metadata = metadata.resolve(class, &chain)?;

        // nested classes get their constructor arguments from sibling
        // properties; at the root there is nothing to source them from
        if !class_metadata.constructor_parameters.is_empty() {
            return Err(GenError::RootClassConstructor {
                class: class.clone(),
            });
        }

        let emitter = Emitter {
            metadata,
            chain: &chain,
            allow_generic_arrays: self.configuration.generic_arrays_allowed(),
        };
        let root = format_ident!("model");
        let code = emitter.generate_code_for_class(
            &class_metadata,
            &ArrayPath::new("json_data"),
            &root,
            &RecursionStack::new(),
        )?;

        let function_name = naming::deserializer_function_name(class);
        let name = format_ident!("{function_name}");
        let class_path = rust_type::class_path(class)?;

        Ok(template::render_function(&name, &class_path, &code))
    }

    fn generate_artifact(
        &self,
        metadata: &dyn MetadataSource,
        class: &ClassId,
    ) -> Result<Artifact, GenError> {
        let tokens = self.generate_function(metadata, class)?;
        let function_name = naming::deserializer_function_name(class);
        let path = self.out_dir.join(format!("{function_name}.rs"));
        write_artifact(&path, &tokens)?;

        tracing::info!(artifact = %function_name, class = %class, "generated deserializer");

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

struct Emitter<'a> {
    metadata: &'a dyn MetadataSource,
    chain: &'a [Reducer],
    allow_generic_arrays: bool,
}

impl Emitter<'_> {
    /// Emit "decode this class into `variable`": constructor staging,
    /// construction, property population, post-deserialize hooks.
    fn generate_code_for_class(
        &self,
        class: &ClassMetadata,
        json_path: &ArrayPath,
        variable: &Ident,
        stack: &RecursionStack,
    ) -> Result<TokenStream, GenError> {
        let stack = stack.enter(&class.class);
        let class_path = rust_type::class_path(&class.class)?;

        let mut argument_temps: Vec<(String, Ident)> = Vec::new();
        let mut overwritten: Vec<String> = Vec::new();
        let mut init_code = quote!();
        let mut code = quote!();

        for property in &class.properties {
            let field_path = json_path.with_field_name(&property.serialized_name);

            if let Some(parameter) = class.constructor_parameter(&property.name) {
                if argument_temps.iter().any(|(name, _)| name == &property.name) {
                    // last definition wins, but the ambiguity is surfaced if
                    // a required argument later fails to resolve
                    overwritten.push(property.name.clone());
                    argument_temps.retain(|(name, _)| name != &property.name);
                }
                let temp = ModelPath::temp_variable(&[&variable.to_string(), &property.name]);
                argument_temps.push((property.name.clone(), temp.clone()));

                let ty = rust_type::property_type_tokens(property)?;
                let default = default_value_tokens(&class.class, parameter, Some(&property.ty))?;

                if recursion::max_depth_reached(property, &stack) {
                    // the staged default still has to exist for the call
                    init_code.extend(template::render_argument(
                        &temp,
                        &ty,
                        &default,
                        &TokenStream::new(),
                    ));
                    continue;
                }
                if property.max_depth.is_none()
                    && let Some(target) = property.ty.leaf_class()
                {
                    let path = format!("{variable}.{}", property.name);
                    recursion::check_unbounded(target, &stack, &path)?;
                }

                let target = ModelPath::from_variable(temp.clone());
                let field_code =
                    self.generate_code_for_field(property, &field_path, &target, &stack)?;
                init_code.extend(template::render_argument(&temp, &ty, &default, &field_code));
            } else {
                code.extend(self.generate_code_for_property(
                    property,
                    &field_path,
                    variable,
                    &stack,
                )?);
            }
        }

        for method in &class.post_deserialize_methods {
            let method = format_ident!("{method}");
            code.extend(template::render_post_method(variable, &method));
        }

        let mut arguments = Vec::new();
        for parameter in &class.constructor_parameters {
            if let Some((_, temp)) = argument_temps.iter().find(|(name, _)| name == &parameter.name)
            {
                arguments.push(quote!(#temp));
                continue;
            }
            if parameter.required {
                let known: Vec<&str> = argument_temps.iter().map(|(name, _)| name.as_str()).collect();
                let known = if known.is_empty() {
                    "<none>".to_string()
                } else {
                    known.join(", ")
                };
                let ambiguity = if overwritten.is_empty() {
                    String::new()
                } else {
                    format!(
                        "; multiple definitions seen for {} (the last one wins)",
                        overwritten.join(", ")
                    )
                };
                return Err(GenError::UnresolvedConstructorArgument {
                    class: class.class.clone(),
                    argument: parameter.name.clone(),
                    known,
                    ambiguity,
                });
            }
            arguments.push(default_value_tokens(&class.class, parameter, None)?);
        }

        Ok(template::render_class(
            variable,
            &class_path,
            !class.constructor_parameters.is_empty(),
            &arguments,
            &init_code,
            &code,
        ))
    }

    fn generate_code_for_property(
        &self,
        property: &PropertyMetadata,
        field_path: &ArrayPath,
        variable: &Ident,
        stack: &RecursionStack,
    ) -> Result<TokenStream, GenError> {
        // a property without a write path is never populated
        if property.read_only {
            return Ok(TokenStream::new());
        }
        if recursion::max_depth_reached(property, stack) {
            return Ok(TokenStream::new());
        }
        if property.max_depth.is_none()
            && let Some(class) = property.ty.leaf_class()
        {
            let path = format!("{variable}.{}", property.name);
            recursion::check_unbounded(class, stack, &path)?;
        }

        if let Some(setter) = &property.accessor.setter {
            let temp = ModelPath::temp_variable(&[&variable.to_string(), &property.name]);
            let ty = rust_type::property_type_tokens(property)?;
            let target = ModelPath::from_variable(temp.clone());
            let field_code = self.generate_code_for_field(property, field_path, &target, stack)?;
            if field_code.is_empty() {
                return Ok(TokenStream::new());
            }

            let setter = format_ident!("{setter}");
            let call = template::render_setter(variable, &setter, &temp);
            return Ok(quote! {
                let mut #temp: ::std::option::Option<#ty> = ::std::option::Option::None;
                #field_code
                #call
            });
        }

        let target = ModelPath::from_variable(variable.clone()).with_property(&property.name);
        self.generate_code_for_field(property, field_path, &target, stack)
    }

    /// Wrap one field's conversion in the presence guard.
    fn generate_code_for_field(
        &self,
        property: &PropertyMetadata,
        field_path: &ArrayPath,
        target: &ModelPath,
        stack: &RecursionStack,
    ) -> Result<TokenStream, GenError> {
        let inner = self.generate_inner_code_for_field_type(property, field_path, target, stack)?;
        if inner.is_empty() {
            return Ok(TokenStream::new());
        }

        Ok(template::render_conditional(field_path, &inner))
    }

    fn generate_inner_code_for_field_type(
        &self,
        property: &PropertyMetadata,
        field_path: &ArrayPath,
        target: &ModelPath,
        stack: &RecursionStack,
    ) -> Result<TokenStream, GenError> {
        match &property.ty {
            PropertyType::Array(array) => {
                self.generate_code_for_array(property, array, field_path, target, stack)
            }

            PropertyType::DateTime(datetime) => {
                Ok(render_date_decode(datetime, field_path, target))
            }

            // the wire may carry an integer literal for a float field; the
            // cast makes `1` decode as `1.0`
            PropertyType::Primitive(Primitive::Float) => Ok(template::render_assign(
                target,
                &quote!(#field_path.as_f64()),
            )),
            PropertyType::Primitive(Primitive::Int) => Ok(template::render_assign(
                target,
                &quote!(#field_path.as_i64()),
            )),
            PropertyType::Primitive(Primitive::Bool) => Ok(template::render_assign(
                target,
                &quote!(#field_path.as_bool()),
            )),
            PropertyType::Primitive(Primitive::String) => Ok(template::render_assign(
                target,
                &quote!(#field_path.as_str().map(::std::borrow::ToOwned::to_owned)),
            )),

            PropertyType::Unknown => Ok(template::render_assign(
                target,
                &quote!(::std::option::Option::Some(#field_path.clone())),
            )),

            PropertyType::Class(class) => {
                let nested = self.metadata.resolve(class, self.chain)?;
                let value = ModelPath::temp_variable(&["value", &field_path.render()]);
                let class_code =
                    self.generate_code_for_class(&nested, field_path, &value, stack)?;
                let wrapped = if property.boxed {
                    quote!(::std::boxed::Box::new(#value))
                } else {
                    quote!(#value)
                };
                Ok(quote! {
                    #class_code
                    #target = ::std::option::Option::Some(#wrapped);
                })
            }
        }
    }

    fn generate_code_for_array(
        &self,
        property: &PropertyMetadata,
        array: &ArrayType,
        field_path: &ArrayPath,
        target: &ModelPath,
        stack: &RecursionStack,
    ) -> Result<TokenStream, GenError> {
        match array.leaf() {
            // scalar collections copy wholesale, even when empty
            PropertyType::Primitive(_) => self.render_verbatim_copy(property, field_path, target),
            PropertyType::Unknown if self.allow_generic_arrays => {
                self.render_verbatim_copy(property, field_path, target)
            }
            PropertyType::Unknown => Err(GenError::GenericArraysDisabled {
                path: field_path.render(),
            }),

            PropertyType::Class(_) => {
                let (code, collector) = self.generate_array_items(array, field_path, stack)?;
                if code.is_empty() {
                    return Ok(TokenStream::new());
                }
                let value = if array.collection {
                    quote!(::std::collections::VecDeque::from(#collector))
                } else {
                    quote!(#collector)
                };
                Ok(quote! {
                    #code
                    #target = ::std::option::Option::Some(#value);
                })
            }

            other => Err(GenError::UnsupportedArrayElement {
                kind: other.kind(),
                path: field_path.render(),
            }),
        }
    }

    fn render_verbatim_copy(
        &self,
        property: &PropertyMetadata,
        field_path: &ArrayPath,
        target: &ModelPath,
    ) -> Result<TokenStream, GenError> {
        let ty = rust_type::type_tokens(&property.ty)?;
        Ok(template::render_assign(
            target,
            &quote! {
                ::std::option::Option::Some(
                    ::serde_json::from_value::<#ty>(#field_path.clone())?
                )
            },
        ))
    }

    /// Build the collector and the element loop for an array of classes (or
    /// of further arrays). Returns the staging code and the collector
    /// variable holding the fully built collection.
    fn generate_array_items(
        &self,
        array: &ArrayType,
        json_path: &ArrayPath,
        stack: &RecursionStack,
    ) -> Result<(TokenStream, Ident), GenError> {
        let rendered = json_path.render();
        let collector = ModelPath::temp_variable(&["items", &rendered]);
        let element_ty = rust_type::type_tokens(&array.element)?;

        let (collector_ty, loop_code) = if array.map {
            let key = ModelPath::key_variable(&rendered);
            let element_json = json_path.with_key(&key);
            let (element_code, element_value) =
                self.generate_element(&array.element, &element_json, stack)?;
            let body = quote! {
                #element_code
                #collector.insert(#key.clone(), #element_value);
            };
            (
                quote!(::std::collections::BTreeMap<::std::string::String, #element_ty>),
                template::render_loop_hashmap(json_path, &key, &body),
            )
        } else {
            let index = ModelPath::index_variable(&rendered);
            let element_json = json_path.with_index(&index);
            let (element_code, element_value) =
                self.generate_element(&array.element, &element_json, stack)?;
            let body = quote! {
                #element_code
                #collector.push(#element_value);
            };
            (
                quote!(::std::vec::Vec<#element_ty>),
                template::render_loop_array(json_path, &index, &body),
            )
        };

        let code = quote! {
            let mut #collector: #collector_ty = ::std::default::Default::default();
            #loop_code
        };

        Ok((code, collector))
    }

    fn generate_element(
        &self,
        element: &PropertyType,
        json_path: &ArrayPath,
        stack: &RecursionStack,
    ) -> Result<(TokenStream, TokenStream), GenError> {
        match element {
            PropertyType::Array(inner) => {
                let (code, collector) = self.generate_array_items(inner, json_path, stack)?;
                let value = if inner.collection {
                    quote!(::std::collections::VecDeque::from(#collector))
                } else {
                    quote!(#collector)
                };
                Ok((code, value))
            }
            PropertyType::Class(class) => {
                let nested = self.metadata.resolve(class, self.chain)?;
                let value = ModelPath::temp_variable(&["value", &json_path.render()]);
                let code = self.generate_code_for_class(&nested, json_path, &value, stack)?;
                Ok((code, quote!(#value)))
            }
            other => Err(GenError::UnsupportedArrayElement {
                kind: other.kind(),
                path: json_path.render(),
            }),
        }
    }
}

/// Staged default for one constructor argument. Required arguments stage
/// `None`; optional ones stage their declared default as a literal.
fn default_value_tokens(
    class: &ClassId,
    parameter: &ConstructorParameter,
    ty: Option<&PropertyType>,
) -> Result<TokenStream, GenError> {
    if parameter.required {
        return Ok(quote!(::std::option::Option::None));
    }

    match &parameter.default {
        None | Some(Value::Null) => Ok(quote!(::std::option::Option::None)),
        Some(Value::Bool(value)) => Ok(quote!(::std::option::Option::Some(#value))),
        Some(Value::Number(number)) => {
            let float = matches!(ty, Some(PropertyType::Primitive(Primitive::Float)));
            if !float && let Some(value) = number.as_i64() {
                Ok(quote!(::std::option::Option::Some(#value)))
            } else if let Some(value) = number.as_f64() {
                Ok(quote!(::std::option::Option::Some(#value)))
            } else {
                Err(GenError::UnsupportedDefault {
                    class: class.clone(),
                    argument: parameter.name.clone(),
                })
            }
        }
        Some(Value::String(value)) => Ok(quote! {
            ::std::option::Option::Some(::std::string::String::from(#value))
        }),
        Some(_) => Err(GenError::UnsupportedDefault {
            class: class.clone(),
            argument: parameter.name.clone(),
        }),
    }
}

fn render_date_decode(
    datetime: &DateTimeType,
    field_path: &ArrayPath,
    target: &ModelPath,
) -> TokenStream {
    let parse = render_date_parse(datetime);
    quote! {
        let raw = #field_path.as_str().ok_or(::jsonforge::ArtifactError::ExpectedString)?;
        #target = ::std::option::Option::Some(#parse);
    }
}

const DEFAULT_DATETIME_FORMAT: &str = "[year]-[month]-[day]T[hour]:[minute]:[second]";
const DEFAULT_DATE_FORMAT: &str = "[year]-[month]-[day]";

fn render_date_parse(datetime: &DateTimeType) -> TokenStream {
    let formats = datetime.decode_formats();

    match datetime.repr {
        DateTimeRepr::OffsetDateTime => {
            if let Some(zone) = datetime.zone {
                // parse the wall-clock form, then pin the declared offset
                let parse = render_parse_chain(
                    &quote!(::time::PrimitiveDateTime),
                    &formats,
                    DEFAULT_DATETIME_FORMAT,
                );
                let hours = zone.hours;
                let minutes = zone.minutes;
                quote! {
                    #parse?.assume_offset(::time::UtcOffset::from_hms(#hours, #minutes, 0)?)
                }
            } else if formats.is_empty() {
                quote! {
                    ::time::OffsetDateTime::parse(
                        raw,
                        &::time::format_description::well_known::Rfc3339,
                    )?
                }
            } else {
                let parse = render_parse_chain(
                    &quote!(::time::OffsetDateTime),
                    &formats,
                    DEFAULT_DATETIME_FORMAT,
                );
                quote!(#parse?)
            }
        }
        DateTimeRepr::PrimitiveDateTime => {
            let parse = render_parse_chain(
                &quote!(::time::PrimitiveDateTime),
                &formats,
                DEFAULT_DATETIME_FORMAT,
            );
            quote!(#parse?)
        }
        DateTimeRepr::Date => {
            let parse =
                render_parse_chain(&quote!(::time::Date), &formats, DEFAULT_DATE_FORMAT);
            quote!(#parse?)
        }
    }
}

/// Try the declared formats in declaration order; the first parse that
/// succeeds wins.
fn render_parse_chain(ty: &TokenStream, formats: &[String], default_format: &str) -> TokenStream {
    if formats.is_empty() {
        return quote! {
            #ty::parse(raw, ::time::macros::format_description!(#default_format))
        };
    }

    let first = &formats[0];
    let mut chain = quote!(#ty::parse(raw, ::time::macros::format_description!(#first)));
    for format in &formats[1..] {
        chain = quote! {
            #chain.or_else(|_| #ty::parse(raw, ::time::macros::format_description!(#format)))
        };
    }

    chain
}
