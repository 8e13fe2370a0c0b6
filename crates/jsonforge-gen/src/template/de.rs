//! Fragments for the decode direction (JSON value to model).

use crate::path::{ArrayPath, ModelPath};
use proc_macro2::{Ident, TokenStream};
use quote::quote;

/// The complete artifact: one public function over a decoded JSON value,
/// returning a fully constructed model. The root model variable is always
/// called `model`.
pub fn render_function(name: &Ident, class: &syn::Path, code: &TokenStream) -> TokenStream {
    quote! {
        #[allow(non_snake_case, unused_variables, unused_mut, unused_qualifications)]
        #[allow(clippy::all, clippy::pedantic, clippy::nursery)]
        pub fn #name(
            json_data: &::serde_json::Value,
        ) -> ::std::result::Result<#class, ::jsonforge::ArtifactError> {
            #code

            ::std::result::Result::Ok(model)
        }
    }
}

/// One class node: stage constructor arguments, construct, then populate the
/// remaining properties and run the post-deserialize hooks.
pub fn render_class(
    variable: &Ident,
    class: &syn::Path,
    has_constructor: bool,
    arguments: &[TokenStream],
    init_code: &TokenStream,
    code: &TokenStream,
) -> TokenStream {
    let construct = if has_constructor {
        quote!(#class::new(#(#arguments),*))
    } else {
        quote!(#class::default())
    };

    quote! {
        #init_code
        let mut #variable = #construct;
        #code
    }
}

/// One staged constructor argument: the temporary starts at the declared
/// default and is overwritten if the wire value is present.
pub fn render_argument(
    variable: &Ident,
    ty: &TokenStream,
    default: &TokenStream,
    code: &TokenStream,
) -> TokenStream {
    quote! {
        let mut #variable: ::std::option::Option<#ty> = #default;
        #code
    }
}

pub fn render_post_method(variable: &Ident, method: &Ident) -> TokenStream {
    quote! {
        #variable.#method();
    }
}

/// The presence guard: conversion code for a field only runs when the wire
/// value exists and is not null.
pub fn render_conditional(json_path: &ArrayPath, code: &TokenStream) -> TokenStream {
    quote! {
        if !#json_path.is_null() {
            #code
        }
    }
}

pub fn render_assign(model_path: &ModelPath, value: &TokenStream) -> TokenStream {
    quote! {
        #model_path = #value;
    }
}

/// Call a setter with the staged temporary, only when a value was decoded.
pub fn render_setter(model: &Ident, method: &Ident, temp: &Ident) -> TokenStream {
    quote! {
        if #temp.is_some() {
            #model.#method(#temp);
        }
    }
}

/// Indexed loop over a wire array.
pub fn render_loop_array(json_path: &ArrayPath, index: &Ident, code: &TokenStream) -> TokenStream {
    quote! {
        for #index in 0..#json_path.as_array().map_or(0, ::std::vec::Vec::len) {
            #code
        }
    }
}

/// Keyed loop over a wire object; keys are collected first so element code
/// can index the tree freely.
pub fn render_loop_hashmap(json_path: &ArrayPath, key: &Ident, code: &TokenStream) -> TokenStream {
    quote! {
        for #key in #json_path
            .as_object()
            .map(|object| object.keys().cloned().collect::<::std::vec::Vec<_>>())
            .unwrap_or_default()
        {
            #code
        }
    }
}
