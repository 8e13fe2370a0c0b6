//! Fragments for the encode direction (model to JSON value).

use crate::path::ArrayPath;
use proc_macro2::{Ident, TokenStream};
use quote::quote;

/// The complete artifact: one public function over a model reference.
///
/// `use_object_empty` selects how empty objects and empty maps render:
/// an explicit empty-object marker (the JSON-faithful choice) or a bare
/// empty array (the legacy tree shape some consumers expect).
pub fn render_function(name: &Ident, class: &syn::Path, code: &TokenStream) -> TokenStream {
    quote! {
        #[allow(non_snake_case, unused_variables, unused_mut, unused_qualifications)]
        #[allow(clippy::all, clippy::pedantic, clippy::nursery)]
        pub fn #name(
            model: &#class,
            use_object_empty: bool,
        ) -> ::std::result::Result<::serde_json::Value, ::jsonforge::ArtifactError> {
            let empty_object = if use_object_empty {
                ::serde_json::Value::Object(::serde_json::Map::new())
            } else {
                ::serde_json::Value::Array(::std::vec::Vec::new())
            };
            let empty_hashmap = empty_object.clone();
            let mut json_data = ::serde_json::Value::Null;

            #code

            ::std::result::Result::Ok(json_data)
        }
    }
}

/// One class node: start as an object, emit the fields, and collapse to the
/// empty-object marker if every field was guarded away. The marker keeps an
/// all-optional class distinguishable from an empty list on the wire.
pub fn render_class(json_path: &ArrayPath, code: &TokenStream) -> TokenStream {
    quote! {
        #json_path = ::serde_json::Value::Object(::serde_json::Map::new());
        #code
        if #json_path.as_object().is_some_and(|object| object.is_empty()) {
            #json_path = empty_object.clone();
        }
    }
}

/// The per-field not-null guard: bind the accessor result and only emit the
/// field when a value is present.
pub fn render_guard(value: &Ident, accessor: &TokenStream, code: &TokenStream) -> TokenStream {
    quote! {
        if let ::std::option::Option::Some(#value) = #accessor {
            #code
        }
    }
}

pub fn render_assign(json_path: &ArrayPath, value: &TokenStream) -> TokenStream {
    quote! {
        #json_path = #value;
    }
}

/// Indexed loop over a sequential model collection. The output array is
/// pre-sized so element emission can assign by index, mirroring the input.
pub fn render_loop_array(
    json_path: &ArrayPath,
    accessor: &TokenStream,
    index: &Ident,
    code: &TokenStream,
) -> TokenStream {
    quote! {
        #json_path = ::serde_json::Value::Array(
            ::std::vec![::serde_json::Value::Null; #accessor.len()]
        );
        for #index in 0..#accessor.len() {
            #code
        }
    }
}

/// An array field whose element emission produced nothing still has to
/// appear, as an empty list.
pub fn render_loop_array_empty(json_path: &ArrayPath) -> TokenStream {
    quote! {
        #json_path = ::serde_json::Value::Array(::std::vec::Vec::new());
    }
}

/// Keyed loop over a map-shaped model collection. An empty map renders as
/// the empty-object marker, never as an empty list: the wire shape of a map
/// is object-like.
pub fn render_loop_hashmap(
    json_path: &ArrayPath,
    accessor: &TokenStream,
    key: &Ident,
    code: &TokenStream,
) -> TokenStream {
    quote! {
        if #accessor.is_empty() {
            #json_path = empty_hashmap.clone();
        } else {
            #json_path = ::serde_json::Value::Object(::serde_json::Map::new());
            for #key in #accessor.keys().cloned().collect::<::std::vec::Vec<_>>() {
                #code
            }
        }
    }
}

pub fn render_loop_hashmap_empty(json_path: &ArrayPath) -> TokenStream {
    quote! {
        #json_path = empty_hashmap.clone();
    }
}
