//! Rust type synthesis for metadata types.
//!
//! The original system never spells types out, its generated code is
//! dynamically typed. Generated Rust needs concrete types in two places:
//! annotations on temporaries (constructor arguments, setter staging) and
//! the turbofish on wholesale scalar-collection copies.

use crate::error::GenError;
use jsonforge_schema::{ClassId, DateTimeRepr, Primitive, PropertyMetadata, PropertyType};
use proc_macro2::TokenStream;
use quote::quote;

/// Parse a class identity into a Rust path.
pub fn class_path(class: &ClassId) -> Result<syn::Path, GenError> {
    syn::parse_str::<syn::Path>(class.as_str()).map_err(|e| GenError::InvalidClassPath {
        class: class.clone(),
        message: e.to_string(),
    })
}

/// Tokens for the model-side type of a property type.
pub fn type_tokens(ty: &PropertyType) -> Result<TokenStream, GenError> {
    let tokens = match ty {
        PropertyType::Primitive(Primitive::Bool) => quote!(bool),
        PropertyType::Primitive(Primitive::Float) => quote!(f64),
        PropertyType::Primitive(Primitive::Int) => quote!(i64),
        PropertyType::Primitive(Primitive::String) => quote!(::std::string::String),
        PropertyType::Unknown => quote!(::serde_json::Value),
        PropertyType::DateTime(datetime) => match datetime.repr {
            DateTimeRepr::Date => quote!(::time::Date),
            DateTimeRepr::OffsetDateTime => quote!(::time::OffsetDateTime),
            DateTimeRepr::PrimitiveDateTime => quote!(::time::PrimitiveDateTime),
        },
        PropertyType::Array(array) => {
            let element = type_tokens(&array.element)?;
            if array.map {
                quote!(::std::collections::BTreeMap<::std::string::String, #element>)
            } else if array.collection {
                quote!(::std::collections::VecDeque<#element>)
            } else {
                quote!(::std::vec::Vec<#element>)
            }
        }
        PropertyType::Class(class) => {
            let path = class_path(class)?;
            quote!(#path)
        }
    };

    Ok(tokens)
}

/// Tokens for the model-side type of a property, including its box.
pub fn property_type_tokens(property: &PropertyMetadata) -> Result<TokenStream, GenError> {
    let inner = type_tokens(&property.ty)?;

    if property.boxed {
        Ok(quote!(::std::boxed::Box<#inner>))
    } else {
        Ok(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonforge_schema::ArrayType;

    fn flat(tokens: &TokenStream) -> String {
        tokens.to_string().replace(' ', "")
    }

    #[test]
    fn maps_and_lists_nest() {
        let ty = PropertyType::Array(ArrayType::map(PropertyType::Array(ArrayType::list(
            PropertyType::Primitive(Primitive::Float),
        ))));

        assert_eq!(
            flat(&type_tokens(&ty).unwrap()),
            "::std::collections::BTreeMap<::std::string::String,::std::vec::Vec<f64>>"
        );
    }

    #[test]
    fn class_paths_parse() {
        let ty = PropertyType::Class(ClassId::new("my_app::models::Nested"));
        assert_eq!(flat(&type_tokens(&ty).unwrap()), "my_app::models::Nested");

        let err = class_path(&ClassId::new("not a path")).unwrap_err();
        assert!(matches!(err, GenError::InvalidClassPath { .. }));
    }
}
