//! Procedural macros for testkit-assert
//!
//! This crate provides `#[derive(FieldSet)]`, which lists a struct's fields
//! for the filter and required-field validators.
//!
//! # Example
//!
//! ```rust,ignore
//! use testkit_assert::fields::FieldSet;
//!
//! #[derive(Debug, Default, Clone, FieldSet)]
//! struct UserFilter {
//!     id: Option<u32>,
//!     #[field(rename = "userName")]
//!     name: Option<String>,
//!     #[field(skip)]
//!     page: u32,
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, Data, DeriveInput, Fields, Ident, Lit, Token,
};

/// Options from a `#[field(...)]` attribute.
#[derive(Default)]
struct FieldConfig {
    /// Leave the field out of the generated list
    skip: bool,
    /// Reported name, if different from the identifier
    rename: Option<String>,
}

impl Parse for FieldConfig {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut config = FieldConfig::default();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;

            match ident.to_string().as_str() {
                "skip" => config.skip = true,
                "rename" => {
                    input.parse::<Token![=]>()?;
                    match input.parse::<Lit>()? {
                        Lit::Str(s) => config.rename = Some(s.value()),
                        other => {
                            return Err(syn::Error::new_spanned(other, "rename expects a string"));
                        }
                    }
                }
                _ => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {ident}"),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(config)
    }
}

/// Merge every `#[field(...)]` attribute on a struct field.
fn field_config(attrs: &[syn::Attribute]) -> syn::Result<FieldConfig> {
    let mut config = FieldConfig::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("field")) {
        let parsed: FieldConfig = attr.parse_args()?;
        config.skip |= parsed.skip;
        if parsed.rename.is_some() {
            config.rename = parsed.rename;
        }
    }
    Ok(config)
}

/// Derive `testkit_assert::fields::FieldSet` for a struct with named fields.
///
/// Fields are listed in declaration order. Every listed field's type must
/// implement `Clone`, `Default` and `Debug`; the struct itself must
/// implement `Default`.
///
/// # Attributes
///
/// - `#[field(skip)]` - Leave the field out
/// - `#[field(rename = "name")]` - Report the field under another name
#[proc_macro_derive(FieldSet, attributes(field))]
pub fn derive_field_set(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);

    expand_field_set(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_field_set(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "FieldSet cannot be derived for generic types",
        ));
    }

    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "FieldSet requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "FieldSet can only be derived for structs",
            ));
        }
    };

    let mut entries = Vec::new();
    for field in named {
        let config = field_config(&field.attrs)?;
        if config.skip {
            continue;
        }

        let Some(ident) = &field.ident else {
            continue;
        };
        let reported = config
            .rename
            .unwrap_or_else(|| ident.to_string().trim_start_matches("r#").to_string());

        entries.push(quote! {
            ::testkit_assert::fields::Field::new(
                #reported,
                |model: &Self| &model.#ident,
                |model: &mut Self| &mut model.#ident,
            )
        });
    }

    Ok(quote! {
        impl ::testkit_assert::fields::FieldSet for #name {
            fn fields() -> ::std::vec::Vec<::testkit_assert::fields::Field<Self>> {
                ::std::vec![#(#entries),*]
            }
        }
    })
}
