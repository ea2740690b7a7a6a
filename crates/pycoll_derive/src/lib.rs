//! Derive macros for `pycoll`.
//!
//! - `NamedTuple`: implements `pycoll::named_tuple::NamedTuple`, `pycoll::repr::PyRepr` and `Display` for a
//!   struct with named fields, so it behaves like a Python `namedtuple`.

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Derive named-tuple reflection for a struct with named fields.
///
/// Every field type must implement `Clone`, `Into<pycoll::value::Value>` (via `From`) and
/// `TryFrom<pycoll::value::Value, Error = pycoll::errors::CollectionError>`.
///
/// # Example
/// ```ignore
/// #[derive(Clone, NamedTuple)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// // Generates (roughly):
/// impl pycoll::named_tuple::NamedTuple for Point {
///     fn type_name() -> &'static str { "Point" }
///     fn fields() -> &'static [&'static str] { &["x", "y"] }
///     fn values(&self) -> Vec<Value> { vec![Value::from(self.x.clone()), Value::from(self.y.clone())] }
///     fn make(values: Vec<Value>) -> Result<Self> { /* arity check + TryFrom per field */ }
/// }
/// ```
#[proc_macro_derive(NamedTuple)]
pub fn derive_named_tuple(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let name_str = name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(name, "NamedTuple can only be derived for structs with named fields")
                    .to_compile_error()
                    .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "NamedTuple can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    let idents: Vec<_> = fields.iter().filter_map(|f| f.ident.as_ref()).collect();
    let names: Vec<String> = idents.iter().map(|i| i.to_string()).collect();
    let types: Vec<_> = fields.iter().map(|f| &f.ty).collect();
    let count = idents.len();

    let expanded = quote! {
        impl #impl_generics ::pycoll::named_tuple::NamedTuple for #name #ty_generics #where_clause {
            fn type_name() -> &'static str {
                #name_str
            }

            fn fields() -> &'static [&'static str] {
                &[#(#names),*]
            }

            fn values(&self) -> ::std::vec::Vec<::pycoll::value::Value> {
                ::std::vec![#(::pycoll::value::Value::from(::std::clone::Clone::clone(&self.#idents))),*]
            }

            fn make(
                values: ::std::vec::Vec<::pycoll::value::Value>,
            ) -> ::pycoll::errors::Result<Self> {
                ::pycoll::named_tuple::check_arity(#name_str, #count, values.len())?;
                let mut values = values.into_iter();
                ::std::result::Result::Ok(Self {
                    #(
                        #idents: <#types as ::std::convert::TryFrom<::pycoll::value::Value>>::try_from(
                            values.next().unwrap_or_default(),
                        )?,
                    )*
                })
            }
        }

        impl #impl_generics ::pycoll::repr::PyRepr for #name #ty_generics #where_clause {
            fn write_repr(&self, out: &mut ::std::string::String, config: &::pycoll::repr::ReprConfig) {
                let values = ::pycoll::named_tuple::NamedTuple::values(self);
                let fields = <Self as ::pycoll::named_tuple::NamedTuple>::fields();
                ::pycoll::named_tuple::write_named_repr(
                    out,
                    #name_str,
                    fields.iter().copied().zip(values.iter()),
                    config,
                );
            }
        }

        impl #impl_generics ::std::fmt::Display for #name #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&::pycoll::repr::PyRepr::repr(self))
            }
        }
    };

    TokenStream::from(expanded)
}
