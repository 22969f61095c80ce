
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

use crate::attrs::{has_flag, is_option, named_fields, str_attr};

pub fn expand(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    let name = &ast.ident;

    let fields = match named_fields(&ast, "FromFalkor") {
        Ok(fields) => fields,
        Err(e) => return e.to_compile_error().into(),
    };

    let struct_name = name.to_string();
    let mut inits = Vec::new();

    for f in fields {
        let Some(ident) = f.ident.as_ref() else { continue };
        let ty = &f.ty;

        if has_flag(&f.attrs, "flatten") {
            inits.push(quote! {
                #ident: <#ty as falkor_core::traits::FromFalkor>::from_record(record)?
            });
            continue;
        }

        // Column name defaults to the field name; `#[falkor(column = "...")]` overrides.
        let key = str_attr(&f.attrs, "column").unwrap_or_else(|| ident.to_string());

        if is_option(f) {
            inits.push(quote! {
                #ident: {
                    match falkor_core::record::get_value(record, #key) {
                        None => None,
                        Some(v) => <#ty as falkor_core::traits::FromFalkorValue>::from_value(v)
                            .map_err(|e| e.with_context(format!("{}::{}", #struct_name, #key)))?,
                    }
                }
            });
        } else {
            inits.push(quote! {
                #ident: {
                    let v = falkor_core::record::get_value(record, #key)
                        .ok_or_else(|| falkor_core::error::FalkorError::missing_field(#key, #struct_name))?;
                    <#ty as falkor_core::traits::FromFalkorValue>::from_value(v)
                        .map_err(|e| e.with_context(format!("{}::{}", #struct_name, #key)))?
                }
            });
        }
    }

    let expanded = quote! {
        impl falkor_core::traits::FromFalkor for #name {
            fn from_record(record: &falkor_core::record::Record) -> Result<Self, falkor_core::error::FalkorError> {
                Ok(Self {
                    #(#inits,)*
                })
            }
        }
    };

    expanded.into()
}
