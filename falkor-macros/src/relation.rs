
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

use crate::attrs::{has_flag, is_option, named_fields, option_tokens, str_attr};

pub fn expand(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    let name = &ast.ident;

    let rel_type = str_attr(&ast.attrs, "type").unwrap_or_else(|| name.to_string());
    let from_label = str_attr(&ast.attrs, "from");
    let to_label = str_attr(&ast.attrs, "to");

    let fields = match named_fields(&ast, "FalkorRelation") {
        Ok(fields) => fields,
        Err(e) => return e.to_compile_error().into(),
    };

    let mut inits = Vec::new();

    for f in fields {
        let Some(ident) = f.ident.as_ref() else { continue };
        let key = ident.to_string();
        let ty = &f.ty;

        // Endpoint and identity markers read the edge header, not properties.
        let header = if has_flag(&f.attrs, "id") {
            Some(quote! { edge.id })
        } else if has_flag(&f.attrs, "src") {
            Some(quote! { edge.src_id })
        } else if has_flag(&f.attrs, "dst") {
            Some(quote! { edge.dst_id })
        } else {
            None
        };
        if let Some(source) = header {
            inits.push(quote! {
                #ident: <#ty as falkor_core::traits::FromFalkorValue>::from_value(
                    falkor_core::value::Value::Integer(#source),
                )
                .map_err(|e| e.with_context(format!("{}::{}", #rel_type, #key)))?
            });
            continue;
        }

        let prop_key = str_attr(&f.attrs, "prop").unwrap_or_else(|| key.clone());

        if is_option(f) {
            inits.push(quote! {
                #ident: match falkor_core::props::edge_prop(edge, #prop_key) {
                    None => None,
                    Some(v) => <#ty as falkor_core::traits::FromFalkorValue>::from_value(v)
                        .map_err(|e| e.with_context(format!("{}::{} (prop '{}')", #rel_type, #key, #prop_key)))?,
                }
            });
        } else {
            inits.push(quote! {
                #ident: {
                    let v = falkor_core::props::edge_prop(edge, #prop_key)
                        .ok_or_else(|| falkor_core::error::FalkorError::missing_property(#prop_key, <Self as falkor_core::traits::FalkorRelation>::TYPE))?;
                    <#ty as falkor_core::traits::FromFalkorValue>::from_value(v)
                        .map_err(|e| e.with_context(format!("{}::{} (prop '{}')", #rel_type, #key, #prop_key)))?
                }
            });
        }
    }

    let from_label_tokens = option_tokens(from_label);
    let to_label_tokens = option_tokens(to_label);

    let expanded = quote! {
        impl falkor_core::traits::FalkorRelation for #name {
            const TYPE: &'static str = #rel_type;
            const FROM_LABEL: Option<&'static str> = #from_label_tokens;
            const TO_LABEL: Option<&'static str> = #to_label_tokens;

            fn from_edge(edge: &falkor_core::value::Edge) -> Result<Self, falkor_core::error::FalkorError> {
                Ok(Self {
                    #(#inits,)*
                })
            }
        }

        impl falkor_core::traits::FromFalkorValue for #name {
            fn from_value(value: falkor_core::value::Value) -> Result<Self, falkor_core::error::FalkorError> {
                match value {
                    falkor_core::value::Value::Edge(e) => <Self as falkor_core::traits::FalkorRelation>::from_edge(&e),
                    other => Err(falkor_core::error::FalkorError::type_mismatch(
                        "Edge", other.type_name(), #rel_type,
                    )),
                }
            }
        }
    };

    expanded.into()
}
