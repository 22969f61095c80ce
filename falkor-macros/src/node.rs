
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

use crate::attrs::{has_flag, is_option, named_fields, str_attr};

pub fn expand(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    let name = &ast.ident;

    let label = str_attr(&ast.attrs, "label").unwrap_or_else(|| name.to_string());

    let fields = match named_fields(&ast, "FalkorNode") {
        Ok(fields) => fields,
        Err(e) => return e.to_compile_error().into(),
    };

    let mut inits = Vec::new();

    for f in fields {
        let Some(ident) = f.ident.as_ref() else { continue };
        let key = ident.to_string();
        let ty = &f.ty;

        // #[falkor(id)] reads the server-assigned node id instead of a property.
        if has_flag(&f.attrs, "id") {
            inits.push(quote! {
                #ident: <#ty as falkor_core::traits::FromFalkorValue>::from_value(
                    falkor_core::value::Value::Integer(node.id),
                )
                .map_err(|e| e.with_context(format!("{}::{} (id)", #label, #key)))?
            });
            continue;
        }

        let prop_key = str_attr(&f.attrs, "prop").unwrap_or_else(|| key.clone());

        if is_option(f) {
            inits.push(quote! {
                #ident: match falkor_core::props::node_prop(node, #prop_key) {
                    None => None,
                    Some(v) => <#ty as falkor_core::traits::FromFalkorValue>::from_value(v)
                        .map_err(|e| e.with_context(format!("{}::{} (prop '{}')", #label, #key, #prop_key)))?,
                }
            });
        } else {
            inits.push(quote! {
                #ident: {
                    let v = falkor_core::props::node_prop(node, #prop_key)
                        .ok_or_else(|| falkor_core::error::FalkorError::missing_property(#prop_key, <Self as falkor_core::traits::FalkorNode>::LABEL))?;
                    <#ty as falkor_core::traits::FromFalkorValue>::from_value(v)
                        .map_err(|e| e.with_context(format!("{}::{} (prop '{}')", #label, #key, #prop_key)))?
                }
            });
        }
    }

    let expanded = quote! {
        impl falkor_core::traits::FalkorNode for #name {
            const LABEL: &'static str = #label;

            fn from_node(node: &falkor_core::value::Node) -> Result<Self, falkor_core::error::FalkorError> {
                Ok(Self {
                    #(#inits,)*
                })
            }
        }

        impl falkor_core::traits::FromFalkorValue for #name {
            fn from_value(value: falkor_core::value::Value) -> Result<Self, falkor_core::error::FalkorError> {
                match value {
                    falkor_core::value::Value::Node(n) => <Self as falkor_core::traits::FalkorNode>::from_node(&n),
                    other => Err(falkor_core::error::FalkorError::type_mismatch(
                        "Node", other.type_name(), #label,
                    )),
                }
            }
        }
    };

    expanded.into()
}
