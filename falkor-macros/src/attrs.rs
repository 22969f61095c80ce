
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Expr, ExprLit, Field, Fields, Lit};

/// Value of `#[falkor(<key> = "...")]` among `attrs`, if present.
pub fn str_attr(attrs: &[Attribute], key: &str) -> Option<String> {
    let mut found = None;
    for attr in attrs {
        if attr.path().is_ident("falkor") {
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident(key) {
                    let value = meta.value()?;
                    let expr: Expr = value.parse()?;
                    if let Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) = expr {
                        found = Some(s.value());
                    }
                } else if meta.input.peek(syn::Token![=]) {
                    // Skip the value of keys we are not looking for.
                    let _: Expr = meta.value()?.parse()?;
                }
                Ok(())
            });
        }
    }
    found
}

/// Whether `#[falkor(<flag>)]` is present among `attrs`.
pub fn has_flag(attrs: &[Attribute], flag: &str) -> bool {
    let mut found = false;
    for attr in attrs {
        if attr.path().is_ident("falkor") {
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident(flag) {
                    found = true;
                } else if meta.input.peek(syn::Token![=]) {
                    let _: Expr = meta.value()?.parse()?;
                }
                Ok(())
            });
        }
    }
    found
}

/// Syntactic check for an `Option<...>` field type.
pub fn is_option(f: &Field) -> bool {
    match &f.ty {
        syn::Type::Path(p) => p
            .path
            .segments
            .last()
            .map(|s| s.ident == "Option")
            .unwrap_or(false),
        _ => false,
    }
}

/// Named fields of a struct, or a compile error naming the derive.
pub fn named_fields<'a>(ast: &'a DeriveInput, derive: &str) -> Result<Vec<&'a Field>, syn::Error> {
    match &ast.data {
        Data::Struct(s) => match &s.fields {
            Fields::Named(named) => Ok(named.named.iter().collect()),
            _ => Err(syn::Error::new_spanned(
                ast,
                format!("{derive} only supports structs with named fields"),
            )),
        },
        _ => Err(syn::Error::new_spanned(ast, format!("{derive} only supports structs"))),
    }
}

/// `Some("...")` or `None` tokens for an optional string attribute.
pub fn option_tokens(value: Option<String>) -> TokenStream {
    match value {
        Some(s) => quote! { Some(#s) },
        None => quote! { None },
    }
}
