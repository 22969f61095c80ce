
//! Procedural macros for falkor.
//!
//! This crate is not meant to be used directly — use the [`falkor`] facade
//! crate which re-exports all macros.

extern crate proc_macro;

use proc_macro::TokenStream;

mod attrs;
mod node;
mod relation;
mod from_falkor;

/// Derive [`FalkorNode`](falkor_core::traits::FalkorNode) and [`FromFalkorValue`](falkor_core::traits::FromFalkorValue) for a struct.
///
/// Maps a decoded node to a Rust struct. Each struct field is read from a
/// node property via `FromFalkorValue`.
///
/// Also implements `FromFalkorValue` so the struct can be converted
/// directly from `Value::Node` without needing `NodeWrapper`.
///
/// # Attributes
///
/// **Struct-level:**
/// - `#[falkor(label = "...")]` — set the node label. Defaults to the struct name.
///
/// **Field-level:**
/// - `#[falkor(prop = "...")]` — override the property name (default: field name).
/// - `#[falkor(id)]` — fill the field from the server-assigned node id.
///
/// `Option<T>` fields become `None` when the property is absent.
///
/// # Example
///
/// ```rust,ignore
/// use falkor::prelude::*;
///
/// #[derive(Debug, FalkorNode)]
/// #[falkor(label = "Person")]
/// struct Person {
///     #[falkor(id)]
///     id: i64,
///     name: String,
///     #[falkor(prop = "status")]
///     relationship_status: Option<String>,
/// }
/// ```
#[proc_macro_derive(FalkorNode, attributes(falkor))]
pub fn falkor_node(input: TokenStream) -> TokenStream {
    node::expand(input)
}

/// Derive [`FalkorRelation`](falkor_core::traits::FalkorRelation) and [`FromFalkorValue`](falkor_core::traits::FromFalkorValue) for a struct.
///
/// Maps a decoded edge to a Rust struct. Each struct field is read from an
/// edge property via `FromFalkorValue`.
///
/// # Attributes
///
/// **Struct-level:**
/// - `#[falkor(type = "...")]` — set the relationship type. Defaults to the struct name.
/// - `#[falkor(from = "...")]` — optional source-node label (documentation).
/// - `#[falkor(to = "...")]` — optional destination-node label (documentation).
///
/// **Field-level:**
/// - `#[falkor(prop = "...")]` — override the property name (default: field name).
/// - `#[falkor(id)]`, `#[falkor(src)]`, `#[falkor(dst)]` — fill the field from
///   the edge id, source node id or destination node id.
///
/// # Example
///
/// ```rust,ignore
/// use falkor::prelude::*;
///
/// #[derive(Debug, FalkorRelation)]
/// #[falkor(type = "VISITED", from = "Person", to = "Country")]
/// struct Visited {
///     #[falkor(src)]
///     person: i64,
///     year: i64,
/// }
/// ```
#[proc_macro_derive(FalkorRelation, attributes(falkor))]
pub fn falkor_relation(input: TokenStream) -> TokenStream {
    relation::expand(input)
}

/// Derive [`FromFalkor`](falkor_core::traits::FromFalkor) for a struct.
///
/// Maps a [`Record`](falkor_core::record::Record) to a Rust struct. Each
/// field is read from the column with the same name.
///
/// # Attributes
///
/// **Field-level:**
/// - `#[falkor(column = "...")]` — read from a differently named column.
/// - `#[falkor(flatten)]` — instead of reading a single column, delegates to
///   the inner type's `FromFalkor::from_record()` with the same record.
///
/// # Field type behaviour
///
/// - **`Option<T>`** — missing column or `null` becomes `None`.
/// - **`NodeWrapper<T>`** — wraps a hand-written `FalkorNode` type.
/// - **`T: FromFalkorValue`** — any type with a value conversion.
///
/// # Example
///
/// ```rust,ignore
/// use falkor::prelude::*;
///
/// #[derive(FromFalkor)]
/// struct PersonRow {
///     p: Person,
///     #[falkor(column = "count(f)")]
///     friends: i64,
///     score: Option<f64>,
/// }
/// ```
#[proc_macro_derive(FromFalkor, attributes(falkor))]
pub fn from_falkor(input: TokenStream) -> TokenStream {
    from_falkor::expand(input)
}
