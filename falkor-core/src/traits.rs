
//! Core traits for mapping decoded graph values onto Rust structs.

use crate::error::FalkorError;
use crate::record::Record;
use crate::value::{Edge, Node, Value};

/// Maps a decoded [`Node`] to a Rust struct.
///
/// Automatically implemented by `#[derive(FalkorNode)]`. The derive also
/// generates a [`FromFalkorValue`] impl so the struct can be converted
/// directly from `Value::Node`.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(FalkorNode)]
/// #[falkor(label = "Person")]
/// struct Person {
///     name: String,
///     age: i64,
/// }
///
/// assert_eq!(Person::LABEL, "Person");
/// ```
pub trait FalkorNode: Sized {
    /// The node label (e.g. `"Person"`).
    const LABEL: &'static str;

    /// Build `Self` from a decoded [`Node`].
    fn from_node(node: &Node) -> Result<Self, FalkorError>;
}

/// Maps a decoded [`Edge`] to a Rust struct.
///
/// Automatically implemented by `#[derive(FalkorRelation)]`. The derive
/// also generates a [`FromFalkorValue`] impl so the struct can be converted
/// directly from `Value::Edge`.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(FalkorRelation)]
/// #[falkor(type = "VISITED", from = "Person", to = "Country")]
/// struct Visited {
///     year: i64,
/// }
///
/// assert_eq!(Visited::TYPE, "VISITED");
/// ```
pub trait FalkorRelation: Sized {
    /// The relationship type (e.g. `"VISITED"`).
    const TYPE: &'static str;

    /// Optional label of the source node, for documentation.
    const FROM_LABEL: Option<&'static str> = None;
    /// Optional label of the destination node, for documentation.
    const TO_LABEL: Option<&'static str> = None;

    /// Build `Self` from a decoded [`Edge`].
    fn from_edge(edge: &Edge) -> Result<Self, FalkorError>;
}

/// Maps a [`Record`] into a Rust struct by column name.
///
/// Automatically implemented by `#[derive(FromFalkor)]`. Each struct field
/// maps to a column name in the record.
///
/// # Field attributes
///
/// - **`Option<T>`** fields tolerate missing columns (become `None`).
/// - **`#[falkor(flatten)]`** delegates to the inner type's `FromFalkor` impl,
///   passing the same record.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(FromFalkor)]
/// struct PersonRow {
///     name: String,
///     age: Option<i64>,
///     #[falkor(flatten)]
///     meta: Metadata,
/// }
/// ```
pub trait FromFalkor: Sized {
    /// Build `Self` from a [`Record`].
    fn from_record(record: &Record) -> Result<Self, FalkorError>;
}

/// Converts a single decoded [`Value`] into a Rust type.
///
/// This is the core conversion primitive. Implementations exist for
/// primitives, collections, temporal and spatial types, and graph entities.
///
/// `#[derive(FalkorNode)]` and `#[derive(FalkorRelation)]` implement this
/// trait too, so node/edge structs can be used directly as field types in
/// `FromFalkor` structs without [`NodeWrapper`]/[`RelationWrapper`].
pub trait FromFalkorValue: Sized {
    /// Convert a [`Value`] into `Self`.
    fn from_value(value: Value) -> Result<Self, FalkorError>;
}

impl FromFalkor for Record {
    fn from_record(record: &Record) -> Result<Self, FalkorError> {
        Ok(record.clone())
    }
}

/// Newtype wrapper for embedding a [`FalkorNode`] inside a [`FromFalkor`] struct.
///
/// Needed only when the node type implements `FalkorNode` by hand; derived
/// node types already implement [`FromFalkorValue`].
///
/// ```rust,ignore
/// #[derive(FromFalkor)]
/// struct PersonRow {
///     p: NodeWrapper<Person>,
/// }
/// ```
pub struct NodeWrapper<T>(pub T);

/// Newtype wrapper for embedding a [`FalkorRelation`] inside a [`FromFalkor`] struct.
///
/// Analogous to [`NodeWrapper`] but for edges.
pub struct RelationWrapper<T>(pub T);
