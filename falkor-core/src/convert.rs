
//! [`FromFalkorValue`] implementations and the typed wrapper types.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::FalkorError;
use crate::traits::{FalkorNode, FalkorRelation, FromFalkorValue, NodeWrapper, RelationWrapper};
use crate::value::{Edge, Node, Path, Point, Temporal, TemporalKind, Value};

// ---------------------------------------------------------------------------
// Identity and primitives
// ---------------------------------------------------------------------------

impl FromFalkorValue for Value {
    fn from_value(value: Value) -> Result<Self, FalkorError> {
        Ok(value)
    }
}

impl FromFalkorValue for String {
    fn from_value(value: Value) -> Result<Self, FalkorError> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(FalkorError::type_mismatch("String", other.type_name(), "String")),
        }
    }
}

impl FromFalkorValue for bool {
    fn from_value(value: Value) -> Result<Self, FalkorError> {
        match value {
            Value::Boolean(b) => Ok(b),
            other => Err(FalkorError::type_mismatch("Boolean", other.type_name(), "bool")),
        }
    }
}

// ---------------------------------------------------------------------------
// Numeric types (Integer → signed/unsigned, Double → f64/f32)
// ---------------------------------------------------------------------------

macro_rules! impl_from_val_int {
    ($t:ty) => {
        impl FromFalkorValue for $t {
            fn from_value(value: Value) -> Result<Self, FalkorError> {
                match value {
                    Value::Integer(v) => <$t>::try_from(v).map_err(|_| {
                        FalkorError::Mapping(format!("{v} out of range for {}", stringify!($t)))
                    }),
                    other => Err(FalkorError::type_mismatch(
                        "Integer",
                        other.type_name(),
                        stringify!($t),
                    )),
                }
            }
        }
    };
}

impl_from_val_int!(i64);
impl_from_val_int!(i32);
impl_from_val_int!(u64);
impl_from_val_int!(u32);
impl_from_val_int!(i16);
impl_from_val_int!(u16);
impl_from_val_int!(i8);
impl_from_val_int!(u8);
impl_from_val_int!(usize);

impl FromFalkorValue for f64 {
    fn from_value(value: Value) -> Result<Self, FalkorError> {
        match value {
            Value::Double(d) => Ok(d),
            other => Err(FalkorError::type_mismatch("Double", other.type_name(), "f64")),
        }
    }
}

impl FromFalkorValue for f32 {
    fn from_value(value: Value) -> Result<Self, FalkorError> {
        match value {
            Value::Double(d) => Ok(d as f32),
            other => Err(FalkorError::type_mismatch("Double", other.type_name(), "f32")),
        }
    }
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

impl<T: FromFalkorValue> FromFalkorValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, FalkorError> {
        match value {
            Value::Array(xs) => xs.into_iter().map(T::from_value).collect(),
            other => Err(FalkorError::type_mismatch("Array", other.type_name(), "Vec<T>")),
        }
    }
}

/// `Option<T>` is the "present vs. null" primitive.
/// - Missing record column is handled in the `FromFalkor` derive (returns `None`).
/// - Present but `null` maps to `None`.
/// - Otherwise maps to `Some(T)`.
impl<T: FromFalkorValue> FromFalkorValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, FalkorError> {
        match value {
            Value::Null => Ok(None),
            other => Ok(Some(T::from_value(other)?)),
        }
    }
}

/// Converts a map value into `HashMap<String, V>`.
impl<V: FromFalkorValue> FromFalkorValue for HashMap<String, V> {
    fn from_value(value: Value) -> Result<Self, FalkorError> {
        match value {
            Value::Map(m) => m
                .into_iter()
                .map(|(k, v)| V::from_value(v).map(|v| (k, v)))
                .collect(),
            other => Err(FalkorError::type_mismatch("Map", other.type_name(), "HashMap<String, V>")),
        }
    }
}

// ---------------------------------------------------------------------------
// Tuples — for common graph shapes (e.g. list unpacking)
// ---------------------------------------------------------------------------

impl<A: FromFalkorValue, B: FromFalkorValue> FromFalkorValue for (A, B) {
    fn from_value(value: Value) -> Result<Self, FalkorError> {
        match value {
            Value::Array(xs) if xs.len() == 2 => match <[Value; 2]>::try_from(xs) {
                Ok([a, b]) => Ok((A::from_value(a)?, B::from_value(b)?)),
                Err(_) => Err(FalkorError::type_mismatch("Array[2]", "Array", "tuple(A, B)")),
            },
            other => Err(FalkorError::type_mismatch("Array[2]", other.type_name(), "tuple(A, B)")),
        }
    }
}

impl<A: FromFalkorValue, B: FromFalkorValue, C: FromFalkorValue> FromFalkorValue for (A, B, C) {
    fn from_value(value: Value) -> Result<Self, FalkorError> {
        match value {
            Value::Array(xs) if xs.len() == 3 => match <[Value; 3]>::try_from(xs) {
                Ok([a, b, c]) => Ok((A::from_value(a)?, B::from_value(b)?, C::from_value(c)?)),
                Err(_) => Err(FalkorError::type_mismatch("Array[3]", "Array", "tuple(A, B, C)")),
            },
            other => Err(FalkorError::type_mismatch("Array[3]", other.type_name(), "tuple(A, B, C)")),
        }
    }
}

// ---------------------------------------------------------------------------
// Graph entities
// ---------------------------------------------------------------------------

impl FromFalkorValue for Node {
    fn from_value(value: Value) -> Result<Self, FalkorError> {
        match value {
            Value::Node(n) => Ok(n),
            other => Err(FalkorError::type_mismatch("Node", other.type_name(), "Node")),
        }
    }
}

impl FromFalkorValue for Edge {
    fn from_value(value: Value) -> Result<Self, FalkorError> {
        match value {
            Value::Edge(e) => Ok(e),
            other => Err(FalkorError::type_mismatch("Edge", other.type_name(), "Edge")),
        }
    }
}

impl FromFalkorValue for Path {
    fn from_value(value: Value) -> Result<Self, FalkorError> {
        match value {
            Value::Path(p) => Ok(p),
            other => Err(FalkorError::type_mismatch("Path", other.type_name(), "Path")),
        }
    }
}

impl<T: FalkorNode> FromFalkorValue for NodeWrapper<T> {
    fn from_value(value: Value) -> Result<Self, FalkorError> {
        match value {
            Value::Node(n) => Ok(NodeWrapper(T::from_node(&n)?)),
            other => Err(FalkorError::type_mismatch("Node", other.type_name(), T::LABEL)),
        }
    }
}

impl<T: FalkorRelation> FromFalkorValue for RelationWrapper<T> {
    fn from_value(value: Value) -> Result<Self, FalkorError> {
        match value {
            Value::Edge(e) => Ok(RelationWrapper(T::from_edge(&e)?)),
            other => Err(FalkorError::type_mismatch("Edge", other.type_name(), T::TYPE)),
        }
    }
}

/// A path whose nodes are mapped through [`FalkorNode`].
///
/// Edges are kept as decoded [`Edge`]s; `edges[i]` connects `nodes[i]` to
/// `nodes[i + 1]`.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(FromFalkor)]
/// struct PathRow {
///     p: FalkorPath<Person>,
/// }
/// // MATCH p = (:Person)-[:KNOWS*..3]->(:Person) RETURN p
/// ```
#[derive(Debug, Clone)]
pub struct FalkorPath<N: FalkorNode> {
    /// Ordered nodes along the path.
    pub nodes: Vec<N>,
    /// Edges connecting consecutive nodes.
    pub edges: Vec<Edge>,
}

impl<N: FalkorNode> FromFalkorValue for FalkorPath<N> {
    fn from_value(value: Value) -> Result<Self, FalkorError> {
        match value {
            Value::Path(p) => {
                let (raw_nodes, edges) = p.into_parts();
                let nodes = raw_nodes
                    .iter()
                    .map(N::from_node)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(FalkorPath { nodes, edges })
            }
            other => Err(FalkorError::type_mismatch("Path", other.type_name(), "FalkorPath")),
        }
    }
}

// ---------------------------------------------------------------------------
// Spatial / vector
// ---------------------------------------------------------------------------

impl FromFalkorValue for Point {
    fn from_value(value: Value) -> Result<Self, FalkorError> {
        match value {
            Value::Point(p) => Ok(p),
            other => Err(FalkorError::type_mismatch("Point", other.type_name(), "Point")),
        }
    }
}

/// Newtype wrapper for `vecf32` values.
///
/// A dedicated type is used instead of `Vec<f32>` because a blanket
/// `FromFalkorValue` impl already exists for `Vec<T: FromFalkorValue>`, which
/// converts arrays, and Rust does not support specialization.
#[derive(Debug, Clone, PartialEq)]
pub struct FalkorVector(pub Vec<f32>);

impl FromFalkorValue for FalkorVector {
    fn from_value(value: Value) -> Result<Self, FalkorError> {
        match value {
            Value::Vector(v) => Ok(FalkorVector(v)),
            other => Err(FalkorError::type_mismatch("VectorF32", other.type_name(), "FalkorVector")),
        }
    }
}

// ---------------------------------------------------------------------------
// Temporal types (chrono)
// ---------------------------------------------------------------------------

impl FromFalkorValue for Temporal {
    fn from_value(value: Value) -> Result<Self, FalkorError> {
        match value {
            Value::Temporal(t) => Ok(t),
            other => Err(FalkorError::type_mismatch("Temporal", other.type_name(), "Temporal")),
        }
    }
}

/// Accepts any of `Date`, `Time` and `DateTime`.
impl FromFalkorValue for DateTime<Utc> {
    fn from_value(value: Value) -> Result<Self, FalkorError> {
        Temporal::from_value(value)
            .map(|t| t.instant)
            .map_err(|e| e.with_context("DateTime<Utc>"))
    }
}

impl FromFalkorValue for NaiveDateTime {
    fn from_value(value: Value) -> Result<Self, FalkorError> {
        match value {
            Value::Temporal(Temporal {
                kind: TemporalKind::DateTime,
                instant,
            }) => Ok(instant.naive_utc()),
            other => Err(FalkorError::type_mismatch("DateTime", other.type_name(), "NaiveDateTime")),
        }
    }
}

impl FromFalkorValue for NaiveDate {
    fn from_value(value: Value) -> Result<Self, FalkorError> {
        match value {
            Value::Temporal(t) if t.kind != TemporalKind::Time => Ok(t.date()),
            other => Err(FalkorError::type_mismatch("Date", other.type_name(), "NaiveDate")),
        }
    }
}

impl FromFalkorValue for NaiveTime {
    fn from_value(value: Value) -> Result<Self, FalkorError> {
        match value {
            Value::Temporal(t) if t.kind != TemporalKind::Date => Ok(t.time()),
            other => Err(FalkorError::type_mismatch("Time", other.type_name(), "NaiveTime")),
        }
    }
}

impl FromFalkorValue for chrono::Duration {
    fn from_value(value: Value) -> Result<Self, FalkorError> {
        match value {
            Value::Duration(d) => Ok(d),
            other => Err(FalkorError::type_mismatch("Duration", other.type_name(), "chrono::Duration")),
        }
    }
}

impl FromFalkorValue for std::time::Duration {
    fn from_value(value: Value) -> Result<Self, FalkorError> {
        match value {
            Value::Duration(d) => d
                .to_std()
                .map_err(|e| FalkorError::Mapping(format!("Duration -> std::time::Duration: {e}"))),
            other => Err(FalkorError::type_mismatch("Duration", other.type_name(), "std::time::Duration")),
        }
    }
}
