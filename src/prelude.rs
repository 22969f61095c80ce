//! Convenience re-exports for common falkor usage.
//!
//! ```rust
//! use falkor::prelude::*;
//! ```
//!
//! This imports the derive macros (`FalkorNode`, `FalkorRelation`,
//! `FromFalkor`), the core traits (`FalkorNodeTrait`, `FalkorRelationTrait`,
//! `FromFalkorTrait`, `FromFalkorValue`), the server and graph handles, their transport
//! trait, the error type, decoded value types and [`FalkorRows`].

pub use crate::{FalkorNode, FalkorRelation, FromFalkor};
pub use falkor_core::traits::{
    FalkorNode as FalkorNodeTrait, FalkorRelation as FalkorRelationTrait,
    FromFalkor as FromFalkorTrait, FromFalkorValue, NodeWrapper, RelationWrapper,
};
pub use falkor_core::FalkorError;
pub use falkor_core::{Edge, FalkorPath, FalkorVector, Node, Path, Point, Record, ResultSet, Value};
pub use crate::client::FalkorDB;
pub use crate::graph::{Connection, Graph, QueryOptions};
pub use crate::stream::FalkorRows;
