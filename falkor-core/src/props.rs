
//! Centralized property access for decoded nodes and edges.
//!
//! Derive-macro generated code only depends on these functions, not on the
//! layout of [`Node`] and [`Edge`].

use crate::value::{Edge, Node, Value};

/// Read a property from a [`Node`] by key.
///
/// Returns `None` if the property does not exist on the node.
pub fn node_prop(node: &Node, key: &str) -> Option<Value> {
    node.property(key).cloned()
}

/// Read a property from an [`Edge`] by key.
///
/// Returns `None` if the property does not exist on the edge.
pub fn edge_prop(edge: &Edge, key: &str) -> Option<Value> {
    edge.property(key).cloned()
}
