
//! Decoded values and graph entities.
//!
//! Everything in this module is plain owned data: once a reply is decoded it
//! holds no reference to the graph handle or the transport.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};

/// A single decoded cell of a result set.
///
/// [`Array`](Value::Array), [`Map`](Value::Map) and [`Path`](Value::Path)
/// nest to whatever depth the reply carries.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    String(String),
    Integer(i64),
    Boolean(bool),
    Double(f64),
    Array(Vec<Value>),
    Node(Node),
    Edge(Edge),
    Path(Path),
    /// Map keys are literal strings, never schema-resolved.
    Map(HashMap<String, Value>),
    Point(Point),
    Vector(Vec<f32>),
    Temporal(Temporal),
    Duration(chrono::Duration),
}

impl Value {
    /// Returns a human-readable name for the variant.
    ///
    /// Used in error messages to describe the actual type received when a
    /// conversion fails.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::String(_) => "String",
            Value::Integer(_) => "Integer",
            Value::Boolean(_) => "Boolean",
            Value::Double(_) => "Double",
            Value::Array(_) => "Array",
            Value::Node(_) => "Node",
            Value::Edge(_) => "Edge",
            Value::Path(_) => "Path",
            Value::Map(_) => "Map",
            Value::Point(_) => "Point",
            Value::Vector(_) => "VectorF32",
            Value::Temporal(t) => t.kind.name(),
            Value::Duration(_) => "Duration",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Doubles as-is; integers widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(xs) => Some(xs),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_edge(&self) -> Option<&Edge> {
        match self {
            Value::Edge(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Value::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<Point> {
        match self {
            Value::Point(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&[f32]> {
        match self {
            Value::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_temporal(&self) -> Option<Temporal> {
        match self {
            Value::Temporal(t) => Some(*t),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

// ---------------------------------------------------------------------------
// Graph entities
// ---------------------------------------------------------------------------

/// A node as returned inside a reply.
///
/// `id` is assigned by the server and is stable only within one server
/// instance. Labels keep the order the server sent them in.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: i64,
    pub labels: Vec<String>,
    pub properties: HashMap<String, Value>,
}

impl Node {
    /// Look up a property by name.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// An edge as returned inside a reply.
///
/// Endpoints are opaque node ids; they are never resolved into [`Node`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: i64,
    pub relation: String,
    pub src_id: i64,
    pub dst_id: i64,
    pub properties: HashMap<String, Value>,
}

impl Edge {
    /// Look up a property by name.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn source_id(&self) -> i64 {
        self.src_id
    }

    pub fn destination_id(&self) -> i64 {
        self.dst_id
    }
}

/// A walk through the graph.
///
/// `edges[i]` connects `nodes[i]` to `nodes[i + 1]`, so a well-formed path
/// has exactly one edge fewer than it has nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Path {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Path { nodes, edges }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn edge(&self, index: usize) -> Option<&Edge> {
        self.edges.get(index)
    }

    pub fn first_node(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn last_node(&self) -> Option<&Node> {
        self.nodes.last()
    }

    /// Consume the path, returning its nodes and edges.
    pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
        (self.nodes, self.edges)
    }
}

// ---------------------------------------------------------------------------
// Spatial / temporal
// ---------------------------------------------------------------------------

/// A geographic point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
}

/// Which temporal tag produced a [`Temporal`].
///
/// The tag decides both the unit of the wire payload and how a caller should
/// format the instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalKind {
    /// Payload in Unix seconds.
    Date,
    /// Payload in Unix milliseconds.
    Time,
    /// Payload in Unix seconds.
    DateTime,
}

impl TemporalKind {
    pub fn name(self) -> &'static str {
        match self {
            TemporalKind::Date => "Date",
            TemporalKind::Time => "Time",
            TemporalKind::DateTime => "DateTime",
        }
    }
}

impl fmt::Display for TemporalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An absolute instant tagged with the temporal kind it was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Temporal {
    pub kind: TemporalKind,
    pub instant: DateTime<Utc>,
}

impl Temporal {
    /// Calendar date of the instant (UTC).
    pub fn date(&self) -> chrono::NaiveDate {
        self.instant.date_naive()
    }

    /// Wall-clock time of the instant (UTC).
    pub fn time(&self) -> chrono::NaiveTime {
        self.instant.time()
    }
}
