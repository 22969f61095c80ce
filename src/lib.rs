#![doc = r#"
A synchronous client-side decoder for FalkorDB compact replies, with typed
mapping onto Rust structs.

`falkor` turns the nested arrays of a `GRAPH.QUERY ... --compact` reply into
nodes, edges, paths and scalars, resolving the integer label, relationship
type and property-key ids through a per-graph schema cache that refreshes
itself on a miss. The transport is pluggable: implement [`Connection`] for
whatever sends commands to the server. [`FalkorDB`] wraps a connection for
server-wide commands (graph listing, module configuration) and hands out
[`Graph`] handles.

# Quick start

## Define nodes and relationships

```rust
use falkor::prelude::*;

#[derive(Debug, FalkorNode)]
#[falkor(label = "Person")]
struct Person {
    #[falkor(id)]
    id: i64,
    name: String,
    age: i64,
}

#[derive(Debug, FalkorRelation)]
#[falkor(type = "Visited", from = "Person", to = "Country")]
struct Visited {
    year: i64,
}
```

Both derives also implement `FromFalkorValue`, so `Value::Node` /
`Value::Edge` convert directly without a wrapper.

## Map query results

```rust
use falkor::prelude::*;

# #[derive(Debug, FalkorNode)]
# #[falkor(label = "Person")]
# struct Person { name: String }
#[derive(FromFalkor)]
struct PersonRow {
    p: Person,
    #[falkor(column = "count(f)")]
    friends: i64,
    score: Option<f64>,
}
```

### Flatten nested projections

```rust
use falkor::prelude::*;

#[derive(FromFalkor)]
struct Metadata {
    created: String,
}

#[derive(FromFalkor)]
struct PersonRow {
    name: String,
    #[falkor(flatten)]
    meta: Metadata,
}
```

Both `name` and `created` are read from the same [`Record`].

## Execute queries

```rust,no_run
use falkor::prelude::*;
use falkor::query;

# #[derive(FromFalkor)]
# struct PersonRow { name: String }
# fn example<C: Connection>(graph: &Graph<C>) -> Result<(), FalkorError> {
// Untyped: walk the cursor.
let mut result = graph.query("MATCH (p:Person) RETURN p.name AS name")?;
while result.advance() {
    let record = result.current().ok_or(FalkorError::Mapping("cursor".into()))?;
    println!("{:?}", record.get(0)?);
}
println!("{} nodes created", result.nodes_created());

// Typed: exactly one row (error if empty).
let person: PersonRow = query::query("MATCH (p:Person) RETURN p.name AS name LIMIT 1")
    .fetch_one(graph)?;

// All rows, read-only.
let people: Vec<PersonRow> = query::query("MATCH (p:Person) RETURN p.name AS name")
    .read_only()
    .fetch_all(graph)?;
# Ok(())
# }
```

# Supported value types

`FromFalkorValue` conversions are provided for:

| Reply type | Rust type |
|------------|-----------|
| Integer | `i64`, `i32`, `u64`, `u32`, `i16`, `u16`, `i8`, `u8`, `usize` |
| Double | `f64`, `f32` |
| String | `String` |
| Boolean | `bool` |
| Array | `Vec<T>`, `(A, B)`, `(A, B, C)` |
| Map | `HashMap<String, V>` |
| Null | `Option<T>` |
| Node | [`Node`], `NodeWrapper<T>`, or via `#[derive(FalkorNode)]` |
| Edge | [`Edge`], `RelationWrapper<T>`, or via `#[derive(FalkorRelation)]` |
| Path | [`Path`], [`FalkorPath<N>`] |
| Point | [`Point`] |
| VectorF32 | [`FalkorVector`] |
| Date | `chrono::NaiveDate` |
| Time | `chrono::NaiveTime` |
| DateTime | `chrono::NaiveDateTime`, `chrono::DateTime<Utc>` |
| Duration | `chrono::Duration`, `std::time::Duration` |

# Error handling

Everything returns [`FalkorError`]. Malformed replies surface as
[`FalkorError::Decode`]; a schema id the server still does not list after a
refresh is [`FalkorError::UnknownSchemaId`]. Derive macros wrap conversion
errors with `.with_context()`:

```text
Person::age (prop 'age'): type mismatch: expected Integer, got String (i64)
```

# Logging

The crate emits [`tracing`](https://docs.rs/tracing) events (`schema.refresh`,
`schema.unknown_id`, `schema.clear`, `result.assemble`,
`result.stat_unparsed`, `graph.delete`) and installs no subscriber.
"#]

pub mod client;
pub mod graph;
pub mod prelude;
pub mod query;
pub mod stream;

pub use falkor_core as core;
pub use falkor_macros::{FalkorNode, FalkorRelation, FromFalkor};

pub use falkor_core::traits::{
    FalkorNode as FalkorNodeTrait, FalkorRelation as FalkorRelationTrait,
    FromFalkor as FromFalkorTrait, FromFalkorValue,
};
pub use falkor_core::{
    DecodeError, Edge, FalkorError, FalkorPath, FalkorVector, Header, Node, Path, Point,
    RawCell, Record, ResultSet, Statistics, Temporal, TemporalKind, Value,
};
pub use client::FalkorDB;
pub use graph::{Command, CommandKind, Connection, Graph, QueryOptions};
