
//! Reply decoding, schema cache, and value conversions for falkor.
//!
//! This crate is not meant to be used directly — use the [`falkor`] facade
//! crate instead, which re-exports everything you need.

pub mod traits;
pub mod error;

pub mod raw;
pub mod value;
pub mod convert;
pub mod schema;
pub mod decode;
pub mod stats;
pub mod record;
pub mod result;
pub mod props;

pub use error::{DecodeError, FalkorError};
pub use raw::RawCell;
pub use value::{Edge, Node, Path, Point, Temporal, TemporalKind, Value};
pub use convert::{FalkorPath, FalkorVector};
pub use schema::{GraphSchema, SchemaKind, SchemaSource};
pub use decode::{ColumnKind, ReplyDecoder, ScalarTag};
pub use stats::Statistics;
pub use record::Record;
pub use result::{assemble, Header, ResultSet};
pub use traits::{FromFalkor, FromFalkorValue};
