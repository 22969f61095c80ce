
//! Recursive decoder for compact reply cells.
//!
//! Scalars arrive as `[tag, payload]`. Nodes and edges reference labels,
//! relationship types and property keys by id; those ids are resolved
//! through the graph's [`GraphSchema`], which may refresh itself from the
//! server on a miss.
//!
//! ```text
//! node     [id, [label-id, ...], [[prop-id, tag, payload], ...]]
//! edge     [id, reltype-id, src-id, dst-id, [[prop-id, tag, payload], ...]]
//! path     [[Array, [[Node, node], ...]], [Array, [[Edge, edge], ...]]]
//! map      [key, [tag, payload], key, [tag, payload], ...]
//! point    [lat-text, lon-text]
//! ```

use std::collections::HashMap;

use chrono::DateTime;

use crate::error::{DecodeError, FalkorError};
use crate::raw::RawCell;
use crate::schema::{GraphSchema, SchemaKind, SchemaSource};
use crate::value::{Edge, Node, Path, Point, Temporal, TemporalKind, Value};

/// Value type tags of the compact protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarTag {
    Null,
    String,
    Integer,
    Boolean,
    Double,
    Array,
    Edge,
    Node,
    Path,
    Map,
    Point,
    VectorF32,
    DateTime,
    Date,
    Time,
    Duration,
}

impl TryFrom<i64> for ScalarTag {
    type Error = DecodeError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Ok(match raw {
            1 => ScalarTag::Null,
            2 => ScalarTag::String,
            3 => ScalarTag::Integer,
            4 => ScalarTag::Boolean,
            5 => ScalarTag::Double,
            6 => ScalarTag::Array,
            7 => ScalarTag::Edge,
            8 => ScalarTag::Node,
            9 => ScalarTag::Path,
            10 => ScalarTag::Map,
            11 => ScalarTag::Point,
            12 => ScalarTag::VectorF32,
            13 => ScalarTag::DateTime,
            14 => ScalarTag::Date,
            15 => ScalarTag::Time,
            16 => ScalarTag::Duration,
            // 0 is the protocol's explicit "unknown".
            other => return Err(DecodeError::UnknownScalarType(other)),
        })
    }
}

impl From<ScalarTag> for i64 {
    fn from(tag: ScalarTag) -> i64 {
        match tag {
            ScalarTag::Null => 1,
            ScalarTag::String => 2,
            ScalarTag::Integer => 3,
            ScalarTag::Boolean => 4,
            ScalarTag::Double => 5,
            ScalarTag::Array => 6,
            ScalarTag::Edge => 7,
            ScalarTag::Node => 8,
            ScalarTag::Path => 9,
            ScalarTag::Map => 10,
            ScalarTag::Point => 11,
            ScalarTag::VectorF32 => 12,
            ScalarTag::DateTime => 13,
            ScalarTag::Date => 14,
            ScalarTag::Time => 15,
            ScalarTag::Duration => 16,
        }
    }
}

/// Column categories announced in a result header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Scalar,
    Node,
    Relation,
}

impl TryFrom<i64> for ColumnKind {
    type Error = DecodeError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        match raw {
            1 => Ok(ColumnKind::Scalar),
            2 => Ok(ColumnKind::Node),
            3 => Ok(ColumnKind::Relation),
            other => Err(DecodeError::UnknownColumnType(other)),
        }
    }
}

/// Decodes cells of one reply against one graph's schema.
pub struct ReplyDecoder<'a> {
    schema: &'a GraphSchema,
    source: &'a dyn SchemaSource,
}

impl<'a> ReplyDecoder<'a> {
    pub fn new(schema: &'a GraphSchema, source: &'a dyn SchemaSource) -> Self {
        ReplyDecoder { schema, source }
    }

    /// Decode a row cell according to its column category.
    pub fn decode_cell(&self, kind: ColumnKind, cell: RawCell) -> Result<Value, FalkorError> {
        match kind {
            ColumnKind::Scalar => self.decode_scalar(cell),
            ColumnKind::Node => self.decode_node(cell).map(Value::Node),
            ColumnKind::Relation => self.decode_edge(cell).map(Value::Edge),
        }
    }

    /// Decode a `[tag, payload]` cell.
    pub fn decode_scalar(&self, cell: RawCell) -> Result<Value, FalkorError> {
        let [tag, payload] = cell.into_array::<2>("scalar cell")?;
        let tag = ScalarTag::try_from(tag.into_int("scalar tag")?)?;
        self.decode_tagged(tag, payload)
    }

    fn decode_tagged(&self, tag: ScalarTag, payload: RawCell) -> Result<Value, FalkorError> {
        let value = match tag {
            ScalarTag::Null => Value::Null,
            ScalarTag::String => Value::String(payload.into_text("string payload")?),
            ScalarTag::Integer => Value::Integer(payload.into_int("integer payload")?),
            ScalarTag::Boolean => Value::Boolean(decode_bool(payload)?),
            ScalarTag::Double => Value::Double(decode_f64(payload, "double payload")?),
            ScalarTag::Array => Value::Array(self.decode_array(payload)?),
            ScalarTag::Edge => Value::Edge(self.decode_edge(payload)?),
            ScalarTag::Node => Value::Node(self.decode_node(payload)?),
            ScalarTag::Path => Value::Path(self.decode_path(payload)?),
            ScalarTag::Map => Value::Map(self.decode_map(payload)?),
            ScalarTag::Point => Value::Point(decode_point(payload)?),
            ScalarTag::VectorF32 => Value::Vector(decode_vector(payload)?),
            ScalarTag::DateTime => Value::Temporal(decode_temporal(TemporalKind::DateTime, payload)?),
            ScalarTag::Date => Value::Temporal(decode_temporal(TemporalKind::Date, payload)?),
            ScalarTag::Time => Value::Temporal(decode_temporal(TemporalKind::Time, payload)?),
            ScalarTag::Duration => Value::Duration(decode_duration(payload)?),
        };
        Ok(value)
    }

    pub fn decode_node(&self, cell: RawCell) -> Result<Node, FalkorError> {
        let [id, label_ids, props] = cell.into_array::<3>("node")?;
        let id = id.into_int("node id")?;

        let label_ids = label_ids.into_seq("node labels")?;
        let mut labels = Vec::with_capacity(label_ids.len());
        for label_id in label_ids {
            let label_id = label_id.into_int("label id")?;
            labels.push(self.resolve(SchemaKind::Label, label_id)?);
        }

        let properties = self.decode_properties(props)?;
        Ok(Node {
            id,
            labels,
            properties,
        })
    }

    pub fn decode_edge(&self, cell: RawCell) -> Result<Edge, FalkorError> {
        let [id, relation, src_id, dst_id, props] = cell.into_array::<5>("edge")?;
        let id = id.into_int("edge id")?;
        let relation = self.resolve(SchemaKind::RelationshipType, relation.into_int("relationship type id")?)?;
        let src_id = src_id.into_int("edge source id")?;
        let dst_id = dst_id.into_int("edge destination id")?;
        let properties = self.decode_properties(props)?;
        Ok(Edge {
            id,
            relation,
            src_id,
            dst_id,
            properties,
        })
    }

    fn decode_properties(&self, cell: RawCell) -> Result<HashMap<String, Value>, FalkorError> {
        let entries = cell.into_seq("property list")?;
        let mut properties = HashMap::with_capacity(entries.len());
        for entry in entries {
            let [key_id, tag, payload] = entry.into_array::<3>("property")?;
            let key = self.resolve(SchemaKind::PropertyKey, key_id.into_int("property key id")?)?;
            let tag = ScalarTag::try_from(tag.into_int("property tag")?)?;
            properties.insert(key, self.decode_tagged(tag, payload)?);
        }
        Ok(properties)
    }

    fn decode_array(&self, cell: RawCell) -> Result<Vec<Value>, FalkorError> {
        cell.into_seq("array")?
            .into_iter()
            .map(|item| self.decode_scalar(item))
            .collect()
    }

    fn decode_path(&self, cell: RawCell) -> Result<Path, FalkorError> {
        let [nodes, edges] = cell.into_array::<2>("path")?;
        let nodes = match self.decode_scalar(nodes)? {
            Value::Array(items) => items
                .into_iter()
                .map(|v| match v {
                    Value::Node(n) => Ok(n),
                    other => Err(DecodeError::shape("Node", other.type_name(), "path nodes")),
                })
                .collect::<Result<Vec<_>, _>>()?,
            other => return Err(DecodeError::shape("Array", other.type_name(), "path nodes").into()),
        };
        let edges = match self.decode_scalar(edges)? {
            Value::Array(items) => items
                .into_iter()
                .map(|v| match v {
                    Value::Edge(e) => Ok(e),
                    other => Err(DecodeError::shape("Edge", other.type_name(), "path edges")),
                })
                .collect::<Result<Vec<_>, _>>()?,
            other => return Err(DecodeError::shape("Array", other.type_name(), "path edges").into()),
        };
        Ok(Path::new(nodes, edges))
    }

    fn decode_map(&self, cell: RawCell) -> Result<HashMap<String, Value>, FalkorError> {
        let flat = cell.into_seq("map")?;
        if flat.len() % 2 != 0 {
            return Err(DecodeError::shape("even-length Seq", "odd-length Seq", "map").into());
        }
        let mut map = HashMap::with_capacity(flat.len() / 2);
        let mut it = flat.into_iter();
        while let (Some(key), Some(value)) = (it.next(), it.next()) {
            let key = key.into_text("map key")?;
            map.insert(key, self.decode_scalar(value)?);
        }
        Ok(map)
    }

    fn resolve(&self, kind: SchemaKind, id: i64) -> Result<String, FalkorError> {
        self.schema.resolve(kind, id, self.source)
    }
}

fn decode_bool(payload: RawCell) -> Result<bool, DecodeError> {
    let text = payload.into_text("boolean payload")?;
    match text.as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(DecodeError::InvalidBoolean(text)),
    }
}

fn decode_f64(payload: RawCell, context: &'static str) -> Result<f64, DecodeError> {
    match payload {
        RawCell::Double(d) => Ok(d),
        other => {
            // Padding is malformed, not ignored.
            let text = other.into_text(context)?;
            text.parse::<f64>()
                .map_err(|_| DecodeError::InvalidNumber { text, context })
        }
    }
}

fn decode_point(payload: RawCell) -> Result<Point, DecodeError> {
    let [lat, lon] = payload.into_array::<2>("point")?;
    Ok(Point {
        latitude: decode_f64(lat, "point latitude")?,
        longitude: decode_f64(lon, "point longitude")?,
    })
}

fn decode_vector(payload: RawCell) -> Result<Vec<f32>, DecodeError> {
    payload
        .into_seq("vector")?
        .into_iter()
        .map(|item| match item {
            // Integer elements narrow straight to f32 and round above 2^24.
            RawCell::Int(i) => Ok(i as f32),
            other => decode_f64(other, "vector element").map(|d| d as f32),
        })
        .collect()
}

fn decode_temporal(kind: TemporalKind, payload: RawCell) -> Result<Temporal, DecodeError> {
    let raw = payload.into_int("temporal payload")?;
    // Date and DateTime carry seconds, Time carries milliseconds.
    let instant = match kind {
        TemporalKind::Date | TemporalKind::DateTime => DateTime::from_timestamp(raw, 0),
        TemporalKind::Time => DateTime::from_timestamp_millis(raw),
    };
    let instant = instant.ok_or(DecodeError::TemporalOutOfRange {
        kind: kind.name(),
        raw,
    })?;
    Ok(Temporal { kind, instant })
}

fn decode_duration(payload: RawCell) -> Result<chrono::Duration, DecodeError> {
    let raw = payload.into_int("duration payload")?;
    chrono::Duration::try_seconds(raw).ok_or(DecodeError::TemporalOutOfRange {
        kind: "Duration",
        raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoSchema;

    impl SchemaSource for NoSchema {
        fn fetch_schema(&self, _kind: SchemaKind) -> Result<Vec<String>, FalkorError> {
            Ok(Vec::new())
        }
    }

    fn scalar(tag: i64, payload: RawCell) -> RawCell {
        RawCell::seq([RawCell::Int(tag), payload])
    }

    #[test]
    fn unknown_tags_are_rejected() {
        let schema = GraphSchema::new();
        let decoder = ReplyDecoder::new(&schema, &NoSchema);
        for tag in [0, 17, -3] {
            let err = decoder.decode_scalar(scalar(tag, RawCell::Null)).unwrap_err();
            assert!(matches!(
                err,
                FalkorError::Decode(DecodeError::UnknownScalarType(t)) if t == tag
            ));
        }
    }

    #[test]
    fn tag_numbers_round_trip() {
        for raw in 1..=16 {
            let tag = ScalarTag::try_from(raw).unwrap();
            assert_eq!(i64::from(tag), raw);
        }
    }

    #[test]
    fn boolean_accepts_only_literals() {
        assert!(decode_bool(RawCell::from("true")).unwrap());
        assert!(!decode_bool(RawCell::from("false")).unwrap());
        assert_eq!(
            decode_bool(RawCell::from("TRUE")).unwrap_err(),
            DecodeError::InvalidBoolean("TRUE".into())
        );
    }

    #[test]
    fn time_is_milliseconds_date_is_seconds() {
        let date = decode_temporal(TemporalKind::Date, RawCell::Int(86_400)).unwrap();
        assert_eq!(date.instant.timestamp(), 86_400);
        let time = decode_temporal(TemporalKind::Time, RawCell::Int(86_400)).unwrap();
        assert_eq!(time.instant.timestamp_millis(), 86_400);
    }

    #[test]
    fn odd_map_is_rejected() {
        let schema = GraphSchema::new();
        let decoder = ReplyDecoder::new(&schema, &NoSchema);
        let cell = scalar(10, RawCell::seq([RawCell::from("k")]));
        assert!(decoder.decode_scalar(cell).is_err());
    }
}
