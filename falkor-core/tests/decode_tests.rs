use std::cell::Cell;

use falkor_core::raw::RawCell;
use falkor_core::schema::{GraphSchema, SchemaKind, SchemaSource};
use falkor_core::value::{TemporalKind, Value};
use falkor_core::{DecodeError, FalkorError, ReplyDecoder};

/// Fixed schema: labels, relationship types and property keys of the
/// Person-Visited-Country fixture.
struct Fixture {
    refreshes: Cell<usize>,
}

impl Fixture {
    fn new() -> Self {
        Fixture { refreshes: Cell::new(0) }
    }
}

impl SchemaSource for Fixture {
    fn fetch_schema(&self, kind: SchemaKind) -> Result<Vec<String>, FalkorError> {
        self.refreshes.set(self.refreshes.get() + 1);
        let names: &[&str] = match kind {
            SchemaKind::Label => &["Person", "Friend", "Country"],
            SchemaKind::RelationshipType => &["Visited"],
            SchemaKind::PropertyKey => &["name", "age", "year", "population"],
        };
        Ok(names.iter().map(|s| s.to_string()).collect())
    }
}

fn int(i: i64) -> RawCell {
    RawCell::Int(i)
}

fn text(s: &'static str) -> RawCell {
    RawCell::from(s)
}

fn seq<const N: usize>(items: [RawCell; N]) -> RawCell {
    RawCell::seq(items)
}

fn scalar(tag: i64, payload: RawCell) -> RawCell {
    seq([int(tag), payload])
}

fn prop(key: i64, tag: i64, payload: RawCell) -> RawCell {
    seq([int(key), int(tag), payload])
}

fn person_cell() -> RawCell {
    seq([
        int(7),
        seq([int(0), int(1)]),
        seq([prop(0, 2, text("J")), prop(1, 3, int(33))]),
    ])
}

fn country_cell() -> RawCell {
    seq([
        int(8),
        seq([int(2)]),
        seq([prop(0, 2, text("Japan")), prop(3, 3, int(126_800_000))]),
    ])
}

fn visited_cell() -> RawCell {
    seq([int(0), int(0), int(7), int(8), seq([prop(2, 3, int(2017))])])
}

#[test]
fn test_node_with_two_labels_cold_cache() {
    let schema = GraphSchema::new();
    let source = Fixture::new();
    let decoder = ReplyDecoder::new(&schema, &source);

    let node = decoder.decode_node(person_cell()).unwrap();
    assert_eq!(node.id, 7);
    assert_eq!(node.labels, vec!["Person", "Friend"]);
    assert_eq!(node.properties.len(), 2);
    assert_eq!(node.property("name"), Some(&Value::from("J")));
    assert_eq!(node.property("age"), Some(&Value::Integer(33)));
    // One refresh for labels, one for property keys.
    assert_eq!(source.refreshes.get(), 2);
}

#[test]
fn test_node_without_labels() {
    let schema = GraphSchema::new();
    let source = Fixture::new();
    let decoder = ReplyDecoder::new(&schema, &source);

    let node = decoder.decode_node(seq([int(1), seq([]), seq([])])).unwrap();
    assert!(node.labels.is_empty());
    assert!(node.properties.is_empty());
    assert_eq!(source.refreshes.get(), 0);
}

#[test]
fn test_edge_keeps_endpoint_ids() {
    let schema = GraphSchema::new();
    let source = Fixture::new();
    let decoder = ReplyDecoder::new(&schema, &source);

    let edge = decoder.decode_edge(visited_cell()).unwrap();
    assert_eq!(edge.relation, "Visited");
    assert_eq!(edge.source_id(), 7);
    assert_eq!(edge.destination_id(), 8);
    assert_eq!(edge.property("year"), Some(&Value::Integer(2017)));
}

#[test]
fn test_path_of_two_nodes() {
    let schema = GraphSchema::new();
    let source = Fixture::new();
    let decoder = ReplyDecoder::new(&schema, &source);

    let cell = scalar(
        9,
        seq([
            scalar(6, seq([scalar(8, person_cell()), scalar(8, country_cell())])),
            scalar(6, seq([scalar(7, visited_cell())])),
        ]),
    );
    let value = decoder.decode_scalar(cell).unwrap();
    let path = value.as_path().unwrap();

    assert_eq!(path.node_count(), 2);
    assert_eq!(path.edge_count(), 1);
    let first = path.first_node().unwrap();
    let last = path.last_node().unwrap();
    assert_eq!(first, path.node(0).unwrap());
    assert_eq!(last, path.node(1).unwrap());
    assert_eq!(first.labels[0], "Person");
    assert_eq!(last.labels[0], "Country");

    for i in 0..path.edge_count() {
        let edge = path.edge(i).unwrap();
        assert_eq!(edge.src_id, path.node(i).unwrap().id);
        assert_eq!(edge.dst_id, path.node(i + 1).unwrap().id);
    }
}

#[test]
fn test_path_rejects_non_nodes() {
    let schema = GraphSchema::new();
    let source = Fixture::new();
    let decoder = ReplyDecoder::new(&schema, &source);

    let cell = scalar(
        9,
        seq([scalar(6, seq([scalar(3, int(1))])), scalar(6, seq([]))]),
    );
    let err = decoder.decode_scalar(cell).unwrap_err();
    assert!(matches!(err, FalkorError::Decode(DecodeError::UnexpectedShape { .. })));
}

#[test]
fn test_scalars() {
    let schema = GraphSchema::new();
    let source = Fixture::new();
    let decoder = ReplyDecoder::new(&schema, &source);

    assert_eq!(decoder.decode_scalar(scalar(1, RawCell::Null)).unwrap(), Value::Null);
    assert_eq!(decoder.decode_scalar(scalar(2, text("hi"))).unwrap(), Value::from("hi"));
    assert_eq!(decoder.decode_scalar(scalar(3, int(-5))).unwrap(), Value::Integer(-5));
    assert_eq!(decoder.decode_scalar(scalar(4, text("true"))).unwrap(), Value::Boolean(true));
    assert_eq!(decoder.decode_scalar(scalar(5, text("3.25"))).unwrap(), Value::Double(3.25));
}

#[test]
fn test_malformed_double_is_terminal() {
    let schema = GraphSchema::new();
    let source = Fixture::new();
    let decoder = ReplyDecoder::new(&schema, &source);

    let err = decoder.decode_scalar(scalar(5, text("3.x"))).unwrap_err();
    match err {
        FalkorError::Decode(DecodeError::InvalidNumber { text, .. }) => assert_eq!(text, "3.x"),
        other => panic!("expected InvalidNumber, got: {other}"),
    }
}

#[test]
fn test_padded_numbers_are_malformed() {
    let schema = GraphSchema::new();
    let source = Fixture::new();
    let decoder = ReplyDecoder::new(&schema, &source);

    for padded in [" 1.5", "1.5 ", " 1.5\n"] {
        let err = decoder.decode_scalar(scalar(5, text(padded))).unwrap_err();
        match err {
            FalkorError::Decode(DecodeError::InvalidNumber { text, .. }) => assert_eq!(text, padded),
            other => panic!("expected InvalidNumber, got: {other}"),
        }
    }

    let err = decoder
        .decode_scalar(scalar(11, seq([text("37.0 "), text("-122.0")])))
        .unwrap_err();
    assert!(matches!(err, FalkorError::Decode(DecodeError::InvalidNumber { .. })));

    let err = decoder
        .decode_scalar(scalar(12, seq([text(" 0.5")])))
        .unwrap_err();
    assert!(matches!(err, FalkorError::Decode(DecodeError::InvalidNumber { .. })));
}

#[test]
fn test_padded_double_aborts_assembly() {
    let schema = GraphSchema::new();
    let source = Fixture::new();
    let reply = seq([
        seq([seq([int(1), text("x")])]),
        seq([seq([scalar(5, text(" 1.5\n"))])]),
        seq([text("Cached execution: 0")]),
    ]);

    let err = falkor_core::assemble(reply, &schema, &source).unwrap_err();
    assert!(matches!(err, FalkorError::Decode(DecodeError::InvalidNumber { .. })));
}

#[test]
fn test_array_keeps_order_and_duplicates() {
    let schema = GraphSchema::new();
    let source = Fixture::new();
    let decoder = ReplyDecoder::new(&schema, &source);

    let cell = scalar(
        6,
        seq([scalar(3, int(1)), scalar(3, int(1)), scalar(2, text("x")), scalar(1, RawCell::Null)]),
    );
    let value = decoder.decode_scalar(cell).unwrap();
    assert_eq!(
        value,
        Value::Array(vec![Value::Integer(1), Value::Integer(1), Value::from("x"), Value::Null])
    );
}

#[test]
fn test_nested_array_failure_aborts() {
    let schema = GraphSchema::new();
    let source = Fixture::new();
    let decoder = ReplyDecoder::new(&schema, &source);

    let cell = scalar(6, seq([scalar(3, int(1)), scalar(6, seq([scalar(99, int(0))]))]));
    let err = decoder.decode_scalar(cell).unwrap_err();
    assert!(matches!(err, FalkorError::Decode(DecodeError::UnknownScalarType(99))));
}

#[test]
fn test_map_keys_are_literal() {
    let schema = GraphSchema::new();
    let source = Fixture::new();
    let decoder = ReplyDecoder::new(&schema, &source);

    let cell = scalar(
        10,
        seq([
            text("name"),
            scalar(2, text("Japan")),
            text("inner"),
            scalar(10, seq([text("k"), scalar(3, int(1))])),
            text("name"),
            scalar(2, text("Nippon")),
        ]),
    );
    let value = decoder.decode_scalar(cell).unwrap();
    let map = value.as_map().unwrap();
    assert_eq!(map.len(), 2);
    // Last key wins.
    assert_eq!(map["name"], Value::from("Nippon"));
    assert_eq!(map["inner"].as_map().unwrap()["k"], Value::Integer(1));
    assert_eq!(source.refreshes.get(), 0);
}

#[test]
fn test_point() {
    let schema = GraphSchema::new();
    let source = Fixture::new();
    let decoder = ReplyDecoder::new(&schema, &source);

    let value = decoder
        .decode_scalar(scalar(11, seq([text("37.0"), text("-122.0")])))
        .unwrap();
    let p = value.as_point().unwrap();
    assert_eq!(p.latitude, 37.0);
    assert_eq!(p.longitude, -122.0);
}

#[test]
fn test_vector_narrows_to_f32() {
    let schema = GraphSchema::new();
    let source = Fixture::new();
    let decoder = ReplyDecoder::new(&schema, &source);

    let cell = scalar(
        12,
        seq([RawCell::Double(1.0), RawCell::Double(2.5), RawCell::Double(0.1)]),
    );
    let value = decoder.decode_scalar(cell).unwrap();
    assert_eq!(value.as_vector().unwrap(), &[1.0f32, 2.5, 0.1f64 as f32]);
}

#[test]
fn test_vector_mixed_element_cells() {
    let schema = GraphSchema::new();
    let source = Fixture::new();
    let decoder = ReplyDecoder::new(&schema, &source);

    let cell = scalar(
        12,
        seq([int(3), text("0.25"), RawCell::Double(-1.5), int(16_777_217)]),
    );
    let value = decoder.decode_scalar(cell).unwrap();
    let vector = value.as_vector().unwrap();
    assert_eq!(&vector[..3], &[3.0f32, 0.25, -1.5]);
    // 2^24 + 1 is not representable in f32 and rounds to 2^24.
    assert_eq!(vector[3], 16_777_216.0f32);
}

#[test]
fn test_temporal_units() {
    let schema = GraphSchema::new();
    let source = Fixture::new();
    let decoder = ReplyDecoder::new(&schema, &source);

    let date = decoder.decode_scalar(scalar(14, int(441_763_200))).unwrap();
    let date = date.as_temporal().unwrap();
    assert_eq!(date.kind, TemporalKind::Date);
    assert_eq!(date.instant.timestamp(), 441_763_200);

    let datetime = decoder.decode_scalar(scalar(13, int(441_763_200))).unwrap();
    assert_eq!(datetime.as_temporal().unwrap().kind, TemporalKind::DateTime);
    assert_eq!(datetime.as_temporal().unwrap().instant, date.instant);

    let time = decoder.decode_scalar(scalar(15, int(43_200_000))).unwrap();
    let time = time.as_temporal().unwrap();
    assert_eq!(time.kind, TemporalKind::Time);
    assert_eq!(time.instant.timestamp(), 43_200);
}

#[test]
fn test_duration_is_seconds() {
    let schema = GraphSchema::new();
    let source = Fixture::new();
    let decoder = ReplyDecoder::new(&schema, &source);

    let value = decoder.decode_scalar(scalar(16, int(9_000))).unwrap();
    assert_eq!(value, Value::Duration(chrono::Duration::seconds(9_000)));
}

#[test]
fn test_unknown_property_id() {
    let schema = GraphSchema::new();
    let source = Fixture::new();
    let decoder = ReplyDecoder::new(&schema, &source);

    let cell = seq([int(1), seq([]), seq([prop(42, 3, int(1))])]);
    let err = decoder.decode_node(cell).unwrap_err();
    assert!(matches!(
        err,
        FalkorError::UnknownSchemaId { table: SchemaKind::PropertyKey, id: 42 }
    ));
}

#[test]
fn test_wrong_payload_shape() {
    let schema = GraphSchema::new();
    let source = Fixture::new();
    let decoder = ReplyDecoder::new(&schema, &source);

    let err = decoder.decode_scalar(scalar(3, text("12"))).unwrap_err();
    assert!(matches!(
        err,
        FalkorError::Decode(DecodeError::UnexpectedShape { expected: "Int", got: "Str", .. })
    ));
}
