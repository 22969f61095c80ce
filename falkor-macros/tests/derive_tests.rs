use std::collections::HashMap;
use std::sync::Arc;
use falkor_macros::{FalkorNode, FalkorRelation, FromFalkor};
use falkor_core::traits::{FalkorNode, FalkorRelation, FromFalkor, FromFalkorValue, NodeWrapper};
use falkor_core::error::FalkorError;
use falkor_core::record::Record;
use falkor_core::value::{Edge, Node, Value};

#[derive(Debug, FalkorNode)]
#[falkor(label = "Person")]
#[allow(dead_code)]
struct Person {
    #[falkor(id)]
    id: i64,
    name: String,
    age: i64,
    #[falkor(prop = "status")]
    relationship_status: Option<String>,
}

#[derive(Debug, FalkorRelation)]
#[falkor(type = "Visited", from = "Person", to = "Country")]
#[allow(dead_code)]
struct Visited {
    #[falkor(src)]
    person: i64,
    #[falkor(dst)]
    country: i64,
    year: i64,
}

#[derive(FromFalkor)]
#[allow(dead_code)]
struct PersonResult {
    p: NodeWrapper<Person>,
}

fn props(entries: Vec<(&str, Value)>) -> HashMap<String, Value> {
    entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

fn john() -> Node {
    Node {
        id: 7,
        labels: vec!["Person".to_string()],
        properties: props(vec![
            ("name", Value::from("John Doe")),
            ("age", Value::Integer(33)),
        ]),
    }
}

fn record(keys: &[&str], values: Vec<Value>) -> Record {
    let keys: Arc<[String]> = keys.iter().map(|k| k.to_string()).collect::<Vec<_>>().into();
    Record::new(values, keys)
}

#[test]
fn test_node_trait_impl() {
    assert_eq!(Person::LABEL, "Person");
}

#[test]
fn test_relation_trait_impl() {
    assert_eq!(Visited::TYPE, "Visited");
    assert_eq!(Visited::FROM_LABEL, Some("Person"));
    assert_eq!(Visited::TO_LABEL, Some("Country"));
}

// --- FromFalkorValue for FalkorNode ---

#[test]
fn test_person_from_value_node() {
    let person = Person::from_value(Value::Node(john())).unwrap();
    assert_eq!(person.id, 7);
    assert_eq!(person.name, "John Doe");
    assert_eq!(person.age, 33);
    assert_eq!(person.relationship_status, None);
}

#[test]
fn test_person_prop_override() {
    let mut node = john();
    node.properties.insert("status".to_string(), Value::from("single"));
    let person = Person::from_node(&node).unwrap();
    assert_eq!(person.relationship_status.as_deref(), Some("single"));
}

#[test]
fn test_person_missing_property() {
    let mut node = john();
    node.properties.remove("age");
    let err = Person::from_node(&node).unwrap_err();
    match &err {
        FalkorError::MissingProperty { property, label } => {
            assert_eq!(property, "age");
            assert_eq!(label, "Person");
        }
        other => panic!("expected MissingProperty, got: {other}"),
    }
}

#[test]
fn test_person_wrong_property_type_has_context() {
    let mut node = john();
    node.properties.insert("age".to_string(), Value::from("old"));
    let err = Person::from_node(&node).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Person::age (prop 'age')"));
    assert!(msg.contains("type mismatch"));
}

#[test]
fn test_person_from_value_wrong_type() {
    let err = Person::from_value(Value::Integer(1)).unwrap_err();
    match &err {
        FalkorError::TypeMismatch { expected, got, .. } => {
            assert_eq!(expected, "Node");
            assert_eq!(got, "Integer");
        }
        other => panic!("expected TypeMismatch, got: {other}"),
    }
}

// --- FromFalkorValue for FalkorRelation ---

#[test]
fn test_visited_from_value_edge() {
    let edge = Edge {
        id: 0,
        relation: "Visited".to_string(),
        src_id: 7,
        dst_id: 8,
        properties: props(vec![("year", Value::Integer(2017))]),
    };
    let visited = Visited::from_value(Value::Edge(edge)).unwrap();
    assert_eq!(visited.person, 7);
    assert_eq!(visited.country, 8);
    assert_eq!(visited.year, 2017);
}

#[test]
fn test_visited_from_value_wrong_type() {
    let err = Visited::from_value(Value::from("oops")).unwrap_err();
    match &err {
        FalkorError::TypeMismatch { expected, got, .. } => {
            assert_eq!(expected, "Edge");
            assert_eq!(got, "String");
        }
        other => panic!("expected TypeMismatch, got: {other}"),
    }
}

// --- FromFalkor ---

#[test]
fn test_node_wrapper_from_record() {
    let rec = record(&["p"], vec![Value::Node(john())]);
    let row = PersonResult::from_record(&rec).unwrap();
    assert_eq!(row.p.0.name, "John Doe");
}

#[derive(FromFalkor)]
#[allow(dead_code)]
struct Counted {
    #[falkor(column = "count(f)")]
    friends: i64,
    note: Option<String>,
}

#[test]
fn test_column_override_and_optional() {
    let rec = record(&["count(f)"], vec![Value::Integer(4)]);
    let row = Counted::from_record(&rec).unwrap();
    assert_eq!(row.friends, 4);
    assert_eq!(row.note, None);
}

#[test]
fn test_missing_column() {
    let rec = record(&["other"], vec![Value::Integer(4)]);
    let err = Counted::from_record(&rec).err().unwrap();
    match &err {
        FalkorError::MissingField { field, struct_name } => {
            assert_eq!(field, "count(f)");
            assert_eq!(struct_name, "Counted");
        }
        other => panic!("expected MissingField, got: {other}"),
    }
}

// --- Flatten ---

#[derive(FromFalkor)]
#[allow(dead_code)]
struct InnerResult {
    name: String,
}

#[derive(FromFalkor)]
#[allow(dead_code)]
struct OuterResult {
    age: i64,
    #[falkor(flatten)]
    inner: InnerResult,
}

#[test]
fn test_flatten_from_record() {
    let rec = record(&["name", "age"], vec![Value::from("Alice"), Value::Integer(30)]);

    let outer = OuterResult::from_record(&rec).unwrap();
    assert_eq!(outer.age, 30);
    assert_eq!(outer.inner.name, "Alice");
}
