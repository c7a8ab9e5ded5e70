//! JSON transport round trips

use crate::common::*;
use marrow::{decode_json, encode_json};

#[test]
fn test_wire_shape_of_a_cycle() {
    let mut heap = Heap::new();
    let b = object(&mut heap, &[("n", Value::Int(1))]);
    heap.set(b, "self", Value::Node(b)).unwrap();

    let json = to_json(&heap, &Value::Node(b)).unwrap();
    assert_eq!(json, r#"[{"keys":{"n":1,"self":[0]},"type":"Object"}]"#);
}

#[test]
fn test_primitive_root_is_plain_json() {
    let heap = Heap::new();
    assert_eq!(to_json(&heap, &Value::from("hi")).unwrap(), r#""hi""#);
    assert_eq!(to_json(&heap, &Value::Int(3)).unwrap(), "3");
    assert_eq!(
        to_json(&heap, &Value::Undefined).unwrap(),
        r#"{"$undefined":true}"#
    );
}

#[test]
fn test_special_floats_travel_in_wrappers() {
    let mut heap = Heap::new();
    let arr = heap.alloc_array(vec![
        Value::Float(f64::INFINITY),
        Value::Float(f64::NEG_INFINITY),
        Value::Float(-0.0),
        Value::Float(f64::NAN),
        Value::Undefined,
    ]);

    let copy = node(&json_round_trip(&mut heap, &Value::Node(arr)));
    let elements = heap.elements(copy).unwrap();
    assert_eq!(elements[0], Value::Float(f64::INFINITY));
    assert_eq!(elements[1], Value::Float(f64::NEG_INFINITY));
    assert!(elements[2].as_float().unwrap().is_sign_negative());
    assert!(elements[3].as_float().unwrap().is_nan());
    assert_eq!(elements[4], Value::Undefined);
}

#[test]
fn test_everything_at_once_through_json() {
    init_tracing();
    let mut heap = Heap::new();
    let proto = object(&mut heap, &[("shared", Value::Bool(true))]);
    let inst = heap.create(Prototype::Node(proto));
    let re = heap.alloc_regexp(RegExp::new("x+", "y").unwrap());
    let sym = heap.alloc_symbol(Some("id"));
    let set = heap.alloc_set(vec![Value::Node(inst), Value::Node(sym)]);
    let map = heap.alloc_map(vec![(Value::Node(sym), Value::Node(re))]);
    let root = object(
        &mut heap,
        &[
            ("set", Value::Node(set)),
            ("map", Value::Node(map)),
            ("inst", Value::Node(inst)),
        ],
    );
    heap.set(inst, "root", Value::Node(root)).unwrap();

    let copy = json_round_trip(&mut heap, &Value::Node(root));
    assert!(heap.structurally_equal(&Value::Node(root), &heap, &copy));
}

#[test]
fn test_json_text_is_deterministic() {
    let mut heap = Heap::new();
    let obj = object(
        &mut heap,
        &[("z", Value::Int(1)), ("a", Value::Int(2)), ("m", Value::Int(3))],
    );
    let first = to_json(&heap, &Value::Node(obj)).unwrap();
    let second = to_json(&heap, &Value::Node(obj)).unwrap();
    assert_eq!(first, second);

    let reencoded = encode_json(&decode_json(&first).unwrap());
    assert_eq!(reencoded, first);
}

#[test]
fn test_json_from_another_producer_is_accepted() {
    let mut heap = Heap::new();
    let json = r#"
        [
            {"type": "Map", "source": [["k", [1]]], "keys": {}},
            {"type": "Array", "source": [1, 2.0, null], "keys": {"back": [0]}}
        ]
    "#;
    let root = node(&from_json(&mut heap, json).unwrap());
    let arr = node(heap.lookup(root, &Value::from("k")).unwrap().unwrap());
    assert_eq!(
        heap.elements(arr).unwrap(),
        &[Value::Int(1), Value::Float(2.0), Value::Null]
    );
    assert_eq!(prop(&heap, arr, "back"), Value::Node(root));
}
