//! Cycles, sharing and depth

use crate::common::*;

#[test]
fn test_self_cycle_is_preserved() {
    init_tracing();
    let mut heap = Heap::new();
    let a = object(&mut heap, &[]);
    let b = object(&mut heap, &[("a", Value::Node(a))]);
    heap.set(b, "self", Value::Node(b)).unwrap();

    let copy = node(&round_trip(&mut heap, &Value::Node(b)));
    assert_ne!(copy, b);
    assert_eq!(prop(&heap, copy, "self"), Value::Node(copy));
    assert_ne!(prop(&heap, copy, "a"), Value::Node(a));
}

#[test]
fn test_mutual_cycle_is_preserved() {
    let mut heap = Heap::new();
    let a = object(&mut heap, &[]);
    let b = object(&mut heap, &[("a", Value::Node(a))]);
    heap.set(a, "b", Value::Node(b)).unwrap();

    let copy = node(&round_trip(&mut heap, &Value::Node(a)));
    let copy_b = node(&prop(&heap, copy, "b"));
    assert_eq!(prop(&heap, copy_b, "a"), Value::Node(copy));
}

#[test]
fn test_shared_reference_stays_shared() {
    let mut heap = Heap::new();
    let shared = object(&mut heap, &[("n", Value::Int(1))]);
    let root = object(
        &mut heap,
        &[("x", Value::Node(shared)), ("y", Value::Node(shared))],
    );

    let encoded = serialize(&heap, &Value::Node(root)).unwrap();
    assert_eq!(encoded.as_records().unwrap().len(), 2);

    let copy = node(&deserialize(&mut heap, &encoded).unwrap());
    let x = node(&prop(&heap, copy, "x"));
    let y = node(&prop(&heap, copy, "y"));
    assert_eq!(x, y);
    assert_ne!(x, shared);
}

#[test]
fn test_array_containing_itself() {
    let mut heap = Heap::new();
    let arr = heap.alloc_array(vec![Value::Int(1)]);
    heap.push(arr, Value::Node(arr)).unwrap();

    let copy = node(&round_trip(&mut heap, &Value::Node(arr)));
    assert_eq!(
        heap.elements(copy).unwrap(),
        &[Value::Int(1), Value::Node(copy)]
    );
}

#[test]
fn test_deep_linked_list_round_trips() {
    let mut heap = Heap::new();
    let mut head = Value::Null;
    for i in 0..100_000 {
        let id = object(&mut heap, &[("value", Value::Int(i)), ("next", head)]);
        head = Value::Node(id);
    }

    let encoded = serialize(&heap, &head).unwrap();
    assert_eq!(encoded.as_records().unwrap().len(), 100_000);

    let copy = deserialize(&mut heap, &encoded).unwrap();
    assert!(heap.structurally_equal(&head, &heap, &copy));
}

#[test]
fn test_round_trip_output_is_structurally_equal() {
    let mut heap = Heap::new();
    let inner = heap.alloc_array(vec![Value::from("a"), Value::Float(2.5)]);
    let root = object(
        &mut heap,
        &[
            ("list", Value::Node(inner)),
            ("again", Value::Node(inner)),
            ("flag", Value::Bool(false)),
        ],
    );
    heap.set(root, "me", Value::Node(root)).unwrap();

    let copy = round_trip(&mut heap, &Value::Node(root));
    assert!(heap.structurally_equal(&Value::Node(root), &heap, &copy));
}

#[test]
fn test_lost_sharing_is_not_structurally_equal() {
    let mut heap = Heap::new();
    let shared = object(&mut heap, &[]);
    let with_sharing = object(
        &mut heap,
        &[("x", Value::Node(shared)), ("y", Value::Node(shared))],
    );
    let x = object(&mut heap, &[]);
    let y = object(&mut heap, &[]);
    let without = object(&mut heap, &[("x", Value::Node(x)), ("y", Value::Node(y))]);

    assert!(!heap.structurally_equal(
        &Value::Node(with_sharing),
        &heap,
        &Value::Node(without)
    ));
}
