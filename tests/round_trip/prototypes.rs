//! Prototype and constructor handling

use crate::common::*;

/// A class-like pair: a constructor node and a prototype pointing back at it.
fn class(heap: &mut Heap, name: &str) -> (NodeId, NodeId) {
    let ctor = object(heap, &[("name", Value::from(name))]);
    let proto = object(heap, &[("greeting", Value::from("hello"))]);
    heap.define(proto, "constructor", Value::Node(ctor), false).unwrap();
    (ctor, proto)
}

#[test]
fn test_custom_prototype_is_preserved() {
    let mut heap = Heap::new();
    let (_, proto) = class(&mut heap, "Greeter");
    let instance = heap.create(Prototype::Node(proto));
    heap.set(instance, "who", Value::from("world")).unwrap();

    let copy = node(&round_trip(&mut heap, &Value::Node(instance)));
    let Prototype::Node(copy_proto) = heap.prototype_of(copy).unwrap() else {
        panic!("expected a node prototype");
    };
    assert_ne!(copy_proto, proto);
    assert_eq!(prop(&heap, copy_proto, "greeting"), Value::from("hello"));
    assert!(heap.structurally_equal(&Value::Node(instance), &heap, &Value::Node(copy)));
}

#[test]
fn test_constructor_comes_back_hidden() {
    let mut heap = Heap::new();
    let (_, proto) = class(&mut heap, "Greeter");
    let instance = heap.create(Prototype::Node(proto));

    let copy = node(&round_trip(&mut heap, &Value::Node(instance)));
    let Prototype::Node(copy_proto) = heap.prototype_of(copy).unwrap() else {
        panic!("expected a node prototype");
    };
    let ctor = heap.get(copy_proto).unwrap().properties["constructor"].clone();
    assert!(!ctor.enumerable);
    assert_eq!(prop(&heap, node(&ctor.value), "name"), Value::from("Greeter"));
    assert_eq!(heap.enumerable_keys(copy_proto).unwrap(), vec!["greeting".to_string()]);
}

#[test]
fn test_instances_share_one_prototype_copy() {
    let mut heap = Heap::new();
    let (_, proto) = class(&mut heap, "Point");
    let p1 = heap.create(Prototype::Node(proto));
    let p2 = heap.create(Prototype::Node(proto));
    let arr = heap.alloc_array(vec![Value::Node(p1), Value::Node(p2)]);

    let copy = node(&round_trip(&mut heap, &Value::Node(arr)));
    let elements = heap.elements(copy).unwrap().to_vec();
    let proto_of = |v: &Value| heap.prototype_of(node(v)).unwrap();
    assert_eq!(proto_of(&elements[0]), proto_of(&elements[1]));
    assert_ne!(proto_of(&elements[0]), Prototype::Node(proto));
}

#[test]
fn test_null_prototype_is_preserved() {
    let mut heap = Heap::new();
    let bare = heap.create(Prototype::Null);
    heap.set(bare, "k", Value::Int(1)).unwrap();

    let copy = node(&json_round_trip(&mut heap, &Value::Node(bare)));
    assert_eq!(heap.prototype_of(copy).unwrap(), Prototype::Null);
    assert_eq!(prop(&heap, copy, "k"), Value::Int(1));
}

#[test]
fn test_builtin_prototype_is_not_recorded() {
    let mut heap = Heap::new();
    let obj = object(&mut heap, &[("a", Value::Int(1))]);
    heap.define(obj, "constructor", Value::Builtin(Builtin::Object), false).unwrap();

    let encoded = serialize(&heap, &Value::Node(obj)).unwrap();
    let root = encoded.as_records().unwrap().root().unwrap();
    assert_eq!(root.keys.keys().collect::<Vec<_>>(), vec!["a"]);

    let copy = node(&deserialize(&mut heap, &encoded).unwrap());
    assert_eq!(
        heap.prototype_of(copy).unwrap(),
        Prototype::Builtin(Builtin::Object)
    );
}

#[test]
fn test_set_with_custom_prototype_keeps_its_kind() {
    let mut heap = Heap::new();
    let proto = object(&mut heap, &[("kind", Value::from("tagged"))]);
    let set = heap.alloc_set(vec![Value::Int(1)]);
    heap.set_prototype(set, Prototype::Node(proto)).unwrap();

    let copy = node(&round_trip(&mut heap, &Value::Node(set)));
    assert!(matches!(heap.kind(copy).unwrap(), NodeKind::Set(_)));
    let Prototype::Node(copy_proto) = heap.prototype_of(copy).unwrap() else {
        panic!("expected a node prototype");
    };
    assert_eq!(prop(&heap, copy_proto, "kind"), Value::from("tagged"));
}

#[test]
fn test_own_proto_property_is_rejected() {
    let mut heap = Heap::new();
    let obj = object(&mut heap, &[("__proto__", Value::Int(1))]);

    let err = serialize(&heap, &Value::Node(obj)).unwrap_err();
    assert!(err.is_unsupported());
}

#[test]
fn test_enumerable_builtin_constructor_is_unsupported() {
    let mut heap = Heap::new();
    let obj = object(
        &mut heap,
        &[("constructor", Value::Builtin(Builtin::Map)), ("a", Value::Int(1))],
    );

    let err = serialize(&heap, &Value::Node(obj)).unwrap_err();
    assert!(err.is_unsupported());
    assert!(to_json(&heap, &Value::Node(obj)).unwrap_err().is_unsupported());
}

#[test]
fn test_enumerable_constructor_comes_back_hidden() {
    let mut heap = Heap::new();
    let ctor = object(&mut heap, &[("name", Value::from("Foo"))]);
    let proto = object(
        &mut heap,
        &[("constructor", Value::Node(ctor)), ("greet", Value::from("hi"))],
    );
    let instance = heap.create(Prototype::Node(proto));

    let copy = node(&round_trip(&mut heap, &Value::Node(instance)));
    let Prototype::Node(copy_proto) = heap.prototype_of(copy).unwrap() else {
        panic!("expected a node prototype");
    };
    // the record format carries no enumerable bit for `constructor`
    assert_eq!(
        heap.enumerable_keys(proto).unwrap(),
        vec!["constructor".to_string(), "greet".to_string()]
    );
    assert_eq!(heap.enumerable_keys(copy_proto).unwrap(), vec!["greet".to_string()]);
    let copy_ctor = prop(&heap, copy_proto, "constructor");
    assert_eq!(prop(&heap, node(&copy_ctor), "name"), Value::from("Foo"));
    assert!(!heap.structurally_equal(&Value::Node(instance), &heap, &Value::Node(copy)));
}
