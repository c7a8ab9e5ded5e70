//! Generated JSON-like trees

use crate::common::*;
use proptest::prelude::*;

/// Shape of a JSON-like value, built onto a heap by [`build`].
#[derive(Debug, Clone)]
enum Tree {
    Leaf(Value),
    Array(Vec<Tree>),
    Object(Vec<(String, Tree)>),
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(Value::Undefined),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<f64>().prop_map(Value::Float),
        "[a-z0-9 ]{0,12}".prop_map(Value::String),
    ]
}

fn tree() -> impl Strategy<Value = Tree> {
    leaf().prop_map(Tree::Leaf).prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Tree::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..8)
                .prop_map(|props| Tree::Object(props.into_iter().collect())),
        ]
    })
}

fn build(heap: &mut Heap, tree: &Tree) -> Value {
    match tree {
        Tree::Leaf(v) => v.clone(),
        Tree::Array(items) => {
            let values = items.iter().map(|t| build(heap, t)).collect();
            Value::Node(heap.alloc_array(values))
        }
        Tree::Object(props) => {
            let id = heap.alloc_object();
            for (key, t) in props {
                let value = build(heap, t);
                heap.set(id, key.as_str(), value).unwrap();
            }
            Value::Node(id)
        }
    }
}

fn count_nodes(tree: &Tree) -> usize {
    match tree {
        Tree::Leaf(_) => 0,
        Tree::Array(items) => 1 + items.iter().map(count_nodes).sum::<usize>(),
        Tree::Object(props) => 1 + props.iter().map(|(_, t)| count_nodes(t)).sum::<usize>(),
    }
}

proptest! {
    #[test]
    fn test_acyclic_trees_round_trip(t in tree()) {
        let mut heap = Heap::new();
        let original = build(&mut heap, &t);
        let copy = round_trip(&mut heap, &original);
        prop_assert!(heap.structurally_equal(&original, &heap, &copy));
    }

    #[test]
    fn test_acyclic_trees_round_trip_through_json(t in tree()) {
        let mut heap = Heap::new();
        let original = build(&mut heap, &t);
        let copy = json_round_trip(&mut heap, &original);
        prop_assert!(heap.structurally_equal(&original, &heap, &copy));
    }

    #[test]
    fn test_one_record_per_node(t in tree()) {
        let mut heap = Heap::new();
        let original = build(&mut heap, &t);
        let encoded = serialize(&heap, &original).unwrap();
        match encoded {
            Encoded::Inline(_) => prop_assert_eq!(count_nodes(&t), 0),
            Encoded::Records(records) => prop_assert_eq!(records.len(), count_nodes(&t)),
        }
    }

    #[test]
    fn test_references_stay_in_range(t in tree()) {
        let mut heap = Heap::new();
        let original = build(&mut heap, &t);
        if let Encoded::Records(records) = serialize(&heap, &original).unwrap() {
            let len = records.len();
            prop_assert!(records.references().all(|i| i < len));
        }
    }
}
