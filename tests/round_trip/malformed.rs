//! Rejection of malformed input
//!
//! Every case also checks that the heap is left exactly as it was.

use crate::common::*;
use marrow::{Literal, Record, RecordSequence, Slot, Source};

fn reject(heap: &mut Heap, records: Vec<Record>) -> marrow::Error {
    let before = heap.len();
    let err = deserialize(heap, &RecordSequence::from(records).into()).unwrap_err();
    assert_eq!(heap.len(), before, "heap must be rolled back");
    err
}

fn reject_json(heap: &mut Heap, json: &str) -> marrow::Error {
    let before = heap.len();
    let err = from_json(heap, json).unwrap_err();
    assert_eq!(heap.len(), before, "heap must be rolled back");
    err
}

#[test]
fn test_unknown_type_tag() {
    let mut heap = Heap::new();
    let err = reject_json(&mut heap, r#"[{"type":"Bogus","keys":{}}]"#);
    assert!(err.is_malformed());
}

#[test]
fn test_dangling_reference_after_valid_records() {
    let mut heap = Heap::new();
    object(&mut heap, &[]);
    let err = reject(
        &mut heap,
        vec![
            Record::new(RecordType::Array, Source::Elements(vec![Slot::Ref(1)])),
            Record::new(RecordType::Object, Source::None).with_key("x", Slot::Ref(7)),
        ],
    );
    assert!(err.is_malformed());
    assert!(err.to_string().contains('7'));
}

#[test]
fn test_dangling_reference_in_json() {
    let mut heap = Heap::new();
    let err = reject_json(&mut heap, r#"[{"type":"Object","keys":{"x":[1]}}]"#);
    assert!(err.is_malformed());
}

#[test]
fn test_source_that_does_not_fit_type() {
    let mut heap = Heap::new();
    let err = reject(
        &mut heap,
        vec![Record::new(RecordType::Map, Source::Elements(vec![]))],
    );
    assert!(err.is_malformed());
}

#[test]
fn test_bad_regexp_flags() {
    let mut heap = Heap::new();
    let err = reject_json(
        &mut heap,
        r#"[{"type":"RegExp","source":["a","gg"],"keys":{}}]"#,
    );
    assert!(err.is_malformed());
}

#[test]
fn test_prototype_that_is_not_a_node() {
    let mut heap = Heap::new();
    let err = reject(
        &mut heap,
        vec![Record::new(RecordType::Object, Source::None)
            .with_key("__proto__", Literal::String("nope".into()).into())],
    );
    assert!(err.is_malformed());
}

#[test]
fn test_prototype_cycle() {
    let mut heap = Heap::new();
    let err = reject_json(
        &mut heap,
        r#"[{"type":"Object","keys":{"__proto__":[0]}}]"#,
    );
    assert!(err.is_malformed());

    let err = reject_json(
        &mut heap,
        r#"[{"type":"Object","keys":{"__proto__":[1]}},{"type":"Object","keys":{"__proto__":[0]}}]"#,
    );
    assert!(err.is_malformed());
}

#[test]
fn test_empty_sequence() {
    let mut heap = Heap::new();
    let err = reject_json(&mut heap, "[]");
    assert!(err.is_malformed());
}

#[test]
fn test_invalid_json_text() {
    let mut heap = Heap::new();
    let err = reject_json(&mut heap, "[{\"type\":");
    assert!(err.is_malformed());
}

#[test]
fn test_failure_late_in_pass_two_leaves_nothing_behind() {
    let mut heap = Heap::new();
    let keep = object(&mut heap, &[("k", Value::Int(1))]);
    let mut records: Vec<Record> = (0..50)
        .map(|i| {
            Record::new(RecordType::Object, Source::None).with_key("next", Slot::Ref(i + 1))
        })
        .collect();
    // last record points past the end
    records.push(Record::new(RecordType::Object, Source::None).with_key("next", Slot::Ref(99)));

    reject(&mut heap, records);
    assert_eq!(heap.len(), 1);
    assert_eq!(prop(&heap, keep, "k"), Value::Int(1));
}
