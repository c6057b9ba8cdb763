//! Array container tests.

use quarry_values::{Array, Object, PathError, Value};
use std::cmp::Ordering;

fn numbers(values: impl IntoIterator<Item = i64>) -> Array {
    Array::with_values(values.into_iter().map(Value::Int))
}

#[test]
fn new_array_is_empty() {
    let array = Array::new();
    assert_eq!(array.len(), 0);
    assert!(array.is_empty());
}

#[test]
fn get_and_set_in_range() {
    let mut array = numbers([1, 2, 3]);
    assert_eq!(array.get(1), Some(&Value::Int(2)));
    array.set(1, "replaced").unwrap();
    assert_eq!(array.get(1), Some(&Value::from("replaced")));
    assert_eq!(array.len(), 3);
}

#[test]
fn set_past_the_end_fails_without_growing() {
    let mut array = numbers([1]);
    let err = array.set(3, Value::Int(9)).unwrap_err();
    assert_eq!(err, PathError::IndexOutOfBounds { index: 3, length: 1 });
    assert_eq!(array.len(), 1);
}

#[test]
fn push_appends() {
    let mut array = numbers([1]);
    array.push(2i64);
    assert_eq!(array.len(), 2);
    assert_eq!(array.get(1), Some(&Value::Int(2)));
}

#[test]
fn for_each_visits_in_order_and_stops_on_false() {
    let array = numbers([10, 20, 30]);

    let mut seen = Vec::new();
    array.for_each(|value, index| {
        seen.push((index, value.clone()));
        true
    });
    assert_eq!(
        seen,
        vec![
            (0, Value::Int(10)),
            (1, Value::Int(20)),
            (2, Value::Int(30)),
        ]
    );

    let mut visited = 0;
    array.for_each(|_, _| {
        visited += 1;
        false
    });
    assert_eq!(visited, 1);
}

#[test]
fn comparison_is_elementwise_then_by_length() {
    assert_eq!(numbers([1, 2]).cmp(&numbers([1, 2])), Ordering::Equal);
    assert_eq!(numbers([1, 2]).cmp(&numbers([1, 3])), Ordering::Less);
    assert_eq!(numbers([1, 2]).cmp(&numbers([1, 2, 0])), Ordering::Less);
    assert_eq!(numbers([2]).cmp(&numbers([1, 9, 9])), Ordering::Greater);
}

#[test]
fn order_matters_for_equality_and_digest() {
    let forward = numbers([1, 2]);
    let reverse = numbers([2, 1]);
    assert_ne!(forward, reverse);
    assert_ne!(forward.digest(), reverse.digest());
}

#[test]
fn display_is_canonical_json() {
    assert_eq!(Array::new().to_string(), "[]");
    assert_eq!(numbers([1, 2, 3]).to_string(), "[1,2,3]");
}

#[test]
fn clone_is_deep_through_nested_objects() {
    let mut inner = Object::new();
    inner.set("n", 1i64);
    let original = Array::with_values([Value::Object(inner)]);
    let before = original.digest();

    let mut copy = original.clone();
    match copy.get_mut(0) {
        Some(Value::Object(object)) => object.set("n", 2i64),
        other => panic!("expected nested object, got {other:?}"),
    }

    assert_eq!(original.digest(), before);
    assert_ne!(copy, original);
}

#[test]
fn get_in_rooted_at_array() {
    let array = Array::with_values([Value::from(vec![Value::Int(7)])]);
    let seven = array.get_in(&[0usize.into(), 0usize.into()]).unwrap();
    assert_eq!(seven.as_ref(), &Value::Int(7));

    let err = array.get_in(&["key".into()]).unwrap_err();
    assert!(matches!(err, PathError::TypeMismatch { .. }));

    let root = array.get_in(&[]).unwrap();
    assert_eq!(root.as_ref(), &Value::Array(array.clone()));
}

#[test]
fn set_in_rooted_at_array_appends_and_vivifies() {
    let mut array = numbers([1]);

    // Index one past the end appends.
    array.set_in(&[1usize.into()], Value::Int(2)).unwrap();
    assert_eq!(array.get(1), Some(&Value::Int(2)));

    // A missing intermediate keyed by the next segment: object for keys.
    array
        .set_in(&[2usize.into(), "name".into()], Value::from("ada"))
        .unwrap();
    let name = array.get_in(&[2usize.into(), "name".into()]).unwrap();
    assert_eq!(name.as_ref(), &Value::from("ada"));

    // A gap beyond the append position fails.
    let err = array.set_in(&[9usize.into()], Value::Int(0)).unwrap_err();
    assert_eq!(err, PathError::IndexOutOfBounds { index: 9, length: 3 });
}
