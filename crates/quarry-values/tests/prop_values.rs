//! Property-based tests for the value model.
//!
//! Uses `proptest` to generate random value trees and verify the invariants
//! the evaluator depends on:
//!
//! - hashing and comparison are independent of entry insertion order
//! - the total order is symmetric across every pair of kinds
//! - clones are deep: mutating a clone never disturbs the original
//! - container canonical text is valid JSON and agrees with `to_json`
//! - `set_in` followed by `get_in` over the same path returns the value
//!
//! Floats are generated from an integer mantissa with limited decimal
//! places; full-range floats are exercised separately in value_tests.rs.

use proptest::prelude::*;
use quarry_values::{Object, Segment, Value};

// ============================================================================
// Strategies
// ============================================================================

/// Object key: non-empty, limited alphabet and length.
fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_]{0,11}").unwrap()
}

/// Simple float built from mantissa / 10^n so display and serialization are
/// exact.
fn arb_float() -> impl Strategy<Value = f64> {
    (-1_000_000i64..1_000_000i64, 1u32..4u32)
        .prop_map(|(mantissa, decimals)| mantissa as f64 / 10f64.powi(decimals as i32))
}

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::None),
        any::<bool>().prop_map(Value::Boolean),
        (-1_000_000i64..1_000_000i64).prop_map(Value::Int),
        arb_float().prop_map(Value::Float),
        "[a-zA-Z0-9 _.-]{0,16}".prop_map(Value::from),
    ]
}

/// A value tree up to `depth` container levels deep.
fn arb_value(depth: u32) -> BoxedStrategy<Value> {
    if depth == 0 {
        arb_scalar().boxed()
    } else {
        prop_oneof![
            4 => arb_scalar(),
            2 => prop::collection::vec(arb_value(depth - 1), 0..4).prop_map(Value::from),
            2 => arb_entries(depth - 1).prop_map(|entries| {
                Value::Object(entries.into_iter().collect())
            }),
        ]
        .boxed()
    }
}

fn arb_entries(depth: u32) -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::vec((arb_key(), arb_value(depth)), 0..5)
}

fn object_from(entries: &[(String, Value)]) -> Object {
    entries
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Keep the last occurrence of each key, so reversing the entry list feeds
/// the same key/value set through a different insertion order.
fn dedup_entries(entries: Vec<(String, Value)>) -> Vec<(String, Value)> {
    let mut unique = std::collections::BTreeMap::new();
    for (key, value) in entries {
        unique.insert(key, value);
    }
    unique.into_iter().collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(400))]

    /// Two objects built from the same entries in opposite insertion order
    /// serialize, hash, and compare identically.
    #[test]
    fn insertion_order_never_changes_identity(raw in arb_entries(2)) {
        let entries = dedup_entries(raw);
        let forward = object_from(&entries);
        let reversed: Vec<(String, Value)> =
            entries.iter().rev().map(|(k, v)| (k.clone(), v.clone())).collect();
        let backward = object_from(&reversed);

        prop_assert_eq!(forward.to_string(), backward.to_string());
        prop_assert_eq!(forward.digest(), backward.digest());
        prop_assert_eq!(&forward, &backward);
    }

    /// The total order is symmetric: cmp(a, b) is the reverse of cmp(b, a).
    #[test]
    fn comparison_is_antisymmetric(a in arb_value(2), b in arb_value(2)) {
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
    }

    /// Every value equals itself and hashes equal to itself.
    #[test]
    fn comparison_is_reflexive(a in arb_value(2)) {
        prop_assert_eq!(a.cmp(&a), std::cmp::Ordering::Equal);
        prop_assert_eq!(a.digest(), a.digest());
    }

    /// Equal values digest equal (the partitioning direction DISTINCT
    /// relies on).
    #[test]
    fn equal_values_digest_equal(a in arb_value(2)) {
        let b = a.clone();
        prop_assert_eq!(a.cmp(&b), std::cmp::Ordering::Equal);
        prop_assert_eq!(a.digest(), b.digest());
    }

    /// Mutating a clone never disturbs the original, at any depth.
    #[test]
    fn clones_are_independent(entries in arb_entries(2)) {
        let original = object_from(&entries);
        let before = original.digest();

        let mut copy = original.clone();
        copy.set("__mutation", 1i64);
        prop_assert_eq!(original.digest(), before);

        let mut deep_copy = original.clone();
        let keys: Vec<String> = deep_copy.keys().map(str::to_string).collect();
        for key in keys {
            if let Some(Value::Object(nested)) = deep_copy.get_mut(&key) {
                nested.set("__mutation", 1i64);
            }
        }
        prop_assert_eq!(original.digest(), before);
    }

    /// Container canonical text is parseable JSON that matches `to_json`.
    #[test]
    fn container_text_agrees_with_to_json(entries in arb_entries(2)) {
        let object = object_from(&entries);
        let parsed: serde_json::Value = serde_json::from_str(&object.to_string())
            .expect("canonical text must be valid JSON");
        prop_assert_eq!(parsed, object.to_json());
    }

    /// Sorting any batch of values yields a consistently ordered sequence.
    #[test]
    fn sorted_values_are_pairwise_ordered(mut values in prop::collection::vec(arb_value(1), 0..8)) {
        values.sort();
        for pair in values.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
        }
    }

    /// Writing through a fresh key path and reading it back returns the
    /// stored value.
    #[test]
    fn set_in_then_get_in_roundtrips(
        keys in prop::collection::vec(arb_key(), 1..4),
        stored in arb_scalar(),
    ) {
        let mut root = Value::Object(Object::new());
        let path: Vec<Segment> = keys.iter().map(|k| Segment::from(k.as_str())).collect();

        root.set_in(&path, stored.clone()).unwrap();
        let found = root.get_in(&path).unwrap();
        prop_assert_eq!(found, &stored);
    }
}
