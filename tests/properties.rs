//! Property-based tests for path tokenizing and evaluation.

use jsoncmd as jc;
use jc::jsonpath::tokenize;
use proptest::prelude::*;
use serde_json::{json, Value};

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-c]{1,2}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    /// canonical(canonical(v)) == canonical(v)
    #[test]
    fn prop_canonical_idempotent(v in arb_json()) {
        let once = jc::canonical(&v);
        prop_assert_eq!(jc::canonical(&Value::String(once.clone())), once);
    }

    /// A well-formed bracket run is never split, whatever it contains.
    #[test]
    fn prop_bracket_run_stays_whole(
        head in "[a-z]{1,5}",
        inner in "[a-z.=\"' ?]{0,10}",
        tail in "[a-z]{1,5}",
    ) {
        let path = format!("{head}[{inner}].{tail}");
        let bracketed = format!("{head}[{inner}]");
        prop_assert_eq!(tokenize(&path), vec![bracketed.as_str(), tail.as_str()]);
    }

    /// Joining plain keys with dots and tokenizing gives the keys back.
    #[test]
    fn prop_plain_keys_round_trip(keys in prop::collection::vec("[a-z_]{1,6}", 1..6)) {
        let path = keys.join(".");
        let expected: Vec<&str> = keys.iter().map(String::as_str).collect();
        prop_assert_eq!(tokenize(&path), expected);
    }

    /// Evaluation never panics and always yields at least one value.
    #[test]
    fn prop_resolution_set_non_empty(doc in arb_json(), path in "[a-c*\\[\\]?=\"0-9.]{0,16}") {
        let set = jc::query(&doc, &path);
        prop_assert!(set.len() >= 1);
        prop_assert!(set.iter().next().is_some());
    }

    /// Wildcard over an array returns exactly its elements.
    #[test]
    fn prop_wildcard_on_array(items in prop::collection::vec(any::<i64>(), 2..8)) {
        let doc = json!({ "xs": items.clone() });
        let expected: Vec<Value> = items.into_iter().map(Value::from).collect();
        prop_assert_eq!(jc::get_json_value(&doc, "xs.*"), Value::Array(expected));
    }
}
