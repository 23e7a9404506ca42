//! Property-based tests for the round-trip and formatting guarantees.
//!
//! Values are generated as arbitrary finite trees; the serde tests cover typed data.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_colson::{
    from_str, outline, parse, serialize, to_string, Map, SerializeOptions, Value,
};

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: &T,
) -> bool {
    match to_string(value) {
        Ok(serialized) => match from_str::<T>(&serialized) {
            Ok(deserialized) => *value == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

fn finite_float() -> impl Strategy<Value = f64> {
    prop_oneof![
        any::<f64>().prop_filter("finite", |f| f.is_finite()),
        Just(0.0),
        Just(-0.0),
        (-1_000_000i64..1_000_000).prop_map(|n| n as f64 / 8.0),
    ]
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        finite_float().prop_map(Value::Float),
        any::<String>().prop_map(Value::Str),
    ]
}

fn value_tree() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((any::<String>(), inner), 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map>())),
        ]
    })
}

fn options() -> impl Strategy<Value = SerializeOptions> {
    (
        proptest::option::of(0usize..5),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(indent, sort_keys, escape_non_ascii)| SerializeOptions {
            indent,
            sort_keys,
            escape_non_ascii,
            ..SerializeOptions::default()
        })
}

/// Text the outline dialect can hold next to any key: no line breaks and no `::`.
fn outline_string() -> impl Strategy<Value = String> {
    "[^\r\n]{0,12}".prop_filter("separator", |s| !s.contains("::"))
}

fn outline_key() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_ .-]{0,8}[A-Za-z0-9_]"
}

fn outline_tree() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        finite_float().prop_map(Value::Float),
        outline_string().prop_map(Value::Str),
    ];
    leaf.prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::vec((outline_key(), inner), 0..5)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map>())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_value_round_trip(value in value_tree()) {
        let text = serialize(&value, &SerializeOptions::new()).unwrap();
        prop_assert_eq!(parse(&text).unwrap(), value);
    }

    #[test]
    fn prop_round_trip_any_options(value in value_tree(), options in options()) {
        let text = serialize(&value, &options).unwrap();
        prop_assert_eq!(parse(&text).unwrap(), value);
    }

    #[test]
    fn prop_formatting_idempotent(value in value_tree(), options in options()) {
        let first = serialize(&value, &options).unwrap();
        let second = serialize(&parse(&first).unwrap(), &options).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_number_kinds_survive(n in any::<i64>(), f in finite_float()) {
        let int_text = serialize(&Value::Int(n), &SerializeOptions::new()).unwrap();
        prop_assert!(!int_text.contains(['.', 'e', 'E']));
        prop_assert_eq!(parse(&int_text).unwrap(), Value::Int(n));

        let float_text = serialize(&Value::Float(f), &SerializeOptions::new()).unwrap();
        prop_assert!(float_text.contains(['.', 'e', 'E']));
        prop_assert_eq!(parse(&float_text).unwrap(), Value::Float(f));
    }

    #[test]
    fn prop_parse_never_panics(input in "\\PC{0,64}") {
        let _ = parse(&input);
    }

    #[test]
    fn prop_outline_round_trip(value in outline_tree()) {
        let text = outline::to_string(&value).unwrap();
        prop_assert_eq!(outline::from_str(&text).unwrap(), value);
    }

    #[test]
    fn prop_i64(n in any::<i64>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_u32(n in any::<u32>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_string(s in any::<String>()) {
        prop_assert!(roundtrip(&s));
    }

    #[test]
    fn prop_vec_f64(v in prop::collection::vec(finite_float(), 0..20)) {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_option_i32(opt in proptest::option::of(any::<i32>())) {
        prop_assert!(roundtrip(&opt));
    }

    #[test]
    fn prop_tuple_i32_bool(t in (any::<i32>(), any::<bool>())) {
        prop_assert!(roundtrip(&t));
    }
}
