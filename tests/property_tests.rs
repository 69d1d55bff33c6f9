//! Property-based tests for the rendering guarantees
//!
//! These cover the rules that must hold for any input: export never fails,
//! text is quoted or hex-dumped, floats stay visibly floats, and the shortened
//! form stays on one line.

use proptest::prelude::*;
use serde_exporter::{export, shortened_export, Array, Object, Value};

fn is_printable(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .all(|&b| matches!(b, 0x09..=0x0d | 0x20..=0xff))
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<f64>().prop_map(Value::from),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(Value::from),
        "[a-zA-Z0-9 \r\n]{0,24}".prop_map(Value::from),
    ]
}

fn nested() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..4).prop_map(|fields| {
                let obj = Object::new("Node");
                for (name, value) in fields {
                    obj.set_public(name, value);
                }
                Value::Object(obj)
            }),
        ]
    })
}

proptest! {
    #[test]
    fn prop_integers_render_plainly(n in any::<i64>()) {
        prop_assert_eq!(export(&Value::from(n)), n.to_string());
    }

    #[test]
    fn prop_integral_floats_keep_decimal_point(f in (-1e15f64..1e15).prop_map(f64::trunc)) {
        let text = export(&Value::from(f));
        prop_assert!(text.ends_with(".0"));
        prop_assert_eq!(text, format!("{}.0", f));
    }

    #[test]
    fn prop_bytes_are_quoted_or_hex(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let text = export(&Value::from(bytes.clone()));
        if is_printable(&bytes) {
            prop_assert!(text.starts_with('\''));
            prop_assert!(text.ends_with('\''));
            prop_assert!(!text.contains('\r'));
        } else {
            prop_assert!(text.starts_with("Binary String: 0x"));
            prop_assert_eq!(text.len(), "Binary String: 0x".len() + bytes.len() * 2);
        }
    }

    #[test]
    fn prop_shortened_strings_stay_on_one_line(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
        let short = shortened_export(&Value::from(bytes));
        prop_assert!(!short.contains('\n'));
    }

    #[test]
    fn prop_long_ascii_is_cut_to_window(s in "[a-zA-Z0-9 ]{39,200}") {
        let short = shortened_export(&Value::from(s.as_str()));
        prop_assert_eq!(short.chars().count(), 40);
        prop_assert!(short.starts_with('\''));
        prop_assert!(short.ends_with('\''));
        prop_assert!(short.contains("..."));
    }

    #[test]
    fn prop_short_ascii_is_untouched(s in "[a-zA-Z0-9 ]{0,38}") {
        let value = Value::from(s.as_str());
        prop_assert_eq!(shortened_export(&value), export(&value));
    }

    #[test]
    fn prop_export_is_never_empty(value in nested()) {
        prop_assert!(!export(&value).is_empty());
        prop_assert!(!shortened_export(&value).contains('\n'));
    }

    #[test]
    fn prop_export_is_deterministic(value in nested()) {
        prop_assert_eq!(export(&value), export(&value));
    }

    #[test]
    fn prop_self_reference_terminates(value in nested()) {
        let wrapper = Array::new();
        wrapper.push(value);
        wrapper.push(Value::Array(wrapper.clone()));

        let text = export(&Value::Array(wrapper));
        prop_assert!(text.starts_with("Array &1 ("));
        prop_assert!(text.ends_with("    1 => Array &1\n)"));
    }
}
