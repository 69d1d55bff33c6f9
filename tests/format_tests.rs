//! Exact layout of the full export: indentation, key rendering, headers and
//! back-references.

use serde_exporter::{export, value, Array, Exporter, Object, Value};

fn lines(parts: &[&str]) -> String {
    parts.join("\n")
}

#[test]
fn test_empty_composites() {
    assert_eq!(export(&Value::Array(Array::new())), "Array &1 ()");
    assert_eq!(export(&Value::Object(Object::new("Empty"))), "Empty Object &1 ()");
}

#[test]
fn test_three_levels_of_indentation() {
    let value = value!({ "a": { "b": { "c": 1 } } });

    let expected = lines(&[
        "Array &1 (",
        "    'a' => Array &2 (",
        "        'b' => Array &3 (",
        "            'c' => 1",
        "        )",
        "    )",
        ")",
    ]);
    assert_eq!(export(&value), expected);
}

#[test]
fn test_empty_child_stays_on_its_line() {
    let value = value!({ "items": [], "next": null });
    assert_eq!(
        export(&value),
        lines(&["Array &1 (", "    'items' => Array &2 ()", "    'next' => null", ")"])
    );
}

#[test]
fn test_multiline_string_value_is_not_indented() {
    let value = value!({ "text": "first\r\nsecond\rthird" });
    assert_eq!(
        export(&value),
        lines(&["Array &1 (", "    'text' => 'first", "second", "third'", ")"])
    );
}

#[test]
fn test_line_ending_normalization_is_sequential() {
    assert_eq!(export(&Value::from("a\r\n\rb")), "'a\nb'");
    assert_eq!(export(&Value::from("a\n\r\nb")), "'a\n\nb'");
    assert_eq!(export(&Value::from("\r\r")), "'\n\n'");
}

#[test]
fn test_quotes_and_backslashes_are_left_alone() {
    assert_eq!(export(&Value::from("it's")), "'it's'");
    assert_eq!(export(&Value::from("C:\\dir")), "'C:\\dir'");
}

#[test]
fn test_binary_takes_priority_over_quoting() {
    assert_eq!(export(&Value::from(&b"\x00"[..])), "Binary String: 0x00");
    assert_eq!(export(&Value::from(&b"ok\x1b"[..])), "Binary String: 0x6f6b1b");
    assert_eq!(export(&Value::from(&b"\t\x0b\x0c"[..])), "'\t\x0b\x0c'");
}

#[test]
fn test_back_reference_inside_object() {
    let shared = Array::new();
    shared.push(Value::from(1));

    let holder = Object::new("Holder");
    holder.set_public("first", Value::Array(shared.clone()));
    holder.set_protected("second", Value::Array(shared));

    assert_eq!(
        export(&Value::Object(holder)),
        lines(&[
            "Holder Object &1 (",
            "    'first' => Array &2 (",
            "        0 => 1",
            "    )",
            "    'second' => Array &2",
            ")",
        ])
    );
}

#[test]
fn test_export_at_offsets_every_following_line() {
    let value = value!({ "k": [true] });
    let text = Exporter::default().export_at(&value, 2);

    assert_eq!(
        text,
        lines(&[
            "Array &1 (",
            "            'k' => Array &2 (",
            "                0 => true",
            "            )",
            "        )",
        ])
    );
}

#[test]
fn test_object_inside_array_inside_object() {
    let inner = Object::new("Leaf");
    inner.set_public("v", Value::from(0.5));

    let outer = Object::new("Tree");
    outer.set_public("leaves", Value::from(vec![Value::Object(inner)]));

    assert_eq!(
        export(&Value::Object(outer)),
        lines(&[
            "Tree Object &1 (",
            "    'leaves' => Array &2 (",
            "        0 => Leaf Object &3 (",
            "            'v' => 0.5",
            "        )",
            "    )",
            ")",
        ])
    );
}

#[test]
fn test_numbering_restarts_between_calls() {
    let value = value!([[1], [2]]);
    let first = export(&value);
    let second = export(&value);

    assert_eq!(first, second);
    assert!(first.contains("Array &3 ("));
    assert!(!first.contains("Array &4"));
}
