//! Rendering values to diagnostic text.
//!
//! This module provides the [`Exporter`], which walks a [`Value`] depth-first
//! and produces a deterministic, human-readable description of it.
//!
//! ## Overview
//!
//! - **Scalars** render as literals: `null`, `true`, `42`, `1.0`, `'text'`
//! - **Byte strings** outside the printable range render as `Binary String: 0x..`
//! - **Arrays and objects** render one entry per line, labelled with a
//!   reference number (`Array &1 (`, `Point Object &2 (`)
//! - **Repeated composites** render as a back-reference (`Array &1`) instead of
//!   being expanded again, which is what makes cyclic values terminate
//!
//! ## Usage
//!
//! ```rust
//! use serde_exporter::{export, shortened_export, Array, Value};
//!
//! let list = Array::new();
//! list.push(Value::from("a"));
//! list.push(Value::from(1.0));
//! let value = Value::Array(list);
//!
//! assert_eq!(export(&value), "Array &1 (\n    0 => 'a'\n    1 => 1.0\n)");
//! assert_eq!(shortened_export(&value), "Array (...)");
//! ```
//!
//! Each call to [`Exporter::export`] starts a fresh [`IdentityRegistry`], so
//! reference numbers always start at 1 and never leak between calls. Use
//! [`Exporter::export_nested`] to render a sub-value as part of a walk that is
//! already in progress.

use crate::{
    Array, Attachment, ExportMap, ExportOptions, IdentityRegistry, Key, Number, Object, Property,
    Value, Visibility, GC_DATA_KEY,
};
use std::borrow::Cow;
use tracing::{debug, trace};

/// The value exporter.
///
/// Created with [`Exporter::new`] or [`Exporter::default`]; holds only its
/// options, so one exporter can be reused for any number of calls.
#[derive(Clone, Debug, Default)]
pub struct Exporter {
    options: ExportOptions,
}

impl Exporter {
    pub fn new(options: ExportOptions) -> Self {
        Exporter { options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Renders `value` at indentation level 0.
    #[must_use]
    pub fn export(&self, value: &Value) -> String {
        self.export_at(value, 0)
    }

    /// Renders `value` as if it were nested `indentation` levels deep.
    ///
    /// Only lines after the first are indented; the caller decides where the
    /// first line starts.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_exporter::{Exporter, Value};
    ///
    /// let value = Value::from(vec![Value::from(true)]);
    /// let text = Exporter::default().export_at(&value, 1);
    /// assert_eq!(text, "Array &1 (\n        0 => true\n    )");
    /// ```
    #[must_use]
    pub fn export_at(&self, value: &Value, indentation: usize) -> String {
        let mut registry = IdentityRegistry::new();
        self.export_nested(value, indentation, &mut registry)
    }

    /// Renders `value` using a registry shared with an enclosing walk.
    ///
    /// Composites the registry already knows render as back-references.
    #[must_use]
    pub fn export_nested(
        &self,
        value: &Value,
        indentation: usize,
        registry: &mut IdentityRegistry,
    ) -> String {
        let mut output = String::with_capacity(64);
        self.write_value(&mut output, value, indentation, registry);
        output
    }

    /// Renders `value` on a single line.
    ///
    /// Strings are cut to the configured window and have their newlines shown
    /// as `\n`. Arrays and objects are never expanded: they render as
    /// `Array (...)` / `Class Object (...)`, or with empty parentheses when
    /// they have no entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_exporter::{Exporter, Object, Value};
    ///
    /// let exporter = Exporter::default();
    /// assert_eq!(exporter.shortened_export(&Value::from("a\nb")), "'a\\nb'");
    /// assert_eq!(exporter.shortened_export(&Value::Object(Object::new("Empty"))), "Empty Object ()");
    /// ```
    #[must_use]
    pub fn shortened_export(&self, value: &Value) -> String {
        match value {
            Value::String(_) => {
                let full = self.export(value);
                shorten(&full, &self.options).replace('\n', "\\n")
            }
            Value::Object(object) => format!(
                "{} Object ({})",
                object.class_name(),
                marker(!to_array(value).is_empty())
            ),
            Value::Array(array) => format!("Array ({})", marker(!array.is_empty())),
            _ => self.export(value),
        }
    }

    /// Renders the values of `array` as a comma-separated single line, the
    /// way argument lists are usually shown.
    ///
    /// Nested arrays are summarised recursively as `array(..)`; a nested array
    /// that was already visited renders as `*RECURSION*`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_exporter::{Exporter, Array, Value};
    ///
    /// let args = Array::new();
    /// args.push(Value::from("id"));
    /// args.push(Value::from(vec![Value::from(1), Value::Null]));
    /// args.push(Value::Array(args.clone()));
    ///
    /// assert_eq!(
    ///     Exporter::default().shortened_recursive_export(&args),
    ///     "'id', array(1, null), *RECURSION*"
    /// );
    /// ```
    #[must_use]
    pub fn shortened_recursive_export(&self, array: &Array) -> String {
        let mut registry = IdentityRegistry::new();
        self.shortened_recursive(array, &mut registry)
    }

    fn shortened_recursive(&self, array: &Array, registry: &mut IdentityRegistry) -> String {
        registry.add(array);

        let entries = array.entries();
        let mut parts = Vec::with_capacity(entries.len());
        for value in entries.values() {
            match value {
                Value::Array(inner) if registry.contains(inner).is_some() => {
                    parts.push("*RECURSION*".to_string());
                }
                Value::Array(inner) => {
                    parts.push(format!("array({})", self.shortened_recursive(inner, registry)));
                }
                other => parts.push(self.shortened_export(other)),
            }
        }
        parts.join(", ")
    }

    fn write_value(
        &self,
        output: &mut String,
        value: &Value,
        indentation: usize,
        registry: &mut IdentityRegistry,
    ) {
        match value {
            Value::Null => output.push_str("null"),
            Value::Bool(b) => output.push_str(if *b { "true" } else { "false" }),
            Value::Number(Number::Float(f)) if f.is_finite() && f.trunc() == *f => {
                // Integral floats keep a visible decimal point.
                output.push_str(&format!("{}.0", f));
            }
            Value::Number(n) => output.push_str(&n.to_string()),
            Value::Resource(resource) => output.push_str(&format!(
                "resource({}) of type ({})",
                resource.id, resource.kind
            )),
            Value::String(bytes) => write_string(output, bytes),
            Value::Array(array) => self.write_array(output, array, indentation, registry),
            Value::Object(object) => self.write_object(output, object, indentation, registry),
            Value::Date(dt) => {
                debug!("rendering date through fallback formatting");
                output.push_str(&format!("{:?}", dt));
            }
            Value::BigInt(bi) => {
                debug!("rendering bigint through fallback formatting");
                output.push_str(&format!("{:?}", bi));
            }
        }
    }

    fn write_array(
        &self,
        output: &mut String,
        array: &Array,
        indentation: usize,
        registry: &mut IdentityRegistry,
    ) {
        if let Some(id) = registry.contains(array) {
            trace!(id, "array already rendered, emitting back-reference");
            output.push_str(&format!("Array &{}", id));
            return;
        }

        let id = registry.add(array);
        let header = format!("Array &{}", id);
        match array.try_entries() {
            Some(entries) => self.write_entries(output, &header, &entries, indentation, registry),
            None => {
                debug!(id, "array is mutably borrowed, rendering it unexpanded");
                output.push_str(&header);
            }
        }
    }

    fn write_object(
        &self,
        output: &mut String,
        object: &Object,
        indentation: usize,
        registry: &mut IdentityRegistry,
    ) {
        let class = object.class_name();
        if let Some(id) = registry.contains(object) {
            trace!(id, class = %class, "object already rendered, emitting back-reference");
            output.push_str(&format!("{} Object &{}", class, id));
            return;
        }

        let id = registry.add(object);
        let header = format!("{} Object &{}", class, id);
        if !object.is_borrowable() {
            debug!(id, class = %class, "object is mutably borrowed, rendering it unexpanded");
            output.push_str(&header);
            return;
        }

        let entries = flatten_object(object);
        self.write_entries(output, &header, &entries, indentation, registry);
    }

    fn write_entries(
        &self,
        output: &mut String,
        header: &str,
        entries: &ExportMap,
        indentation: usize,
        registry: &mut IdentityRegistry,
    ) {
        output.push_str(header);
        if entries.is_empty() {
            output.push_str(" ()");
            return;
        }

        let whitespace = " ".repeat(indentation * self.options.indent);
        let unit = " ".repeat(self.options.indent);

        output.push_str(" (\n");
        for (key, value) in entries {
            output.push_str(&whitespace);
            output.push_str(&unit);
            write_key(output, key);
            output.push_str(" => ");
            self.write_value(output, value, indentation + 1, registry);
            output.push('\n');
        }
        output.push_str(&whitespace);
        output.push(')');
    }
}

/// Flattens a value into an ordered key/value mapping.
///
/// - Arrays yield their own entries.
/// - Objects yield one entry per property, keyed by bare property name
///   whatever its visibility. The garbage-collector bookkeeping key
///   ([`GC_DATA_KEY`]) is never included.
/// - Objects with the enumeration capability ignore their properties and
///   yield one entry per attached object, keyed by its identity token, whose
///   value is a fresh array `['obj' => object, 'inf' => info]`.
/// - Every other value yields an empty mapping.
///
/// # Examples
///
/// ```rust
/// use serde_exporter::{to_array, Key, Object, Value};
///
/// let obj = Object::new("T");
/// obj.set_private("T", "x", Value::from(1));
///
/// let map = to_array(&Value::Object(obj));
/// assert_eq!(map.get(&Key::from("x")), Some(&Value::from(1)));
/// ```
#[must_use]
pub fn to_array(value: &Value) -> ExportMap {
    match value {
        Value::Array(array) => array.entries(),
        Value::Object(object) => flatten_object(object),
        _ => ExportMap::new(),
    }
}

fn flatten_object(object: &Object) -> ExportMap {
    if let Some(attachments) = object.attachments() {
        return attachments
            .into_iter()
            .map(|Attachment { object, info }| {
                let token = object.identity_token();
                let pair: ExportMap = [
                    (Key::from("obj"), Value::Object(object)),
                    (Key::from("inf"), info),
                ]
                .into_iter()
                .collect();
                (Key::Str(token), Value::from(pair))
            })
            .collect();
    }

    let properties = object.properties();
    let mut map = ExportMap::with_capacity(properties.len());
    for property in properties {
        if property.storage_key() == GC_DATA_KEY {
            continue;
        }
        // Public names may still carry a host's mangled key.
        let bare = match property.visibility {
            Visibility::Public => Property::from_storage_key(&property.name, property.value),
            _ => property,
        };
        map.insert(Key::Str(bare.name), bare.value);
    }
    map
}

#[inline]
fn is_binary(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .any(|&b| !matches!(b, 0x09..=0x0d | 0x20..=0xff))
}

fn write_string(output: &mut String, bytes: &[u8]) {
    if is_binary(bytes) {
        output.push_str("Binary String: 0x");
        for byte in bytes {
            output.push_str(&format!("{:02x}", byte));
        }
        return;
    }

    // Bytes that are not valid UTF-8 are read one character per byte.
    let decoded = match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect::<String>()),
    };

    // Applied in sequence, so "\r\n\r" collapses to a single "\n".
    let text = decoded
        .replace("\r\n", "\n")
        .replace("\n\r", "\n")
        .replace('\r', "\n");

    output.push('\'');
    output.push_str(&text);
    output.push('\'');
}

fn write_key(output: &mut String, key: &Key) {
    match key {
        Key::Int(i) => output.push_str(&i.to_string()),
        Key::Str(s) => write_string(output, s.as_bytes()),
    }
}

fn shorten(text: &str, options: &ExportOptions) -> String {
    let count = text.chars().count();
    if count <= options.max_string_length {
        return text.to_string();
    }

    // Head and tail shrink to fit within the limit.
    let budget = options.max_string_length.saturating_sub(3);
    let keep_head = options.keep_head.min(budget);
    let keep_tail = options.keep_tail.min(budget - keep_head);

    let head: String = text.chars().take(keep_head).collect();
    let tail: String = text.chars().skip(count - keep_tail).collect();
    format!("{}...{}", head, tail)
}

#[inline]
fn marker(non_empty: bool) -> &'static str {
    if non_empty {
        "..."
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Resource;

    fn export(value: &Value) -> String {
        Exporter::default().export(value)
    }

    #[test]
    fn test_scalar_literals() {
        assert_eq!(export(&Value::Null), "null");
        assert_eq!(export(&Value::from(true)), "true");
        assert_eq!(export(&Value::from(false)), "false");
        assert_eq!(export(&Value::from(-17)), "-17");
    }

    #[test]
    fn test_float_formatting() {
        assert_eq!(export(&Value::from(1.0)), "1.0");
        assert_eq!(export(&Value::from(-2.0)), "-2.0");
        assert_eq!(export(&Value::from(1.5)), "1.5");
        assert_eq!(export(&Value::from(-0.0)), "-0.0");
        assert_eq!(export(&Value::from(f64::NAN)), "NaN");
        assert_eq!(export(&Value::from(f64::INFINITY)), "inf");
    }

    #[test]
    fn test_resource() {
        let value = Value::from(Resource::new(5, "stream"));
        assert_eq!(export(&value), "resource(5) of type (stream)");
    }

    #[test]
    fn test_line_endings_are_normalized() {
        assert_eq!(export(&Value::from("a\r\nb")), "'a\nb'");
        assert_eq!(export(&Value::from("a\n\rb")), "'a\nb'");
        assert_eq!(export(&Value::from("a\rb")), "'a\nb'");
        assert_eq!(export(&Value::from("a\r\n\rb")), "'a\nb'");
    }

    #[test]
    fn test_quotes_are_not_escaped() {
        assert_eq!(export(&Value::from("it's")), "'it's'");
    }

    #[test]
    fn test_binary_string() {
        assert_eq!(
            export(&Value::from(vec![0x00u8, 0x41, 0xff])),
            "Binary String: 0x0041ff"
        );
        assert_eq!(export(&Value::from("\u{1b}[0m")), "Binary String: 0x1b5b306d");
    }

    #[test]
    fn test_high_bytes_are_printable() {
        assert_eq!(export(&Value::from("café")), "'café'");
    }

    #[test]
    fn test_invalid_utf8_keeps_each_byte_distinct() {
        let fe = export(&Value::from(vec![b'a', 0xfe]));
        let ff = export(&Value::from(vec![b'a', 0xff]));

        assert_eq!(fe, "'a\u{fe}'");
        assert_eq!(ff, "'a\u{ff}'");
        assert_ne!(fe, ff);
    }

    #[test]
    fn test_empty_composites() {
        assert_eq!(export(&Value::Array(Array::new())), "Array &1 ()");
        assert_eq!(export(&Value::Object(Object::new("Empty"))), "Empty Object &1 ()");
    }

    #[test]
    fn test_nested_indentation() {
        let inner = Array::new();
        inner.push(Value::from(1));
        let outer = Array::new();
        outer.insert("inner", Value::Array(inner));
        outer.insert("flag", Value::from(false));

        assert_eq!(
            export(&Value::Array(outer)),
            "Array &1 (\n    'inner' => Array &2 (\n        0 => 1\n    )\n    'flag' => false\n)"
        );
    }

    #[test]
    fn test_self_reference() {
        let list = Array::new();
        list.push(Value::from(1));
        list.push(Value::Array(list.clone()));

        assert_eq!(
            export(&Value::Array(list)),
            "Array &1 (\n    0 => 1\n    1 => Array &1\n)"
        );
    }

    #[test]
    fn test_mutual_reference_between_objects() {
        let parent = Object::new("Parent");
        let child = Object::new("Child");
        parent.set_public("child", Value::Object(child.clone()));
        child.set_protected("parent", Value::Object(parent.clone()));

        assert_eq!(
            export(&Value::Object(parent)),
            "Parent Object &1 (\n    'child' => Child Object &2 (\n        'parent' => Parent Object &1\n    )\n)"
        );
    }

    #[test]
    fn test_shared_sibling_renders_back_reference() {
        let shared = Array::new();
        shared.push(Value::from("x"));
        let outer = Array::new();
        outer.push(Value::Array(shared.clone()));
        outer.push(Value::Array(shared));

        assert_eq!(
            export(&Value::Array(outer)),
            "Array &1 (\n    0 => Array &2 (\n        0 => 'x'\n    )\n    1 => Array &2\n)"
        );
    }

    #[test]
    fn test_equal_siblings_get_distinct_ids() {
        let outer = Array::new();
        outer.push(Value::from(vec![Value::from(1), Value::from(2)]));
        outer.push(Value::from(vec![Value::from(1), Value::from(2)]));

        let text = export(&Value::Array(outer));
        assert!(text.contains("0 => Array &2 ("));
        assert!(text.contains("1 => Array &3 ("));
    }

    #[test]
    fn test_numbering_restarts_per_call() {
        let list = Value::Array(Array::new());
        let exporter = Exporter::default();
        assert_eq!(exporter.export(&list), "Array &1 ()");
        assert_eq!(exporter.export(&list), "Array &1 ()");
    }

    #[test]
    fn test_export_nested_shares_registry() {
        let list = Array::new();
        let exporter = Exporter::default();
        let mut registry = IdentityRegistry::new();
        let value = Value::Array(list);

        assert_eq!(exporter.export_nested(&value, 0, &mut registry), "Array &1 ()");
        assert_eq!(exporter.export_nested(&value, 0, &mut registry), "Array &1");
    }

    #[test]
    fn test_to_array_strips_visibility_and_gc_key() {
        let obj = Object::new("T");
        obj.set_private("T", "x", Value::from(1));
        obj.set_protected("y", Value::from(2));
        obj.set(Property::from_storage_key(GC_DATA_KEY, Value::from("gc")));
        obj.set_public("z", Value::from(3));

        let map = to_array(&Value::Object(obj));
        let keys: Vec<_> = map.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_to_array_uses_declared_names_verbatim() {
        let obj = Object::new("T");
        obj.set(Property::private("", "x", Value::from(1)));
        obj.set_private("T", "a\0b", Value::from(2));
        obj.set_public("b", Value::from(3));

        let map = to_array(&Value::Object(obj.clone()));
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![Key::from("x"), Key::from("a\0b"), Key::from("b")]
        );
        assert_eq!(map.get(&Key::from("b")), Some(&Value::from(3)));
        assert!(export(&Value::Object(obj)).contains("    'x' => 1\n"));
    }

    #[test]
    fn test_to_array_scalars_are_empty() {
        assert!(to_array(&Value::from(1)).is_empty());
        assert!(to_array(&Value::Null).is_empty());
    }

    #[test]
    fn test_storage_object_flattens_attachments() {
        let storage = Object::storage("Storage");
        storage.set_public("ignored", Value::from(1));
        let item = Object::new("Item");
        storage.attach(item.clone(), Value::from("meta")).unwrap();

        let map = to_array(&Value::Object(storage.clone()));
        assert_eq!(map.len(), 1);
        let pair = map
            .get(&Key::Str(item.identity_token()))
            .and_then(Value::as_array)
            .unwrap();
        assert_eq!(pair.get(&Key::from("obj")), Some(Value::Object(item)));
        assert_eq!(pair.get(&Key::from("inf")), Some(Value::from("meta")));

        let text = export(&Value::Object(storage));
        assert!(text.starts_with("Storage Object &1 (\n    '"));
        assert!(text.contains("=> Array &2 (\n        'obj' => Item Object &3 ()\n        'inf' => 'meta'\n    )"));
    }

    #[test]
    fn test_shortened_strings() {
        let exporter = Exporter::default();
        let long = "a".repeat(20) + &"b".repeat(30);
        let short = exporter.shortened_export(&Value::from(long.as_str()));

        assert_eq!(short.chars().count(), 40);
        assert_eq!(short, format!("'{}{}...{}'", "a".repeat(20), "b".repeat(9), "b".repeat(6)));
    }

    #[test]
    fn test_string_window_is_clamped_to_limit() {
        let exporter = Exporter::new(ExportOptions::new().with_string_window(5, 10, 10));
        assert_eq!(exporter.shortened_export(&Value::from("abcdefg")), "'a...");

        let exporter = Exporter::new(ExportOptions::new().with_string_window(8, 2, 10));
        assert_eq!(exporter.shortened_export(&Value::from("abcdefg")), "'a...fg'");
    }

    #[test]
    fn test_shortened_composites() {
        let exporter = Exporter::default();
        let list = Array::new();
        assert_eq!(exporter.shortened_export(&Value::Array(list.clone())), "Array ()");
        list.push(Value::Null);
        assert_eq!(exporter.shortened_export(&Value::Array(list)), "Array (...)");

        let obj = Object::new("Point");
        obj.set_public("x", Value::from(1));
        assert_eq!(exporter.shortened_export(&Value::Object(obj)), "Point Object (...)");
    }

    #[test]
    fn test_custom_indent() {
        let exporter = Exporter::new(ExportOptions::new().with_indent(2));
        let value = Value::from(vec![Value::from(vec![Value::Null])]);
        assert_eq!(
            exporter.export(&value),
            "Array &1 (\n  0 => Array &2 (\n    0 => null\n  )\n)"
        );
    }
}
