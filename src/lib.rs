//! # serde_exporter
//!
//! Deterministic, human-readable rendering of arbitrary values for debugging
//! and diagnostic output.
//!
//! ## What does it render?
//!
//! The exporter shows what a value actually *is*, more precisely than a
//! generic debug dump:
//!
//! - `null`, `true` and `false` are never confused with `0` or `''`
//! - floats always carry a decimal point (`1.0`), so they never read as integers
//! - all text is quoted, with `\r\n`, `\n\r` and `\r` normalized to `\n`
//! - byte strings that are not printable fall back to a hex dump
//! - arrays and objects are labelled with reference numbers, so shared and
//!   cyclic structures show up as back-references instead of looping forever
//!
//! The output is meant for people. It is not a serialization format and is
//! not meant to be parsed back.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_exporter::{export, shortened_export, Array, Object, Value};
//!
//! let node = Object::new("Node");
//! node.set_public("name", Value::from("root"));
//! node.set_private("Node", "weight", Value::from(1.0));
//!
//! let children = Array::new();
//! children.push(Value::Object(node.clone()));
//! node.set_public("children", Value::Array(children));
//!
//! let text = export(&Value::Object(node.clone()));
//! assert_eq!(
//!     text,
//!     "Node Object &1 (\n    'name' => 'root'\n    'weight' => 1.0\n    'children' => Array &2 (\n        0 => Node Object &1\n    )\n)"
//! );
//!
//! assert_eq!(shortened_export(&Value::Object(node)), "Node Object (...)");
//! ```
//!
//! ### Exporting Rust types
//!
//! Anything implementing `Serialize` can be exported through [`to_value`]:
//!
//! ```rust
//! use serde::Serialize;
//! use serde_exporter::export_serialize;
//!
//! #[derive(Serialize)]
//! struct User { id: u32, name: String, active: bool }
//!
//! let user = User { id: 7, name: "Alice".to_string(), active: false };
//! assert_eq!(
//!     export_serialize(&user).unwrap(),
//!     "User Object &1 (\n    'id' => 7\n    'name' => 'Alice'\n    'active' => false\n)"
//! );
//! ```
//!
//! ## Guarantees
//!
//! - Exporting never fails and never panics, whatever the input; nesting depth
//!   is bounded only by the call stack
//! - Reference numbers start at 1 for every top-level call and follow
//!   depth-first first-encounter order
//! - Identity, not equality, drives numbering: two equal but separately built
//!   arrays get two numbers
//! - The shortened export never contains a raw newline
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - exporting scalars and structs
//! - **`cycles.rs`** - shared and self-referential structures
//! - **`macro.rs`** - building values with the `value!` macro
//! - **`dynamic_values.rs`** - objects, visibility and enumerable storage
//! - **`custom_options.rs`** - indentation and truncation settings
//!
//! Run any example with: `cargo run --example <name>`

pub mod error;
pub mod exporter;
pub mod macros;
pub mod map;
pub mod options;
pub mod registry;
pub mod ser;
pub mod value;

pub use error::{Error, Result};
pub use exporter::{to_array, Exporter};
pub use map::{ExportMap, Key};
pub use options::ExportOptions;
pub use registry::{Composite, IdentityRegistry};
pub use ser::ValueSerializer;
pub use value::{
    Array, Attachment, Number, Object, Property, Resource, Value, Visibility, GC_DATA_KEY,
};

use serde::Serialize;
use std::io;

/// Renders a value as multi-line diagnostic text.
///
/// # Examples
///
/// ```rust
/// use serde_exporter::{export, Value};
///
/// assert_eq!(export(&Value::Null), "null");
/// assert_eq!(export(&Value::from(2.0)), "2.0");
/// assert_eq!(export(&Value::from("a\r\nb")), "'a\nb'");
/// assert_eq!(export(&Value::from(vec![0u8, 255])), "Binary String: 0x00ff");
/// ```
#[must_use]
pub fn export(value: &Value) -> String {
    Exporter::default().export(value)
}

/// Renders a value with custom indentation and truncation settings.
#[must_use]
pub fn export_with_options(value: &Value, options: &ExportOptions) -> String {
    Exporter::new(options.clone()).export(value)
}

/// Renders a value on a single line, without expanding arrays or objects.
///
/// # Examples
///
/// ```rust
/// use serde_exporter::{shortened_export, Value};
///
/// let long = Value::from("x".repeat(50));
/// let short = shortened_export(&long);
/// assert!(short.len() <= 40);
/// assert!(short.contains("..."));
/// ```
#[must_use]
pub fn shortened_export(value: &Value) -> String {
    Exporter::default().shortened_export(value)
}

/// Renders the values of an array as a comma-separated single line.
#[must_use]
pub fn shortened_recursive_export(array: &Array) -> String {
    Exporter::default().shortened_recursive_export(array)
}

/// Convert any `T: Serialize` to a `Value`.
///
/// # Examples
///
/// ```rust
/// use serde_exporter::to_value;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Returns an error if the `Serialize` implementation fails or produces a map
/// key that is neither an integer nor a string.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Convert any `T: Serialize` to a `Value` and render it.
///
/// # Errors
///
/// Same as [`to_value`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn export_serialize<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(export(&to_value(value)?))
}

/// Render any `T: Serialize` into a writer.
///
/// # Examples
///
/// ```rust
/// use serde_exporter::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &vec![1, 2]).unwrap();
/// assert_eq!(buffer, b"Array &1 (\n    0 => 1\n    1 => 2\n)");
/// ```
///
/// # Errors
///
/// Returns an error if conversion fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &ExportOptions::default())
}

/// Render any `T: Serialize` into a writer with custom options.
///
/// # Errors
///
/// Returns an error if conversion fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &ExportOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = export_with_options(&to_value(value)?, options);
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}
