//! Dynamic value representation for exporting.
//!
//! This module provides the [`Value`] enum which represents anything the
//! exporter can render, including structures that share or contain themselves.
//!
//! ## Core Types
//!
//! - [`Value`]: null, bool, number, byte string, resource handle, array, object, date, bigint
//! - [`Number`]: integer or floating-point number
//! - [`Array`]: shared handle to an ordered key/value list
//! - [`Object`]: shared handle to a named record with visibility-tagged properties
//!
//! ## Identity
//!
//! [`Array`] and [`Object`] are handles. Cloning a handle does not copy the
//! contents, it produces a second reference to the *same* composite, and the
//! exporter labels every composite by that identity. Two handles built
//! separately are different composites even when their contents are equal.
//!
//! ```rust
//! use serde_exporter::{Array, Value};
//!
//! let list = Array::new();
//! list.push(Value::from(1));
//! let same = list.clone();
//! assert!(list.ptr_eq(&same));
//!
//! let other = Array::new();
//! other.push(Value::from(1));
//! assert!(!list.ptr_eq(&other));
//! ```
//!
//! ### Self-reference
//!
//! ```rust
//! use serde_exporter::{export, Array, Value};
//!
//! let list = Array::new();
//! list.push(Value::Array(list.clone()));
//! assert_eq!(export(&Value::Array(list)), "Array &1 (\n    0 => Array &1\n)");
//! ```

use crate::{Error, ExportMap, Key, Result};
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// Storage key the host runtime uses for garbage-collector bookkeeping.
///
/// It never carries user data and is dropped when an object is flattened.
pub const GC_DATA_KEY: &str = "\0gcdata";

/// A dynamically-typed value the exporter can render.
///
/// # Examples
///
/// ```rust
/// use serde_exporter::{Value, Number};
///
/// let null = Value::Null;
/// let num = Value::Number(Number::Integer(42));
/// let text = Value::from("hello");
///
/// assert!(null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    /// Raw bytes; not required to be UTF-8.
    String(Vec<u8>),
    Resource(Resource),
    Array(Array),
    Object(Object),
    Date(DateTime<Utc>),
    BigInt(BigInt),
}

/// A numeric value: a 64-bit integer or a 64-bit float.
///
/// # Examples
///
/// ```rust
/// use serde_exporter::Number;
///
/// assert!(Number::Integer(42).is_integer());
/// assert_eq!(Number::Float(2.0).as_i64(), Some(2));
/// assert_eq!(Number::Float(2.5).as_i64(), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Returns `true` if this is an integer value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` if this is a floating-point value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts this number to an `i64` if it has no fractional part and fits.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    /// Converts this number to an `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

/// An opaque handle to an external resource (file, socket, stream, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    pub id: u64,
    pub kind: String,
}

impl Resource {
    pub fn new(id: u64, kind: impl Into<String>) -> Self {
        Resource {
            id,
            kind: kind.into(),
        }
    }
}

/// Shared handle to an ordered list of key/value entries.
///
/// Equality is identity: two handles are equal only when they refer to the
/// same list.
#[derive(Clone, Default)]
pub struct Array(Rc<RefCell<ExportMap>>);

impl Array {
    /// Creates a new, empty array with its own identity.
    #[must_use]
    pub fn new() -> Self {
        Array(Rc::new(RefCell::new(ExportMap::new())))
    }

    /// Creates an array holding the given entries.
    #[must_use]
    pub fn from_map(map: ExportMap) -> Self {
        Array(Rc::new(RefCell::new(map)))
    }

    /// Appends a value at the next integer key and returns that key.
    ///
    /// # Panics
    ///
    /// Panics if the array is currently borrowed by an in-progress iteration
    /// over its own entries.
    pub fn push(&self, value: Value) -> Key {
        self.0.borrow_mut().push(value)
    }

    /// Inserts or replaces the entry at `key`.
    ///
    /// # Panics
    ///
    /// Same conditions as [`push`](Self::push).
    pub fn insert(&self, key: impl Into<Key>, value: Value) -> Option<Value> {
        self.0.borrow_mut().insert(key.into(), value)
    }

    /// Returns a clone of the value at `key`.
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<Value> {
        self.0.try_borrow().ok()?.get(key).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.try_borrow().map_or(0, |map| map.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a snapshot of the entries. Composite values in the snapshot
    /// keep their identity.
    #[must_use]
    pub fn entries(&self) -> ExportMap {
        self.0
            .try_borrow()
            .map(|map| map.clone())
            .unwrap_or_default()
    }

    /// Returns `true` if both handles refer to the same array.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Array) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    /// Borrows the entries for reading, or `None` while they are being mutated.
    pub(crate) fn try_entries(&self) -> Option<Ref<'_, ExportMap>> {
        self.0.try_borrow().ok()
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

// Contents are left out so that self-containing arrays can be debug-printed.
impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("addr", &format_args!("{:#x}", self.addr()))
            .field("len", &self.len())
            .finish()
    }
}

/// Who may see a property, and for private properties, which type declared it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    Private { declaring_type: String },
}

/// One named field of an [`Object`].
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub name: String,
    pub visibility: Visibility,
    pub value: Value,
}

impl Property {
    pub fn public(name: impl Into<String>, value: Value) -> Self {
        Property {
            name: name.into(),
            visibility: Visibility::Public,
            value,
        }
    }

    pub fn protected(name: impl Into<String>, value: Value) -> Self {
        Property {
            name: name.into(),
            visibility: Visibility::Protected,
            value,
        }
    }

    pub fn private(
        declaring_type: impl Into<String>,
        name: impl Into<String>,
        value: Value,
    ) -> Self {
        Property {
            name: name.into(),
            visibility: Visibility::Private {
                declaring_type: declaring_type.into(),
            },
            value,
        }
    }

    /// The key this property is stored under in a host runtime's raw field
    /// table: `"\0Type\0name"` for private, `"\0*\0name"` for protected, and
    /// the bare name for public properties.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_exporter::{Property, Value};
    ///
    /// assert_eq!(Property::private("T", "x", Value::Null).storage_key(), "\0T\0x");
    /// assert_eq!(Property::protected("y", Value::Null).storage_key(), "\0*\0y");
    /// assert_eq!(Property::public("z", Value::Null).storage_key(), "z");
    /// ```
    #[must_use]
    pub fn storage_key(&self) -> String {
        match &self.visibility {
            Visibility::Public => self.name.clone(),
            Visibility::Protected => format!("\0*\0{}", self.name),
            Visibility::Private { declaring_type } => {
                format!("\0{}\0{}", declaring_type, self.name)
            }
        }
    }

    /// Rebuilds a property from a raw storage key as produced by
    /// [`storage_key`](Self::storage_key).
    ///
    /// Keys that do not follow the `"\0tag\0name"` layout are public names,
    /// kept verbatim.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_exporter::{Property, Value, Visibility};
    ///
    /// let prop = Property::from_storage_key("\0Point\0x", Value::from(1));
    /// assert_eq!(prop.name, "x");
    /// assert_eq!(
    ///     prop.visibility,
    ///     Visibility::Private { declaring_type: "Point".to_string() }
    /// );
    /// ```
    #[must_use]
    pub fn from_storage_key(key: &str, value: Value) -> Self {
        if let Some(rest) = key.strip_prefix('\0') {
            if let Some(split) = rest.rfind('\0') {
                let (tag, name) = (&rest[..split], &rest[split + 1..]);
                if !tag.is_empty() && !name.is_empty() {
                    return if tag == "*" {
                        Property::protected(name, value)
                    } else {
                        Property::private(tag, name, value)
                    };
                }
            }
        }
        Property::public(key, value)
    }
}

/// An element attached to an enumerable object, together with the side value
/// the enumeration associates with it.
#[derive(Clone, Debug, PartialEq)]
pub struct Attachment {
    pub object: Object,
    pub info: Value,
}

struct ObjectData {
    properties: Vec<Property>,
    // Present only on objects with the enumeration capability.
    attachments: Option<Vec<Attachment>>,
}

// The class never changes, so it lives outside the cell and stays readable
// while the contents are mutably borrowed.
struct ObjectCell {
    class: String,
    data: RefCell<ObjectData>,
}

/// Shared handle to a named record.
///
/// An object either exposes its properties directly, or (when created with
/// [`Object::storage`]) exposes an enumeration of attached objects, each with
/// an associated info value. Flattening uses whichever capability the object
/// has; see [`to_array`](crate::to_array).
///
/// # Examples
///
/// ```rust
/// use serde_exporter::{export, Object, Value};
///
/// let point = Object::new("Point");
/// point.set_public("x", Value::from(1));
/// point.set_private("Point", "secret", Value::from(true));
///
/// assert_eq!(
///     export(&Value::Object(point)),
///     "Point Object &1 (\n    'x' => 1\n    'secret' => true\n)"
/// );
/// ```
#[derive(Clone)]
pub struct Object(Rc<ObjectCell>);

impl Object {
    /// Creates an object of the given class with no properties.
    #[must_use]
    pub fn new(class: impl Into<String>) -> Self {
        Object(Rc::new(ObjectCell {
            class: class.into(),
            data: RefCell::new(ObjectData {
                properties: Vec::new(),
                attachments: None,
            }),
        }))
    }

    /// Creates an enumerable object whose contents are attached objects
    /// rather than properties.
    #[must_use]
    pub fn storage(class: impl Into<String>) -> Self {
        Object(Rc::new(ObjectCell {
            class: class.into(),
            data: RefCell::new(ObjectData {
                properties: Vec::new(),
                attachments: Some(Vec::new()),
            }),
        }))
    }

    #[must_use]
    pub fn class_name(&self) -> String {
        self.0.class.clone()
    }

    /// Returns `true` if this object enumerates attached elements.
    #[must_use]
    pub fn is_enumerable(&self) -> bool {
        self.0
            .data
            .try_borrow()
            .map_or(false, |data| data.attachments.is_some())
    }

    /// Sets a property, replacing one with the same name and visibility.
    ///
    /// Properties keep the position of their first declaration.
    pub fn set(&self, property: Property) {
        let mut data = self.0.data.borrow_mut();
        match data
            .properties
            .iter_mut()
            .find(|p| p.name == property.name && p.visibility == property.visibility)
        {
            Some(existing) => existing.value = property.value,
            None => data.properties.push(property),
        }
    }

    pub fn set_public(&self, name: impl Into<String>, value: Value) {
        self.set(Property::public(name, value));
    }

    pub fn set_protected(&self, name: impl Into<String>, value: Value) {
        self.set(Property::protected(name, value));
    }

    pub fn set_private(
        &self,
        declaring_type: impl Into<String>,
        name: impl Into<String>,
        value: Value,
    ) {
        self.set(Property::private(declaring_type, name, value));
    }

    /// Attaches `object` with an associated `info` value. Attaching an object
    /// that is already present replaces its info.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotEnumerable`] if this object was not created with
    /// [`Object::storage`].
    pub fn attach(&self, object: Object, info: Value) -> Result<()> {
        let mut data = self.0.data.borrow_mut();
        let attachments = data
            .attachments
            .as_mut()
            .ok_or_else(|| Error::not_enumerable(&self.0.class))?;
        match attachments.iter_mut().find(|a| a.object.ptr_eq(&object)) {
            Some(existing) => existing.info = info,
            None => attachments.push(Attachment { object, info }),
        }
        Ok(())
    }

    /// Returns a snapshot of the properties in declaration order.
    #[must_use]
    pub fn properties(&self) -> Vec<Property> {
        self.0
            .data
            .try_borrow()
            .map(|data| data.properties.clone())
            .unwrap_or_default()
    }

    /// Returns a snapshot of the attached elements, or `None` for objects
    /// without the enumeration capability.
    #[must_use]
    pub fn attachments(&self) -> Option<Vec<Attachment>> {
        self.0.data.try_borrow().ok()?.attachments.clone()
    }

    /// A 32-digit hex token unique to this object while it is alive.
    #[must_use]
    pub fn identity_token(&self) -> String {
        format!("{:032x}", self.addr())
    }

    /// Returns `true` if both handles refer to the same object.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    pub(crate) fn is_borrowable(&self) -> bool {
        self.0.data.try_borrow().is_ok()
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("class", &self.class_name())
            .field("addr", &format_args!("{:#x}", self.addr()))
            .finish()
    }
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns `true` for values that carry an identity (arrays and objects).
    #[inline]
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string holding valid UTF-8, returns it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_exporter::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::from(vec![0xffu8]).as_str(), None);
    /// assert_eq!(Value::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(bytes) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::String(bytes) => Some(bytes),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::export(self))
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::Integer(value))
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(Number::Float(value as f64))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Float(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value.into_bytes())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::String(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::String(value.to_vec())
    }
}

impl From<Resource> for Value {
    fn from(value: Resource) -> Self {
        Value::Resource(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

/// Builds a fresh array from the map.
impl From<ExportMap> for Value {
    fn from(value: ExportMap) -> Self {
        Value::Array(Array::from_map(value))
    }
}

/// Builds a fresh array with keys `0..n`.
impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        let map = value
            .into_iter()
            .enumerate()
            .map(|(i, v)| (Key::from(i), v))
            .collect();
        Value::Array(Array::from_map(map))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Date(value)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::BigInt(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
