//! Ordered key/value storage for arrays and flattened objects.
//!
//! This module provides [`ExportMap`], a wrapper around [`IndexMap`] that keeps
//! entries in insertion order, and [`Key`], the integer-or-string key type used
//! by arrays.
//!
//! Insertion order is what the exporter renders, so two maps with the same
//! entries inserted in a different order produce different text.
//!
//! ## Examples
//!
//! ```rust
//! use serde_exporter::{ExportMap, Key, Value};
//!
//! let mut map = ExportMap::new();
//! map.insert(Key::from("name"), Value::from("Alice"));
//! map.insert(Key::from(7), Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get(&Key::from("name")).and_then(|v| v.as_str()), Some("Alice"));
//! assert_eq!(map.next_index(), 8);
//! ```

use indexmap::IndexMap;
use std::fmt;

/// An array key: either an integer position or a string name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    /// Returns the integer value of this key, if it is one.
    #[inline]
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(i) => Some(*i),
            Key::Str(_) => None,
        }
    }

    /// Returns the string value of this key, if it is one.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Int(_) => None,
            Key::Str(s) => Some(s),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{}", i),
            Key::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Int(value as i64)
    }
}

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        Key::Int(value as i64)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}

/// An ordered map of array keys to values.
///
/// Used as the storage behind [`Array`](crate::Array) and as the result of
/// [`to_array`](crate::to_array).
#[derive(Debug, Clone, Default)]
pub struct ExportMap(IndexMap<Key, crate::Value>);

impl ExportMap {
    /// Creates an empty `ExportMap`.
    #[must_use]
    pub fn new() -> Self {
        ExportMap(IndexMap::new())
    }

    /// Creates an empty `ExportMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ExportMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// Replacing an existing key keeps its original position and returns the
    /// old value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_exporter::{ExportMap, Key, Value};
    ///
    /// let mut map = ExportMap::new();
    /// assert!(map.insert(Key::from("a"), Value::from(1)).is_none());
    /// assert!(map.insert(Key::from("b"), Value::from(2)).is_none());
    /// assert!(map.insert(Key::from("a"), Value::from(3)).is_some());
    ///
    /// let keys: Vec<_> = map.keys().map(|k| k.to_string()).collect();
    /// assert_eq!(keys, vec!["a", "b"]);
    /// ```
    pub fn insert(&mut self, key: Key, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(key, value)
    }

    /// Appends a value at [`next_index`](Self::next_index) and returns the key used.
    pub fn push(&mut self, value: crate::Value) -> Key {
        let key = Key::Int(self.next_index());
        self.0.insert(key.clone(), value);
        key
    }

    /// The integer key the next [`push`](Self::push) will use: one past the
    /// largest non-negative integer key, or `0`.
    #[must_use]
    pub fn next_index(&self) -> i64 {
        self.0
            .keys()
            .filter_map(Key::as_int)
            .filter(|i| *i >= 0)
            .max()
            .map_or(0, |max| max.saturating_add(1))
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&crate::Value> {
        self.0.get(key)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, crate::Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, Key, crate::Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, crate::Value> {
        self.0.iter()
    }
}

impl IntoIterator for ExportMap {
    type Item = (Key, crate::Value);
    type IntoIter = indexmap::map::IntoIter<Key, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ExportMap {
    type Item = (&'a Key, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, Key, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(Key, crate::Value)> for ExportMap {
    fn from_iter<T: IntoIterator<Item = (Key, crate::Value)>>(iter: T) -> Self {
        ExportMap(IndexMap::from_iter(iter))
    }
}
