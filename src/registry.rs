//! Identity tracking for one export walk.
//!
//! [`IdentityRegistry`] numbers each distinct composite (array or object) the
//! first time the walk meets it. Lookups compare handles by address, never by
//! contents, so two equal-looking arrays get two numbers while a second path to
//! the same array finds the number it already has.
//!
//! A registry lives for exactly one top-level export. Entries are never
//! removed: a later sibling branch must still see what an earlier branch
//! rendered.

use crate::{Array, Object, Value};
use indexmap::IndexMap;

/// A value that carries an identity.
#[derive(Clone, Debug)]
pub enum Composite {
    Array(Array),
    Object(Object),
}

impl Composite {
    /// Returns the composite inside `value`, or `None` for scalars.
    #[must_use]
    pub fn of(value: &Value) -> Option<Composite> {
        match value {
            Value::Array(arr) => Some(Composite::Array(arr.clone())),
            Value::Object(obj) => Some(Composite::Object(obj.clone())),
            _ => None,
        }
    }

    fn addr(&self) -> usize {
        match self {
            Composite::Array(arr) => arr.addr(),
            Composite::Object(obj) => obj.addr(),
        }
    }
}

impl From<&Array> for Composite {
    fn from(value: &Array) -> Self {
        Composite::Array(value.clone())
    }
}

impl From<&Object> for Composite {
    fn from(value: &Object) -> Self {
        Composite::Object(value.clone())
    }
}

/// Assigns dense, 1-based reference numbers to composites in first-seen order.
///
/// The registry holds a handle to every composite it has numbered. That keeps
/// temporary composites (built while flattening) alive, so their addresses
/// cannot be reused by a later allocation in the same walk.
///
/// # Examples
///
/// ```rust
/// use serde_exporter::{Array, IdentityRegistry};
///
/// let a = Array::new();
/// let b = Array::new();
/// let mut registry = IdentityRegistry::new();
///
/// assert_eq!(registry.contains(&a), None);
/// assert_eq!(registry.add(&a), 1);
/// assert_eq!(registry.add(&b), 2);
/// assert_eq!(registry.contains(&a), Some(1));
/// ```
#[derive(Debug, Default)]
pub struct IdentityRegistry {
    entries: IndexMap<usize, Composite>,
}

impl IdentityRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number previously assigned to this exact composite.
    pub fn contains(&self, composite: impl Into<Composite>) -> Option<usize> {
        let composite = composite.into();
        self.entries
            .get_index_of(&composite.addr())
            .map(|index| index + 1)
    }

    /// Registers a composite and returns its number.
    ///
    /// Numbers equal the count of entries registered so far, this one
    /// included. Adding a composite twice returns the number it already has.
    pub fn add(&mut self, composite: impl Into<Composite>) -> usize {
        let composite = composite.into();
        let (index, _) = self.entries.insert_full(composite.addr(), composite);
        index + 1
    }

    /// Number of composites registered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_contents_are_distinct_entries() {
        let a = Array::new();
        a.push(Value::from(1));
        let b = Array::new();
        b.push(Value::from(1));

        let mut registry = IdentityRegistry::new();
        assert_eq!(registry.add(&a), 1);
        assert_eq!(registry.contains(&b), None);
        assert_eq!(registry.add(&b), 2);
    }

    #[test]
    fn test_clone_shares_entry() {
        let obj = Object::new("Node");
        let mut registry = IdentityRegistry::new();
        registry.add(&obj);
        assert_eq!(registry.contains(&obj.clone()), Some(1));
        assert_eq!(registry.add(&obj), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_arrays_and_objects_share_numbering() {
        let arr = Array::new();
        let obj = Object::new("Node");
        let mut registry = IdentityRegistry::new();
        assert_eq!(registry.add(&obj), 1);
        assert_eq!(registry.add(&arr), 2);
        assert_eq!(registry.contains(&obj), Some(1));
    }

    #[test]
    fn test_scalars_have_no_composite() {
        assert!(Composite::of(&Value::from(1)).is_none());
        assert!(Composite::of(&Value::Array(Array::new())).is_some());
    }
}
