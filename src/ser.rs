//! Converting Rust values into [`Value`]s through Serde.
//!
//! [`ValueSerializer`] turns anything implementing `Serialize` into a [`Value`]
//! that the exporter can render:
//!
//! - **Structs** become [`Object`]s named after the struct, one public property per field
//! - **Enum variants with data** become objects named `Enum::Variant`
//! - **Sequences, tuples and maps** become [`Array`]s
//! - **Byte buffers** become byte strings (rendered as hex when not printable)
//! - **Integers beyond `i64`** become [`BigInt`]s
//!
//! ## Usage
//!
//! ```rust
//! use serde_exporter::{export, to_value};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: f64 }
//!
//! let value = to_value(&Point { x: 1, y: 2.0 }).unwrap();
//! assert_eq!(export(&value), "Point Object &1 (\n    'x' => 1\n    'y' => 2.0\n)");
//! ```
//!
//! Every composite produced here is fresh: serializing the same Rust value
//! twice yields two distinct identities.

use crate::{Array, Error, Key, Number, Object, Result, Value};
use num_bigint::BigInt;
use serde::{ser, Serialize};

/// Serializer producing a [`Value`].
pub struct ValueSerializer;

pub struct SerializeVec {
    array: Array,
}

pub struct SerializeMap {
    array: Array,
    current_key: Option<Key>,
}

pub struct SerializeObject {
    object: Object,
    next_position: usize,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeObject;
    type SerializeTupleVariant = SerializeObject;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeObject;
    type SerializeStructVariant = SerializeObject;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v)))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        match i64::try_from(v) {
            Ok(i) => Ok(Value::Number(Number::Integer(i))),
            Err(_) => Ok(Value::BigInt(BigInt::from(v))),
        }
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        if v <= i64::MAX as u64 {
            Ok(Value::Number(Number::Integer(v as i64)))
        } else {
            Ok(Value::BigInt(BigInt::from(v)))
        }
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        match i64::try_from(v) {
            Ok(i) => Ok(Value::Number(Number::Integer(i))),
            Err(_) => Ok(Value::BigInt(BigInt::from(v))),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Number(Number::Float(v as f64)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(Number::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::from(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value> {
        Ok(Value::Object(Object::new(name)))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::from(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let object = Object::new(variant_class(name, variant));
        object.set_public("0", to_value(value)?);
        Ok(Value::Object(object))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new())
    }

    fn serialize_tuple(self, _len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new())
    }

    fn serialize_tuple_struct(self, name: &'static str, _len: usize) -> Result<SerializeObject> {
        Ok(SerializeObject::new(name.to_string()))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeObject> {
        Ok(SerializeObject::new(variant_class(name, variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<SerializeObject> {
        Ok(SerializeObject::new(name.to_string()))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeObject> {
        Ok(SerializeObject::new(variant_class(name, variant)))
    }
}

impl SerializeVec {
    fn new() -> Self {
        SerializeVec {
            array: Array::new(),
        }
    }
}

impl SerializeMap {
    fn new() -> Self {
        SerializeMap {
            array: Array::new(),
            current_key: None,
        }
    }
}

impl SerializeObject {
    fn new(class: String) -> Self {
        SerializeObject {
            object: Object::new(class),
            next_position: 0,
        }
    }

    fn push_positional(&mut self, value: Value) {
        self.object
            .set_public(self.next_position.to_string(), value);
        self.next_position += 1;
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.array.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.array))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.array.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.array))
    }
}

impl ser::SerializeTupleStruct for SerializeObject {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push_positional(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.object))
    }
}

impl ser::SerializeTupleVariant for SerializeObject {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push_positional(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.object))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(to_key(to_value(key)?)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.array.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.array))
    }
}

impl ser::SerializeStruct for SerializeObject {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.object.set_public(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.object))
    }
}

impl ser::SerializeStructVariant for SerializeObject {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.object.set_public(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.object))
    }
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

fn to_key(value: Value) -> Result<Key> {
    match value {
        Value::Number(Number::Integer(i)) => Ok(Key::Int(i)),
        Value::String(bytes) => match String::from_utf8(bytes) {
            Ok(s) => Ok(Key::Str(s)),
            Err(_) => Err(Error::unsupported_key("non UTF-8 string")),
        },
        Value::Null => Err(Error::unsupported_key("null")),
        Value::Bool(_) => Err(Error::unsupported_key("bool")),
        Value::Number(Number::Float(_)) => Err(Error::unsupported_key("float")),
        Value::BigInt(_) => Err(Error::unsupported_key("bigint")),
        Value::Array(_) => Err(Error::unsupported_key("array")),
        Value::Object(object) => Err(Error::unsupported_key(&object.class_name())),
        Value::Resource(_) => Err(Error::unsupported_key("resource")),
        Value::Date(_) => Err(Error::unsupported_key("date")),
    }
}

#[inline]
fn variant_class(name: &str, variant: &str) -> String {
    format!("{}::{}", name, variant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Meters(f64);

    #[derive(Serialize)]
    struct Pair(i32, &'static str);

    #[derive(Serialize)]
    struct Marker;

    #[derive(Serialize)]
    enum Shape {
        Empty,
        Circle(u32),
        Rect { w: u32, h: u32 },
    }

    #[test]
    fn test_newtype_struct_is_transparent() {
        assert_eq!(to_value(&Meters(2.5)).unwrap(), Value::from(2.5));
    }

    #[test]
    fn test_tuple_struct_uses_positions() {
        let value = to_value(&Pair(7, "x")).unwrap();
        assert_eq!(
            export(&value),
            "Pair Object &1 (\n    '0' => 7\n    '1' => 'x'\n)"
        );
    }

    #[test]
    fn test_unit_struct_is_empty_object() {
        assert_eq!(export(&to_value(&Marker).unwrap()), "Marker Object &1 ()");
    }

    #[test]
    fn test_enum_variants() {
        assert_eq!(to_value(&Shape::Empty).unwrap(), Value::from("Empty"));
        assert_eq!(
            export(&to_value(&Shape::Circle(3)).unwrap()),
            "Shape::Circle Object &1 (\n    '0' => 3\n)"
        );
        assert_eq!(
            export(&to_value(&Shape::Rect { w: 1, h: 2 }).unwrap()),
            "Shape::Rect Object &1 (\n    'w' => 1\n    'h' => 2\n)"
        );
    }

    #[test]
    fn test_map_keys() {
        let mut map = BTreeMap::new();
        map.insert(2, "two");
        map.insert(1, "one");
        assert_eq!(
            export(&to_value(&map).unwrap()),
            "Array &1 (\n    1 => 'one'\n    2 => 'two'\n)"
        );

        let mut bad = BTreeMap::new();
        bad.insert(true, 1);
        assert!(matches!(to_value(&bad), Err(Error::UnsupportedKey(_))));
    }

    #[test]
    fn test_wide_integers_become_bigint() {
        assert_eq!(to_value(&u64::MAX).unwrap(), Value::BigInt(BigInt::from(u64::MAX)));
        assert_eq!(to_value(&5u128).unwrap(), Value::from(5i64));
        assert_eq!(export(&to_value(&i128::MIN).unwrap()), i128::MIN.to_string());
    }

    #[test]
    fn test_bytes_become_byte_strings() {
        struct Raw(&'static [u8]);
        impl Serialize for Raw {
            fn serialize<S: ser::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
                s.serialize_bytes(self.0)
            }
        }
        assert_eq!(export(&to_value(&Raw(b"\x00\x01")).unwrap()), "Binary String: 0x0001");
    }
}
