//! ColSON serialization.
//!
//! This module holds two serializers:
//!
//! - [`Serializer`], the text writer behind [`serialize`]: a recursive walk over a
//!   [`Value`] tree that emits canonical notation text.
//! - [`ValueSerializer`], a `serde::Serializer` that turns any `T: Serialize` into a
//!   [`Value`] (see [`to_value`](crate::to_value)).
//!
//! ## Output rules
//!
//! - Strings escape `"`, `\` and control characters below `0x20`; with
//!   [`SerializeOptions::escape_non_ascii`] every non-ASCII character becomes `\uXXXX`.
//! - `Int` is written as plain decimal digits.
//! - `Float` is written in the shortest form that reads back as the same double and always
//!   carries a decimal point or exponent (`1.0`, `0.1`, `1e300`).
//! - Compact output has no insignificant whitespace. Pretty output places one element per
//!   line; empty containers stay `[]` and `{}`.
//!
//! ```rust
//! use serde_colson::{serialize, Map, SerializeOptions, Value};
//!
//! let mut map = Map::new();
//! map.insert("b".to_string(), Value::Int(1));
//! map.insert("a".to_string(), Value::Float(2.0));
//! let value = Value::Object(map);
//!
//! assert_eq!(serialize(&value, &SerializeOptions::new()).unwrap(), r#"{"b":1,"a":2.0}"#);
//!
//! let sorted = SerializeOptions::new().with_sort_keys(true);
//! assert_eq!(serialize(&value, &sorted).unwrap(), r#"{"a":2.0,"b":1}"#);
//! ```

use crate::{Error, Map, NonFinitePolicy, Result, SerializeOptions, Value};
use serde::{ser, Serialize};
use std::io;

/// The text writer.
///
/// Created via [`Serializer::new`]; feed it a tree with [`Serializer::write_value`] and take
/// the text with [`Serializer::into_inner`].
pub struct Serializer {
    output: String,
    options: SerializeOptions,
    indent_level: usize,
}

impl Serializer {
    pub fn new(options: SerializeOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
            indent_level: 0,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Appends the text for `value`.
    ///
    /// # Errors
    ///
    /// Fails on non-finite floats under [`NonFinitePolicy::Error`].
    pub fn write_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null => self.output.push_str("null"),
            Value::Bool(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Value::Int(i) => self.output.push_str(&i.to_string()),
            Value::Float(f) => self.write_float(*f)?,
            Value::Str(s) => write_escaped(&mut self.output, s, self.options.escape_non_ascii),
            Value::Array(items) => self.write_array(items)?,
            Value::Object(map) => self.write_object(map)?,
        }
        Ok(())
    }

    fn write_float(&mut self, f: f64) -> Result<()> {
        if f.is_finite() {
            self.output.push_str(&format_float(f));
            return Ok(());
        }
        match self.options.non_finite {
            NonFinitePolicy::Error => Err(Error::encoding("non-finite number")),
            NonFinitePolicy::Nullify => {
                self.output.push_str("null");
                Ok(())
            }
        }
    }

    /// Starts a new line at the current nesting level; no-op in compact mode.
    fn write_newline(&mut self) {
        if let Some(width) = self.options.indent {
            self.output.push('\n');
            self.output
                .extend(std::iter::repeat(' ').take(width * self.indent_level));
        }
    }

    fn write_array(&mut self, items: &[Value]) -> Result<()> {
        if items.is_empty() {
            self.output.push_str("[]");
            return Ok(());
        }

        self.output.push('[');
        self.indent_level += 1;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.output.push(',');
            }
            self.write_newline();
            self.write_value(item)?;
        }
        self.indent_level -= 1;
        self.write_newline();
        self.output.push(']');
        Ok(())
    }

    fn write_object(&mut self, map: &Map) -> Result<()> {
        if map.is_empty() {
            self.output.push_str("{}");
            return Ok(());
        }

        let mut entries: Vec<(&String, &Value)> = map.iter().collect();
        if self.options.sort_keys {
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        }

        self.output.push('{');
        self.indent_level += 1;
        for (i, (key, value)) in entries.into_iter().enumerate() {
            if i > 0 {
                self.output.push(',');
            }
            self.write_newline();
            write_escaped(&mut self.output, key, self.options.escape_non_ascii);
            self.output.push(':');
            if self.options.indent.is_some() {
                self.output.push(' ');
            }
            self.write_value(value)?;
        }
        self.indent_level -= 1;
        self.write_newline();
        self.output.push('}');
        Ok(())
    }
}

/// Shortest round-trip text for a finite float, always marked as a float.
pub(crate) fn format_float(f: f64) -> String {
    // `Debug` keeps the shortest round-trip digits and switches to exponent form for very
    // large and very small magnitudes.
    let mut text = format!("{:?}", f);
    if !text.contains(|c: char| matches!(c, '.' | 'e' | 'E')) {
        text.push_str(".0");
    }
    text
}

fn write_escaped(output: &mut String, s: &str, escape_non_ascii: bool) {
    output.push('"');
    for ch in s.chars() {
        match ch {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            '\u{0008}' => output.push_str("\\b"),
            '\u{000C}' => output.push_str("\\f"),
            c if (c as u32) < 0x20 => output.push_str(&format!("\\u{:04x}", c as u32)),
            c if escape_non_ascii && !c.is_ascii() => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    output.push_str(&format!("\\u{:04x}", unit));
                }
            }
            c => output.push(c),
        }
    }
    output.push('"');
}

/// Writes `value` as notation text.
///
/// # Examples
///
/// ```rust
/// use serde_colson::{serialize, SerializeOptions, Value};
///
/// assert_eq!(serialize(&Value::Int(42), &SerializeOptions::new()).unwrap(), "42");
/// assert_eq!(serialize(&Value::Float(42.0), &SerializeOptions::new()).unwrap(), "42.0");
/// assert_eq!(
///     serialize(&Value::from("a\"b"), &SerializeOptions::new()).unwrap(),
///     r#""a\"b""#
/// );
/// ```
///
/// # Errors
///
/// Returns an encoding error for non-finite floats unless the options nullify them.
pub fn serialize(value: &Value, options: &SerializeOptions) -> Result<String> {
    let mut serializer = Serializer::new(options.clone());
    serializer.write_value(value)?;
    Ok(serializer.into_inner())
}

/// Writes `value` as notation text into `writer`.
///
/// Nothing is written if encoding fails.
///
/// # Errors
///
/// Returns an encoding error as [`serialize`] does, or an I/O error from the writer.
pub fn serialize_to_writer<W>(mut writer: W, value: &Value, options: &SerializeOptions) -> Result<()>
where
    W: io::Write,
{
    let text = serialize(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e))
}

/// A `serde::Serializer` producing [`Value`] trees.
///
/// - `u64` above `i64::MAX` becomes `Float`.
/// - Unit, unit structs and `None` become `Null`; unit variants become strings.
/// - Newtype, tuple and struct variants become single-key objects keyed by the variant name.
/// - Map keys must serialize to strings; integer and boolean keys are stringified.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeMap {
    map: Map,
    current_key: Option<String>,
}

pub struct SerializeTupleVariant {
    name: &'static str,
    vec: Vec<Value>,
}

pub struct SerializeStructVariant {
    name: &'static str,
    map: Map,
}

fn single_entry(key: &str, value: Value) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(key.to_string(), value);
    Value::Object(map)
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(i64::try_from(v)
            .map(Value::Int)
            .unwrap_or(Value::Float(v as f64)))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Float(v as f64))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::Str(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::Str(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Array(v.iter().map(|&b| Value::Int(b as i64)).collect()))
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

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::Str(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(single_entry(variant, to_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            name: variant,
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap {
            map: Map::with_capacity(len.unwrap_or(0)),
            current_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            name: variant,
            map: Map::with_capacity(len),
        })
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(single_entry(self.name, Value::Array(self.vec)))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = match to_value(key)? {
            Value::Str(s) => s,
            Value::Int(i) => i.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(Error::custom(format!(
                    "map keys must be strings, found {}",
                    other.kind()
                )))
            }
        };
        self.current_key = Some(key);
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
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(single_entry(self.name, Value::Object(self.map)))
    }
}

/// Converts any `T: Serialize` into a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_colson::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: f64 }
///
/// let value = to_value(&Point { x: 1, y: 2.0 }).unwrap();
/// assert_eq!(value["x"], Value::Int(1));
/// assert_eq!(value["y"], Value::Float(2.0));
/// ```
///
/// # Errors
///
/// Fails for map keys that are not strings, integers or booleans, or when the type's
/// `Serialize` impl reports an error.
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}
