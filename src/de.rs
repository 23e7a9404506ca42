//! ColSON deserialization.
//!
//! Text is first parsed into a [`Value`] tree by the strict parser, then [`Deserializer`]
//! walks the tree and drives serde visitors. Parsing therefore fails fast with line and
//! column before any user type is touched.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_colson::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { x: i32, y: i32 }
//!
//! let data: Data = from_str(r#"{"x": 1, "y": 2}"#).unwrap();
//! assert_eq!(data, Data { x: 1, y: 2 });
//! ```
//!
//! ## Enums
//!
//! Unit variants are read from strings; other variants from single-key objects.
//!
//! ```rust
//! use serde_colson::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! enum Shape { Empty, Circle(f64) }
//!
//! assert_eq!(from_str::<Shape>(r#""Empty""#).unwrap(), Shape::Empty);
//! assert_eq!(from_str::<Shape>(r#"{"Circle": 1.5}"#).unwrap(), Shape::Circle(1.5));
//! ```

use crate::lexer::Position;
use crate::{parse_with_options, Error, Map, ParseOptions, Result, Value};
use serde::de::{self, DeserializeOwned, IntoDeserializer};
use serde::forward_to_deserialize_any;
use std::io;

/// The ColSON deserializer.
///
/// Owns a parsed [`Value`] and hands it to serde visitors. Created via
/// [`Deserializer::from_str`] or [`Deserializer::new`].
pub struct Deserializer {
    value: Value,
}

impl Deserializer {
    pub fn new(value: Value) -> Self {
        Deserializer { value }
    }

    /// Parses `input` with the strict grammar.
    ///
    /// # Errors
    ///
    /// Returns the parser's syntax or resource error.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str) -> Result<Self> {
        Self::from_str_with_options(input, &ParseOptions::default())
    }

    /// Parses `input` with the given grammar extensions and limits.
    pub fn from_str_with_options(input: &str, options: &ParseOptions) -> Result<Self> {
        parse_with_options(input, options).map(Deserializer::new)
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}

impl<'de> de::Deserializer<'de> for Deserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Int(i) => visitor.visit_i64(i),
            Value::Float(f) => visitor.visit_f64(f),
            Value::Str(s) => visitor.visit_string(s),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Str(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Object(obj) => {
                let len = obj.len();
                match obj.into_iter().next() {
                    Some((variant, value)) if len == 1 => {
                        visitor.visit_enum(EnumDeserializer::new(variant, value))
                    }
                    _ => Err(Error::custom(format!(
                        "expected an object with a single key for enum, found {} keys",
                        len
                    ))),
                }
            }
            other => Err(Error::custom(format!(
                "expected string or object for enum, found {}",
                other.kind()
            ))),
        }
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier
    }
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = Deserializer;

    fn into_deserializer(self) -> Deserializer {
        Deserializer::new(self)
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(Deserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: <Map as IntoIterator>::IntoIter,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(map: Map) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(MapKeyDeserializer { key }).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(Deserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

/// Object keys are always strings; integer and boolean key types parse them back.
struct MapKeyDeserializer {
    key: String,
}

macro_rules! deserialize_parsed_key {
    ($($method:ident => $visit:ident),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                match self.key.parse() {
                    Ok(parsed) => visitor.$visit(parsed),
                    Err(_) => Err(Error::custom(format!(
                        "invalid map key {:?}",
                        self.key
                    ))),
                }
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for MapKeyDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.key)
    }

    deserialize_parsed_key! {
        deserialize_bool => visit_bool,
        deserialize_i8 => visit_i8,
        deserialize_i16 => visit_i16,
        deserialize_i32 => visit_i32,
        deserialize_i64 => visit_i64,
        deserialize_u8 => visit_u8,
        deserialize_u16 => visit_u16,
        deserialize_u32 => visit_u32,
        deserialize_u64 => visit_u64,
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_enum(self.key.into_deserializer())
    }

    forward_to_deserialize_any! {
        i128 u128 f32 f64 char str string bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

struct EnumDeserializer {
    variant: String,
    value: Value,
}

impl EnumDeserializer {
    fn new(variant: String, value: Value) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let name: de::value::StringDeserializer<Error> = self.variant.into_deserializer();
        let variant = seed.deserialize(name)?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Value,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Value::Null => Ok(()),
            other => Err(Error::custom(format!(
                "expected null for unit variant, found {}",
                other.kind()
            ))),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(Deserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            other => Err(Error::custom(format!(
                "expected array for tuple variant, found {}",
                other.kind()
            ))),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
            other => Err(Error::custom(format!(
                "expected object for struct variant, found {}",
                other.kind()
            ))),
        }
    }
}

/// Converts a [`Value`] into any `T: Deserialize`.
///
/// # Examples
///
/// ```rust
/// use serde_colson::{colson, from_value};
///
/// let pair: (String, Vec<u8>) = from_value(colson!(["x", [1, 2]])).unwrap();
/// assert_eq!(pair, ("x".to_string(), vec![1, 2]));
/// ```
///
/// # Errors
///
/// Fails when the tree does not match the shape `T` expects.
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(Deserializer::new(value))
}

/// Parses `s` with the strict grammar and converts the result into `T`.
///
/// # Errors
///
/// Returns a syntax error for malformed text, or a data error when the shape does not match.
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(Deserializer::from_str(s)?)
}

/// Like [`from_str`], but takes UTF-8 bytes.
///
/// # Errors
///
/// Invalid UTF-8 is reported as a syntax error at the first bad byte.
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let text = std::str::from_utf8(v).map_err(|e| {
        let valid = &v[..e.valid_up_to()];
        let line = 1 + valid.iter().filter(|&&b| b == b'\n').count();
        let line_start = valid
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        // `valid` is known-good UTF-8, so the column can count chars.
        let column = 1 + String::from_utf8_lossy(&valid[line_start..]).chars().count();
        Error::syntax(
            Position::new(e.valid_up_to(), line, column),
            "invalid UTF-8 in input",
        )
    })?;
    from_str(text)
}

/// Reads `reader` to the end, then behaves like [`from_slice`].
///
/// # Errors
///
/// Returns an I/O error if reading fails.
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .map_err(|e| Error::io(&e))?;
    from_slice(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::{BTreeMap, HashMap};

    #[derive(Deserialize, Debug, PartialEq)]
    struct Person {
        name: String,
        age: u8,
        email: Option<String>,
        tags: Vec<String>,
    }

    #[test]
    fn test_struct() {
        let person: Person = from_str(
            r#"{"name": "Alice", "age": 30, "email": null, "tags": ["a", "b"]}"#,
        )
        .unwrap();
        assert_eq!(
            person,
            Person {
                name: "Alice".to_string(),
                age: 30,
                email: None,
                tags: vec!["a".to_string(), "b".to_string()],
            }
        );
    }

    #[test]
    fn test_missing_optional_field() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Opt {
            a: i32,
            b: Option<i32>,
        }
        assert_eq!(from_str::<Opt>(r#"{"a": 1}"#).unwrap(), Opt { a: 1, b: None });
        assert_eq!(
            from_str::<Opt>(r#"{"a": 1, "b": 2}"#).unwrap(),
            Opt { a: 1, b: Some(2) }
        );
    }

    #[test]
    fn test_numeric_range_checks() {
        assert!(from_str::<u8>("256").is_err());
        assert!(from_str::<u32>("-1").is_err());
        assert_eq!(from_str::<i16>("-300").unwrap(), -300);
        assert_eq!(from_str::<f64>("3").unwrap(), 3.0);
        assert!(from_str::<i32>("1.5").is_err());
    }

    #[test]
    fn test_enums() {
        #[derive(Deserialize, Debug, PartialEq)]
        enum Op {
            Stop,
            Move(i32),
            Pair(i32, i32),
            Goto { x: i32, y: i32 },
        }

        assert_eq!(from_str::<Op>(r#""Stop""#).unwrap(), Op::Stop);
        assert_eq!(from_str::<Op>(r#"{"Stop": null}"#).unwrap(), Op::Stop);
        assert_eq!(from_str::<Op>(r#"{"Move": 3}"#).unwrap(), Op::Move(3));
        assert_eq!(from_str::<Op>(r#"{"Pair": [1, 2]}"#).unwrap(), Op::Pair(1, 2));
        assert_eq!(
            from_str::<Op>(r#"{"Goto": {"x": 1, "y": 2}}"#).unwrap(),
            Op::Goto { x: 1, y: 2 }
        );
        assert!(from_str::<Op>(r#"{"Move": 1, "Stop": null}"#).is_err());
        assert!(from_str::<Op>("7").is_err());
    }

    #[test]
    fn test_integer_and_bool_keys() {
        let map: BTreeMap<u32, String> = from_str(r#"{"2": "two", "1": "one"}"#).unwrap();
        assert_eq!(map.get(&1).map(String::as_str), Some("one"));
        assert_eq!(map.len(), 2);

        let flags: HashMap<bool, i32> = from_str(r#"{"true": 1, "false": 0}"#).unwrap();
        assert_eq!(flags[&true], 1);

        assert!(from_str::<BTreeMap<u32, i32>>(r#"{"x": 1}"#).is_err());
    }

    #[test]
    fn test_value_passthrough() {
        let value: Value = from_str(r#"{"a": [1, 2.5, "x", null, true]}"#).unwrap();
        assert_eq!(value["a"][1], Value::Float(2.5));
        assert_eq!(from_value::<Value>(value.clone()).unwrap(), value);
    }

    #[test]
    fn test_syntax_errors_surface_unchanged() {
        let err = from_str::<Value>("[1, }").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unexpected token '}', expected a value at line 1, column 5"
        );
    }

    #[test]
    fn test_from_slice_invalid_utf8() {
        let err = from_slice::<Value>(b"[\"ok\",\n \"\xff\"]").unwrap_err();
        assert!(err.is_syntax());
        assert_eq!(err.line(), Some(2));
        assert_eq!(err.column(), Some(3));
    }

    #[test]
    fn test_from_reader() {
        let input = br#"{"x": [true, false]}"#;
        let value: HashMap<String, Vec<bool>> = from_reader(&input[..]).unwrap();
        assert_eq!(value["x"], vec![true, false]);
    }

    #[test]
    fn test_ignored_fields() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Small {
            keep: i32,
        }
        let small: Small = from_str(r#"{"skip": {"deep": [1]}, "keep": 4}"#).unwrap();
        assert_eq!(small, Small { keep: 4 });
    }
}
