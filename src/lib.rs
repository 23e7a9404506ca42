//! # serde_colson
//!
//! A Serde-compatible library for ColSON, a JSON-like text notation.
//!
//! ## What is in the crate?
//!
//! - **Notation codec**: a tokenizer and recursive-descent parser that turn text into a
//!   [`Value`] tree, and a writer that turns the tree back into canonical text.
//! - **Value model**: seven cases (`Null`, `Bool`, `Int`, `Float`, `Str`, `Array`, `Object`)
//!   with insertion-ordered objects. Integers and floats are kept apart in both directions.
//! - **Serde adapter**: `#[derive(Serialize, Deserialize)]` types go through the same model.
//! - **Outline dialect**: an indentation-based line format over the same model, see
//!   [`outline`].
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! serde_colson = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Parsing and writing values
//!
//! ```rust
//! use serde_colson::{parse, serialize, SerializeOptions, Value};
//!
//! let value = parse(r#"{"id": 7, "ratio": 0.5, "tags": ["a", "b"]}"#).unwrap();
//! assert_eq!(value["id"], Value::Int(7));
//! assert_eq!(value["ratio"], Value::Float(0.5));
//!
//! let text = serialize(&value, &SerializeOptions::new()).unwrap();
//! assert_eq!(text, r#"{"id":7,"ratio":0.5,"tags":["a","b"]}"#);
//! ```
//!
//! ### Typed data
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_colson::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User { id: 123, name: "Alice".to_string(), active: true };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, r#"{"id":123,"name":"Alice","active":true}"#);
//!
//! let user_back: User = from_str(&text).unwrap();
//! assert_eq!(user, user_back);
//! ```
//!
//! ### Errors
//!
//! Parsing stops at the first problem and reports where it is:
//!
//! ```rust
//! use serde_colson::parse;
//!
//! let err = parse("[1, 2,]").unwrap_err();
//! assert_eq!(err.to_string(), "trailing comma before ']' at line 1, column 7");
//! ```
//!
//! ### Dynamic values with the `colson!` macro
//!
//! ```rust
//! use serde_colson::{colson, Value};
//!
//! let data = colson!({
//!     "name": "Alice",
//!     "age": 30,
//!     "tags": ["rust", "serde"]
//! });
//!
//! if let Value::Object(obj) = &data {
//!     assert_eq!(obj.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! }
//! ```
//!
//! ## Guarantees
//!
//! - No `unsafe` code.
//! - No global state; every operation is a pure function of its inputs.
//! - Nesting depth is bounded on input, so hostile documents cannot overflow the stack.
//! - `parse(serialize(v)) == v` for every tree without non-finite floats.
//!
//! The accepted grammar is described in [`grammar`].

pub mod de;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod macros;
pub mod map;
pub mod options;
pub mod outline;
pub mod parser;
pub mod ser;
pub mod value;

pub use de::{from_reader, from_slice, from_str, from_value, Deserializer};
pub use error::{Error, Result};
pub use lexer::Position;
pub use map::Map;
pub use options::{NonFinitePolicy, OutlineOptions, ParseOptions, SerializeOptions};
pub use parser::{parse, parse_with_options, Parser};
pub use ser::{serialize, serialize_to_writer, to_value, Serializer, ValueSerializer};
pub use value::Value;

use serde::Serialize;
use std::io;

/// Serialize any `T: Serialize` to compact notation text.
///
/// # Examples
///
/// ```rust
/// use serde_colson::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: f64 }
///
/// assert_eq!(to_string(&Point { x: 1, y: 2.0 }).unwrap(), r#"{"x":1,"y":2.0}"#);
/// ```
///
/// # Errors
///
/// Returns an error for non-finite floats or map keys that are not strings.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &SerializeOptions::default())
}

/// Serialize any `T: Serialize` to indented notation text.
///
/// # Examples
///
/// ```rust
/// use serde_colson::to_string_pretty;
///
/// let text = to_string_pretty(&vec![1, 2]).unwrap();
/// assert_eq!(text, "[\n  1,\n  2\n]");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &SerializeOptions::pretty())
}

/// Serialize any `T: Serialize` to notation text with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_colson::{to_string_with_options, SerializeOptions};
/// use std::collections::HashMap;
///
/// let mut map = HashMap::new();
/// map.insert("b", 2);
/// map.insert("a", 1);
///
/// let options = SerializeOptions::new().with_sort_keys(true);
/// assert_eq!(to_string_with_options(&map, &options).unwrap(), r#"{"a":1,"b":2}"#);
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &SerializeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    serialize(&to_value(value)?, options)
}

/// Serialize any `T: Serialize` as compact notation text into a writer.
///
/// # Examples
///
/// ```rust
/// use serde_colson::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &("a", 1)).unwrap();
/// assert_eq!(buffer, br#"["a",1]"#);
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &SerializeOptions::default())
}

/// Serialize any `T: Serialize` into a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(writer: W, value: &T, options: &SerializeOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    serialize_to_writer(writer, &to_value(value)?, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
        score: Option<f64>,
    }

    fn user() -> User {
        User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
            score: Some(9.5),
        }
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: -2 };
        let text = to_string(&point).unwrap();
        assert_eq!(text, r#"{"x":1,"y":-2}"#);
        let point_back: Point = from_str(&text).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let text = to_string(&user()).unwrap();
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user(), user_back);
    }

    #[test]
    fn test_pretty_printing() {
        let text = to_string_pretty(&user()).unwrap();
        assert!(text.contains("\n  \"tags\": [\n    \"admin\",\n"));
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user(), user_back);
    }

    #[test]
    fn test_to_value() {
        let value = to_value(&Point { x: 1, y: 2 }).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("x"), Some(&Value::Int(1)));
        assert_eq!(obj.get("y"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_arrays() {
        let numbers = vec![1, 2, 3, 4, 5];
        let text = to_string(&numbers).unwrap();
        assert_eq!(text, "[1,2,3,4,5]");
        let numbers_back: Vec<i32> = from_str(&text).unwrap();
        assert_eq!(numbers, numbers_back);
    }

    #[test]
    fn test_non_finite_through_serde() {
        assert!(to_string(&f64::NAN).unwrap_err().is_encoding());
        let options = SerializeOptions::new().with_non_finite(NonFinitePolicy::Nullify);
        assert_eq!(
            to_string_with_options(&vec![1.0, f64::INFINITY], &options).unwrap(),
            "[1.0,null]"
        );
    }

    #[test]
    fn test_writer_round_trip() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &user()).unwrap();
        let user_back: User = from_reader(buffer.as_slice()).unwrap();
        assert_eq!(user(), user_back);
    }
}
