//! ColSON Notation Grammar
//!
//! This module documents the text notation accepted by [`parse`](crate::parse) and produced
//! by [`serialize`](crate::serialize).
//!
//! # Overview
//!
//! The notation is a JSON-like text format: objects, arrays, strings, numbers, booleans and
//! null. The default grammar is strict; a few extensions can be switched on through
//! [`ParseOptions`](crate::ParseOptions).
//!
//! # Grammar
//!
//! ```text
//! document = ws value ws EOF
//! value    = object | array | string | number | "true" | "false" | "null"
//! object   = "{" ws [ member ( ws "," ws member )* ] ws "}"
//! member   = string ws ":" ws value
//! array    = "[" ws [ value ( ws "," ws value )* ] ws "]"
//! ws       = ( " " | "\t" | "\n" | "\r" )*
//! ```
//!
//! ## Strings
//!
//! Double-quoted. Inside a string:
//!
//! | Escape | Meaning |
//! |--------|---------|
//! | `\"` `\\` `\/` | the character itself |
//! | `\b` `\f` `\n` `\r` `\t` | backspace, form feed, newline, carriage return, tab |
//! | `\uXXXX` | a UTF-16 code unit; surrogate pairs combine into one character |
//!
//! Raw control characters (below `0x20`) are rejected, as are unknown escapes and unpaired
//! surrogates.
//!
//! ## Numbers
//!
//! ```text
//! number = "-"? ( "0" | [1-9] [0-9]* ) ( "." [0-9]+ )? ( [eE] [+-]? [0-9]+ )?
//! ```
//!
//! - No fraction and no exponent, and the value fits in 64 bits: `Int`.
//! - Otherwise: `Float`, including integer literals too large for `i64`.
//! - Leading zeros (`01`), a bare `-`, a trailing `.` and `+1` are rejected.
//! - Literals whose magnitude overflows `f64` are rejected ("number out of range").
//!
//! ## Keywords
//!
//! `true`, `false` and `null`, case-sensitive. Any other identifier in value position is a
//! syntax error.
//!
//! ## Objects
//!
//! Keys are strings. A repeated key keeps its first position and takes the last value:
//!
//! ```rust
//! use serde_colson::parse;
//!
//! let value = parse(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
//! assert_eq!(value.to_string(), r#"{"a":3,"b":2}"#);
//! ```
//!
//! # Extensions
//!
//! Off by default, enabled individually or all together with
//! [`ParseOptions::relaxed`](crate::ParseOptions::relaxed):
//!
//! | Option | Accepts |
//! |--------|---------|
//! | `allow_comments` | `// line` and `/* block */` comments wherever whitespace may appear |
//! | `allow_trailing_commas` | one comma before `]` or `}` |
//! | `allow_bare_keys` | object keys written as identifiers `[A-Za-z_$][A-Za-z0-9_$]*` |
//!
//! ```rust
//! use serde_colson::{parse_with_options, ParseOptions};
//!
//! let text = "{ /* size */ width: 3, height: 4, }";
//! let value = parse_with_options(text, &ParseOptions::relaxed()).unwrap();
//! assert_eq!(value.to_string(), r#"{"width":3,"height":4}"#);
//! ```
//!
//! # Limits
//!
//! | Bound | Default | Failure |
//! |-------|---------|---------|
//! | `max_depth` | 128 | syntax error "nesting too deep" at the opening delimiter |
//! | `max_input_len` | none | resource error "input length" |
//! | `max_string_len` | none | resource error "string length" |
//!
//! # Errors
//!
//! Syntax errors read `"{message} at line {line}, column {column}"`. Lines and columns are
//! 1-based; columns count characters, and a newline ends a line.
//!
//! | Input | Message |
//! |-------|---------|
//! | `{"a": }` | `unexpected token '}', expected a value at line 1, column 7` |
//! | `[1 2]` | `unexpected token number, expected ',' or ']' at line 1, column 4` |
//! | `1 2` | `unexpected trailing data at line 1, column 3` |
//! | `"abc` | `unterminated string at line 1, column 1` |
//! | (empty) | `unexpected end of input, expected a value at line 1, column 1` |
//!
//! # Output
//!
//! - Compact output has no whitespace between tokens.
//! - Pretty output (`indent: Some(n)`) puts each element on its own line, indented by `n`
//!   spaces per level, with `": "` between key and value. Empty containers stay `[]` and `{}`.
//! - Floats always carry a `.` or an exponent, so `Int(1)` and `Float(1.0)` stay distinct
//!   across a round trip.
//! - `NaN` and infinities have no literal; they fail or become `null` depending on
//!   [`NonFinitePolicy`](crate::NonFinitePolicy).
//!
//! ```rust
//! use serde_colson::{parse, serialize, SerializeOptions, Value};
//!
//! let text = serialize(&Value::Float(1.0), &SerializeOptions::new()).unwrap();
//! assert_eq!(text, "1.0");
//! assert_eq!(parse(&text).unwrap(), Value::Float(1.0));
//! ```
//!
//! # Outline dialect
//!
//! The [`outline`](crate::outline) module reads and writes the indentation-based form of the
//! same data model; see its documentation for the line syntax.
