//! Error types for ColSON parsing and serialization.
//!
//! Errors fall into a small number of categories:
//!
//! - **Syntax errors**: the input text does not follow the grammar. These always carry the
//!   1-based line and column of the offending token.
//! - **Encoding errors**: a [`Value`](crate::Value) cannot be written, e.g. a non-finite float
//!   under [`NonFinitePolicy::Error`](crate::NonFinitePolicy::Error).
//! - **Resource errors**: the input exceeds a configured bound.
//! - **I/O errors**: reader/writer adapters failed.
//!
//! Parsing halts at the first error, so a tree is only ever returned for fully valid input.
//!
//! ## Examples
//!
//! ```rust
//! use serde_colson::parse;
//!
//! let err = parse("{\"a\": }").unwrap_err();
//! assert!(err.is_syntax());
//! assert_eq!(err.line(), Some(1));
//! assert_eq!(err.column(), Some(7));
//! ```

use crate::lexer::Position;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while reading or writing ColSON.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Input text does not conform to the grammar.
    #[error("{msg} at line {line}, column {column}")]
    Syntax {
        line: usize,
        column: usize,
        msg: String,
    },

    /// A value cannot be represented in the notation.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Input exceeded a configured resource bound.
    #[error("{what} exceeds limit ({len} > {limit})")]
    Resource {
        what: &'static str,
        len: usize,
        limit: usize,
    },

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Message raised through serde
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a syntax error located at `pos`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_colson::{Error, Position};
    ///
    /// let err = Error::syntax(Position::new(10, 3, 5), "unexpected token");
    /// assert_eq!(err.to_string(), "unexpected token at line 3, column 5");
    /// ```
    pub fn syntax(pos: Position, msg: impl Into<String>) -> Self {
        Error::Syntax {
            line: pos.line,
            column: pos.column,
            msg: msg.into(),
        }
    }

    /// Creates an encoding error.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Error::Encoding(msg.into())
    }

    /// Creates a resource error for a bound named `what`.
    pub fn resource(what: &'static str, len: usize, limit: usize) -> Self {
        Error::Resource { what, len, limit }
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(err: &std::io::Error) -> Self {
        Error::Io(err.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_colson::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert_eq!(err.to_string(), "something went wrong");
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    /// The 1-based line of a syntax error.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Syntax { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// The 1-based column of a syntax error.
    #[must_use]
    pub fn column(&self) -> Option<usize> {
        match self {
            Error::Syntax { column, .. } => Some(*column),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax { .. })
    }

    #[must_use]
    pub fn is_encoding(&self) -> bool {
        matches!(self, Error::Encoding(_))
    }

    #[must_use]
    pub fn is_resource(&self) -> bool {
        matches!(self, Error::Resource { .. })
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_display() {
        let err = Error::syntax(Position::new(0, 2, 4), "nesting too deep");
        assert_eq!(err.to_string(), "nesting too deep at line 2, column 4");
        assert_eq!(err.line(), Some(2));
        assert_eq!(err.column(), Some(4));
        assert!(err.is_syntax());
    }

    #[test]
    fn test_resource_display() {
        let err = Error::resource("input length", 20, 10);
        assert_eq!(err.to_string(), "input length exceeds limit (20 > 10)");
        assert!(err.is_resource());
        assert_eq!(err.line(), None);
    }

    #[test]
    fn test_encoding_display() {
        let err = Error::encoding("non-finite number");
        assert_eq!(err.to_string(), "encoding error: non-finite number");
        assert!(err.is_encoding());
    }
}
