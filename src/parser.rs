//! Recursive-descent parser producing [`Value`] trees.
//!
//! One method per grammar production (`value`, `object`, `array`, scalar literals). The
//! parser stops at the first error and never returns a partial tree. Nesting is bounded by
//! [`ParseOptions::max_depth`] so degenerate input cannot exhaust the stack.
//!
//! ```rust
//! use serde_colson::{parse, Value};
//!
//! let value = parse(r#"{"a": [1, 2.5, "x"], "b": null}"#).unwrap();
//! assert_eq!(value["a"][1], Value::Float(2.5));
//! assert!(value["b"].is_null());
//! ```

use crate::lexer::{Lexer, Token, TokenKind};
use crate::{Error, Map, ParseOptions, Result, Value};

/// Parser over a single input string.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    depth: usize,
    max_depth: usize,
    allow_trailing_commas: bool,
    allow_bare_keys: bool,
}

impl<'a> Parser<'a> {
    /// Creates a parser and reads the first token.
    ///
    /// # Errors
    ///
    /// Fails if the input exceeds [`ParseOptions::max_input_len`] or the first token is
    /// malformed.
    pub fn new(input: &'a str, options: &ParseOptions) -> Result<Self> {
        let mut lexer = Lexer::new(input, options)?;
        let current = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current,
            depth: 0,
            max_depth: options.max_depth,
            allow_trailing_commas: options.allow_trailing_commas,
            allow_bare_keys: options.allow_bare_keys,
        })
    }

    /// Parses one complete value and requires the input to end after it.
    pub fn parse(mut self) -> Result<Value> {
        let value = self.parse_value()?;

        if self.current.kind != TokenKind::Eof {
            return Err(Error::syntax(self.current.start, "unexpected trailing data"));
        }

        Ok(value)
    }

    /// Moves to the next token, returning the one just consumed.
    fn advance(&mut self) -> Result<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Moves past punctuation without handing the old token back to the caller.
    fn bump(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn unexpected(&self, expected: &str) -> Error {
        let msg = match self.current.kind {
            TokenKind::Eof => format!("unexpected end of input, expected {}", expected),
            ref kind => format!("unexpected token {}, expected {}", kind.describe(), expected),
        };
        Error::syntax(self.current.start, msg)
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(Error::syntax(self.current.start, "nesting too deep"));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.current.kind {
            TokenKind::LeftBrace => self.parse_object(),
            TokenKind::LeftBracket => self.parse_array(),
            TokenKind::Str(_)
            | TokenKind::Int(_)
            | TokenKind::Float(_)
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Null => self.parse_scalar(),
            _ => Err(self.unexpected("a value")),
        }
    }

    /// Strings, numbers and keywords.
    fn parse_scalar(&mut self) -> Result<Value> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::Str(s) => Ok(Value::Str(s)),
            TokenKind::Int(i) => Ok(Value::Int(i)),
            TokenKind::Float(f) => Ok(Value::Float(f)),
            TokenKind::True => Ok(Value::Bool(true)),
            TokenKind::False => Ok(Value::Bool(false)),
            TokenKind::Null => Ok(Value::Null),
            other => Err(Error::syntax(
                token.start,
                format!("unexpected token {}, expected a value", other.describe()),
            )),
        }
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.enter()?;
        self.bump()?; // '['

        let mut elements = Vec::new();

        if self.current.kind == TokenKind::RightBracket {
            self.bump()?;
            self.leave();
            return Ok(Value::Array(elements));
        }

        loop {
            elements.push(self.parse_value()?);

            match self.current.kind {
                TokenKind::Comma => {
                    self.bump()?;
                    if self.current.kind == TokenKind::RightBracket {
                        if !self.allow_trailing_commas {
                            return Err(Error::syntax(
                                self.current.start,
                                "trailing comma before ']'",
                            ));
                        }
                        self.bump()?;
                        break;
                    }
                }
                TokenKind::RightBracket => {
                    self.bump()?;
                    break;
                }
                _ => return Err(self.unexpected("',' or ']'")),
            }
        }

        self.leave();
        Ok(Value::Array(elements))
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.enter()?;
        self.bump()?; // '{'

        let mut map = Map::new();

        if self.current.kind == TokenKind::RightBrace {
            self.bump()?;
            self.leave();
            return Ok(Value::Object(map));
        }

        loop {
            let key = self.parse_key()?;

            if self.current.kind != TokenKind::Colon {
                return Err(self.unexpected("':'"));
            }
            self.bump()?;

            let value = self.parse_value()?;
            map.insert(key, value);

            match self.current.kind {
                TokenKind::Comma => {
                    self.bump()?;
                    if self.current.kind == TokenKind::RightBrace {
                        if !self.allow_trailing_commas {
                            return Err(Error::syntax(
                                self.current.start,
                                "trailing comma before '}'",
                            ));
                        }
                        self.bump()?;
                        break;
                    }
                }
                TokenKind::RightBrace => {
                    self.bump()?;
                    break;
                }
                _ => return Err(self.unexpected("',' or '}'")),
            }
        }

        self.leave();
        Ok(Value::Object(map))
    }

    fn parse_key(&mut self) -> Result<String> {
        let accepted = match self.current.kind {
            TokenKind::Str(_) => true,
            TokenKind::Ident(_) | TokenKind::True | TokenKind::False | TokenKind::Null => {
                self.allow_bare_keys
            }
            _ => false,
        };
        if !accepted {
            return Err(self.unexpected("an object key"));
        }

        let token = self.advance()?;
        match token.kind {
            TokenKind::Str(key) | TokenKind::Ident(key) => Ok(key),
            other => Ok(other.keyword().unwrap_or_default().to_string()),
        }
    }
}

/// Parses `input` with the strict grammar and default limits.
///
/// # Errors
///
/// Returns a syntax error with line and column for any grammar violation.
pub fn parse(input: &str) -> Result<Value> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parses `input` with the given grammar extensions and limits.
///
/// # Examples
///
/// ```rust
/// use serde_colson::{parse_with_options, ParseOptions};
///
/// let text = "{\n  // comment\n  name: \"x\",\n}";
/// assert!(parse_with_options(text, &ParseOptions::strict()).is_err());
/// assert!(parse_with_options(text, &ParseOptions::relaxed()).is_ok());
/// ```
///
/// # Errors
///
/// Returns a syntax error for grammar violations and a resource error when a limit is
/// exceeded.
pub fn parse_with_options(input: &str, options: &ParseOptions) -> Result<Value> {
    Parser::new(input, options)?.parse()
}
