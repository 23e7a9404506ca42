//! Tokenizer for ColSON text.
//!
//! Turns the input into a lazy sequence of [`Token`]s: punctuation, keywords, identifiers,
//! decoded strings and numbers. Every token records the [`Position`] of its first character
//! so the parser can report errors precisely.

use crate::options::ParseOptions;
use crate::{Error, Result};
use std::fmt;

/// A location in the input text.
///
/// `offset` is a byte offset; `line` and `column` are 1-based, with columns counted in
/// characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(offset: usize, line: usize, column: usize) -> Self {
        Position {
            offset,
            line,
            column,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new(0, 1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Colon,
    Comma,
    True,
    False,
    Null,
    Str(String),
    Int(i64),
    Float(f64),
    Ident(String),
    Eof,
}

impl TokenKind {
    /// Human-readable name used in error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            TokenKind::LeftBrace => "'{'".to_string(),
            TokenKind::RightBrace => "'}'".to_string(),
            TokenKind::LeftBracket => "'['".to_string(),
            TokenKind::RightBracket => "']'".to_string(),
            TokenKind::Colon => "':'".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::True => "'true'".to_string(),
            TokenKind::False => "'false'".to_string(),
            TokenKind::Null => "'null'".to_string(),
            TokenKind::Str(_) => "string".to_string(),
            TokenKind::Int(_) | TokenKind::Float(_) => "number".to_string(),
            TokenKind::Ident(name) => format!("identifier '{}'", name),
            TokenKind::Eof => "end of input".to_string(),
        }
    }

    pub(crate) fn keyword(&self) -> Option<&'static str> {
        match self {
            TokenKind::True => Some("true"),
            TokenKind::False => Some("false"),
            TokenKind::Null => Some("null"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub start: Position,
}

pub(crate) struct Lexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
    allow_comments: bool,
    max_string_len: Option<usize>,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(input: &'a str, options: &ParseOptions) -> Result<Self> {
        if let Some(limit) = options.max_input_len {
            if input.len() > limit {
                return Err(Error::resource("input length", input.len(), limit));
            }
        }

        Ok(Lexer {
            input,
            position: 0,
            line: 1,
            column: 1,
            allow_comments: options.allow_comments,
            max_string_len: options.max_string_len,
            finished: false,
        })
    }

    pub(crate) fn current_position(&self) -> Position {
        Position::new(self.position, self.line, self.column)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Skips whitespace and, when enabled, comments.
    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            match self.peek_char() {
                Some(' ' | '\t' | '\n' | '\r') => {
                    self.next_char();
                }
                Some('/') if self.allow_comments && self.rest().starts_with("//") => {
                    while let Some(ch) = self.next_char() {
                        if ch == '\n' {
                            break;
                        }
                    }
                }
                Some('/') if self.allow_comments && self.rest().starts_with("/*") => {
                    let start = self.current_position();
                    self.next_char();
                    self.next_char();
                    loop {
                        if self.rest().starts_with("*/") {
                            self.next_char();
                            self.next_char();
                            break;
                        }
                        if self.next_char().is_none() {
                            return Err(Error::syntax(start, "unterminated block comment"));
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// Reads the next token. After end of input, keeps returning `Eof`.
    pub(crate) fn next_token(&mut self) -> Result<Token> {
        self.skip_trivia()?;
        let start = self.current_position();

        let kind = match self.peek_char() {
            None => TokenKind::Eof,
            Some(ch) => match ch {
                '{' | '}' | '[' | ']' | ':' | ',' => {
                    self.next_char();
                    match ch {
                        '{' => TokenKind::LeftBrace,
                        '}' => TokenKind::RightBrace,
                        '[' => TokenKind::LeftBracket,
                        ']' => TokenKind::RightBracket,
                        ':' => TokenKind::Colon,
                        _ => TokenKind::Comma,
                    }
                }
                '"' => self.read_string(start)?,
                '-' | '0'..='9' => self.read_number(start)?,
                c if is_ident_start(c) => self.read_identifier(),
                other => {
                    return Err(Error::syntax(
                        start,
                        format!("unexpected character '{}'", other.escape_debug()),
                    ))
                }
            },
        };

        Ok(Token { kind, start })
    }

    fn read_identifier(&mut self) -> TokenKind {
        let begin = self.position;
        while let Some(ch) = self.peek_char() {
            if is_ident_continue(ch) {
                self.next_char();
            } else {
                break;
            }
        }

        match &self.input[begin..self.position] {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            name => TokenKind::Ident(name.to_string()),
        }
    }

    fn read_string(&mut self, start: Position) -> Result<TokenKind> {
        self.next_char(); // opening quote
        let mut result = String::new();

        loop {
            let here = self.current_position();
            match self.next_char() {
                None => return Err(Error::syntax(start, "unterminated string")),
                Some('"') => break,
                Some('\\') => {
                    let ch = self.read_escape(here)?;
                    result.push(ch);
                }
                Some(ch) if (ch as u32) < 0x20 => {
                    return Err(Error::syntax(
                        here,
                        format!("control character {:?} in string", ch),
                    ));
                }
                Some(ch) => result.push(ch),
            }

            if let Some(limit) = self.max_string_len {
                if result.len() > limit {
                    return Err(Error::resource("string length", result.len(), limit));
                }
            }
        }

        Ok(TokenKind::Str(result))
    }

    /// Decodes the escape following a backslash located at `at`.
    fn read_escape(&mut self, at: Position) -> Result<char> {
        match self.next_char() {
            Some('"') => Ok('"'),
            Some('\\') => Ok('\\'),
            Some('/') => Ok('/'),
            Some('b') => Ok('\u{0008}'),
            Some('f') => Ok('\u{000C}'),
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('t') => Ok('\t'),
            Some('u') => self.read_unicode_escape(at),
            Some(other) => Err(Error::syntax(
                at,
                format!("invalid escape sequence '\\{}'", other.escape_debug()),
            )),
            None => Err(Error::syntax(at, "unterminated string")),
        }
    }

    fn read_hex4(&mut self, at: Position) -> Result<u32> {
        let mut code = 0;
        for _ in 0..4 {
            let digit = self
                .peek_char()
                .and_then(|ch| ch.to_digit(16))
                .ok_or_else(|| {
                    Error::syntax(at, "invalid unicode escape (expected 4 hex digits)")
                })?;
            self.next_char();
            code = code * 16 + digit;
        }
        Ok(code)
    }

    fn read_unicode_escape(&mut self, at: Position) -> Result<char> {
        let first = self.read_hex4(at)?;

        let code = match first {
            0xD800..=0xDBFF => {
                if !self.rest().starts_with("\\u") {
                    return Err(Error::syntax(at, "unpaired surrogate in unicode escape"));
                }
                let low_at = self.current_position();
                self.next_char();
                self.next_char();
                let second = self.read_hex4(low_at)?;
                if !(0xDC00..=0xDFFF).contains(&second) {
                    return Err(Error::syntax(at, "unpaired surrogate in unicode escape"));
                }
                0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return Err(Error::syntax(at, "unpaired surrogate in unicode escape"));
            }
            _ => first,
        };

        char::from_u32(code).ok_or_else(|| Error::syntax(at, "invalid unicode code point"))
    }

    fn eat_digits(&mut self) -> bool {
        let mut any = false;
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_digit() {
                self.next_char();
                any = true;
            } else {
                break;
            }
        }
        any
    }

    fn read_number(&mut self, start: Position) -> Result<TokenKind> {
        let begin = self.position;
        let mut is_float = false;

        if self.peek_char() == Some('-') {
            self.next_char();
        }

        match self.peek_char() {
            Some('0') => {
                self.next_char();
                if matches!(self.peek_char(), Some(ch) if ch.is_ascii_digit()) {
                    return Err(Error::syntax(start, "leading zeros are not allowed"));
                }
            }
            Some('1'..='9') => {
                self.eat_digits();
            }
            _ => return Err(Error::syntax(self.current_position(), "expected digit after '-'")),
        }

        if self.peek_char() == Some('.') {
            is_float = true;
            self.next_char();
            if !self.eat_digits() {
                return Err(Error::syntax(
                    self.current_position(),
                    "expected digit after decimal point",
                ));
            }
        }

        if matches!(self.peek_char(), Some('e' | 'E')) {
            is_float = true;
            self.next_char();
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.next_char();
            }
            if !self.eat_digits() {
                return Err(Error::syntax(self.current_position(), "expected digit in exponent"));
            }
        }

        let text = &self.input[begin..self.position];
        if !is_float {
            if let Ok(i) = text.parse::<i64>() {
                return Ok(TokenKind::Int(i));
            }
        }

        let f = text
            .parse::<f64>()
            .map_err(|_| Error::syntax(start, "invalid number"))?;
        if !f.is_finite() {
            return Err(Error::syntax(start, "number out of range"));
        }
        Ok(TokenKind::Float(f))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        self.finished = match &token {
            Ok(t) => t.kind == TokenKind::Eof,
            Err(_) => true,
        };
        Some(token)
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

fn is_ident_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}
