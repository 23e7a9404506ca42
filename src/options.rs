//! Configuration options for ColSON parsing and serialization.
//!
//! This module provides:
//!
//! - [`SerializeOptions`]: controls the text produced by the writer
//! - [`NonFinitePolicy`]: what to do with `NaN` and infinities
//! - [`ParseOptions`]: grammar extensions and resource bounds for the parser
//! - [`OutlineOptions`]: indentation and limits for the outline dialect
//!
//! ## Examples
//!
//! ```rust
//! use serde_colson::{parse_with_options, serialize, ParseOptions, SerializeOptions, Value};
//!
//! let value = parse_with_options("{b: 1, a: [2, 3,],}", &ParseOptions::relaxed()).unwrap();
//!
//! let options = SerializeOptions::new().with_sort_keys(true);
//! assert_eq!(serialize(&value, &options).unwrap(), r#"{"a":[2,3],"b":1}"#);
//! ```

/// Handling of floats that have no literal in the notation.
///
/// # Examples
///
/// ```rust
/// use serde_colson::{serialize, NonFinitePolicy, SerializeOptions, Value};
///
/// let nan = Value::Float(f64::NAN);
/// assert!(serialize(&nan, &SerializeOptions::new()).is_err());
///
/// let options = SerializeOptions::new().with_non_finite(NonFinitePolicy::Nullify);
/// assert_eq!(serialize(&nan, &options).unwrap(), "null");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NonFinitePolicy {
    /// Fail with an encoding error.
    #[default]
    Error,
    /// Write `null` in place of the number.
    Nullify,
}

/// Configuration options for the writer.
///
/// # Examples
///
/// ```rust
/// use serde_colson::SerializeOptions;
///
/// // Compact, insertion-ordered output
/// let options = SerializeOptions::new();
/// assert_eq!(options.indent, None);
///
/// // Pretty-printed with 2-space indentation
/// let options = SerializeOptions::pretty();
/// assert_eq!(options.indent, Some(2));
///
/// let options = SerializeOptions::new()
///     .with_indent(4)
///     .with_sort_keys(true)
///     .with_escape_non_ascii(true);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SerializeOptions {
    /// `None` writes compact text; `Some(n)` writes one element per line with `n` spaces
    /// per nesting level.
    pub indent: Option<usize>,
    /// Emit object keys in lexicographic order instead of insertion order.
    pub sort_keys: bool,
    pub non_finite: NonFinitePolicy,
    /// Escape every non-ASCII character as `\uXXXX`.
    pub escape_non_ascii: bool,
}

impl SerializeOptions {
    /// Creates default options (compact, insertion order, non-finite numbers rejected).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Same as [`SerializeOptions::new`].
    #[must_use]
    pub fn compact() -> Self {
        Self::default()
    }

    /// Creates options for pretty-printed output with 2-space indentation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_colson::{serialize, colson, SerializeOptions};
    ///
    /// let value = colson!({"a": [1, 2]});
    /// let text = serialize(&value, &SerializeOptions::pretty()).unwrap();
    /// assert_eq!(text, "{\n  \"a\": [\n    1,\n    2\n  ]\n}");
    /// ```
    #[must_use]
    pub fn pretty() -> Self {
        SerializeOptions {
            indent: Some(2),
            ..Default::default()
        }
    }

    /// Sets the number of spaces per nesting level and switches to pretty output.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = Some(indent);
        self
    }

    /// Switches back to compact output.
    #[must_use]
    pub fn without_indent(mut self) -> Self {
        self.indent = None;
        self
    }

    #[must_use]
    pub fn with_sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }

    #[must_use]
    pub fn with_non_finite(mut self, policy: NonFinitePolicy) -> Self {
        self.non_finite = policy;
        self
    }

    #[must_use]
    pub fn with_escape_non_ascii(mut self, escape: bool) -> Self {
        self.escape_non_ascii = escape;
        self
    }
}

/// Default maximum nesting depth accepted by the parser.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Grammar extensions and resource bounds for the parser.
///
/// The default is the strict grammar: no comments, no trailing commas, quoted keys only.
/// Each extension can be enabled separately, or all at once with [`ParseOptions::relaxed`].
///
/// # Examples
///
/// ```rust
/// use serde_colson::{parse_with_options, ParseOptions};
///
/// let options = ParseOptions::new().with_max_depth(2);
/// assert!(parse_with_options("[[1]]", &options).is_ok());
/// assert!(parse_with_options("[[[1]]]", &options).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting depth of arrays and objects.
    ///
    /// The parser recurses once per level. The default fits a 2 MiB thread stack in debug
    /// builds with room to spare; limits in the thousands need a larger stack (see
    /// [`std::thread::Builder::stack_size`]), budgeting a few kilobytes per level in debug
    /// builds and a few hundred bytes in release builds.
    pub max_depth: usize,
    /// Maximum input length in bytes.
    pub max_input_len: Option<usize>,
    /// Maximum decoded length of a single string, in bytes.
    pub max_string_len: Option<usize>,
    /// Accept `// line` and `/* block */` comments between tokens.
    pub allow_comments: bool,
    /// Accept a `,` directly before `]` or `}`.
    pub allow_trailing_commas: bool,
    /// Accept identifiers as object keys.
    pub allow_bare_keys: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_len: None,
            max_string_len: None,
            allow_comments: false,
            allow_trailing_commas: false,
            allow_bare_keys: false,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Same as [`ParseOptions::new`].
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
    }

    /// Enables comments, trailing commas and bare keys.
    #[must_use]
    pub fn relaxed() -> Self {
        ParseOptions {
            allow_comments: true,
            allow_trailing_commas: true,
            allow_bare_keys: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_max_input_len(mut self, limit: usize) -> Self {
        self.max_input_len = Some(limit);
        self
    }

    #[must_use]
    pub fn with_max_string_len(mut self, limit: usize) -> Self {
        self.max_string_len = Some(limit);
        self
    }

    #[must_use]
    pub fn with_comments(mut self, allow: bool) -> Self {
        self.allow_comments = allow;
        self
    }

    #[must_use]
    pub fn with_trailing_commas(mut self, allow: bool) -> Self {
        self.allow_trailing_commas = allow;
        self
    }

    #[must_use]
    pub fn with_bare_keys(mut self, allow: bool) -> Self {
        self.allow_bare_keys = allow;
        self
    }
}

/// Settings for the line-oriented [`outline`](crate::outline) dialect.
///
/// `tab` is the number of leading whitespace characters per nesting level and `level` is the
/// level the document starts at, so a block embedded in a larger file can be read and written
/// in place.
///
/// # Examples
///
/// ```rust
/// use serde_colson::{colson, outline, OutlineOptions};
///
/// let options = OutlineOptions::new().with_tab(2).with_level(1);
/// let text = outline::to_string_with_options(&colson!({"a": [1]}), &options).unwrap();
/// assert_eq!(text, "  :::\n    a ::\n      1");
/// assert_eq!(outline::from_str_with_options(&text, &options).unwrap(), colson!({"a": [1]}));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutlineOptions {
    pub tab: usize,
    pub level: usize,
    pub max_depth: usize,
    pub non_finite: NonFinitePolicy,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        OutlineOptions {
            tab: 4,
            level: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            non_finite: NonFinitePolicy::Error,
        }
    }
}

impl OutlineOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation width. A width of zero is treated as one.
    #[must_use]
    pub fn with_tab(mut self, tab: usize) -> Self {
        self.tab = tab.max(1);
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_non_finite(mut self, policy: NonFinitePolicy) -> Self {
        self.non_finite = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_defaults() {
        let options = SerializeOptions::default();
        assert_eq!(options.indent, None);
        assert!(!options.sort_keys);
        assert_eq!(options.non_finite, NonFinitePolicy::Error);
        assert!(!options.escape_non_ascii);
        assert_eq!(options, SerializeOptions::compact());
    }

    #[test]
    fn test_indent_toggle() {
        let options = SerializeOptions::new().with_indent(4);
        assert_eq!(options.indent, Some(4));
        assert_eq!(options.without_indent().indent, None);
    }

    #[test]
    fn test_parse_presets() {
        let strict = ParseOptions::strict();
        assert_eq!(strict.max_depth, DEFAULT_MAX_DEPTH);
        assert!(!strict.allow_comments && !strict.allow_trailing_commas && !strict.allow_bare_keys);

        let relaxed = ParseOptions::relaxed();
        assert!(relaxed.allow_comments && relaxed.allow_trailing_commas && relaxed.allow_bare_keys);
        assert_eq!(relaxed.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_outline_defaults() {
        let options = OutlineOptions::default();
        assert_eq!(options.tab, 4);
        assert_eq!(options.level, 0);
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(OutlineOptions::new().with_tab(0).tab, 1);
    }
}
