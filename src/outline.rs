//! The line-oriented outline dialect.
//!
//! Every line holds one node and indentation gives the nesting:
//!
//! ```text
//! :: a comment
//! :::
//!     name :: Alice
//!     admin :: True
//!     note :: \ padded \
//!     scores ::
//!         1
//!         2.5
//!         None
//! ```
//!
//! - `:::` opens an object and `::` opens an array; `key :::` and `key ::` do the same inside an
//!   object.
//! - `key :: value` adds a scalar to an object; a bare scalar line adds to an array.
//! - Scalars are `True`, `False`, `None`, numbers, `\verbatim\` strings, or any other text
//!   (trimmed).
//! - A line starting with `::` followed by text is a comment; `::` directly followed by more
//!   colons is not.
//! - Keys may contain `::`; the separator is the last one that leaves a well-formed key and
//!   value.
//!
//! ```rust
//! use serde_colson::{outline, Value};
//!
//! let value = outline::from_str(":::\n    a :: 1\n    b ::\n        x\n").unwrap();
//! assert_eq!(value.to_string(), r#"{"a":1,"b":["x"]}"#);
//! assert_eq!(outline::to_string(&value).unwrap(), ":::\n    a :: 1\n    b ::\n        x");
//! ```

use crate::lexer::Position;
use crate::ser::format_float;
use crate::{Error, Map, NonFinitePolicy, Result, Value};

pub use crate::options::OutlineOptions;

const OBJECT_MARK: &str = ":::";
const ARRAY_MARK: &str = "::";

/// What a single non-blank line declares.
#[derive(Debug, PartialEq)]
enum Node {
    Object,
    Array,
    Scalar(Value),
}

#[derive(Debug, PartialEq)]
enum Line<'a> {
    Skip,
    Entry { key: Option<&'a str>, node: Node },
}

/// An open node waiting for its children.
struct Frame {
    level: usize,
    key: Option<String>,
    value: Value,
}

/// Reads an outline document with default options.
///
/// # Errors
///
/// Returns a syntax error with line and column for malformed structure.
pub fn from_str(input: &str) -> Result<Value> {
    from_str_with_options(input, &OutlineOptions::default())
}

/// Reads an outline document.
///
/// # Errors
///
/// Returns a syntax error for empty input, misplaced or over-indented lines, a second root,
/// or nesting beyond [`OutlineOptions::max_depth`].
pub fn from_str_with_options(input: &str, options: &OutlineOptions) -> Result<Value> {
    let tab = options.tab.max(1);
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<Value> = None;
    let mut offset = 0;

    for (index, raw) in input.split('\n').enumerate() {
        let line_offset = offset;
        offset += raw.len() + 1;

        let text = raw.strip_suffix('\r').unwrap_or(raw);
        let content = text.trim_start();
        let indent_bytes = text.len() - content.len();
        let indent = text[..indent_bytes].chars().count();
        let pos = Position::new(line_offset + indent_bytes, index + 1, indent + 1);

        let (key, node) = match classify(content.trim_end(), pos)? {
            Line::Skip => continue,
            Line::Entry { key, node } => (key, node),
        };

        let level = (indent / tab)
            .checked_sub(options.level)
            .ok_or_else(|| Error::syntax(pos, "line is indented less than the base level"))?;

        while stack.last().map_or(false, |frame| frame.level >= level) {
            close(&mut stack, &mut root);
        }

        match stack.last() {
            None => {
                if root.is_some() {
                    return Err(Error::syntax(pos, "multiple root values"));
                }
                if level > 0 {
                    return Err(Error::syntax(pos, "line is indented too far"));
                }
                if key.is_some() {
                    return Err(Error::syntax(pos, "keyed entry needs a parent object"));
                }
            }
            Some(parent) => {
                if level > parent.level + 1 {
                    return Err(Error::syntax(pos, "line is indented too far"));
                }
                match (&parent.value, key) {
                    (Value::Object(_), Some(_)) | (Value::Array(_), None) => {}
                    (Value::Object(_), None) => {
                        return Err(Error::syntax(pos, "object entries need a key"));
                    }
                    (Value::Array(_), Some(_)) => {
                        return Err(Error::syntax(pos, "keyed entry needs a parent object"));
                    }
                    _ => {
                        return Err(Error::syntax(pos, "a scalar cannot have children"));
                    }
                }
            }
        }

        let value = match node {
            Node::Object | Node::Array if stack.len() >= options.max_depth => {
                return Err(Error::syntax(pos, "nesting too deep"));
            }
            Node::Object => Value::Object(Map::new()),
            Node::Array => Value::Array(Vec::new()),
            Node::Scalar(value) => value,
        };

        stack.push(Frame {
            level,
            key: key.map(str::to_string),
            value,
        });
    }

    while !stack.is_empty() {
        close(&mut stack, &mut root);
    }

    root.ok_or_else(|| Error::syntax(Position::default(), "there is nothing to parse"))
}

/// Pops the innermost frame and attaches it to its parent, or makes it the root.
fn close(stack: &mut Vec<Frame>, root: &mut Option<Value>) {
    let Some(frame) = stack.pop() else {
        return;
    };
    match stack.last_mut().map(|parent| &mut parent.value) {
        Some(Value::Object(map)) => {
            map.insert(frame.key.unwrap_or_default(), frame.value);
        }
        Some(Value::Array(items)) => items.push(frame.value),
        // Children of scalars are rejected before they are pushed.
        Some(_) => {}
        None => *root = Some(frame.value),
    }
}

/// Splits a trimmed line into an optional key and the node it declares.
///
/// Keyed scalars try each value form in turn (verbatim, keyword, number, text). Within a
/// form, separators whose key is followed by whitespace win over tight ones, and later
/// separators win over earlier ones, so keys may themselves contain `::`.
fn classify(content: &str, pos: Position) -> Result<Line<'_>> {
    if content.is_empty() {
        return Ok(Line::Skip);
    }
    if content == OBJECT_MARK {
        return Ok(Line::Entry { key: None, node: Node::Object });
    }
    if content == ARRAY_MARK {
        return Ok(Line::Entry { key: None, node: Node::Array });
    }
    if content.strip_prefix(ARRAY_MARK).map_or(false, starts_text) {
        return Ok(Line::Skip);
    }
    if let Some(text) = verbatim(content) {
        return Ok(Line::Entry {
            key: None,
            node: Node::Scalar(Value::Str(text.to_string())),
        });
    }
    if let Some(key) = content.strip_suffix(OBJECT_MARK).and_then(spaced_or_tight_key) {
        return Ok(Line::Entry { key: Some(key), node: Node::Object });
    }
    if let Some(key) = content.strip_suffix(ARRAY_MARK).and_then(spaced_or_tight_key) {
        return Ok(Line::Entry { key: Some(key), node: Node::Array });
    }

    let forms: [fn(&str) -> bool; 4] = [
        |rest| verbatim(rest.trim()).is_some(),
        |rest| keyword(rest.trim()).is_some(),
        |rest| is_number(rest.trim()),
        starts_text,
    ];
    for accepts in forms {
        if let Some((key, rest)) = split_keyed(content, accepts) {
            return Ok(Line::Entry {
                key: Some(key),
                node: Node::Scalar(scalar(rest.trim(), pos)?),
            });
        }
    }

    Ok(Line::Entry {
        key: None,
        node: Node::Scalar(scalar(content, pos)?),
    })
}

/// Whether the text after a `::` holds a value rather than more colons: either it starts
/// with something other than `:`, or whitespace separates it from the mark.
fn starts_text(rest: &str) -> bool {
    let text = rest.trim_start();
    !text.is_empty() && (!text.starts_with(':') || text.len() < rest.len())
}

/// The key in front of a mark when whitespace separates them.
fn spaced_key(prefix: &str) -> Option<&str> {
    let key = prefix.trim_end();
    (!key.is_empty() && key.len() < prefix.len()).then_some(key)
}

/// The key directly touching a mark; it cannot end in `:`.
fn tight_key(prefix: &str) -> Option<&str> {
    (!prefix.is_empty() && !prefix.ends_with(char::is_whitespace) && !prefix.ends_with(':'))
        .then_some(prefix)
}

fn spaced_or_tight_key(prefix: &str) -> Option<&str> {
    spaced_key(prefix).or_else(|| tight_key(prefix))
}

/// Finds the separator for a keyed scalar whose value `accepts`.
fn split_keyed(content: &str, accepts: fn(&str) -> bool) -> Option<(&str, &str)> {
    let bytes = content.as_bytes();
    let marks: Vec<usize> = (0..bytes.len().saturating_sub(1))
        .rev()
        .filter(|&i| bytes[i] == b':' && bytes[i + 1] == b':')
        .collect();

    let key_rules: [fn(&str) -> Option<&str>; 2] = [spaced_key, tight_key];
    key_rules.iter().find_map(|rule| {
        marks.iter().find_map(|&i| {
            let key = rule(&content[..i])?;
            let rest = &content[i + ARRAY_MARK.len()..];
            accepts(rest).then_some((key, rest))
        })
    })
}

/// The text between backslashes of a `\text\` string.
fn verbatim(text: &str) -> Option<&str> {
    text.strip_prefix('\\')?.strip_suffix('\\')
}

fn keyword(text: &str) -> Option<Value> {
    match text {
        "True" => Some(Value::Bool(true)),
        "False" => Some(Value::Bool(false)),
        "None" => Some(Value::Null),
        _ => None,
    }
}

fn scalar(text: &str, pos: Position) -> Result<Value> {
    if let Some(inner) = verbatim(text) {
        return Ok(Value::Str(inner.to_string()));
    }
    if let Some(value) = keyword(text) {
        return Ok(value);
    }
    if is_number(text) {
        return number(text, pos);
    }
    Ok(Value::Str(text.to_string()))
}

/// `[+-]?(digits? '.' digits | digits '.'?)([eE][+-]?digits)?`
fn is_number(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;

    let digits = |i: &mut usize| {
        let start = *i;
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
        }
        *i - start
    };

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let whole = digits(&mut i);
    let mut fraction = 0;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        fraction = digits(&mut i);
    }
    if whole == 0 && fraction == 0 {
        return false;
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if digits(&mut i) == 0 {
            return false;
        }
    }
    i == bytes.len()
}

fn number(text: &str, pos: Position) -> Result<Value> {
    if !text.contains(|c: char| matches!(c, '.' | 'e' | 'E')) {
        if let Ok(int) = text.parse::<i64>() {
            return Ok(Value::Int(int));
        }
    }
    match text.parse::<f64>() {
        Ok(float) if float.is_finite() => Ok(Value::Float(float)),
        _ => Err(Error::syntax(pos, "number out of range")),
    }
}

/// Writes `value` as an outline document with default options.
///
/// # Errors
///
/// Returns an encoding error for strings or keys the dialect cannot hold, and for
/// non-finite floats.
pub fn to_string(value: &Value) -> Result<String> {
    to_string_with_options(value, &OutlineOptions::default())
}

/// Writes `value` as an outline document.
///
/// Lines are joined with `\n`; there is no trailing newline.
///
/// # Errors
///
/// Returns an encoding error for strings containing line breaks, keys that would not read
/// back, and non-finite floats under [`NonFinitePolicy::Error`].
pub fn to_string_with_options(value: &Value, options: &OutlineOptions) -> Result<String> {
    let mut lines = Vec::new();
    render(value, None, options.level, options, &mut lines)?;
    Ok(lines.join("\n"))
}

fn render(
    value: &Value,
    key: Option<&str>,
    level: usize,
    options: &OutlineOptions,
    lines: &mut Vec<String>,
) -> Result<()> {
    let mut line = String::new();
    if let Some(key) = key {
        check_key(key)?;
        line.push_str(key);
        line.push(' ');
    }

    match value {
        Value::Object(_) => line.push_str(OBJECT_MARK),
        Value::Array(_) => line.push_str(ARRAY_MARK),
        _ => {
            if key.is_some() {
                line.push_str(ARRAY_MARK);
                line.push(' ');
            }
            write_scalar(&mut line, value, options)?;
        }
    }

    if let Some(key) = key {
        check_keyed_line(&line, key, value)?;
    }
    lines.push(" ".repeat(options.tab.max(1) * level) + &line);

    match value {
        Value::Object(map) => {
            for (child_key, child) in map {
                render(child, Some(child_key.as_str()), level + 1, options, lines)?;
            }
        }
        Value::Array(items) => {
            for item in items {
                render(item, None, level + 1, options, lines)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn write_scalar(line: &mut String, value: &Value, options: &OutlineOptions) -> Result<()> {
    match value {
        Value::Null => line.push_str("None"),
        Value::Bool(true) => line.push_str("True"),
        Value::Bool(false) => line.push_str("False"),
        Value::Int(i) => line.push_str(&i.to_string()),
        Value::Float(f) if f.is_finite() => line.push_str(&format_float(*f)),
        Value::Float(_) => match options.non_finite {
            NonFinitePolicy::Error => return Err(Error::encoding("non-finite number")),
            NonFinitePolicy::Nullify => line.push_str("None"),
        },
        Value::Str(s) => write_str(line, s)?,
        Value::Array(_) | Value::Object(_) => {}
    }
    Ok(())
}

/// Colons in a key or value can move the separator the reader picks, so such lines are
/// read back before they are kept.
fn check_keyed_line(line: &str, key: &str, value: &Value) -> Result<()> {
    if !key.contains(':') && line.matches(ARRAY_MARK).count() < 2 {
        return Ok(());
    }
    let expected = match value {
        Value::Object(_) => Node::Object,
        Value::Array(_) => Node::Array,
        Value::Float(f) if !f.is_finite() => Node::Scalar(Value::Null),
        other => Node::Scalar(other.clone()),
    };
    match classify(line, Position::default()) {
        Ok(Line::Entry { key: Some(found), node }) if found == key && node == expected => Ok(()),
        _ => Err(Error::encoding(format!(
            "cannot write key {:?} next to this value",
            key
        ))),
    }
}

fn has_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}

fn check_key(key: &str) -> Result<()> {
    let unreadable = key.is_empty()
        || has_line_break(key)
        || key.starts_with('\\')
        || key.trim() != key;
    if unreadable {
        return Err(Error::encoding(format!("cannot write key {:?}", key)));
    }
    Ok(())
}

fn write_str(line: &mut String, s: &str) -> Result<()> {
    if has_line_break(s) {
        return Err(Error::encoding("line break in string"));
    }
    let ambiguous = s.is_empty()
        || s == ":"
        || s.contains(ARRAY_MARK)
        || s.trim() != s
        || verbatim(s).is_some()
        || keyword(s).is_some()
        || is_number(s);
    if ambiguous {
        line.push('\\');
        line.push_str(s);
        line.push('\\');
    } else {
        line.push_str(s);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colson;

    #[test]
    fn test_number_shapes() {
        for text in ["1", "-1", "+1", "1.", ".5", "1.5", "1e5", "1.5E-3", "+.5e+2"] {
            assert!(is_number(text), "{}", text);
        }
        for text in ["", ".", "+", "1e", "e5", "1.2.3", "0x10", "1 2", "inf"] {
            assert!(!is_number(text), "{}", text);
        }
    }

    #[test]
    fn test_scalar_lines() {
        assert_eq!(from_str("True").unwrap(), Value::Bool(true));
        assert_eq!(from_str("None").unwrap(), Value::Null);
        assert_eq!(from_str("  42  ").unwrap(), Value::Int(42));
        assert_eq!(from_str("+7").unwrap(), Value::Int(7));
        assert_eq!(from_str("2.").unwrap(), Value::Float(2.0));
        assert_eq!(from_str("1e3").unwrap(), Value::Float(1000.0));
        assert_eq!(from_str("hello world").unwrap(), Value::from("hello world"));
        assert_eq!(from_str("\\ padded \\").unwrap(), Value::from(" padded "));
        assert_eq!(from_str("\\\\").unwrap(), Value::from(""));
        assert_eq!(
            from_str("99999999999999999999").unwrap(),
            Value::Float(99999999999999999999.0)
        );
    }

    #[test]
    fn test_nested_document() {
        let text = "\
:: people
:::
    name :: Alice
    tags ::
        admin
        \\True\\

    address :::
        city :: Paris
    age :: 30
";
        let value = from_str(text).unwrap();
        assert_eq!(
            value,
            colson!({
                "name": "Alice",
                "tags": ["admin", "True"],
                "address": {"city": "Paris"},
                "age": 30
            })
        );
    }

    #[test]
    fn test_keyed_values() {
        let value = from_str(":::\n    a :: b :: c\n    e :: \\x :: y\\\n    f::1").unwrap();
        assert_eq!(value["a :: b"], Value::from("c"));
        assert_eq!(value["e"], Value::from("x :: y"));
        assert_eq!(value["f"], Value::Int(1));
    }

    #[test]
    fn test_keys_containing_separators() {
        let value = from_str(":::\n    a::b :: c\n    x :: y::z\n    n::m ::\n        1").unwrap();
        assert_eq!(value, colson!({"a::b": "c", "x": "y::z", "n::m": [1]}));

        // A key followed by whitespace wins over a later tight one.
        let value = from_str(":::\n    p :: q::r").unwrap();
        assert_eq!(value, colson!({"p": "q::r"}));

        let value = colson!({"a::b": "c", "k::": {"d": 1}, "t": "u :: v"});
        let text = to_string(&value).unwrap();
        assert_eq!(text, ":::\n    a::b :: c\n    k:: :::\n        d :: 1\n    t :: \\u :: v\\");
        assert_eq!(from_str(&text).unwrap(), value);
    }

    #[test]
    fn test_comment_lines_need_text_after_the_mark() {
        let value = from_str("::\n    :::x\n    ::x\n    :: note\n    ::  :y\n    ::::").unwrap();
        assert_eq!(value, colson!([":::x", "::::"]));
        assert_eq!(to_string(&value).unwrap(), "::\n    \\:::x\\\n    \\::::\\");
    }

    #[test]
    fn test_crlf_lines() {
        let value = from_str("::\r\n    1\r\n    2\r\n").unwrap();
        assert_eq!(value, colson!([1, 2]));
    }

    #[test]
    fn test_structure_errors() {
        let err = |text: &str| from_str(text).unwrap_err().to_string();

        assert_eq!(err(""), "there is nothing to parse at line 1, column 1");
        assert_eq!(err("\n:: only a comment\n"), "there is nothing to parse at line 1, column 1");
        assert_eq!(err("1\n2"), "multiple root values at line 2, column 1");
        assert_eq!(err("a :: 1"), "keyed entry needs a parent object at line 1, column 1");
        assert_eq!(err(":::\n    1"), "object entries need a key at line 2, column 5");
        assert_eq!(err("::\n    a :: 1"), "keyed entry needs a parent object at line 2, column 5");
        assert_eq!(err("::\n        1"), "line is indented too far at line 2, column 9");
        assert_eq!(err("::\n    1\n        2"), "a scalar cannot have children at line 3, column 9");
        assert_eq!(err("    ::"), "line is indented too far at line 1, column 5");
        assert_eq!(err("::\n    1e999"), "number out of range at line 2, column 5");
    }

    #[test]
    fn test_depth_limit() {
        let options = OutlineOptions::new().with_max_depth(2);
        assert!(from_str_with_options("::\n    ::\n        1", &options).is_ok());
        let err = from_str_with_options("::\n    ::\n        ::", &options).unwrap_err();
        assert_eq!(err.to_string(), "nesting too deep at line 3, column 9");
    }

    #[test]
    fn test_base_level() {
        let options = OutlineOptions::new().with_level(1);
        assert_eq!(from_str_with_options("    ::\n        1", &options).unwrap(), colson!([1]));
        let err = from_str_with_options("::", &options).unwrap_err();
        assert_eq!(
            err.to_string(),
            "line is indented less than the base level at line 1, column 1"
        );
    }

    #[test]
    fn test_render() {
        let value = colson!({
            "a": [1, 2.0, null, true],
            "b": {},
            "c": "text"
        });
        assert_eq!(
            to_string(&value).unwrap(),
            ":::\n    a ::\n        1\n        2.0\n        None\n        True\n    b :::\n    c :: text"
        );
    }

    #[test]
    fn test_render_escapes_ambiguous_strings() {
        let value = colson!(["", "a::b", " x", "\\y\\", "True", "None", "12", "-1.5e3", "plain \\", ":"]);
        assert_eq!(
            to_string(&value).unwrap(),
            "::\n    \\\\\n    \\a::b\\\n    \\ x\\\n    \\\\y\\\\\n    \\True\\\n    \\None\\\n    \\12\\\n    \\-1.5e3\\\n    plain \\\n    \\:\\"
        );
        assert_eq!(from_str(&to_string(&value).unwrap()).unwrap(), value);
    }

    #[test]
    fn test_render_errors() {
        assert!(to_string(&colson!(["a\nb"])).unwrap_err().is_encoding());
        assert!(to_string(&colson!({"": 1})).unwrap_err().is_encoding());
        assert!(to_string(&colson!({":: x": 1})).unwrap_err().is_encoding());
        assert!(to_string(&colson!({"k :: \\a": "b :: \\c"})).unwrap_err().is_encoding());
        assert!(to_string(&colson!({" a": 1})).unwrap_err().is_encoding());
        assert!(to_string(&colson!({"\\a": 1})).unwrap_err().is_encoding());
        assert!(to_string(&Value::Float(f64::NAN)).unwrap_err().is_encoding());

        let options = OutlineOptions::new().with_non_finite(NonFinitePolicy::Nullify);
        assert_eq!(
            to_string_with_options(&Value::Float(f64::INFINITY), &options).unwrap(),
            "None"
        );
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let value = from_str(":::\n    a :: 1\n    b :: 2\n    a :: 3").unwrap();
        assert_eq!(value.to_string(), r#"{"a":3,"b":2}"#);
    }
}
