//! The scalar codec: inline scalar and flow-sequence fragments.
//!
//! The read engine and the write strategies own all line structure; this
//! module owns the text inside a single fragment. It parses one inline
//! scalar (`null`, `true`, `42`, `1.5`, `Hydrogen`, `'Noble gas'`) or one
//! flow sequence of scalars (`[Hydrogen, H, 1]`) into typed [`Value`]s,
//! and renders values back to their quoted or unquoted textual form.
//!
//! Rendering keeps strings unquoted whenever that is unambiguous,
//! single-quotes them when they contain structural characters or would
//! reparse as another scalar kind, and double-quotes them when they
//! contain control characters. Floats always render with a decimal point
//! so the integer/float distinction survives a round-trip.
//!
//! ## Examples
//!
//! ```rust
//! use fixie::scalar::{parse, parse_sequence, render};
//! use fixie::Value;
//!
//! assert_eq!(parse("null").unwrap(), Value::Null);
//! assert_eq!(parse("'Noble gas'").unwrap(), Value::from("Noble gas"));
//! assert_eq!(render(&Value::from(1.0)), "1.0");
//!
//! let values = parse_sequence("[Hydrogen, H, 1]").unwrap();
//! assert_eq!(values.len(), 3);
//! ```

use crate::error::ScalarError;
use crate::{Number, Value};

/// Characters that force a string into quotes when rendered.
const QUOTE_FORCING: &[char] = &[
    ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@', '`', ' ',
    '\t',
];

/// A compact row fragment: a plain sequence, or a labelled sequence in the
/// single-entry-map form `label: [v1, v2]`.
#[derive(Debug, PartialEq)]
pub(crate) enum RowFragment {
    Sequence(Vec<Value>),
    Labelled(String, Vec<Value>),
}

/// Parses a single inline scalar fragment.
///
/// # Errors
///
/// Returns a [`ScalarError`] for unterminated quotes or trailing garbage
/// after a quoted scalar.
pub fn parse(text: &str) -> Result<Value, ScalarError> {
    let trimmed = text.trim();
    let mut cursor = Cursor::new(trimmed);
    match cursor.peek() {
        Some('\'') | Some('"') => {
            let string = parse_quoted(&mut cursor)?;
            cursor.skip_spaces();
            if !cursor.at_end() {
                return Err(cursor.error("unexpected characters after quoted scalar"));
            }
            Ok(Value::String(string))
        }
        _ => Ok(classify(trimmed)),
    }
}

/// Parses a flow sequence fragment such as `[a, 'b c', 3]`.
///
/// Elements are scalars only; a trailing comma before the closing bracket
/// is tolerated.
///
/// # Errors
///
/// Returns a [`ScalarError`] when the fragment is not a well-formed flow
/// sequence of scalars.
pub fn parse_sequence(text: &str) -> Result<Vec<Value>, ScalarError> {
    let mut cursor = Cursor::new(text.trim());
    if cursor.bump() != Some('[') {
        return Err(cursor.error("expected '[' to open a sequence"));
    }
    let mut values = Vec::new();
    loop {
        cursor.skip_spaces();
        match cursor.peek() {
            None => return Err(cursor.error("expected ']' before the end of the fragment")),
            Some(']') => {
                cursor.bump();
                break;
            }
            _ => {}
        }
        values.push(parse_element(&mut cursor)?);
        cursor.skip_spaces();
        match cursor.peek() {
            Some(',') => {
                cursor.bump();
            }
            Some(']') => {
                cursor.bump();
                break;
            }
            None => return Err(cursor.error("expected ']' before the end of the fragment")),
            Some(_) => return Err(cursor.error("expected ',' or ']' in sequence")),
        }
    }
    cursor.skip_spaces();
    if !cursor.at_end() {
        return Err(cursor.error("unexpected characters after sequence"));
    }
    Ok(values)
}

/// Parses a compact row fragment, already stripped of its `,` terminator:
/// either `[v1, v2]` or `label: [v1, v2]`.
pub(crate) fn parse_row_fragment(text: &str) -> Result<RowFragment, ScalarError> {
    let trimmed = text.trim();
    if trimmed.starts_with('[') {
        return Ok(RowFragment::Sequence(parse_sequence(trimmed)?));
    }

    let mut cursor = Cursor::new(trimmed);
    let label = match cursor.peek() {
        Some('\'') | Some('"') => {
            let label = parse_quoted(&mut cursor)?;
            cursor.skip_spaces();
            if cursor.bump() != Some(':') {
                return Err(cursor.error("expected ':' after row label"));
            }
            label
        }
        _ => {
            let start = cursor.pos;
            while let Some(ch) = cursor.peek() {
                if ch == ':' {
                    break;
                }
                cursor.bump();
            }
            if cursor.peek() != Some(':') {
                return Err(cursor.error("expected a sequence or a labelled sequence"));
            }
            let raw = cursor.input[start..cursor.pos].trim();
            cursor.bump();
            match classify(raw) {
                Value::String(label) => label,
                _ => return Err(ScalarError::new(start, "row label must be a string")),
            }
        }
    };
    cursor.skip_spaces();
    if cursor.peek() != Some('[') {
        return Err(cursor.error("expected a '[' sequence after the row label"));
    }
    let values = parse_sequence(&cursor.input[cursor.pos..])?;
    Ok(RowFragment::Labelled(label, values))
}

/// Splits a `key: value` mapping entry, returning the key string and the
/// raw (possibly empty) value text. Only the first unquoted `:` splits, so
/// values may themselves contain colons.
pub(crate) fn split_entry(text: &str) -> Result<(String, String), ScalarError> {
    let mut cursor = Cursor::new(text);
    let key = match cursor.peek() {
        Some('\'') | Some('"') => {
            let key = parse_quoted(&mut cursor)?;
            cursor.skip_spaces();
            if cursor.bump() != Some(':') {
                return Err(cursor.error("expected ':' after mapping key"));
            }
            key
        }
        _ => {
            let start = cursor.pos;
            while let Some(ch) = cursor.peek() {
                if ch == ':' {
                    break;
                }
                cursor.bump();
            }
            if cursor.peek() != Some(':') {
                return Err(cursor.error("expected ':' in mapping entry"));
            }
            let raw = cursor.input[start..cursor.pos].trim().to_string();
            if raw.is_empty() {
                return Err(ScalarError::new(start, "empty mapping key"));
            }
            cursor.bump();
            raw
        }
    };
    let rest = &cursor.input[cursor.pos..];
    if !rest.is_empty() && !rest.starts_with(' ') && !rest.starts_with('\t') {
        return Err(cursor.error("expected a space after ':'"));
    }
    Ok((key, rest.trim().to_string()))
}

/// Parses the accumulated body of a `columns:` header into column names.
pub(crate) fn parse_columns_header(text: &str) -> Result<Vec<String>, ScalarError> {
    let rest = text.strip_prefix("columns:").unwrap_or(text);
    let flat = rest.replace(['\n', '\r'], " ");
    let values = parse_sequence(flat.trim())?;
    values
        .into_iter()
        .map(|value| match value {
            Value::String(name) => Ok(name),
            _ => Err(ScalarError::new(0, "column names must be strings")),
        })
        .collect()
}

/// Renders a scalar value to its inline textual form.
#[must_use]
pub fn render(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Number(Number::Integer(i)) => i.to_string(),
        Value::Number(Number::Float(f)) => render_float(*f),
        Value::String(s) => render_string(s),
    }
}

/// Renders values as a flow sequence: `[v1, v2, v3]`.
#[must_use]
pub fn render_sequence<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = &'a Value>,
{
    let rendered: Vec<String> = values.into_iter().map(render).collect();
    format!("[{}]", rendered.join(", "))
}

/// Renders a string, quoting it only when required.
pub(crate) fn render_string(s: &str) -> String {
    if s.chars().any(char::is_control) {
        return render_double_quoted(s);
    }
    if needs_quoting(s) {
        return format!("'{}'", s.replace('\'', "''"));
    }
    s.to_string()
}

fn needs_quoting(s: &str) -> bool {
    s.is_empty()
        || s.starts_with(char::is_whitespace)
        || s.ends_with(char::is_whitespace)
        || s.starts_with('-')
        || s.starts_with('?')
        || s.contains(QUOTE_FORCING)
        || !matches!(classify(s), Value::String(_))
}

fn render_double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            ch if ch.is_control() => out.push_str(&format!("\\u{:04x}", ch as u32)),
            ch => out.push(ch),
        }
    }
    out.push('"');
    out
}

fn render_float(f: f64) -> String {
    if f.is_nan() {
        ".nan".to_string()
    } else if f == f64::INFINITY {
        ".inf".to_string()
    } else if f == f64::NEG_INFINITY {
        "-.inf".to_string()
    } else if f.fract() == 0.0 {
        format!("{:.1}", f)
    } else {
        format!("{}", f)
    }
}

/// Classifies unquoted scalar text. Infallible: anything that is not a
/// recognized null, boolean, or numeric literal is a string.
fn classify(text: &str) -> Value {
    match text {
        "" | "~" | "null" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        ".inf" | "+.inf" => return Value::Number(Number::Float(f64::INFINITY)),
        "-.inf" => return Value::Number(Number::Float(f64::NEG_INFINITY)),
        ".nan" => return Value::Number(Number::Float(f64::NAN)),
        _ => {}
    }
    if looks_numeric(text) {
        if let Ok(i) = text.parse::<i64>() {
            return Value::Number(Number::Integer(i));
        }
        if let Ok(f) = text.parse::<f64>() {
            return Value::Number(Number::Float(f));
        }
    }
    Value::String(text.to_string())
}

fn looks_numeric(text: &str) -> bool {
    let mut chars = text.chars();
    let leading_numeric = matches!(chars.next(), Some(c) if c.is_ascii_digit() || c == '-' || c == '+' || c == '.');
    leading_numeric
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
}

fn parse_quoted(cursor: &mut Cursor<'_>) -> Result<String, ScalarError> {
    match cursor.bump() {
        Some('\'') => parse_single_quoted(cursor),
        Some('"') => parse_double_quoted(cursor),
        _ => Err(cursor.error("expected a quoted string")),
    }
}

fn parse_single_quoted(cursor: &mut Cursor<'_>) -> Result<String, ScalarError> {
    let mut out = String::new();
    while let Some(ch) = cursor.bump() {
        if ch == '\'' {
            // '' is an escaped quote; a lone quote closes the string
            if cursor.peek() == Some('\'') {
                cursor.bump();
                out.push('\'');
            } else {
                return Ok(out);
            }
        } else {
            out.push(ch);
        }
    }
    Err(cursor.error("unterminated single-quoted string"))
}

fn parse_double_quoted(cursor: &mut Cursor<'_>) -> Result<String, ScalarError> {
    let mut out = String::new();
    while let Some(ch) = cursor.bump() {
        match ch {
            '"' => return Ok(out),
            '\\' => match cursor.bump() {
                Some('\\') => out.push('\\'),
                Some('"') => out.push('"'),
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some('t') => out.push('\t'),
                Some('0') => out.push('\0'),
                Some('u') => {
                    let mut hex = String::new();
                    for _ in 0..4 {
                        match cursor.bump() {
                            Some(ch) if ch.is_ascii_hexdigit() => hex.push(ch),
                            _ => {
                                return Err(cursor.error(
                                    "invalid unicode escape (expected 4 hex digits)",
                                ))
                            }
                        }
                    }
                    let code_point = u32::from_str_radix(&hex, 16)
                        .map_err(|_| cursor.error("invalid hex in unicode escape"))?;
                    let ch = char::from_u32(code_point)
                        .ok_or_else(|| cursor.error("invalid unicode code point"))?;
                    out.push(ch);
                }
                Some(other) => {
                    // unknown escape, preserved literally
                    out.push('\\');
                    out.push(other);
                }
                None => return Err(cursor.error("unexpected end of input in string")),
            },
            other => out.push(other),
        }
    }
    Err(cursor.error("unterminated double-quoted string"))
}

fn parse_element(cursor: &mut Cursor<'_>) -> Result<Value, ScalarError> {
    cursor.skip_spaces();
    match cursor.peek() {
        Some('\'') | Some('"') => Ok(Value::String(parse_quoted(cursor)?)),
        Some('[') => Err(cursor.error("nested sequences are not supported")),
        Some('{') => Err(cursor.error("nested mappings are not supported")),
        _ => {
            let start = cursor.pos;
            while let Some(ch) = cursor.peek() {
                match ch {
                    ',' | ']' => break,
                    '[' => return Err(cursor.error("unexpected '[' in scalar")),
                    _ => {
                        cursor.bump();
                    }
                }
            }
            Ok(classify(cursor.input[start..cursor.pos].trim()))
        }
    }
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_spaces(&mut self) {
        while matches!(self.peek(), Some(' ') | Some('\t')) {
            self.bump();
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn error(&self, message: &str) -> ScalarError {
        ScalarError::new(self.pos, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_plain_scalars() {
        assert_eq!(parse("null").unwrap(), Value::Null);
        assert_eq!(parse("~").unwrap(), Value::Null);
        assert_eq!(parse("").unwrap(), Value::Null);
        assert_eq!(parse("true").unwrap(), Value::Bool(true));
        assert_eq!(parse("false").unwrap(), Value::Bool(false));
        assert_eq!(parse("42").unwrap(), Value::from(42));
        assert_eq!(parse("-7").unwrap(), Value::from(-7));
        assert_eq!(parse("1.00794").unwrap(), Value::from(1.00794));
        assert_eq!(parse("Hydrogen").unwrap(), Value::from("Hydrogen"));
        assert_eq!(parse("1.2.3").unwrap(), Value::from("1.2.3"));
    }

    #[test]
    fn parses_quoted_strings() {
        assert_eq!(parse("'Noble gas'").unwrap(), Value::from("Noble gas"));
        assert_eq!(parse("'it''s'").unwrap(), Value::from("it's"));
        assert_eq!(parse("'42'").unwrap(), Value::from("42"));
        assert_eq!(parse("\"a\\nb\"").unwrap(), Value::from("a\nb"));
        assert_eq!(parse("\"\\u0041\"").unwrap(), Value::from("A"));
        assert!(parse("'open").is_err());
        assert!(parse("'a' b").is_err());
    }

    #[test]
    fn parses_sequences() {
        assert_eq!(parse_sequence("[]").unwrap(), Vec::<Value>::new());
        assert_eq!(
            parse_sequence("[qux, doom]").unwrap(),
            vec![Value::from("qux"), Value::from("doom")]
        );
        assert_eq!(
            parse_sequence("[  Hydrogen , 1,  1.00794, false, null ]").unwrap(),
            vec![
                Value::from("Hydrogen"),
                Value::from(1),
                Value::from(1.00794),
                Value::from(false),
                Value::Null,
            ]
        );
        assert_eq!(
            parse_sequence("['Noble gas', He]").unwrap(),
            vec![Value::from("Noble gas"), Value::from("He")]
        );
        // trailing comma is tolerated
        assert_eq!(parse_sequence("[a, b,]").unwrap().len(), 2);
    }

    #[test]
    fn rejects_malformed_sequences() {
        assert!(parse_sequence("[a, b").is_err());
        assert!(parse_sequence("a, b]").is_err());
        assert!(parse_sequence("[a] b").is_err());
        assert!(parse_sequence("[[a]]").is_err());
        assert!(parse_sequence("[{a: 1}]").is_err());
    }

    #[test]
    fn parses_row_fragments() {
        assert_eq!(
            parse_row_fragment("[qux, doom]").unwrap(),
            RowFragment::Sequence(vec![Value::from("qux"), Value::from("doom")])
        );
        assert_eq!(
            parse_row_fragment("a:      [qux,   doom]").unwrap(),
            RowFragment::Labelled(
                "a".to_string(),
                vec![Value::from("qux"), Value::from("doom")]
            )
        );
        assert_eq!(
            parse_row_fragment("'my label': [1]").unwrap(),
            RowFragment::Labelled("my label".to_string(), vec![Value::from(1)])
        );
        assert!(parse_row_fragment("~").is_err());
        assert!(parse_row_fragment("1: [a]").is_err());
        assert!(parse_row_fragment("a: qux").is_err());
    }

    #[test]
    fn splits_mapping_entries() {
        assert_eq!(
            split_entry("bar: qux").unwrap(),
            ("bar".to_string(), "qux".to_string())
        );
        assert_eq!(
            split_entry("bar:").unwrap(),
            ("bar".to_string(), String::new())
        );
        assert_eq!(
            split_entry("url: http://example.org").unwrap(),
            ("url".to_string(), "http://example.org".to_string())
        );
        assert_eq!(
            split_entry("'a key': 1").unwrap(),
            ("a key".to_string(), "1".to_string())
        );
        assert!(split_entry("no colon here").is_err());
        assert!(split_entry("bar:qux").is_err());
        assert!(split_entry(": qux").is_err());
    }

    #[test]
    fn parses_column_headers() {
        assert_eq!(
            parse_columns_header("columns: [bar, baz]\n").unwrap(),
            vec!["bar".to_string(), "baz".to_string()]
        );
        assert_eq!(
            parse_columns_header("columns:\n [bar,   baz ]\n").unwrap(),
            vec!["bar".to_string(), "baz".to_string()]
        );
        assert_eq!(
            parse_columns_header("columns: []").unwrap(),
            Vec::<String>::new()
        );
        assert!(parse_columns_header("columns: ~").is_err());
        assert!(parse_columns_header("columns: [1, 2]").is_err());
    }

    #[test]
    fn renders_scalars() {
        assert_eq!(render(&Value::Null), "null");
        assert_eq!(render(&Value::Bool(false)), "false");
        assert_eq!(render(&Value::from(42)), "42");
        assert_eq!(render(&Value::from(1.0)), "1.0");
        assert_eq!(render(&Value::from(1.00794)), "1.00794");
        assert_eq!(render(&Value::from("Pnictogen")), "Pnictogen");
        assert_eq!(render(&Value::from("Noble gas")), "'Noble gas'");
        assert_eq!(render(&Value::from("it's")), "'it''s'");
        assert_eq!(render(&Value::from("42")), "'42'");
        assert_eq!(render(&Value::from("true")), "'true'");
        assert_eq!(render(&Value::from("")), "''");
        assert_eq!(render(&Value::from("a\nb")), "\"a\\nb\"");
    }

    #[test]
    fn renders_sequences() {
        let values = vec![Value::from("Helium"), Value::from("Noble gas"), Value::Null];
        assert_eq!(
            render_sequence(values.iter()),
            "[Helium, 'Noble gas', null]"
        );
    }

    #[test]
    fn rendered_scalars_reparse_to_the_same_value() {
        let values = vec![
            Value::Null,
            Value::Bool(true),
            Value::from(-12),
            Value::from(1.0),
            Value::from(0.125),
            Value::from("plain"),
            Value::from("needs quoting"),
            Value::from("mixed: [chars], #yes"),
            Value::from("123"),
            Value::from("-leading dash"),
            Value::from(" padded "),
        ];
        for value in values {
            let rendered = render(&value);
            assert_eq!(parse(&rendered).unwrap(), value, "via {:?}", rendered);
        }
    }
}
