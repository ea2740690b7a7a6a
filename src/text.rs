//! Immutable Unicode text (`str`).
//!
//! `Text` wraps a `String` but indexes by Unicode scalar, never by byte. Every transform returns a new
//! value; the only "mutator" is [`Text::set_char`], which always fails.

use std::fmt;

use pycoll_core::ContainerTypeId;
use pycoll_core::errors::{CoreError, ErrorKind};
use pycoll_core::strings::{self, StripSide};
use pycoll_core::template::{FieldKey, FormatSpec, Segment, apply_padding, parse_template};

use crate::bytearray::ByteArray;
use crate::errors::Result;
use crate::repr::{PyRepr, ReprConfig, write_str_literal};
use crate::value::Value;

const KIND: ContainerTypeId = ContainerTypeId::Str;

/// An immutable sequence of Unicode scalars.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Text {
    value: String,
}

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }

    /// Length in Unicode scalars.
    pub fn len(&self) -> usize {
        strings::str_len(&self.value)
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn chars(&self) -> std::str::Chars<'_> {
        self.value.chars()
    }

    /// ## Errors
    /// - `IndexError` if `index` is out of range.
    pub fn char_at(&self, index: i64) -> Result<char> {
        Ok(strings::str_char_at(&self.value, index)?)
    }

    /// ## Errors
    /// - `ValueError` if `step == 0`.
    pub fn slice(&self, start: Option<i64>, end: Option<i64>, step: Option<i64>) -> Result<Text> {
        Ok(Text::new(strings::str_slice(&self.value, start, end, step)?))
    }

    pub fn concat(&self, other: &str) -> Text {
        Text::new(strings::str_concat(&self.value, other))
    }

    pub fn repeat(&self, n: i64) -> Text {
        Text::new(strings::str_repeat(&self.value, n))
    }

    pub fn upper(&self) -> Text {
        Text::new(self.value.to_uppercase())
    }

    pub fn lower(&self) -> Text {
        Text::new(self.value.to_lowercase())
    }

    pub fn title(&self) -> Text {
        Text::new(strings::str_title(&self.value))
    }

    pub fn capitalize(&self) -> Text {
        Text::new(strings::str_capitalize(&self.value))
    }

    pub fn swapcase(&self) -> Text {
        Text::new(strings::str_swapcase(&self.value))
    }

    /// Split on `sep`, or on whitespace runs when `sep` is `None`.
    ///
    /// ## Errors
    /// - `ValueError` if `sep` is empty.
    pub fn split(&self, sep: Option<&str>) -> Result<Vec<Text>> {
        Ok(strings::str_split(&self.value, sep)?
            .into_iter()
            .map(Text::new)
            .collect())
    }

    pub fn splitlines(&self) -> Vec<Text> {
        strings::str_splitlines(&self.value).into_iter().map(Text::new).collect()
    }

    /// Join `items` using `self` as the separator.
    pub fn join<S: AsRef<str>>(&self, items: &[S]) -> Text {
        Text::new(strings::str_join(&self.value, items))
    }

    pub fn strip(&self, chars: Option<&str>) -> Text {
        Text::new(strings::str_strip(&self.value, chars, StripSide::Both))
    }

    pub fn lstrip(&self, chars: Option<&str>) -> Text {
        Text::new(strings::str_strip(&self.value, chars, StripSide::Left))
    }

    pub fn rstrip(&self, chars: Option<&str>) -> Text {
        Text::new(strings::str_strip(&self.value, chars, StripSide::Right))
    }

    pub fn center(&self, width: usize, fill: char) -> Text {
        Text::new(strings::str_center(&self.value, width, fill))
    }

    pub fn ljust(&self, width: usize, fill: char) -> Text {
        Text::new(strings::str_ljust(&self.value, width, fill))
    }

    pub fn rjust(&self, width: usize, fill: char) -> Text {
        Text::new(strings::str_rjust(&self.value, width, fill))
    }

    /// Scalar offset of the first occurrence of `needle`.
    pub fn find(&self, needle: &str) -> Option<usize> {
        strings::str_find(&self.value, needle)
    }

    /// Scalar offset of the last occurrence of `needle`.
    pub fn rfind(&self, needle: &str) -> Option<usize> {
        strings::str_rfind(&self.value, needle)
    }

    /// Like [`Text::find`], but a miss is an error.
    ///
    /// ## Errors
    /// - `NotFoundError` if `needle` does not occur.
    pub fn index(&self, needle: &str) -> Result<usize> {
        self.find(needle)
            .ok_or_else(|| CoreError::with_message(ErrorKind::NotFound, "substring not found").into())
    }

    pub fn count(&self, needle: &str) -> usize {
        strings::str_count(&self.value, needle)
    }

    pub fn replace(&self, from: &str, to: &str) -> Text {
        Text::new(strings::str_replace(&self.value, from, to))
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.value.starts_with(prefix)
    }

    pub fn ends_with(&self, suffix: &str) -> bool {
        self.value.ends_with(suffix)
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.value.contains(needle)
    }

    pub fn is_alpha(&self) -> bool {
        strings::str_is_alpha(&self.value)
    }

    pub fn is_digit(&self) -> bool {
        strings::str_is_digit(&self.value)
    }

    pub fn is_space(&self) -> bool {
        strings::str_is_space(&self.value)
    }

    /// Interpolate `{}`, `{0}` and `{name}` fields (`str.format`).
    ///
    /// ```rust
    /// use pycoll::text::Text;
    /// use pycoll::value::Value;
    ///
    /// let t = Text::new("{} has {n:>3} items ({:.1f}%)");
    /// let out = t.format(&[Value::from("cart"), Value::from(12.345)], &[("n", Value::from(7))]).unwrap();
    /// assert_eq!(out.as_str(), "cart has   7 items (12.3%)");
    /// ```
    ///
    /// ## Errors
    /// - `ValueError` for unbalanced braces or a bad format spec.
    /// - `IndexError` if a positional field has no argument.
    /// - `NotFoundError` if a named field has no argument.
    /// - `TypeMismatchError` if a numeric spec is applied to a non-number.
    pub fn format(&self, positional: &[Value], named: &[(&str, Value)]) -> Result<Text> {
        let mut out = String::with_capacity(self.value.len());
        for segment in parse_template(&self.value)? {
            match segment {
                Segment::Literal(lit) => out.push_str(&lit),
                Segment::Field { key, spec } => {
                    let value = match &key {
                        FieldKey::Index(i) => positional.get(*i).ok_or_else(|| {
                            CoreError::with_message(
                                ErrorKind::Index,
                                format!("replacement index {i} out of range for positional args tuple"),
                            )
                        })?,
                        FieldKey::Name(name) => named
                            .iter()
                            .find(|(n, _)| *n == name.as_str())
                            .map(|(_, v)| v)
                            .ok_or_else(|| {
                                CoreError::with_message(
                                    ErrorKind::NotFound,
                                    format!("'{name}' not found in format arguments"),
                                )
                            })?,
                    };
                    out.push_str(&render_field(value, &spec)?);
                }
            }
        }
        Ok(Text::new(out))
    }

    /// UTF-8 encode into a new byte array.
    pub fn encode(&self) -> ByteArray {
        ByteArray::from(self.value.as_bytes().to_vec())
    }

    /// Item assignment is not supported on text.
    ///
    /// ## Errors
    /// - Always `ImmutableError`; the text is unchanged.
    pub fn set_char(&self, _index: i64, _ch: char) -> Result<()> {
        Err(CoreError::does_not_support(KIND, "item assignment").into())
    }
}

fn render_field(value: &Value, spec: &FormatSpec) -> Result<String> {
    let rendered = match (spec.kind, value) {
        (Some('d'), Value::Int(_) | Value::Bool(_)) => i64::try_from(value.clone())?.to_string(),
        (Some('d'), other) => return Err(CoreError::expected_type("int", other.type_name()).into()),
        (Some('f'), v) if v.is_numeric() => {
            let f = f64::try_from(numeric_as_float(v))?;
            format!("{f:.prec$}", prec = spec.precision.unwrap_or(6))
        }
        (Some('f'), other) => return Err(CoreError::expected_type("float", other.type_name()).into()),
        (_, Value::Float(f)) if spec.precision.is_some() => {
            format!("{f:.prec$}", prec = spec.precision.unwrap_or_default())
        }
        (_, Value::Str(s)) => match spec.precision {
            Some(p) => s.chars().take(p).collect(),
            None => s.clone(),
        },
        (_, other) => other.to_display_string(),
    };
    Ok(apply_padding(&rendered, spec, value.is_numeric()))
}

fn numeric_as_float(v: &Value) -> Value {
    match v {
        Value::Bool(b) => Value::Float(f64::from(u8::from(*b))),
        other => other.clone(),
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text::new(s)
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Text::new(s)
    }
}

impl From<Text> for Value {
    fn from(t: Text) -> Self {
        Value::Str(t.value)
    }
}

impl AsRef<str> for Text {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

impl PyRepr for Text {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        write_str_literal(out, &self.value, config);
    }
}

/// `Display` is the unquoted text, like Python's `str()`.
impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CollectionError;

    #[test]
    fn replace_returns_new_text() {
        let original = Text::new("Hello, World!");
        let replaced = original.replace("World", "Python");
        assert_eq!(replaced, "Hello, Python!");
        assert_eq!(original, "Hello, World!");
    }

    #[test]
    fn scalar_indexing() {
        let t = Text::new("héllo");
        assert_eq!(t.len(), 5);
        assert_eq!(t.char_at(1).unwrap(), 'é');
        assert_eq!(t.char_at(-1).unwrap(), 'o');
        assert!(matches!(t.char_at(5), Err(CollectionError::Index(_))));
        assert_eq!(t.slice(None, None, Some(-1)).unwrap(), "olléh");
    }

    #[test]
    fn set_char_is_immutable() {
        let t = Text::new("abc");
        let err = t.set_char(0, 'z').unwrap_err();
        assert_eq!(err.to_string(), "ImmutableError: 'str' object does not support item assignment");
    }

    #[test]
    fn split_and_join() {
        let t = Text::new("  a  b c ");
        let parts = t.split(None).unwrap();
        assert_eq!(parts, vec![Text::new("a"), Text::new("b"), Text::new("c")]);
        assert_eq!(Text::new("-").join(&parts), "a-b-c");
        assert!(matches!(t.split(Some("")), Err(CollectionError::Value(_))));
    }

    #[test]
    fn case_and_padding() {
        assert_eq!(Text::new("hello world").title(), "Hello World");
        assert_eq!(Text::new("hELLO").capitalize(), "Hello");
        assert_eq!(Text::new("ab").center(5, '*'), "**ab*");
        assert_eq!(Text::new("xxhixx").strip(Some("x")), "hi");
    }

    #[test]
    fn search() {
        let t = Text::new("banana");
        assert_eq!(t.find("an"), Some(1));
        assert_eq!(t.rfind("an"), Some(3));
        assert_eq!(t.count("an"), 2);
        assert!(matches!(t.index("x"), Err(CollectionError::NotFound(_))));
    }

    #[test]
    fn format_fields() {
        let out = Text::new("{0}-{1}-{0} {{ok}}")
            .format(&[Value::from("a"), Value::from(2)], &[])
            .unwrap();
        assert_eq!(out, "a-2-a {ok}");
    }

    #[test]
    fn format_errors() {
        let t = Text::new("{} {}");
        assert!(matches!(t.format(&[Value::Int(1)], &[]), Err(CollectionError::Index(_))));
        assert!(matches!(
            Text::new("{who}").format(&[], &[]),
            Err(CollectionError::NotFound(_))
        ));
        assert!(matches!(Text::new("{oops").format(&[], &[]), Err(CollectionError::Value(_))));
        assert!(matches!(
            Text::new("{:d}").format(&[Value::from("x")], &[]),
            Err(CollectionError::TypeMismatch(_))
        ));
    }

    #[test]
    fn encode_round_trip() {
        let t = Text::new("hé");
        let bytes = t.encode();
        assert_eq!(bytes.as_slice(), "hé".as_bytes());
        assert_eq!(bytes.decode().unwrap(), t);
    }

    #[test]
    fn repr_quotes() {
        assert_eq!(Text::new("it's").repr(), "\"it's\"");
        assert_eq!(Text::new("plain").to_string(), "plain");
    }
}
