//! Dynamic element type for heterogeneous containers.
//!
//! Tuples, named tuples and template arguments hold elements of mixed types. `Value` covers the shapes those
//! containers need and implements Python-like comparison: numbers compare across `int`/`float`, everything
//! else compares only within its own kind.

use std::cmp::Ordering;
use std::fmt;

use pycoll_core::errors::{CoreError, ErrorKind};

use crate::errors::{CollectionError, Result};
use crate::repr::{PyRepr, ReprConfig, write_bytes_literal, write_float, write_seq, write_str_literal};

/// A dynamically typed element.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Tuple(Vec<Value>),
}

impl Value {
    /// Return the Python type name (`"int"`, `"str"`, ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
        }
    }

    /// Return true for `int`, `float` and `bool` (which Python treats as an int).
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Bool(_) | Value::Int(_) | Value::Float(_))
    }

    /// Python truthiness: zero, empty and `None` are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Bytes(b) => !b.is_empty(),
            Value::List(items) | Value::Tuple(items) => !items.is_empty(),
        }
    }

    /// Borrow the string payload, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Bool(b) => Some(f64::from(u8::from(*b))),
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Bool(b) => Some(i64::from(*b)),
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Add two values with Python numeric promotion (`int + int -> int`, otherwise `float`).
    ///
    /// ## Errors
    /// - `TypeMismatchError` if either side is not numeric.
    /// - `ValueError` if `int + int` overflows `i64`.
    pub fn try_add(&self, other: &Value) -> Result<Value> {
        if let (Some(a), Some(b)) = (self.as_i64(), other.as_i64()) {
            return a
                .checked_add(b)
                .map(Value::Int)
                .ok_or_else(|| CoreError::add_overflow("int").into());
        }
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => Ok(Value::Float(a + b)),
            _ => Err(CoreError::unsupported_operands("+", self.type_name(), other.type_name()).into()),
        }
    }

    /// Render the value as Python's `str()` would (strings unquoted, everything else as `repr`).
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            other => other.repr(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (a, b) if a.is_numeric() && b.is_numeric() => match (a.as_i64(), b.as_i64()) {
                (Some(x), Some(y)) => x == y,
                _ => a.as_f64() == b.as_f64(),
            },
            _ => false,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a.partial_cmp(b),
            (Value::Bytes(a), Value::Bytes(b)) => a.partial_cmp(b),
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => a.partial_cmp(b),
            (a, b) if a.is_numeric() && b.is_numeric() => match (a.as_i64(), b.as_i64()) {
                (Some(x), Some(y)) => x.partial_cmp(&y),
                _ => a.as_f64()?.partial_cmp(&b.as_f64()?),
            },
            _ => None,
        }
    }
}

impl PyRepr for Value {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        match self {
            Value::None => out.push_str("None"),
            Value::Bool(b) => b.write_repr(out, config),
            Value::Int(i) => i.write_repr(out, config),
            Value::Float(f) => write_float(out, *f, config),
            Value::Str(s) => write_str_literal(out, s, config),
            Value::Bytes(b) => write_bytes_literal(out, b, config),
            Value::List(items) => write_seq(out, "[", "]", items.iter(), config),
            Value::Tuple(items) if items.len() == 1 => {
                out.push('(');
                items[0].write_repr(out, config);
                out.push_str(",)");
            }
            Value::Tuple(items) => write_seq(out, "(", ")", items.iter(), config),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::None, Into::into)
    }
}

impl TryFrom<Value> for i64 {
    type Error = CollectionError;

    fn try_from(v: Value) -> Result<Self> {
        match v {
            Value::Int(i) => Ok(i),
            Value::Bool(b) => Ok(i64::from(b)),
            other => Err(CoreError::expected_type("int", other.type_name()).into()),
        }
    }
}

macro_rules! impl_try_from_narrow_int {
    ($($t:ty),*) => {
        $(
            impl TryFrom<Value> for $t {
                type Error = CollectionError;

                fn try_from(v: Value) -> Result<Self> {
                    let wide = i64::try_from(v)?;
                    <$t>::try_from(wide).map_err(|_| {
                        CoreError::with_message(
                            ErrorKind::Value,
                            format!("int {wide} out of range for {}", stringify!($t)),
                        )
                        .into()
                    })
                }
            }
        )*
    };
}

impl_try_from_narrow_int!(i8, i16, i32, u8, u16, u32, u64, usize);

impl TryFrom<Value> for f64 {
    type Error = CollectionError;

    fn try_from(v: Value) -> Result<Self> {
        match v {
            Value::Float(f) => Ok(f),
            Value::Int(i) => Ok(i as f64),
            other => Err(CoreError::expected_type("float", other.type_name()).into()),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = CollectionError;

    fn try_from(v: Value) -> Result<Self> {
        match v {
            Value::Bool(b) => Ok(b),
            other => Err(CoreError::expected_type("bool", other.type_name()).into()),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = CollectionError;

    fn try_from(v: Value) -> Result<Self> {
        match v {
            Value::Str(s) => Ok(s),
            other => Err(CoreError::expected_type("str", other.type_name()).into()),
        }
    }
}

impl TryFrom<Value> for Vec<u8> {
    type Error = CollectionError;

    fn try_from(v: Value) -> Result<Self> {
        match v {
            Value::Bytes(b) => Ok(b),
            other => Err(CoreError::expected_type("bytes", other.type_name()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_across_int_and_float() {
        assert_eq!(Value::Int(1), Value::Float(1.0));
        assert_eq!(Value::Bool(true), Value::Int(1));
        assert!(Value::Int(2) > Value::Float(1.5));
    }

    #[test]
    fn mixed_kinds_are_unordered() {
        assert_eq!(Value::from("a").partial_cmp(&Value::Int(1)), None);
        assert_ne!(Value::from("1"), Value::Int(1));
    }

    #[test]
    fn add_promotes_to_float() {
        assert_eq!(Value::Int(2).try_add(&Value::Int(3)).unwrap(), Value::Int(5));
        assert_eq!(Value::Int(2).try_add(&Value::Float(0.5)).unwrap(), Value::Float(2.5));
        let overflow = Value::Int(i64::MAX).try_add(&Value::Bool(true)).unwrap_err();
        assert!(matches!(overflow, CollectionError::Value(_)));
        let err = Value::Int(1).try_add(&Value::from("x")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "TypeMismatchError: '+' not supported between instances of 'int' and 'str'"
        );
    }

    #[test]
    fn repr_matches_python() {
        assert_eq!(Value::Tuple(vec![Value::Int(1)]).repr(), "(1,)");
        assert_eq!(
            Value::List(vec![Value::from("a"), Value::None, Value::Float(2.0)]).repr(),
            "['a', None, 2.0]"
        );
    }

    #[test]
    fn try_from_reports_type_mismatch() {
        let err = i64::try_from(Value::from("x")).unwrap_err();
        assert_eq!(err.to_string(), "TypeMismatchError: expected int, found str");
    }

    #[test]
    fn narrow_ints_check_range() {
        assert_eq!(i32::try_from(Value::Int(7)).unwrap(), 7);
        let err = u8::try_from(Value::Int(300)).unwrap_err();
        assert_eq!(err.to_string(), "ValueError: int 300 out of range for u8");
    }
}
