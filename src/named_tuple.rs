//! Named tuples (`collections.namedtuple`).
//!
//! There are two forms:
//! - **Static**: `#[derive(NamedTuple)]` on a struct with named fields. The derive implements [`NamedTuple`]
//!   and `PyRepr`/`Display`, so a `Point { x: 1, y: 2 }` renders as `Point(x=1, y=2)`.
//! - **Dynamic**: [`NamedTupleType::new`] validates a type name and field list at runtime and
//!   [`NamedTupleType::make`] builds immutable [`Record`]s of [`Value`]s.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use pycoll_core::ContainerTypeId;
use pycoll_core::errors::{CoreError, ErrorKind};
use pycoll_core::index::checked_index;
use pycoll_core::strings::is_identifier;

use crate::errors::Result;
use crate::ordered_dict::OrderedDict;
use crate::repr::{PyRepr, ReprConfig};
use crate::tuple::Tuple;
use crate::value::Value;

const KIND: ContainerTypeId = ContainerTypeId::NamedTuple;

/// Reflection and conversion for a struct used as a named tuple. Usually derived.
///
/// ```rust
/// use pycoll::NamedTuple;
///
/// #[derive(Debug, Clone, PartialEq, NamedTuple)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// let p = Point { x: 1, y: 2 };
/// assert_eq!(Point::fields(), &["x", "y"]);
/// assert_eq!(p.to_string(), "Point(x=1, y=2)");
/// let moved = p.replace("y", 5.into()).unwrap();
/// assert_eq!(moved, Point { x: 1, y: 5 });
/// ```
pub trait NamedTuple: Sized {
    fn type_name() -> &'static str;

    /// Field names in declaration order.
    fn fields() -> &'static [&'static str];

    /// Field values in declaration order.
    fn values(&self) -> Vec<Value>;

    /// Build from positional values.
    ///
    /// ## Errors
    /// - `ValueError` if the number of values does not match [`NamedTuple::fields`].
    /// - `TypeMismatchError` if a value does not convert to its field's type.
    fn make(values: Vec<Value>) -> Result<Self>;

    /// ## Errors
    /// - `NotFoundError` if there is no field called `name`.
    fn field(&self, name: &str) -> Result<Value> {
        let i = field_position(Self::type_name(), Self::fields().iter().copied(), name)?;
        let mut values = self.values();
        Ok(values.swap_remove(i))
    }

    fn as_dict(&self) -> OrderedDict<&'static str, Value> {
        Self::fields().iter().copied().zip(self.values()).collect()
    }

    fn to_tuple(&self) -> Tuple {
        Tuple::new(self.values())
    }

    /// Return a copy with one field replaced (`_replace`).
    ///
    /// ## Errors
    /// - `NotFoundError` for an unknown field; `TypeMismatchError` if `value` has the wrong type.
    fn replace(&self, name: &str, value: Value) -> Result<Self> {
        let i = field_position(Self::type_name(), Self::fields().iter().copied(), name)?;
        let mut values = self.values();
        values[i] = value;
        Self::make(values)
    }
}

/// Arity check shared by derived [`NamedTuple::make`] implementations.
///
/// ## Errors
/// - `ValueError` if `got != expected`.
pub fn check_arity(type_name: &str, expected: usize, got: usize) -> Result<()> {
    if expected == got {
        return Ok(());
    }
    Err(CoreError::with_message(
        ErrorKind::Value,
        format!("{type_name} expects {expected} values, got {got}"),
    )
    .into())
}

/// Write `Name(f1=v1, f2=v2)`; used by derived `PyRepr` impls.
pub fn write_named_repr<'a, I>(out: &mut String, type_name: &str, pairs: I, config: &ReprConfig)
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    out.push_str(type_name);
    out.push('(');
    for (i, (name, value)) in pairs.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(name);
        out.push('=');
        value.write_repr(out, config);
    }
    out.push(')');
}

fn field_position<'a>(type_name: &str, fields: impl IntoIterator<Item = &'a str>, name: &str) -> Result<usize> {
    fields.into_iter().position(|f| f == name).ok_or_else(|| {
        CoreError::with_message(
            ErrorKind::NotFound,
            format!("'{type_name}' object has no field '{name}'"),
        )
        .into()
    })
}

#[derive(Debug, PartialEq, Eq)]
struct Shape {
    name: String,
    fields: Vec<String>,
}

/// A named tuple type created at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedTupleType {
    shape: Rc<Shape>,
}

impl NamedTupleType {
    /// Validate `name` and `fields` and create the type.
    ///
    /// ## Errors
    /// - `ValueError` if a name is not an identifier, a field starts with `_`, or a field repeats.
    pub fn new(name: &str, fields: &[&str]) -> Result<Self> {
        if !is_identifier(name) {
            return Err(invalid_name(format!("type names must be valid identifiers: '{name}'")));
        }
        let mut seen = HashSet::new();
        for field in fields {
            if !is_identifier(field) {
                return Err(invalid_name(format!("field names must be valid identifiers: '{field}'")));
            }
            if field.starts_with('_') {
                return Err(invalid_name(format!("field names cannot start with an underscore: '{field}'")));
            }
            if !seen.insert(*field) {
                return Err(invalid_name(format!("encountered duplicate field name: '{field}'")));
            }
        }
        Ok(Self {
            shape: Rc::new(Shape {
                name: name.to_string(),
                fields: fields.iter().map(|f| f.to_string()).collect(),
            }),
        })
    }

    pub fn name(&self) -> &str {
        &self.shape.name
    }

    pub fn fields(&self) -> &[String] {
        &self.shape.fields
    }

    /// Build a record from positional values.
    ///
    /// ## Errors
    /// - `ValueError` if the number of values does not match the field count.
    pub fn make(&self, values: Vec<Value>) -> Result<Record> {
        check_arity(self.name(), self.shape.fields.len(), values.len())?;
        Ok(Record {
            ty: self.clone(),
            values,
        })
    }
}

fn invalid_name(message: String) -> crate::errors::CollectionError {
    CoreError::with_message(ErrorKind::Value, message).into()
}

/// An immutable instance of a [`NamedTupleType`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    ty: NamedTupleType,
    values: Vec<Value>,
}

impl Record {
    pub fn record_type(&self) -> &NamedTupleType {
        &self.ty
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Positional access.
    ///
    /// ## Errors
    /// - `IndexError` if `index` is out of range.
    pub fn get(&self, index: i64) -> Result<&Value> {
        let i = checked_index(KIND, self.values.len(), index)?;
        Ok(&self.values[i])
    }

    /// Access by field name.
    ///
    /// ## Errors
    /// - `NotFoundError` for an unknown field.
    pub fn field(&self, name: &str) -> Result<&Value> {
        let i = field_position(self.ty.name(), self.ty.fields().iter().map(String::as_str), name)?;
        Ok(&self.values[i])
    }

    pub fn as_dict(&self) -> OrderedDict<String, Value> {
        self.ty.fields().iter().cloned().zip(self.values.iter().cloned()).collect()
    }

    pub fn to_tuple(&self) -> Tuple {
        Tuple::new(self.values.clone())
    }

    /// Return a copy with one field replaced.
    ///
    /// ## Errors
    /// - `NotFoundError` for an unknown field.
    pub fn replace(&self, name: &str, value: Value) -> Result<Record> {
        let i = field_position(self.ty.name(), self.ty.fields().iter().map(String::as_str), name)?;
        let mut values = self.values.clone();
        values[i] = value;
        Ok(Record {
            ty: self.ty.clone(),
            values,
        })
    }

    /// ## Errors
    /// - Always `ImmutableError`.
    pub fn set_item(&self, _index: i64, _value: Value) -> Result<()> {
        Err(CoreError::does_not_support(KIND, "item assignment").into())
    }

    /// ## Errors
    /// - Always `ImmutableError`.
    pub fn set_field(&self, _name: &str, _value: Value) -> Result<()> {
        Err(CoreError::does_not_support(KIND, "attribute assignment").into())
    }
}

impl PyRepr for Record {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        let pairs = self.ty.fields().iter().map(String::as_str).zip(self.values.iter());
        write_named_repr(out, self.ty.name(), pairs, config);
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CollectionError;

    fn point_type() -> NamedTupleType {
        NamedTupleType::new("Point", &["x", "y"]).unwrap()
    }

    #[test]
    fn rejects_bad_field_names() {
        for fields in [&["x", "x"][..], &["1x"][..], &["_x"][..]] {
            assert!(matches!(NamedTupleType::new("P", fields), Err(CollectionError::Value(_))));
        }
        assert!(NamedTupleType::new("my type", &["a"]).is_err());
    }

    #[test]
    fn positional_and_named_access() {
        let p = point_type().make(vec![Value::Int(1), Value::Int(2)]).unwrap();
        assert_eq!(p.get(0).unwrap(), &Value::Int(1));
        assert_eq!(p.get(-1).unwrap(), &Value::Int(2));
        assert_eq!(p.field("y").unwrap(), &Value::Int(2));
        assert!(matches!(p.field("z"), Err(CollectionError::NotFound(_))));
        assert!(matches!(p.get(2), Err(CollectionError::Index(_))));
    }

    #[test]
    fn make_checks_arity() {
        let err = point_type().make(vec![Value::Int(1)]).unwrap_err();
        assert_eq!(err.to_string(), "ValueError: Point expects 2 values, got 1");
    }

    #[test]
    fn records_are_immutable() {
        let p = point_type().make(vec![Value::Int(1), Value::Int(2)]).unwrap();
        assert!(matches!(p.set_item(0, Value::Int(9)), Err(CollectionError::Immutable(_))));
        assert!(matches!(p.set_field("x", Value::Int(9)), Err(CollectionError::Immutable(_))));
        let q = p.replace("x", Value::Int(9)).unwrap();
        assert_eq!(p.field("x").unwrap(), &Value::Int(1));
        assert_eq!(q.field("x").unwrap(), &Value::Int(9));
    }

    #[test]
    fn as_dict_and_repr() {
        let p = point_type().make(vec![Value::Int(1), Value::from("b")]).unwrap();
        let d = p.as_dict();
        assert_eq!(d.keys().cloned().collect::<Vec<_>>(), vec!["x".to_string(), "y".to_string()]);
        assert_eq!(p.to_string(), "Point(x=1, y='b')");
        assert_eq!(p.to_tuple().to_string(), "(1, 'b')");
    }
}
