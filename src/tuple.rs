//! Immutable heterogeneous tuple.
//!
//! A `Tuple` is built once and never mutated. "Mutating" operations (`concat`, `repeat`, `slice`) return new
//! tuples; attempted item assignment fails with `ImmutableError`.

use std::fmt;

use pycoll_core::ContainerTypeId;
use pycoll_core::errors::CoreError;
use pycoll_core::index::{checked_index, slice_items};

use crate::errors::Result;
use crate::repr::{PyRepr, ReprConfig, write_seq};
use crate::value::Value;

const KIND: ContainerTypeId = ContainerTypeId::Tuple;

/// Build a [`Tuple`] from heterogeneous expressions.
///
/// ```rust
/// use pycoll::tuple;
///
/// let t = tuple![1, "two", 3.0];
/// assert_eq!(t.len(), 3);
/// assert_eq!(t.to_string(), "(1, 'two', 3.0)");
/// ```
#[macro_export]
macro_rules! tuple {
    () => {
        $crate::tuple::Tuple::new(::std::vec::Vec::new())
    };
    ($($item:expr),+ $(,)?) => {
        $crate::tuple::Tuple::new(vec![$($crate::value::Value::from($item)),+])
    };
}

/// A fixed-length ordered sequence of [`Value`]s.
#[derive(Debug, Clone, PartialEq, PartialOrd, Default)]
pub struct Tuple {
    items: Vec<Value>,
}

impl Tuple {
    pub fn new(items: Vec<Value>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    /// Read the element at `index` (negative indices count from the end).
    ///
    /// ## Errors
    /// - `IndexError` if `index` is out of range.
    pub fn get(&self, index: i64) -> Result<&Value> {
        let i = checked_index(KIND, self.items.len(), index)?;
        Ok(&self.items[i])
    }

    /// Python-like slice, returning a new tuple.
    ///
    /// ## Errors
    /// - `ValueError` if `step == 0`.
    pub fn slice(&self, start: Option<i64>, end: Option<i64>, step: Option<i64>) -> Result<Tuple> {
        Ok(Tuple::new(slice_items(&self.items, start, end, step)?))
    }

    /// Return a new tuple with `other`'s elements after `self`'s.
    pub fn concat(&self, other: &Tuple) -> Tuple {
        let mut items = Vec::with_capacity(self.len() + other.len());
        items.extend_from_slice(&self.items);
        items.extend_from_slice(&other.items);
        Tuple::new(items)
    }

    /// Return the tuple repeated `n` times; non-positive counts give `()`.
    pub fn repeat(&self, n: i64) -> Tuple {
        if n <= 0 {
            return Tuple::default();
        }
        (0..n).flat_map(|_| self.items.iter().cloned()).collect()
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.items.contains(value)
    }

    pub fn count(&self, value: &Value) -> usize {
        self.items.iter().filter(|x| *x == value).count()
    }

    /// Position of the first element equal to `value`.
    ///
    /// ## Errors
    /// - `NotFoundError` if no element matches.
    pub fn index(&self, value: &Value) -> Result<usize> {
        self.items
            .iter()
            .position(|x| x == value)
            .ok_or_else(|| CoreError::not_found_in(KIND, value.repr()).into())
    }

    /// Unpack into exactly `N` bindings: `let [x, y] = point.unpack()?;`
    ///
    /// ## Errors
    /// - `ValueError` if the tuple does not have exactly `N` elements.
    pub fn unpack<const N: usize>(&self) -> Result<[Value; N]> {
        <[Value; N]>::try_from(self.items.clone())
            .map_err(|items| CoreError::unpack_mismatch(N, items.len()).into())
    }

    /// Item assignment is not supported on tuples.
    ///
    /// ## Errors
    /// - Always `ImmutableError`; the tuple is unchanged.
    pub fn set_item(&self, _index: i64, _value: Value) -> Result<()> {
        Err(CoreError::does_not_support(KIND, "item assignment").into())
    }

    /// Item deletion is not supported on tuples.
    ///
    /// ## Errors
    /// - Always `ImmutableError`; the tuple is unchanged.
    pub fn del_item(&self, _index: i64) -> Result<()> {
        Err(CoreError::does_not_support(KIND, "item deletion").into())
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.items
    }
}

impl From<Tuple> for Value {
    fn from(t: Tuple) -> Self {
        Value::Tuple(t.items)
    }
}

impl FromIterator<Value> for Tuple {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Tuple::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Tuple {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl PyRepr for Tuple {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        if let [single] = self.items.as_slice() {
            out.push('(');
            single.write_repr(out, config);
            out.push_str(",)");
        } else {
            write_seq(out, "(", ")", self.items.iter(), config);
        }
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CollectionError;

    #[test]
    fn concat_produces_new_tuple() {
        let a = tuple![1, 2];
        let b = tuple!["x"];
        let c = a.concat(&b);
        assert_eq!(c, tuple![1, 2, "x"]);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn set_item_is_immutable_error() {
        let t = tuple![1, 2, 3];
        let err = t.set_item(0, Value::Int(9)).unwrap_err();
        assert!(matches!(err, CollectionError::Immutable(_)));
        assert_eq!(
            err.to_string(),
            "ImmutableError: 'tuple' object does not support item assignment"
        );
        assert_eq!(t, tuple![1, 2, 3]);
    }

    #[test]
    fn unpack_checks_arity() {
        let t = tuple![10, 20];
        let [x, y] = t.unpack::<2>().unwrap();
        assert_eq!((x, y), (Value::Int(10), Value::Int(20)));
        let err = t.unpack::<3>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "ValueError: not enough values to unpack (expected 3, got 2)"
        );
    }

    #[test]
    fn count_index_slice() {
        let t = tuple![1, 2, 2, 3];
        assert_eq!(t.count(&Value::Int(2)), 2);
        assert_eq!(t.index(&Value::Int(3)).unwrap(), 3);
        assert!(matches!(t.index(&Value::Int(7)), Err(CollectionError::NotFound(_))));
        assert_eq!(t.slice(Some(1), Some(3), None).unwrap(), tuple![2, 2]);
        assert_eq!(*t.get(-1).unwrap(), Value::Int(3));
    }

    #[test]
    fn repeat_builds_new_tuple() {
        let t = tuple![1, "a"];
        assert_eq!(t.repeat(3), tuple![1, "a", 1, "a", 1, "a"]);
        assert!(t.repeat(0).is_empty());
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn repr_of_single_and_empty() {
        assert_eq!(tuple![1].to_string(), "(1,)");
        assert_eq!(tuple![].to_string(), "()");
    }
}
