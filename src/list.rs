//! Dynamic array (`list`).
//!
//! A `Vec`-backed sequence addressed with Python-style `i64` indices. Operations that can fail return
//! [`Result`] instead of panicking, and failing operations leave the list untouched.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

use pycoll_core::ContainerTypeId;
use pycoll_core::errors::{CoreError, ErrorKind};
use pycoll_core::index::{checked_index, clamp_insert_index, slice_items};

use crate::errors::Result;
use crate::repr::{PyRepr, ReprConfig, write_seq};
use crate::value::Value;

const KIND: ContainerTypeId = ContainerTypeId::List;

/// Element types that `sum()` can fold.
pub trait Summable: Sized {
    /// The additive identity (`sum([]) == 0`).
    fn zero() -> Self;

    /// Add two elements.
    ///
    /// ## Errors
    /// - `TypeMismatchError` for dynamically typed elements that are not numeric.
    /// - `ValueError` if a fixed-width integer overflows.
    fn try_add(&self, other: &Self) -> Result<Self>;
}

macro_rules! impl_summable_int {
    ($($t:ty),*) => {
        $(
            impl Summable for $t {
                fn zero() -> Self {
                    0
                }

                fn try_add(&self, other: &Self) -> Result<Self> {
                    self.checked_add(*other)
                        .ok_or_else(|| CoreError::add_overflow(stringify!($t)).into())
                }
            }
        )*
    };
}

impl_summable_int!(i32, i64, u32, u64, usize);

impl Summable for f64 {
    fn zero() -> Self {
        0.0
    }

    fn try_add(&self, other: &Self) -> Result<Self> {
        Ok(self + other)
    }
}

impl Summable for Value {
    fn zero() -> Self {
        Value::Int(0)
    }

    fn try_add(&self, other: &Self) -> Result<Self> {
        Value::try_add(self, other)
    }
}

fn unordered() -> CoreError {
    CoreError::with_message(
        ErrorKind::TypeMismatch,
        "'<' not supported between unordered elements",
    )
}

/// A resizable indexed sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct List<T> {
    items: Vec<T>,
}

impl<T> List<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Read the element at `index` (negative indices count from the end).
    ///
    /// ## Errors
    /// - `IndexError` if `index` is out of range.
    pub fn get(&self, index: i64) -> Result<&T> {
        let i = checked_index(KIND, self.items.len(), index)?;
        Ok(&self.items[i])
    }

    /// Mutably borrow the element at `index`.
    ///
    /// ## Errors
    /// - `IndexError` if `index` is out of range.
    pub fn get_mut(&mut self, index: i64) -> Result<&mut T> {
        let i = checked_index(KIND, self.items.len(), index)?;
        Ok(&mut self.items[i])
    }

    /// Overwrite the element at `index`, returning the previous value.
    ///
    /// ## Errors
    /// - `IndexError` if `index` is out of range.
    pub fn set(&mut self, index: i64, value: T) -> Result<T> {
        let slot = self.get_mut(index)?;
        Ok(std::mem::replace(slot, value))
    }

    pub fn append(&mut self, value: T) {
        self.items.push(value);
    }

    pub fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) {
        self.items.extend(values);
    }

    /// Insert before `index`. Out-of-range indices clamp to the ends, so this never fails.
    pub fn insert(&mut self, index: i64, value: T) {
        let at = clamp_insert_index(self.items.len(), index);
        self.items.insert(at, value);
    }

    /// Remove and return the element at `index` (the last one when `None`).
    ///
    /// ## Errors
    /// - `IndexError` if the list is empty or `index` is out of range.
    pub fn pop(&mut self, index: Option<i64>) -> Result<T> {
        if self.items.is_empty() {
            return Err(CoreError::pop_from_empty(KIND).into());
        }
        let i = checked_index(KIND, self.items.len(), index.unwrap_or(-1))?;
        Ok(self.items.remove(i))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Reverse in place.
    pub fn reverse(&mut self) {
        self.items.reverse();
    }

    /// Stable sort by a derived key.
    pub fn sort_by_key<K: Ord, F: FnMut(&T) -> K>(&mut self, mut key: F, reverse: bool) {
        if reverse {
            self.items.sort_by(|a, b| key(b).cmp(&key(a)));
        } else {
            self.items.sort_by_key(key);
        }
    }
}

impl<T: PartialEq> List<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.items.contains(value)
    }

    /// Position of the first element equal to `value`.
    ///
    /// ## Errors
    /// - `NotFoundError` if no element matches.
    pub fn index(&self, value: &T) -> Result<usize> {
        self.items
            .iter()
            .position(|x| x == value)
            .ok_or_else(|| CoreError::not_found_in(KIND, "value").into())
    }

    pub fn count(&self, value: &T) -> usize {
        self.items.iter().filter(|x| *x == value).count()
    }

    /// Remove the first element equal to `value`.
    ///
    /// ## Errors
    /// - `NotFoundError` if no element matches.
    pub fn remove(&mut self, value: &T) -> Result<T> {
        let i = self.index(value)?;
        Ok(self.items.remove(i))
    }
}

impl<T: Clone> List<T> {
    /// Return a new list with `other` appended.
    pub fn concat(&self, other: &List<T>) -> List<T> {
        let mut items = Vec::with_capacity(self.items.len() + other.items.len());
        items.extend_from_slice(&self.items);
        items.extend_from_slice(&other.items);
        List { items }
    }

    /// Return the list repeated `n` times; non-positive counts give an empty list.
    pub fn repeat(&self, n: i64) -> List<T> {
        if n <= 0 {
            return List::new();
        }
        (0..n).flat_map(|_| self.items.iter().cloned()).collect()
    }

    /// Python-like slice.
    ///
    /// ## Errors
    /// - `ValueError` if `step == 0`.
    pub fn slice(&self, start: Option<i64>, end: Option<i64>, step: Option<i64>) -> Result<List<T>> {
        Ok(List {
            items: slice_items(&self.items, start, end, step)?,
        })
    }

    /// Shallow copy.
    pub fn copy(&self) -> List<T> {
        self.clone()
    }
}

impl<T: PartialOrd + Clone> List<T> {
    /// Stable sort, ascending or descending. Equal elements keep their relative order in both directions.
    ///
    /// ## Errors
    /// - `TypeMismatchError` if two elements cannot be compared; the list is left unchanged.
    pub fn sort(&mut self, reverse: bool) -> Result<()> {
        let mut failed = false;
        let mut sorted = self.items.clone();
        sorted.sort_by(|a, b| {
            let ord = if reverse { b.partial_cmp(a) } else { a.partial_cmp(b) };
            ord.unwrap_or_else(|| {
                failed = true;
                Ordering::Equal
            })
        });
        if failed {
            return Err(unordered().into());
        }
        tracing::trace!(len = sorted.len(), reverse, "list sorted");
        self.items = sorted;
        Ok(())
    }
}

impl<T: PartialOrd> List<T> {
    /// Smallest element (the first one on ties).
    ///
    /// ## Errors
    /// - `ValueError` if the list is empty.
    /// - `TypeMismatchError` if two elements cannot be compared.
    pub fn min(&self) -> Result<&T> {
        self.extreme("min", Ordering::Less)
    }

    /// Largest element (the first one on ties).
    ///
    /// ## Errors
    /// - `ValueError` if the list is empty.
    /// - `TypeMismatchError` if two elements cannot be compared.
    pub fn max(&self) -> Result<&T> {
        self.extreme("max", Ordering::Greater)
    }

    fn extreme(&self, func: &str, wanted: Ordering) -> Result<&T> {
        let mut iter = self.items.iter();
        let mut best = iter.next().ok_or_else(|| CoreError::empty_sequence(func))?;
        for item in iter {
            match item.partial_cmp(best) {
                Some(ord) if ord == wanted => best = item,
                Some(_) => {}
                None => return Err(unordered().into()),
            }
        }
        Ok(best)
    }
}

impl<T: Summable> List<T> {
    /// Sum of all elements (`zero()` for an empty list).
    ///
    /// ## Errors
    /// - `TypeMismatchError` if an element is not numeric (dynamic elements only).
    pub fn sum(&self) -> Result<T> {
        let mut acc = T::zero();
        for item in &self.items {
            acc = acc.try_add(item)?;
        }
        Ok(acc)
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Clone> Add for &List<T> {
    type Output = List<T>;

    fn add(self, rhs: Self) -> List<T> {
        self.concat(rhs)
    }
}

impl<T: PyRepr> PyRepr for List<T> {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        write_seq(out, "[", "]", self.items.iter(), config);
    }
}

impl<T: PyRepr> fmt::Display for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}
