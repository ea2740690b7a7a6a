//! Order-aware mapping (`collections.OrderedDict`).
//!
//! Every [`Dict`] operation is available through `Deref`. On top of that an `OrderedDict` can reorder
//! keys, pop from either end, and compares order-sensitively against another `OrderedDict`.

use std::fmt;
use std::hash::Hash;
use std::ops::{Deref, DerefMut};

use pycoll_core::ContainerTypeId;
use pycoll_core::errors::CoreError;

use crate::dict::Dict;
use crate::errors::Result;
use crate::repr::{PyRepr, ReprConfig, write_map};

const KIND: ContainerTypeId = ContainerTypeId::OrderedDict;

#[derive(Clone)]
pub struct OrderedDict<K, V> {
    inner: Dict<K, V>,
}

impl<K, V> Default for OrderedDict<K, V> {
    fn default() -> Self {
        Self { inner: Dict::new() }
    }
}

impl<K, V> OrderedDict<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_dict(&self) -> &Dict<K, V> {
        &self.inner
    }

    pub fn into_dict(self) -> Dict<K, V> {
        self.inner
    }
}

impl<K: Eq + Hash + Clone + fmt::Debug, V> OrderedDict<K, V> {
    /// Move `key` to the end of iteration order.
    ///
    /// ## Errors
    /// - `NotFoundError` if `key` is absent; order is unchanged.
    pub fn move_to_end(&mut self, key: &K) -> Result<()> {
        if self.inner.reposition_last(key) {
            Ok(())
        } else {
            Err(CoreError::not_found_in(KIND, format!("{key:?}")).into())
        }
    }

    /// Move `key` to the front of iteration order (`move_to_end(key, last=False)`).
    ///
    /// ## Errors
    /// - `NotFoundError` if `key` is absent; order is unchanged.
    pub fn move_to_front(&mut self, key: &K) -> Result<()> {
        if self.inner.reposition_first(key) {
            Ok(())
        } else {
            Err(CoreError::not_found_in(KIND, format!("{key:?}")).into())
        }
    }

    /// Remove and return the last entry (`last == true`) or the first.
    ///
    /// ## Errors
    /// - `NotFoundError` if the mapping is empty.
    pub fn popitem(&mut self, last: bool) -> Result<(K, V)> {
        self.inner.pop_end(last).ok_or_else(|| CoreError::empty(KIND).into())
    }
}

impl<K, V> Deref for OrderedDict<K, V> {
    type Target = Dict<K, V>;

    fn deref(&self) -> &Dict<K, V> {
        &self.inner
    }
}

impl<K, V> DerefMut for OrderedDict<K, V> {
    fn deref_mut(&mut self) -> &mut Dict<K, V> {
        &mut self.inner
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OrderedDict<K, V> {
    /// Two ordered dicts are equal only if their entries match in order.
    fn eq(&self, other: &Self) -> bool {
        self.inner.len() == other.inner.len() && self.inner.iter().eq(other.inner.iter())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedDict<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OrderedDict({:?})", self.inner)
    }
}

impl<K: Eq + Hash + Clone, V> FromIterator<(K, V)> for OrderedDict<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<K: Eq + Hash + Clone, V, const N: usize> From<[(K, V); N]> for OrderedDict<K, V> {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V> From<Dict<K, V>> for OrderedDict<K, V> {
    fn from(inner: Dict<K, V>) -> Self {
        Self { inner }
    }
}

impl<K: PyRepr, V: PyRepr> PyRepr for OrderedDict<K, V> {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        out.push_str("OrderedDict(");
        if !self.inner.is_empty() {
            write_map(out, self.inner.iter(), config);
        }
        out.push(')');
    }
}

impl<K: PyRepr, V: PyRepr> fmt::Display for OrderedDict<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}
