//! Insertion-ordered mapping (`dict`).
//!
//! Entries live in a `Vec` (iteration order) with a `HashMap` from key to position for lookups. Removal
//! shifts later entries and re-indexes them, which keeps iteration order exact without tombstones.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use pycoll_core::ContainerTypeId;
use pycoll_core::errors::CoreError;

use crate::errors::Result;
use crate::repr::{PyRepr, ReprConfig, write_map};

const KIND: ContainerTypeId = ContainerTypeId::Dict;

/// A key/value mapping that remembers insertion order.
#[derive(Clone)]
pub struct Dict<K, V> {
    entries: Vec<(K, V)>,
    index: HashMap<K, usize>,
}

impl<K, V> Default for Dict<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K, V> Dict<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &V)> + ExactSizeIterator {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut V> + ExactSizeIterator {
        self.entries.iter_mut().map(|(_, v)| v)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Borrow the entry at an iteration position.
    pub fn entry_at(&self, position: usize) -> Option<(&K, &V)> {
        self.entries.get(position).map(|(k, v)| (k, v))
    }
}

impl<K: Eq + Hash + Clone, V> Dict<K, V> {
    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Iteration position of `key`, if present.
    pub fn position(&self, key: &K) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.position(key).map(|i| &mut self.entries[i].1)
    }

    /// Read `key`, falling back to `default` without inserting it.
    pub fn get_or<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        self.get(key).unwrap_or(default)
    }

    /// Insert or overwrite. Overwriting keeps the key's original position.
    ///
    /// ## Returns
    /// - The previous value, if the key was present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.position(&key) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Return the value for `key`, inserting `default` first if it is absent (`dict.setdefault`).
    pub fn setdefault(&mut self, key: K, default: V) -> &mut V {
        let i = match self.position(&key) {
            Some(i) => i,
            None => {
                self.insert(key, default);
                self.entries.len() - 1
            }
        };
        &mut self.entries[i].1
    }

    /// Like [`Dict::setdefault`], but the default is built (from the key) only on a miss.
    pub fn setdefault_with(&mut self, key: K, default: impl FnOnce(&K) -> V) -> &mut V {
        let i = match self.position(&key) {
            Some(i) => i,
            None => {
                let value = default(&key);
                self.insert(key, value);
                self.entries.len() - 1
            }
        };
        &mut self.entries[i].1
    }

    /// Remove `key` if present.
    pub fn take(&mut self, key: &K) -> Option<V> {
        let i = self.index.remove(key)?;
        let (_, value) = self.entries.remove(i);
        self.reindex_from(i);
        Some(value)
    }

    /// Remove `key`, returning `default` if it was absent.
    pub fn pop_or(&mut self, key: &K, default: V) -> V {
        self.take(key).unwrap_or(default)
    }

    /// Insert every pair from `pairs`; later pairs win on key collisions.
    pub fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, pairs: I) {
        for (k, v) in pairs {
            self.insert(k, v);
        }
    }

    /// Move an existing key to the end of iteration order. Returns false if absent.
    pub(crate) fn reposition_last(&mut self, key: &K) -> bool {
        let Some(i) = self.position(key) else {
            return false;
        };
        let entry = self.entries.remove(i);
        self.entries.push(entry);
        self.reindex_from(i);
        true
    }

    /// Move an existing key to the front of iteration order. Returns false if absent.
    pub(crate) fn reposition_first(&mut self, key: &K) -> bool {
        let Some(i) = self.position(key) else {
            return false;
        };
        let entry = self.entries.remove(i);
        self.entries.insert(0, entry);
        self.reindex_from(0);
        true
    }

    /// Remove and return the first (`last == false`) or last entry.
    pub(crate) fn pop_end(&mut self, last: bool) -> Option<(K, V)> {
        if self.entries.is_empty() {
            return None;
        }
        let (k, v) = if last {
            self.entries.pop()?
        } else {
            self.entries.remove(0)
        };
        self.index.remove(&k);
        if !last {
            self.reindex_from(0);
        }
        Some((k, v))
    }

    fn reindex_from(&mut self, start: usize) {
        for (i, (k, _)) in self.entries.iter().enumerate().skip(start) {
            if let Some(slot) = self.index.get_mut(k) {
                *slot = i;
            }
        }
    }
}

impl<K: Eq + Hash + Clone + fmt::Debug, V> Dict<K, V> {
    /// Read `key` (`d[key]`).
    ///
    /// ## Errors
    /// - `NotFoundError` if the key is absent.
    pub fn get_item(&self, key: &K) -> Result<&V> {
        self.get(key)
            .ok_or_else(|| CoreError::not_found_in(KIND, format!("{key:?}")).into())
    }

    /// Remove `key` and return its value (`del d[key]` / `d.pop(key)`).
    ///
    /// ## Errors
    /// - `NotFoundError` if the key is absent; the dict is unchanged.
    pub fn remove(&mut self, key: &K) -> Result<V> {
        self.take(key)
            .ok_or_else(|| CoreError::not_found_in(KIND, format!("{key:?}")).into())
    }

    /// Remove and return the most recently inserted entry.
    ///
    /// ## Errors
    /// - `NotFoundError` if the dict is empty.
    pub fn popitem(&mut self) -> Result<(K, V)> {
        self.pop_end(true).ok_or_else(|| CoreError::empty(KIND).into())
    }
}

impl<K: Eq + Hash + Clone, V: Clone> Dict<K, V> {
    /// Merge `other` into `self`; values from `other` win on collisions, new keys are appended.
    pub fn update(&mut self, other: &Dict<K, V>) {
        for (k, v) in other.iter() {
            self.insert(k.clone(), v.clone());
        }
    }

    /// Return a new dict with `other` merged over `self` (`self | other`).
    pub fn merge(&self, other: &Dict<K, V>) -> Dict<K, V> {
        let mut out = self.clone();
        out.update(other);
        out
    }

    /// Shallow copy.
    pub fn copy(&self) -> Dict<K, V> {
        self.clone()
    }
}

impl<K: Eq + Hash + Clone, V: PartialEq> PartialEq for Dict<K, V> {
    /// Dict equality ignores insertion order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Dict<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter().map(|(k, v)| (k, v))).finish()
    }
}

impl<K: Eq + Hash + Clone, V> FromIterator<(K, V)> for Dict<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = Dict::new();
        out.extend(iter);
        out
    }
}

impl<K: Eq + Hash + Clone, V, const N: usize> From<[(K, V); N]> for Dict<K, V> {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V> IntoIterator for Dict<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: PyRepr, V: PyRepr> PyRepr for Dict<K, V> {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        write_map(out, self.iter(), config);
    }
}

impl<K: PyRepr, V: PyRepr> fmt::Display for Dict<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}
