//! Mapping with a default factory (`collections.defaultdict`).

use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use pycoll_core::ContainerTypeId;
use pycoll_core::errors::CoreError;

use crate::dict::Dict;
use crate::errors::Result;
use crate::repr::{PyRepr, ReprConfig, write_map};

const KIND: ContainerTypeId = ContainerTypeId::DefaultDict;

/// A [`Dict`] that fills in missing keys from a factory on access.
///
/// ```rust
/// use pycoll::default_dict::DefaultDict;
///
/// let mut groups: DefaultDict<&str, Vec<i32>> = DefaultDict::new(Vec::new);
/// groups.get_or_default("even").push(2);
/// groups.get_or_default("even").push(4);
/// assert_eq!(groups.get(&"even"), Some(&vec![2, 4]));
/// ```
pub struct DefaultDict<K, V> {
    inner: Dict<K, V>,
    factory: Rc<dyn Fn() -> V>,
}

impl<K, V> DefaultDict<K, V> {
    pub fn new(factory: impl Fn() -> V + 'static) -> Self {
        Self {
            inner: Dict::new(),
            factory: Rc::new(factory),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &V)> + ExactSizeIterator {
        self.inner.iter()
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.inner.keys()
    }

    pub fn as_dict(&self) -> &Dict<K, V> {
        &self.inner
    }

    /// Drop the factory and keep the entries.
    pub fn into_dict(self) -> Dict<K, V> {
        self.inner
    }
}

impl<K: Eq + Hash + Clone, V> DefaultDict<K, V> {
    /// Read without inserting.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.inner.insert(key, value)
    }
}

impl<K: Eq + Hash + Clone + fmt::Debug, V> DefaultDict<K, V> {
    /// Return the value for `key`, inserting the factory's value first if it is absent. Never fails.
    pub fn get_or_default(&mut self, key: K) -> &mut V {
        let factory = &self.factory;
        self.inner.setdefault_with(key, |key| {
            tracing::debug!(key = ?key, "defaultdict: inserting default value");
            factory()
        })
    }

    /// ## Errors
    /// - `NotFoundError` if `key` is absent. The factory is not consulted.
    pub fn remove(&mut self, key: &K) -> Result<V> {
        self.inner
            .take(key)
            .ok_or_else(|| CoreError::not_found_in(KIND, format!("{key:?}")).into())
    }
}

impl<K: Clone, V: Clone> Clone for DefaultDict<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            factory: Rc::clone(&self.factory),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for DefaultDict<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "defaultdict({:?})", self.inner)
    }
}

impl<K: PyRepr, V: PyRepr> PyRepr for DefaultDict<K, V> {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        out.push_str("defaultdict(");
        write_map(out, self.inner.iter(), config);
        out.push(')');
    }
}

impl<K: PyRepr, V: PyRepr> fmt::Display for DefaultDict<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CollectionError;

    #[test]
    fn missing_key_gets_factory_value() {
        let mut d: DefaultDict<&str, i32> = DefaultDict::new(|| 0);
        *d.get_or_default("hits") += 1;
        *d.get_or_default("hits") += 1;
        assert_eq!(d.get(&"hits"), Some(&2));
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn get_does_not_insert() {
        let d: DefaultDict<&str, i32> = DefaultDict::new(|| 7);
        assert_eq!(d.get(&"x"), None);
        assert!(d.is_empty());
    }

    #[test]
    fn remove_missing_is_not_found() {
        let mut d: DefaultDict<&str, i32> = DefaultDict::new(|| 0);
        assert!(matches!(d.remove(&"x"), Err(CollectionError::NotFound(_))));
    }

    #[test]
    fn into_dict_keeps_entries() {
        let mut d: DefaultDict<i32, Vec<char>> = DefaultDict::new(Vec::new);
        d.get_or_default(1).push('a');
        let plain = d.into_dict();
        assert_eq!(plain.get(&1), Some(&vec!['a']));
    }

    #[test]
    fn repr() {
        let mut d: DefaultDict<&str, i32> = DefaultDict::new(|| 0);
        d.get_or_default("a");
        assert_eq!(d.to_string(), "defaultdict({'a': 0})");
    }
}
