//! Layered mapping view (`collections.ChainMap`).
//!
//! Lookups walk the layers from index 0 (highest priority) down. Writes and deletes only ever touch
//! layer 0, so lower layers act as read-only defaults.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use pycoll_core::errors::{CoreError, ErrorKind};

use crate::dict::Dict;
use crate::errors::Result;
use crate::repr::{PyRepr, ReprConfig, write_map};

/// An ordered stack of [`Dict`] layers. There is always at least one layer.
#[derive(Debug, Clone)]
pub struct ChainMap<K, V> {
    maps: Vec<Dict<K, V>>,
}

impl<K, V> Default for ChainMap<K, V> {
    fn default() -> Self {
        Self {
            maps: vec![Dict::new()],
        }
    }
}

impl<K, V> ChainMap<K, V> {
    /// A chain with a single empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from layers, highest priority first. An empty list yields one empty layer.
    pub fn from_maps(maps: Vec<Dict<K, V>>) -> Self {
        if maps.is_empty() {
            return Self::new();
        }
        Self { maps }
    }

    /// All layers, highest priority first.
    pub fn maps(&self) -> &[Dict<K, V>] {
        &self.maps
    }

    pub fn into_maps(self) -> Vec<Dict<K, V>> {
        self.maps
    }

    /// Number of layers.
    pub fn depth(&self) -> usize {
        self.maps.len()
    }
}

impl<K: Eq + Hash + Clone, V> ChainMap<K, V> {
    /// First value for `key` walking down the layers.
    pub fn lookup(&self, key: &K) -> Option<&V> {
        self.maps.iter().find_map(|m| m.get(key))
    }

    /// Read `key`, falling back to `default`. Nothing is inserted.
    pub fn get_or<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        self.lookup(key).unwrap_or(default)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.maps.iter().any(|m| m.contains_key(key))
    }

    /// Write into layer 0. Lower layers are never modified.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.first_mut().insert(key, value)
    }

    /// Distinct keys in Python order: the deepest layer's keys first, then keys first seen in higher layers.
    pub fn keys(&self) -> Vec<&K> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for map in self.maps.iter().rev() {
            for key in map.keys() {
                if seen.insert(key) {
                    out.push(key);
                }
            }
        }
        out
    }

    /// Number of distinct keys across all layers.
    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.iter().all(Dict::is_empty)
    }

    /// Visible `(key, value)` pairs, in [`ChainMap::keys`] order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.keys()
            .into_iter()
            .filter_map(move |k| self.lookup(k).map(|v| (k, v)))
    }

    fn first_mut(&mut self) -> &mut Dict<K, V> {
        if self.maps.is_empty() {
            self.maps.push(Dict::new());
        }
        &mut self.maps[0]
    }
}

impl<K: Eq + Hash + Clone + fmt::Debug, V> ChainMap<K, V> {
    /// Read `key` from the highest-priority layer that has it.
    ///
    /// ## Errors
    /// - `NotFoundError` if no layer has `key`.
    pub fn get(&self, key: &K) -> Result<&V> {
        self.lookup(key).ok_or_else(|| {
            tracing::debug!(key = ?key, layers = self.maps.len(), "chainmap: key missing from every layer");
            CoreError::with_message(ErrorKind::NotFound, format!("{key:?} not found in any layer")).into()
        })
    }

    /// Remove `key` from layer 0.
    ///
    /// ## Errors
    /// - `NotFoundError` if layer 0 lacks `key`, even when a lower layer has it. Nothing is removed.
    pub fn remove(&mut self, key: &K) -> Result<V> {
        self.first_mut().take(key).ok_or_else(|| {
            CoreError::with_message(ErrorKind::NotFound, format!("key not found in the first mapping: {key:?}"))
                .into()
        })
    }
}

impl<K: Eq + Hash + Clone, V: Clone> ChainMap<K, V> {
    /// A new chain with `layer` (or an empty dict) in front of copies of the current layers.
    pub fn new_child(&self, layer: Option<Dict<K, V>>) -> ChainMap<K, V> {
        let mut maps = Vec::with_capacity(self.maps.len() + 1);
        maps.push(layer.unwrap_or_default());
        maps.extend(self.maps.iter().cloned());
        ChainMap { maps }
    }

    /// A new chain of every layer but the first. A single-layer chain gives one empty layer.
    pub fn parents(&self) -> ChainMap<K, V> {
        ChainMap::from_maps(self.maps.iter().skip(1).cloned().collect())
    }

    /// Flatten into one dict; higher-priority layers win.
    pub fn to_dict(&self) -> Dict<K, V> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<K: PyRepr, V: PyRepr> PyRepr for ChainMap<K, V> {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        out.push_str("ChainMap(");
        for (i, map) in self.maps.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            write_map(out, map.iter(), config);
        }
        out.push(')');
    }
}

impl<K: PyRepr, V: PyRepr> fmt::Display for ChainMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CollectionError;

    fn settings() -> ChainMap<&'static str, &'static str> {
        let defaults = Dict::from([("theme", "light"), ("lang", "en")]);
        let user = Dict::from([("theme", "dark")]);
        ChainMap::from_maps(vec![user, defaults])
    }

    #[test]
    fn higher_layer_wins() {
        let cm = settings();
        assert_eq!(cm.get(&"theme").unwrap(), &"dark");
        assert_eq!(cm.get(&"lang").unwrap(), &"en");
        assert!(matches!(cm.get(&"font"), Err(CollectionError::NotFound(_))));
        assert_eq!(cm.get_or(&"font", &"mono"), &"mono");
    }

    #[test]
    fn writes_only_touch_first_layer() {
        let mut cm = settings();
        cm.insert("lang", "fr");
        assert_eq!(cm.maps()[1].get(&"lang"), Some(&"en"));
        assert_eq!(cm.get(&"lang").unwrap(), &"fr");
        assert_eq!(cm.remove(&"lang").unwrap(), "fr");
        assert_eq!(cm.get(&"lang").unwrap(), &"en");
        assert!(matches!(cm.remove(&"lang"), Err(CollectionError::NotFound(_))));
        assert_eq!(cm.maps()[1].len(), 2);
    }

    #[test]
    fn child_writes_leave_parent_layers_alone() {
        let base = settings();
        let mut child = base.new_child(None);
        child.insert("theme", "contrast");
        child.insert("font", "mono");
        assert_eq!(child.get(&"theme").unwrap(), &"contrast");
        assert_eq!(child.maps()[1..], base.maps()[..]);
        assert!(matches!(child.remove(&"lang"), Err(CollectionError::NotFound(_))));
        assert_eq!(child.parents().to_dict(), base.to_dict());
    }

    #[test]
    fn keys_follow_python_order() {
        let cm = settings();
        assert_eq!(cm.keys(), vec![&"theme", &"lang"]);
        assert_eq!(cm.len(), 2);
    }

    #[test]
    fn new_child_and_parents() {
        let cm = settings();
        let child = cm.new_child(Some(Dict::from([("theme", "solarized")])));
        assert_eq!(child.depth(), 3);
        assert_eq!(child.get(&"theme").unwrap(), &"solarized");
        assert_eq!(child.parents().get(&"theme").unwrap(), &"dark");
        assert_eq!(ChainMap::<i32, i32>::new().parents().depth(), 1);
    }

    #[test]
    fn to_dict_flattens() {
        let flat = settings().to_dict();
        assert_eq!(flat, Dict::from([("theme", "dark"), ("lang", "en")]));
    }

    #[test]
    fn repr() {
        assert_eq!(settings().to_string(), "ChainMap({'theme': 'dark'}, {'theme': 'light', 'lang': 'en'})");
    }
}
