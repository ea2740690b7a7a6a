//! Customizable wrappers (`collections.UserDict`, `UserList`, `UserString`).
//!
//! A wrapper owns a base container plus a hooks value. Every write goes through the hooks:
//! - `before_*` runs before the base is touched and may transform the incoming value or reject the write
//!   by returning an error. A rejected write leaves the base unchanged.
//! - `after_*` observes the applied result.
//!
//! All hook methods have pass-through defaults, so a hooks type only overrides what it cares about.
//!
//! ```rust
//! use pycoll::errors::{CollectionError, Result};
//! use pycoll::user::{DictHooks, UserDict};
//!
//! struct NonNegative;
//!
//! impl DictHooks<&'static str, i64> for NonNegative {
//!     fn before_set(&mut self, _key: &&'static str, value: i64) -> Result<i64> {
//!         if value < 0 {
//!             return Err(CollectionError::Value("negative values are not allowed".into()));
//!         }
//!         Ok(value)
//!     }
//! }
//!
//! let mut stock = UserDict::new(NonNegative);
//! stock.insert("apples", 3).unwrap();
//! assert!(stock.insert("apples", -1).is_err());
//! assert_eq!(stock.get(&"apples"), Some(&3));
//! ```

use std::fmt;
use std::hash::Hash;

use pycoll_core::ContainerTypeId;
use pycoll_core::errors::CoreError;
use pycoll_core::index::{checked_index, clamp_insert_index};

use crate::dict::Dict;
use crate::errors::Result;
use crate::list::List;
use crate::repr::{PyRepr, ReprConfig};
use crate::text::Text;

/// Hooks for [`UserDict`] writes.
pub trait DictHooks<K, V> {
    /// Transform or reject a value before `key` is assigned.
    fn before_set(&mut self, _key: &K, value: V) -> Result<V> {
        Ok(value)
    }

    fn after_set(&mut self, _key: &K, _value: &V) {}

    /// Reject the removal of an existing `key` by returning an error.
    fn before_remove(&mut self, _key: &K) -> Result<()> {
        Ok(())
    }

    fn after_remove(&mut self, _key: &K, _value: &V) {}
}

/// Hooks for [`UserList`] writes. Indices passed to hooks are already normalized.
pub trait ListHooks<T> {
    fn before_insert(&mut self, _index: usize, item: T) -> Result<T> {
        Ok(item)
    }

    fn after_insert(&mut self, _index: usize, _item: &T) {}

    fn before_set(&mut self, _index: usize, item: T) -> Result<T> {
        Ok(item)
    }

    fn after_set(&mut self, _index: usize, _item: &T) {}

    fn before_remove(&mut self, _index: usize) -> Result<()> {
        Ok(())
    }

    fn after_remove(&mut self, _index: usize, _item: &T) {}
}

/// Hooks for [`UserString`] updates. `next` is the text that would replace `current`.
pub trait StringHooks {
    fn before_update(&mut self, _current: &Text, next: Text) -> Result<Text> {
        Ok(next)
    }

    fn after_update(&mut self, _text: &Text) {}
}

/// Pass-through hooks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl<K, V> DictHooks<K, V> for NoHooks {}
impl<T> ListHooks<T> for NoHooks {}
impl StringHooks for NoHooks {}

/// Emits one `info` event per applied write.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHooks;

impl<K: fmt::Debug, V: fmt::Debug> DictHooks<K, V> for LoggingHooks {
    fn after_set(&mut self, key: &K, value: &V) {
        tracing::info!(operation = "set", key = ?key, value = ?value, "userdict write");
    }

    fn after_remove(&mut self, key: &K, _value: &V) {
        tracing::info!(operation = "remove", key = ?key, "userdict write");
    }
}

impl<T: fmt::Debug> ListHooks<T> for LoggingHooks {
    fn after_insert(&mut self, index: usize, item: &T) {
        tracing::info!(operation = "insert", index, item = ?item, "userlist write");
    }

    fn after_set(&mut self, index: usize, item: &T) {
        tracing::info!(operation = "set", index, item = ?item, "userlist write");
    }

    fn after_remove(&mut self, index: usize, _item: &T) {
        tracing::info!(operation = "remove", index, "userlist write");
    }
}

impl StringHooks for LoggingHooks {
    fn after_update(&mut self, text: &Text) {
        tracing::info!(operation = "update", len = text.len(), "userstring write");
    }
}

/// Transforms every incoming value with a closure.
///
/// ```rust
/// use pycoll::user::{MapValues, UserList};
///
/// let mut doubled = UserList::new(MapValues(|x: i32| x * 2));
/// doubled.append(3).unwrap();
/// assert_eq!(doubled.data().as_slice(), &[6]);
/// ```
pub struct MapValues<F>(pub F);

impl<K, V, F: FnMut(V) -> V> DictHooks<K, V> for MapValues<F> {
    fn before_set(&mut self, _key: &K, value: V) -> Result<V> {
        Ok((self.0)(value))
    }
}

impl<T, F: FnMut(T) -> T> ListHooks<T> for MapValues<F> {
    fn before_insert(&mut self, _index: usize, item: T) -> Result<T> {
        Ok((self.0)(item))
    }

    fn before_set(&mut self, _index: usize, item: T) -> Result<T> {
        Ok((self.0)(item))
    }
}

impl<F: FnMut(Text) -> Text> StringHooks for MapValues<F> {
    fn before_update(&mut self, _current: &Text, next: Text) -> Result<Text> {
        Ok((self.0)(next))
    }
}

/// A [`Dict`] whose writes go through [`DictHooks`].
#[derive(Debug, Clone)]
pub struct UserDict<K, V, H = NoHooks> {
    data: Dict<K, V>,
    hooks: H,
}

impl<K, V, H> UserDict<K, V, H> {
    pub fn new(hooks: H) -> Self {
        Self {
            data: Dict::new(),
            hooks,
        }
    }

    pub fn data(&self) -> &Dict<K, V> {
        &self.data
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_inner(self) -> (Dict<K, V>, H) {
        (self.data, self.hooks)
    }
}

impl<K: Eq + Hash + Clone, V, H: DictHooks<K, V>> UserDict<K, V, H> {
    /// Wrap an existing dict. Its entries do not pass through the hooks.
    pub fn from_dict(data: Dict<K, V>, hooks: H) -> Self {
        Self { data, hooks }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.data.get(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.data.contains_key(key)
    }

    /// Assign `key`, running `before_set` first.
    ///
    /// ## Errors
    /// - Whatever `before_set` returns; the dict is unchanged.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        let value = self.hooks.before_set(&key, value)?;
        let previous = self.data.insert(key.clone(), value);
        if let Some(stored) = self.data.get(&key) {
            self.hooks.after_set(&key, stored);
        }
        Ok(previous)
    }

    /// Insert every pair. `before_set` sees all pairs before the dict is touched.
    ///
    /// ## Errors
    /// - The first error from `before_set`; no pair is applied.
    pub fn update<I: IntoIterator<Item = (K, V)>>(&mut self, pairs: I) -> Result<()> {
        let staged = pairs
            .into_iter()
            .map(|(k, v)| self.hooks.before_set(&k, v).map(|v| (k, v)))
            .collect::<Result<Vec<_>>>()?;
        for (k, v) in staged {
            self.data.insert(k.clone(), v);
            if let Some(stored) = self.data.get(&k) {
                self.hooks.after_set(&k, stored);
            }
        }
        Ok(())
    }
}

impl<K: Eq + Hash + Clone + fmt::Debug, V, H: DictHooks<K, V>> UserDict<K, V, H> {
    /// ## Errors
    /// - `NotFoundError` if `key` is absent.
    pub fn get_item(&self, key: &K) -> Result<&V> {
        self.data.get_item(key)
    }

    /// Remove `key`, running `before_remove` first.
    ///
    /// ## Errors
    /// - `NotFoundError` if `key` is absent, or the error from `before_remove`. Nothing is removed.
    pub fn remove(&mut self, key: &K) -> Result<V> {
        if !self.data.contains_key(key) {
            return Err(CoreError::not_found_in(ContainerTypeId::UserDict, format!("{key:?}")).into());
        }
        self.hooks.before_remove(key)?;
        let value = self.data.remove(key)?;
        self.hooks.after_remove(key, &value);
        Ok(value)
    }
}

impl<K: Eq + Hash + Clone, V, H: Default> Default for UserDict<K, V, H> {
    fn default() -> Self {
        Self::new(H::default())
    }
}

impl<K: PyRepr, V: PyRepr, H> PyRepr for UserDict<K, V, H> {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        self.data.write_repr(out, config);
    }
}

impl<K: PyRepr, V: PyRepr, H> fmt::Display for UserDict<K, V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

/// A [`List`] whose writes go through [`ListHooks`].
#[derive(Debug, Clone)]
pub struct UserList<T, H = NoHooks> {
    data: List<T>,
    hooks: H,
}

impl<T, H> UserList<T, H> {
    pub fn new(hooks: H) -> Self {
        Self {
            data: List::new(),
            hooks,
        }
    }

    pub fn data(&self) -> &List<T> {
        &self.data
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// ## Errors
    /// - `IndexError` if `index` is out of range.
    pub fn get(&self, index: i64) -> Result<&T> {
        self.data.get(index)
    }

    pub fn into_inner(self) -> (List<T>, H) {
        (self.data, self.hooks)
    }
}

impl<T, H: ListHooks<T>> UserList<T, H> {
    /// Wrap an existing list. Its items do not pass through the hooks.
    pub fn from_list(data: List<T>, hooks: H) -> Self {
        Self { data, hooks }
    }

    /// ## Errors
    /// - Whatever `before_insert` returns; the list is unchanged.
    pub fn append(&mut self, item: T) -> Result<()> {
        self.insert_at(self.data.len(), item)
    }

    /// Insert before `index` (clamped like `list.insert`).
    ///
    /// ## Errors
    /// - Whatever `before_insert` returns; the list is unchanged.
    pub fn insert(&mut self, index: i64, item: T) -> Result<()> {
        let i = clamp_insert_index(self.data.len(), index);
        self.insert_at(i, item)
    }

    /// Append every item. `before_insert` sees all items before the list is touched.
    ///
    /// ## Errors
    /// - The first error from `before_insert`; no item is appended.
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) -> Result<()> {
        let start = self.data.len();
        let staged = items
            .into_iter()
            .enumerate()
            .map(|(offset, item)| self.hooks.before_insert(start + offset, item))
            .collect::<Result<Vec<_>>>()?;
        for (offset, item) in staged.into_iter().enumerate() {
            self.data.append(item);
            if let Ok(stored) = self.data.get((start + offset) as i64) {
                self.hooks.after_insert(start + offset, stored);
            }
        }
        Ok(())
    }

    /// Replace the item at `index`, returning the old one.
    ///
    /// ## Errors
    /// - `IndexError` if `index` is out of range, or the error from `before_set`. Nothing is written.
    pub fn set(&mut self, index: i64, item: T) -> Result<T> {
        let i = checked_index(ContainerTypeId::UserList, self.data.len(), index)?;
        let item = self.hooks.before_set(i, item)?;
        let old = self.data.set(i as i64, item)?;
        if let Ok(stored) = self.data.get(i as i64) {
            self.hooks.after_set(i, stored);
        }
        Ok(old)
    }

    /// Remove and return the item at `index` (default: last).
    ///
    /// ## Errors
    /// - `IndexError` if empty or out of range, or the error from `before_remove`. Nothing is removed.
    pub fn pop(&mut self, index: Option<i64>) -> Result<T> {
        if self.data.is_empty() {
            return Err(CoreError::pop_from_empty(ContainerTypeId::UserList).into());
        }
        let i = checked_index(ContainerTypeId::UserList, self.data.len(), index.unwrap_or(-1))?;
        self.hooks.before_remove(i)?;
        let item = self.data.pop(Some(i as i64))?;
        self.hooks.after_remove(i, &item);
        Ok(item)
    }

    fn insert_at(&mut self, i: usize, item: T) -> Result<()> {
        let item = self.hooks.before_insert(i, item)?;
        self.data.insert(i as i64, item);
        if let Ok(stored) = self.data.get(i as i64) {
            self.hooks.after_insert(i, stored);
        }
        Ok(())
    }
}

impl<T: PartialEq, H: ListHooks<T>> UserList<T, H> {
    /// Remove the first item equal to `item`.
    ///
    /// ## Errors
    /// - `NotFoundError` if absent, or the error from `before_remove`.
    pub fn remove(&mut self, item: &T) -> Result<T> {
        let i = self.data.index(item)?;
        self.pop(Some(i as i64))
    }
}

impl<T, H: Default> Default for UserList<T, H> {
    fn default() -> Self {
        Self::new(H::default())
    }
}

impl<T: PyRepr, H> PyRepr for UserList<T, H> {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        self.data.write_repr(out, config);
    }
}

impl<T: PyRepr, H> fmt::Display for UserList<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

/// A [`Text`] holder whose updates go through [`StringHooks`].
///
/// `Text` itself is immutable; every "mutation" builds a new `Text` and swaps it in.
#[derive(Debug, Clone)]
pub struct UserString<H = NoHooks> {
    text: Text,
    hooks: H,
}

impl<H: StringHooks> UserString<H> {
    pub fn new(text: impl Into<Text>, hooks: H) -> Self {
        Self {
            text: text.into(),
            hooks,
        }
    }

    pub fn text(&self) -> &Text {
        &self.text
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn into_inner(self) -> (Text, H) {
        (self.text, self.hooks)
    }

    /// Replace the whole text.
    ///
    /// ## Errors
    /// - Whatever `before_update` returns; the text is unchanged.
    pub fn set(&mut self, next: impl Into<Text>) -> Result<()> {
        let next = self.hooks.before_update(&self.text, next.into())?;
        self.text = next;
        self.hooks.after_update(&self.text);
        Ok(())
    }

    /// ## Errors
    /// - Whatever `before_update` returns; the text is unchanged.
    pub fn append(&mut self, suffix: &str) -> Result<()> {
        let next = self.text.concat(suffix);
        self.set(next)
    }

    /// ## Errors
    /// - Whatever `before_update` returns; the text is unchanged.
    pub fn replace_all(&mut self, from: &str, to: &str) -> Result<()> {
        let next = self.text.replace(from, to);
        self.set(next)
    }
}

impl<H> PyRepr for UserString<H> {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        self.text.write_repr(out, config);
    }
}

impl<H> fmt::Display for UserString<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.text, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CollectionError;

    #[derive(Default)]
    struct Audit {
        writes: Vec<String>,
    }

    impl DictHooks<&'static str, i32> for Audit {
        fn before_set(&mut self, key: &&'static str, value: i32) -> Result<i32> {
            if key.starts_with('_') {
                return Err(CollectionError::Value(format!("private key {key}")));
            }
            Ok(value)
        }

        fn after_set(&mut self, key: &&'static str, value: &i32) {
            self.writes.push(format!("{key}={value}"));
        }

        fn before_remove(&mut self, key: &&'static str) -> Result<()> {
            if *key == "locked" {
                return Err(CollectionError::Immutable("locked cannot be removed".into()));
            }
            Ok(())
        }
    }

    #[test]
    fn dict_hooks_observe_and_reject() {
        let mut d = UserDict::new(Audit::default());
        d.insert("a", 1).unwrap();
        d.insert("locked", 2).unwrap();
        assert!(matches!(d.insert("_x", 3), Err(CollectionError::Value(_))));
        assert!(!d.contains_key(&"_x"));
        assert!(matches!(d.remove(&"locked"), Err(CollectionError::Immutable(_))));
        assert_eq!(d.get(&"locked"), Some(&2));
        assert!(matches!(d.remove(&"zzz"), Err(CollectionError::NotFound(_))));
        assert_eq!(d.hooks().writes, vec!["a=1", "locked=2"]);
    }

    #[test]
    fn no_hooks_is_plain_dict() {
        let mut d: UserDict<&str, i32> = UserDict::default();
        d.update([("a", 1), ("b", 2)]).unwrap();
        assert_eq!(d.remove(&"a").unwrap(), 1);
        assert_eq!(d.to_string(), "{'b': 2}");
    }

    struct EvenOnly;

    impl ListHooks<i32> for EvenOnly {
        fn before_insert(&mut self, _index: usize, item: i32) -> Result<i32> {
            if item % 2 != 0 {
                return Err(CollectionError::Value(format!("{item} is odd")));
            }
            Ok(item)
        }

        fn before_set(&mut self, index: usize, item: i32) -> Result<i32> {
            self.before_insert(index, item)
        }
    }

    #[test]
    fn list_rejected_write_leaves_list_unchanged() {
        let mut l = UserList::new(EvenOnly);
        l.extend([2, 4]).unwrap();
        assert!(l.append(5).is_err());
        assert!(l.set(0, 7).is_err());
        assert!(matches!(l.set(9, 8), Err(CollectionError::Index(_))));
        assert_eq!(l.data().as_slice(), &[2, 4]);
        l.insert(0, 0).unwrap();
        assert_eq!(l.pop(None).unwrap(), 4);
        assert_eq!(l.remove(&0).unwrap(), 0);
        assert_eq!(l.to_string(), "[2]");
    }

    struct NonNegative;

    impl DictHooks<&'static str, i32> for NonNegative {
        fn before_set(&mut self, key: &&'static str, value: i32) -> Result<i32> {
            if value < 0 {
                return Err(CollectionError::Value(format!("{key} cannot be negative")));
            }
            Ok(value)
        }
    }

    impl ListHooks<i32> for NonNegative {
        fn before_insert(&mut self, _index: usize, item: i32) -> Result<i32> {
            if item < 0 {
                return Err(CollectionError::Value(format!("{item} is negative")));
            }
            Ok(item)
        }
    }

    #[test]
    fn rejected_update_applies_no_pair() {
        let mut d = UserDict::new(NonNegative);
        d.insert("z", 0).unwrap();
        let err = d.update([("a", 1), ("b", -1)]).unwrap_err();
        assert!(matches!(err, CollectionError::Value(_)));
        assert_eq!(d.len(), 1);
        assert!(!d.contains_key(&"a"));
        d.update([("a", 1), ("b", 2)]).unwrap();
        assert_eq!(d.to_string(), "{'z': 0, 'a': 1, 'b': 2}");
    }

    #[test]
    fn rejected_extend_appends_nothing() {
        let mut l = UserList::new(NonNegative);
        l.append(9).unwrap();
        assert!(matches!(l.extend([1, 2, -3]), Err(CollectionError::Value(_))));
        assert_eq!(l.data().as_slice(), &[9]);
        l.extend([1, 2]).unwrap();
        assert_eq!(l.data().as_slice(), &[9, 1, 2]);
    }

    #[test]
    fn map_values_transforms_dict_writes() {
        let mut d = UserDict::new(MapValues(|s: String| s.to_uppercase()));
        d.insert(1, "quiet".to_string()).unwrap();
        assert_eq!(d.get(&1).map(String::as_str), Some("QUIET"));
    }

    #[test]
    fn user_string_swaps_in_new_text() {
        let mut s = UserString::new("Hello, World!", NoHooks);
        s.replace_all("World", "Python").unwrap();
        s.append("!").unwrap();
        assert_eq!(s.text(), &Text::new("Hello, Python!!"));
    }

    #[test]
    fn user_string_hooks_can_reject() {
        struct MaxLen(usize);
        impl StringHooks for MaxLen {
            fn before_update(&mut self, _current: &Text, next: Text) -> Result<Text> {
                if next.len() > self.0 {
                    return Err(CollectionError::Value("too long".into()));
                }
                Ok(next)
            }
        }
        let mut s = UserString::new("abc", MaxLen(4));
        s.append("d").unwrap();
        assert!(s.append("e").is_err());
        assert_eq!(s.to_string(), "abcd");
    }
}
