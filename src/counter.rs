//! Frequency counter (`collections.Counter`).
//!
//! Counts are `usize`, so a count can never go negative: `subtract` drops keys whose result would be zero
//! or less, the way Python's `Counter.__sub__` does.

use std::fmt;
use std::hash::Hash;

use pycoll_core::ContainerTypeId;
use pycoll_core::errors::CoreError;

use crate::dict::Dict;
use crate::errors::Result;
use crate::repr::{PyRepr, ReprConfig, write_map};

const KIND: ContainerTypeId = ContainerTypeId::Counter;

/// Maps each distinct element to the number of times it was observed.
#[derive(Debug, Clone, PartialEq)]
pub struct Counter<T: Eq + Hash + Clone> {
    counts: Dict<T, usize>,
}

impl<T: Eq + Hash + Clone> Default for Counter<T> {
    fn default() -> Self {
        Self { counts: Dict::new() }
    }
}

impl<T: Eq + Hash + Clone> Counter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the count for `item` by one.
    pub fn observe(&mut self, item: T) {
        *self.counts.setdefault(item, 0) += 1;
    }

    /// Observe every element of `items`.
    pub fn update<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.observe(item);
        }
    }

    /// Count for `item`; unseen items count zero.
    pub fn get(&self, item: &T) -> usize {
        self.counts.get(item).copied().unwrap_or(0)
    }

    pub fn set_count(&mut self, item: T, count: usize) {
        self.counts.insert(item, count);
    }

    pub fn contains(&self, item: &T) -> bool {
        self.counts.contains_key(item)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// `(item, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, usize)> {
        self.counts.iter().map(|(k, v)| (k, *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &T> {
        self.counts.keys()
    }

    /// Add counts from both sides; a key missing on one side counts as zero.
    pub fn merge(&self, other: &Counter<T>) -> Counter<T> {
        let mut out = self.clone();
        for (k, v) in other.iter() {
            *out.counts.setdefault(k.clone(), 0) += v;
        }
        out
    }

    /// Subtract `other`'s counts, keeping only keys with a positive result.
    pub fn subtract(&self, other: &Counter<T>) -> Counter<T> {
        self.iter()
            .filter_map(|(k, v)| {
                let left = v.saturating_sub(other.get(k));
                (left > 0).then(|| (k.clone(), left))
            })
            .collect()
    }

    /// The `n` most common entries (all of them when `n` is `None`), highest count first.
    ///
    /// Ties keep first-seen order.
    pub fn most_common(&self, n: Option<usize>) -> Vec<(T, usize)> {
        let mut entries: Vec<(T, usize)> = self.iter().map(|(k, v)| (k.clone(), v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        if let Some(n) = n {
            entries.truncate(n);
        }
        entries
    }

    /// Every key repeated by its count, in first-seen order.
    pub fn elements(&self) -> Vec<T> {
        self.iter()
            .flat_map(|(k, v)| std::iter::repeat_n(k.clone(), v))
            .collect()
    }

    pub fn as_dict(&self) -> &Dict<T, usize> {
        &self.counts
    }
}

impl<T: Eq + Hash + Clone + fmt::Debug> Counter<T> {
    /// Remove `item` and return its count.
    ///
    /// ## Errors
    /// - `NotFoundError` if `item` was never counted.
    pub fn remove(&mut self, item: &T) -> Result<usize> {
        self.counts
            .take(item)
            .ok_or_else(|| CoreError::not_found_in(KIND, format!("{item:?}")).into())
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for Counter<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut out = Counter::new();
        out.update(iter);
        out
    }
}

impl<T: Eq + Hash + Clone> FromIterator<(T, usize)> for Counter<T> {
    fn from_iter<I: IntoIterator<Item = (T, usize)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

impl<T: Eq + Hash + Clone + PyRepr> PyRepr for Counter<T> {
    /// Entries render in `most_common` order, as Python does.
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        out.push_str("Counter(");
        if !self.counts.is_empty() {
            let ordered = self.most_common(None);
            write_map(out, ordered.iter().map(|(k, v)| (k, v)), config);
        }
        out.push(')');
    }
}

impl<T: Eq + Hash + Clone + PyRepr> fmt::Display for Counter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CollectionError;

    fn letters(s: &str) -> Counter<char> {
        s.chars().collect()
    }

    #[test]
    fn counts_and_missing_is_zero() {
        let c = letters("abracadabra");
        assert_eq!(c.get(&'a'), 5);
        assert_eq!(c.get(&'z'), 0);
        assert_eq!(c.total(), 11);
        assert_eq!(c.len(), 5);
    }

    #[test]
    fn most_common_ties_keep_first_seen_order() {
        let c = letters("abracadabra");
        assert_eq!(c.most_common(Some(3)), vec![('a', 5), ('b', 2), ('r', 2)]);
    }

    #[test]
    fn merge_sums_and_subtract_keeps_positive() {
        let a = letters("aab");
        let b = letters("abc");
        let m = a.merge(&b);
        assert_eq!((m.get(&'a'), m.get(&'b'), m.get(&'c')), (3, 2, 1));
        let s = a.subtract(&b);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![(&'a', 1)]);
    }

    #[test]
    fn elements_and_remove() {
        let mut c = letters("bab");
        assert_eq!(c.elements(), vec!['b', 'b', 'a']);
        assert_eq!(c.remove(&'b').unwrap(), 2);
        assert!(matches!(c.remove(&'q'), Err(CollectionError::NotFound(_))));
    }

    #[test]
    fn repr_uses_most_common_order() {
        let c: Counter<&str> = ["x", "y", "y"].into_iter().collect();
        assert_eq!(c.to_string(), "Counter({'y': 2, 'x': 1})");
        assert_eq!(Counter::<i32>::new().to_string(), "Counter()");
    }
}
