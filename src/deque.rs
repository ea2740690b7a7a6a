//! Double-ended queue (`collections.deque`), optionally bounded.

use std::collections::VecDeque;
use std::fmt::{self, Write as _};

use pycoll_core::ContainerTypeId;
use pycoll_core::errors::CoreError;
use pycoll_core::index::{checked_index, effective_rotation};

use crate::errors::Result;
use crate::repr::{PyRepr, ReprConfig, write_seq};

const KIND: ContainerTypeId = ContainerTypeId::Deque;

/// A ring buffer with O(1) pushes and pops at both ends.
///
/// With a `maxlen`, appending to a full deque discards an item from the opposite end.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Deque<T> {
    items: VecDeque<T>,
    maxlen: Option<usize>,
}

impl<T> Deque<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
            maxlen: None,
        }
    }

    /// An empty deque that never holds more than `maxlen` items.
    pub fn with_maxlen(maxlen: usize) -> Self {
        Self {
            items: VecDeque::new(),
            maxlen: Some(maxlen),
        }
    }

    pub fn maxlen(&self) -> Option<usize> {
        self.maxlen
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
        self.items.iter()
    }

    fn is_full(&self) -> bool {
        self.maxlen.is_some_and(|max| self.items.len() >= max)
    }

    /// Push on the right. A full bounded deque drops its leftmost item first.
    pub fn append(&mut self, item: T) {
        if self.maxlen == Some(0) {
            return;
        }
        if self.is_full() {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    /// Push on the left. A full bounded deque drops its rightmost item first.
    pub fn append_left(&mut self, item: T) {
        if self.maxlen == Some(0) {
            return;
        }
        if self.is_full() {
            self.items.pop_back();
        }
        self.items.push_front(item);
    }

    /// ## Errors
    /// - `IndexError` if the deque is empty.
    pub fn pop(&mut self) -> Result<T> {
        self.items.pop_back().ok_or_else(|| CoreError::pop_from_empty(KIND).into())
    }

    /// ## Errors
    /// - `IndexError` if the deque is empty.
    pub fn pop_left(&mut self) -> Result<T> {
        self.items.pop_front().ok_or_else(|| CoreError::pop_from_empty(KIND).into())
    }

    pub fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.append(item);
        }
    }

    /// Append each item on the left in turn, so the input ends up reversed.
    pub fn extend_left<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.append_left(item);
        }
    }

    /// Rotate `n` steps to the right (negative: to the left).
    pub fn rotate(&mut self, n: i64) {
        let steps = effective_rotation(self.items.len(), n);
        if steps == 0 {
            return;
        }
        tracing::trace!(n, steps, len = self.items.len(), "deque: rotate");
        self.items.rotate_right(steps);
    }

    /// ## Errors
    /// - `IndexError` if `index` is out of range.
    pub fn get(&self, index: i64) -> Result<&T> {
        let i = checked_index(KIND, self.items.len(), index)?;
        Ok(&self.items[i])
    }

    /// ## Errors
    /// - `IndexError` if `index` is out of range; nothing is written.
    pub fn set(&mut self, index: i64, item: T) -> Result<()> {
        let i = checked_index(KIND, self.items.len(), index)?;
        self.items[i] = item;
        Ok(())
    }

    pub fn reverse(&mut self) {
        self.items.make_contiguous().reverse();
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: PartialEq> Deque<T> {
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    pub fn count(&self, item: &T) -> usize {
        self.items.iter().filter(|x| *x == item).count()
    }
}

impl<T: PartialEq + fmt::Debug> Deque<T> {
    /// Remove the first occurrence of `item`.
    ///
    /// ## Errors
    /// - `NotFoundError` if `item` is absent.
    pub fn remove(&mut self, item: &T) -> Result<()> {
        let i = self
            .items
            .iter()
            .position(|x| x == item)
            .ok_or_else(|| CoreError::not_found_in(KIND, format!("{item:?}")))?;
        self.items.remove(i);
        Ok(())
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
            maxlen: None,
        }
    }
}

impl<T> From<Vec<T>> for Deque<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: items.into(),
            maxlen: None,
        }
    }
}

impl<T> IntoIterator for Deque<T> {
    type Item = T;
    type IntoIter = std::collections::vec_deque::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: PyRepr> PyRepr for Deque<T> {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        out.push_str("deque(");
        write_seq(out, "[", "]", self.items.iter(), config);
        if let Some(max) = self.maxlen {
            let _ = write!(out, ", maxlen={max}");
        }
        out.push(')');
    }
}

impl<T: PyRepr> fmt::Display for Deque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CollectionError;

    fn items<T: Clone>(d: &Deque<T>) -> Vec<T> {
        d.iter().cloned().collect()
    }

    #[test]
    fn rotate_both_ways() {
        let mut d: Deque<i32> = (1..=5).collect();
        d.rotate(2);
        assert_eq!(items(&d), vec![4, 5, 1, 2, 3]);
        d.rotate(-2);
        assert_eq!(items(&d), vec![1, 2, 3, 4, 5]);
        d.rotate(7);
        assert_eq!(items(&d), vec![4, 5, 1, 2, 3]);
    }

    #[test]
    fn rotate_empty_is_noop() {
        let mut d: Deque<i32> = Deque::new();
        d.rotate(3);
        assert!(d.is_empty());
    }

    #[test]
    fn huge_maxlen_is_a_cap_not_an_allocation() {
        let mut d: Deque<u64> = Deque::with_maxlen(usize::MAX);
        d.append(1);
        d.append_left(0);
        assert_eq!(d.len(), 2);
        assert_eq!(d.maxlen(), Some(usize::MAX));
    }

    #[test]
    fn bounded_drops_from_opposite_end() {
        let mut d = Deque::with_maxlen(3);
        d.extend([1, 2, 3]);
        d.append(4);
        assert_eq!(items(&d), vec![2, 3, 4]);
        d.append_left(0);
        assert_eq!(items(&d), vec![0, 2, 3]);
    }

    #[test]
    fn extend_left_reverses_input() {
        let mut d = Deque::from(vec![3]);
        d.extend_left([2, 1]);
        assert_eq!(items(&d), vec![1, 2, 3]);
    }

    #[test]
    fn pops_and_errors() {
        let mut d = Deque::from(vec![1, 2]);
        assert_eq!(d.pop_left().unwrap(), 1);
        assert_eq!(d.pop().unwrap(), 2);
        let err = d.pop().unwrap_err();
        assert_eq!(err.to_string(), "IndexError: pop from an empty deque");
        assert!(matches!(d.pop_left(), Err(CollectionError::Index(_))));
        assert!(matches!(d.remove(&9), Err(CollectionError::NotFound(_))));
    }

    #[test]
    fn index_access() {
        let mut d = Deque::from(vec!['a', 'b', 'c']);
        assert_eq!(d.get(-1).unwrap(), &'c');
        d.set(0, 'z').unwrap();
        assert!(matches!(d.set(3, 'q'), Err(CollectionError::Index(_))));
        d.reverse();
        assert_eq!(items(&d), vec!['c', 'b', 'z']);
    }

    #[test]
    fn repr() {
        let mut d = Deque::with_maxlen(3);
        d.append(1);
        assert_eq!(d.to_string(), "deque([1], maxlen=3)");
        assert_eq!(Deque::from(vec![1, 2]).to_string(), "deque([1, 2])");
    }
}
