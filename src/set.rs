//! Hash sets: mutable [`Set`] and immutable, hashable [`FrozenSet`].
//!
//! Both share the same read-only algebra (union, intersection, ...). Set operations accept either kind on the
//! right-hand side and return the left operand's kind, as Python does.

use std::collections::HashSet;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitOr, BitXor, Sub};

use pycoll_core::ContainerTypeId;
use pycoll_core::errors::CoreError;

use crate::errors::Result;
use crate::repr::{PyRepr, ReprConfig, write_seq};

/// An unordered, mutable collection of unique elements.
#[derive(Clone, PartialEq, Eq)]
pub struct Set<T: Eq + Hash> {
    items: HashSet<T>,
}

/// An unordered, immutable collection of unique elements.
///
/// Mutating methods exist only to report `ImmutableError`; they take `&self` and never change the set.
#[derive(Clone, PartialEq, Eq)]
pub struct FrozenSet<T: Eq + Hash> {
    items: HashSet<T>,
}

macro_rules! impl_set_algebra {
    ($ty:ident) => {
        impl<T: Eq + Hash> $ty<T> {
            pub fn len(&self) -> usize {
                self.items.len()
            }

            pub fn is_empty(&self) -> bool {
                self.items.is_empty()
            }

            pub fn contains(&self, item: &T) -> bool {
                self.items.contains(item)
            }

            pub fn iter(&self) -> std::collections::hash_set::Iter<'_, T> {
                self.items.iter()
            }

            pub fn is_subset(&self, other: impl AsRef<HashSet<T>>) -> bool {
                self.items.is_subset(other.as_ref())
            }

            pub fn is_superset(&self, other: impl AsRef<HashSet<T>>) -> bool {
                self.items.is_superset(other.as_ref())
            }

            pub fn is_disjoint(&self, other: impl AsRef<HashSet<T>>) -> bool {
                self.items.is_disjoint(other.as_ref())
            }
        }

        impl<T: Eq + Hash + Clone> $ty<T> {
            /// Elements in either set.
            pub fn union(&self, other: impl AsRef<HashSet<T>>) -> $ty<T> {
                $ty {
                    items: self.items.union(other.as_ref()).cloned().collect(),
                }
            }

            /// Elements in both sets.
            pub fn intersection(&self, other: impl AsRef<HashSet<T>>) -> $ty<T> {
                $ty {
                    items: self.items.intersection(other.as_ref()).cloned().collect(),
                }
            }

            /// Elements in `self` but not in `other`.
            pub fn difference(&self, other: impl AsRef<HashSet<T>>) -> $ty<T> {
                $ty {
                    items: self.items.difference(other.as_ref()).cloned().collect(),
                }
            }

            /// Elements in exactly one of the sets.
            pub fn symmetric_difference(&self, other: impl AsRef<HashSet<T>>) -> $ty<T> {
                $ty {
                    items: self.items.symmetric_difference(other.as_ref()).cloned().collect(),
                }
            }
        }

        impl<T: Eq + Hash> Default for $ty<T> {
            fn default() -> Self {
                $ty { items: HashSet::new() }
            }
        }

        impl<T: Eq + Hash> AsRef<HashSet<T>> for $ty<T> {
            fn as_ref(&self) -> &HashSet<T> {
                &self.items
            }
        }

        impl<T: Eq + Hash> FromIterator<T> for $ty<T> {
            fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
                $ty {
                    items: iter.into_iter().collect(),
                }
            }
        }

        impl<T: Eq + Hash, const N: usize> From<[T; N]> for $ty<T> {
            fn from(items: [T; N]) -> Self {
                items.into_iter().collect()
            }
        }

        impl<T: Eq + Hash> IntoIterator for $ty<T> {
            type Item = T;
            type IntoIter = std::collections::hash_set::IntoIter<T>;

            fn into_iter(self) -> Self::IntoIter {
                self.items.into_iter()
            }
        }

        impl<'a, T: Eq + Hash> IntoIterator for &'a $ty<T> {
            type Item = &'a T;
            type IntoIter = std::collections::hash_set::Iter<'a, T>;

            fn into_iter(self) -> Self::IntoIter {
                self.items.iter()
            }
        }

        impl<T: Eq + Hash + Clone, R: AsRef<HashSet<T>>> BitOr<R> for &$ty<T> {
            type Output = $ty<T>;

            fn bitor(self, rhs: R) -> $ty<T> {
                self.union(rhs)
            }
        }

        impl<T: Eq + Hash + Clone, R: AsRef<HashSet<T>>> BitAnd<R> for &$ty<T> {
            type Output = $ty<T>;

            fn bitand(self, rhs: R) -> $ty<T> {
                self.intersection(rhs)
            }
        }

        impl<T: Eq + Hash + Clone, R: AsRef<HashSet<T>>> Sub<R> for &$ty<T> {
            type Output = $ty<T>;

            fn sub(self, rhs: R) -> $ty<T> {
                self.difference(rhs)
            }
        }

        impl<T: Eq + Hash + Clone, R: AsRef<HashSet<T>>> BitXor<R> for &$ty<T> {
            type Output = $ty<T>;

            fn bitxor(self, rhs: R) -> $ty<T> {
                self.symmetric_difference(rhs)
            }
        }

        impl<T: Eq + Hash + fmt::Debug> fmt::Debug for $ty<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_set().entries(self.items.iter()).finish()
            }
        }

        impl<T: Eq + Hash + PyRepr> fmt::Display for $ty<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.repr())
            }
        }
    };
}

impl_set_algebra!(Set);
impl_set_algebra!(FrozenSet);

impl<T: Eq + Hash> Set<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element. Returns false if it was already present.
    pub fn add(&mut self, item: T) -> bool {
        self.items.insert(item)
    }

    /// Remove an element if present. Returns whether it was present.
    pub fn discard(&mut self, item: &T) -> bool {
        self.items.remove(item)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn update<I: IntoIterator<Item = T>>(&mut self, items: I) {
        self.items.extend(items);
    }

    /// Keep only elements also in `other`.
    pub fn intersection_update(&mut self, other: impl AsRef<HashSet<T>>) {
        let other = other.as_ref();
        self.items.retain(|x| other.contains(x));
    }

    /// Drop every element that is in `other`.
    pub fn difference_update(&mut self, other: impl AsRef<HashSet<T>>) {
        let other = other.as_ref();
        self.items.retain(|x| !other.contains(x));
    }

    /// Convert into an immutable set.
    pub fn freeze(self) -> FrozenSet<T> {
        FrozenSet { items: self.items }
    }
}

impl<T: Eq + Hash + Clone> Set<T> {
    /// Remove and return an arbitrary element.
    ///
    /// ## Errors
    /// - `NotFoundError` if the set is empty.
    pub fn pop(&mut self) -> Result<T> {
        let item = self
            .items
            .iter()
            .next()
            .cloned()
            .ok_or_else(|| CoreError::empty(ContainerTypeId::Set))?;
        self.items.remove(&item);
        Ok(item)
    }
}

impl<T: Eq + Hash + fmt::Debug> Set<T> {
    /// Remove an element.
    ///
    /// ## Errors
    /// - `NotFoundError` if the element is absent; the set is unchanged.
    pub fn remove(&mut self, item: &T) -> Result<()> {
        if self.items.remove(item) {
            Ok(())
        } else {
            Err(CoreError::not_found_in(ContainerTypeId::Set, format!("{item:?}")).into())
        }
    }
}

impl<T: Eq + Hash> FrozenSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Errors
    /// - Always `ImmutableError`.
    pub fn add(&self, _item: T) -> Result<()> {
        Err(CoreError::does_not_support(ContainerTypeId::FrozenSet, "add").into())
    }

    /// ## Errors
    /// - Always `ImmutableError`.
    pub fn remove(&self, _item: &T) -> Result<()> {
        Err(CoreError::does_not_support(ContainerTypeId::FrozenSet, "remove").into())
    }

    /// ## Errors
    /// - Always `ImmutableError`.
    pub fn discard(&self, _item: &T) -> Result<()> {
        Err(CoreError::does_not_support(ContainerTypeId::FrozenSet, "discard").into())
    }

    /// ## Errors
    /// - Always `ImmutableError`.
    pub fn clear(&self) -> Result<()> {
        Err(CoreError::does_not_support(ContainerTypeId::FrozenSet, "clear").into())
    }
}

impl<T: Eq + Hash + Clone> FrozenSet<T> {
    /// Copy into a mutable set.
    pub fn thaw(&self) -> Set<T> {
        Set {
            items: self.items.clone(),
        }
    }
}

impl<T: Eq + Hash> Hash for FrozenSet<T> {
    /// Order-independent: element hashes are combined with a commutative sum.
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut acc: u64 = 0;
        for item in &self.items {
            let mut h = DefaultHasher::new();
            item.hash(&mut h);
            acc = acc.wrapping_add(h.finish());
        }
        state.write_usize(self.items.len());
        state.write_u64(acc);
    }
}

impl<T: Eq + Hash + PyRepr> PyRepr for Set<T> {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        if self.items.is_empty() {
            out.push_str("set()");
        } else {
            write_seq(out, "{", "}", self.items.iter(), config);
        }
    }
}

impl<T: Eq + Hash + PyRepr> PyRepr for FrozenSet<T> {
    fn write_repr(&self, out: &mut String, config: &ReprConfig) {
        if self.items.is_empty() {
            out.push_str("frozenset()");
        } else {
            write_seq(out, "frozenset({", "})", self.items.iter(), config);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CollectionError;

    fn sorted<T: Ord + Clone, S: AsRef<HashSet<T>>>(s: S) -> Vec<T> {
        let mut v: Vec<T> = s.as_ref().iter().cloned().collect();
        v.sort();
        v
    }

    #[test]
    fn algebra() {
        let a = Set::from([1, 2, 3, 4]);
        let b = Set::from([3, 4, 5]);
        assert_eq!(sorted(&a | &b), vec![1, 2, 3, 4, 5]);
        assert_eq!(sorted(&a & &b), vec![3, 4]);
        assert_eq!(sorted(&a - &b), vec![1, 2]);
        assert_eq!(sorted(&a ^ &b), vec![1, 2, 5]);
    }

    #[test]
    fn add_remove_discard() {
        let mut s = Set::new();
        assert!(s.add("a"));
        assert!(!s.add("a"));
        assert!(s.remove(&"a").is_ok());
        assert!(matches!(s.remove(&"a"), Err(CollectionError::NotFound(_))));
        assert!(!s.discard(&"a"));
        assert!(matches!(s.pop(), Err(CollectionError::NotFound(_))));
    }

    #[test]
    fn frozen_set_rejects_mutation() {
        let f = FrozenSet::from([1, 2]);
        assert!(matches!(f.add(3), Err(CollectionError::Immutable(_))));
        assert!(matches!(f.remove(&1), Err(CollectionError::Immutable(_))));
        assert_eq!(sorted(&f), vec![1, 2]);
    }

    #[test]
    fn empty_frozen_set_is_empty() {
        let f: FrozenSet<i32> = FrozenSet::new();
        assert!(f.is_empty());
        assert_eq!(f.to_string(), "frozenset()");
    }

    #[test]
    fn frozen_sets_nest_and_hash_independent_of_order() {
        let mut outer: Set<FrozenSet<i32>> = Set::new();
        outer.add(FrozenSet::from([1, 2, 3]));
        assert!(!outer.add(FrozenSet::from([3, 2, 1])));
        assert_eq!(outer.len(), 1);
    }

    #[test]
    fn cross_kind_ops_return_left_kind() {
        let s = Set::from([1, 2]);
        let f = FrozenSet::from([2, 3]);
        let u: FrozenSet<i32> = &f | &s;
        assert_eq!(sorted(&u), vec![1, 2, 3]);
        let mut m = s.clone();
        m.difference_update(&f);
        assert_eq!(sorted(&m), vec![1]);
    }

    #[test]
    fn repr() {
        assert_eq!(Set::from(["x"]).to_string(), "{'x'}");
        assert_eq!(Set::<i32>::new().to_string(), "set()");
        assert_eq!(FrozenSet::from([1]).to_string(), "frozenset({1})");
    }
}
