//! Ordered, duplicate-free result sets
//!
//! Iteration order is the insertion order of whichever set operation built
//! the set, never a sorted order. Every operation below spells out the
//! order it produces:
//!
//! - `union`: elements of `self` in order, then new elements of `other`
//! - `intersect`, `difference`: elements of `self` in order, filtered
//! - `symmetric_difference`: `self - other`, then `other - self`
//! - `reversed`: exact reverse
//!
//! Equality compares elements only. Use [`ResultSet::sequence_eq`] when
//! order matters.

use indexmap::{Equivalent, IndexSet};
use std::hash::Hash;

/// An insertion-ordered set of selected elements
#[derive(Debug, Clone)]
pub struct ResultSet<T: Hash + Eq> {
    items: IndexSet<T>,
}

impl<T: Hash + Eq> Default for ResultSet<T> {
    fn default() -> Self {
        Self {
            items: IndexSet::new(),
        }
    }
}

impl<T: Hash + Eq + Clone> ResultSet<T> {
    /// Create an empty result set
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an element unless already present; returns whether it was added
    pub fn insert(&mut self, value: T) -> bool {
        self.items.insert(value)
    }

    /// Check membership
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        self.items.contains(value)
    }

    /// Iterate in order
    pub fn iter(&self) -> indexmap::set::Iter<'_, T> {
        self.items.iter()
    }

    /// Elements of `self`, then elements of `other` not already present
    pub fn union(&self, other: &Self) -> Self {
        let mut items = self.items.clone();
        items.extend(other.items.iter().cloned());
        Self { items }
    }

    /// Elements of `self` also in `other`, in `self` order
    pub fn intersect(&self, other: &Self) -> Self {
        self.iter()
            .filter(|item| other.items.contains(*item))
            .cloned()
            .collect()
    }

    /// Elements of `self` not in `other`, in `self` order
    pub fn difference(&self, other: &Self) -> Self {
        self.iter()
            .filter(|item| !other.items.contains(*item))
            .cloned()
            .collect()
    }

    /// Elements in exactly one of the two sets: `self - other`, then `other - self`
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let mut result = self.difference(other);
        result.items.extend(
            other
                .iter()
                .filter(|item| !self.items.contains(*item))
                .cloned(),
        );
        result
    }

    /// Check if every element of `self` is in `other`
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.iter().all(|item| other.items.contains(item))
    }

    /// The same elements in exactly reverse order
    pub fn reversed(&self) -> Self {
        self.iter().rev().cloned().collect()
    }

    /// Order-sensitive equality
    pub fn sequence_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }

    /// Materialize in order
    pub fn to_sequence(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }

    /// Materialize in order, consuming the set
    pub fn into_vec(self) -> Vec<T> {
        self.items.into_iter().collect()
    }
}

impl<T: Hash + Eq> PartialEq for ResultSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items.len() == other.items.len()
            && self.items.iter().all(|item| other.items.contains(item))
    }
}

impl<T: Hash + Eq> Eq for ResultSet<T> {}

impl<T: Hash + Eq> FromIterator<T> for ResultSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T: Hash + Eq> Extend<T> for ResultSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T: Hash + Eq> IntoIterator for ResultSet<T> {
    type Item = T;
    type IntoIter = indexmap::set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T: Hash + Eq> IntoIterator for &'a ResultSet<T> {
    type Item = &'a T;
    type IntoIter = indexmap::set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> ResultSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_duplicates_collapse_to_first_position() {
        let s = set(&["b", "a", "b", "c", "a"]);
        assert_eq!(s.to_sequence(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_union_orders_by_first_appearance() {
        let a = set(&["c", "a"]);
        let b = set(&["b", "a", "d"]);
        assert_eq!(a.union(&b).to_sequence(), vec!["c", "a", "b", "d"]);
        assert_eq!(b.union(&a).to_sequence(), vec!["b", "a", "d", "c"]);
    }

    #[test]
    fn test_intersect_and_difference_follow_left_operand() {
        let a = set(&["d", "b", "a"]);
        let b = set(&["a", "b", "c"]);
        assert_eq!(a.intersect(&b).to_sequence(), vec!["b", "a"]);
        assert_eq!(b.intersect(&a).to_sequence(), vec!["a", "b"]);
        assert_eq!(a.difference(&b).to_sequence(), vec!["d"]);
    }

    #[test]
    fn test_symmetric_difference() {
        let a = set(&["a", "b", "c"]);
        let b = set(&["d", "c", "e"]);
        assert_eq!(
            a.symmetric_difference(&b).to_sequence(),
            vec!["a", "b", "d", "e"]
        );
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = set(&["a", "b"]);
        let b = set(&["b", "a"]);
        assert_eq!(a, b);
        assert!(!a.sequence_eq(&b));
        assert!(a.sequence_eq(&b.reversed()));
    }

    #[test]
    fn test_subset_and_contains() {
        let a = set(&["a"]);
        let b = set(&["b", "a"]);
        assert!(a.is_subset_of(&b));
        assert!(!b.is_subset_of(&a));
        assert!(b.contains("a"));
        assert!(!b.contains("z"));
    }

    #[test]
    fn test_pairs() {
        let mut pairs: ResultSet<(String, String)> = ResultSet::new();
        assert!(pairs.insert(("a".to_string(), "A".to_string())));
        assert!(!pairs.insert(("a".to_string(), "A".to_string())));
        assert!(pairs.insert(("a".to_string(), "B".to_string())));
        assert_eq!(pairs.len(), 2);
    }
}
