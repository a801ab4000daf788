//! Views over the population.
use super::ClassifierId;
use std::collections::HashSet;

/// Ordered set of classifier ids.
///
/// Insertion order is kept, which makes every pass iterating a set
/// deterministic given its random source. Membership tests are constant
/// time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifierSet {
    ids: Vec<ClassifierId>,
    index: HashSet<ClassifierId>,
}

/// Classifiers whose condition matches the current perception.
pub type MatchSet = ClassifierSet;

/// Classifiers of a match set advocating the executed action.
pub type ActionSet = ClassifierSet;

impl ClassifierSet {
    /// Constructs an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of classifiers in the set.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns `true` if the set holds `id`.
    pub fn contains(&self, id: ClassifierId) -> bool {
        self.index.contains(&id)
    }

    /// Appends `id` unless it is already in the set.
    ///
    /// Returns `true` if the id was appended.
    pub fn push(&mut self, id: ClassifierId) -> bool {
        if !self.index.insert(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Removes `id` from the set.
    ///
    /// Returns `true` if the id was in the set.
    pub fn remove(&mut self, id: ClassifierId) -> bool {
        if !self.index.remove(&id) {
            return false;
        }
        self.ids.retain(|&i| i != id);
        true
    }

    /// Returns an iterator over the ids.
    pub fn iter(&self) -> impl Iterator<Item = ClassifierId> + '_ {
        self.ids.iter().copied()
    }

    /// Returns the ids as a slice.
    pub fn as_slice(&self) -> &[ClassifierId] {
        &self.ids
    }

    /// Removes all ids.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.index.clear();
    }
}

impl Extend<ClassifierId> for ClassifierSet {
    fn extend<T: IntoIterator<Item = ClassifierId>>(&mut self, iter: T) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.ids.reserve(lower);
        self.index.reserve(lower);
        for id in iter {
            self.push(id);
        }
    }
}

impl FromIterator<ClassifierId> for ClassifierSet {
    fn from_iter<T: IntoIterator<Item = ClassifierId>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_ignores_duplicates() {
        let mut set = ClassifierSet::new();
        assert!(set.push(ClassifierId(3)));
        assert!(set.push(ClassifierId(1)));
        assert!(!set.push(ClassifierId(3)));
        assert_eq!(set.as_slice(), &[ClassifierId(3), ClassifierId(1)]);
    }

    #[test]
    fn test_remove() {
        let mut set: ClassifierSet = (0..4).map(ClassifierId).collect();
        assert!(set.remove(ClassifierId(2)));
        assert!(!set.remove(ClassifierId(2)));
        assert_eq!(set.len(), 3);
        assert!(!set.contains(ClassifierId(2)));
        assert_eq!(
            set.as_slice(),
            &[ClassifierId(0), ClassifierId(1), ClassifierId(3)]
        );

        assert!(set.push(ClassifierId(2)));
        assert_eq!(set.as_slice().last(), Some(&ClassifierId(2)));
    }

    #[test]
    fn test_collecting_many_ids_keeps_order() {
        let ids = (0..50_000).rev().chain(0..50_000).map(ClassifierId);
        let set: ClassifierSet = ids.collect();
        assert_eq!(set.len(), 50_000);
        assert_eq!(set.as_slice().first(), Some(&ClassifierId(49_999)));
        assert_eq!(set.as_slice().last(), Some(&ClassifierId(0)));
        assert!(set.contains(ClassifierId(25_000)));

        let mut set = set;
        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(ClassifierId(25_000)));
    }
}
