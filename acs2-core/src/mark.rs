//! Mark of a classifier.
use crate::{Condition, Perception, RandomSource, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Records, per attribute, the perceived values in which the classifier
/// anticipated incorrectly.
///
/// A classifier whose mark is empty everywhere is "unmarked".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Mark(Vec<BTreeSet<Symbol>>);

impl Mark {
    /// Constructs an empty mark.
    pub fn new(len: usize) -> Self {
        Self(vec![BTreeSet::new(); len])
    }

    /// Returns `true` if any attribute is marked.
    pub fn is_marked(&self) -> bool {
        self.0.iter().any(|m| !m.is_empty())
    }

    /// Returns the marked values of attribute `idx`.
    pub fn get(&self, idx: usize) -> &BTreeSet<Symbol> {
        &self.0[idx]
    }

    /// Adds the perceived value to every attribute that is already marked.
    ///
    /// Returns `true` if an attribute was touched.
    pub fn complement(&mut self, perception: &Perception) -> bool {
        let mut changed = false;
        for (m, p) in self.0.iter_mut().zip(perception.iter()) {
            if !m.is_empty() {
                m.insert(*p);
                changed = true;
            }
        }
        changed
    }

    /// Marks the classifier with the given perception.
    ///
    /// An unmarked classifier gets marked at the attributes where its
    /// condition is a wildcard. An already marked classifier is complemented
    /// with the perceived values (see [`Mark::complement`]).
    ///
    /// Returns `true` if the mark was touched.
    pub fn set_using_condition(&mut self, condition: &Condition, perception: &Perception) -> bool {
        debug_assert_eq!(self.0.len(), perception.len());
        if self.is_marked() {
            return self.complement(perception);
        }

        let mut changed = false;
        for (i, m) in self.0.iter_mut().enumerate() {
            if condition.get(i).is_none() {
                m.insert(perception[i]);
                changed = true;
            }
        }
        changed
    }

    /// Determines the strongest differences between the mark and a perception.
    ///
    /// * Unique differences are marked attributes that do not contain the
    ///   perceived value. If any exist, exactly one of them, chosen uniformly
    ///   at random, is specified in the returned condition.
    /// * Fuzzy differences are attributes marked with more than one value.
    ///   If there are no unique differences, all of them are specified.
    ///
    /// Without any difference a general condition is returned.
    pub fn differences<R: RandomSource + ?Sized>(
        &self,
        perception: &Perception,
        rng: &mut R,
    ) -> Condition {
        debug_assert_eq!(self.0.len(), perception.len());
        let mut diff = Condition::general(self.0.len());
        let mut unique = vec![];
        let mut fuzzy = vec![];

        for (i, m) in self.0.iter().enumerate() {
            if !m.is_empty() && !m.contains(&perception[i]) {
                unique.push(i);
            } else if m.len() > 1 {
                fuzzy.push(i);
            }
        }

        if !unique.is_empty() {
            let i = unique[rng.below(unique.len())];
            diff.specialize_at(i, perception[i]);
        } else {
            for i in fuzzy {
                diff.specialize_at(i, perception[i]);
            }
        }

        diff
    }
}
