//! Condition part of a classifier.
use crate::{Perception, RandomSource, Symbol, DEFAULT_WILDCARD};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Capabilities the learning passes need from a condition representation.
///
/// The discrete-symbol [`Condition`] is the only implementation in this crate.
/// Another representation (e.g. interval-valued attributes) plugs into the
/// engine by implementing this trait.
pub trait Pattern {
    /// Number of attributes.
    fn len(&self) -> usize;

    /// Number of specified (non-wildcard) attributes.
    fn specificity(&self) -> usize;

    /// Returns `true` if every specified attribute equals the perceived value.
    fn matches(&self, perception: &Perception) -> bool;

    /// Overwrites the attributes where `diff` is specified.
    fn specialize(&mut self, diff: &Self);

    /// Sets attribute `idx` to the wildcard.
    fn generalize(&mut self, idx: usize);
}

/// Specifies the set of situations in which a classifier can be applied.
///
/// `None` is the wildcard ("don't care") and matches any value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Condition(Vec<Option<Symbol>>);

impl Condition {
    /// Constructs a condition of wildcards only.
    pub fn general(len: usize) -> Self {
        Self(vec![None; len])
    }

    /// Parses a condition, treating `wildcard` as the "don't care" symbol.
    pub fn parse(s: &str, wildcard: Symbol) -> Self {
        Self(parse_attributes(s, wildcard))
    }

    /// Returns attribute `idx`, `None` for a wildcard.
    pub fn get(&self, idx: usize) -> Option<Symbol> {
        self.0[idx]
    }

    /// Returns an iterator over the attributes.
    pub fn iter(&self) -> std::slice::Iter<'_, Option<Symbol>> {
        self.0.iter()
    }

    /// Returns `true` if all attributes are wildcards.
    pub fn is_general(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    /// Sets attribute `idx` to `symbol`.
    pub fn specialize_at(&mut self, idx: usize, symbol: Symbol) {
        self.0[idx] = Some(symbol);
    }

    /// Returns `true` if every specified attribute of `self` is specified
    /// with the same value in `other`.
    ///
    /// A wildcard in `other` only passes against a wildcard in `self`.
    /// Conditions of different lengths never cover each other.
    pub fn covers(&self, other: &Condition) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .zip(other.0.iter())
                .all(|(a, b)| a.is_none() || a == b)
    }

    /// Generalizes one specified attribute chosen uniformly at random.
    ///
    /// Returns `false` if there was nothing to generalize.
    pub fn generalize_specific_attribute_randomly<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> bool {
        let specified = self
            .0
            .iter()
            .enumerate()
            .filter_map(|(i, a)| a.map(|_| i))
            .collect::<Vec<_>>();

        if specified.is_empty() {
            return false;
        }

        let idx = specified[rng.below(specified.len())];
        self.generalize(idx);
        true
    }

    /// Returns `perception` with the specified attributes replaced by the
    /// values of the condition.
    pub fn overlay(&self, perception: &Perception) -> Perception {
        self.0
            .iter()
            .zip(perception.iter())
            .map(|(a, p)| a.unwrap_or(*p))
            .collect::<Vec<_>>()
            .into()
    }

    /// Formats the condition with the given wildcard symbol.
    pub fn format_with(&self, wildcard: Symbol) -> String {
        format_attributes(&self.0, wildcard)
    }
}

impl Pattern for Condition {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn specificity(&self) -> usize {
        self.0.iter().filter(|a| a.is_some()).count()
    }

    fn matches(&self, perception: &Perception) -> bool {
        debug_assert_eq!(self.0.len(), perception.len());
        self.0
            .iter()
            .zip(perception.iter())
            .all(|(a, p)| a.map_or(true, |a| a == *p))
    }

    fn specialize(&mut self, diff: &Self) {
        debug_assert_eq!(self.0.len(), diff.0.len());
        for (a, d) in self.0.iter_mut().zip(diff.0.iter()) {
            if d.is_some() {
                *a = *d;
            }
        }
    }

    fn generalize(&mut self, idx: usize) {
        self.0[idx] = None;
    }
}

impl From<&str> for Condition {
    fn from(s: &str) -> Self {
        Self::parse(s, DEFAULT_WILDCARD)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with(DEFAULT_WILDCARD))
    }
}

pub(crate) fn parse_attributes(s: &str, wildcard: Symbol) -> Vec<Option<Symbol>> {
    s.chars()
        .map(|c| if c == wildcard { None } else { Some(c) })
        .collect()
}

pub(crate) fn format_attributes(attrs: &[Option<Symbol>], wildcard: Symbol) -> String {
    attrs.iter().map(|a| a.unwrap_or(wildcard)).collect()
}
