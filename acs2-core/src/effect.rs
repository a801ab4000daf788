//! Effect part of a classifier.
use crate::{
    condition::{format_attributes, parse_attributes},
    Perception, Symbol, DEFAULT_WILDCARD,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Anticipates the consequences of the classifier's action.
///
/// A wildcard (`None`) anticipates that the attribute does not change, a
/// specified symbol anticipates a change to that symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Effect(Vec<Option<Symbol>>);

impl Effect {
    /// Constructs an effect anticipating no change.
    pub fn general(len: usize) -> Self {
        Self(vec![None; len])
    }

    /// Parses an effect, treating `wildcard` as the pass-through symbol.
    pub fn parse(s: &str, wildcard: Symbol) -> Self {
        Self(parse_attributes(s, wildcard))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the effect has no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns attribute `idx`, `None` for a pass-through.
    pub fn get(&self, idx: usize) -> Option<Symbol> {
        self.0[idx]
    }

    /// Returns an iterator over the attributes.
    pub fn iter(&self) -> std::slice::Iter<'_, Option<Symbol>> {
        self.0.iter()
    }

    /// Number of specified attributes.
    pub fn number_of_specified_elements(&self) -> usize {
        self.0.iter().filter(|a| a.is_some()).count()
    }

    /// Returns `true` if any change is anticipated.
    pub fn does_anticipate_change(&self) -> bool {
        self.0.iter().any(Option::is_some)
    }

    /// Sets attribute `idx` to `symbol`.
    pub fn specialize_at(&mut self, idx: usize, symbol: Symbol) {
        self.0[idx] = Some(symbol);
    }

    /// Returns `true` if the effect can be specialized to explain `p0 -> p1`
    /// without altering an already specified attribute.
    ///
    /// Every specified attribute must already predict the value of `p1` and
    /// that attribute must actually have changed.
    pub fn is_specializable(&self, p0: &Perception, p1: &Perception) -> bool {
        debug_assert_eq!(self.0.len(), p0.len());
        debug_assert_eq!(self.0.len(), p1.len());
        self.0
            .iter()
            .zip(p0.iter().zip(p1.iter()))
            .all(|(e, (p0i, p1i))| match e {
                Some(e) => e == p1i && p0i != p1i,
                None => true,
            })
    }

    /// Returns `true` if the effect anticipates the transition `p0 -> p1`.
    ///
    /// A pass-through attribute must stay unchanged, a specified attribute
    /// must change to the specified value.
    pub fn anticipates_correctly(&self, p0: &Perception, p1: &Perception) -> bool {
        debug_assert_eq!(self.0.len(), p0.len());
        debug_assert_eq!(self.0.len(), p1.len());
        self.0
            .iter()
            .zip(p0.iter().zip(p1.iter()))
            .all(|(e, (p0i, p1i))| match e {
                Some(e) => e == p1i && p0i != p1i,
                None => p0i == p1i,
            })
    }

    /// The perception anticipated after acting in `p0`.
    pub fn anticipation(&self, p0: &Perception) -> Perception {
        self.0
            .iter()
            .zip(p0.iter())
            .map(|(e, p)| e.unwrap_or(*p))
            .collect::<Vec<_>>()
            .into()
    }

    /// Formats the effect with the given wildcard symbol.
    pub fn format_with(&self, wildcard: Symbol) -> String {
        format_attributes(&self.0, wildcard)
    }
}

impl From<&str> for Effect {
    fn from(s: &str) -> Self {
        Self::parse(s, DEFAULT_WILDCARD)
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with(DEFAULT_WILDCARD))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anticipates(effect: &str, p0: &str, p1: &str) -> bool {
        Effect::from(effect).anticipates_correctly(&Perception::from(p0), &Perception::from(p1))
    }

    #[test]
    fn test_anticipates_correctly() {
        assert!(anticipates("#1####0#", "00001111", "01001101"));
        assert!(anticipates("########", "01010101", "01010101"));
        assert!(anticipates("1#######", "01010101", "11010101"));
    }

    #[test]
    fn test_anticipates_incorrectly() {
        // unexpected change on a pass-through attribute
        assert!(!anticipates("########", "01010101", "11010101"));
        // specified attribute did not change
        assert!(!anticipates("#1######", "01010101", "01010101"));
        // specified attribute changed to another value
        assert!(!anticipates("#2######", "00000000", "01000000"));
    }

    #[test]
    fn test_is_specializable() {
        let p0 = Perception::from("00001111");
        let p1 = Perception::from("01001101");
        assert!(Effect::from("########").is_specializable(&p0, &p1));
        assert!(Effect::from("#1######").is_specializable(&p0, &p1));
        // specified attribute predicts the wrong value
        assert!(!Effect::from("#0######").is_specializable(&p0, &p1));
        // specified attribute that did not change
        assert!(!Effect::from("0#######").is_specializable(&p0, &p1));
    }

    #[test]
    fn test_anticipation() {
        let effect = Effect::from("#1##");
        assert_eq!(
            effect.anticipation(&Perception::from("0000")),
            Perception::from("0100")
        );
    }

    #[test]
    fn test_number_of_specified_elements() {
        assert_eq!(Effect::from("####").number_of_specified_elements(), 0);
        assert!(!Effect::from("####").does_anticipate_change());
        assert_eq!(Effect::from("1#0#").number_of_specified_elements(), 2);
        assert!(Effect::from("1#0#").does_anticipate_change());
    }
}
