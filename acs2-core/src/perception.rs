//! Perception of the environment.
use serde::{Deserialize, Serialize};
use std::{fmt, ops::Index};

/// A single attribute value of a perception.
pub type Symbol = char;

/// The default "don't care" symbol of conditions and effects.
pub const DEFAULT_WILDCARD: Symbol = '#';

/// A fixed-length snapshot of the environment state, sensed once per step.
///
/// Perceptions are immutable and compared element-wise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Perception(Vec<Symbol>);

impl Perception {
    /// Constructs a perception from its attribute values.
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the perception has no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the attribute values.
    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.0.iter()
    }

    /// Returns the attribute values.
    pub fn as_slice(&self) -> &[Symbol] {
        &self.0
    }
}

impl Index<usize> for Perception {
    type Output = Symbol;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.0[idx]
    }
}

impl From<&str> for Perception {
    fn from(s: &str) -> Self {
        Self(s.chars().collect())
    }
}

impl From<Vec<Symbol>> for Perception {
    fn from(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }
}

impl fmt::Display for Perception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in self.0.iter() {
            write!(f, "{}", s)?;
        }
        Ok(())
    }
}
