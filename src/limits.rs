//! Limits that keep parsing and enumeration finite.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::grammar::Grammar;

/// Limits for the chart parser.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParseLimits {
    /// How many items a single chart position may hold before the parse is truncated.
    pub state_size: usize,
}

/// Limits for enumeration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumerationLimits {
    /// Ceiling on the cumulative cost of all trees built. A tree costs its height times its
    /// width.
    pub work: u64,
    /// How many expansion steps to take at most. When `None`, the grammar decides, see
    /// [`fn max_depth_for`].
    ///
    /// [`fn max_depth_for`]: EnumerationLimits::max_depth_for
    pub max_depth: Option<usize>,
}

/// Returned when enumeration stops before finishing a step.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EnumerationError {
    /// The cumulative cost of the trees built went above the work limit.
    WorkLimitExceeded,
}

impl Default for ParseLimits {
    fn default() -> Self {
        ParseLimits { state_size: 100 }
    }
}

impl Default for EnumerationLimits {
    fn default() -> Self {
        EnumerationLimits {
            work: 10_000,
            max_depth: None,
        }
    }
}

impl EnumerationLimits {
    /// Returns the depth limit for the grammar. Defaults to the number of nonterminals
    /// plus 9.
    pub fn max_depth_for(&self, grammar: &Grammar) -> usize {
        self.max_depth.unwrap_or_else(|| grammar.num_nonterminals() + 9)
    }
}

impl fmt::Display for EnumerationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            EnumerationError::WorkLimitExceeded => f.write_str("work limit exceeded"),
        }
    }
}

impl std::error::Error for EnumerationError {}
