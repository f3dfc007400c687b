//! Beacon round numbers.
//!
//! A round is the unit of time of the randomness beacon: randomness for round `r`
//! becomes publicly available only once round `r` has been reached.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A randomness-beacon round number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Round(u64);

impl Round {
    pub fn new(round: u64) -> Self {
        Self(round)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The round `delay` rounds after this one, or `None` on overflow.
    pub fn checked_add(&self, delay: u64) -> Option<Self> {
        self.0.checked_add(delay).map(Self)
    }

    /// Rounds remaining until `target` (zero once it has been reached).
    pub fn rounds_until(&self, target: Round) -> u64 {
        target.0.saturating_sub(self.0)
    }

    /// Whether `target` has been reached from this round.
    pub fn has_reached(&self, target: Round) -> bool {
        self.0 >= target.0
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for Round {
    fn from(round: u64) -> Self {
        Self(round)
    }
}
