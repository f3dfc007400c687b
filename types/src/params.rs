//! Selection parameters: how many winners out of how many participants.
//!
//! `participants` is a 32-bit quantity: with 128 bits of admissible entropy a 32-bit
//! population still allows four winners in the worst case, while every intermediate
//! product of the bound computation stays within native 64-bit arithmetic.
//!
//! `winners` is capped at 34: `log2(34!) ~ 127.795` but `log2(35!) ~ 132.924`, so for
//! `k >= 35` no population size keeps the number of ordered outcomes under `2^128`.

use serde::{Deserialize, Serialize};

use crate::ParamsError;

/// Smallest population that makes a draw meaningful.
pub const MIN_PARTICIPANTS: u32 = 2;
/// Smallest number of winners.
pub const MIN_WINNERS: u8 = 1;
/// Largest number of winners for which a safe population exists.
pub const MAX_WINNERS: u8 = 34;

/// Validated `(n, k)` pair for a draw of `k` ordered winners out of `n` participants.
///
/// Deserialization runs the same checks as [`SelectionParams::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSelectionParams")]
pub struct SelectionParams {
    participants: u32,
    winners: u8,
}

#[derive(Deserialize)]
struct RawSelectionParams {
    participants: u32,
    winners: u8,
}

impl TryFrom<RawSelectionParams> for SelectionParams {
    type Error = ParamsError;

    fn try_from(raw: RawSelectionParams) -> Result<Self, Self::Error> {
        Self::new(raw.participants, raw.winners)
    }
}

impl SelectionParams {
    /// Validate and build a parameter pair.
    ///
    /// Checks run in a fixed order: winners range, participants floor, then `k <= n`.
    pub fn new(participants: u32, winners: u8) -> Result<Self, ParamsError> {
        if !(MIN_WINNERS..=MAX_WINNERS).contains(&winners) {
            return Err(ParamsError::WinnersOutOfRange(winners));
        }
        if participants < MIN_PARTICIPANTS {
            return Err(ParamsError::TooFewParticipants(participants));
        }
        if u32::from(winners) > participants {
            return Err(ParamsError::WinnersExceedParticipants {
                winners,
                participants,
            });
        }
        Ok(Self {
            participants,
            winners,
        })
    }

    pub fn participants(&self) -> u32 {
        self.participants
    }

    pub fn winners(&self) -> u8 {
        self.winners
    }

    /// Whether every participant wins (a full permutation is requested).
    pub fn is_full_permutation(&self) -> bool {
        u32::from(self.winners) == self.participants
    }
}
