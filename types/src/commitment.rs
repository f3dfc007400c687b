//! Commitment and reveal records.

use serde::{Deserialize, Serialize};

use crate::{CommitmentId, Round, SelectionParams};

/// Selection parameters fixed by a committer before the randomness exists.
///
/// At most one is outstanding per committer. It is created by a commit, consumed
/// exactly once by a reveal and never mutated in between.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    /// Unique identifier, derived from every other field.
    pub id: CommitmentId,
    /// Round whose beacon output seeds the draw.
    pub target_round: Round,
    /// Round observed when the commitment was made.
    pub committed_at: Round,
    pub params: SelectionParams,
    /// Per-commitment randomness folded into `id` so repeated identical
    /// commitments never share an identifier.
    pub salt: [u8; 16],
}

impl Commitment {
    /// Rounds that were requested between commit and reveal.
    pub fn delay(&self) -> u64 {
        self.committed_at.rounds_until(self.target_round)
    }

    /// Whether the target round has been reached at `current`.
    pub fn is_revealable_at(&self, current: Round) -> bool {
        current.has_reached(self.target_round)
    }
}

/// The outcome of a reveal: winners bound to the commitment that fixed their parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub commitment_id: CommitmentId,
    /// `k` distinct participant indices in `[0, n)`, in draw order.
    pub winners: Vec<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commitment(committed_at: u64, target: u64) -> Commitment {
        Commitment {
            id: CommitmentId::new([7u8; 32]),
            target_round: Round::new(target),
            committed_at: Round::new(committed_at),
            params: SelectionParams::new(100, 5).unwrap(),
            salt: [0u8; 16],
        }
    }

    #[test]
    fn delay_is_round_difference() {
        assert_eq!(commitment(10, 14).delay(), 4);
    }

    #[test]
    fn revealable_from_target_round() {
        let c = commitment(10, 14);
        assert!(!c.is_revealable_at(Round::new(13)));
        assert!(c.is_revealable_at(Round::new(14)));
        assert!(c.is_revealable_at(Round::new(99)));
    }
}
