//! Parameter validation errors.

use thiserror::Error;

/// Rejection reasons for selection parameters and identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    #[error("there must be at least one winner and less than 35, got {0}")]
    WinnersOutOfRange(u8),

    #[error("there must be at least two participants, got {0}")]
    TooFewParticipants(u32),

    #[error("winners ({winners}) must be less than or equal to participants ({participants})")]
    WinnersExceedParticipants { winners: u8, participants: u32 },

    #[error("committer key must not be empty")]
    EmptyCommitter,

    #[error("committer key is {0} bytes, longer than the 128-byte limit")]
    CommitterTooLong(usize),

    #[error("invalid commitment id: {0}")]
    InvalidCommitmentId(String),
}
