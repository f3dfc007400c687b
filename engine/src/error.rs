use shuffle_beacon::BeaconError;
use shuffle_budget::BudgetError;
use shuffle_crypto::CryptoError;
use shuffle_selection::SelectionError;
use shuffle_store::StoreError;
use shuffle_types::{ParamsError, Round};
use thiserror::Error;

/// Coarse classification of a [`ShuffleError`], for callers deciding whether
/// to fix their inputs, wait, or give up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad inputs; the same call will keep failing.
    Validation,
    /// The call does not fit the committer's current protocol state.
    State,
    /// The target round or its randomness does not exist yet. Retry later.
    NotYetAvailable,
    /// The execution budget could not be topped up.
    ResourceExhaustion,
    /// Storage, beacon transport or another collaborator failed.
    Internal,
}

/// A commit request the engine refuses to record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("delay of {delay} rounds is below the safety gap of {gap}")]
    DelayBelowSafetyGap { delay: u64, gap: u64 },

    #[error(transparent)]
    Params(#[from] ParamsError),

    #[error("choosing {winners} of {participants} exceeds 128 bits of seed entropy")]
    UnsafeSelectionSize { participants: u32, winners: u8 },

    #[error("{committer} already has an unrevealed commitment")]
    CommitmentOutstanding { committer: String },

    #[error("target round overflows: {current} + {delay}")]
    RoundOverflow { current: Round, delay: u64 },
}

#[derive(Debug, Error)]
pub enum ShuffleError {
    #[error("invalid commitment: {0}")]
    Validation(#[from] ValidationError),

    #[error("{committer} has no outstanding commitment")]
    NoCommitment { committer: String },

    #[error("target round {target} not reached (current round {current})")]
    RoundNotElapsed { current: Round, target: Round },

    #[error("beacon randomness for round {round} is not published yet")]
    BeaconPending { round: Round },

    #[error("execution budget: {0}")]
    Budget(#[from] BudgetError),

    #[error("beacon error: {0}")]
    Beacon(BeaconError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("selection error: {0}")]
    Selection(#[from] SelectionError),

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("reveal task failed: {0}")]
    Task(String),
}

impl ShuffleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShuffleError::Validation(_) => ErrorKind::Validation,
            ShuffleError::NoCommitment { .. } => ErrorKind::State,
            ShuffleError::RoundNotElapsed { .. } | ShuffleError::BeaconPending { .. } => {
                ErrorKind::NotYetAvailable
            }
            ShuffleError::Budget(_) => ErrorKind::ResourceExhaustion,
            ShuffleError::Beacon(_)
            | ShuffleError::Store(_)
            | ShuffleError::Selection(_)
            | ShuffleError::Crypto(_)
            | ShuffleError::Task(_) => ErrorKind::Internal,
        }
    }

    /// Whether retrying the same call later can succeed without any change.
    pub fn is_transient(&self) -> bool {
        self.kind() == ErrorKind::NotYetAvailable
    }
}

impl From<ParamsError> for ShuffleError {
    fn from(e: ParamsError) -> Self {
        ShuffleError::Validation(ValidationError::Params(e))
    }
}

impl From<BeaconError> for ShuffleError {
    fn from(e: BeaconError) -> Self {
        match e {
            BeaconError::NotYetAvailable { round } => ShuffleError::BeaconPending {
                round: Round::new(round),
            },
            other => ShuffleError::Beacon(other),
        }
    }
}
