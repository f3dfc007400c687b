use shuffle_pcg::PcgError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("cannot draw {winners} winners out of {participants} participants")]
    TooManyWinners { winners: u32, participants: u32 },

    #[error("random draw failed: {0}")]
    Rng(#[from] PcgError),
}
