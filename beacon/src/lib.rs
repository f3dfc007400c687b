//! Verifiable randomness for the reveal step.
//!
//! The shuffle engine only needs two things from the outside world:
//! - a [`RandomnessBeacon`] that returns the published randomness of a round, and
//!   refuses to answer for rounds that have not been published yet;
//! - a [`RoundClock`] telling which round it is now.
//!
//! [`drand`] implements both against the League of Entropy's drand network.

pub mod drand;
pub mod error;

pub use drand::{ChainInfo, DrandClient, DrandClock, DrandRound, DrandVerifier};
pub use error::BeaconError;

use shuffle_types::Round;

/// Source of publicly verifiable randomness, one 32-byte output per round.
pub trait RandomnessBeacon: Send + Sync {
    /// Randomness for `round`, bound to `user_data`.
    ///
    /// Fails with [`BeaconError::NotYetAvailable`] while the round has not been
    /// published; callers should treat that as transient and retry later.
    fn must_get(&self, round: Round, user_data: &[u8]) -> Result<[u8; 32], BeaconError>;

    /// Human-readable name of this beacon.
    fn name(&self) -> &str;
}

/// Reports the current beacon round.
pub trait RoundClock: Send + Sync {
    fn current_round(&self) -> Round;
}

impl<T: RandomnessBeacon + ?Sized> RandomnessBeacon for std::sync::Arc<T> {
    fn must_get(&self, round: Round, user_data: &[u8]) -> Result<[u8; 32], BeaconError> {
        (**self).must_get(round, user_data)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: RoundClock + ?Sized> RoundClock for std::sync::Arc<T> {
    fn current_round(&self) -> Round {
        (**self).current_round()
    }
}
