//! Fundamental types for the verifiable shuffle protocol.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! beacon rounds, committer keys, commitment identifiers, selection parameters and
//! the commitment/reveal records themselves.

pub mod commitment;
pub mod committer;
pub mod error;
pub mod hash;
pub mod params;
pub mod round;

pub use commitment::{Commitment, Reveal};
pub use committer::CommitterKey;
pub use error::ParamsError;
pub use hash::CommitmentId;
pub use params::{SelectionParams, MAX_WINNERS, MIN_PARTICIPANTS, MIN_WINNERS};
pub use round::Round;
