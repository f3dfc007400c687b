//! LMDB storage backend for the verifiable shuffle.
//!
//! Implements [`shuffle_store::CommitmentStore`] using the `heed` LMDB bindings.
//! Commitments live in a single named database keyed by committer.

pub mod commitment;
pub mod environment;
pub mod error;

pub use commitment::LmdbCommitmentStore;
pub use environment::LmdbEnvironment;
pub use error::LmdbError;
