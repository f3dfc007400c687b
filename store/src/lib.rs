//! Abstract storage for the verifiable shuffle.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these traits.
//! The engine depends only on the traits.

pub mod commitment;
pub mod error;

pub use commitment::CommitmentStore;
pub use error::StoreError;
