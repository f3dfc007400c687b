//! Nullable infrastructure for deterministic testing.
//!
//! Every external collaborator of the shuffle engine (round clock, randomness
//! beacon, execution budget, commitment storage) sits behind a trait. This
//! crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod beacon;
pub mod budget;
pub mod clock;
pub mod store;

pub use beacon::NullBeacon;
pub use budget::NullBudget;
pub use clock::NullClock;
pub use store::NullCommitmentStore;
