//! Cryptographic primitives for the verifiable shuffle.
//!
//! - **Blake2b-256** for commitment identifiers and seed derivation
//! - OS randomness for per-commitment salts

pub mod derive;
pub mod error;
pub mod hash;

pub use derive::{commitment_id, derive_seed, fresh_salt};
pub use error::CryptoError;
pub use hash::{blake2b_256, blake2b_256_multi};
