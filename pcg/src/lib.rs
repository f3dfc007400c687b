//! Deterministic pseudo-random generation for winner selection.
//!
//! [`Pcg128`] interleaves four classic PCG32 generators ([`Pcg32`]) to produce 128-bit
//! words, and [`Pcg128::bounded_random`] turns those into unbiased integers in an
//! arbitrary half-open range by modulo rejection. Everything here is a pure function of
//! the 32-byte seed: there is no hidden entropy source.

pub mod error;
pub mod lane;
pub mod pcg128;

pub use error::PcgError;
pub use lane::{Pcg32, PCG_MULTIPLIER};
pub use pcg128::{Pcg128, LANE_INCREMENTS};
