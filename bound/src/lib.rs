//! Combinatorial safety bound for winner selection.
//!
//! A draw of `k` ordered winners out of `n` participants has `n! / (n-k)!` possible
//! outcomes. The seed has 256 bits; to keep the seed-to-outcome mapping overwhelmingly
//! injective we require at least `2^128` seeds per outcome:
//!
//! ```text
//! log2(#seeds) - log2(#k-permutations) >= 128
//! log2(n! / (n-k)!) <= 128
//! ```
//!
//! The logarithm is computed with integer arithmetic only, in fixed point with
//! [`LOG_PRECISION`] fractional bits, so the check is bit-for-bit reproducible.

pub mod log2;
pub mod permutation;

pub use log2::{binary_logarithm, Log2Fixed, LOG_PRECISION, MAX_PRECISION};
pub use permutation::{
    is_safe_selection, permutation_log2, permutation_log2_with_precision, SAFETY_BITS,
};
