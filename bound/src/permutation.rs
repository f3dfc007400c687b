//! `log2(n! / (n-k)!)` without floating point.
//!
//! `log2(n (n-1) ... (n-k+1)) = log2(n) + log2(n-1) + ... + log2(n-k+1)`, and by the
//! same law consecutive factors can be multiplied together first. The product is
//! grown while it stays below 2^63 and only then folded into the running sum, which
//! both reduces the number of logarithm evaluations and hands each one the widest
//! argument available.

use crate::log2::{log2_fixed, Log2Fixed, LOG_PRECISION, MAX_PRECISION};

/// Maximum admissible `log2(#k-permutations)`.
pub const SAFETY_BITS: u64 = 128;

/// `log2(n! / (n-k)!)` at [`LOG_PRECISION`]. `None` when `k > n`.
pub fn permutation_log2(n: u32, k: u32) -> Option<Log2Fixed> {
    permutation_log2_with_precision(n, k, LOG_PRECISION)
}

/// `log2(n! / (n-k)!)` with `precision` fractional bits.
///
/// `None` when `k > n`, when `precision` exceeds [`MAX_PRECISION`], or when the
/// fixed-point sum does not fit in 64 bits.
pub fn permutation_log2_with_precision(n: u32, k: u32, precision: u32) -> Option<Log2Fixed> {
    if k > n || precision > MAX_PRECISION {
        return None;
    }

    let mut product = 1u64;
    let mut sum = 0u64;
    for factor in u64::from(n - k) + 1..=u64::from(n) {
        match product.checked_mul(factor) {
            Some(next) if next.leading_zeros() > 0 => product = next,
            _ => {
                sum = sum.checked_add(log2_fixed(product, precision))?;
                product = factor;
            }
        }
    }
    sum = sum.checked_add(log2_fixed(product, precision))?;

    Some(Log2Fixed::new(sum, precision))
}

/// Whether drawing `k` ordered winners out of `n` keeps `log2(n!/(n-k)!) <= 128`.
pub fn is_safe_selection(n: u32, k: u32) -> bool {
    permutation_log2(n, k)
        .map(|log| log <= Log2Fixed::from_bits(SAFETY_BITS, LOG_PRECISION))
        .unwrap_or(false)
}
