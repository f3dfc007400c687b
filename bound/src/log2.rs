//! Fixed-point binary logarithm by repeated squaring.
//!
//! The integer part is the position of the most significant bit. For the fractional
//! part, `x` is read as a fixed-point mantissa in `[1, 2)` scaled by `2^int`; since
//! `log2(m^2) = 2 log2(m)`, squaring the mantissa and checking whether it reached 2
//! yields the next fractional bit. Squaring adds no information, so precision is best
//! when `x` uses as many of its 63 allowed bits as possible.
//!
//! See <https://en.wikipedia.org/wiki/Binary_logarithm#Iterative_approximation>.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fractional bits used by the safety bound.
pub const LOG_PRECISION: u32 = 16;

/// Largest supported precision: the integer part (at most 62) must still fit above it.
pub const MAX_PRECISION: u32 = 57;

/// `floor(log2(x) * 2^precision)`, approximately.
///
/// Exact for powers of two. Returns `None` for `x == 0`, for `x >= 2^63` (the squared
/// mantissa would no longer fit in 128 bits after scaling) and for a precision above
/// [`MAX_PRECISION`].
pub fn binary_logarithm(x: u64, precision: u32) -> Option<u64> {
    if x == 0 || x >= 1 << 63 || precision > MAX_PRECISION {
        return None;
    }
    Some(log2_fixed(x, precision))
}

/// Unchecked core of [`binary_logarithm`]; `1 <= x < 2^63`.
pub(crate) fn log2_fixed(x: u64, precision: u32) -> u64 {
    let integer = u64::from(63 - x.leading_zeros());
    if x == 1 << integer {
        return integer << precision;
    }

    let scale = 1u128 << integer;
    let mut mantissa = u128::from(x);
    let mut fraction = 0u64;
    for _ in 0..precision {
        fraction <<= 1;
        mantissa = mantissa * mantissa / scale;
        if mantissa >= scale << 1 {
            fraction |= 1;
            mantissa >>= 1;
        }
    }
    (integer << precision) | fraction
}

/// A fixed-point base-2 logarithm carrying its own precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Log2Fixed {
    raw: u64,
    precision: u32,
}

impl Log2Fixed {
    pub fn new(raw: u64, precision: u32) -> Self {
        Self { raw, precision }
    }

    /// The whole number `bits` at the given precision.
    pub fn from_bits(bits: u64, precision: u32) -> Self {
        Self::new(bits << precision, precision)
    }

    pub fn raw(&self) -> u64 {
        self.raw
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Integer part of the logarithm.
    pub fn whole_bits(&self) -> u64 {
        self.raw >> self.precision
    }

    /// Lossy conversion for display and reporting.
    pub fn to_f64(&self) -> f64 {
        self.raw as f64 / (1u64 << self.precision) as f64
    }
}

impl fmt::Display for Log2Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} bits", self.to_f64())
    }
}
