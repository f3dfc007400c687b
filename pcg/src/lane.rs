//! A single PCG32 (XSH-RR) lane.
//!
//! 64-bit LCG state, 32-bit output. Reference: <https://www.pcg-random.org/>.

/// LCG multiplier shared by every lane.
pub const PCG_MULTIPLIER: u64 = 6364136223846793005;

/// One PCG32 generator with its own stream increment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pcg32 {
    state: u64,
    increment: u64,
}

impl Pcg32 {
    /// Seed a lane with the standard PCG32 initialisation sequence:
    /// `state = 0; step; state += seed; step`.
    ///
    /// `increment` must be odd for the LCG to reach its full period.
    pub fn seeded(seed: u64, increment: u64) -> Self {
        debug_assert!(increment & 1 == 1, "PCG increment must be odd");
        let mut state = step(0, increment);
        state = state.wrapping_add(seed);
        state = step(state, increment);
        Self { state, increment }
    }

    /// Current 64-bit state.
    pub fn state(&self) -> u64 {
        self.state
    }

    pub fn increment(&self) -> u64 {
        self.increment
    }

    /// Advance one step and return the output of the state before the step.
    pub fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = step(old, self.increment);
        output(old)
    }
}

/// `state * MULTIPLIER + increment (mod 2^64)`.
#[inline]
pub fn step(state: u64, increment: u64) -> u64 {
    state.wrapping_mul(PCG_MULTIPLIER).wrapping_add(increment)
}

/// XSH-RR output permutation: xorshift high bits, then a state-dependent rotation.
#[inline]
pub fn output(state: u64) -> u32 {
    let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
    let rot = (state >> 59) as u32;
    xorshifted.rotate_right(rot)
}
