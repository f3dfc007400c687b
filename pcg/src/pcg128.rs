//! Four interleaved PCG32 lanes producing 128-bit words.

use crate::lane::Pcg32;
use crate::PcgError;

/// Stream increments of the four lanes (all odd, all distinct).
pub const LANE_INCREMENTS: [u64; 4] = [
    1442695040888963407,
    1442695040888963409,
    1442695040888963411,
    1442695040888963413,
];

/// 128-bit generator: one draw advances every lane once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pcg128 {
    lanes: [Pcg32; 4],
}

impl Pcg128 {
    /// Seed from 32 bytes: lane `i` is seeded with the big-endian `u64` in
    /// bytes `8i..8i + 8`.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let lanes = std::array::from_fn(|i| {
            let mut chunk = [0u8; 8];
            chunk.copy_from_slice(&seed[8 * i..8 * i + 8]);
            Pcg32::seeded(u64::from_be_bytes(chunk), LANE_INCREMENTS[i])
        });
        Self { lanes }
    }

    /// Per-lane 64-bit states, lane 0 first.
    pub fn states(&self) -> [u64; 4] {
        std::array::from_fn(|i| self.lanes[i].state())
    }

    /// Draw one 128-bit word: `(l0 << 32 | l1) << 64 | (l2 << 32 | l3)`.
    pub fn next_u128(&mut self) -> u128 {
        let [l0, l1, l2, l3] = std::array::from_fn::<u32, 4, _>(|i| self.lanes[i].next_u32());
        let hi = (u64::from(l0) << 32) | u64::from(l1);
        let lo = (u64::from(l2) << 32) | u64::from(l3);
        (u128::from(hi) << 64) | u128::from(lo)
    }

    /// Draw one 128-bit word as 16 big-endian bytes.
    pub fn next_bytes(&mut self) -> [u8; 16] {
        self.next_u128().to_be_bytes()
    }

    /// Draw `count` values uniformly from `[lower, upper)`.
    ///
    /// `(0, 0)` means "unbounded": `count` raw 128-bit words are returned. Otherwise
    /// `upper` must exceed `lower`, and every draw at or above the largest multiple of
    /// the range not exceeding `2^128` is discarded and redrawn, so the
    /// `lower + r % range` mapping carries no modulo bias.
    pub fn bounded_random(
        &mut self,
        lower: u128,
        upper: u128,
        count: usize,
    ) -> Result<Vec<u128>, PcgError> {
        if lower == 0 && upper == 0 {
            return Ok((0..count).map(|_| self.next_u128()).collect());
        }
        if upper <= lower {
            return Err(PcgError::EmptyRange { lower, upper });
        }
        let range = upper - lower;
        let limit = acceptance_limit(range);

        let mut out = Vec::with_capacity(count);
        while out.len() < count {
            let r = self.next_u128();
            if r <= limit {
                out.push(lower + r % range);
            }
        }
        Ok(out)
    }

    /// Draw a single value uniformly from `[0, bound)`.
    pub fn below(&mut self, bound: u128) -> Result<u128, PcgError> {
        // (0, 0) would mean "unbounded" to bounded_random.
        if bound == 0 {
            return Err(PcgError::EmptyRange { lower: 0, upper: 0 });
        }
        let mut values = self.bounded_random(0, bound, 1)?;
        values
            .pop()
            .ok_or(PcgError::EmptyRange { lower: 0, upper: bound })
    }
}

/// Largest accepted raw draw for `range`: `floor(2^128 / range) * range - 1`.
///
/// The rejected zone is the top `2^128 mod range` values of the 128-bit space.
fn acceptance_limit(range: u128) -> u128 {
    let rejected = (u128::MAX % range + 1) % range;
    u128::MAX - rejected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(byte: u8) -> [u8; 32] {
        [byte; 32]
    }

    #[test]
    fn lanes_are_seeded_from_big_endian_chunks() {
        let mut bytes = [0u8; 32];
        bytes[7] = 1;
        bytes[15] = 2;
        bytes[23] = 3;
        bytes[31] = 4;
        let rng = Pcg128::from_seed(&bytes);
        for (i, state) in rng.states().into_iter().enumerate() {
            let lane = Pcg32::seeded(i as u64 + 1, LANE_INCREMENTS[i]);
            assert_eq!(state, lane.state());
        }
    }

    #[test]
    fn next_u128_concatenates_lane_outputs() {
        let bytes = seed(9);
        let mut rng = Pcg128::from_seed(&bytes);
        let mut lanes: Vec<Pcg32> = (0..4)
            .map(|i| {
                let chunk: [u8; 8] = bytes[8 * i..8 * i + 8].try_into().unwrap();
                Pcg32::seeded(u64::from_be_bytes(chunk), LANE_INCREMENTS[i])
            })
            .collect();
        let outputs: Vec<u128> = lanes.iter_mut().map(|l| u128::from(l.next_u32())).collect();
        let expected = (outputs[0] << 96) | (outputs[1] << 64) | (outputs[2] << 32) | outputs[3];
        assert_eq!(rng.next_u128(), expected);
    }

    #[test]
    fn next_bytes_is_big_endian_word() {
        let mut a = Pcg128::from_seed(&seed(1));
        let mut b = Pcg128::from_seed(&seed(1));
        assert_eq!(a.next_bytes(), b.next_u128().to_be_bytes());
    }

    #[test]
    fn unbounded_returns_raw_draws() {
        let mut a = Pcg128::from_seed(&seed(5));
        let mut b = Pcg128::from_seed(&seed(5));
        let raw = a.bounded_random(0, 0, 3).unwrap();
        let expected: Vec<u128> = (0..3).map(|_| b.next_u128()).collect();
        assert_eq!(raw, expected);
    }

    #[test]
    fn empty_range_is_rejected() {
        let mut rng = Pcg128::from_seed(&seed(1));
        assert_eq!(
            rng.bounded_random(10, 10, 1),
            Err(PcgError::EmptyRange { lower: 10, upper: 10 })
        );
        assert!(rng.bounded_random(11, 10, 1).is_err());
    }

    #[test]
    fn below_zero_is_empty_not_unbounded() {
        let mut rng = Pcg128::from_seed(&seed(1));
        let before = rng.clone();
        assert_eq!(
            rng.below(0),
            Err(PcgError::EmptyRange { lower: 0, upper: 0 })
        );
        // No randomness is consumed on rejection.
        assert_eq!(rng, before);
        assert!(rng.below(1).is_ok());
    }

    #[test]
    fn values_stay_in_range() {
        let mut rng = Pcg128::from_seed(&seed(2));
        for value in rng.bounded_random(100, 107, 1_000).unwrap() {
            assert!((100..107).contains(&value));
        }
    }

    #[test]
    fn range_of_one_always_returns_lower() {
        let mut rng = Pcg128::from_seed(&seed(3));
        assert!(rng.bounded_random(41, 42, 50).unwrap().iter().all(|&v| v == 41));
    }

    #[test]
    fn acceptance_limit_edges() {
        assert_eq!(acceptance_limit(1), u128::MAX);
        assert_eq!(acceptance_limit(2), u128::MAX);
        assert_eq!(acceptance_limit(1 << 127), u128::MAX);
        // 2^128 mod 3 == 1: only the very top value is rejected.
        assert_eq!(acceptance_limit(3), u128::MAX - 1);
        // Largest range: 2^128 mod (2^128 - 1) == 1.
        assert_eq!(acceptance_limit(u128::MAX), u128::MAX - 1);
    }

    #[test]
    fn accepted_zone_is_multiple_of_range() {
        for range in [3u128, 7, 10, 1_000_003, u128::from(u64::MAX) + 12345] {
            let accepted = acceptance_limit(range).wrapping_add(1);
            assert_eq!(accepted % range, 0, "range {range}");
        }
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = Pcg128::from_seed(&seed(8));
        let mut b = Pcg128::from_seed(&seed(8));
        assert_eq!(
            a.bounded_random(0, 1_000, 64).unwrap(),
            b.bounded_random(0, 1_000, 64).unwrap()
        );
    }

    #[test]
    fn chi_square_uniformity() {
        const BUCKETS: usize = 10;
        const DRAWS: usize = 20_000;
        let mut rng = Pcg128::from_seed(&seed(0x5a));
        let mut counts = [0usize; BUCKETS];
        for value in rng.bounded_random(0, BUCKETS as u128, DRAWS).unwrap() {
            counts[value as usize] += 1;
        }
        let expected = DRAWS as f64 / BUCKETS as f64;
        let chi2: f64 = counts
            .iter()
            .map(|&c| {
                let d = c as f64 - expected;
                d * d / expected
            })
            .sum();
        // 9 degrees of freedom, p = 0.0001.
        assert!(chi2 < 33.72, "chi-square {chi2} too large: {counts:?}");
    }
}
