use proptest::prelude::*;
use std::collections::HashSet;

use shuffle_pcg::Pcg128;
use shuffle_selection::{select_winners, SparseShuffle};
use shuffle_types::{SelectionParams, MAX_WINNERS};

proptest! {
    /// Exactly k pairwise-distinct winners, each in [0, n).
    #[test]
    fn k_distinct_winners_in_range(
        seed in prop::array::uniform32(0u8..),
        n in 2u32..u32::MAX,
        k in 1u8..=MAX_WINNERS,
    ) {
        prop_assume!(u32::from(k) <= n);
        let params = SelectionParams::new(n, k).unwrap();
        let winners = select_winners(&seed, params).unwrap();
        prop_assert_eq!(winners.len(), usize::from(k));
        let unique: HashSet<u32> = winners.iter().copied().collect();
        prop_assert_eq!(unique.len(), winners.len());
        prop_assert!(winners.iter().all(|&w| w < n));
    }

    /// Drawing all n positions yields a permutation of 0..n.
    #[test]
    fn full_shuffle_is_bijection(seed in prop::array::uniform32(0u8..), n in 1u32..300) {
        let mut shuffle = SparseShuffle::new(Pcg128::from_seed(&seed), n);
        let mut winners = shuffle.draw(n).unwrap();
        prop_assert_eq!(shuffle.remaining(), 0);
        winners.sort_unstable();
        prop_assert_eq!(winners, (0..n).collect::<Vec<_>>());
    }

    /// A shorter draw is a prefix of a longer one from the same seed.
    #[test]
    fn draws_are_prefix_stable(
        seed in prop::array::uniform32(0u8..),
        n in 34u32..1_000_000,
        k in 1u8..MAX_WINNERS,
    ) {
        let short = select_winners(&seed, SelectionParams::new(n, k).unwrap()).unwrap();
        let long = select_winners(&seed, SelectionParams::new(n, k + 1).unwrap()).unwrap();
        prop_assert_eq!(&long[..short.len()], &short[..]);
    }

    /// The overlay never holds more entries than winners drawn.
    #[test]
    fn overlay_bounded_by_k(
        seed in prop::array::uniform32(0u8..),
        n in 2u32..u32::MAX,
        k in 1u32..=34,
    ) {
        prop_assume!(k <= n);
        let mut shuffle = SparseShuffle::new(Pcg128::from_seed(&seed), n);
        shuffle.draw(k).unwrap();
        prop_assert!(shuffle.overlay().len() <= k as usize);
    }
}
