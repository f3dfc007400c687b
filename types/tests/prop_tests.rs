use proptest::prelude::*;

use shuffle_types::{
    Commitment, CommitmentId, ParamsError, Round, SelectionParams, MAX_WINNERS,
};

proptest! {
    /// SelectionParams accepts exactly the documented domain.
    #[test]
    fn selection_params_domain(participants in 0u32..200, winners in 0u8..=u8::MAX) {
        let result = SelectionParams::new(participants, winners);
        let valid = (1..=MAX_WINNERS).contains(&winners)
            && participants >= 2
            && u32::from(winners) <= participants;
        prop_assert_eq!(result.is_ok(), valid);
        if let Ok(params) = result {
            prop_assert_eq!(params.participants(), participants);
            prop_assert_eq!(params.winners(), winners);
        }
    }

    /// The winners range is checked before the participants floor.
    #[test]
    fn winners_range_checked_first(participants in 0u32..2, winners in 35u8..=u8::MAX) {
        prop_assert_eq!(
            SelectionParams::new(participants, winners),
            Err(ParamsError::WinnersOutOfRange(winners))
        );
    }

    /// CommitmentId hex display parses back to the same id.
    #[test]
    fn commitment_id_hex_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let id = CommitmentId::new(bytes);
        let parsed = CommitmentId::from_hex(&id.to_string()).unwrap();
        prop_assert_eq!(parsed, id);
    }

    /// Round ordering follows the underlying integers.
    #[test]
    fn round_ordering(a in any::<u64>(), b in any::<u64>()) {
        prop_assert_eq!(Round::new(a) <= Round::new(b), a <= b);
        prop_assert_eq!(Round::new(a).has_reached(Round::new(b)), a >= b);
    }

    /// checked_add overflows exactly when the integer sum does.
    #[test]
    fn round_checked_add(base in any::<u64>(), delay in any::<u64>()) {
        let expected = base.checked_add(delay).map(Round::new);
        prop_assert_eq!(Round::new(base).checked_add(delay), expected);
    }

    /// Commitments survive the bincode encoding used by persistent stores.
    #[test]
    fn commitment_bincode_roundtrip(
        id in prop::array::uniform32(0u8..),
        salt in prop::array::uniform16(0u8..),
        committed_at in 0u64..1_000_000,
        delay in 1u64..1_000,
        participants in 34u32..u32::MAX,
        winners in 1u8..=MAX_WINNERS,
    ) {
        let commitment = Commitment {
            id: CommitmentId::new(id),
            target_round: Round::new(committed_at + delay),
            committed_at: Round::new(committed_at),
            params: SelectionParams::new(participants, winners).unwrap(),
            salt,
        };
        let encoded = bincode::serialize(&commitment).unwrap();
        let decoded: Commitment = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded.delay(), delay);
        prop_assert_eq!(decoded, commitment);
    }
}
