//! Replaying a reveal from public data.

use shuffle_beacon::RandomnessBeacon;
use shuffle_crypto::derive_seed;
use shuffle_selection::select_winners;
use shuffle_types::{CommitmentId, Round, SelectionParams};

use crate::ShuffleError;

/// Recompute the winners of a revealed commitment.
///
/// Needs only what a reveal makes public: the target round, the commitment id
/// and the selection parameters. The result matches the original reveal
/// exactly when the beacon answers the same way.
pub fn audit_winners<B: RandomnessBeacon + ?Sized>(
    beacon: &B,
    target_round: Round,
    id: &CommitmentId,
    params: SelectionParams,
) -> Result<Vec<u32>, ShuffleError> {
    let beacon_output = beacon.must_get(target_round, id.as_bytes())?;
    let seed = derive_seed(&beacon_output, id);
    Ok(select_winners(&seed, params)?)
}
