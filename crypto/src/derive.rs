//! Commitment-id and seed derivation.
//!
//! Every input is length-prefixed or fixed-width so distinct field tuples can never
//! produce the same preimage.

use shuffle_types::{CommitmentId, CommitterKey, Round, SelectionParams};

use crate::hash::blake2b_256_multi;
use crate::CryptoError;

const COMMITMENT_DOMAIN: &[u8] = b"verifiable-shuffle/commitment/v1";
const SEED_DOMAIN: &[u8] = b"verifiable-shuffle/seed/v1";

/// Derive the identifier of a commitment from everything it commits to.
///
/// Anyone holding the commitment record can recompute the id, which makes the binding
/// between the published id and the committed `(n, k, target_round)` auditable.
pub fn commitment_id(
    committer: &CommitterKey,
    committed_at: Round,
    target_round: Round,
    params: SelectionParams,
    salt: &[u8; 16],
) -> CommitmentId {
    let key_len = (committer.as_bytes().len() as u32).to_be_bytes();
    CommitmentId::new(blake2b_256_multi(&[
        COMMITMENT_DOMAIN,
        &key_len,
        committer.as_bytes(),
        &committed_at.as_u64().to_be_bytes(),
        &target_round.as_u64().to_be_bytes(),
        &params.participants().to_be_bytes(),
        &[params.winners()],
        salt,
    ]))
}

/// Mix beacon output with the commitment id into the 256-bit PRNG seed.
pub fn derive_seed(beacon_output: &[u8; 32], id: &CommitmentId) -> [u8; 32] {
    blake2b_256_multi(&[SEED_DOMAIN, beacon_output, id.as_bytes()])
}

/// Draw a fresh 16-byte salt from the operating system.
pub fn fresh_salt() -> Result<[u8; 16], CryptoError> {
    let mut salt = [0u8; 16];
    getrandom::getrandom(&mut salt).map_err(|e| CryptoError::Entropy(e.to_string()))?;
    Ok(salt)
}
