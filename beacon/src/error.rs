use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BeaconError {
    #[error("randomness for round {round} is not published yet")]
    NotYetAvailable { round: u64 },

    #[error("failed to fetch randomness: {0}")]
    Fetch(String),

    #[error("invalid beacon proof: {0}")]
    InvalidProof(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("BLS verification failed: {0}")]
    BlsVerification(String),
}

impl BeaconError {
    /// Whether retrying the same request later can succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::NotYetAvailable { .. })
    }
}
