use thiserror::Error;

/// Failures of a [`CommitmentStore`](crate::CommitmentStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The slot is empty, or holds a commitment with a different id.
    #[error("no matching commitment: {0}")]
    NotFound(String),

    /// The committer already has an outstanding commitment.
    #[error("commitment already exists: {0}")]
    Duplicate(String),

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("commitment record could not be encoded or decoded: {0}")]
    Serialization(String),
}
