//! Commitment storage trait.

use shuffle_types::{Commitment, CommitmentId, CommitterKey};

use crate::StoreError;

/// One commitment slot per committer.
///
/// Implementations use interior mutability so a single store can be shared
/// behind `&self` across threads. Every mutating call is atomic: on error the
/// store is left exactly as it was.
pub trait CommitmentStore: Send + Sync {
    /// The outstanding commitment for `committer`, if any.
    fn get_commitment(&self, committer: &CommitterKey) -> Result<Option<Commitment>, StoreError>;

    /// Store a new commitment. Fails with [`StoreError::Duplicate`] if the
    /// committer already has one.
    fn insert_commitment(
        &self,
        committer: &CommitterKey,
        commitment: &Commitment,
    ) -> Result<(), StoreError>;

    /// Remove and return the committer's commitment, but only if its id is `id`.
    ///
    /// Fails with [`StoreError::NotFound`] when the slot is empty or holds a
    /// different commitment; the slot is untouched in that case.
    fn remove_commitment(
        &self,
        committer: &CommitterKey,
        id: &CommitmentId,
    ) -> Result<Commitment, StoreError>;

    /// Number of outstanding commitments.
    fn commitment_count(&self) -> Result<u64, StoreError>;
}

impl<T: CommitmentStore + ?Sized> CommitmentStore for std::sync::Arc<T> {
    fn get_commitment(&self, committer: &CommitterKey) -> Result<Option<Commitment>, StoreError> {
        (**self).get_commitment(committer)
    }

    fn insert_commitment(
        &self,
        committer: &CommitterKey,
        commitment: &Commitment,
    ) -> Result<(), StoreError> {
        (**self).insert_commitment(committer, commitment)
    }

    fn remove_commitment(
        &self,
        committer: &CommitterKey,
        id: &CommitmentId,
    ) -> Result<Commitment, StoreError> {
        (**self).remove_commitment(committer, id)
    }

    fn commitment_count(&self) -> Result<u64, StoreError> {
        (**self).commitment_count()
    }
}
