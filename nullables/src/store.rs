//! Nullable store — thread-safe in-memory commitment storage for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use shuffle_store::{CommitmentStore, StoreError};
use shuffle_types::{Commitment, CommitmentId, CommitterKey};

/// An in-memory commitment store for testing.
/// Thread-safe for use with tokio's multi-threaded runtime.
pub struct NullCommitmentStore {
    commitments: Mutex<HashMap<CommitterKey, Commitment>>,
    fail_writes: AtomicBool,
}

impl NullCommitmentStore {
    pub fn new() -> Self {
        Self {
            commitments: Mutex::new(HashMap::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make inserts and removals fail with a backend error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("writes disabled".into()));
        }
        Ok(())
    }
}

impl Default for NullCommitmentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitmentStore for NullCommitmentStore {
    fn get_commitment(&self, committer: &CommitterKey) -> Result<Option<Commitment>, StoreError> {
        Ok(self.commitments.lock().unwrap().get(committer).cloned())
    }

    fn insert_commitment(
        &self,
        committer: &CommitterKey,
        commitment: &Commitment,
    ) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut commitments = self.commitments.lock().unwrap();
        if commitments.contains_key(committer) {
            return Err(StoreError::Duplicate(committer.to_string()));
        }
        commitments.insert(committer.clone(), commitment.clone());
        Ok(())
    }

    fn remove_commitment(
        &self,
        committer: &CommitterKey,
        id: &CommitmentId,
    ) -> Result<Commitment, StoreError> {
        self.check_writable()?;
        let mut commitments = self.commitments.lock().unwrap();
        match commitments.get(committer) {
            Some(stored) if stored.id == *id => Ok(commitments
                .remove(committer)
                .ok_or_else(|| StoreError::NotFound(committer.to_string()))?),
            _ => Err(StoreError::NotFound(format!("{committer}: {id}"))),
        }
    }

    fn commitment_count(&self) -> Result<u64, StoreError> {
        Ok(self.commitments.lock().unwrap().len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shuffle_types::{Round, SelectionParams};

    fn commitment(tag: u8) -> Commitment {
        Commitment {
            id: CommitmentId::new([tag; 32]),
            target_round: Round::new(2),
            committed_at: Round::new(1),
            params: SelectionParams::new(10, 3).unwrap(),
            salt: [0; 16],
        }
    }

    #[test]
    fn one_slot_per_committer() {
        let store = NullCommitmentStore::new();
        let key = CommitterKey::new("alice").unwrap();
        store.insert_commitment(&key, &commitment(1)).unwrap();
        assert!(matches!(
            store.insert_commitment(&key, &commitment(2)),
            Err(StoreError::Duplicate(_))
        ));
        assert_eq!(store.get_commitment(&key).unwrap(), Some(commitment(1)));
    }

    #[test]
    fn remove_requires_matching_id() {
        let store = NullCommitmentStore::new();
        let key = CommitterKey::new("alice").unwrap();
        store.insert_commitment(&key, &commitment(1)).unwrap();
        assert!(store.remove_commitment(&key, &commitment(2).id).is_err());
        assert_eq!(store.commitment_count().unwrap(), 1);
        assert_eq!(
            store.remove_commitment(&key, &commitment(1).id).unwrap(),
            commitment(1)
        );
        assert_eq!(store.commitment_count().unwrap(), 0);
    }

    #[test]
    fn failing_writes_leave_store_untouched() {
        let store = NullCommitmentStore::new();
        let key = CommitterKey::new("alice").unwrap();
        store.fail_writes(true);
        assert!(matches!(
            store.insert_commitment(&key, &commitment(1)),
            Err(StoreError::Backend(_))
        ));
        assert_eq!(store.commitment_count().unwrap(), 0);
    }
}
