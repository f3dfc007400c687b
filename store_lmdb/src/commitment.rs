//! LMDB implementation of CommitmentStore.

use std::sync::Arc;

use shuffle_store::{CommitmentStore, StoreError};
use shuffle_types::{Commitment, CommitmentId, CommitterKey};

use crate::{LmdbEnvironment, LmdbError};

/// Commitments keyed by the committer's bytes, values bincode-encoded.
///
/// Each mutating call runs inside a single write transaction, so the
/// check-then-write sequences are atomic with respect to other writers.
#[derive(Clone)]
pub struct LmdbCommitmentStore {
    env: Arc<LmdbEnvironment>,
}

impl LmdbCommitmentStore {
    pub fn new(env: Arc<LmdbEnvironment>) -> Self {
        Self { env }
    }

    fn decode(bytes: &[u8]) -> Result<Commitment, LmdbError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl CommitmentStore for LmdbCommitmentStore {
    fn get_commitment(&self, committer: &CommitterKey) -> Result<Option<Commitment>, StoreError> {
        let rtxn = self.env.env().read_txn().map_err(LmdbError::from)?;
        let value = self
            .env
            .commitments_db
            .get(&rtxn, committer.as_bytes())
            .map_err(LmdbError::from)?;
        match value {
            Some(bytes) => Ok(Some(Self::decode(bytes)?)),
            None => Ok(None),
        }
    }

    fn insert_commitment(
        &self,
        committer: &CommitterKey,
        commitment: &Commitment,
    ) -> Result<(), StoreError> {
        let encoded = bincode::serialize(commitment).map_err(LmdbError::from)?;
        let mut wtxn = self.env.env().write_txn().map_err(LmdbError::from)?;
        let db = self.env.commitments_db;
        if db
            .get(&wtxn, committer.as_bytes())
            .map_err(LmdbError::from)?
            .is_some()
        {
            return Err(StoreError::Duplicate(format!("commitment for {committer}")));
        }
        db.put(&mut wtxn, committer.as_bytes(), &encoded)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        tracing::debug!(%committer, commitment_id = %commitment.id, "stored commitment");
        Ok(())
    }

    fn remove_commitment(
        &self,
        committer: &CommitterKey,
        id: &CommitmentId,
    ) -> Result<Commitment, StoreError> {
        let mut wtxn = self.env.env().write_txn().map_err(LmdbError::from)?;
        let db = self.env.commitments_db;
        let stored = match db
            .get(&wtxn, committer.as_bytes())
            .map_err(LmdbError::from)?
        {
            Some(bytes) => Self::decode(bytes)?,
            None => {
                return Err(LmdbError::NotFound(format!("commitment for {committer}")).into())
            }
        };
        if stored.id != *id {
            return Err(StoreError::NotFound(format!(
                "commitment {id} for {committer}"
            )));
        }
        db.delete(&mut wtxn, committer.as_bytes())
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        tracing::debug!(%committer, commitment_id = %id, "removed commitment");
        Ok(stored)
    }

    fn commitment_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.env().read_txn().map_err(LmdbError::from)?;
        let count = self
            .env
            .commitments_db
            .len(&rtxn)
            .map_err(LmdbError::from)?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shuffle_types::{Round, SelectionParams};

    fn open_store(dir: &tempfile::TempDir) -> LmdbCommitmentStore {
        let env = LmdbEnvironment::open(dir.path(), 1 << 20).unwrap();
        LmdbCommitmentStore::new(Arc::new(env))
    }

    fn commitment(tag: u8) -> Commitment {
        Commitment {
            id: CommitmentId::new([tag; 32]),
            target_round: Round::new(15),
            committed_at: Round::new(10),
            params: SelectionParams::new(100, 5).unwrap(),
            salt: [tag; 16],
        }
    }

    fn key(name: &str) -> CommitterKey {
        CommitterKey::new(name).unwrap()
    }

    #[test]
    fn insert_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        let alice = key("alice");
        assert_eq!(store.get_commitment(&alice).unwrap(), None);

        store.insert_commitment(&alice, &commitment(1)).unwrap();
        assert_eq!(store.get_commitment(&alice).unwrap(), Some(commitment(1)));
        assert_eq!(store.commitment_count().unwrap(), 1);
    }

    #[test]
    fn duplicate_insert_keeps_original() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        let alice = key("alice");
        store.insert_commitment(&alice, &commitment(1)).unwrap();

        let err = store.insert_commitment(&alice, &commitment(2)).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        assert_eq!(store.get_commitment(&alice).unwrap(), Some(commitment(1)));
    }

    #[test]
    fn remove_is_compare_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        let alice = key("alice");
        store.insert_commitment(&alice, &commitment(1)).unwrap();

        let wrong = store.remove_commitment(&alice, &CommitmentId::new([2; 32]));
        assert!(matches!(wrong, Err(StoreError::NotFound(_))));
        assert_eq!(store.commitment_count().unwrap(), 1);

        let removed = store.remove_commitment(&alice, &commitment(1).id).unwrap();
        assert_eq!(removed, commitment(1));
        assert_eq!(store.get_commitment(&alice).unwrap(), None);

        let again = store.remove_commitment(&alice, &commitment(1).id);
        assert!(matches!(again, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn committers_have_independent_slots() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        store.insert_commitment(&key("alice"), &commitment(1)).unwrap();
        store.insert_commitment(&key("bob"), &commitment(2)).unwrap();
        assert_eq!(store.commitment_count().unwrap(), 2);
        assert_eq!(
            store.get_commitment(&key("bob")).unwrap().map(|c| c.id),
            Some(commitment(2).id)
        );
    }

    #[test]
    fn survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = open_store(&dir);
            store.insert_commitment(&key("alice"), &commitment(7)).unwrap();
        }
        let store = open_store(&dir);
        assert_eq!(
            store.get_commitment(&key("alice")).unwrap(),
            Some(commitment(7))
        );
    }
}
