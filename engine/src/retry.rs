//! Bounded retry of reveals that are waiting on the beacon.

use std::sync::Arc;
use std::time::Duration;

use shuffle_beacon::{RandomnessBeacon, RoundClock};
use shuffle_budget::ExecutionBudget;
use shuffle_store::CommitmentStore;
use shuffle_types::{CommitterKey, Reveal};

use crate::{ShuffleError, VerifiableShuffle};

/// How long to keep retrying a reveal whose round or randomness is not there yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            max_attempts: 30,
        }
    }
}

/// Reveal, retrying transient failures up to `policy.max_attempts` times.
///
/// Each attempt runs on the blocking pool since the beacon and store may do
/// synchronous I/O. Permanent errors are returned immediately; after the last
/// attempt the last transient error is returned.
pub async fn reveal_with_retry<S, B, C, E>(
    engine: Arc<VerifiableShuffle<S, B, C, E>>,
    committer: CommitterKey,
    policy: RetryPolicy,
) -> Result<Reveal, ShuffleError>
where
    S: CommitmentStore + 'static,
    B: RandomnessBeacon + 'static,
    C: RoundClock + 'static,
    E: ExecutionBudget + 'static,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        let engine = Arc::clone(&engine);
        let key = committer.clone();
        let result = tokio::task::spawn_blocking(move || engine.reveal(&key))
            .await
            .map_err(|e| ShuffleError::Task(e.to_string()))?;

        match result {
            Err(e) if e.is_transient() && attempt < max_attempts => {
                tracing::info!(
                    %committer,
                    attempt,
                    max_attempts,
                    reason = %e,
                    "reveal not ready, retrying in {:?}",
                    policy.interval
                );
                attempt += 1;
                tokio::time::sleep(policy.interval).await;
            }
            other => return other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShuffleSettings;
    use shuffle_nullables::{NullBeacon, NullBudget, NullClock, NullCommitmentStore};

    type Engine = VerifiableShuffle<NullCommitmentStore, NullBeacon, NullClock, NullBudget>;

    fn engine() -> Arc<Engine> {
        Arc::new(VerifiableShuffle::new(
            ShuffleSettings::default(),
            NullCommitmentStore::new(),
            NullBeacon::new(),
            NullClock::new(1),
            NullBudget::unlimited(),
        ))
    }

    fn fast(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            interval: Duration::from_millis(5),
            max_attempts,
        }
    }

    fn alice() -> CommitterKey {
        CommitterKey::new("alice").unwrap()
    }

    #[tokio::test]
    async fn succeeds_once_beacon_publishes() {
        let engine = engine();
        engine.commit(&alice(), 1, 50, 4).unwrap();
        engine.clock().advance(1);

        let publisher = Arc::clone(&engine);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            publisher.beacon().publish(2, [3; 32]);
        });

        let reveal = reveal_with_retry(Arc::clone(&engine), alice(), fast(200))
            .await
            .unwrap();
        assert_eq!(reveal.winners.len(), 4);
        assert!(engine.beacon().requests().len() > 1);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let engine = engine();
        engine.commit(&alice(), 1, 50, 4).unwrap();

        let err = reveal_with_retry(Arc::clone(&engine), alice(), fast(3))
            .await
            .unwrap_err();
        assert!(err.is_transient());
        assert!(engine.pending_commitment(&alice()).unwrap().is_some());
    }

    #[tokio::test]
    async fn permanent_errors_are_not_retried() {
        let engine = engine();
        let err = reveal_with_retry(Arc::clone(&engine), alice(), fast(50))
            .await
            .unwrap_err();
        assert!(matches!(err, ShuffleError::NoCommitment { .. }));
    }

    #[test]
    fn default_policy_matches_config_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.interval, Duration::from_secs(10));
        assert_eq!(policy.max_attempts, 30);
    }
}
