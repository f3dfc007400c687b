//! Commit/reveal protocol engine.

use shuffle_beacon::{RandomnessBeacon, RoundClock};
use shuffle_bound::is_safe_selection;
use shuffle_budget::{BudgetPlan, ExecutionBudget};
use shuffle_crypto::{commitment_id, derive_seed, fresh_salt};
use shuffle_selection::select_winners;
use shuffle_store::{CommitmentStore, StoreError};
use shuffle_types::{Commitment, CommitmentId, CommitterKey, Reveal, SelectionParams};

use crate::error::{ShuffleError, ValidationError};

/// Deployment-time settings fixed for the lifetime of an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShuffleSettings {
    /// Minimum rounds between commit and target round.
    pub safety_round_gap: u64,
    pub randomness_beacon_id: u64,
    pub opup_id: u64,
    pub budget: BudgetPlan,
}

impl Default for ShuffleSettings {
    fn default() -> Self {
        Self {
            safety_round_gap: 1,
            randomness_beacon_id: 0,
            opup_id: 0,
            budget: BudgetPlan::default(),
        }
    }
}

/// The verifiable shuffle service.
///
/// Generic over its collaborators so tests can run it against nullables and
/// the CLI against LMDB and drand.
pub struct VerifiableShuffle<S, B, C, E> {
    settings: ShuffleSettings,
    store: S,
    beacon: B,
    clock: C,
    budget: E,
}

impl<S, B, C, E> VerifiableShuffle<S, B, C, E>
where
    S: CommitmentStore,
    B: RandomnessBeacon,
    C: RoundClock,
    E: ExecutionBudget,
{
    pub fn new(settings: ShuffleSettings, store: S, beacon: B, clock: C, budget: E) -> Self {
        Self {
            settings,
            store,
            beacon,
            clock,
            budget,
        }
    }

    /// Commit to drawing `winners` of `participants` from the beacon output of
    /// the round `delay` rounds from now.
    ///
    /// On any error nothing is stored.
    pub fn commit(
        &self,
        committer: &CommitterKey,
        delay: u64,
        participants: u32,
        winners: u8,
    ) -> Result<CommitmentId, ShuffleError> {
        let gap = self.settings.safety_round_gap;
        if delay < gap {
            return Err(ValidationError::DelayBelowSafetyGap { delay, gap }.into());
        }
        let params = SelectionParams::new(participants, winners)?;

        if self.store.get_commitment(committer)?.is_some() {
            return Err(outstanding(committer));
        }

        self.budget.top_up_n(self.settings.budget.commit_units(winners))?;

        if !is_safe_selection(participants, u32::from(winners)) {
            return Err(ValidationError::UnsafeSelectionSize {
                participants,
                winners,
            }
            .into());
        }

        let current = self.clock.current_round();
        let target_round = current
            .checked_add(delay)
            .ok_or(ValidationError::RoundOverflow { current, delay })?;

        let salt = fresh_salt()?;
        let id = commitment_id(committer, current, target_round, params, &salt);
        let commitment = Commitment {
            id,
            target_round,
            committed_at: current,
            params,
            salt,
        };

        match self.store.insert_commitment(committer, &commitment) {
            Ok(()) => {}
            Err(StoreError::Duplicate(_)) => return Err(outstanding(committer)),
            Err(e) => return Err(e.into()),
        }

        tracing::info!(
            %committer,
            commitment_id = %id,
            committed_at = current.as_u64(),
            target_round = target_round.as_u64(),
            participants,
            winners,
            "commitment recorded"
        );
        Ok(id)
    }

    /// Reveal the winners of the committer's outstanding commitment.
    ///
    /// Succeeds at most once per commitment. Until the target round has been
    /// reached and its randomness published, fails with a transient error and
    /// leaves the commitment in place.
    pub fn reveal(&self, committer: &CommitterKey) -> Result<Reveal, ShuffleError> {
        let commitment = self
            .store
            .get_commitment(committer)?
            .ok_or_else(|| ShuffleError::NoCommitment {
                committer: committer.to_string(),
            })?;

        let current = self.clock.current_round();
        if !commitment.is_revealable_at(current) {
            tracing::debug!(
                %committer,
                current = current.as_u64(),
                target = commitment.target_round.as_u64(),
                "reveal attempted before target round"
            );
            return Err(ShuffleError::RoundNotElapsed {
                current,
                target: commitment.target_round,
            });
        }

        let id = commitment.id;
        let beacon_output = self
            .beacon
            .must_get(commitment.target_round, id.as_bytes())?;

        let params = commitment.params;
        self.budget.top_up_n(self.settings.budget.reveal_units(params.winners()))?;

        let seed = derive_seed(&beacon_output, &id);
        let winners = select_winners(&seed, params)?;

        match self.store.remove_commitment(committer, &id) {
            Ok(_) => {}
            Err(StoreError::NotFound(_)) => {
                // Revealed concurrently by another caller.
                return Err(ShuffleError::NoCommitment {
                    committer: committer.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(
            %committer,
            commitment_id = %id,
            round = commitment.target_round.as_u64(),
            beacon = self.beacon.name(),
            winners = ?winners,
            "commitment revealed"
        );
        Ok(Reveal {
            commitment_id: id,
            winners,
        })
    }

    /// The committer's outstanding commitment, if any. Read-only.
    pub fn pending_commitment(
        &self,
        committer: &CommitterKey,
    ) -> Result<Option<Commitment>, ShuffleError> {
        Ok(self.store.get_commitment(committer)?)
    }

    pub fn randomness_beacon_id(&self) -> u64 {
        self.settings.randomness_beacon_id
    }

    pub fn opup_id(&self) -> u64 {
        self.settings.opup_id
    }

    pub fn safety_round_gap(&self) -> u64 {
        self.settings.safety_round_gap
    }

    pub fn settings(&self) -> &ShuffleSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn beacon(&self) -> &B {
        &self.beacon
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

fn outstanding(committer: &CommitterKey) -> ShuffleError {
    ValidationError::CommitmentOutstanding {
        committer: committer.to_string(),
    }
    .into()
}
