//! Nullable beacon — rounds are published by the test, not the network.

use std::collections::HashMap;
use std::sync::Mutex;

use shuffle_beacon::{BeaconError, RandomnessBeacon};
use shuffle_types::Round;

/// A deterministic randomness beacon for testing.
///
/// Unpublished rounds answer [`BeaconError::NotYetAvailable`]. Outputs are
/// `Blake2b-256(randomness || user_data)` so distinct callers of the same
/// round see distinct values, like the real beacon.
pub struct NullBeacon {
    published: Mutex<HashMap<u64, [u8; 32]>>,
    failure: Mutex<Option<BeaconError>>,
    requests: Mutex<Vec<(Round, Vec<u8>)>>,
}

impl NullBeacon {
    pub fn new() -> Self {
        Self {
            published: Mutex::new(HashMap::new()),
            failure: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Publish randomness for `round`.
    pub fn publish(&self, round: u64, randomness: [u8; 32]) {
        self.published.lock().unwrap().insert(round, randomness);
    }

    /// Make every subsequent request fail with `error` until cleared.
    pub fn fail_with(&self, error: BeaconError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn clear_failure(&self) {
        *self.failure.lock().unwrap() = None;
    }

    /// Every `(round, user_data)` requested so far, in order.
    pub fn requests(&self) -> Vec<(Round, Vec<u8>)> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for NullBeacon {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomnessBeacon for NullBeacon {
    fn must_get(&self, round: Round, user_data: &[u8]) -> Result<[u8; 32], BeaconError> {
        self.requests
            .lock()
            .unwrap()
            .push((round, user_data.to_vec()));
        if let Some(error) = self.failure.lock().unwrap().clone() {
            return Err(error);
        }
        let published = self.published.lock().unwrap();
        let randomness = published
            .get(&round.as_u64())
            .ok_or(BeaconError::NotYetAvailable {
                round: round.as_u64(),
            })?;
        Ok(shuffle_crypto::blake2b_256_multi(&[randomness.as_slice(), user_data]))
    }

    fn name(&self) -> &str {
        "null-beacon"
    }
}
