//! Nullable clock — deterministic rounds for testing.

use std::sync::atomic::{AtomicU64, Ordering};

use shuffle_beacon::RoundClock;
use shuffle_types::Round;

/// A deterministic round clock for testing.
///
/// Rounds only advance when you tell them to.
pub struct NullClock {
    current: AtomicU64,
}

impl NullClock {
    pub fn new(initial_round: u64) -> Self {
        Self {
            current: AtomicU64::new(initial_round),
        }
    }

    /// Advance by a number of rounds.
    pub fn advance(&self, rounds: u64) {
        self.current.fetch_add(rounds, Ordering::SeqCst);
    }

    /// Jump to a specific round.
    pub fn set(&self, round: u64) {
        self.current.store(round, Ordering::SeqCst);
    }
}

impl RoundClock for NullClock {
    fn current_round(&self) -> Round {
        Round::new(self.current.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_only_on_request() {
        let clock = NullClock::new(10);
        assert_eq!(clock.current_round(), Round::new(10));
        clock.advance(5);
        assert_eq!(clock.current_round(), Round::new(15));
        clock.set(3);
        assert_eq!(clock.current_round(), Round::new(3));
    }
}
