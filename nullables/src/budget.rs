//! Nullable budget — counts top-ups, optionally runs dry.

use std::sync::atomic::{AtomicU64, Ordering};

use shuffle_budget::{BudgetError, ExecutionBudget};

/// An execution budget that records every top-up and can be capped.
pub struct NullBudget {
    granted: AtomicU64,
    limit: Option<u64>,
}

impl NullBudget {
    /// A budget that never runs out.
    pub fn unlimited() -> Self {
        Self {
            granted: AtomicU64::new(0),
            limit: None,
        }
    }

    /// A budget that grants exactly `limit` top-ups.
    pub fn limited(limit: u64) -> Self {
        Self {
            granted: AtomicU64::new(0),
            limit: Some(limit),
        }
    }

    /// Top-ups granted so far.
    pub fn granted(&self) -> u64 {
        self.granted.load(Ordering::SeqCst)
    }
}

impl Default for NullBudget {
    fn default() -> Self {
        Self::unlimited()
    }
}

impl ExecutionBudget for NullBudget {
    fn top_up(&self) -> Result<(), BudgetError> {
        let limit = self.limit.unwrap_or(u64::MAX);
        self.granted
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |g| {
                (g < limit).then_some(g + 1)
            })
            .map(|_| ())
            .map_err(|granted| BudgetError::Exhausted { granted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_grants() {
        let budget = NullBudget::unlimited();
        budget.top_up_n(7).unwrap();
        assert_eq!(budget.granted(), 7);
    }

    #[test]
    fn limited_budget_runs_dry() {
        let budget = NullBudget::limited(2);
        assert!(budget.top_up().is_ok());
        assert!(budget.top_up().is_ok());
        assert_eq!(budget.top_up(), Err(BudgetError::Exhausted { granted: 2 }));
        assert_eq!(budget.granted(), 2);
    }
}
