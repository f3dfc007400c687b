//! Execution budget.
//!
//! The selection loops are bounded but not free: before a commit computes its
//! permutation bound, and before a reveal runs the shuffle, the engine acquires
//! a number of discrete budget units proportional to the number of winners.
//! Where the units come from is the host's business; this crate defines the
//! seam and two hosts.

pub mod error;
pub mod plan;
pub mod pool;

pub use error::BudgetError;
pub use plan::BudgetPlan;
pub use pool::{PermitPool, Unmetered};

use std::sync::Arc;

/// A source of execution budget, acquired one unit at a time.
pub trait ExecutionBudget: Send + Sync {
    /// Acquire one unit. Fails when the host cannot grant more.
    fn top_up(&self) -> Result<(), BudgetError>;

    /// Acquire `units` units, stopping at the first failure.
    fn top_up_n(&self, units: u64) -> Result<(), BudgetError> {
        for _ in 0..units {
            self.top_up()?;
        }
        Ok(())
    }
}

impl<T: ExecutionBudget + ?Sized> ExecutionBudget for Arc<T> {
    fn top_up(&self) -> Result<(), BudgetError> {
        (**self).top_up()
    }

    fn top_up_n(&self, units: u64) -> Result<(), BudgetError> {
        (**self).top_up_n(units)
    }
}
