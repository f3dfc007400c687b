//! Budget hosts.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Semaphore, TryAcquireError};

use crate::{BudgetError, ExecutionBudget};

/// Budget that always grants. Used when the host imposes no metering.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unmetered;

impl ExecutionBudget for Unmetered {
    fn top_up(&self) -> Result<(), BudgetError> {
        Ok(())
    }
}

/// A finite pool of budget units backed by a semaphore.
///
/// Each top-up consumes one permit permanently; the operator refills the pool
/// with [`PermitPool::refill`]. Acquisition never blocks.
#[derive(Debug)]
pub struct PermitPool {
    permits: Semaphore,
    granted: AtomicU64,
}

impl PermitPool {
    pub fn new(permits: usize) -> Self {
        Self {
            permits: Semaphore::new(permits),
            granted: AtomicU64::new(0),
        }
    }

    /// Units still available.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Units granted since creation.
    pub fn granted(&self) -> u64 {
        self.granted.load(Ordering::Relaxed)
    }

    pub fn refill(&self, permits: usize) {
        self.permits.add_permits(permits);
        tracing::debug!(added = permits, available = self.available(), "budget pool refilled");
    }

    /// Close the pool; every later top-up fails with [`BudgetError::Closed`].
    pub fn close(&self) {
        self.permits.close();
    }
}

impl ExecutionBudget for PermitPool {
    fn top_up(&self) -> Result<(), BudgetError> {
        match self.permits.try_acquire() {
            Ok(permit) => {
                permit.forget();
                self.granted.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
            Err(TryAcquireError::NoPermits) => {
                let granted = self.granted();
                tracing::warn!(granted, "execution budget exhausted");
                Err(BudgetError::Exhausted { granted })
            }
            Err(TryAcquireError::Closed) => Err(BudgetError::Closed),
        }
    }
}
