use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    #[error("execution budget exhausted after {granted} top-ups")]
    Exhausted { granted: u64 },

    #[error("budget pool closed")]
    Closed,
}
