//! Per-operation unit counts.

/// Cost per winner of the commit-side bound computation.
pub const DEFAULT_COMMIT_UNIT_COST: u64 = 600;
/// Cost per winner of the reveal-side shuffle.
pub const DEFAULT_REVEAL_UNIT_COST: u64 = 500;
/// Cost covered by a single top-up.
pub const DEFAULT_UNIT_CAPACITY: u64 = 700;

/// How many top-ups each operation needs for `k` winners.
///
/// Both formulas are `ceil(k * cost / capacity) + 1`; the extra unit covers
/// the fixed overhead of the call itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BudgetPlan {
    commit_unit_cost: u64,
    reveal_unit_cost: u64,
    unit_capacity: u64,
}

impl BudgetPlan {
    pub fn new(commit_unit_cost: u64, reveal_unit_cost: u64, unit_capacity: u64) -> Self {
        Self {
            commit_unit_cost,
            reveal_unit_cost,
            // A zero capacity would divide by zero; treat it as one.
            unit_capacity: unit_capacity.max(1),
        }
    }

    pub fn commit_unit_cost(&self) -> u64 {
        self.commit_unit_cost
    }

    pub fn reveal_unit_cost(&self) -> u64 {
        self.reveal_unit_cost
    }

    /// Always at least one.
    pub fn unit_capacity(&self) -> u64 {
        self.unit_capacity
    }

    pub fn commit_units(&self, winners: u8) -> u64 {
        Self::units(winners, self.commit_unit_cost, self.unit_capacity)
    }

    pub fn reveal_units(&self, winners: u8) -> u64 {
        Self::units(winners, self.reveal_unit_cost, self.unit_capacity)
    }

    fn units(winners: u8, cost: u64, capacity: u64) -> u64 {
        (u64::from(winners) * cost).div_ceil(capacity) + 1
    }
}

impl Default for BudgetPlan {
    fn default() -> Self {
        Self::new(
            DEFAULT_COMMIT_UNIT_COST,
            DEFAULT_REVEAL_UNIT_COST,
            DEFAULT_UNIT_CAPACITY,
        )
    }
}
