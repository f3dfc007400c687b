use proptest::prelude::*;

use shuffle_budget::{BudgetPlan, ExecutionBudget, PermitPool};

proptest! {
    /// Unit counts are ceil(k * cost / capacity) + 1 and grow with k.
    #[test]
    fn units_match_formula(
        winners in 1u8..=34,
        cost in 0u64..10_000,
        capacity in 1u64..10_000,
    ) {
        let plan = BudgetPlan::new(cost, cost, capacity);
        let expected = (u64::from(winners) * cost).div_ceil(capacity) + 1;
        prop_assert_eq!(plan.commit_units(winners), expected);
        prop_assert_eq!(plan.reveal_units(winners), expected);
        if winners > 1 {
            prop_assert!(plan.commit_units(winners - 1) <= expected);
        }
    }

    /// A pool grants exactly as many units as it holds.
    #[test]
    fn pool_grants_exactly_its_size(size in 0usize..200, requested in 0u64..300) {
        let pool = PermitPool::new(size);
        let result = pool.top_up_n(requested);
        prop_assert_eq!(result.is_ok(), requested <= size as u64);
        prop_assert_eq!(pool.granted(), requested.min(size as u64));
    }
}
