//! Property-based tests for the money-movement rules.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::rules::{
    RuleError, check_funds, check_limit, validate_amount, validate_distinct_accounts,
};

/// Strategy for a positive amount between 0.01 and 1,000,000.00.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a non-negative amount between 0.00 and 1,000,000.00.
fn non_negative_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any non-positive amount is rejected before anything else is looked at.
    #[test]
    fn prop_non_positive_amount_rejected(cents in 0i64..100_000_000i64) {
        let amount = Decimal::new(-cents, 2);
        prop_assert!(matches!(
            validate_amount(amount),
            Err(RuleError::InvalidAmount(_))
        ));
    }

    /// Any amount strictly above the limit fails with `LimitExceeded`,
    /// regardless of how large the balance is.
    #[test]
    fn prop_amount_above_limit_always_fails(
        limit in non_negative_amount(),
        excess in positive_amount(),
    ) {
        let amount = limit + excess;
        prop_assert!(
            matches!(
                check_limit(amount, limit),
                Err(RuleError::LimitExceeded { .. })
            ),
            "expected LimitExceeded for amount {amount} over limit {limit}"
        );
    }

    /// Any amount up to the limit passes the limit check.
    #[test]
    fn prop_amount_within_limit_passes(
        amount in positive_amount(),
        headroom in non_negative_amount(),
    ) {
        let limit = amount + headroom;
        prop_assert!(check_limit(amount, limit).is_ok());
    }

    /// Any amount strictly above the balance fails with `InsufficientFunds`,
    /// even when well within the limit.
    #[test]
    fn prop_amount_above_balance_always_fails(
        balance in non_negative_amount(),
        excess in positive_amount(),
    ) {
        let amount = balance + excess;
        prop_assert!(
            matches!(
                check_funds(amount, balance),
                Err(RuleError::InsufficientFunds { .. })
            ),
            "expected InsufficientFunds for amount {amount} over balance {balance}"
        );
    }

    /// Withdrawing the entire balance is always allowed by the funds check.
    #[test]
    fn prop_full_balance_withdrawal_passes(balance in positive_amount()) {
        prop_assert!(check_funds(balance, balance).is_ok());
    }

    /// A transfer to the same account number always fails, whatever the number.
    #[test]
    fn prop_same_account_always_rejected(number in 1i64..1_000_000i64) {
        prop_assert!(matches!(
            validate_distinct_accounts(number, number),
            Err(RuleError::SameAccount)
        ));
    }

    /// Distinct account numbers always pass the endpoint check.
    #[test]
    fn prop_distinct_accounts_pass(a in 1i64..1_000_000i64, delta in 1i64..1000i64) {
        prop_assert!(validate_distinct_accounts(a, a + delta).is_ok());
    }
}
