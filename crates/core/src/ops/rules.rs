//! Business rule validation for account operations.
//!
//! The engine composes these checks per operation:
//! - deposit: amount only (no limit applies to incoming money);
//! - withdraw: amount, then limit, then funds;
//! - transfer: amount, then (once the accounts are found) distinct
//!   endpoints, funds, and limit on the source account only.
//!
//! The limit bounds a single outgoing movement. There is no rolling daily
//! cap; the per-account configurable limit is the canonical rule.

use rust_decimal::Decimal;
use thiserror::Error;

/// Validation errors for account operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// Amount is zero or negative.
    #[error("amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// Movement exceeds the per-account limit.
    #[error("amount {amount} exceeds the withdrawal limit of {limit}")]
    LimitExceeded {
        /// Requested movement amount.
        amount: Decimal,
        /// Per-account single-movement ceiling.
        limit: Decimal,
    },

    /// Movement exceeds the current balance.
    #[error("amount {amount} exceeds the available balance of {balance}")]
    InsufficientFunds {
        /// Requested movement amount.
        amount: Decimal,
        /// Balance at the validation snapshot.
        balance: Decimal,
    },

    /// Transfer source and destination are the same account.
    #[error("cannot transfer from an account to itself")]
    SameAccount,

    /// A withdrawal limit may not be negative.
    #[error("withdrawal limit must not be negative, got {0}")]
    NegativeLimit(Decimal),
}

/// Validates that a movement amount is strictly positive.
///
/// # Errors
///
/// Returns `RuleError::InvalidAmount` if `amount <= 0`.
pub fn validate_amount(amount: Decimal) -> Result<(), RuleError> {
    if amount <= Decimal::ZERO {
        return Err(RuleError::InvalidAmount(amount));
    }
    Ok(())
}

/// Checks an outgoing movement against the per-account limit.
///
/// Deposits never pass through this check.
///
/// # Errors
///
/// Returns `RuleError::LimitExceeded` if `amount > limit`.
pub fn check_limit(amount: Decimal, limit: Decimal) -> Result<(), RuleError> {
    if amount > limit {
        return Err(RuleError::LimitExceeded { amount, limit });
    }
    Ok(())
}

/// Checks an outgoing movement against the current balance.
///
/// # Errors
///
/// Returns `RuleError::InsufficientFunds` if `amount > balance`.
pub fn check_funds(amount: Decimal, balance: Decimal) -> Result<(), RuleError> {
    if amount > balance {
        return Err(RuleError::InsufficientFunds { amount, balance });
    }
    Ok(())
}

/// Validates that transfer endpoints are distinct accounts.
///
/// # Errors
///
/// Returns `RuleError::SameAccount` if `source == dest`.
pub fn validate_distinct_accounts(source: i64, dest: i64) -> Result<(), RuleError> {
    if source == dest {
        return Err(RuleError::SameAccount);
    }
    Ok(())
}

/// Validates a new withdrawal limit.
///
/// # Errors
///
/// Returns `RuleError::NegativeLimit` if `new_limit < 0`.
pub fn validate_limit_update(new_limit: Decimal) -> Result<(), RuleError> {
    if new_limit < Decimal::ZERO {
        return Err(RuleError::NegativeLimit(new_limit));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(-0.01))]
    #[case(dec!(-500))]
    fn test_non_positive_amounts_rejected(#[case] amount: Decimal) {
        assert!(matches!(
            validate_amount(amount),
            Err(RuleError::InvalidAmount(_))
        ));
    }

    #[rstest]
    #[case(dec!(0.01))]
    #[case(dec!(500))]
    #[case(dec!(1_000_000.99))]
    fn test_positive_amounts_accepted(#[case] amount: Decimal) {
        assert!(validate_amount(amount).is_ok());
    }

    #[test]
    fn test_limit_exceeded_even_with_sufficient_balance() {
        // balance plays no role in the limit check
        let result = check_limit(dec!(600), dec!(500));
        assert_eq!(
            result,
            Err(RuleError::LimitExceeded {
                amount: dec!(600),
                limit: dec!(500),
            })
        );
    }

    #[test]
    fn test_limit_boundary_is_inclusive() {
        assert!(check_limit(dec!(500), dec!(500)).is_ok());
        assert!(check_limit(dec!(500.01), dec!(500)).is_err());
    }

    #[test]
    fn test_insufficient_funds_even_within_limit() {
        let result = check_funds(dec!(100), dec!(99.99));
        assert_eq!(
            result,
            Err(RuleError::InsufficientFunds {
                amount: dec!(100),
                balance: dec!(99.99),
            })
        );
    }

    #[test]
    fn test_funds_boundary_is_inclusive() {
        // withdrawing the full balance is allowed
        assert!(check_funds(dec!(500), dec!(500)).is_ok());
    }

    #[test]
    fn test_same_account_rejected() {
        assert_eq!(
            validate_distinct_accounts(1, 1),
            Err(RuleError::SameAccount)
        );
        assert!(validate_distinct_accounts(1, 2).is_ok());
    }

    #[test]
    fn test_negative_limit_rejected() {
        assert_eq!(
            validate_limit_update(dec!(-1)),
            Err(RuleError::NegativeLimit(dec!(-1)))
        );
        assert!(validate_limit_update(Decimal::ZERO).is_ok());
        assert!(validate_limit_update(dec!(1500)).is_ok());
    }

    /// Scenario from the withdrawal rules: balance 1000, limit 500.
    /// Two withdrawals of 500 drain the account; a third of 1 must fail
    /// on funds, not on limit.
    #[test]
    fn test_sequential_withdrawal_scenario() {
        let limit = dec!(500);
        let mut balance = dec!(1000);

        for _ in 0..2 {
            let amount = dec!(500);
            validate_amount(amount).unwrap();
            check_limit(amount, limit).unwrap();
            check_funds(amount, balance).unwrap();
            balance -= amount;
        }
        assert_eq!(balance, Decimal::ZERO);

        let amount = dec!(1);
        validate_amount(amount).unwrap();
        check_limit(amount, limit).unwrap();
        assert!(matches!(
            check_funds(amount, balance),
            Err(RuleError::InsufficientFunds { .. })
        ));
    }
}
