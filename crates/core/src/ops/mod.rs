//! Money-movement rules and movement kinds.
//!
//! The operation engine in the database layer applies these rules against a
//! locked snapshot of the account row; everything here is pure and
//! synchronous so the rules can be tested without a database.

pub mod rules;

#[cfg(test)]
mod rules_props;

pub use rules::{
    RuleError, check_funds, check_limit, validate_amount, validate_distinct_accounts,
    validate_limit_update,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of a ledger transaction record.
///
/// Transfers always produce a `TransferOut`/`TransferIn` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    /// Money paid into an account.
    Deposit,
    /// Money taken out of an account.
    Withdraw,
    /// Outgoing leg of a transfer.
    TransferOut,
    /// Incoming leg of a transfer.
    TransferIn,
}

impl MovementKind {
    /// Returns true for movements that decrease the balance.
    #[must_use]
    pub const fn is_outgoing(&self) -> bool {
        matches!(self, Self::Withdraw | Self::TransferOut)
    }

    /// Returns the signed effect of a movement of `amount` on the balance.
    ///
    /// The balance invariant is that an account's balance equals the sum of
    /// `signed_amount` over its transaction log.
    #[must_use]
    pub fn signed_amount(&self, amount: Decimal) -> Decimal {
        if self.is_outgoing() { -amount } else { amount }
    }
}

impl std::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deposit => write!(f, "deposit"),
            Self::Withdraw => write!(f, "withdraw"),
            Self::TransferOut => write!(f, "transfer_out"),
            Self::TransferIn => write!(f, "transfer_in"),
        }
    }
}

/// An operation a client can request directly on a single account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Deposit into the account.
    Deposit,
    /// Withdraw from the account.
    Withdraw,
}

impl From<OperationKind> for MovementKind {
    fn from(kind: OperationKind) -> Self {
        match kind {
            OperationKind::Deposit => Self::Deposit,
            OperationKind::Withdraw => Self::Withdraw,
        }
    }
}
