//! Operation engine: deposit, withdraw, and transfer.
//!
//! Every operation runs inside a single database transaction. The touched
//! account rows are read with `SELECT ... FOR UPDATE`, so validation always
//! happens against a balance no concurrent operation can invalidate, and
//! the balance update commits together with the appended transaction rows.
//! Dropping the transaction on any error path rolls everything back.

use caixa_core::ops::{
    MovementKind, RuleError, check_funds, check_limit, validate_amount,
    validate_distinct_accounts,
};
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{accounts, transactions};

/// Error types for engine operations.
#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    /// No account with the given number.
    #[error("Account not found: {0}")]
    AccountNotFound(i64),

    /// Business rule violation.
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Operation repository implementing the money-movement engine.
#[derive(Debug, Clone)]
pub struct OperationRepository {
    db: DatabaseConnection,
}

impl OperationRepository {
    /// Creates a new operation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Deposits `amount` into the account with the given number.
    ///
    /// No limit check applies to deposits.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if no account matches, or `InvalidAmount`
    /// if the amount is not positive.
    pub async fn deposit(
        &self,
        number: i64,
        amount: Decimal,
    ) -> Result<accounts::Model, OperationError> {
        validate_amount(amount)?;

        let txn = self.db.begin().await?;

        let account = find_for_update(&txn, number)
            .await?
            .ok_or(OperationError::AccountNotFound(number))?;

        let now = chrono::Utc::now().into();
        let account = apply_movement(&txn, account, MovementKind::Deposit, amount, now).await?;

        txn.commit().await?;
        Ok(account)
    }

    /// Withdraws `amount` from the account with the given number.
    ///
    /// Checked against the per-account limit first, then against the
    /// locked balance.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`, `InvalidAmount`, `LimitExceeded`, or
    /// `InsufficientFunds`.
    pub async fn withdraw(
        &self,
        number: i64,
        amount: Decimal,
    ) -> Result<accounts::Model, OperationError> {
        validate_amount(amount)?;

        let txn = self.db.begin().await?;

        let account = find_for_update(&txn, number)
            .await?
            .ok_or(OperationError::AccountNotFound(number))?;

        check_limit(amount, account.withdrawal_limit)?;
        check_funds(amount, account.balance)?;

        let now = chrono::Utc::now().into();
        let account = apply_movement(&txn, account, MovementKind::Withdraw, amount, now).await?;

        txn.commit().await?;
        Ok(account)
    }

    /// Transfers `amount` between two accounts.
    ///
    /// All four mutations (two balance updates, two transaction inserts)
    /// commit as one atomic unit; both legs carry the same timestamp.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount`, `AccountNotFound` for either side,
    /// `SameAccount`, `InsufficientFunds`, or `LimitExceeded` (source
    /// limit). Existence is checked before the endpoint comparison, so a
    /// same-number transfer against a missing account reports
    /// `AccountNotFound`.
    pub async fn transfer(
        &self,
        source_number: i64,
        dest_number: i64,
        amount: Decimal,
    ) -> Result<(), OperationError> {
        validate_amount(amount)?;

        let txn = self.db.begin().await?;

        // Equal endpoints still need the account to exist; a single
        // locked read covers both sides before the distinctness rule
        // rejects the transfer.
        if source_number == dest_number {
            find_for_update(&txn, source_number)
                .await?
                .ok_or(OperationError::AccountNotFound(source_number))?;
        }
        validate_distinct_accounts(source_number, dest_number)?;

        // Lock in ascending account number, whatever the call direction,
        // so reverse transfers cannot deadlock against each other.
        let (low, high) = if source_number < dest_number {
            (source_number, dest_number)
        } else {
            (dest_number, source_number)
        };

        let low_account = find_for_update(&txn, low)
            .await?
            .ok_or(OperationError::AccountNotFound(low))?;
        let high_account = find_for_update(&txn, high)
            .await?
            .ok_or(OperationError::AccountNotFound(high))?;

        let (source, dest) = if source_number == low {
            (low_account, high_account)
        } else {
            (high_account, low_account)
        };

        check_funds(amount, source.balance)?;
        check_limit(amount, source.withdrawal_limit)?;

        let now = chrono::Utc::now().into();
        apply_movement(&txn, source, MovementKind::TransferOut, amount, now).await?;
        apply_movement(&txn, dest, MovementKind::TransferIn, amount, now).await?;

        txn.commit().await?;
        Ok(())
    }
}

/// Reads an account row by number with a row-level exclusive lock.
async fn find_for_update(
    txn: &DatabaseTransaction,
    number: i64,
) -> Result<Option<accounts::Model>, DbErr> {
    accounts::Entity::find()
        .filter(accounts::Column::Number.eq(number))
        .lock_exclusive()
        .one(txn)
        .await
}

/// Applies a single movement: updates the balance and appends the
/// transaction row within the caller's unit of work.
async fn apply_movement(
    txn: &DatabaseTransaction,
    account: accounts::Model,
    kind: MovementKind,
    amount: Decimal,
    now: DateTime<FixedOffset>,
) -> Result<accounts::Model, DbErr> {
    let account_id = account.id;
    let new_balance = account.balance + kind.signed_amount(amount);

    let mut active: accounts::ActiveModel = account.into();
    active.balance = Set(new_balance);
    active.updated_at = Set(now);
    let updated = active.update(txn).await?;

    let row = transactions::ActiveModel {
        id: Set(Uuid::new_v4()),
        account_id: Set(account_id),
        kind: Set(kind.into()),
        amount: Set(amount),
        created_at: Set(now),
    };
    row.insert(txn).await?;

    Ok(updated)
}
