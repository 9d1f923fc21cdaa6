//! Account directory: creation, limit updates, lookup, and aggregation.

use caixa_core::ops::{RuleError, validate_limit_update};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr,
    EntityTrait, LoaderTrait, QueryFilter, QueryOrder, Set, Statement,
};
use uuid::Uuid;

use crate::entities::{accounts, transactions, users};

/// Error types for directory operations.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// No user registered under the given national id.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// No account with the given number.
    #[error("Account not found: {0}")]
    AccountNotFound(i64),

    /// Business rule violation (negative limit).
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// An account together with its ordered transaction log.
#[derive(Debug, Clone)]
pub struct AccountWithTransactions {
    /// The account record.
    pub account: accounts::Model,
    /// Transactions in insertion order.
    pub transactions: Vec<transactions::Model>,
}

/// A user together with all owned accounts and their transactions.
#[derive(Debug, Clone)]
pub struct UserWithAccounts {
    /// The user record.
    pub user: users::Model,
    /// Accounts owned by the user.
    pub accounts: Vec<AccountWithTransactions>,
}

/// Default branch code for new accounts.
const DEFAULT_BRANCH: &str = "0001";

/// Account repository implementing the directory operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an account for the user registered under `national_id`.
    ///
    /// The account number comes from the `account_number_seq` sequence, so
    /// concurrent creations can never collide.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::UserNotFound` if the national id is unknown.
    pub async fn create_account(
        &self,
        national_id: &str,
        initial_limit: Decimal,
    ) -> Result<accounts::Model, DirectoryError> {
        validate_limit_update(initial_limit)?;

        let user = users::Entity::find()
            .filter(users::Column::NationalId.eq(national_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| DirectoryError::UserNotFound(national_id.to_string()))?;

        let number = self.next_account_number().await?;

        let now = chrono::Utc::now().into();
        let account = accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            number: Set(number),
            branch: Set(DEFAULT_BRANCH.to_string()),
            balance: Set(Decimal::ZERO),
            withdrawal_limit: Set(initial_limit),
            user_id: Set(user.id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let account = account.insert(&self.db).await?;
        Ok(account)
    }

    /// Fetches the next account number from the database sequence.
    async fn next_account_number(&self) -> Result<i64, DbErr> {
        let row = self
            .db
            .query_one(Statement::from_string(
                DbBackend::Postgres,
                "SELECT nextval('account_number_seq') AS number",
            ))
            .await?
            .ok_or_else(|| DbErr::Custom("account number sequence returned no row".to_string()))?;

        row.try_get("", "number")
    }

    /// Updates the withdrawal limit of an account.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::AccountNotFound` if no account matches, or
    /// a rule error if the new limit is negative.
    pub async fn update_limit(
        &self,
        number: i64,
        new_limit: Decimal,
    ) -> Result<accounts::Model, DirectoryError> {
        validate_limit_update(new_limit)?;

        let account = accounts::Entity::find()
            .filter(accounts::Column::Number.eq(number))
            .one(&self.db)
            .await?
            .ok_or(DirectoryError::AccountNotFound(number))?;

        let mut active: accounts::ActiveModel = account.into();
        active.withdrawal_limit = Set(new_limit);
        active.updated_at = Set(chrono::Utc::now().into());

        let account = active.update(&self.db).await?;
        Ok(account)
    }

    /// Finds an account by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_number(&self, number: i64) -> Result<Option<accounts::Model>, DbErr> {
        accounts::Entity::find()
            .filter(accounts::Column::Number.eq(number))
            .one(&self.db)
            .await
    }

    /// Finds an account by number together with its transaction log.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_with_transactions(
        &self,
        number: i64,
    ) -> Result<Option<AccountWithTransactions>, DbErr> {
        let Some(account) = self.find_by_number(number).await? else {
            return Ok(None);
        };

        let transactions = transactions::Entity::find()
            .filter(transactions::Column::AccountId.eq(account.id))
            .order_by_asc(transactions::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(Some(AccountWithTransactions {
            account,
            transactions,
        }))
    }

    /// Lists all users with their accounts and transaction logs.
    ///
    /// Read-only aggregate projection: users ordered by registration,
    /// transactions within each account in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn list_users_with_accounts(&self) -> Result<Vec<UserWithAccounts>, DbErr> {
        let users = users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let accounts_per_user = users.load_many(accounts::Entity, &self.db).await?;

        let flat_accounts: Vec<accounts::Model> = accounts_per_user
            .iter()
            .flat_map(|accounts| accounts.iter().cloned())
            .collect();
        let mut transactions_per_account = flat_accounts
            .load_many(transactions::Entity, &self.db)
            .await?;

        // load_many gives no ordering guarantee within each group
        for transactions in &mut transactions_per_account {
            transactions.sort_by_key(|t| t.created_at);
        }

        let mut transactions_iter = transactions_per_account.into_iter();
        let results = users
            .into_iter()
            .zip(accounts_per_user)
            .map(|(user, accounts)| UserWithAccounts {
                user,
                accounts: accounts
                    .into_iter()
                    .map(|account| AccountWithTransactions {
                        account,
                        transactions: transactions_iter.next().unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect();

        Ok(results)
    }
}
