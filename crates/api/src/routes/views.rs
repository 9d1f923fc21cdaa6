//! Response view types shared across route modules.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use caixa_db::entities::{accounts, sea_orm_active_enums::TransactionKind, transactions, users};
use caixa_db::repositories::{AccountWithTransactions, UserWithAccounts};

/// A ledger transaction as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionView {
    /// Movement kind.
    pub kind: TransactionKind,
    /// Positive amount; the sign is carried by `kind`.
    pub amount: Decimal,
    /// Creation timestamp.
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
}

impl From<transactions::Model> for TransactionView {
    fn from(model: transactions::Model) -> Self {
        Self {
            kind: model.kind,
            amount: model.amount,
            created_at: model.created_at,
        }
    }
}

/// An account as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    /// Unique account number.
    pub number: i64,
    /// Branch code.
    pub branch: String,
    /// Current balance.
    pub balance: Decimal,
    /// Single-movement withdrawal/transfer ceiling.
    pub withdrawal_limit: Decimal,
    /// Transaction log, present on detail views.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<TransactionView>>,
}

impl From<accounts::Model> for AccountView {
    fn from(model: accounts::Model) -> Self {
        Self {
            number: model.number,
            branch: model.branch,
            balance: model.balance,
            withdrawal_limit: model.withdrawal_limit,
            transactions: None,
        }
    }
}

impl From<AccountWithTransactions> for AccountView {
    fn from(aggregate: AccountWithTransactions) -> Self {
        let mut view = Self::from(aggregate.account);
        view.transactions = Some(
            aggregate
                .transactions
                .into_iter()
                .map(TransactionView::from)
                .collect(),
        );
        view
    }
}

/// A user as returned to clients. The password hash never leaves the
/// database layer boundary.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    /// User id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// National id.
    pub national_id: String,
    /// Owned accounts.
    pub accounts: Vec<AccountView>,
}

impl From<UserWithAccounts> for UserView {
    fn from(aggregate: UserWithAccounts) -> Self {
        Self {
            id: aggregate.user.id,
            name: aggregate.user.name,
            national_id: aggregate.user.national_id,
            accounts: aggregate
                .accounts
                .into_iter()
                .map(AccountView::from)
                .collect(),
        }
    }
}

/// Basic user info returned after registration.
#[derive(Debug, Clone, Serialize)]
pub struct RegisteredUserView {
    /// User id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// National id.
    pub national_id: String,
}

impl From<users::Model> for RegisteredUserView {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            national_id: model.national_id,
        }
    }
}
