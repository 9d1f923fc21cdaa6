//! Active enums mapped to Postgres enum types.

use caixa_core::ops::MovementKind;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of a ledger transaction record.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_kind")]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Money paid into an account.
    #[sea_orm(string_value = "deposit")]
    Deposit,
    /// Money taken out of an account.
    #[sea_orm(string_value = "withdraw")]
    Withdraw,
    /// Outgoing leg of a transfer.
    #[sea_orm(string_value = "transfer_out")]
    TransferOut,
    /// Incoming leg of a transfer.
    #[sea_orm(string_value = "transfer_in")]
    TransferIn,
}

impl From<MovementKind> for TransactionKind {
    fn from(kind: MovementKind) -> Self {
        match kind {
            MovementKind::Deposit => Self::Deposit,
            MovementKind::Withdraw => Self::Withdraw,
            MovementKind::TransferOut => Self::TransferOut,
            MovementKind::TransferIn => Self::TransferIn,
        }
    }
}

impl From<TransactionKind> for MovementKind {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Deposit => Self::Deposit,
            TransactionKind::Withdraw => Self::Withdraw,
            TransactionKind::TransferOut => Self::TransferOut,
            TransactionKind::TransferIn => Self::TransferIn,
        }
    }
}
