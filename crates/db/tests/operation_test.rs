//! Integration tests for the operation engine.
//!
//! Require a running Postgres (`DATABASE_URL`); run with `-- --ignored`.

mod common;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use caixa_core::ops::{MovementKind, RuleError};
use caixa_db::entities::{accounts, transactions};
use caixa_db::repositories::{OperationError, OperationRepository};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use common::{create_funded_account, fetch_account, setup};

async fn transaction_log(
    db: &DatabaseConnection,
    account: &accounts::Model,
) -> Vec<transactions::Model> {
    transactions::Entity::find()
        .filter(transactions::Column::AccountId.eq(account.id))
        .all(db)
        .await
        .expect("Query failed")
}

/// Signed sum of the transaction log, which must always equal the balance.
fn signed_sum(log: &[transactions::Model]) -> Decimal {
    log.iter()
        .map(|t| MovementKind::from(t.kind.clone()).signed_amount(t.amount))
        .sum()
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_deposit_increases_balance_and_appends_log() {
    let db = setup().await;
    let number = create_funded_account(&db, dec!(0), dec!(500)).await;
    let ops = OperationRepository::new(db.clone());

    let account = ops.deposit(number, dec!(250.50)).await.unwrap();
    assert_eq!(account.balance, dec!(250.50));

    let log = transaction_log(&db, &account).await;
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].amount, dec!(250.50));
    assert_eq!(signed_sum(&log), account.balance);
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_non_positive_deposit_rejected_balance_unchanged() {
    let db = setup().await;
    let number = create_funded_account(&db, dec!(100), dec!(500)).await;
    let ops = OperationRepository::new(db.clone());

    for amount in [dec!(0), dec!(-10)] {
        let result = ops.deposit(number, amount).await;
        assert!(matches!(
            result,
            Err(OperationError::Rule(RuleError::InvalidAmount(_)))
        ));
    }

    let account = fetch_account(&db, number).await;
    assert_eq!(account.balance, dec!(100));
    assert_eq!(transaction_log(&db, &account).await.len(), 1);
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_sequential_withdrawals_drain_then_fail_on_funds() {
    let db = setup().await;
    let number = create_funded_account(&db, dec!(1000), dec!(500)).await;
    let ops = OperationRepository::new(db.clone());

    let account = ops.withdraw(number, dec!(500)).await.unwrap();
    assert_eq!(account.balance, dec!(500));

    let account = ops.withdraw(number, dec!(500)).await.unwrap();
    assert_eq!(account.balance, Decimal::ZERO);

    let result = ops.withdraw(number, dec!(1)).await;
    assert!(matches!(
        result,
        Err(OperationError::Rule(RuleError::InsufficientFunds { .. }))
    ));
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_withdraw_above_limit_fails_despite_sufficient_balance() {
    let db = setup().await;
    let number = create_funded_account(&db, dec!(10_000), dec!(500)).await;
    let ops = OperationRepository::new(db.clone());

    let result = ops.withdraw(number, dec!(500.01)).await;
    assert!(matches!(
        result,
        Err(OperationError::Rule(RuleError::LimitExceeded { .. }))
    ));

    let account = fetch_account(&db, number).await;
    assert_eq!(account.balance, dec!(10_000));
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_withdraw_from_unknown_account_fails() {
    let db = setup().await;
    let ops = OperationRepository::new(db.clone());

    let result = ops.withdraw(i64::MAX, dec!(1)).await;
    assert!(matches!(result, Err(OperationError::AccountNotFound(_))));
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_transfer_moves_money_and_writes_both_legs() {
    let db = setup().await;
    let source = create_funded_account(&db, dec!(100), dec!(1000)).await;
    let dest = create_funded_account(&db, dec!(0), dec!(0)).await;
    let ops = OperationRepository::new(db.clone());

    ops.transfer(source, dest, dec!(100)).await.unwrap();

    let source_account = fetch_account(&db, source).await;
    let dest_account = fetch_account(&db, dest).await;
    assert_eq!(source_account.balance, Decimal::ZERO);
    assert_eq!(dest_account.balance, dec!(100));

    let source_log = transaction_log(&db, &source_account).await;
    let dest_log = transaction_log(&db, &dest_account).await;

    let out_legs: Vec<_> = source_log
        .iter()
        .filter(|t| MovementKind::from(t.kind.clone()) == MovementKind::TransferOut)
        .collect();
    let in_legs: Vec<_> = dest_log
        .iter()
        .filter(|t| MovementKind::from(t.kind.clone()) == MovementKind::TransferIn)
        .collect();

    assert_eq!(out_legs.len(), 1);
    assert_eq!(in_legs.len(), 1);
    assert_eq!(out_legs[0].amount, dec!(100));
    assert_eq!(in_legs[0].amount, dec!(100));
    // both legs share the same logical timestamp
    assert_eq!(out_legs[0].created_at, in_legs[0].created_at);
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_failed_transfer_leaves_source_untouched() {
    let db = setup().await;
    let source = create_funded_account(&db, dec!(300), dec!(1000)).await;
    let ops = OperationRepository::new(db.clone());

    let result = ops.transfer(source, i64::MAX - 1, dec!(50)).await;
    assert!(matches!(result, Err(OperationError::AccountNotFound(_))));

    let account = fetch_account(&db, source).await;
    assert_eq!(account.balance, dec!(300));
    // only the funding deposit is in the log
    assert_eq!(transaction_log(&db, &account).await.len(), 1);
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_transfer_to_same_missing_account_reports_not_found() {
    let db = setup().await;
    let ops = OperationRepository::new(db.clone());

    // existence wins over the distinctness rule
    let result = ops.transfer(i64::MAX - 3, i64::MAX - 3, dec!(10)).await;
    assert!(matches!(result, Err(OperationError::AccountNotFound(_))));
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_transfer_to_same_account_rejected() {
    let db = setup().await;
    let number = create_funded_account(&db, dec!(500), dec!(1000)).await;
    let ops = OperationRepository::new(db.clone());

    let result = ops.transfer(number, number, dec!(50)).await;
    assert!(matches!(
        result,
        Err(OperationError::Rule(RuleError::SameAccount))
    ));

    let account = fetch_account(&db, number).await;
    assert_eq!(account.balance, dec!(500));
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_balance_equals_signed_transaction_sum() {
    let db = setup().await;
    let a = create_funded_account(&db, dec!(0), dec!(400)).await;
    let b = create_funded_account(&db, dec!(0), dec!(400)).await;
    let ops = OperationRepository::new(db.clone());

    ops.deposit(a, dec!(900)).await.unwrap();
    ops.withdraw(a, dec!(120.75)).await.unwrap();
    ops.transfer(a, b, dec!(300)).await.unwrap();
    ops.deposit(b, dec!(10)).await.unwrap();
    ops.transfer(b, a, dec!(55.25)).await.unwrap();

    for number in [a, b] {
        let account = fetch_account(&db, number).await;
        let log = transaction_log(&db, &account).await;
        assert_eq!(
            signed_sum(&log),
            account.balance,
            "balance drifted from the transaction log for account {number}"
        );
    }
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_concurrent_withdrawals_never_overdraw() {
    let db = setup().await;
    let number = create_funded_account(&db, dec!(100), dec!(100)).await;

    let mut handles = Vec::new();
    for _ in 0..4 {
        let ops = OperationRepository::new(db.clone());
        handles.push(tokio::spawn(async move {
            ops.withdraw(number, dec!(60)).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }

    // only one 60 fits into a balance of 100
    assert_eq!(successes, 1);
    let account = fetch_account(&db, number).await;
    assert_eq!(account.balance, dec!(40));
}
