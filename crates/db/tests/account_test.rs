//! Integration tests for the account directory.
//!
//! Require a running Postgres (`DATABASE_URL`); run with `-- --ignored`.

mod common;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use caixa_core::ops::RuleError;
use caixa_db::repositories::{AccountRepository, DirectoryError, OperationRepository};

use common::{create_funded_account, create_test_user, setup};

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_create_account_assigns_unique_increasing_numbers() {
    let db = setup().await;
    let national_id = create_test_user(&db).await;
    let repo = AccountRepository::new(db.clone());

    let first = repo
        .create_account(&national_id, Decimal::ZERO)
        .await
        .unwrap();
    let second = repo
        .create_account(&national_id, Decimal::ZERO)
        .await
        .unwrap();

    assert!(second.number > first.number);
    assert_eq!(first.branch, "0001");
    assert_eq!(first.balance, Decimal::ZERO);
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_concurrent_account_creation_never_collides() {
    let db = setup().await;
    let national_id = create_test_user(&db).await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let repo = AccountRepository::new(db.clone());
        let id = national_id.clone();
        handles.push(tokio::spawn(async move {
            repo.create_account(&id, Decimal::ZERO).await
        }));
    }

    let mut numbers = Vec::new();
    for handle in handles {
        numbers.push(handle.await.unwrap().unwrap().number);
    }
    numbers.sort_unstable();
    numbers.dedup();
    assert_eq!(numbers.len(), 8, "duplicate account numbers assigned");
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_create_account_for_unknown_user_fails() {
    let db = setup().await;
    let repo = AccountRepository::new(db.clone());

    let result = repo.create_account("no-such-person", Decimal::ZERO).await;
    assert!(matches!(result, Err(DirectoryError::UserNotFound(_))));
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_update_limit() {
    let db = setup().await;
    let number = create_funded_account(&db, dec!(0), dec!(0)).await;
    let repo = AccountRepository::new(db.clone());

    let account = repo.update_limit(number, dec!(1500)).await.unwrap();
    assert_eq!(account.withdrawal_limit, dec!(1500));

    let result = repo.update_limit(number, dec!(-1)).await;
    assert!(matches!(
        result,
        Err(DirectoryError::Rule(RuleError::NegativeLimit(_)))
    ));

    let result = repo.update_limit(i64::MAX, dec!(100)).await;
    assert!(matches!(result, Err(DirectoryError::AccountNotFound(_))));
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_find_by_number_absent() {
    let db = setup().await;
    let repo = AccountRepository::new(db.clone());

    let found = repo.find_by_number(i64::MAX - 2).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn test_list_users_with_accounts_includes_transactions() {
    let db = setup().await;
    let number = create_funded_account(&db, dec!(0), dec!(500)).await;
    let ops = OperationRepository::new(db.clone());
    ops.deposit(number, dec!(75)).await.unwrap();

    let repo = AccountRepository::new(db.clone());
    let users = repo.list_users_with_accounts().await.unwrap();

    let entry = users
        .iter()
        .flat_map(|u| u.accounts.iter())
        .find(|a| a.account.number == number)
        .expect("account missing from aggregate");

    assert_eq!(entry.transactions.len(), 1);
    assert_eq!(entry.transactions[0].amount, dec!(75));
}
