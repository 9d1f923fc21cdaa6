//! Initial database migration.
//!
//! Creates the users, accounts, and transactions tables, the
//! `transaction_kind` enum, and the account-number sequence.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(SEQUENCES_SQL).await?;
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(TRANSACTIONS_SQL).await?;
        db.execute_unprepared(INDEXES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
CREATE TYPE transaction_kind AS ENUM (
    'deposit',
    'withdraw',
    'transfer_out',
    'transfer_in'
);
";

// Account numbers come from a sequence so that concurrent account creation
// can never assign the same number (the max+1 approach is racy).
const SEQUENCES_SQL: &str = r"
CREATE SEQUENCE account_number_seq START WITH 1 INCREMENT BY 1;
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY,
    national_id VARCHAR(32) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    birth_date DATE NOT NULL,
    address TEXT NOT NULL,
    password_hash VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    number BIGINT NOT NULL UNIQUE,
    branch VARCHAR(8) NOT NULL DEFAULT '0001',
    balance NUMERIC(14, 2) NOT NULL DEFAULT 0,
    withdrawal_limit NUMERIC(14, 2) NOT NULL DEFAULT 0
        CONSTRAINT accounts_limit_non_negative CHECK (withdrawal_limit >= 0),
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE RESTRICT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE transactions (
    id UUID PRIMARY KEY,
    account_id UUID NOT NULL REFERENCES accounts(id) ON DELETE RESTRICT,
    kind transaction_kind NOT NULL,
    amount NUMERIC(14, 2) NOT NULL
        CONSTRAINT transactions_amount_positive CHECK (amount > 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const INDEXES_SQL: &str = r"
CREATE INDEX idx_accounts_user_id ON accounts(user_id);
CREATE INDEX idx_transactions_account_created ON transactions(account_id, created_at);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS transactions;
DROP TABLE IF EXISTS accounts;
DROP TABLE IF EXISTS users;
DROP SEQUENCE IF EXISTS account_number_seq;
DROP TYPE IF EXISTS transaction_kind;
";
