//! Database seeder for Caixa development and testing.
//!
//! Seeds two demo users with funded accounts. Inserts go through the
//! repositories so account numbers come from the database sequence and
//! balances stay consistent with the transaction log.
//!
//! Usage: cargo run --bin seeder

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;

use caixa_core::auth::hash_password;
use caixa_db::repositories::{
    AccountRepository, CreateUserInput, OperationRepository, UserRepository,
};

struct DemoUser {
    name: &'static str,
    national_id: &'static str,
    birth_date: NaiveDate,
    address: &'static str,
    password: &'static str,
    initial_limit: Decimal,
    initial_deposit: Decimal,
}

fn demo_users() -> Vec<DemoUser> {
    vec![
        DemoUser {
            name: "Ana Souza",
            national_id: "11122233344",
            birth_date: NaiveDate::from_ymd_opt(1988, 3, 14).unwrap(),
            address: "Rua das Flores, 100 - Sao Paulo",
            password: "ana-dev-password",
            initial_limit: dec!(500),
            initial_deposit: dec!(1000),
        },
        DemoUser {
            name: "Bruno Lima",
            national_id: "55566677788",
            birth_date: NaiveDate::from_ymd_opt(1995, 11, 2).unwrap(),
            address: "Av. Atlantica, 2000 - Rio de Janeiro",
            password: "bruno-dev-password",
            initial_limit: dec!(1500),
            initial_deposit: dec!(250),
        },
    ]
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = caixa_db::connect(&database_url, 5)
        .await
        .expect("Failed to connect to database");

    for user in demo_users() {
        seed_user(&db, &user).await;
    }

    println!("Seeding complete!");
}

/// Seeds one demo user with a funded account; skips users that already exist.
async fn seed_user(db: &DatabaseConnection, demo: &DemoUser) {
    let users = UserRepository::new(db.clone());

    match users.national_id_exists(demo.national_id).await {
        Ok(true) => {
            println!("  User {} already exists, skipping...", demo.national_id);
            return;
        }
        Ok(false) => {}
        Err(e) => {
            eprintln!("Failed to check user {}: {e}", demo.national_id);
            return;
        }
    }

    let password_hash = hash_password(demo.password).expect("Failed to hash password");

    if let Err(e) = users
        .create(CreateUserInput {
            name: demo.name.to_string(),
            national_id: demo.national_id.to_string(),
            birth_date: demo.birth_date,
            address: demo.address.to_string(),
            password_hash,
        })
        .await
    {
        eprintln!("Failed to insert user {}: {e}", demo.national_id);
        return;
    }
    println!("  Created user: {} ({})", demo.name, demo.national_id);

    let accounts = AccountRepository::new(db.clone());
    let account = match accounts
        .create_account(demo.national_id, demo.initial_limit)
        .await
    {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Failed to create account for {}: {e}", demo.national_id);
            return;
        }
    };
    println!("  Created account #{}", account.number);

    if demo.initial_deposit > Decimal::ZERO {
        let ops = OperationRepository::new(db.clone());
        match ops.deposit(account.number, demo.initial_deposit).await {
            Ok(a) => println!("  Deposited {} (balance {})", demo.initial_deposit, a.balance),
            Err(e) => eprintln!("Failed to fund account #{}: {e}", account.number),
        }
    }
}
