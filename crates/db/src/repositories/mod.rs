//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Each money-movement operation acquires its own database
//! transaction and releases it on every exit path.

pub mod account;
pub mod operation;
pub mod user;

pub use account::{AccountRepository, AccountWithTransactions, DirectoryError, UserWithAccounts};
pub use operation::{OperationError, OperationRepository};
pub use user::{CreateUserInput, UserRepository};
