//! Password hashing collaborator.
//!
//! The rest of the system treats credentials as opaque: `hash` produces a
//! PHC string, `verify` checks a plaintext against it.

mod password;

pub use password::{PasswordError, hash_password, verify_password};
