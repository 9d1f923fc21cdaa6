//! Core business rules for Caixa.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `ops` - Money-movement validation rules and movement kinds
//! - `auth` - Password hashing collaborator

pub mod auth;
pub mod ops;
