//! Kantor Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the multi-currency ledger:
//! users and their validation rules, per-currency accounts, and the ledger
//! operations (deposit, conversion, account deletion). It is
//! database-agnostic and defines traits that are implemented by the
//! `storage-sqlite` crate.

pub mod accounts;
pub mod constants;
pub mod errors;
pub mod ledger;
pub mod users;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
