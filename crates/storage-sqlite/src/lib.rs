//! SQLite storage implementation for the Kantor ledger.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `kantor-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for users, currency accounts and the ledger
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The `core` crate is database-agnostic and works with traits.
//!
//! ```text
//!            core (domain)
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```
//!
//! All writes go through a single writer task (see [`db::write_actor`]), so
//! each balance mutation and its history rows commit in one transaction.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod accounts;
pub mod ledger;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage error types
pub use errors::{IntoCore, StorageError};

// Re-export repositories
pub use accounts::AccountRepository;
pub use ledger::LedgerRepository;
pub use users::UserRepository;

// Re-export core error types for convenience
pub use kantor_core::errors::{DatabaseError, Error, Result};

#[cfg(test)]
mod test_utils;
