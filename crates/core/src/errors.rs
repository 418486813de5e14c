//! Core error types for the Kantor ledger.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use kantor_rates::RateError;
use thiserror::Error;

use crate::ledger::LedgerError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the ledger application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("{0}")]
    Ledger(#[from] LedgerError),

    #[error("Exchange rate unavailable: {0}")]
    RateUnavailable(#[from] RateError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A record addressed by the caller does not exist.
    #[error("{0}")]
    NotFound(String),

    #[error("Invalid credentials.")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    /// Every rule violation found in a user record, in field order.
    #[error("{}", .0.join(" "))]
    Rules(Vec<String>),
}

impl ValidationError {
    /// Messages suitable for a client-facing `errors` list.
    pub fn messages(&self) -> Vec<String> {
        match self {
            ValidationError::Rules(messages) => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Unexpected(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_violations_display_and_messages() {
        let err = ValidationError::Rules(vec![
            "Username cannot be empty.".to_string(),
            "Invalid email format.".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Username cannot be empty. Invalid email format."
        );
        assert_eq!(err.messages().len(), 2);
    }

    #[test]
    fn test_single_message_for_other_variants() {
        let err = ValidationError::InvalidInput("bad".to_string());
        assert_eq!(err.messages(), vec!["Invalid input: bad".to_string()]);
    }
}
