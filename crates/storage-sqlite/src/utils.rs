//! Utility functions for SQLite storage operations.
//!
//! Amounts are stored as TEXT so no precision is lost in SQLite's REAL type.

use log::error;
use rust_decimal::Decimal;
use std::str::FromStr;

use kantor_core::errors::{DatabaseError, Error, Result};
use kantor_core::utils::money::to_money;

/// Parses a stored amount, accepting scientific notation as a fallback.
///
/// Unlike display-only values, a corrupt balance must not be read as zero,
/// so a parse failure is an error.
pub fn parse_decimal(value_str: &str, field_name: &str) -> Result<Decimal> {
    Decimal::from_str(value_str)
        .or_else(|_| Decimal::from_scientific(value_str))
        .map_err(|e| {
            error!("Failed to parse {} '{}': {}", field_name, value_str, e);
            Error::Database(DatabaseError::Internal(format!(
                "Invalid {} '{}' in database",
                field_name, value_str
            )))
        })
}

/// Renders an amount with exactly two fractional digits for storage.
pub fn format_money(value: Decimal) -> String {
    to_money(value).to_string()
}
