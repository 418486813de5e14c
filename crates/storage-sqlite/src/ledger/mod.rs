//! SQLite storage implementation for deposits, conversions and their history.

mod model;
mod repository;

pub use model::{AccountHistoryDB, DepositHistoryDB, TransactionDB};
pub use repository::LedgerRepository;

#[cfg(test)]
mod repository_tests;
