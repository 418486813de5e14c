//! Ledger module - balance mutations and their append-only history.
//!
//! Deposits credit one account. Conversions move value between two accounts
//! of the same user, priced against the home currency, and leave one
//! transaction plus an expense and an income history entry behind.

mod ledger_errors;
mod ledger_model;
mod ledger_rules;
mod ledger_service;
mod ledger_traits;

pub use ledger_errors::LedgerError;
pub use ledger_model::*;
pub use ledger_rules::{ensure_deletable, ensure_sufficient_balance};
pub use ledger_service::LedgerService;
pub use ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
