//! Accounts module - per-currency balance accounts, services, and traits.

mod account_number;
mod accounts_constants;
mod accounts_model;
mod accounts_service;
mod accounts_traits;

// Re-export the public interface
pub use account_number::generate_account_number;
pub use accounts_constants::*;
pub use accounts_model::{CurrencyAccount, CurrencyAccountUpdate, NewCurrencyAccount};
pub use accounts_service::AccountService;
pub use accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
