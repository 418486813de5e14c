//! Account repository and service traits.
//!
//! These traits define the contract for account operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::accounts_model::{CurrencyAccount, CurrencyAccountUpdate, NewCurrencyAccount};
use crate::errors::Result;

/// Trait defining the contract for currency account persistence.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    /// Opens a zero-balance account and allocates its account number.
    ///
    /// Fails with `LedgerError::DuplicateAccount` if the user already holds
    /// an account in that currency.
    async fn create(&self, new_account: NewCurrencyAccount) -> Result<CurrencyAccount>;

    /// Updates the mutable fields of an account.
    async fn update(&self, account_update: CurrencyAccountUpdate) -> Result<CurrencyAccount>;

    /// Retrieves an account by its ID.
    fn get_by_id(&self, account_id: &str) -> Result<CurrencyAccount>;

    /// Finds the account a user holds in `currency_code`, if any.
    fn find_by_user_and_currency(
        &self,
        user_id: &str,
        currency_code: &str,
    ) -> Result<Option<CurrencyAccount>>;

    /// Lists accounts, optionally restricted to one user.
    fn list(&self, user_id: Option<&str>) -> Result<Vec<CurrencyAccount>>;
}

/// Trait defining the contract for currency account service operations.
///
/// Deleting an account is a ledger operation, see `LedgerServiceTrait`.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    /// Opens a new account for an existing user.
    async fn create_account(&self, new_account: NewCurrencyAccount) -> Result<CurrencyAccount>;

    /// Activates or deactivates an account.
    async fn update_account(
        &self,
        account_update: CurrencyAccountUpdate,
    ) -> Result<CurrencyAccount>;

    /// Retrieves an account by ID.
    fn get_account(&self, account_id: &str) -> Result<CurrencyAccount>;

    /// Gets all accounts of all users.
    fn get_all_accounts(&self) -> Result<Vec<CurrencyAccount>>;

    /// Gets the accounts of one user. Fails with `NotFound` when there are none.
    fn get_user_accounts(&self, user_id: &str) -> Result<Vec<CurrencyAccount>>;
}
