use log::debug;
use std::sync::Arc;

use super::accounts_model::{CurrencyAccount, CurrencyAccountUpdate, NewCurrencyAccount};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::errors::{Error, Result};
use crate::ledger::LedgerError;
use crate::users::UserRepositoryTrait;

/// Service for managing currency accounts
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
    user_repository: Arc<dyn UserRepositoryTrait>,
}

impl AccountService {
    /// Creates a new AccountService instance
    pub fn new(
        repository: Arc<dyn AccountRepositoryTrait>,
        user_repository: Arc<dyn UserRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            user_repository,
        }
    }
}

#[async_trait::async_trait]
impl AccountServiceTrait for AccountService {
    async fn create_account(&self, new_account: NewCurrencyAccount) -> Result<CurrencyAccount> {
        new_account.validate()?;
        debug!(
            "Creating {} account for user {}",
            new_account.currency_code, new_account.user_id
        );

        // Fails with NotFound for an unknown owner
        self.user_repository.get_by_id(&new_account.user_id)?;

        if self
            .repository
            .find_by_user_and_currency(&new_account.user_id, &new_account.currency_code)?
            .is_some()
        {
            return Err(LedgerError::duplicate_account(&new_account.currency_code).into());
        }

        self.repository.create(new_account).await
    }

    async fn update_account(
        &self,
        account_update: CurrencyAccountUpdate,
    ) -> Result<CurrencyAccount> {
        account_update.validate()?;
        self.repository.update(account_update).await
    }

    fn get_account(&self, account_id: &str) -> Result<CurrencyAccount> {
        self.repository.get_by_id(account_id)
    }

    fn get_all_accounts(&self) -> Result<Vec<CurrencyAccount>> {
        self.repository.list(None)
    }

    fn get_user_accounts(&self, user_id: &str) -> Result<Vec<CurrencyAccount>> {
        let accounts = self.repository.list(Some(user_id))?;
        if accounts.is_empty() {
            return Err(Error::NotFound(
                "No currency accounts found for this user.".to_string(),
            ));
        }
        Ok(accounts)
    }
}
