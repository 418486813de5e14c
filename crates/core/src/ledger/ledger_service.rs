use async_trait::async_trait;
use kantor_rates::RateProvider;
use log::{debug, info};
use std::sync::Arc;

use super::ledger_errors::LedgerError;
use super::ledger_model::{
    AccountHistoryEntry, ConversionPlan, ConversionRequest, DepositRecord, DepositRequest,
    TransactionRecord,
};
use super::ledger_rules::ensure_sufficient_balance;
use super::ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
use crate::accounts::{AccountRepositoryTrait, CurrencyAccount, NewCurrencyAccount};
use crate::errors::{Error, Result, ValidationError};
use crate::utils::money::validate_amount;

/// Applies deposits and conversions, pricing conversions with a rate provider.
pub struct LedgerService {
    repository: Arc<dyn LedgerRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
    rate_provider: Arc<dyn RateProvider>,
}

impl LedgerService {
    pub fn new(
        repository: Arc<dyn LedgerRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
        rate_provider: Arc<dyn RateProvider>,
    ) -> Self {
        Self {
            repository,
            account_repository,
            rate_provider,
        }
    }

    fn require_account(&self, user_id: &str, currency_code: &str) -> Result<CurrencyAccount> {
        self.account_repository
            .find_by_user_and_currency(user_id, currency_code)?
            .ok_or_else(|| LedgerError::account_not_found(currency_code).into())
    }
}

#[async_trait]
impl LedgerServiceTrait for LedgerService {
    async fn deposit(&self, mut request: DepositRequest) -> Result<DepositRecord> {
        request.amount = validate_amount(request.amount)?;
        self.require_account(&request.user_id, &request.currency_code)?;

        debug!(
            "Depositing {} {} for user {}",
            request.amount, request.currency_code, request.user_id
        );
        self.repository.apply_deposit(request).await
    }

    async fn convert(&self, mut request: ConversionRequest) -> Result<TransactionRecord> {
        request.amount = validate_amount(request.amount)?;
        if request.from_currency == request.to_currency {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Source and destination currencies must differ.".to_string(),
            )));
        }

        let source = self.require_account(&request.user_id, &request.from_currency)?;
        self.require_account(&request.user_id, &request.to_currency)?;

        let (quoted_currency, kind) = request.rate_source();
        let rate = self.rate_provider.get_rate(quoted_currency, kind).await?;
        let plan = ConversionPlan::new(&request, rate)?;
        debug!(
            "Conversion {} -> {} priced at {} {} {}: debit {}, credit {}",
            plan.from_currency,
            plan.to_currency,
            quoted_currency,
            kind,
            rate,
            plan.debit_amount,
            plan.credit_amount
        );

        // Fail fast on the snapshot; the write job checks again.
        ensure_sufficient_balance(&source, plan.debit_amount)?;

        let record = self.repository.apply_conversion(plan).await?;
        info!(
            "Converted {} {} to {} for user {}",
            record.amount, record.from_currency, record.to_currency, record.user_id
        );
        Ok(record)
    }

    async fn delete_account(&self, account_id: &str) -> Result<()> {
        self.repository.delete_account(account_id).await?;
        info!("Deleted currency account {}", account_id);
        Ok(())
    }

    async fn open_home_account(&self, user_id: &str) -> Result<CurrencyAccount> {
        self.account_repository
            .create(NewCurrencyAccount::home(user_id))
            .await
    }

    fn list_transactions(&self, user_id: &str) -> Result<Vec<TransactionRecord>> {
        self.repository.list_transactions(user_id)
    }

    fn list_deposits(
        &self,
        user_id: &str,
        currency_code: Option<&str>,
    ) -> Result<Vec<DepositRecord>> {
        self.repository.list_deposits(user_id, currency_code)
    }

    fn list_account_history(&self, user_id: &str) -> Result<Vec<AccountHistoryEntry>> {
        self.repository.list_account_history(user_id)
    }
}
