//! Ledger repository and service traits.

use async_trait::async_trait;

use super::ledger_model::{
    AccountHistoryEntry, ConversionPlan, ConversionRequest, DepositRecord, DepositRequest,
    TransactionRecord,
};
use crate::accounts::CurrencyAccount;
use crate::errors::Result;

/// Persistence of balance mutations and their history.
///
/// Every mutating method is one atomic unit: either all of its writes
/// commit or none do. Implementations re-read balances inside the unit and
/// re-run the rules in `ledger_rules` against them.
#[async_trait]
pub trait LedgerRepositoryTrait: Send + Sync {
    /// Credits the user's account in `deposit.currency_code` and appends a
    /// deposit history row.
    async fn apply_deposit(&self, deposit: DepositRequest) -> Result<DepositRecord>;

    /// Debits the source account, credits the destination account and appends
    /// one transaction and two account history rows.
    async fn apply_conversion(&self, plan: ConversionPlan) -> Result<TransactionRecord>;

    /// Removes an account if the deletion rules allow it.
    async fn delete_account(&self, account_id: &str) -> Result<()>;

    fn list_transactions(&self, user_id: &str) -> Result<Vec<TransactionRecord>>;

    /// Deposits newest first, optionally only those into `currency_code`.
    fn list_deposits(
        &self,
        user_id: &str,
        currency_code: Option<&str>,
    ) -> Result<Vec<DepositRecord>>;

    /// History entries newest first.
    fn list_account_history(&self, user_id: &str) -> Result<Vec<AccountHistoryEntry>>;
}

/// Ledger use cases.
#[async_trait]
pub trait LedgerServiceTrait: Send + Sync {
    async fn deposit(&self, request: DepositRequest) -> Result<DepositRecord>;

    async fn convert(&self, request: ConversionRequest) -> Result<TransactionRecord>;

    async fn delete_account(&self, account_id: &str) -> Result<()>;

    /// Opens the zero-balance home-currency account of a new user.
    async fn open_home_account(&self, user_id: &str) -> Result<CurrencyAccount>;

    fn list_transactions(&self, user_id: &str) -> Result<Vec<TransactionRecord>>;

    fn list_deposits(
        &self,
        user_id: &str,
        currency_code: Option<&str>,
    ) -> Result<Vec<DepositRecord>>;

    fn list_account_history(&self, user_id: &str) -> Result<Vec<AccountHistoryEntry>>;
}
