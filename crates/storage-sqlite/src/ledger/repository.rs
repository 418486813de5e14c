use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use log::{debug, info};
use std::sync::Arc;
use uuid::Uuid;

use kantor_core::errors::ValidationError;
use kantor_core::ledger::{
    ensure_deletable, ensure_sufficient_balance, AccountHistoryEntry, ConversionPlan,
    DepositRecord, DepositRequest, HistoryAction, LedgerError, LedgerRepositoryTrait,
    TransactionRecord,
};
use kantor_core::utils::money::{credit_balance, validate_amount};
use kantor_core::{Error, Result};

use super::model::{AccountHistoryDB, DepositHistoryDB, TransactionDB};
use crate::accounts::{find_account, find_account_by_id, store_balance};
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{account_history, currency_accounts, deposit_history, transactions};
use crate::utils::format_money;

/// Repository applying balance mutations together with their history rows.
pub struct LedgerRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl LedgerRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl LedgerRepositoryTrait for LedgerRepository {
    async fn apply_deposit(&self, deposit: DepositRequest) -> Result<DepositRecord> {
        let amount = validate_amount(deposit.amount)?;

        self.writer
            .exec(move |conn| {
                let account = find_account(conn, &deposit.user_id, &deposit.currency_code)?
                    .ok_or_else(|| LedgerError::account_not_found(&deposit.currency_code))?;

                let new_balance =
                    credit_balance(account.balance, amount, &account.currency_code)?;
                let now = Utc::now().naive_utc();
                store_balance(conn, &account.id, new_balance, now)?;

                let row = DepositHistoryDB {
                    id: Uuid::new_v4().to_string(),
                    user_id: account.user_id,
                    account_id: account.id,
                    amount: format_money(amount),
                    created_at: now,
                };
                diesel::insert_into(deposit_history::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;

                debug!(
                    "Deposited {} {} into account {}",
                    row.amount, account.currency_code, row.account_id
                );
                row.into_record(account.currency_code)
            })
            .await
    }

    async fn apply_conversion(&self, plan: ConversionPlan) -> Result<TransactionRecord> {
        if plan.from_currency == plan.to_currency {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Source and destination currencies must differ.".to_string(),
            )));
        }

        self.writer
            .exec(move |conn| {
                let source = find_account(conn, &plan.user_id, &plan.from_currency)?
                    .ok_or_else(|| LedgerError::account_not_found(&plan.from_currency))?;
                let destination = find_account(conn, &plan.user_id, &plan.to_currency)?
                    .ok_or_else(|| LedgerError::account_not_found(&plan.to_currency))?;

                ensure_sufficient_balance(&source, plan.debit_amount)?;
                let destination_balance = credit_balance(
                    destination.balance,
                    plan.credit_amount,
                    &destination.currency_code,
                )?;

                let now = Utc::now().naive_utc();
                store_balance(conn, &source.id, source.balance - plan.debit_amount, now)?;
                store_balance(conn, &destination.id, destination_balance, now)?;

                let transaction = TransactionDB {
                    id: Uuid::new_v4().to_string(),
                    user_id: plan.user_id.clone(),
                    from_currency: plan.from_currency.clone(),
                    to_currency: plan.to_currency.clone(),
                    amount: format_money(plan.amount),
                    created_at: now,
                };
                diesel::insert_into(transactions::table)
                    .values(&transaction)
                    .execute(conn)
                    .into_core()?;

                let legs = [
                    AccountHistoryDB {
                        id: Uuid::new_v4().to_string(),
                        user_id: plan.user_id.clone(),
                        currency: plan.from_currency.clone(),
                        amount: format_money(plan.debit_amount),
                        action: HistoryAction::Expense.to_string(),
                        created_at: now,
                    },
                    AccountHistoryDB {
                        id: Uuid::new_v4().to_string(),
                        user_id: plan.user_id.clone(),
                        currency: plan.to_currency.clone(),
                        amount: format_money(plan.credit_amount),
                        action: HistoryAction::Income.to_string(),
                        created_at: now,
                    },
                ];
                diesel::insert_into(account_history::table)
                    .values(&legs[..])
                    .execute(conn)
                    .into_core()?;

                info!(
                    "Converted {} {} -> {} {} at {} for user {}",
                    plan.debit_amount,
                    plan.from_currency,
                    plan.credit_amount,
                    plan.to_currency,
                    plan.rate,
                    plan.user_id
                );
                TransactionRecord::try_from(transaction)
            })
            .await
    }

    async fn delete_account(&self, account_id: &str) -> Result<()> {
        let account_id = account_id.to_string();

        self.writer
            .exec(move |conn| {
                let account = find_account_by_id(conn, &account_id)?.ok_or_else(|| {
                    LedgerError::NotFound("Currency account not found".to_string())
                })?;
                ensure_deletable(&account)?;

                diesel::delete(currency_accounts::table.find(account_id.as_str()))
                    .execute(conn)
                    .into_core()?;

                info!(
                    "Deleted {} account {} of user {}",
                    account.currency_code, account.account_number, account.user_id
                );
                Ok(())
            })
            .await
    }

    fn list_transactions(&self, user_id: &str) -> Result<Vec<TransactionRecord>> {
        let mut conn = get_connection(&self.pool)?;

        transactions::table
            .filter(transactions::user_id.eq(user_id))
            .select(TransactionDB::as_select())
            .order(transactions::created_at.desc())
            .load::<TransactionDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(TransactionRecord::try_from)
            .collect()
    }

    fn list_deposits(
        &self,
        user_id: &str,
        currency_code: Option<&str>,
    ) -> Result<Vec<DepositRecord>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = deposit_history::table
            .inner_join(currency_accounts::table)
            .filter(deposit_history::user_id.eq(user_id))
            .into_boxed();
        if let Some(currency) = currency_code {
            query = query.filter(currency_accounts::currency_code.eq(currency));
        }

        query
            .select((DepositHistoryDB::as_select(), currency_accounts::currency_code))
            .order(deposit_history::created_at.desc())
            .load::<(DepositHistoryDB, String)>(&mut conn)
            .into_core()?
            .into_iter()
            .map(|(row, currency)| row.into_record(currency))
            .collect()
    }

    fn list_account_history(&self, user_id: &str) -> Result<Vec<AccountHistoryEntry>> {
        let mut conn = get_connection(&self.pool)?;

        account_history::table
            .filter(account_history::user_id.eq(user_id))
            .select(AccountHistoryDB::as_select())
            .order(account_history::created_at.desc())
            .load::<AccountHistoryDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(AccountHistoryEntry::try_from)
            .collect()
    }
}
