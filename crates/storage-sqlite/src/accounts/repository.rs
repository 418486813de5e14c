use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use kantor_core::accounts::{
    generate_account_number, AccountRepositoryTrait, CurrencyAccount, CurrencyAccountUpdate,
    NewCurrencyAccount,
};
use kantor_core::ledger::LedgerError;
use kantor_core::{Error, Result};

use super::model::{into_domain, CurrencyAccountDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::currency_accounts;
use crate::schema::currency_accounts::dsl::*;
use crate::utils::format_money;

const ACCOUNT_NOT_FOUND: &str = "Currency account not found";

/// Repository for managing currency account data in the database
pub struct AccountRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl AccountRepository {
    /// Creates a new AccountRepository instance
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

/// Loads the account a user holds in one currency.
pub(crate) fn find_account(
    conn: &mut SqliteConnection,
    owner_id: &str,
    currency: &str,
) -> Result<Option<CurrencyAccount>> {
    currency_accounts
        .filter(user_id.eq(owner_id))
        .filter(currency_code.eq(currency))
        .select(CurrencyAccountDB::as_select())
        .first::<CurrencyAccountDB>(conn)
        .optional()
        .into_core()?
        .map(CurrencyAccount::try_from)
        .transpose()
}

/// Loads an account by ID.
pub(crate) fn find_account_by_id(
    conn: &mut SqliteConnection,
    account_id: &str,
) -> Result<Option<CurrencyAccount>> {
    currency_accounts
        .find(account_id)
        .select(CurrencyAccountDB::as_select())
        .first::<CurrencyAccountDB>(conn)
        .optional()
        .into_core()?
        .map(CurrencyAccount::try_from)
        .transpose()
}

/// Overwrites the stored balance of an account.
pub(crate) fn store_balance(
    conn: &mut SqliteConnection,
    account_id: &str,
    new_balance: Decimal,
    now: NaiveDateTime,
) -> Result<()> {
    diesel::update(currency_accounts.find(account_id))
        .set((balance.eq(format_money(new_balance)), updated_at.eq(now)))
        .execute(conn)
        .into_core()?;
    Ok(())
}

fn number_taken(conn: &mut SqliteConnection, candidate: &str) -> Result<bool> {
    let count: i64 = currency_accounts
        .filter(account_number.eq(candidate))
        .count()
        .get_result(conn)
        .into_core()?;
    Ok(count > 0)
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    async fn create(&self, new_account: NewCurrencyAccount) -> Result<CurrencyAccount> {
        new_account.validate()?;

        self.writer
            .exec(move |conn| {
                if find_account(conn, &new_account.user_id, &new_account.currency_code)?
                    .is_some()
                {
                    return Err(
                        LedgerError::duplicate_account(&new_account.currency_code).into(),
                    );
                }

                let number = generate_account_number(&mut rand::thread_rng(), |candidate| {
                    number_taken(conn, candidate)
                })?;
                let now = Utc::now().naive_utc();

                let account_db = CurrencyAccountDB {
                    id: Uuid::new_v4().to_string(),
                    user_id: new_account.user_id,
                    currency_code: new_account.currency_code,
                    balance: format_money(Decimal::ZERO),
                    is_active: new_account.is_active,
                    account_number: number,
                    created_at: now,
                    updated_at: now,
                };

                diesel::insert_into(currency_accounts::table)
                    .values(&account_db)
                    .execute(conn)
                    .into_core()?;

                debug!(
                    "Opened {} account {} for user {}",
                    account_db.currency_code, account_db.account_number, account_db.user_id
                );
                CurrencyAccount::try_from(account_db)
            })
            .await
    }

    async fn update(&self, account_update: CurrencyAccountUpdate) -> Result<CurrencyAccount> {
        account_update.validate()?;
        let account_id = account_update.id.unwrap_or_default();

        self.writer
            .exec(move |conn| {
                let affected = diesel::update(currency_accounts.find(account_id.as_str()))
                    .set((
                        is_active.eq(account_update.is_active),
                        updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;
                if affected == 0 {
                    return Err(Error::NotFound(ACCOUNT_NOT_FOUND.to_string()));
                }

                find_account_by_id(conn, &account_id)?
                    .ok_or_else(|| Error::NotFound(ACCOUNT_NOT_FOUND.to_string()))
            })
            .await
    }

    fn get_by_id(&self, account_id: &str) -> Result<CurrencyAccount> {
        let mut conn = get_connection(&self.pool)?;
        find_account_by_id(&mut conn, account_id)?
            .ok_or_else(|| Error::NotFound(ACCOUNT_NOT_FOUND.to_string()))
    }

    fn find_by_user_and_currency(
        &self,
        owner_id: &str,
        currency: &str,
    ) -> Result<Option<CurrencyAccount>> {
        let mut conn = get_connection(&self.pool)?;
        find_account(&mut conn, owner_id, currency)
    }

    fn list(&self, owner_id: Option<&str>) -> Result<Vec<CurrencyAccount>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = currency_accounts::table.into_boxed();
        if let Some(owner_id) = owner_id {
            query = query.filter(user_id.eq(owner_id));
        }

        let results = query
            .select(CurrencyAccountDB::as_select())
            .order((user_id.asc(), created_at.asc(), currency_code.asc()))
            .load::<CurrencyAccountDB>(&mut conn)
            .into_core()?;

        into_domain(results)
    }
}
