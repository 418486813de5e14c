//! Database models for the ledger history tables.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use kantor_core::ledger::{AccountHistoryEntry, DepositRecord, HistoryAction, TransactionRecord};
use kantor_core::Result;

use crate::utils::parse_decimal;

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub from_currency: String,
    pub to_currency: String,
    pub amount: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<TransactionDB> for TransactionRecord {
    type Error = kantor_core::Error;

    fn try_from(db: TransactionDB) -> Result<Self> {
        Ok(Self {
            amount: parse_decimal(&db.amount, "amount")?,
            id: db.id,
            user_id: db.user_id,
            from_currency: db.from_currency,
            to_currency: db.to_currency,
            created_at: db.created_at,
        })
    }
}

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::account_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountHistoryDB {
    pub id: String,
    pub user_id: String,
    pub currency: String,
    pub amount: String,
    pub action: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<AccountHistoryDB> for AccountHistoryEntry {
    type Error = kantor_core::Error;

    fn try_from(db: AccountHistoryDB) -> Result<Self> {
        Ok(Self {
            amount: parse_decimal(&db.amount, "amount")?,
            action: db.action.parse::<HistoryAction>()?,
            id: db.id,
            user_id: db.user_id,
            currency: db.currency,
            created_at: db.created_at,
        })
    }
}

/// A deposit row. The currency lives on the account it was paid into.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::deposit_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DepositHistoryDB {
    pub id: String,
    pub user_id: String,
    pub account_id: String,
    pub amount: String,
    pub created_at: NaiveDateTime,
}

impl DepositHistoryDB {
    pub(crate) fn into_record(self, currency_code: String) -> Result<DepositRecord> {
        Ok(DepositRecord {
            amount: parse_decimal(&self.amount, "amount")?,
            id: self.id,
            user_id: self.user_id,
            account_id: self.account_id,
            currency_code,
            created_at: self.created_at,
        })
    }
}
