//! Database model for currency accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use kantor_core::accounts::CurrencyAccount;
use kantor_core::Result;

use crate::utils::parse_decimal;

/// Database model for currency accounts
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::currency_accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CurrencyAccountDB {
    pub id: String,
    pub user_id: String,
    pub currency_code: String,
    pub balance: String,
    pub is_active: bool,
    pub account_number: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<CurrencyAccountDB> for CurrencyAccount {
    type Error = kantor_core::Error;

    fn try_from(db: CurrencyAccountDB) -> Result<Self> {
        Ok(Self {
            balance: parse_decimal(&db.balance, "balance")?,
            id: db.id,
            user_id: db.user_id,
            currency_code: db.currency_code,
            is_active: db.is_active,
            account_number: db.account_number,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

/// Converts loaded rows, failing on the first corrupt one.
pub(crate) fn into_domain(rows: Vec<CurrencyAccountDB>) -> Result<Vec<CurrencyAccount>> {
    rows.into_iter().map(CurrencyAccount::try_from).collect()
}
