//! Currency account domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::accounts_constants::{is_currency_code, is_home_currency, is_supported_currency};
use crate::constants::HOME_CURRENCY;
use crate::{errors::ValidationError, Error, Result};

/// Balance held by one user in one currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyAccount {
    pub id: String,
    pub user_id: String,
    pub currency_code: String,
    pub balance: Decimal,
    pub is_active: bool,
    /// Human-readable number, `XXX-XXX-XXX`
    pub account_number: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl CurrencyAccount {
    /// The home-currency account is opened at registration and never removed.
    pub fn is_home(&self) -> bool {
        is_home_currency(&self.currency_code)
    }
}

/// Input model for opening a new account. Accounts always open with a zero
/// balance; money only enters through deposits and conversions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCurrencyAccount {
    pub user_id: String,
    pub currency_code: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl NewCurrencyAccount {
    pub fn new(user_id: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            currency_code: currency_code.into(),
            is_active: true,
        }
    }

    /// The zero-balance home-currency account every user starts with.
    pub fn home(user_id: impl Into<String>) -> Self {
        Self::new(user_id, HOME_CURRENCY)
    }

    /// Validates the new account data.
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if !is_currency_code(&self.currency_code) {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Currency code must be three uppercase letters.".to_string(),
            )));
        }
        if !is_supported_currency(&self.currency_code) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Currency {} is not supported.",
                self.currency_code
            ))));
        }
        Ok(())
    }
}

/// Input model for updating an existing account. Only the active flag is
/// mutable; the balance changes through ledger operations alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyAccountUpdate {
    pub id: Option<String>,
    pub is_active: bool,
}

impl CurrencyAccountUpdate {
    /// Validates the account update data.
    pub fn validate(&self) -> Result<()> {
        match self.id.as_deref() {
            Some(id) if !id.trim().is_empty() => Ok(()),
            _ => Err(Error::Validation(ValidationError::InvalidInput(
                "Account ID is required for updates".to_string(),
            ))),
        }
    }
}
