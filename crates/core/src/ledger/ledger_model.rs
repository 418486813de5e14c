//! Ledger domain models.

use chrono::NaiveDateTime;
use kantor_rates::RateKind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ledger_errors::LedgerError;
use crate::accounts::is_home_currency;
use crate::errors::{Error, ValidationError};
use crate::utils::money::{checked_price, round_credit, round_debit, to_money};

/// Direction of an account history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    Income,
    Expense,
}

impl HistoryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryAction::Income => "income",
            HistoryAction::Expense => "expense",
        }
    }
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(HistoryAction::Income),
            "expense" => Ok(HistoryAction::Expense),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown history action '{}'",
                other
            )))),
        }
    }
}

/// A committed credit into one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRecord {
    pub id: String,
    pub user_id: String,
    pub account_id: String,
    pub currency_code: String,
    pub amount: Decimal,
    pub created_at: NaiveDateTime,
}

/// A committed conversion. `amount` is the requested amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: String,
    pub user_id: String,
    pub from_currency: String,
    pub to_currency: String,
    pub amount: Decimal,
    pub created_at: NaiveDateTime,
}

/// One leg of a conversion as seen by a single currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountHistoryEntry {
    pub id: String,
    pub user_id: String,
    pub currency: String,
    pub amount: Decimal,
    pub action: HistoryAction,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
    pub user_id: String,
    pub currency_code: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRequest {
    pub user_id: String,
    pub from_currency: String,
    pub to_currency: String,
    pub amount: Decimal,
}

impl ConversionRequest {
    /// The quote a conversion is priced with.
    ///
    /// Rates are only quoted against the home currency: buying out of the
    /// home currency uses the ask of the destination, everything else sells
    /// the source at its bid.
    pub fn rate_source(&self) -> (&str, RateKind) {
        if is_home_currency(&self.from_currency) {
            (&self.to_currency, RateKind::Ask)
        } else {
            (&self.from_currency, RateKind::Bid)
        }
    }
}

/// A priced conversion, ready to be applied.
///
/// The debit always leaves the `from_currency` account and the credit
/// always enters the `to_currency` account.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionPlan {
    pub user_id: String,
    pub from_currency: String,
    pub to_currency: String,
    pub amount: Decimal,
    pub rate: Decimal,
    pub rate_kind: RateKind,
    pub debit_amount: Decimal,
    pub credit_amount: Decimal,
}

impl ConversionPlan {
    /// Prices `request` at `rate`, which must be the quote named by
    /// [`ConversionRequest::rate_source`].
    pub fn new(request: &ConversionRequest, rate: Decimal) -> Result<Self, LedgerError> {
        let (_, rate_kind) = request.rate_source();
        let amount = to_money(request.amount);
        let (debit_amount, credit_amount) = match rate_kind {
            RateKind::Ask => (round_debit(checked_price(amount, rate)?), amount),
            RateKind::Bid => (amount, round_credit(checked_price(amount, rate)?)),
        };

        Ok(Self {
            user_id: request.user_id.clone(),
            from_currency: request.from_currency.clone(),
            to_currency: request.to_currency.clone(),
            amount,
            rate,
            rate_kind,
            debit_amount,
            credit_amount,
        })
    }
}
