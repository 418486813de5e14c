use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use kantor_core::accounts as core_accounts;
use kantor_core::ledger as core_ledger;
use kantor_core::users as core_users;

use crate::error::ApiError;

pub const MISSING_FIELDS: &str = "Missing required fields";
pub const INVALID_AMOUNT: &str = "Invalid amount";

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub last_login: Option<NaiveDateTime>,
}

impl From<core_users::User> for User {
    fn from(u: core_users::User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            first_name: u.first_name,
            last_name: u.last_name,
            phone_number: u.phone_number,
            email: u.email,
            created_at: u.created_at,
            updated_at: u.updated_at,
            last_login: u.last_login,
        }
    }
}

/// Registration payload. Absent fields are reported by the validator.
#[derive(Deserialize, ToSchema, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
}

impl From<NewUser> for core_users::NewUser {
    fn from(u: NewUser) -> Self {
        Self {
            username: u.username,
            password: u.password,
            first_name: u.first_name,
            last_name: u.last_name,
            phone_number: u.phone_number,
            email: u.email,
        }
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UserUpdate {
    pub fn into_core(self, id: String) -> core_users::UserUpdate {
        core_users::UserUpdate {
            id: Some(id),
            first_name: self.first_name,
            last_name: self.last_name,
            phone_number: self.phone_number,
            email: self.email,
            password: self.password,
        }
    }
}

#[derive(Deserialize, ToSchema, Clone, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl From<LoginRequest> for core_users::Credentials {
    fn from(r: LoginRequest) -> Self {
        Self {
            username: r.username,
            password: r.password,
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct UserResponse {
    pub message: String,
    pub user: User,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyAccount {
    pub id: String,
    pub user_id: String,
    pub currency_code: String,
    #[schema(value_type = String, example = "1200.00")]
    pub balance: Decimal,
    pub is_active: bool,
    pub account_number: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<core_accounts::CurrencyAccount> for CurrencyAccount {
    fn from(a: core_accounts::CurrencyAccount) -> Self {
        Self {
            id: a.id,
            user_id: a.user_id,
            currency_code: a.currency_code,
            balance: a.balance,
            is_active: a.is_active,
            account_number: a.account_number,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
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

impl From<NewCurrencyAccount> for core_accounts::NewCurrencyAccount {
    fn from(a: NewCurrencyAccount) -> Self {
        Self {
            user_id: a.user_id,
            currency_code: a.currency_code.trim().to_uppercase(),
            is_active: a.is_active,
        }
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyAccountUpdate {
    pub is_active: bool,
}

/// Deposit body. Fields stay loose so absent and malformed values get the
/// documented messages instead of a generic rejection.
#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct DepositPayload {
    pub currency_code: Option<String>,
    #[schema(value_type = String, example = "200.00")]
    pub amount: Option<Value>,
}

impl DepositPayload {
    pub fn into_request(self, user_id: String) -> Result<core_ledger::DepositRequest, ApiError> {
        let (Some(currency_code), Some(amount)) = (non_blank(self.currency_code), self.amount)
        else {
            return Err(ApiError::BadRequest(MISSING_FIELDS.to_string()));
        };
        Ok(core_ledger::DepositRequest {
            user_id,
            currency_code,
            amount: parse_amount(&amount)?,
        })
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConvertPayload {
    pub from_currency: Option<String>,
    pub to_currency: Option<String>,
    #[schema(value_type = String, example = "100.00")]
    pub amount: Option<Value>,
}

impl ConvertPayload {
    pub fn into_request(
        self,
        user_id: String,
    ) -> Result<core_ledger::ConversionRequest, ApiError> {
        let (Some(from_currency), Some(to_currency), Some(amount)) = (
            non_blank(self.from_currency),
            non_blank(self.to_currency),
            self.amount,
        ) else {
            return Err(ApiError::BadRequest(MISSING_FIELDS.to_string()));
        };
        Ok(core_ledger::ConversionRequest {
            user_id,
            from_currency,
            to_currency,
            amount: parse_amount(&amount)?,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_uppercase())
        .filter(|v| !v.is_empty())
}

/// Accepts a JSON number or a numeric string.
pub fn parse_amount(value: &Value) -> Result<Decimal, ApiError> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(ApiError::BadRequest(INVALID_AMOUNT.to_string())),
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| ApiError::BadRequest(INVALID_AMOUNT.to_string()))
}

#[derive(Deserialize, IntoParams, Debug, Default)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DepositQuery {
    pub currency_code: Option<String>,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DepositRecord {
    pub id: String,
    pub user_id: String,
    pub account_id: String,
    pub currency_code: String,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub created_at: NaiveDateTime,
}

impl From<core_ledger::DepositRecord> for DepositRecord {
    fn from(d: core_ledger::DepositRecord) -> Self {
        Self {
            id: d.id,
            user_id: d.user_id,
            account_id: d.account_id,
            currency_code: d.currency_code,
            amount: d.amount,
            created_at: d.created_at,
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: String,
    pub user_id: String,
    pub from_currency: String,
    pub to_currency: String,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub created_at: NaiveDateTime,
}

impl From<core_ledger::TransactionRecord> for TransactionRecord {
    fn from(t: core_ledger::TransactionRecord) -> Self {
        Self {
            id: t.id,
            user_id: t.user_id,
            from_currency: t.from_currency,
            to_currency: t.to_currency,
            amount: t.amount,
            created_at: t.created_at,
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AccountHistoryEntry {
    pub id: String,
    pub user_id: String,
    pub currency: String,
    #[schema(value_type = String)]
    pub amount: Decimal,
    /// `income` or `expense`.
    pub action: String,
    pub created_at: NaiveDateTime,
}

impl From<core_ledger::AccountHistoryEntry> for AccountHistoryEntry {
    fn from(h: core_ledger::AccountHistoryEntry) -> Self {
        Self {
            id: h.id,
            user_id: h.user_id,
            currency: h.currency,
            amount: h.amount,
            action: h.action.to_string(),
            created_at: h.created_at,
        }
    }
}
