//! Rate provider trait and implementations.

pub mod nbp;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::RateError;
use crate::models::{RateKind, RateQuote};

/// Source of bid/ask quotes against the home currency.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Stable identifier used in logs and errors.
    fn id(&self) -> &'static str;

    /// Fetches the current bid/ask quote for `currency`.
    async fn get_quote(&self, currency: &str) -> Result<RateQuote, RateError>;

    /// Fetches one side of the current quote for `currency`.
    async fn get_rate(&self, currency: &str, kind: RateKind) -> Result<Decimal, RateError> {
        Ok(self.get_quote(currency).await?.rate(kind))
    }
}

/// Returns true for three-letter uppercase ASCII codes.
pub(crate) fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}
