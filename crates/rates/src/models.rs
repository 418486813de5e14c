use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which side of the home-currency venue's quote to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateKind {
    /// Price at which the venue buys the foreign currency.
    Bid,
    /// Price at which the venue sells the foreign currency.
    Ask,
}

impl std::fmt::Display for RateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateKind::Bid => write!(f, "bid"),
            RateKind::Ask => write!(f, "ask"),
        }
    }
}

/// Bid/ask quote for one currency, in home-currency units per foreign unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuote {
    pub currency: String,
    pub bid: Decimal,
    pub ask: Decimal,
    pub effective_date: Option<NaiveDate>,
    pub fetched_at: DateTime<Utc>,
}

impl RateQuote {
    pub fn rate(&self, kind: RateKind) -> Decimal {
        match kind {
            RateKind::Bid => self.bid,
            RateKind::Ask => self.ask,
        }
    }
}
