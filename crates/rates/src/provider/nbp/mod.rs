//! NBP (Narodowy Bank Polski) table C provider.
//!
//! Table C publishes buy (bid) and sell (ask) prices in PLN for a fixed set of
//! foreign currencies. Only the first rate entry of a response is used.

mod models;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

use self::models::NbpRatesResponse;
use super::{is_currency_code, RateProvider};
use crate::errors::RateError;
use crate::models::RateQuote;

const PROVIDER_ID: &str = "NBP";

/// Public NBP API host.
pub const DEFAULT_BASE_URL: &str = "https://api.nbp.pl";

/// Default HTTP request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct NbpRateProvider {
    client: Client,
    base_url: String,
}

impl NbpRateProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn rates_url(&self, currency: &str) -> String {
        format!(
            "{}/api/exchangerates/rates/c/{}/?format=json",
            self.base_url,
            currency.to_lowercase()
        )
    }

    fn parse_rate(value: &serde_json::Number, field: &str) -> Result<Decimal, RateError> {
        let text = value.to_string();
        let rate = Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map_err(|e| RateError::malformed(PROVIDER_ID, format!("{field} '{text}': {e}")))?;

        if rate <= Decimal::ZERO {
            return Err(RateError::malformed(
                PROVIDER_ID,
                format!("{field} must be positive, got {rate}"),
            ));
        }
        Ok(rate)
    }
}

impl Default for NbpRateProvider {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl RateProvider for NbpRateProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_quote(&self, currency: &str) -> Result<RateQuote, RateError> {
        if !is_currency_code(currency) {
            return Err(RateError::UnsupportedCurrency(currency.to_string()));
        }

        let url = self.rates_url(currency);
        debug!("Fetching {} rate from {}", currency, url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                RateError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                RateError::Network(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateError::Status {
                provider: PROVIDER_ID.to_string(),
                currency: currency.to_string(),
                status: status.as_u16(),
            });
        }

        let body: NbpRatesResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                RateError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                RateError::malformed(PROVIDER_ID, e.to_string())
            }
        })?;

        let entry = body
            .rates
            .first()
            .ok_or_else(|| RateError::malformed(PROVIDER_ID, "empty rates list"))?;

        let bid = Self::parse_rate(&entry.bid, "bid")?;
        let ask = Self::parse_rate(&entry.ask, "ask")?;
        let effective_date = entry
            .effective_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());

        Ok(RateQuote {
            currency: currency.to_string(),
            bid,
            ask,
            effective_date,
            fetched_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RateKind;
    use rust_decimal_macros::dec;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const USD_RESPONSE: &str = r#"{
        "table": "C",
        "currency": "dolar amerykański",
        "code": "USD",
        "rates": [
            {"no": "001/C/NBP/2025", "effectiveDate": "2025-01-02", "bid": 4.0512, "ask": 4.1330},
            {"no": "000/C/NBP/2024", "effectiveDate": "2024-12-31", "bid": 1.0, "ask": 1.0}
        ]
    }"#;

    async fn create_mock_server(currency: &str, status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/api/exchangerates/rates/c/{currency}/")))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn test_get_quote_uses_first_entry() {
        let server = create_mock_server("usd", 200, USD_RESPONSE).await;
        let provider = NbpRateProvider::new(server.uri(), DEFAULT_TIMEOUT);

        let quote = provider.get_quote("USD").await.unwrap();
        assert_eq!(quote.currency, "USD");
        assert_eq!(quote.bid, dec!(4.0512));
        assert_eq!(quote.ask, dec!(4.1330));
        assert_eq!(
            quote.effective_date,
            Some(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap())
        );
    }

    #[tokio::test]
    async fn test_get_rate_selects_side() {
        let server = create_mock_server("usd", 200, USD_RESPONSE).await;
        let provider = NbpRateProvider::new(server.uri(), DEFAULT_TIMEOUT);

        assert_eq!(
            provider.get_rate("USD", RateKind::Bid).await.unwrap(),
            dec!(4.0512)
        );
        assert_eq!(
            provider.get_rate("USD", RateKind::Ask).await.unwrap(),
            dec!(4.1330)
        );
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let server = create_mock_server("xyz", 404, "404 NotFound").await;
        let provider = NbpRateProvider::new(server.uri(), DEFAULT_TIMEOUT);

        let err = provider.get_quote("XYZ").await.unwrap_err();
        assert!(matches!(err, RateError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_empty_rates_list() {
        let server = create_mock_server(
            "eur",
            200,
            r#"{"table":"C","code":"EUR","rates":[]}"#,
        )
        .await;
        let provider = NbpRateProvider::new(server.uri(), DEFAULT_TIMEOUT);

        let err = provider.get_quote("EUR").await.unwrap_err();
        assert!(matches!(err, RateError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_unexpected_shape() {
        let server = create_mock_server("eur", 200, r#"{"rates": {"bid": 4.2}}"#).await;
        let provider = NbpRateProvider::new(server.uri(), DEFAULT_TIMEOUT);

        let err = provider.get_quote("EUR").await.unwrap_err();
        assert!(matches!(err, RateError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_non_positive_rate_rejected() {
        let server = create_mock_server(
            "gbp",
            200,
            r#"{"rates":[{"effectiveDate":"2025-01-02","bid":0,"ask":5.1}]}"#,
        )
        .await;
        let provider = NbpRateProvider::new(server.uri(), DEFAULT_TIMEOUT);

        let err = provider.get_quote("GBP").await.unwrap_err();
        assert!(matches!(err, RateError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_timeout() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(USD_RESPONSE)
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;
        let provider = NbpRateProvider::new(mock_server.uri(), Duration::from_millis(50));

        let err = provider.get_quote("USD").await.unwrap_err();
        assert!(matches!(err, RateError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_invalid_code_skips_request() {
        let provider = NbpRateProvider::new("http://127.0.0.1:9", DEFAULT_TIMEOUT);
        let err = provider.get_quote("usd$").await.unwrap_err();
        assert!(matches!(err, RateError::UnsupportedCurrency(_)));
    }
}
