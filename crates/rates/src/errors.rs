//! Error types for rate lookups.
//!
//! Every variant means the same thing to the ledger: no usable rate right now.
//! The variants exist so logs say why.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RateError {
    /// The code is not a three-letter uppercase currency code.
    #[error("Unsupported currency code: {0}")]
    UnsupportedCurrency(String),

    /// The request did not complete within the client timeout.
    #[error("Timeout: {provider}")]
    Timeout { provider: String },

    /// The provider answered with a non-success HTTP status.
    #[error("Provider {provider} returned HTTP {status} for {currency}")]
    Status {
        provider: String,
        currency: String,
        status: u16,
    },

    /// The body could not be read as a rate table, or held no usable rate.
    #[error("Unexpected response from {provider}: {message}")]
    MalformedResponse { provider: String, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl RateError {
    pub(crate) fn malformed(provider: &str, message: impl Into<String>) -> Self {
        RateError::MalformedResponse {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}
