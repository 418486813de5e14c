//! Exchange rate gateway for Kantor.
//!
//! Rates are quoted as bid/ask prices of a foreign currency in the home
//! currency (PLN). The crate exposes a provider trait, the NBP table C client
//! and a short-lived cache that wraps any provider.
//!
//! ```text
//! ledger (core) ──► RateProvider ──► CachingRateProvider ──► NbpRateProvider ──► api.nbp.pl
//! ```

pub mod cache;
pub mod errors;
pub mod models;
pub mod provider;

pub use cache::CachingRateProvider;
pub use errors::RateError;
pub use models::{RateKind, RateQuote};
pub use provider::nbp::NbpRateProvider;
pub use provider::RateProvider;
