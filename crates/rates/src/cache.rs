//! Short-lived quote cache.
//!
//! A quote is served from memory for at most `ttl` after it was fetched.
//! Errors are never cached, so an outage is retried on the next call.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

use crate::errors::RateError;
use crate::models::RateQuote;
use crate::provider::RateProvider;

pub struct CachingRateProvider<P: RateProvider> {
    inner: Arc<P>,
    ttl: Duration,
    cache: Arc<Mutex<HashMap<String, (Instant, RateQuote)>>>,
}

impl<P: RateProvider> CachingRateProvider<P> {
    /// Wraps `inner`. A zero `ttl` disables caching.
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner: Arc::new(inner),
            ttl,
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl<P: RateProvider + 'static> RateProvider for CachingRateProvider<P> {
    fn id(&self) -> &'static str {
        self.inner.id()
    }

    async fn get_quote(&self, currency: &str) -> Result<RateQuote, RateError> {
        if !self.ttl.is_zero() {
            let cache = self.cache.lock().await;
            if let Some((fetched, quote)) = cache.get(currency) {
                if fetched.elapsed() < self.ttl {
                    debug!("Cache hit for rate: {}", currency);
                    return Ok(quote.clone());
                }
            }
        }

        debug!("Cache miss for rate: {}", currency);
        let quote = self.inner.get_quote(currency).await?;

        if !self.ttl.is_zero() {
            self.cache
                .lock()
                .await
                .insert(currency.to_string(), (Instant::now(), quote.clone()));
        }
        Ok(quote)
    }
}
