//! Mock exchange rate provider for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{ExchangeRate, ExchangeRateProvider, PriceFeedError};

/// Exchange rate provider returning a configurable rate or error.
#[derive(Clone)]
pub struct MockExchangeRateProvider {
    result: Arc<Mutex<Result<ExchangeRate, PriceFeedError>>>,
    calls: Arc<AtomicUsize>,
}

impl MockExchangeRateProvider {
    /// Provider quoting one ETH at `rate` EUR.
    pub fn with_rate(rate: f64) -> Self {
        Self {
            result: Arc::new(Mutex::new(Ok(ExchangeRate {
                coin_id: "ethereum".to_string(),
                currency: "eur".to_string(),
                rate,
            }))),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Provider whose every call fails with `error`.
    pub fn failing(error: PriceFeedError) -> Self {
        Self {
            result: Arc::new(Mutex::new(Err(error))),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `rate` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExchangeRateProvider for MockExchangeRateProvider {
    async fn rate(&self) -> Result<ExchangeRate, PriceFeedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_configured_rate() {
        let provider = MockExchangeRateProvider::with_rate(3000.0);

        let rate = provider.rate().await.unwrap();

        assert_eq!(rate.rate, 3000.0);
        assert_eq!(rate.currency, "eur");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn failing_provider_returns_error() {
        let provider = MockExchangeRateProvider::failing(PriceFeedError::Status(503));
        assert_eq!(provider.rate().await, Err(PriceFeedError::Status(503)));
    }
}
