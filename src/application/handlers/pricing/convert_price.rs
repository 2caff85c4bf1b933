//! PriceConverter - native amount to fiat via the exchange rate port.

use std::sync::Arc;

use crate::domain::pricing::{PriceQuote, NATIVE_UNIT};
use crate::ports::ExchangeRateProvider;

/// Converts native-coin amounts to fiat.
///
/// Feed failures are logged and reported as `None`; callers decide how to
/// handle an unavailable price.
pub struct PriceConverter {
    exchange_rates: Arc<dyn ExchangeRateProvider>,
}

impl PriceConverter {
    pub fn new(exchange_rates: Arc<dyn ExchangeRateProvider>) -> Self {
        Self { exchange_rates }
    }

    pub async fn convert(&self, native_amount: f64) -> Option<PriceQuote> {
        match self.exchange_rates.rate().await {
            Ok(rate) => Some(PriceQuote::from_rate(native_amount, rate.rate, rate.currency)),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    amount = native_amount,
                    unit = NATIVE_UNIT,
                    "Price feed request failed"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::price_feed::MockExchangeRateProvider;
    use crate::ports::PriceFeedError;

    #[tokio::test]
    async fn convert_multiplies_by_rate() {
        let converter = PriceConverter::new(Arc::new(MockExchangeRateProvider::with_rate(3000.0)));

        let quote = converter.convert(0.05).await.unwrap();

        assert_eq!(quote.native_amount, 0.05);
        assert!((quote.fiat_amount - 150.0).abs() < 1e-9);
        assert_eq!(quote.fiat_currency, "eur");
    }

    #[tokio::test]
    async fn convert_returns_none_when_feed_fails() {
        for error in [
            PriceFeedError::Network("connection reset".to_string()),
            PriceFeedError::Status(500),
            PriceFeedError::Parse("eof".to_string()),
            PriceFeedError::MissingRate {
                coin_id: "ethereum".to_string(),
                currency: "eur".to_string(),
            },
        ] {
            let converter =
                PriceConverter::new(Arc::new(MockExchangeRateProvider::failing(error)));
            assert!(converter.convert(1.0).await.is_none());
        }
    }
}
