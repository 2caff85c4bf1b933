//! Exchange rate port for native-coin to fiat conversion.

use async_trait::async_trait;
use thiserror::Error;

/// Port for a public price feed.
#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Fiat value of one native coin in the feed's configured currency.
    async fn rate(&self) -> Result<ExchangeRate, PriceFeedError>;
}

/// A single native-to-fiat rate.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRate {
    /// Feed identifier of the coin (e.g. `ethereum`).
    pub coin_id: String,

    /// Lowercase ISO 4217 currency code.
    pub currency: String,

    /// Fiat value of one coin.
    pub rate: f64,
}

/// Errors from the price feed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceFeedError {
    /// Network failure reaching the feed.
    #[error("Price feed request failed: {0}")]
    Network(String),

    /// Feed answered with a non-success status.
    #[error("Price feed returned status {0}")]
    Status(u16),

    /// Body was not the expected JSON shape.
    #[error("Failed to parse price feed response: {0}")]
    Parse(String),

    /// Response lacked the requested coin/currency pair.
    #[error("Price feed has no {currency} rate for {coin_id}")]
    MissingRate { coin_id: String, currency: String },

    /// Rate was zero, negative or not a number.
    #[error("Price feed returned an unusable rate: {0}")]
    InvalidRate(String),
}
