//! CoinGecko simple price API client.
//!
//! Calls `GET {base}/simple/price?ids={coin}&vs_currencies={currency}` and
//! reads `body[coin][currency]`. No API key is needed for the public tier.

use async_trait::async_trait;

use crate::config::PricingConfig;
use crate::ports::{ExchangeRate, ExchangeRateProvider, PriceFeedError};

/// Exchange rate provider backed by CoinGecko.
pub struct CoinGeckoPriceFeed {
    base_url: String,
    coin_id: String,
    currency: String,
    http_client: reqwest::Client,
}

impl CoinGeckoPriceFeed {
    /// Create a feed for `coin_id` priced in `currency`.
    pub fn new(
        base_url: impl Into<String>,
        coin_id: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            coin_id: coin_id.into(),
            currency: currency.into(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Build from application pricing configuration.
    pub fn from_config(config: &PricingConfig) -> Self {
        Self::new(&config.feed_base_url, &config.coin_id, &config.currency)
    }

    fn price_url(&self) -> String {
        format!("{}/simple/price", self.base_url)
    }
}

#[async_trait]
impl ExchangeRateProvider for CoinGeckoPriceFeed {
    async fn rate(&self) -> Result<ExchangeRate, PriceFeedError> {
        let response = self
            .http_client
            .get(self.price_url())
            .query(&[
                ("ids", self.coin_id.as_str()),
                ("vs_currencies", self.currency.as_str()),
            ])
            .send()
            .await
            .map_err(|e| PriceFeedError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PriceFeedError::Status(status.as_u16()));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| PriceFeedError::Parse(e.to_string()))?;

        let rate = parse_rate(&body, &self.coin_id, &self.currency)?;

        Ok(ExchangeRate {
            coin_id: self.coin_id.clone(),
            currency: self.currency.clone(),
            rate,
        })
    }
}

/// Extract `body[coin_id][currency]` as a positive finite rate.
pub fn parse_rate(
    body: &serde_json::Value,
    coin_id: &str,
    currency: &str,
) -> Result<f64, PriceFeedError> {
    let value = body
        .get(coin_id)
        .and_then(|coin| coin.get(currency))
        .ok_or_else(|| PriceFeedError::MissingRate {
            coin_id: coin_id.to_string(),
            currency: currency.to_string(),
        })?;

    let rate = value
        .as_f64()
        .ok_or_else(|| PriceFeedError::InvalidRate(value.to_string()))?;

    if !rate.is_finite() || rate <= 0.0 {
        return Err(PriceFeedError::InvalidRate(value.to_string()));
    }

    Ok(rate)
}
