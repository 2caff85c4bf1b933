//! Price feed configuration

use serde::Deserialize;

use crate::domain::pricing::CHECKOUT_CURRENCY;

use super::error::ValidationError;

/// Price feed configuration (CoinGecko simple price API)
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    /// Base URL of the price feed API
    #[serde(default = "default_feed_base_url")]
    pub feed_base_url: String,

    /// Feed identifier of the native coin
    #[serde(default = "default_coin_id")]
    pub coin_id: String,

    /// Fiat currency the feed quotes in; only `eur` is accepted
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl PricingConfig {
    /// Validate pricing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.feed_base_url.starts_with("http://") && !self.feed_base_url.starts_with("https://")
        {
            return Err(ValidationError::InvalidUrl("FEED_BASE_URL"));
        }
        if self.coin_id.is_empty() {
            return Err(ValidationError::MissingRequired("COIN_ID"));
        }
        if self.currency != CHECKOUT_CURRENCY {
            return Err(ValidationError::InvalidCurrency(self.currency.clone()));
        }
        Ok(())
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            feed_base_url: default_feed_base_url(),
            coin_id: default_coin_id(),
            currency: default_currency(),
        }
    }
}

fn default_feed_base_url() -> String {
    "https://api.coingecko.com/api/v3".to_string()
}

fn default_coin_id() -> String {
    "ethereum".to_string()
}

fn default_currency() -> String {
    CHECKOUT_CURRENCY.to_string()
}
