//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CHECKOUT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use genesis_checkout::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod chain;
mod error;
mod payment;
mod pricing;
mod server;

pub use chain::{ChainConfig, Network};
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use pricing::PricingConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Built once at startup and passed by reference into each component.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, static files)
    #[serde(default)]
    pub server: ServerConfig,

    /// Payment configuration (Stripe)
    pub payment: PaymentConfig,

    /// Blockchain configuration (price contract)
    #[serde(default)]
    pub chain: ChainConfig,

    /// Price feed configuration
    #[serde(default)]
    pub pricing: PricingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CHECKOUT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CHECKOUT__SERVER__PORT=4242` -> `server.port = 4242`
    /// - `CHECKOUT__PAYMENT__STRIPE_SECRET_KEY=...` -> `payment.stripe_secret_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CHECKOUT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// In production the Stripe keys must be live-mode keys.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.payment.validate()?;
        self.chain.validate()?;
        self.pricing.validate()?;

        if self.is_production() && !self.payment.is_live_mode() {
            return Err(ValidationError::LiveKeysRequired);
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
