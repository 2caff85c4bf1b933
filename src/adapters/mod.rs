//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `chain` - Sale contract reads over JSON-RPC
//! - `price_feed` - CoinGecko exchange rates
//! - `stripe` - Stripe payment intents and webhooks
//! - `http` - Axum routes

pub mod chain;
pub mod http;
pub mod price_feed;
pub mod stripe;

pub use chain::{AlloyContractReader, MockContractReader};
pub use http::{app_router, CheckoutAppState};
pub use price_feed::{CoinGeckoPriceFeed, MockExchangeRateProvider};
pub use stripe::{MockPaymentProvider, StripeConfig, StripePaymentAdapter};
