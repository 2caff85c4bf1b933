//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `ContractReader` - On-chain price accessor
//! - `ExchangeRateProvider` - Native coin to fiat rate
//! - `PaymentProvider` - Payment intents and webhook verification

mod contract_reader;
mod exchange_rate;
mod payment_provider;

pub use contract_reader::{ContractReadError, ContractReader};
pub use exchange_rate::{ExchangeRate, ExchangeRateProvider, PriceFeedError};
pub use payment_provider::{
    CreatePaymentIntentRequest, PaymentError, PaymentErrorCode, PaymentIntent,
    PaymentIntentStatus, PaymentProvider, WebhookEvent, WebhookEventData, WebhookEventType,
};
